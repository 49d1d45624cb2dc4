pub const DECK_CATALOG: &str = r"
select deck.id   as id,
       deck.name as name
from deck
order by deck.id;
";

pub const RESOURCE_EXISTS: &str = r"
select exists(select 1 from resource where resource.url = $1) as already_imported;
";

pub const INSERT_RESOURCE: &str = r"
insert into resource (url, title, author_name, deck_id, decklist_url, published_at, status)
values ($1, $2, $3, $4, $5, $6, $7)
returning id;
";

pub const INSERT_CHAPTER: &str = r"
insert into chapter (resource_id, start_timestamp, title, kind, opposing_deck_id)
values ($1, $2, $3, $4, $5);
";
