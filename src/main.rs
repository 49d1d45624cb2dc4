use deckdex::adapters::outbound::deck_store::postgres::Postgres;
use deckdex::adapters::outbound::metadata_fetcher::youtube::YouTube;
use deckdex::domain::app::App;
use dotenv::dotenv;
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let urls: Vec<String> = env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("Usage: deckdex <video-url>...");
        return ExitCode::from(2);
    }

    let app = App::new(Postgres::create().await, YouTube::create());
    let report = app.import_urls(&urls).await;

    println!(
        "Imported {}, skipped {}, failed {}",
        report.imported, report.skipped, report.failed
    );

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
