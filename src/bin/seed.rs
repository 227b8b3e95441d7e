use al_asas::config::Config;
use al_asas::seed::{self, SeedPaths};
use al_asas::store::SqliteStore;

fn main() {
    pretty_env_logger::init();
    let config = Config::from_env();

    log::info!("Starting combined data seed from {}", config.data_dir.display());

    let result = SqliteStore::open(&config.database_path)
        .and_then(|store| seed::run(&store, &SeedPaths::in_dir(&config.data_dir)));

    match result {
        Ok(report) => log::info!(
            "Seed complete: {} verses, {} words, {} verse pages, {} authored questions",
            report.verses,
            report.words,
            report.verse_pages,
            report.questions
        ),
        Err(e) => {
            log::error!("Error during seeding: {:#}", e);
            std::process::exit(1);
        }
    }
}
