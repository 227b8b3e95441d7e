use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::Context;
use al_asas::config::Config;
use al_asas::seed::{pages, SeedPaths};

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let config = Config::from_env();
    let paths = SeedPaths::in_dir(&config.data_dir);

    let input = File::open(&paths.pages_csv)
        .with_context(|| format!("failed to open {}", paths.pages_csv.display()))?;
    let lines = pages::read_csv(BufReader::new(input))?;

    let output = File::create(&paths.pages_json)
        .with_context(|| format!("failed to create {}", paths.pages_json.display()))?;
    let mut writer = BufWriter::new(output);
    pages::write_json(&lines, &mut writer)?;
    writer.flush().context("failed to flush page layout JSON")?;

    log::info!(
        "Converted {} rows from {} to {}",
        lines.len(),
        paths.pages_csv.display(),
        paths.pages_json.display()
    );
    Ok(())
}
