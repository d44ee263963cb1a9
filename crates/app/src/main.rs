use std::{error::Error, path::PathBuf};

use clap::Parser;

use render::Format;

mod convert;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "tripsplit")]
#[command(about = "Compute who owes whom from a trip expense snapshot")]
struct Cli {
    /// JSON snapshot with participants, expenses, splits and repayments.
    snapshot: PathBuf,

    /// Settings file, extension optional (also read from `TRIPSPLIT_SETTINGS`).
    #[arg(long, env = "TRIPSPLIT_SETTINGS", default_value = "settings")]
    settings: String,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.settings)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tripsplit={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Reading snapshot {}", cli.snapshot.display());
    let raw = std::fs::read_to_string(&cli.snapshot)?;
    let trip: api_types::snapshot::TripSnapshot = serde_json::from_str(&raw)?;
    let report = convert::compute_trip(trip, &settings.engine)?;
    if !report.rejections.is_empty() {
        tracing::warn!(
            "{} record(s) rejected, totals only cover valid records",
            report.rejections.len()
        );
    }

    let view = convert::report_view(&report);
    println!("{}", render::render(&view, cli.format)?);

    if settings.app.strict && !report.rejections.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
