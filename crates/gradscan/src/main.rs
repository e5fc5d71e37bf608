use crate::prelude::*;
use clap::Parser;

mod error;
mod extract;
mod layout;
mod output;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Recover per-school remediation records from positional PDF reports"
)]
pub struct App {
    /// Path to the report PDF. The file name starts with the year code (e.g. F19_report.pdf).
    path: Option<std::path::PathBuf>,

    /// CSV destination. Defaults to the input path with a .csv extension.
    #[clap(short, long)]
    output: Option<std::path::PathBuf>,

    /// TOML file with scan geometry overrides.
    #[clap(short, long, env = "GRADSCAN_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Height of each scanned band, in points.
    #[clap(long)]
    band_height: Option<f32>,

    /// Maximum number of bands read from a single page.
    #[clap(long)]
    max_bands: Option<usize>,

    /// Print the records as JSON instead of writing a CSV file.
    #[clap(long)]
    json: bool,

    /// Whether to display additional information.
    #[clap(long, env = "GRADSCAN_VERBOSE", default_value = "false")]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    crate::extract::run(app)
}
