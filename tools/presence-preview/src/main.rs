use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use presence_core::{Mode, PresenceEngine};
use tracing::info;

mod fixture;

use crate::fixture::Fixture;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a rich presence payload from a JSON fixture",
    long_about = None
)]
struct Opts {
    /// Fixture describing the context, icons and settings
    #[arg(value_name = "FIXTURE")]
    fixture: PathBuf,

    /// Render with pending preview settings
    #[arg(long)]
    preview: bool,

    /// Print compact JSON instead of pretty output
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    presence_telemetry::install("presence-preview", env!("CARGO_PKG_VERSION"))?;

    let fixture = Fixture::load(&opts.fixture)?;
    let mode = if opts.preview {
        Mode::Preview
    } else {
        Mode::Normal
    };
    let context = fixture.context(mode)?;
    let engine = PresenceEngine::from_env(fixture.settings)
        .context("failed to build HTTP transport")?;

    info!(
        fixture = %opts.fixture.display(),
        renderer = context.specificity().as_str(),
        "rendering fixture"
    );
    match engine.render(&context) {
        Some(presence) => {
            let json = if opts.compact {
                serde_json::to_string(&presence)?
            } else {
                serde_json::to_string_pretty(&presence)?
            };
            println!("{json}");
        }
        None => println!("no renderer applies to this context"),
    }
    Ok(())
}
