//! Print the OpenAPI document as JSON, to stdout or to `--output`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use eduista::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Export the Eduista OpenAPI document")]
struct Args {
    /// Write the document to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("serialise OpenAPI document")?;

    match args.output {
        Some(path) => std::fs::write(&path, document)
            .with_context(|| format!("write OpenAPI document to {}", path.display()))?,
        None => println!("{document}"),
    }
    Ok(())
}
