//! Writes the OpenAPI document of the service to disk.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use utoipa::OpenApi;
use webeye_api::router::ApiDoc;

#[derive(Parser, Debug)]
#[command(version, about = "Generate the WebEye OpenAPI document")]
struct Args {
    /// Where to write the document.
    #[arg(short, long, default_value = "openapi.json")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let spec_json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize the OpenAPI document")?;
    std::fs::write(&args.out, spec_json)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    Ok(())
}
