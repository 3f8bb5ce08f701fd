//! Generate the OpenAPI document
//!
//! Prints the document to stdout, or writes it to `--output`.

use clap::{Parser, ValueEnum};
use locate_web::openapi::{get_openapi_json, get_openapi_yaml};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "generate-openapi")]
#[command(about = "Emit the Agents Locate API OpenAPI document")]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let document = match args.format {
        Format::Json => get_openapi_json()?,
        Format::Yaml => get_openapi_yaml()?,
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, document)?;
            eprintln!("Generated: {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}
