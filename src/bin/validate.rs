//! Metadata Validator CLI
//!
//! Validates component libraries and prints assembled manifests.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use component_metadata::{gather_metadata, ComponentKind, MetaConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meta-validator")]
#[command(about = "Validate component library metadata and assemble manifests")]
struct Cli {
    /// Path to a config file (component-meta.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble and validate one or more libraries
    Validate {
        /// Library root directories; falls back to the configured list
        libraries: Vec<PathBuf>,
    },

    /// Assemble a library and print its manifest as JSON
    Show {
        /// Library root directory
        library: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = MetaConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { libraries } => {
            let roots = if libraries.is_empty() {
                if config.loader.libraries.is_empty() {
                    vec![PathBuf::from(".")]
                } else {
                    config.loader.libraries.clone()
                }
            } else {
                libraries
            };

            let mut all_valid = true;

            for root in roots {
                match gather_metadata(&root).await {
                    Ok(manifest) => {
                        let composites = manifest
                            .components
                            .values()
                            .filter(|c| c.kind == ComponentKind::Composite)
                            .count();
                        println!(
                            "✅ {} ('{}') - {} components ({} composite), {} groups",
                            root.display(),
                            manifest.namespace,
                            manifest.components.len(),
                            composites,
                            manifest.component_groups.len(),
                        );
                    }
                    Err(e) => {
                        all_valid = false;
                        println!("❌ {} - {}", root.display(), e);
                    }
                }
            }

            if !all_valid {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Show { library, output } => {
            let manifest = gather_metadata(&library).await?;

            let json = if config.display.compact_output {
                serde_json::to_string(&manifest)?
            } else {
                serde_json::to_string_pretty(&manifest)?
            };

            if let Some(path) = output {
                std::fs::write(&path, &json)?;
                println!("✅ Manifest written to {:?}", path);
            } else {
                println!("{}", json);
            }

            Ok(())
        }
    }
}
