//! modshop: ingest, inspect and delete 3D model assets.
//!
//! Storage is configured from the environment (see `.env`): `USE_GCP=true` writes to Google
//! Cloud Storage, otherwise files go under `LOCAL_STORAGE_ROOT`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use modshop_cli::{image_content_type, init_tracing, inspect_model};
use modshop_core::{Config, ErrorMetadata};
use modshop_processing::{delete_stored_file, AssetIngestor, IngestRequest, UploadLimits, UploadedFile};
use modshop_storage::create_storage;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "modshop", about = "3D model asset ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a model and thumbnail and print the asset record
    Ingest {
        /// Display name of the asset
        #[arg(long)]
        name: String,
        /// Path to a .glb or .gltf model
        #[arg(long)]
        model: PathBuf,
        /// Path to the thumbnail image
        #[arg(long)]
        thumbnail: PathBuf,
        #[arg(long)]
        description: Option<String>,
        /// Scale override
        #[arg(long)]
        scale: Option<String>,
    },
    /// Delete stored files by address
    Delete {
        /// Addresses as recorded on the asset (`local:...` or an object key)
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Print bounds and scale for a model without storing it
    Inspect {
        /// Path to the model
        model: PathBuf,
        /// Scale override
        #[arg(long)]
        scale: Option<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn read_upload(path: &Path, content_type: &str) -> anyhow::Result<UploadedFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(UploadedFile::new(filename, content_type, data))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            name,
            model,
            thumbnail,
            description,
            scale,
        } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let storage = create_storage(&config).context("Failed to initialize storage")?;
            let ingestor = AssetIngestor::new(Arc::new(storage), UploadLimits::from_config(&config));

            let request = IngestRequest {
                name,
                description,
                model: Some(read_upload(&model, "").await?),
                thumbnail: Some(read_upload(&thumbnail, image_content_type(&thumbnail)).await?),
                scale_override: scale,
            };

            match ingestor.ingest(request).await {
                Ok(asset) => print_json(&asset)?,
                Err(e) => {
                    tracing::error!(
                        error = %e.detailed_message(),
                        code = e.error_code(),
                        "Ingestion failed"
                    );
                    anyhow::bail!(e.client_message());
                }
            }
        }
        Commands::Delete { addresses } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let storage = create_storage(&config).context("Failed to initialize storage")?;

            let mut failed = 0usize;
            for address in &addresses {
                if delete_stored_file(&storage, address).await {
                    println!("deleted {}", address);
                } else {
                    failed += 1;
                }
            }
            if failed > 0 {
                anyhow::bail!("{} of {} deletes failed", failed, addresses.len());
            }
        }
        Commands::Inspect { model, scale } => {
            let data = tokio::fs::read(&model)
                .await
                .with_context(|| format!("Failed to read {}", model.display()))?;
            print_json(&inspect_model(&data, scale.as_deref()))?;
        }
    }

    Ok(())
}
