//! Supplier Registration CLI
//!
//! `supplier-form lookup <CEP>` resolves an address.
//! `supplier-form assemble --form form.json --attach file...` runs the save
//! action and writes the supplier document.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use bytes::Bytes;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sr_attachments::{AttachmentError, DataUrlEncoder, FileSessionStorage, MemoryBinaryStore};
use sr_core::config::AppConfig;
use sr_core::SrResult;
use sr_models::AddressFields;
use sr_postal::{AddressAutofill, ViaCepClient};
use sr_services::{FileSink, FormInput, SaveService, SupplierForm};

#[derive(Parser)]
#[command(name = "supplier-form")]
#[command(about = "Supplier registration form tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a postal code (CEP) into street, district, city and state
    Lookup {
        cep: String,
    },
    /// Build the supplier document from a form file and attachments
    Assemble {
        #[arg(long)]
        form: PathBuf,
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        #[arg(long, env = "SR_OUTPUT_PATH")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    init_tracing(&config.logging.default_filter);

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Lookup { cep } => lookup(&config, &cep).await,
        Commands::Assemble { form, attachments, out } => {
            let out = out.unwrap_or_else(|| config.output.path.clone());
            assemble(&config, &form, &attachments, out).await
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "Command failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::from(1))
        }
    }
}

/// Logs go to stderr so stdout stays machine readable
fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

async fn lookup(config: &AppConfig, cep: &str) -> SrResult<()> {
    let client = ViaCepClient::from_config(&config.postal)?;
    let autofill = AddressAutofill::new(Arc::new(client));

    let mut fields = AddressFields::default();
    autofill.fill(cep, &mut fields).await?;

    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

async fn assemble(
    config: &AppConfig,
    form_path: &Path,
    attachments: &[PathBuf],
    out: PathBuf,
) -> SrResult<()> {
    let raw = tokio::fs::read_to_string(form_path).await?;
    let input: FormInput = serde_json::from_str(&raw)?;

    let session = FileSessionStorage::new(&config.session.dir, config.session.quota_bytes)
        .map_err(AttachmentError::from)?;
    let mut form = SupplierForm::with_stores(
        Arc::new(MemoryBinaryStore::new()),
        Arc::new(session),
        &config.session.attachments_key,
    );
    form.load(input);

    for path in attachments {
        let payload = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        form.attachments().add(name, Bytes::from(payload));
    }

    let sink = Arc::new(FileSink::new(&out));
    let service = SaveService::new(Arc::new(DataUrlEncoder::new()), sink);
    let result = service.save(&form).await;

    // The session list only lives as long as this command
    form.attachments().clear();

    let document = result?;
    info!(
        path = %out.display(),
        produtos = document.produtos.len(),
        anexos = document.anexos.len(),
        "Supplier document written"
    );
    println!("{}", out.display());
    Ok(())
}
