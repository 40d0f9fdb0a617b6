//! datadrop CLI: stage data exports per section and submit them in one request.
//!
//! Set DATADROP_ENDPOINT_URL (or ENDPOINT_URL) to submit. Drafts live in
//! DATADROP_DRAFT_DIR (default `.datadrop`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use datadrop_cli::render::{
    render_catalog, render_draft, render_error, render_payload, render_receipt, render_staging,
};
use datadrop_cli::{init_tracing, log_error, parse_file_arg, sources_by_section, IdentityArgs};
use datadrop_client::SubmissionClient;
use datadrop_core::{Catalog, FormSession, IntakeConfig, IntakeError, MultipartPayload};
use datadrop_storage::{create_draft_store, load_draft, save_draft, DraftStore};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "datadrop", about = "Stage and submit marketing data exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories, sections and export steps
    Sections {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage files and submit the form
    Submit {
        #[command(flatten)]
        identity: IdentityArgs,
        /// File to attach, as SECTION=PATH (repeatable)
        #[arg(long = "file", value_name = "SECTION=PATH", value_parser = parse_file_arg)]
        files: Vec<(String, PathBuf)>,
        /// Print the request layout without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Saved draft operations
    Draft {
        #[command(subcommand)]
        sub: DraftCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Save the form fields and file names as the draft
    Save {
        #[command(flatten)]
        identity: IdentityArgs,
        /// File to record, as SECTION=PATH (repeatable)
        #[arg(long = "file", value_name = "SECTION=PATH", value_parser = parse_file_arg)]
        files: Vec<(String, PathBuf)>,
    },
    /// Print the saved draft
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Delete the saved draft
    Clear,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn report_error(config: &IntakeConfig, err: &IntakeError) {
    log_error(err);
    eprint!("{}", render_error(err, config.is_production()));
}

/// Build a session from the command-line fields, prefilled from the saved draft.
async fn prepare_session(
    config: &IntakeConfig,
    store: &dyn DraftStore,
    identity: IdentityArgs,
    files: &[(String, PathBuf)],
) -> Result<FormSession, IntakeError> {
    let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
    let mut session = FormSession::new(catalog, config.session_options());

    let draft = load_draft(store).await;
    session.set_fields(identity.into_fields(draft.as_ref().map(|d| &d.fields)));

    for (section, source) in sources_by_section(files) {
        session.stage_from(&section, &source).await?;
    }
    Ok(session)
}

async fn submit(
    config: &IntakeConfig,
    store: &dyn DraftStore,
    identity: IdentityArgs,
    files: Vec<(String, PathBuf)>,
    dry_run: bool,
) -> Result<(), IntakeError> {
    let mut session = prepare_session(config, store, identity, &files).await?;
    print!("{}", render_staging(session.catalog(), session.staging()));

    if dry_run {
        let payload = MultipartPayload::encode(session.fields(), session.staging())?;
        println!();
        print!("{}", render_payload(&payload));
        return Ok(());
    }

    let client = SubmissionClient::from_config(config)
        .map_err(|e| IntakeError::Config(format!("{:#}", e)))?;

    let receipt = session.submit(&client).await?;
    println!();
    print!("{}", render_receipt(&receipt));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = IntakeConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        environment = %config.environment,
        draft_dir = %config.draft_dir.display(),
        "Configuration loaded"
    );

    let store = create_draft_store(&config)
        .await
        .context("Failed to open draft storage")?;

    match cli.command {
        Commands::Sections { json } => {
            let catalog = Catalog::load(config.catalog_path.as_deref())?;
            if json {
                print_json(&catalog)?;
            } else {
                print!("{}", render_catalog(&catalog));
            }
        }
        Commands::Submit {
            identity,
            files,
            dry_run,
        } => {
            if let Err(e) = submit(&config, store.as_ref(), identity, files, dry_run).await {
                report_error(&config, &e);
                std::process::exit(1);
            }
        }
        Commands::Draft { sub } => match sub {
            DraftCommands::Save { identity, files } => {
                let session = match prepare_session(&config, store.as_ref(), identity, &files).await
                {
                    Ok(session) => session,
                    Err(e) => {
                        report_error(&config, &e);
                        std::process::exit(1);
                    }
                };
                if !save_draft(store.as_ref(), &session).await {
                    anyhow::bail!("Failed to save draft");
                }
                print!("{}", render_draft(&session.to_draft()));
            }
            DraftCommands::Show { json } => match load_draft(store.as_ref()).await {
                Some(draft) if json => print_json(&draft)?,
                Some(draft) => print!("{}", render_draft(&draft)),
                None => println!("No saved draft"),
            },
            DraftCommands::Clear => {
                store.clear().await.context("Failed to clear draft")?;
                println!("Draft cleared");
            }
        },
    }

    Ok(())
}
