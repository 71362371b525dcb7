use std::path::PathBuf;

use anyhow::Context;
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};

use quizzybee::domain::{GenerationKind, ItemCount};
use quizzybee::infrastructure::observability::{TracingConfig, init_tracing};
use quizzybee::presentation::handlers::views::SessionView;
use quizzybee::presentation::{Environment, ScaffoldConfig, Settings, build_controller};

#[derive(Parser)]
#[command(name = "quizzybee-cli")]
#[command(about = "Generate MCQs or short notes from a document without the web UI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override storage.root for uploads and results
    #[arg(long, global = true, value_name = "DIR")]
    storage_root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a document and generate study material from it
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Document to read (pdf, docx or txt)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// mcqs or short-notes
    #[arg(short, long, default_value = "mcqs")]
    kind: GenerationKind,

    /// Number of items, clamped to 1..=20
    #[arg(short, long, default_value_t = ItemCount::DEFAULT as i64)]
    count: i64,

    /// Generate again after the first result, overwriting the artifacts
    #[arg(long)]
    regenerate: bool,

    /// Print the session as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = Settings::load(environment).context("Failed to load settings")?;
    if let Some(root) = &cli.storage_root {
        settings.storage.root = root.to_string_lossy().into_owned();
    }

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        "warn".to_string()
    };
    init_tracing(&TracingConfig::new(environment.as_str(), level, false));

    match cli.command {
        Commands::Generate(args) => generate(&settings, args).await,
    }
}

async fn generate(settings: &Settings, args: GenerateArgs) -> anyhow::Result<()> {
    let controller = build_controller(settings, &ScaffoldConfig::from_env())?;

    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .context("Input path has no file name")?
        .to_string();
    let data = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let session_id = controller.create_session().await?;
    controller
        .upload(session_id, &filename, Bytes::from(data))
        .await?;

    let mut outcome = controller
        .generate(session_id, args.kind, ItemCount::clamped(args.count))
        .await?;
    if args.regenerate {
        outcome = controller.regenerate(session_id).await?;
    }

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    if args.json {
        let view = SessionView::from_session(&outcome.session);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let result = outcome
        .session
        .result
        .as_ref()
        .context("Generation finished without a result")?;

    println!("Here are the generated {}:\n", result.kind.label());
    for section in result.content.sections() {
        println!("{section}");
        println!("---");
    }

    let txt = controller.artifact_path(&result.artifacts.txt_filename);
    println!("\nText: {}", display_path(txt, &result.artifacts.txt_filename));
    if result.pdf_available {
        let pdf = controller.artifact_path(&result.artifacts.pdf_filename);
        println!("PDF:  {}", display_path(pdf, &result.artifacts.pdf_filename));
    }

    Ok(())
}

fn display_path(path: Option<PathBuf>, fallback: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| fallback.to_string())
}
