use clap::Parser;
use skillgraph::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Converts an exported chatbot design project into an importable skill document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the exported project JSON file
    project_path: PathBuf,

    /// Directory the skill document is written to
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Render for this platform instead of the project's configured one
    #[arg(short, long)]
    platform: Option<String>,

    /// Language code of the generated skill
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Description of the generated skill
    #[arg(short, long, default_value = "")]
    description: String,

    /// Use sequential instead of random node ids so repeated runs match
    #[arg(long)]
    deterministic_ids: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    run(cli);
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let project = ProjectData::from_file(&cli.project_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load project '{}': {}",
            cli.project_path.display(),
            e
        ))
    });
    info!(
        intents = project.intents.len(),
        entities = project.entities.len(),
        messages = project.board.messages.len(),
        "project loaded"
    );

    // --- 2. Conversion ---
    let mut options = ExportOptions::default()
        .with_language(cli.language)
        .with_description(cli.description)
        .with_deterministic_ids(cli.deterministic_ids);
    if let Some(platform) = cli.platform {
        options = options.with_platform(platform);
    }

    let convert_start = Instant::now();
    let conversion = skillgraph::convert(&project, &options)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    let convert_duration = convert_start.elapsed();
    info!(
        dialog_nodes = conversion.document.dialog_nodes.len(),
        warnings = conversion.warnings.len(),
        "conversion finished in {:?}",
        convert_duration
    );

    // --- 3. Writing ---
    let saved = conversion
        .document
        .save(&cli.output_dir)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write skill document: {}", e)));

    println!(
        "done. \nwrote {}kB to {}.",
        saved.bytes as f64 / 1000.0,
        saved.path.display()
    );
    info!("total execution {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
