use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sememe::config::DEFAULT_LANGUAGE;
use sememe::extract::{run_extraction, ExtractConfig};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "sememe")]
#[command(about = "Extract sense-aligned semantic relations from Wiktionary dumps")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract relations from Wiktionary dumps into JSON lines
    Extract(ExtractArgs),
    /// Print the relations of a single wiki-text block as JSON
    Relations(RelationsArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Wiktionary dump files (.xml or .xml.bz2); each is processed by its own worker
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<String>,

    /// Output directory for generated files
    #[arg(short, long)]
    output: String,

    /// Wiktionary edition of the dumps
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Limit number of pages read from each dump (for testing)
    #[arg(long)]
    limit: Option<u64>,

    /// Dry run - don't write output files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct RelationsArgs {
    /// File holding the wiki-text of one part of speech (stdin if omitted)
    file: Option<String>,

    /// Wiktionary edition the text comes from
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    lang: String,
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let config = ExtractConfig {
        inputs: args.input,
        output_dir: args.output,
        language: args.lang,
        limit: args.limit,
        dry_run: args.dry_run,
    };

    let start = Instant::now();
    let stats = run_extraction(&config)?;
    let duration = start.elapsed();
    info!(duration_secs = duration.as_secs_f64(), "Extraction complete");

    println!();
    println!("=== Summary ===");
    println!("Extraction time:        {:.2}s", duration.as_secs_f64());
    println!();
    println!("Pages read:             {}", stats.pages());
    println!("Pages skipped:          {}", stats.skipped());
    println!("Entries processed:      {}", stats.entries());
    println!("Entries with relations: {}", stats.entries_with_relations());
    println!("Relation lists:         {}", stats.relation_lists());
    println!("Senses with relations:  {}", stats.relation_senses());
    println!("Placeholder senses:     {}", stats.placeholders());
    println!("Phrases:                {}", stats.phrases());

    Ok(())
}

fn run_relations(args: RelationsArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read wiki-text file: {}", path))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read wiki-text from stdin")?;
            text
        }
    };

    let relations = sememe::parse_relations(&args.lang, &text)?;
    println!("{}", serde_json::to_string_pretty(&relations)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let result = match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Relations(args) => run_relations(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
