use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relgraph_core::{Config, Diagnostic, FlowDocument, SchemaTables, Severity};
use relgraph_engine::{generate_markdown, GraphBuilder, RunSummary};
use relgraph_loader::{CsvSource, JsonSource, SchemaSource};

/// relgraph - Entity relationship graphs for React Flow
#[derive(Parser)]
#[command(name = "relgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: relgraph.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Input table locations; override `[input]` from the config file
#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// CSV file with the Entities table
    #[arg(long, requires = "attributes", conflicts_with = "json")]
    entities: Option<PathBuf>,

    /// CSV file with the Attributes table
    #[arg(long, requires = "entities", conflicts_with = "json")]
    attributes: Option<PathBuf>,

    /// JSON document with both tables
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
struct BuildArgs {
    /// Focal entity (default: focal_entity from config, or Account)
    #[arg(short, long)]
    focal: Option<String>,

    #[command(flatten)]
    input: InputArgs,

    /// Output file for the React Flow JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a markdown summary
    #[arg(short, long)]
    markdown: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the relationship graph of the focal entity
    Build(BuildArgs),

    /// List entities with their attribute and relationship counts
    Entities {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build(args) => build_command(&config, args, cli.verbose),
        Commands::Entities { input } => entities_command(&config, &input),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load config from an explicit path, ./relgraph.toml, or defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(config_path) = path {
        return Config::from_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()));
    }

    let default_path = Path::new("relgraph.toml");
    if default_path.exists() {
        return Config::from_file(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()));
    }

    tracing::debug!("No config file found, using defaults");
    Ok(Config::default())
}

/// Pick the schema source: CLI flags first, then the config file
fn schema_source(input: &InputArgs, config: &Config) -> Result<Box<dyn SchemaSource>> {
    if let Some(json) = &input.json {
        return Ok(Box::new(JsonSource::from_file(json)));
    }
    if let (Some(entities), Some(attributes)) = (&input.entities, &input.attributes) {
        return Ok(Box::new(CsvSource::new(entities, attributes)));
    }

    let configured = &config.input;
    if let Some(json) = &configured.json {
        return Ok(Box::new(JsonSource::from_file(config.resolve_path(json))));
    }
    match (&configured.entities, &configured.attributes) {
        (Some(entities), Some(attributes)) => Ok(Box::new(CsvSource::new(
            config.resolve_path(entities),
            config.resolve_path(attributes),
        ))),
        (None, None) => Err(anyhow::anyhow!(
            "No input tables configured. Pass --entities and --attributes (or --json), \
             or add an [input] section to relgraph.toml."
        )),
        _ => Err(anyhow::anyhow!(
            "Both [input] entities and attributes must be set in the config file"
        )),
    }
}

fn load_tables(input: &InputArgs, config: &Config) -> Result<SchemaTables> {
    let source = schema_source(input, config)?;
    source
        .load(&config.columns)
        .with_context(|| format!("Failed to load schema tables from {} source", source.name()))
}

/// Outcome of a successful build run
#[derive(Debug)]
struct BuildRun {
    summary: RunSummary,
    diagnostics: Vec<Diagnostic>,
    output: PathBuf,
}

/// Load, build and write; nothing is written if loading fails
fn run_build(config: &Config, args: &BuildArgs) -> Result<BuildRun> {
    let focal = args
        .focal
        .as_deref()
        .unwrap_or(&config.focal_entity)
        .trim()
        .to_string();
    if focal.is_empty() {
        return Err(anyhow::anyhow!("Focal entity must not be empty"));
    }

    let tables = load_tables(&args.input, config)?;

    let build = GraphBuilder::new(&tables)
        .with_layout(config.layout)
        .build(&focal);

    let mut diagnostics = tables.diagnostics.clone();
    diagnostics.extend(build.diagnostics.iter().cloned());

    let summary = RunSummary::new(&build.graph, &diagnostics);
    let document = FlowDocument::from_graph(&build.graph, &config.style);
    let markdown = args
        .markdown
        .as_ref()
        .map(|path| (path, generate_markdown(&build.graph, &summary, &diagnostics)));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.resolve_path(&config.output));
    document.save_to_file(&output)?;
    tracing::info!(path = %output.display(), "Wrote graph document");

    if let Some((md_path, markdown)) = markdown {
        // A failed run leaves no graph document behind
        if let Err(e) = std::fs::write(md_path, markdown) {
            if let Err(remove_err) = std::fs::remove_file(&output) {
                tracing::warn!(path = %output.display(), error = %remove_err, "Failed to remove graph document");
            }
            return Err(e).with_context(|| format!("Failed to write {}", md_path.display()));
        }
        tracing::info!(path = %md_path.display(), "Wrote markdown summary");
    }

    Ok(BuildRun {
        summary,
        diagnostics,
        output,
    })
}

/// Build command - write the focal entity's graph
fn build_command(config: &Config, args: BuildArgs, verbose: bool) -> Result<()> {
    let run = run_build(config, &args)?;

    if verbose {
        print_build_details(&run);
    }

    println!("{}", run.summary.message());

    Ok(())
}

fn print_build_details(run: &BuildRun) {
    let summary = &run.summary;

    eprintln!("{} {}", "Focal entity:".cyan(), summary.focal_entity);
    eprintln!(
        "{} {} outgoing, {} incoming",
        "Edges:".cyan(),
        summary.outgoing_edges,
        summary.incoming_edges
    );

    if summary.warnings > 0 {
        eprintln!("{} {}", "Warnings:".cyan(), summary.warnings.to_string().yellow());
    }

    for diag in &run.diagnostics {
        let severity = match diag.severity {
            Severity::Warn => "WARN".yellow().bold(),
            Severity::Info => "INFO".cyan(),
        };
        eprintln!("  [{}] {}", severity, diag);
    }

    eprintln!("{} {}", "Graph saved to:".green(), run.output.display());
}

/// Entities command - list entities to choose a focal entity from
fn entities_command(config: &Config, input: &InputArgs) -> Result<()> {
    let tables = load_tables(input, config)?;
    let names = tables.entity_names();

    println!("{}", format!("{} entities", names.len()).bold());
    for name in names {
        let attributes = tables.attributes_of(name).count();
        let relationships = tables
            .attributes_of(name)
            .filter(|a| a.is_relationship())
            .count();

        println!(
            "  {} {:>5} attributes {:>5} relationships",
            format!("{:<40}", name).green(),
            attributes,
            relationships
        );
    }

    Ok(())
}
