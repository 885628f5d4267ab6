use anyhow::{Context as AnyhowContext, Result};
use casequery_orchestrator::{JurisdictionSource, QueryOrchestrator};
use casequery_protocol::{fallback_jurisdictions, serialize_json_pretty, Jurisdiction, QueryState};
use casequery_suggest::{default_corpus, example_queries, SuggestionMatcher};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub mod client;
pub mod config;
pub mod controller;
pub mod render;
mod shell;

use client::HttpCaseService;
use config::AppConfig;
use controller::InputController;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "casequery")]
#[command(about = "Ask case-law questions in plain English", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the per-user casequery/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the search/report service URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive query box with live suggestions
    Shell(ShellArgs),

    /// Submit one query and print search results and insights
    Search(SearchArgs),

    /// Print phrase suggestions for a partial query (offline)
    Suggest(SuggestArgs),

    /// List jurisdictions offered by the service
    Jurisdictions(JsonArgs),

    /// Print the example questions (also offered in the shell with Ctrl-E)
    Examples(JsonArgs),
}

#[derive(Args)]
struct ShellArgs {
    /// Jurisdiction to start with
    #[arg(long)]
    jurisdiction: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    /// Natural-language question
    query: String,

    /// Jurisdiction filter
    #[arg(long)]
    jurisdiction: Option<String>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SuggestArgs {
    /// Partial query text
    input: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct JsonArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // JSON output stays machine-readable; the shell owns the terminal.
    let quiet_by_default = match &cli.command {
        Commands::Search(args) => args.json,
        Commands::Suggest(args) => args.json,
        Commands::Jurisdictions(args) | Commands::Examples(args) => args.json,
        Commands::Shell(_) => !cli.verbose,
    };
    init_logging(cli.verbose, cli.quiet || quiet_by_default);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url.take() {
        config.api_base_url = url;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Shell(args) => run_shell(args, config).await,
        Commands::Search(args) => run_search(args, config).await,
        Commands::Suggest(args) => run_suggest(args, &config),
        Commands::Jurisdictions(args) => run_jurisdictions(args, &config).await,
        Commands::Examples(args) => run_examples(&args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.filter_module("reqwest", log::LevelFilter::Warn);
    builder.filter_module("hyper", log::LevelFilter::Warn);
    builder.target(env_logger::Target::Stderr).init();
}

fn build_orchestrator(
    config: &AppConfig,
) -> Result<(Arc<HttpCaseService>, Arc<QueryOrchestrator>)> {
    let service = Arc::new(HttpCaseService::new(
        &config.api_base_url,
        config.request_timeout(),
    )?);
    let orchestrator = Arc::new(QueryOrchestrator::new(service.clone(), service.clone()));
    Ok((service, orchestrator))
}

/// The service's jurisdiction list, or the built-in one if it can't be fetched.
pub async fn load_jurisdictions(source: &dyn JurisdictionSource) -> Vec<Jurisdiction> {
    match source.list_jurisdictions().await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => {
            log::warn!("Service returned no jurisdictions; using built-in list");
            fallback_jurisdictions()
        }
        Err(err) => {
            log::warn!("Failed to fetch jurisdictions: {err}; using built-in list");
            fallback_jurisdictions()
        }
    }
}

async fn run_shell(args: ShellArgs, config: AppConfig) -> Result<()> {
    let (service, orchestrator) = build_orchestrator(&config)?;
    let jurisdictions = load_jurisdictions(service.as_ref()).await;
    let jurisdiction = args
        .jurisdiction
        .unwrap_or_else(|| config.default_jurisdiction.clone());

    let matcher = SuggestionMatcher::with_config(default_corpus().clone(), &config.suggest);
    let controller = InputController::new(orchestrator, matcher, &config.suggest, &jurisdiction);
    shell::run_shell(controller, jurisdictions).await
}

async fn run_search(args: SearchArgs, config: AppConfig) -> Result<()> {
    let (_service, orchestrator) = build_orchestrator(&config)?;
    let jurisdiction = args
        .jurisdiction
        .unwrap_or_else(|| config.default_jurisdiction.clone());

    let query = QueryState::new(args.query, jurisdiction);
    if query.is_blank() {
        anyhow::bail!("Query must not be empty");
    }
    orchestrator.submit(query).await;

    let state = orchestrator.snapshot();
    if args.json {
        print_stdout(&serialize_json_pretty(&state)?)?;
    } else {
        for line in render::render_phases(&state) {
            print_stdout(&line)?;
        }
    }

    if let Some(message) = state.search_error() {
        anyhow::bail!("Search failed: {message}");
    }
    Ok(())
}

fn run_suggest(args: SuggestArgs, config: &AppConfig) -> Result<()> {
    let matcher = SuggestionMatcher::with_config(default_corpus().clone(), &config.suggest);
    let suggestions = matcher.matches(&args.input);
    if args.json {
        print_stdout(&serialize_json_pretty(&suggestions.as_slice())?)?;
    } else {
        for phrase in suggestions.iter() {
            print_stdout(phrase)?;
        }
    }
    Ok(())
}

async fn run_jurisdictions(args: JsonArgs, config: &AppConfig) -> Result<()> {
    let service = HttpCaseService::new(&config.api_base_url, config.request_timeout())?;
    let jurisdictions = load_jurisdictions(&service).await;
    if args.json {
        print_stdout(&serialize_json_pretty(&jurisdictions)?)?;
    } else {
        for jurisdiction in &jurisdictions {
            print_stdout(&format!("{:<14} {}", jurisdiction.value, jurisdiction.label))?;
        }
    }
    Ok(())
}

fn run_examples(args: &JsonArgs) -> Result<()> {
    if args.json {
        return print_stdout(&serialize_json_pretty(&example_queries())?);
    }
    for (index, example) in example_queries().iter().enumerate() {
        print_stdout(&format!("{}. {example}", index + 1))?;
    }
    Ok(())
}
