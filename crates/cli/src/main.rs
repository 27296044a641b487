use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use report::{ContextOutput, QueryHit, SkillSummary};
use skills_engine::{EngineConfig, SkillsEngine};
use std::env;
use std::path::PathBuf;

mod report;

#[derive(Parser)]
#[command(name = "skills")]
#[command(about = "Retrieve skill documents and build bounded prompt context", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skill directory to scan (repeatable; overrides config and SKILLS_DIRS)
    #[arg(long = "dir", global = true)]
    dirs: Vec<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded skills
    List,

    /// Rank skills for a query
    Query(QueryArgs),

    /// Build the context payload for a query
    Context(ContextArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Free-text query
    query: String,

    /// Restrict candidates by tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Maximum number of results
    #[arg(long)]
    top_k: Option<usize>,
}

#[derive(Args)]
struct ContextArgs {
    #[command(flatten)]
    query: QueryArgs,

    /// Token budget for the composed context
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Model whose tokenizer measures the budget
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let engine = load_engine(&cli)?;
    let loaded = engine.reload();
    log::debug!("{} skills available", loaded.len());

    match &cli.command {
        Commands::List => run_list(&engine, cli.json)?,
        Commands::Query(args) => run_query(&engine, args, cli.json).await?,
        Commands::Context(args) => run_context(&engine, args, cli.json).await?,
    }
    Ok(())
}

fn load_engine(cli: &Cli) -> Result<SkillsEngine> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    }
    .with_env_overrides();
    if !cli.dirs.is_empty() {
        config.skill_dirs = cli.dirs.clone();
    }

    let root = env::current_dir().context("Failed to resolve working directory")?;
    SkillsEngine::from_config(config, &root).context("Failed to initialize skills engine")
}

fn run_list(engine: &SkillsEngine, json: bool) -> Result<()> {
    let skills: Vec<SkillSummary> = engine
        .list_skills()
        .iter()
        .map(|skill| SkillSummary::from(skill.as_ref()))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
    } else {
        report::print_skills(&skills);
    }
    Ok(())
}

async fn run_query(engine: &SkillsEngine, args: &QueryArgs, json: bool) -> Result<()> {
    let results = engine
        .retrieve_skills(&args.query, &args.tags, args.top_k)
        .await
        .context("Retrieval failed")?;
    let hits: Vec<QueryHit> = results.iter().map(QueryHit::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        report::print_hits(&hits);
    }
    Ok(())
}

async fn run_context(engine: &SkillsEngine, args: &ContextArgs, json: bool) -> Result<()> {
    let (context, skills) = engine
        .build_skills_context(
            &args.query.query,
            &args.query.tags,
            args.query.top_k,
            args.max_tokens,
            args.model.as_deref(),
        )
        .await
        .context("Context build failed")?;
    if json {
        let output = ContextOutput { skills, context };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if !skills.is_empty() {
            eprintln!("Skills: {}", skills.join(", "));
        }
        println!("{context}");
    }
    Ok(())
}
