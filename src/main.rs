use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sequent_config::{Declaration, from_json_str};
use sequent_executor::{ExecutorConfig, MissingActionPolicy, SequentialExecutor};
use sequent_graph::{DuplicatePolicy, GraphBuilder};
use sequent_host_http::{HttpConfig, HttpPerformer, HttpPolicy};
use sequent_resolver::{Resolver, ResolverConfig};

/// Sequent - resolve component dependencies and call each one in order
#[derive(Parser)]
#[command(name = "sequent")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log at debug level (RUST_LOG takes precedence)
  #[arg(long, short, global = true)]
  verbose: bool,

  /// Fail on duplicate component names instead of keeping the last one
  #[arg(long, global = true)]
  reject_duplicates: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the dependency graph built from a declarations file
  Graph {
    /// Path to the declarations file (JSON), or `-` for stdin
    declarations: PathBuf,
  },

  /// Print the execution order for a declarations file
  Resolve {
    /// Path to the declarations file (JSON), or `-` for stdin
    declarations: PathBuf,
  },

  /// Resolve a declarations file and perform every action in order
  Run {
    /// Path to the declarations file (JSON), or `-` for stdin
    declarations: PathBuf,

    #[command(flatten)]
    options: RunOptions,
  },
}

#[derive(Args)]
struct RunOptions {
  /// Fail before calling anything if a component has no action
  #[arg(long)]
  require_actions: bool,

  /// Treat 4xx/5xx responses as failures
  #[arg(long)]
  fail_on_status: bool,

  /// Timeout for actions that do not set their own, in milliseconds
  #[arg(long)]
  timeout_ms: Option<u64>,

  /// Only allow requests to this host (repeatable)
  #[arg(long = "allow-host")]
  allowed_hosts: Vec<String>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let duplicates = if cli.reject_duplicates {
    DuplicatePolicy::Reject
  } else {
    DuplicatePolicy::Overwrite
  };

  match cli.command {
    Some(Commands::Graph { declarations }) => print_graph(declarations, duplicates)?,
    Some(Commands::Resolve { declarations }) => print_order(declarations, duplicates)?,
    Some(Commands::Run {
      declarations,
      options,
    }) => run(declarations, duplicates, options)?,
    None => {
      println!("sequent - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .init();
}

fn print_graph(path: PathBuf, duplicates: DuplicatePolicy) -> Result<()> {
  let declarations = load_declarations(&path)?;
  let graph = GraphBuilder::new()
    .with_duplicates(duplicates)
    .build(declarations)
    .context("failed to build dependency graph")?;

  println!("{}", serde_json::to_string_pretty(&graph)?);
  Ok(())
}

fn print_order(path: PathBuf, duplicates: DuplicatePolicy) -> Result<()> {
  let declarations = load_declarations(&path)?;
  let order = Resolver::new(ResolverConfig { duplicates })
    .resolve(declarations)
    .context("failed to resolve dependencies")?;

  println!("{}", serde_json::to_string_pretty(&order)?);
  Ok(())
}

fn run(path: PathBuf, duplicates: DuplicatePolicy, options: RunOptions) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_async(path, duplicates, options).await })
}

async fn run_async(path: PathBuf, duplicates: DuplicatePolicy, options: RunOptions) -> Result<()> {
  let declarations = load_declarations(&path)?;
  eprintln!("Loaded {} declarations", declarations.len());

  let order = Resolver::new(ResolverConfig { duplicates })
    .resolve(declarations)
    .context("failed to resolve dependencies")?;

  let performer = HttpPerformer::new(HttpConfig {
    default_timeout_ms: options.timeout_ms,
    error_for_status: options.fail_on_status,
    policy: HttpPolicy::allow_hosts(options.allowed_hosts),
  })
  .context("failed to create http client")?;

  let missing_action = if options.require_actions {
    MissingActionPolicy::Reject
  } else {
    MissingActionPolicy::Skip
  };
  let executor = SequentialExecutor::new(ExecutorConfig { missing_action });

  let report = executor
    .run(&order, &performer)
    .await
    .context("execution failed")?;

  eprintln!("Run completed: {}", report.run_id);
  eprintln!("Actions performed: {}", report.performed.len());

  let output = serde_json::json!({
    "run_id": report.run_id,
    "performed": report.performed,
    "skipped": report.skipped,
  });
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

fn load_declarations(path: &Path) -> Result<Vec<Declaration>> {
  let content = if path.as_os_str() == "-" {
    let mut input = String::new();
    io::stdin()
      .read_to_string(&mut input)
      .context("failed to read declarations from stdin")?;
    input
  } else {
    std::fs::read_to_string(path)
      .with_context(|| format!("failed to read declarations file: {}", path.display()))?
  };

  from_json_str(&content)
    .with_context(|| format!("invalid declarations in {}", path.display()))
}
