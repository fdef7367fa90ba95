//! CLI: build the knowledge graph and serve or query it.
//!
//! Usage: `tinfoil [OPTIONS] [serve | query <TEXT> | graph]`
//!
//! Set RUST_LOG=tinfoil=trace for TRACE-level span enter/exit and events.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tinfoil::config::{self, Config};
use tinfoil::narrator::OllamaNarrator;
use tinfoil::server::{AppState, serve};
use tinfoil::{GraphExport, RetrievalResult, retrieve};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Walk a knowledge graph from an everyday object to the nearest goal node.
#[derive(Parser, Debug)]
#[command(name = "tinfoil")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  TINFOIL_BIND          Listen address for `serve`.
  TINFOIL_OLLAMA_URL    Base URL of the Ollama server.
  TINFOIL_MODEL         Narrative model.
  TINFOIL_VISION_MODEL  Image description model.
  TINFOIL_SEED          Seed for synthetic facts.
  TINFOIL_FACTS         Statement file, one fact per line.
  TINFOIL_GOALS         Comma-separated goal names.
  TINFOIL_TIMEOUT_SECS  Generation request timeout.

Examples:
  tinfoil --seed 7 query "my toaster is humming"
  tinfoil --facts facts.txt --goal "The Illuminati" graph"#
)]
struct Args {
  /// Listen address for `serve`.
  #[arg(long, value_name = "ADDR", default_value = config::DEFAULT_BIND)]
  bind: String,

  /// Base URL of the Ollama server.
  #[arg(long, value_name = "URL", default_value = config::DEFAULT_OLLAMA_URL)]
  ollama_url: String,

  /// Narrative model.
  #[arg(long, value_name = "MODEL", default_value = config::DEFAULT_MODEL)]
  model: String,

  /// Image description model.
  #[arg(long, value_name = "MODEL", default_value = config::DEFAULT_VISION_MODEL)]
  vision_model: String,

  /// Seed for synthetic facts (random when omitted).
  #[arg(long)]
  seed: Option<u64>,

  /// Statement file, one fact per line. Synthetic facts are used when omitted.
  #[arg(long, value_name = "FILE")]
  facts: Option<PathBuf>,

  /// Goal node name; repeat for several. Defaults to the synthetic conspiracy list.
  #[arg(long = "goal", value_name = "NAME")]
  goals: Vec<String>,

  /// Generation request timeout in seconds.
  #[arg(long, value_name = "SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
  timeout_secs: u64,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Serve the HTTP API (default).
  Serve,
  /// Resolve a query and print the chain to the nearest goal.
  Query {
    /// Free-text query.
    text: String,
  },
  /// Print the graph as {nodes, links} JSON.
  Graph,
}

impl Args {
  fn config(&self) -> Result<Config, config::ConfigError> {
    let base = Config {
      bind: config::parse_bind(&self.bind)?,
      ollama_url: self.ollama_url.clone(),
      model: self.model.clone(),
      vision_model: self.vision_model.clone(),
      seed: self.seed,
      facts_path: self.facts.clone(),
      goals: self.goals.clone(),
      generation_timeout: std::time::Duration::from_secs(self.timeout_secs),
    };
    base.with_env()
  }
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
  eprintln!("{context}: {e}");
  process::exit(1);
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let config = args.config().unwrap_or_else(|e| fail("Configuration error", e));
  info!(config = ?config, "options (env or flags)");

  let store = config
    .load_store()
    .unwrap_or_else(|e| fail("Error loading facts", e));

  match args.command.unwrap_or(Command::Serve) {
    Command::Query { text } => match retrieve(&store, &text) {
      RetrievalResult::Found { path } => println!("{}", path.join(" -> ")),
      RetrievalResult::NotFound { reason, message } => {
        println!("{message}");
        eprintln!("reason: {reason}");
        process::exit(2);
      }
    },
    Command::Graph => {
      let export = GraphExport::from_store(&store);
      match serde_json::to_string_pretty(&export) {
        Ok(json) => println!("{json}"),
        Err(e) => fail("Error encoding graph", e),
      }
    }
    Command::Serve => {
      let narrator = OllamaNarrator::new(&config.ollama_url, config.generation_timeout)
        .unwrap_or_else(|e| fail("Error creating Ollama client", e));
      let state = AppState::new(store, Arc::new(narrator), &config);
      if let Err(e) = serve(&config, state).await {
        fail("Server error", e);
      }
    }
  }
}
