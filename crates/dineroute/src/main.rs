use anyhow::Result;
use clap::{Parser, Subcommand};
use dineroute_common::{logger, AppConfig};
use dineroute_llm::OllamaClient;
use dineroute_server::SUGGESTED_PROMPTS;
use dineroute_vector::{IndexConfig, IndexManager, IndexState, RestaurantTool};
use std::path::PathBuf;
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "dineroute")]
#[command(about = "DineRoute - semantic search over Thailand restaurant data", long_about = None)]
struct Cli {
    /// Restaurant dataset file (overrides DATA_PATH)
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    /// Vector store directory (overrides PERSIST_DIR)
    #[arg(long, global = true)]
    persist_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Build the vector store (or open it if it already exists)
    Index,

    /// Search restaurants with free text
    Query {
        /// Query text
        text: String,

        /// Number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Print the suggested example queries
    Prompts,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.data_path {
            config.data_path = path.clone();
        }
        if let Some(dir) = &self.persist_dir {
            config.persist_dir = dir.clone();
        }
    }
}

fn build_index(config: &AppConfig) -> Result<Arc<IndexManager>> {
    let embedder = OllamaClient::new(&config.ollama_base_url, &config.embedding_model)?;
    Ok(Arc::new(IndexManager::new(
        IndexConfig::from(config),
        Arc::new(embedder),
    )))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;

            logger::setup_logging(&config.log_dir, &config.log_level)?;

            tracing::info!("DineRoute starting...");
            tracing::info!("  Bind: {}", config.server_bind_address());
            tracing::info!("  Dataset: {}", config.data_path.display());
            tracing::info!("  Vector store: {}", config.persist_dir.display());

            println!("Server listening on http://{}", config.server_bind_address());
            dineroute_server::start_server(config).await?;
        }
        Some(Commands::Index) => {
            logger::setup_console_logging(&config.log_level)?;

            let index = build_index(&config)?;
            let state = index.initialize().await;
            let stats = index.stats().await;
            println!(
                "Index {}: {} restaurants in {} (model: {})",
                state,
                stats.entries,
                stats.persist_dir.display(),
                stats.embedding_model
            );

            if state == IndexState::Failed {
                anyhow::bail!("restaurant index could not be built; see log output");
            }
        }
        Some(Commands::Query { text, top_k }) => {
            logger::setup_console_logging(&config.log_level)?;

            let index = build_index(&config)?;
            index.initialize().await;

            let tool = RestaurantTool::new(index, top_k.unwrap_or(config.query_top_k));
            println!("{}", tool.run(&text).await);
        }
        Some(Commands::Prompts) => {
            for (title, prompts) in [
                ("column1", SUGGESTED_PROMPTS.column1),
                ("column2", SUGGESTED_PROMPTS.column2),
            ] {
                println!("{}:", title);
                for prompt in prompts {
                    println!("  - {}", prompt);
                }
            }
        }
        None => {
            logger::setup_logging(&config.log_dir, &config.log_level)?;

            tracing::info!("DineRoute starting with default configuration...");

            println!("Server listening on http://{}", config.server_bind_address());
            dineroute_server::start_server(config).await?;
        }
    }

    Ok(())
}
