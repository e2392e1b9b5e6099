use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vectrag::{config::ServerConfig, server};

#[derive(Parser)]
#[command(name = "vectrag")]
#[command(about = "Define and edit content models stored as YAML files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the model API server
    Serve(ServeArgs),
}

#[derive(Args, Default)]
struct ServeArgs {
    /// First port to try; the next two are used if it is taken
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Directory holding one YAML file per model
    #[arg(short, long)]
    models_dir: Option<PathBuf>,

    /// Answer OPTIONS and add permissive CORS headers
    #[arg(long)]
    cors: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the environment configuration.
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(dir) = self.models_dir {
            config.models_dir = dir;
        }
        if self.cors {
            config.enable_cors = true;
        }
        config
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "vectrag=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };

    server::serve(args.into_config()).await
}
