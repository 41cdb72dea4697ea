use clap::{Parser, Subcommand};

mod commands;

use commands::generate::{Artifact, GenerateOptions};
use commands::partners::Format;

#[derive(Parser)]
#[command(
    name = "meshgen",
    about = "meshgen — health check remap and parent config generator for cache fleets",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log at debug level (selection details per cache group).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the health remap or parent config for one cache.
    ///
    /// Prints the requested artifact to stdout. Settings not given as
    /// flags are read from meshgen.toml.
    Generate {
        /// Cache server to generate rules for
        #[arg(long)]
        host: String,
        /// Routing document (CDN snapshot JSON)
        #[arg(short, long, alias = "crconfig-path")]
        document: Option<String>,
        /// Which artifact to print
        #[arg(short, long, value_enum)]
        artifact: Artifact,
        /// Port of the local health service
        #[arg(long)]
        health_port: Option<u16>,
        /// Prefix rules with explanatory comments (default: true)
        #[arg(long)]
        comments: Option<bool>,
        /// Settings file (default: ./meshgen.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the distant partner chosen for every cache group
    Partners {
        #[arg(short, long, alias = "crconfig-path")]
        document: Option<String>,
        /// Output format: text or json
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Write a starter meshgen.toml
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
        #[arg(long, default_value_t = 8083)]
        health_port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "meshgen=debug" } else { "meshgen=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.parse()?)
        )
        .init();

    match cli.command {
        Commands::Generate { host, document, artifact, health_port, comments, config } => {
            commands::generate::generate(&GenerateOptions {
                host,
                document,
                artifact,
                health_port,
                comments,
                config,
            })
        }
        Commands::Partners { document, format, config } => {
            commands::partners::partners(document.as_deref(), format, config.as_deref())
        }
        Commands::Init { path, health_port } => {
            commands::init::init(&path, health_port)
        }
    }
}
