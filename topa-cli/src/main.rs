//! topa CLI: build Merkle commitments over ordered values and check membership

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use topa_cli::input::{commit, content, read_values};
use topa_cli::TopaConfig;
use topa_core::MerkleTree;
use topa_types::{Digest, Hasher, HasherRegistry, SharedHasher};
use tracing::{debug, info, warn, Level};

#[derive(Parser)]
#[command(name = "topa")]
#[command(about = "Merkle commitments over ordered values", long_about = None, version)]
struct Cli {
    /// Configuration file (TOML); defaults are used when it does not exist
    #[arg(short, long, default_value = "topa.toml")]
    config: PathBuf,

    /// Hash strategy (MD5, SHA256, BLAKE3); overrides the configuration
    #[arg(long)]
    hash: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ValueArgs {
    /// Values to commit, in order
    values: Vec<String>,

    /// Read additional values from a file, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the root digest of a set of values
    Root {
        #[command(flatten)]
        input: ValueArgs,
    },

    /// Check that a value is committed under the given root
    Verify {
        /// Expected root digest (hex)
        #[arg(long)]
        root: String,

        /// Value to look up
        value: String,

        #[command(flatten)]
        input: ValueArgs,
    },

    /// Rebuild the tree and re-verify its root
    Check {
        #[command(flatten)]
        input: ValueArgs,
    },

    /// Hash raw data with the selected strategy
    Hash {
        /// Data to hash
        data: String,
    },

    /// List available hash strategies
    Hashers,

    /// Write a default configuration file
    InitConfig {
        /// Output path (defaults to --config)
        path: Option<PathBuf>,
    },
}

fn init_logging(config: &TopaConfig, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        config.logging.level()
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if !config.logging.is_valid() {
        warn!("invalid log level: {}", config.logging.level);
    }
}

fn select_hasher(
    cli: &Cli,
    config: &TopaConfig,
    registry: &HasherRegistry,
) -> Result<SharedHasher> {
    let name = cli.hash.as_deref().unwrap_or(&config.crypto.hash);
    let hasher = registry
        .get(name)
        .with_context(|| format!("available hashers: {}", registry.names().join(", ")))?;
    debug!("using hasher {}", hasher.name());
    Ok(hasher)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TopaConfig::load(&cli.config)?;
    init_logging(&config, cli.verbose);
    if cli.config.exists() {
        info!("loaded configuration from {}", cli.config.display());
    } else {
        debug!("{} not found, using defaults", cli.config.display());
    }

    let registry = HasherRegistry::with_defaults();

    match &cli.command {
        Commands::Root { input } => {
            let hasher = select_hasher(&cli, &config, &registry)?;
            let values = read_values(&input.values, input.file.as_deref())?;
            let tree = commit(&values, &hasher)?;

            println!("Root:   {}", tree.root());
            println!("Values: {}", tree.value_count());
            println!("Leaves: {}", tree.leaf_count());
            println!("Height: {}", tree.height());
            println!("Hasher: {}", hasher.name());
        }

        Commands::Verify { root, value, input } => {
            let hasher = select_hasher(&cli, &config, &registry)?;
            let expected = Digest::from_hex(root).context("root must be hex encoded")?;
            let values = read_values(&input.values, input.file.as_deref())?;
            let tree = commit(&values, &hasher)?;

            if tree.verify_value(expected.as_bytes(), &content(value, &hasher)) {
                println!("verified");
            } else {
                println!("not verified");
                std::process::exit(1);
            }
        }

        Commands::Check { input } => {
            let hasher = select_hasher(&cli, &config, &registry)?;
            let values = read_values(&input.values, input.file.as_deref())?;
            let tree = commit(&values, &hasher)?;

            println!("Root:   {}", tree.root());
            if tree.verify_root() {
                println!("consistent");
            } else {
                println!("inconsistent");
                std::process::exit(1);
            }
        }

        Commands::Hash { data } => {
            let hasher = select_hasher(&cli, &config, &registry)?;
            println!("{}", hasher.hash(data.as_bytes())?);
        }

        Commands::Hashers => {
            for name in registry.names() {
                let marker = if name.eq_ignore_ascii_case(&config.crypto.hash) {
                    " (configured)"
                } else {
                    ""
                };
                println!("{}{}", name, marker);
            }
        }

        Commands::InitConfig { path } => {
            let path = path.as_ref().unwrap_or(&cli.config);
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            TopaConfig::default().to_file(path)?;
            println!("Default configuration saved to {}", path.display());
        }
    }

    Ok(())
}
