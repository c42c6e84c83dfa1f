//! Warden - TLS resolution for service endpoints
//!
//! This is the main entry point for the Warden CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden_core::config::{ConfigLoader, LogFormat, LoggingConfig, TlsSearchConfig, WardenConfig};
use warden_tls::{EndpointTls, TlsManager};

/// Warden - find and check the TLS certificates of service endpoints
#[derive(Parser)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the TLS settings for a single bind address
    Resolve {
        /// Address the endpoint binds to (host:port)
        #[arg(long)]
        bind: String,

        /// Accept plaintext even on a non-local address
        #[arg(long)]
        plaintext: bool,

        /// Certificate directory to search (repeatable, in priority order)
        #[arg(long = "tls-dir")]
        tls_dirs: Vec<PathBuf>,
    },

    /// Resolve every listener of a configuration file
    Check {
        /// Path to the configuration file (.toml or .json)
        #[arg(default_value = "warden.toml")]
        config: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file (.toml or .json)
        #[arg(default_value = "warden.toml")]
        config: PathBuf,
    },

    /// Print the certificate directories that would be searched
    Dirs {
        /// Optional configuration file whose [tls] section applies
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            bind,
            plaintext,
            tls_dirs,
        } => {
            init_logging(cli.verbose, &LoggingConfig::default());

            let dirs = if tls_dirs.is_empty() {
                TlsSearchConfig::default().resolve_dirs()
            } else {
                tls_dirs
            };
            let endpoint = TlsManager::new(dirs).resolve_endpoint(&bind, plaintext)?;
            print_endpoint(&bind, &endpoint);
        }

        Commands::Check { config: config_path } => {
            let config = load_config(&config_path)?;
            init_logging(cli.verbose, &config.logging);
            tracing::info!("Checking config: {}", config_path.display());

            config.validate()?;
            let endpoints = config
                .resolve_listeners()
                .with_context(|| format!("❌ Failed to resolve listeners of {}", config_path.display()))?;
            for (listener, endpoint) in config.listeners.iter().zip(&endpoints) {
                print_endpoint(listener.display_name(), endpoint);
            }
            println!("✅ All {} listener(s) resolved", config.listeners.len());
        }

        Commands::Validate { config: config_path } => {
            let config = load_config(&config_path)?;
            init_logging(cli.verbose, &config.logging);
            tracing::info!("Validating config: {}", config_path.display());

            config.validate()?;
            println!("✅ Configuration '{}' is valid!", config_path.display());
        }

        Commands::Dirs { config } => {
            let search = match config {
                Some(path) => load_config(&path)?.tls,
                None => TlsSearchConfig::default(),
            };
            init_logging(cli.verbose, &LoggingConfig::default());

            for dir in search.resolve_dirs() {
                println!("{}", dir.display());
            }
        }

        Commands::Version => {
            println!("Warden v{}", warden_core::VERSION);
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<WardenConfig> {
    ConfigLoader::load(path).with_context(|| format!("❌ Failed to load {}", path.display()))
}

fn init_logging(verbose: bool, logging: &LoggingConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_endpoint(label: &str, endpoint: &EndpointTls) {
    let Some(settings) = &endpoint.settings else {
        println!("🔓 {}: plaintext allowed ({})", label, endpoint.bind);
        return;
    };

    println!(
        "🔐 {}: TLS required ({}), certificate from {}",
        label,
        endpoint.bind,
        settings.source_dir().display()
    );
    if let Some(summary) = settings.leaf_summary() {
        println!("   subject:   {}", summary.subject);
        println!("   issuer:    {}", summary.issuer);
        if !summary.dns_names.is_empty() {
            println!("   names:     {}", summary.dns_names.join(", "));
        }
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let days = summary.seconds_until_expiry(now) / 86_400;
        if days < 0 {
            println!("   expires:   ⚠️ expired {} day(s) ago", -days);
        } else {
            println!("   expires:   in {} day(s)", days);
        }
    }
    println!(
        "   custom CA: {}",
        if settings.has_custom_roots() { "yes" } else { "no" }
    );
}
