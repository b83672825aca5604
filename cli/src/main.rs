//! Auth service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/auth-service/config.toml)
//! auth-service
//!
//! # Custom config path and port
//! auth-service --config /etc/auth-service/config.toml --port 8080
//!
//! # Validate config without starting
//! auth-service --check
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};

use auth_service::config::{AppConfig, ConfigError, RuntimeFlavor};
use auth_service::infrastructure::database::redact_url;
use auth_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Register/login HTTP backend over a relational users table.
#[derive(Parser, Debug)]
#[command(name = "auth-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "AUTH_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    init_config: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Load `path` and apply the command-line overrides.
fn load_config(cli: &Cli, path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::load(path)?;
    cli.apply_overrides(&mut config);
    Ok(config)
}

/// Write the effective configuration back to `path`.
///
/// A file that exists but does not parse is left untouched.
fn init_config_file(cli: &Cli, path: &Path) -> Result<AppConfig, ConfigError> {
    let config = load_config(cli, path)?;
    config.save(path)?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(auth_service::default_config_path);

    let (config, load_error) = match load_config(&cli, &config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cli.apply_overrides(&mut cfg);
            (cfg, Some(e))
        }
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            // Never validate or overwrite a broken file with defaults
            if cli.check || cli.init_config {
                return Err(e.into());
            }
            error!("Using default configuration.");
        }
    }

    // ── Config validation / bootstrap modes ────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Runtime     : {:?}", config.server.runtime);
        println!("   Database    : {}", redact_url(&config.database.connection_url()));
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    if cli.init_config {
        init_config_file(&cli, &config_path)?;
        println!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    // ── Runtime (chosen once, here) ────────────────────────────
    let runtime = match config.server.runtime {
        RuntimeFlavor::MultiThread => tokio::runtime::Builder::new_multi_thread(),
        RuntimeFlavor::CurrentThread => tokio::runtime::Builder::new_current_thread(),
    }
    .enable_all()
    .build()?;
    info!("Runtime: {:?}", config.server.runtime);

    runtime.block_on(run(config, !cli.no_migrate))
}

async fn run(config: AppConfig, auto_migrate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate,
        enable_metrics: true,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "auth-service-cli-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("auth-service").chain(args.iter().copied()))
    }

    #[test]
    fn init_config_keeps_a_malformed_file() {
        let path = temp_config("malformed");
        let original = "[server\nport = 9000\n";
        std::fs::write(&path, original).unwrap();

        let err = init_config_file(&cli(&["--init-config", "--port", "7000"]), &path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn init_config_merges_overrides_into_existing_file() {
        let path = temp_config("merge");
        std::fs::write(&path, "[database]\nurl = \"sqlite://./kept.db?mode=rwc\"\n").unwrap();

        init_config_file(&cli(&["--init-config", "--port", "7000"]), &path).unwrap();

        let written = AppConfig::load(&path).unwrap();
        assert_eq!(written.server.port, 7000);
        assert_eq!(written.database.url, "sqlite://./kept.db?mode=rwc");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn init_config_creates_missing_file() {
        let path = temp_config("missing");
        std::fs::remove_file(&path).ok();

        let written = init_config_file(&cli(&["--init-config", "-l", "debug"]), &path).unwrap();
        assert_eq!(written.logging.level, "debug");
        assert!(path.exists());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
