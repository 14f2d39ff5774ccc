//! intake-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered under
//! `INTAKE_*` environment variables, opens the SQLite store, and serves the
//! lead API over HTTP.
//!
//! # API token generation
//!
//! To generate the argon2 PHC string for `api_token_hash`:
//!
//! ```
//! cargo run -p intake-server -- --hash-token
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use intake_core::{notify::Notifier, service::LeadService};
use intake_mail::{LogNotifier, SmtpNotifier};
use intake_server::{ServerConfig, load_config};
use intake_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Lead intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for an API token entered on stdin and exit.
  #[arg(long)]
  hash_token: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a token and exit.
  if cli.hash_token {
    let token = read_stdin_line()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(token.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let server_cfg = load_config(&cli.config).context("failed to read configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match &server_cfg.mail {
    Some(mail) => {
      let notifier =
        SmtpNotifier::from_config(mail).context("failed to configure SMTP transport")?;
      tracing::info!(host = %mail.smtp_host, port = mail.smtp_port, "SMTP notifications enabled");
      serve(server_cfg.clone(), store, notifier).await
    }
    None => {
      tracing::warn!("no [mail] section configured; notifications are only logged");
      serve(server_cfg.clone(), store, LogNotifier).await
    }
  }
}

async fn serve<N>(cfg: ServerConfig, store: SqliteStore, notifier: N) -> anyhow::Result<()>
where
  N: Notifier + 'static,
{
  let auth = cfg.auth();
  if auth.is_none() {
    tracing::warn!("api_token_hash not set; /leads is unauthenticated");
  }

  let service = LeadService::new(Arc::new(store), Arc::new(notifier), cfg.notify_policy);
  tracing::info!(policy = ?service.policy(), "lead service ready");

  let app = intake_server::router(Arc::new(service), auth);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a single line from stdin.
fn read_stdin_line() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Token: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
