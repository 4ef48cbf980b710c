//! Developer CLI for AccountKit.
//!
//! Derives the account family for a session from the command line, either
//! from a projects JSON file or by fetching the project list live from the
//! developer dashboard.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use accountkit_core::{
    dashboard::{DashboardClient, Environment},
    reconcile, PrimaryLogin, ProjectRecord, SecretScalar, SessionSecrets,
};

#[derive(Parser)]
#[command(name = "accountkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive the full account family and print the reconciliation result.
    Derive {
        /// Master secret as hex.
        #[arg(long, env = "ACCOUNTKIT_SECRET", hide_env_values = true)]
        secret: String,
        /// Derivation root for project subkeys as hex. Omit for
        /// primary-only logins.
        #[arg(long, env = "ACCOUNTKIT_DERIVATION_ROOT", hide_env_values = true)]
        derivation_root: Option<String>,
        /// Login method, e.g. "google".
        #[arg(long, default_value = "google")]
        login_type: String,
        /// Email address or name shown in the main account label.
        #[arg(long, default_value = "")]
        display_hint: String,
        /// Origin URL of the active application context.
        #[arg(long, default_value = "")]
        origin: String,
        /// Path to a JSON file holding the project record list.
        #[arg(long)]
        projects_file: Option<PathBuf>,
    },
    /// Fetch the user's registered projects from the developer dashboard.
    FetchProjects {
        /// Auth key as hex, used to sign the dashboard request.
        #[arg(long, env = "ACCOUNTKIT_AUTH_KEY", hide_env_values = true)]
        auth_key: String,
        /// Dashboard environment: "staging" or "production".
        #[arg(long, default_value = "production")]
        environment: String,
        /// Override the dashboard base URL, e.g. for a local instance.
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Derive {
            secret,
            derivation_root,
            login_type,
            display_hint,
            origin,
            projects_file,
        } => {
            derive(
                &secret,
                derivation_root.as_deref(),
                login_type,
                display_hint,
                &origin,
                projects_file,
            )
        }
        Command::FetchProjects {
            auth_key,
            environment,
            base_url,
        } => fetch_projects(&auth_key, &environment, base_url).await,
    }
}

fn derive(
    secret: &str,
    derivation_root: Option<&str>,
    login_type: String,
    display_hint: String,
    origin: &str,
    projects_file: Option<PathBuf>,
) -> Result<()> {
    let secrets = SessionSecrets {
        master: SecretScalar::from_hex(secret)?,
        derivation_root: derivation_root
            .map(SecretScalar::from_hex)
            .transpose()?,
    };
    let primary = PrimaryLogin {
        login_type,
        display_hint,
    };

    let projects: Vec<ProjectRecord> = match projects_file {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&contents)
                .wrap_err_with(|| format!("parsing {}", path.display()))?
        }
        None => Vec::new(),
    };

    let result = reconcile(&secrets, &primary, origin, &projects)?;
    tracing::info!(
        accounts = result.accounts.len(),
        matched_index = result.matched_index,
        "reconciliation complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn fetch_projects(
    auth_key: &str,
    environment: &str,
    base_url: Option<String>,
) -> Result<()> {
    let client = match base_url {
        Some(url) => DashboardClient::with_base_url(url),
        None => DashboardClient::new(&Environment::from_str(environment)?),
    };
    let auth_key = SecretScalar::from_hex(auth_key)?;
    let projects = client.user_projects(&auth_key).await?;
    println!("{}", serde_json::to_string_pretty(&projects)?);
    Ok(())
}
