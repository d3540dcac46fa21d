//! Clinic console
//!
//! Renders the medication expiry overview from a saved inventory-view payload
//! and evaluates session gate decisions for given session values.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use clinic_auth::{InMemorySessionStore, ROLE_KEY, SessionGate, SessionStore, TOKEN_KEY};
use clinic_console::{ConsoleConfig, JsonFileSource, MedicationSource, OverviewReport};
use clinic_inventory::{ExpiryPolicy, summarize};
use clinic_observability::LogFormat;

#[derive(Parser)]
#[command(name = "clinic-console")]
#[command(about = "Medication expiry overview and session gate checks")]
#[command(version)]
struct Cli {
    /// Log output format (json or pretty); overrides CLINIC_LOG_FORMAT
    #[arg(long)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stock totals and expiry warnings per medication
    Overview {
        /// Saved JSON response of the inventory view endpoint
        #[arg(long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Days ahead that count as "expiring soon"; overrides CLINIC_EXPIRY_WARNING_DAYS
        #[arg(long)]
        warning_days: Option<u32>,

        /// Print overviews as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the route gate for a session
    Gate {
        /// Persisted session token
        #[arg(long)]
        token: Option<String>,

        /// Persisted session role
        #[arg(long)]
        role: Option<String>,

        /// Role the view requires
        #[arg(long)]
        require: Option<String>,

        /// Gate a public-only view (login/register) instead of a protected one
        #[arg(long)]
        public: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::from_env();

    let log_format = match cli.log_format.as_deref() {
        Some(raw) => LogFormat::parse(raw).with_context(|| format!("unknown log format '{raw}'"))?,
        None => config.log_format,
    };
    clinic_observability::init(log_format);

    match cli.command {
        Commands::Overview {
            input,
            today,
            warning_days,
            json,
        } => {
            let reference = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let policy = warning_days.map_or_else(|| config.expiry_policy(), ExpiryPolicy::new);
            run_overview(input, reference, policy, json)
        }
        Commands::Gate {
            token,
            role,
            require,
            public,
        } => run_gate(&config, token, role, require, public),
    }
}

fn run_overview(input: PathBuf, reference: NaiveDate, policy: ExpiryPolicy, json: bool) -> anyhow::Result<()> {
    let source = JsonFileSource::new(input);
    let meds = source
        .fetch()
        .with_context(|| format!("loading medications from {}", source.path().display()))?;

    let overviews = summarize(&meds, reference, &policy);
    tracing::info!(count = overviews.len(), %reference, "built medication overview");

    if json {
        let out = serde_json::to_string_pretty(&overviews).context("serializing overview")?;
        println!("{out}");
    } else {
        print!("{}", OverviewReport::new(reference, policy, &overviews));
    }
    Ok(())
}

fn run_gate(
    config: &ConsoleConfig,
    token: Option<String>,
    role: Option<String>,
    require: Option<String>,
    public: bool,
) -> anyhow::Result<()> {
    let store = InMemorySessionStore::new();
    if let Some(token) = token {
        store.set(TOKEN_KEY, &token);
    }
    if let Some(role) = role {
        store.set(ROLE_KEY, &role);
    }

    let gate = SessionGate::with_config(store, config.gate_config());
    let access = if public {
        gate.authorize_public()
    } else {
        gate.authorize(require.as_deref())
    };

    let out = serde_json::to_string(&access).context("serializing gate decision")?;
    println!("{out}");
    Ok(())
}
