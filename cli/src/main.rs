use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use verdict_api::ApiState;
use verdict_consensus::{ProviderClient, ProviderPool};
use verdict_ledger::{ScoringPolicy, StakeLedger, WeightLedger, STAKES_FILE, WEIGHTS_FILE};

mod config;
use config::Config;

#[derive(Parser)]
#[command(name = "verdictd")]
#[command(about = "Verdict prediction consensus node", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind address, overriding the config file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "╔═══════════════════════════════════════╗".cyan());
    println!("{}", "║        VERDICT CONSENSUS NODE         ║".cyan().bold());
    println!("{}", "╚═══════════════════════════════════════╝".cyan());

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            tracing::info!("Loaded configuration from {}", path.display());
            config
        }
        None => {
            tracing::info!("No config file given, running with defaults");
            Config::default()
        }
    };

    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let addr: SocketAddr = bind.parse()?;

    let data_dir = PathBuf::from(&config.ledger.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let roster = config.providers.endpoints.clone();
    let client = ProviderClient::new(config.request_timeout());
    let providers = Arc::new(ProviderPool::new(roster.clone(), client));

    let policy = ScoringPolicy {
        agreement_threshold: config.consensus.agreement_threshold,
        slash_amount: config.consensus.slash_amount,
    };
    let stakes = Arc::new(StakeLedger::open(data_dir.join(STAKES_FILE), &roster, policy).await?);
    let weights = Arc::new(WeightLedger::open(data_dir.join(WEIGHTS_FILE), &roster).await?);

    tracing::info!("🚀 Starting Verdict node");
    tracing::info!("📊 Provider roster ({} models):", roster.len());
    for endpoint in &roster {
        tracing::info!("   • {}", endpoint);
    }
    tracing::info!(
        "⚖️  Scoring: threshold {}, slash {}",
        policy.agreement_threshold,
        policy.slash_amount
    );
    tracing::info!("💾 Stake ledger: {}", stakes.path().display());
    tracing::info!("💾 Weight ledger: {}", weights.path().display());
    tracing::info!("📋 Available endpoints:");
    tracing::info!("   GET  /consensus_predict");
    tracing::info!("   GET  /weighted_predict");
    tracing::info!("   GET  /stake_predict");
    tracing::info!("   GET  /stakes");
    tracing::info!("   GET  /health");
    tracing::info!("📡 Listening on http://{}", addr);

    let state = ApiState {
        providers,
        stakes,
        weights,
    };

    verdict_api::start_server(addr, state).await?;

    Ok(())
}
