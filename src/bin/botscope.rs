//! botscope CLI binary.
//!
//! Bot detection dashboard for social media accounts.
//!
//! # Commands
//!
//! - `explain` - Heuristic reasoning for metrics, no classifier call
//! - `predict` - Ask the classifier for a verdict and explain it
//! - `fields` - Describe the account form fields
//! - `health` - Check that the classifier is up
//! - `train` - Ask the classifier to retrain
//! - `serve` - Start the dashboard HTTP API

use std::path::PathBuf;
use std::sync::Arc;

use botscope::{
    account,
    client::ClassifierClient,
    confidence, reasoning,
    server::{self, AppState, ServerConfig},
    AccountMetrics, Config, PredictionResult, VERSION,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "botscope")]
#[command(version = VERSION)]
#[command(about = "Bot detection dashboard - explain classifier verdicts", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/botscope/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Classifier base URL
    #[arg(long, global = true)]
    classifier_url: Option<String>,

    /// Classifier request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain metrics with the heuristic rules only
    Explain {
        #[command(flatten)]
        metrics: MetricsArgs,

        /// Explain as if the classifier said bot
        #[arg(long)]
        bot: bool,

        /// Fractional confidence (0.0 - 1.0) to label
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Classify an account and explain the verdict
    Predict {
        #[command(flatten)]
        metrics: MetricsArgs,

        /// Read metrics from a JSON file instead of flags
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the account form fields
    Fields,

    /// Check classifier health
    Health,

    /// Ask the classifier to retrain its model
    Train,

    /// Start the dashboard HTTP API
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },
}

#[derive(Args)]
struct MetricsArgs {
    /// Account identifier (username)
    #[arg(long, default_value = "")]
    id: String,

    /// Accounts following this account
    #[arg(long, default_value_t = 0)]
    followers: u64,

    /// Accounts this account follows
    #[arg(long, default_value_t = 0)]
    friends: u64,

    /// Lists that include this account
    #[arg(long, default_value_t = 0)]
    listed: u64,

    /// Posts this account has liked
    #[arg(long, default_value_t = 0)]
    favourites: u64,

    /// Posts this account has made
    #[arg(long, default_value_t = 0)]
    statuses: u64,

    /// Uses the default theme
    #[arg(long)]
    default_profile: bool,

    /// Uses the default profile picture
    #[arg(long)]
    default_profile_image: bool,

    /// Verified by the platform
    #[arg(long)]
    verified: bool,

    /// Private account
    #[arg(long)]
    protected: bool,

    /// Location services enabled
    #[arg(long)]
    geo_enabled: bool,

    /// Multiple contributors may post
    #[arg(long)]
    contributors_enabled: bool,
}

impl From<MetricsArgs> for AccountMetrics {
    fn from(args: MetricsArgs) -> Self {
        Self {
            id: args.id,
            followers_count: args.followers,
            friends_count: args.friends,
            listed_count: args.listed,
            favourites_count: args.favourites,
            statuses_count: args.statuses,
            default_profile: args.default_profile,
            default_profile_image: args.default_profile_image,
            verified: args.verified,
            protected: args.protected,
            geo_enabled: args.geo_enabled,
            contributors_enabled: args.contributors_enabled,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.classifier_url {
        config.classifier.url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.classifier.timeout_secs = timeout;
    }

    match cli.command {
        Commands::Explain {
            metrics,
            bot,
            confidence,
        } => cmd_explain(metrics.into(), bot, confidence),

        Commands::Predict {
            metrics,
            file,
            json,
        } => cmd_predict(&config, metrics, file, json),

        Commands::Fields => cmd_fields(),

        Commands::Health => cmd_health(&config),

        Commands::Train => cmd_train(&config),

        Commands::Serve {
            port,
            host,
            no_cors,
        } => {
            if let Some(port) = port {
                config.dashboard.port = port;
            }
            if let Some(host) = host {
                config.dashboard.host = host;
            }
            if no_cors {
                config.dashboard.cors = false;
            }
            cmd_serve(&config)
        },
    }
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn cmd_explain(metrics: AccountMetrics, bot: bool, fraction: Option<f64>) -> anyhow::Result<()> {
    println!("Reasoning ({}):", if bot { "bot" } else { "human" });
    for reason in reasoning::reasons(&metrics, bot) {
        println!("  - {reason}");
    }

    if let Some(fraction) = fraction {
        println!();
        println!("Confidence: {}", confidence::label_for_fraction(fraction));
    }

    Ok(())
}

fn cmd_predict(
    config: &Config,
    args: MetricsArgs,
    file: Option<PathBuf>,
    json_output: bool,
) -> anyhow::Result<()> {
    let metrics: AccountMetrics = match file {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => args.into(),
    };

    let client = ClassifierClient::new(&config.classifier)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let response = match runtime.block_on(client.predict(&metrics)) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", e.banner());
            std::process::exit(1);
        },
    };
    let result = PredictionResult::assemble(response, metrics);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &PredictionResult) {
    println!("Account:     {}", result.account_id);
    println!("Verdict:     {}", result.verdict());
    println!(
        "Confidence:  {}% ({})",
        result.confidence_percentage, result.confidence_label
    );
    println!();
    println!("Why:");
    for reason in &result.reasons {
        println!("  - {reason}");
    }
}

fn cmd_fields() -> anyhow::Result<()> {
    println!("{:<24} Description", "Field");
    println!("{}", "-".repeat(76));
    for (name, description) in account::field_help() {
        println!("{name:<24} {description}");
    }
    Ok(())
}

fn cmd_health(config: &Config) -> anyhow::Result<()> {
    let client = ClassifierClient::new(&config.classifier)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match runtime.block_on(client.health()) {
        Ok(health) => {
            println!("{}: {}", client.base_url(), health.status);
            Ok(())
        },
        Err(e) => {
            eprintln!("{}: {}", client.base_url(), e.banner());
            std::process::exit(1);
        },
    }
}

fn cmd_train(config: &Config) -> anyhow::Result<()> {
    let client = ClassifierClient::new(&config.classifier)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let outcome = runtime.block_on(client.train())?;
    if outcome.success {
        println!("{}", outcome.message);
    } else {
        eprintln!("Training did not complete: {}", outcome.message);
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_serve(config: &Config) -> anyhow::Result<()> {
    let server_config = ServerConfig::from_dashboard(&config.dashboard)?;
    let classifier = ClassifierClient::new(&config.classifier)?;

    tracing::info!("Starting botscope dashboard on {}", server_config.addr);
    tracing::info!("Classifier: {}", classifier.base_url());
    tracing::info!(
        "CORS: {}",
        if server_config.cors_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    let state = Arc::new(AppState::new(server_config, classifier));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { server::serve(state).await.map_err(|e| anyhow::anyhow!("{}", e)) })
}
