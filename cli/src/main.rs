//! soulbound: register students against a wallet and verify them by face.

mod config;
mod images;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use soulbound_facematch::{FaceMatchClient, FallbackMode};
use soulbound_store_lmdb::{check_integrity, LmdbEnvironment, LmdbStore};
use soulbound_types::{SystemClock, WalletAddress};
use soulbound_utils::{init_logging, LogFormat};
use soulbound_verification::{
    credential_file_name, export_credential, CrossCheckReport, CrossCheckResult, Landing,
    RegistrationForm, VerificationWorkflow,
};
use soulbound_wallet_core::{SessionManager, SessionSource, StaticConnector};

use crate::config::CliConfig;
use crate::images::{load_photo, FileCamera};

type Workflow = VerificationWorkflow<LmdbStore, FaceMatchClient, SystemClock>;
type Sessions = SessionManager<StaticConnector, LmdbStore>;

#[derive(Parser)]
#[command(name = "soulbound", about = "Student registration and face verification")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "SOULBOUND_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the local record store.
    #[arg(long, env = "SOULBOUND_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Wallet address to act as. Defaults to the restored session.
    #[arg(long, env = "SOULBOUND_WALLET")]
    wallet: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SOULBOUND_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SOULBOUND_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Face++ API base URL.
    #[arg(long, env = "SOULBOUND_FACEPP_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "SOULBOUND_FACEPP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "SOULBOUND_FACEPP_API_SECRET", hide_env_values = true)]
    api_secret: Option<String>,

    /// "strict" or "mock-on-failure".
    #[arg(long, env = "SOULBOUND_FALLBACK")]
    fallback: Option<FallbackMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Connect the wallet given by --wallet and cache it as the session.
    Connect,
    /// Restore the previous wallet session.
    Restore,
    /// Disconnect and forget the cached session.
    Disconnect,
    /// Show the session wallet and its registration state.
    Status,
    /// Register a student for the session wallet.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        college: String,
        #[arg(long)]
        department: String,
        /// Reference face photo.
        #[arg(long)]
        photo: PathBuf,
        /// Student ID card photo.
        #[arg(long)]
        id_photo: PathBuf,
    },
    /// Verify the session wallet's student against a selfie image.
    Verify {
        /// Image file used as the live capture.
        #[arg(long)]
        selfie: PathBuf,
    },
    /// Compare reference photos with ID photos. Nothing is modified.
    CrossCheck {
        /// Check every record instead of the session wallet's.
        #[arg(long)]
        all: bool,
    },
    /// List all registered students.
    List,
    /// Write the session wallet's record as a credential file.
    Export {
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete every student record.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(url) = &cli.api_url {
        config.facematch.api_url = url.clone();
    }
    if let Some(key) = &cli.api_key {
        config.facematch.api_key = Some(key.clone());
    }
    if let Some(secret) = &cli.api_secret {
        config.facematch.api_secret = Some(secret.clone());
    }
    if let Some(fallback) = cli.fallback {
        config.facematch.fallback = fallback;
    }
    Ok(config)
}

fn open_store(config: &CliConfig) -> anyhow::Result<LmdbStore> {
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
        .with_context(|| format!("failed to open store at {}", config.data_dir.display()))?;
    let store = env.store();

    let report = check_integrity(&store)?;
    if report.is_healthy() {
        tracing::debug!(records = report.records_checked, "store integrity check passed");
    } else {
        for error in &report.errors {
            tracing::warn!(%error, "store integrity problem");
        }
    }
    Ok(store)
}

/// The wallet to act as: `--wallet`, else the restored session.
async fn session_wallet(cli: &Cli, sessions: &Sessions) -> anyhow::Result<WalletAddress> {
    if let Some(wallet) = &cli.wallet {
        return Ok(WalletAddress::parse(wallet)?);
    }
    match sessions.restore().await? {
        Some(restored) => Ok(restored.address),
        None => bail!("no wallet connected; run `soulbound connect --wallet <ADDRESS>`"),
    }
}

fn print_report(report: &CrossCheckReport) {
    let summary = match &report.result {
        CrossCheckResult::Compared {
            confidence,
            matched,
            mock,
        } => format!(
            "{} ({confidence}{})",
            if *matched { "match" } else { "no match" },
            if *mock { ", mock" } else { "" }
        ),
        CrossCheckResult::NoFace { image } => format!("no face detected in {image}"),
        CrossCheckResult::Error { message } => format!("error: {message}"),
    };
    println!("{}  {}  {summary}", report.wallet_address.short(), report.name);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);

    let store = open_store(&config)?;
    let accounts = cli
        .wallet
        .as_deref()
        .map(WalletAddress::parse)
        .transpose()?
        .into_iter()
        .collect();
    let sessions: Sessions = SessionManager::new(
        StaticConnector::new(accounts),
        store.clone(),
        config.reconnect_policy,
    );

    let matcher = FaceMatchClient::from_config(&config.facematch)?;
    if matcher.is_mock_mode() {
        tracing::warn!("face API credentials not configured, running in mock mode");
    }
    let workflow: Workflow = VerificationWorkflow::new(store, matcher, SystemClock)
        .with_duplicate_policy(config.duplicate_policy);

    match &cli.command {
        Command::Connect => {
            if cli.wallet.is_none() {
                bail!("connect requires --wallet <ADDRESS>");
            }
            let address = sessions.connect().await?;
            match workflow.landing(&address)? {
                Landing::Registered(record) => {
                    println!("Connected {address}: registered as {}", record.name)
                }
                Landing::Unregistered(_) => {
                    println!("Connected {address}: not registered, run `soulbound register`")
                }
            }
        }
        Command::Restore => match sessions.restore().await? {
            Some(restored) => {
                let source = match restored.source {
                    SessionSource::Live => "live",
                    SessionSource::Cached => "cached",
                };
                println!("Session restored ({source}): {}", restored.address);
            }
            None => println!("No session to restore"),
        },
        Command::Disconnect => {
            sessions.disconnect().await?;
            println!("Disconnected");
        }
        Command::Status => {
            let address = session_wallet(&cli, &sessions).await?;
            println!("Wallet: {address}");
            match workflow.lookup(&address)? {
                Some(record) => {
                    println!("Name: {}", record.name);
                    println!("College: {}", record.college);
                    println!("Department: {}", record.department);
                    println!("Status: {}", record.verification_status.as_str());
                    if let Some(confidence) = record.verification_confidence {
                        println!("Confidence: {confidence}");
                    }
                    if let Some(date) = record.verification_date {
                        println!("Verified at: {date}");
                    }
                    if record.mock_verification == Some(true) {
                        println!("Mock verification: yes");
                    }
                }
                None => println!("Status: {}", workflow.phase(&address)?),
            }
        }
        Command::Register {
            name,
            college,
            department,
            photo,
            id_photo,
        } => {
            let address = session_wallet(&cli, &sessions).await?;
            let form = RegistrationForm {
                name: name.clone(),
                college: college.clone(),
                department: department.clone(),
                photo: Some(load_photo(photo)?),
                id_photo: Some(load_photo(id_photo)?),
            };
            let record = workflow.register(&form, Some(&address))?;
            println!(
                "Registered {} ({}) for wallet {}",
                record.name,
                record.verification_status.as_str(),
                address.short()
            );
        }
        Command::Verify { selfie } => {
            let address = session_wallet(&cli, &sessions).await?;
            let outcome = workflow
                .verify_with_camera(&address, &FileCamera::new(selfie))
                .await?;
            println!("{}", outcome.message());
            if !outcome.is_verified() {
                std::process::exit(2);
            }
        }
        Command::CrossCheck { all } => {
            let reports = if *all {
                workflow.cross_check_all().await?
            } else {
                let address = session_wallet(&cli, &sessions).await?;
                vec![workflow.cross_check(&address).await?]
            };
            for report in &reports {
                print_report(report);
            }
        }
        Command::List => {
            let students = workflow.list()?;
            if students.is_empty() {
                println!("No students registered");
            }
            for record in &students {
                println!(
                    "{}  {}  {}  {}  {}",
                    record.wallet_address.short(),
                    record.name,
                    record.college,
                    record.department,
                    record.verification_status.as_str()
                );
            }
        }
        Command::Export { out } => {
            let address = session_wallet(&cli, &sessions).await?;
            let Some(record) = workflow.lookup(&address)? else {
                bail!("wallet {address} is not registered");
            };
            let path = out.join(credential_file_name(&record.name));
            std::fs::write(&path, export_credential(&record)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Credential written to {}", path.display());
        }
        Command::Clear { yes } => {
            if !*yes {
                bail!("refusing to delete all records without --yes");
            }
            let count = workflow.clear()?;
            println!("Deleted {count} record(s)");
        }
    }

    Ok(())
}
