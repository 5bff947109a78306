//! stake-cli: drive a staking ledger from an operation script.

mod script;

use anyhow::Context;
use clap::Parser;
use stake_ledger::{ForfeitPolicy, LedgerConfig, LedgerSnapshot};
use stake_types::Timestamp;
use stake_utils::{format_remaining, init_tracing, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stake-cli", about = "Staking and arbitration ledger tool")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "STAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "STAKE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STAKE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Forfeit policy for rejected claims: "split", "arbiter_takes_all", "staker_takes_all".
    #[arg(long, env = "STAKE_FORFEIT_POLICY")]
    forfeit_policy: Option<ForfeitPolicy>,

    /// Accept claims against stakes whose deadline has passed.
    #[arg(long, env = "STAKE_ALLOW_EXPIRED_CLAIMS")]
    allow_expired_claims: bool,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a JSON operation script and print a JSON report.
    Replay {
        /// Script file.
        #[arg(long)]
        script: PathBuf,

        /// Write a bincode snapshot of the final ledger here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
    /// Verify a snapshot file and summarize its stakes.
    Inspect {
        /// Snapshot file.
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(policy) = cli.forfeit_policy {
        config.forfeit_policy = policy;
    }
    if cli.allow_expired_claims {
        config.reject_expired_claims = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_tracing(LogFormat::parse(&config.log_format), &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Replay {
            script,
            snapshot_out,
        } => {
            let raw = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let script: script::Script =
                serde_json::from_str(&raw).context("parsing script JSON")?;
            let outcome = script::run(&script, config)?;

            if let Some(path) = snapshot_out {
                let bytes = outcome.snapshot.to_bytes()?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!(
                    hash = %outcome.snapshot.hash_hex(),
                    "snapshot written to {}",
                    path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        }
        Command::Inspect { snapshot } => {
            let bytes = std::fs::read(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let snap = LedgerSnapshot::from_bytes(&bytes)?;
            anyhow::ensure!(snap.verify(), "snapshot hash mismatch");
            let now = Timestamp::now();
            println!("snapshot {} (v{}, {} stakes)", snap.hash_hex(), snap.version, snap.stake_count);
            for stake in &snap.stakes {
                println!(
                    "  stake {}: staker {} custody {} claims {} ({} open), {}",
                    stake.id,
                    stake.staker,
                    stake.custody,
                    stake.claims.len(),
                    stake.open_claims().count(),
                    format_remaining(stake.deadline.remaining_from(now)),
                );
            }
        }
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forfeit_policy_flag_uses_config_names() {
        let cli = Cli::try_parse_from(["stake-cli", "--forfeit-policy", "arbiter_takes_all", "config"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.forfeit_policy, ForfeitPolicy::ArbiterTakesAll);

        assert!(Cli::try_parse_from(["stake-cli", "--forfeit-policy", "winner_takes_all", "config"]).is_err());
    }

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["stake-cli", "config"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.forfeit_policy, ForfeitPolicy::Split);
        assert!(config.reject_expired_claims);
    }
}
