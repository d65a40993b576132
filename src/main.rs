//! rosterctl - operator tool for the roster action engine.
//!
//! ```text
//! rosterctl <config.toml> check
//! rosterctl <config.toml> resolve <token>
//! rosterctl <config.toml> sort <roster.json>
//! ```

use anyhow::{Context, bail};
use roster_engine::config::{self, Config};
use roster_engine::security::IdentityResolver;
use roster_engine::state::{RosterEntry, RosterSorter};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rosterctl <config.toml> <check | resolve <token> | sort <roster.json>>";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, command) = match args.as_slice() {
        [path, command, ..] => (path.as_str(), command.as_str()),
        _ => bail!(USAGE),
    };

    let config = Config::load(config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    match (command, args.get(2)) {
        ("check", _) => check(&config),
        ("resolve", Some(token)) => resolve(&config, token),
        ("sort", Some(path)) => sort(path),
        _ => bail!(USAGE),
    }
}

fn check(config: &Config) -> anyhow::Result<()> {
    if let Err(errors) = config::validate(config) {
        for e in &errors {
            error!("{e}");
        }
        bail!("configuration has {} problem(s)", errors.len());
    }
    info!("configuration OK");
    Ok(())
}

fn resolve(config: &Config, token: &str) -> anyhow::Result<()> {
    let resolver = IdentityResolver::from_config(&config.identity);
    match resolver.resolve(token) {
        Ok(id) => {
            println!("{id}");
            Ok(())
        }
        Err(e) => {
            println!("unresolved");
            bail!("token could not be resolved: {e}")
        }
    }
}

fn sort(path: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let entries: Vec<RosterEntry> =
        serde_json::from_str(&content).with_context(|| format!("parsing {path}"))?;

    for (slot, entry) in RosterSorter::numbered(entries) {
        println!("{slot:>3}. {:<24} {}", entry.name.as_str(), entry.status);
    }
    Ok(())
}
