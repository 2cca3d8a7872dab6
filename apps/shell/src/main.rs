mod args;

use crate::args::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use modkit::domain::config::HostConfig;
use modkit::domain::constants::HOST_ENV_PREFIX;
use modkit::kernel::Mod;
use modkit::kernel::config::{FileConfigStore, load_config};
use modkit_logger::Logger;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = host_config(&cli)?;
    let _logger = Logger::from_config(config.id.as_str(), &config.log)?;

    run(&config)
}

fn host_config(cli: &Cli) -> Result<HostConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config::<HostConfig>(path, HOST_ENV_PREFIX)
            .with_context(|| format!("Failed to load host configuration {}", path.display()))?,
        None => HostConfig::default(),
    };

    if let Some(id) = &cli.id {
        config.id.clone_from(id);
    }
    if !cli.sides.is_empty() {
        config.sides = cli.sides.iter().copied().collect();
    }
    if let Some(dir) = &cli.options_dir {
        config.options.dir.clone_from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log.level.clone_from(level);
    }

    Ok(config)
}

fn run(config: &HostConfig) -> Result<()> {
    let mut store = FileConfigStore::new(&config.options.dir, config.id.as_str());
    if let Some(prefix) = &config.options.env_prefix {
        store = store.env_prefix(prefix.as_str());
    }

    let mut builder = Mod::builder().id(config.id.as_str()).config(store);
    if let Some(name) = &config.name {
        builder = builder.name(name.as_str());
    }
    let mut host = builder.build()?;

    modkit::register_builtin(&mut host)?;
    host.run_sides(config.sides)?;

    for (side, entries) in host.features_by_side() {
        let enabled = entries.iter().filter(|entry| entry.enabled()).count();
        info!(%side, features = entries.len(), enabled, "Side ready");
    }

    Ok(())
}
