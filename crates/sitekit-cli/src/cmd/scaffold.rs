use anyhow::Context;
use sitekit_core::{config::Config, scaffold};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .sitekit.yml")?;

    println!("Provisioning script links in: {}", root.display());
    scaffold::install(root, &config.scaffold)?;
    println!("Script links ready.");

    Ok(())
}
