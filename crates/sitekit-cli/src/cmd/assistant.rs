use anyhow::Context;
use sitekit_core::assistant::Assistant;
use sitekit_core::config::Config;
use sitekit_core::runner::{self, ComposeBin, ShellRunner};
use std::path::Path;

use crate::prompt::TerminalPrompt;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .sitekit.yml")?;

    let compose = runner::detect_compose().unwrap_or_else(|| {
        tracing::warn!("no compose binary on PATH; stack commands will fail");
        ComposeBin::Standalone
    });
    tracing::debug!(compose = compose.name(), "using compose entry point");

    println!("Bootstrapping project in: {}", root.display());
    Assistant::new(root, config, compose, ShellRunner, TerminalPrompt).run(name)?;

    Ok(())
}
