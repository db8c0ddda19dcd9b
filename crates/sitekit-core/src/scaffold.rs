//! Idempotent provisioning of `scripts/` symlinks into the vendored
//! script library.

use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::io;
use std::path::Path;

/// Ensure the scripts directory exists and every manifest entry is linked.
///
/// Entries that already exist, whatever they are or point to, are left
/// untouched, so re-running after an update only fills in the gaps.
pub fn install(root: &Path, config: &ScaffoldConfig) -> Result<()> {
    let scripts_dir = root.join(&config.scripts_dir);
    io::ensure_dir_0755(&scripts_dir)?;

    for file in &config.manifest {
        let link = scripts_dir.join(file);
        // symlink_metadata also catches dangling links left behind by a
        // removed vendor directory.
        if link.symlink_metadata().is_ok() {
            println!("  exists:  {}/{file}", config.scripts_dir);
            continue;
        }
        let target = Path::new(&config.link_target_dir).join(file);
        io::symlink(&target, &link)?;
        println!("  created: {}/{file}", config.scripts_dir);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
