use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ScaffoldConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
    /// Link target directory, relative to `scripts_dir`.
    #[serde(default = "default_link_target_dir")]
    pub link_target_dir: String,
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,
}

fn default_scripts_dir() -> String {
    "scripts".to_string()
}

fn default_link_target_dir() -> String {
    "../vendor/sitekit/bin".to_string()
}

fn default_manifest() -> Vec<String> {
    [
        "frontend-build.sh",
        "copy-content-config-entity-to-module.sh",
        "reload-local.sh",
        "setup-traefik-port.sh",
        "backup.sh",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            link_target_dir: default_link_target_dir(),
            manifest: default_manifest(),
        }
    }
}

// ---------------------------------------------------------------------------
// BootstrapConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_php_service")]
    pub php_service: String,
    #[serde(default = "default_proxy_service")]
    pub proxy_service: String,
    #[serde(default = "default_base_theme")]
    pub base_theme: String,
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,
    /// Seconds to wait before site installation so the database service
    /// finishes its first boot.
    #[serde(default = "default_install_wait_secs")]
    pub install_wait_secs: u64,
}

fn default_php_service() -> String {
    "php".to_string()
}

fn default_proxy_service() -> String {
    "traefik".to_string()
}

fn default_base_theme() -> String {
    "radix".to_string()
}

fn default_domain_suffix() -> String {
    "docker.localhost".to_string()
}

fn default_install_wait_secs() -> u64 {
    10
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            php_service: default_php_service(),
            proxy_service: default_proxy_service(),
            base_theme: default_base_theme(),
            domain_suffix: default_domain_suffix(),
            install_wait_secs: default_install_wait_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            scaffold: ScaffoldConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl Config {
    /// Load `.sitekit.yml` from the project root, falling back to the
    /// built-in defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.scaffold.scripts_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "scaffold.scripts_dir is empty".to_string(),
            });
        }

        if self.scaffold.manifest.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "scaffold.manifest is empty; nothing will be linked".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.scaffold.manifest {
            if !seen.insert(entry.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("duplicate manifest entry '{entry}'"),
                });
            }
        }

        if Path::new(&self.scaffold.link_target_dir).is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "scaffold.link_target_dir '{}' is absolute; links usually point \
                     into the vendor directory relative to scripts/",
                    self.scaffold.link_target_dir
                ),
            });
        }

        for (field, value) in [
            ("bootstrap.php_service", &self.bootstrap.php_service),
            ("bootstrap.proxy_service", &self.bootstrap.proxy_service),
        ] {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{field} is empty"),
                });
            }
        }

        if self.bootstrap.install_wait_secs > 60 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "bootstrap.install_wait_secs={} (>60 is unusual)",
                    self.bootstrap.install_wait_secs
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
