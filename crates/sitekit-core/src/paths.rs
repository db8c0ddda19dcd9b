use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".sitekit.yml";

pub const ENV_EXAMPLE: &str = ".env.example";
pub const ENV_FILE: &str = ".env";
pub const MAKEFILE: &str = "Makefile";
pub const DRUSH_SITE_TEMPLATE: &str = "drush/sites/sitename.site.yml.example";
pub const BEHAT_FILE: &str = "behat.yml";
pub const BACKSTOP_COOKIES: &str = "tests/backstop/cookies.json";

pub const COMPOSE_OVERRIDE_DIST: &str = "docker-compose.override.yml.dist";
pub const COMPOSE_OVERRIDE: &str = "docker-compose.override.yml";
pub const PHPUNIT_DIST: &str = "phpunit.xml.dist";
pub const PHPUNIT_FILE: &str = "phpunit.xml";
pub const PHPCS_DIST: &str = "phpcs.xml.dist";
pub const PHPMD_DIST: &str = "phpmd.xml.dist";
pub const PHPMD_FILE: &str = "phpmd.xml";

pub const SETTINGS_LOCAL_TEMPLATE: &str = "web/sites/example.settings.local.php";
pub const SETTINGS_LOCAL: &str = "web/sites/default/settings.local.php";

pub const THEMES_CUSTOM_DIR: &str = "web/themes/custom";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Drush site alias file for a project, relative to the project root.
pub fn drush_site_file(project_name: &str) -> String {
    format!("drush/sites/{project_name}.site.yml")
}

/// Custom theme directory for a theme, relative to the project root.
pub fn theme_dir(theme_name: &str) -> String {
    format!("{THEMES_CUSTOM_DIR}/{theme_name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
