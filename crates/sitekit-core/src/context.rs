use crate::error::{Result, SitekitError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Per-run bootstrap state, created once the project name is resolved and
/// threaded through the remaining steps.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_name: String,
    pub theme_name: String,
    pub git_initialized: bool,
}

impl ProjectContext {
    pub fn new(project_name: &str) -> Result<Self> {
        validate_project_name(project_name)?;
        Ok(Self {
            project_name: project_name.to_string(),
            theme_name: project_name.replace('-', "_"),
            git_initialized: false,
        })
    }
}

/// Default project name candidate: the base name of the project root.
pub fn default_project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// The project name ends up as a hostname label in the project URL, so it
/// is restricted to lowercase alphanumerics and inner hyphens, max 63 chars.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 63 || !name_re().is_match(name) {
        return Err(SitekitError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
