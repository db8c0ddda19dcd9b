use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitekitError {
    #[error("could not create scripts directory {}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("invalid project name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidProjectName(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SitekitError>;
