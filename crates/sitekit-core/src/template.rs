//! Template rendering for project configuration files.
//!
//! Rendering is literal substring replacement of the placeholder token;
//! there is no template language. Files are processed independently, and a
//! missing source is fatal to the whole bootstrap run.

use crate::context::ProjectContext;
use crate::error::{Result, SitekitError};
use crate::io;
use crate::paths;
use std::path::Path;

/// Placeholder token the shipped templates carry in place of the real
/// project and theme names.
pub const PLACEHOLDER: &str = "example";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    ProjectName,
    ThemeName,
    /// Plain copy, no token replacement.
    Copy,
}

#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub source: String,
    pub destination: String,
    pub substitution: Substitution,
}

impl TemplateFile {
    fn new(source: &str, destination: &str, substitution: Substitution) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            substitution,
        }
    }
}

/// The configuration files rendered right after the project name is known.
///
/// The Makefile substitutes the theme name, since its theme variable names
/// the directory under web/themes/custom/. Everything else substitutes the
/// project name or is a plain copy of a .dist file.
pub fn config_templates(ctx: &ProjectContext) -> Vec<TemplateFile> {
    vec![
        TemplateFile::new(paths::ENV_EXAMPLE, paths::ENV_FILE, Substitution::ProjectName),
        TemplateFile::new(paths::MAKEFILE, paths::MAKEFILE, Substitution::ThemeName),
        TemplateFile::new(
            paths::DRUSH_SITE_TEMPLATE,
            &paths::drush_site_file(&ctx.project_name),
            Substitution::ProjectName,
        ),
        TemplateFile::new(paths::BEHAT_FILE, paths::BEHAT_FILE, Substitution::ProjectName),
        TemplateFile::new(
            paths::BACKSTOP_COOKIES,
            paths::BACKSTOP_COOKIES,
            Substitution::ProjectName,
        ),
        TemplateFile::new(
            paths::COMPOSE_OVERRIDE_DIST,
            paths::COMPOSE_OVERRIDE,
            Substitution::Copy,
        ),
        TemplateFile::new(paths::PHPUNIT_DIST, paths::PHPUNIT_FILE, Substitution::Copy),
        // Historical same-path copy; render() keeps it a no-op.
        TemplateFile::new(paths::PHPCS_DIST, paths::PHPCS_DIST, Substitution::Copy),
        TemplateFile::new(paths::PHPMD_DIST, paths::PHPMD_FILE, Substitution::Copy),
    ]
}

/// Local settings template, rendered during site installation rather than
/// with the rest of the configuration files.
pub fn local_settings_template() -> TemplateFile {
    TemplateFile::new(
        paths::SETTINGS_LOCAL_TEMPLATE,
        paths::SETTINGS_LOCAL,
        Substitution::ProjectName,
    )
}

/// Render one template below `root`.
pub fn render(root: &Path, tpl: &TemplateFile, ctx: &ProjectContext) -> Result<()> {
    let source = root.join(&tpl.source);
    if !source.is_file() {
        return Err(SitekitError::TemplateMissing(source));
    }
    let destination = root.join(&tpl.destination);

    match tpl.substitution {
        Substitution::Copy => {
            // A same-path copy would truncate the source before reading it.
            if tpl.source == tpl.destination {
                return Ok(());
            }
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&source, &destination)?;
            Ok(())
        }
        Substitution::ProjectName | Substitution::ThemeName => {
            let value = match tpl.substitution {
                Substitution::ProjectName => &ctx.project_name,
                _ => &ctx.theme_name,
            };
            let content = std::fs::read_to_string(&source)?;
            io::atomic_write(&destination, content.replace(PLACEHOLDER, value).as_bytes())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
