//! Command handlers
//!
//! Each handler returns `Ok(true)` when the translation carried no errors,
//! `Ok(false)` when it did, and `Err` for I/O or configuration failures.

pub mod check;
pub mod diff;
pub mod discovery;
pub mod translate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use podshift::{Config, Translator};

use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// Label shown for input read from stdin
pub(crate) const STDIN_LABEL: &str = "<stdin>";

/// Everything a command needs after configuration is resolved
pub(crate) struct Session {
    pub config: Config,
    pub ui: UiContext,
    pub translator: Translator,
}

impl Session {
    pub(crate) fn load(config_path: Option<&Path>, json: bool, verbose: u8) -> Result<Self> {
        let ui = UiContext::new(json, verbose);
        let cwd = std::env::current_dir().context("failed to read the working directory")?;
        let (config, warnings) = Config::load_layered(config_path, &cwd)?;
        if !json {
            print_config_warnings(&ui, &warnings);
        }
        for warning in &warnings {
            tracing::debug!(key = %warning.key, "unknown configuration key");
        }

        let translator = Translator::new(config.engine_settings());
        Ok(Self {
            config,
            ui,
            translator,
        })
    }
}

/// Read the Compose document from a file, or from stdin when `path` is `-`.
///
/// Returns the display label and the text.
pub(crate) fn read_input(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read the Compose document from stdin")?;
        return Ok((STDIN_LABEL.to_string(), text));
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok((path.display().to_string(), text))
}
