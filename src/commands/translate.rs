use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::{read_input, Session};
use crate::ui::output::{render_report, render_summary};

pub fn cmd_translate(
    input: &Path,
    format: Option<&str>,
    output: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<bool> {
    let session = Session::load(config_path, json, verbose)?;
    let (label, text) = read_input(input)?;
    let format_id = format.unwrap_or(session.config.output.format.id());

    tracing::debug!(input = %label, format = format_id, "translate");
    let result = session.translator.translate(&text, format_id);

    if result.is_success() {
        match output {
            Some(path) => std::fs::write(path, &result.output)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None if !session.ui.json => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.output.as_bytes())?;
                stdout.flush()?;
            }
            None => {}
        }
    }

    if session.ui.json {
        crate::ui::json::emit(&result)?;
    } else {
        eprint!("{}", render_report(&session.ui, &result));
        eprintln!("{}", render_summary(&session.ui, &result));
        if let (Some(path), true) = (output, result.is_success()) {
            eprintln!("wrote {} to {}", result.output_format, path.display());
        }
    }

    Ok(result.is_success())
}
