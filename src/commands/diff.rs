use std::path::Path;

use anyhow::Result;
use podshift::OutputFormat;
use serde::Serialize;

use super::{read_input, Session};
use crate::ui::diff::{line_stats, render_unified_diff_with_line_numbers};
use crate::ui::output::render_report;

#[derive(Debug, Serialize)]
struct DiffDocument<'a> {
    input: &'a str,
    format: &'a str,
    insertions: usize,
    deletions: usize,
    diff: String,
}

pub fn cmd_diff(
    input: &Path,
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
    json: bool,
    verbose: u8,
) -> Result<bool> {
    let session = Session::load(config_path, json, verbose)?;
    let (label, text) = read_input(input)?;
    let format = format.unwrap_or(session.config.output.format);

    let result = session.translator.translate_to(&text, format);
    if !result.is_success() {
        if session.ui.json {
            crate::ui::json::emit(&result)?;
        } else {
            eprint!("{}", render_report(&session.ui, &result));
        }
        return Ok(false);
    }

    let (insertions, deletions) = line_stats(&text, &result.output);
    if session.ui.json {
        crate::ui::json::emit(&DiffDocument {
            input: &label,
            format: format.id(),
            insertions,
            deletions,
            diff: render_unified_diff_with_line_numbers(
                &label,
                format.id(),
                &text,
                &result.output,
                false,
            ),
        })?;
    } else {
        print!(
            "{}",
            render_unified_diff_with_line_numbers(
                &label,
                format.id(),
                &text,
                &result.output,
                session.ui.color,
            )
        );
        eprintln!("{} insertions(+), {} deletions(-)", insertions, deletions);
    }

    Ok(true)
}
