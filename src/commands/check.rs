use std::path::Path;

use anyhow::Result;

use super::{read_input, Session};
use crate::ui::output::{render_report, render_summary};

pub fn cmd_check(input: &Path, config_path: Option<&Path>, json: bool, verbose: u8) -> Result<bool> {
    let session = Session::load(config_path, json, verbose)?;
    let (label, text) = read_input(input)?;

    tracing::debug!(input = %label, "check");
    let result = session.translator.check(&text);

    if session.ui.json {
        crate::ui::json::emit(&result)?;
    } else {
        print!("{}", render_report(&session.ui, &result));
        println!("{}", render_summary(&session.ui, &result));
    }

    Ok(result.is_success())
}
