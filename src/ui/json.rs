//! JSON output for `--json`.
//!
//! Each command writes exactly one JSON document to stdout.

use serde::Serialize;
use std::io::{self, Write};

/// Write a typed document followed by a newline.
pub fn write_document<T: Serialize, W: Write>(out: &mut W, document: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit<T: Serialize>(document: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_document(&mut out, document)
}
