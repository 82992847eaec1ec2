//! Escaping for systemd unit values
//!
//! Quadlet files are systemd unit files: `%` starts a specifier and `$`
//! starts a variable expansion in most directives, and values with spaces
//! must be quoted to stay one word.

/// Escape `%` and `$` so systemd passes them through literally
pub fn escape_specifiers(s: &str) -> String {
    s.replace('%', "%%").replace('$', "$$")
}

/// True when a value must be quoted to survive systemd word splitting
fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'))
}

/// Quote one word for a systemd directive, escaping as needed
pub fn quote_word(s: &str) -> String {
    let escaped = escape_specifiers(s);
    if !needs_quoting(s) {
        return escaped;
    }
    format!(
        "\"{}\"",
        escaped
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    )
}

/// Render an `Environment=` assignment
///
/// The whole `KEY=value` pair is quoted when the value needs it.
pub fn environment_assignment(key: &str, value: &str) -> String {
    let pair = format!("{}={}", key, value);
    if value.is_empty() || !needs_quoting(value) {
        return escape_specifiers(&pair);
    }
    quote_word(&pair)
}

/// Join arguments into a systemd command line
pub fn command_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_word(arg))
        .collect::<Vec<_>>()
        .join(" ")
}
