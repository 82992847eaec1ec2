//! Command lines and healthchecks

/// A `command` or `entrypoint` override
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandLine {
    /// String form, split into words by the engine
    Shell(String),
    /// List form, passed through as-is
    Exec(Vec<String>),
}

impl CommandLine {
    /// Argument vector for targets that only accept the list form
    pub fn to_args(&self) -> Vec<String> {
        match self {
            CommandLine::Shell(line) => split_words(line),
            CommandLine::Exec(args) => args.clone(),
        }
    }

    /// Single command line for targets that only accept a string
    pub fn to_line(&self) -> String {
        match self {
            CommandLine::Shell(line) => line.clone(),
            CommandLine::Exec(args) => args
                .iter()
                .map(|arg| quote_word(arg))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Split a command string into words, honoring single and double quotes
/// and backslash escapes.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

fn quote_word(word: &str) -> String {
    if !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'))
    {
        return word.to_string();
    }
    format!(
        "\"{}\"",
        word.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

/// A service healthcheck
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Healthcheck {
    /// Normalized test: `["CMD", ...]`, `["CMD-SHELL", cmd]` or `["NONE"]`
    pub test: Vec<String>,
    pub interval: Option<String>,
    pub timeout: Option<String>,
    pub start_period: Option<String>,
    pub retries: Option<u32>,
    pub disable: bool,
}

impl Healthcheck {
    /// True when the check is switched off (`disable: true` or `NONE`)
    pub fn is_disabled(&self) -> bool {
        self.disable || self.test.first().map(String::as_str) == Some("NONE")
    }

    /// Argument vector of the probe command
    pub fn exec_form(&self) -> Option<Vec<String>> {
        if self.is_disabled() {
            return None;
        }
        match self.test.split_first() {
            Some((kind, rest)) if kind == "CMD" && !rest.is_empty() => Some(rest.to_vec()),
            Some((kind, rest)) if kind == "CMD-SHELL" && !rest.is_empty() => Some(vec![
                "/bin/sh".to_string(),
                "-c".to_string(),
                rest.join(" "),
            ]),
            _ => None,
        }
    }
}

/// Parse a Compose duration (`1m30s`, `10s`, `500ms`, `1h`) into whole seconds,
/// rounding sub-second remainders up.
pub fn duration_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }

    let mut total_ms: u64 = 0;
    let mut digits = String::new();
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let amount: u64 = digits.parse().ok()?;
        digits.clear();
        let unit_ms = match c {
            'h' => 3_600_000,
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                1
            }
            'm' => 60_000,
            's' => 1_000,
            'u' | 'µ' | 'n' => {
                // us / ns: below the resolution we report
                if chars.peek() == Some(&'s') {
                    chars.next();
                }
                0
            }
            _ => return None,
        };
        total_ms = total_ms.checked_add(amount.checked_mul(unit_ms)?)?;
    }
    if !digits.is_empty() {
        return None;
    }
    Some(total_ms.div_ceil(1_000))
}
