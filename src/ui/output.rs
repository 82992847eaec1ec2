//! Human-readable rendering of translation results.

use crossterm::style::Stylize;

use podshift::config::ConfigWarning;
use podshift::domain::entities::{Change, ChangeKind, TranslationResult};

use crate::ui::context::UiContext;
use crate::ui::theme::{self, icons, icons_ascii};

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!("{} {}", warning_icon(ui), w);
    }
}

/// Change log, warnings and errors, one line each.
pub fn render_report(ui: &UiContext, result: &TranslationResult) -> String {
    let mut out = String::new();

    for change in &result.changes {
        out.push_str(&render_change(ui, change));
        out.push('\n');
    }
    for warning in &result.warnings {
        out.push_str(&format!("{} {}\n", warning_icon(ui), warning));
    }
    for error in &result.errors {
        out.push_str(&format!("{} {}\n", paint(ui, error_icon(ui), theme::colors::ERROR), error));
    }

    out
}

/// One-line summary of change counts
pub fn render_summary(ui: &UiContext, result: &TranslationResult) -> String {
    let counts = format!(
        "{} added, {} modified, {} removed, {} warnings",
        result.count(ChangeKind::Added),
        result.count(ChangeKind::Modified),
        result.count(ChangeKind::Removed),
        result.count(ChangeKind::Warning) + result.warnings.len(),
    );

    if result.is_success() {
        let icon = if ui.unicode { icons::SUCCESS } else { icons_ascii::SUCCESS };
        format!("{} {}", paint(ui, icon, theme::colors::SUCCESS), counts)
    } else {
        format!(
            "{} {} errors; {}",
            paint(ui, error_icon(ui), theme::colors::ERROR),
            result.errors.len(),
            counts
        )
    }
}

fn render_change(ui: &UiContext, change: &Change) -> String {
    let (icon, color) = match (change.kind, ui.unicode) {
        (ChangeKind::Added, true) => (icons::ADDED, theme::colors::SUCCESS),
        (ChangeKind::Added, false) => (icons_ascii::ADDED, theme::colors::SUCCESS),
        (ChangeKind::Removed, true) => (icons::REMOVED, theme::colors::ERROR),
        (ChangeKind::Removed, false) => (icons_ascii::REMOVED, theme::colors::ERROR),
        (ChangeKind::Modified, true) => (icons::MODIFIED, theme::colors::INFO),
        (ChangeKind::Modified, false) => (icons_ascii::MODIFIED, theme::colors::INFO),
        (ChangeKind::Warning, true) => (icons::WARNING, theme::colors::WARNING),
        (ChangeKind::Warning, false) => (icons_ascii::WARNING, theme::colors::WARNING),
    };

    let mut line = format!("{} {}", paint(ui, icon, color), change.location);
    match change.kind {
        ChangeKind::Modified => {
            line.push_str(&format!(": {} -> {}", change.original, change.transformed))
        }
        ChangeKind::Added if !change.transformed.is_empty() => {
            line.push_str(&format!(": {}", change.transformed))
        }
        _ => {}
    }
    if ui.verbose > 0 || change.kind == ChangeKind::Warning {
        line.push_str(&format!(" ({})", paint(ui, &change.reason, theme::colors::DIM)));
    }
    line
}

fn warning_icon(ui: &UiContext) -> String {
    let icon = if ui.unicode { icons::WARNING } else { icons_ascii::WARNING };
    paint(ui, icon, theme::colors::WARNING)
}

fn error_icon(ui: &UiContext) -> &'static str {
    if ui.unicode {
        icons::ERROR
    } else {
        icons_ascii::ERROR
    }
}

fn paint(ui: &UiContext, s: &str, color: crossterm::style::Color) -> String {
    if ui.color {
        format!("{}", s.with(color))
    } else {
        s.to_string()
    }
}
