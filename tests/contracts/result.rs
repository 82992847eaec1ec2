//! TranslationResult invariants

use podshift::{OutputFormat, Translator};

use crate::common::*;

const INPUTS: &[&str] = &[
    WEB_REDIS,
    SELF_DEPENDENCY,
    SOCKET_MOUNT,
    BUILD_ONLY,
    CLEAN,
    MALFORMED,
    "",
    "services: {}\n",
    "just a string\n",
];

/// CONTRACT: errors and output are never both populated.
#[test]
fn contract_errors_imply_empty_output() {
    let translator = Translator::default();
    for input in INPUTS {
        for format in OutputFormat::ALL {
            let result = translator.translate_to(input, format);
            assert!(
                result.errors.is_empty() || result.output.is_empty(),
                "{} on {:?} returned both output and errors",
                format,
                input
            );
            assert!(
                !result.errors.is_empty() || !result.output.is_empty(),
                "{} on {:?} returned neither output nor errors",
                format,
                input
            );
        }
    }
}

/// CONTRACT: the requested format id is echoed, even when unknown.
#[test]
fn contract_format_id_is_echoed() {
    let translator = Translator::default();
    for id in ["podman-compose", "quadlet", "kube", "helm"] {
        assert_eq!(translator.translate(CLEAN, id).output_format, id);
    }
}

/// CONTRACT: an unknown format id is fatal but rules still report.
#[test]
fn contract_unknown_format_is_fatal() {
    let result = Translator::default().translate(WEB_REDIS, "helm");

    assert!(result.output.is_empty());
    assert_eq!(result.errors, vec!["unknown output format 'helm'".to_string()]);
    assert!(!result.changes.is_empty());
}

/// CONTRACT: parse failures abort before any rule runs.
#[test]
fn contract_parse_errors_record_no_changes() {
    let result = Translator::default().translate(MALFORMED, "quadlet");

    assert!(!result.errors.is_empty());
    assert!(result.errors[0].starts_with("syntax error"));
    assert!(result.changes.is_empty());
}

/// CONTRACT: the same input always yields the same result.
#[test]
fn contract_translation_is_deterministic() {
    for format in OutputFormat::ALL {
        let first = Translator::default().translate_to(WEB_REDIS, format);
        let second = Translator::default().translate_to(WEB_REDIS, format);
        assert_eq!(first, second);
    }
}

/// CONTRACT: a Podman-ready document passes through unchanged.
#[test]
fn contract_clean_input_records_no_changes() {
    let result = Translator::default().translate(CLEAN, "podman-compose");

    assert!(result.is_success());
    assert!(result.changes.is_empty());
    assert!(result.warnings.is_empty());
}
