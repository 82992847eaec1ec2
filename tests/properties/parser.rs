//! Property tests for the Compose parser.

use proptest::prelude::*;

use podshift::{parse_compose, OutputFormat, Translator};

fn yamlish_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("services:".to_string()),
        Just("  web:".to_string()),
        Just("    image: nginx".to_string()),
        Just("    ports: [\"80\"]".to_string()),
        Just("    volumes:".to_string()),
        Just("      - /var/run/docker.sock:/var/run/docker.sock".to_string()),
        Just("    depends_on: [web]".to_string()),
        Just("    environment: [A, B=1]".to_string()),
        Just("    restart: unless-stopped".to_string()),
        Just("    build: .".to_string()),
        Just("    network_mode: service:web".to_string()),
        Just("x-anchor: &a {image: redis}".to_string()),
        Just("  db: *a".to_string()),
        Just("  <<: *a".to_string()),
        proptest::string::string_regex("[ a-z:\\-\\[\\]{}\"0-9]{0,30}").unwrap(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse_compose` never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(text in "(?s).{0,256}") {
        let _ = parse_compose(&text);
    }

    /// PROPERTY: parsing yields a document or errors, and errors are never empty.
    #[test]
    fn property_parse_errors_are_non_empty(
        lines in proptest::collection::vec(yamlish_line(), 0..=12)
    ) {
        if let Err(errors) = parse_compose(&lines.join("\n")) {
            prop_assert!(!errors.is_empty());
        }
    }

    /// PROPERTY: full translation never panics and never returns both
    /// output and errors.
    #[test]
    fn property_translate_never_panics(
        lines in proptest::collection::vec(yamlish_line(), 0..=12)
    ) {
        let text = lines.join("\n");
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(&text, format);
            prop_assert!(result.errors.is_empty() || result.output.is_empty());
        }
    }
}
