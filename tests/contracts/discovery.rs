//! Discovery data

use podshift::{format_descriptors, rule_descriptors, Translator};

/// CONTRACT: rules are listed in execution order.
#[test]
fn contract_rule_order() {
    let names: Vec<_> = rule_descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec![
            "socket",
            "restart",
            "dependency-ordering",
            "network",
            "volume",
            "unsupported-keys",
        ]
    );
}

/// CONTRACT: every format id is accepted by the translator.
#[test]
fn contract_listed_formats_translate() {
    let translator = Translator::default();
    for descriptor in format_descriptors() {
        let result = translator.translate("services:\n  a:\n    image: busybox\n", descriptor.id);
        assert!(result.is_success(), "{}: {:?}", descriptor.id, result.errors);
        assert!(!descriptor.name.is_empty());
        assert!(!descriptor.description.is_empty());
    }
}
