//! Property: podman-compose is a pass-through format.

use proptest::prelude::*;

use podshift::domain::services::RuleEngine;
use podshift::{parse_compose, ChangeKind, EngineSettings, Translator};

use crate::strategies::{render_document, service};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: clean input yields no warning changes, and re-parsing the
    /// emitted file gives back the transformed document.
    #[test]
    fn property_podman_compose_round_trips(
        services in proptest::collection::vec(service(), 1..=4),
    ) {
        let text = render_document(&services, true);

        let result = Translator::default().translate(&text, "podman-compose");
        prop_assert!(result.is_success(), "{:?}\n{}", result.errors, text);
        prop_assert_eq!(result.count(ChangeKind::Warning), 0);

        let mut transformed = parse_compose(&text).unwrap().document;
        let outcome = RuleEngine::default().run(&mut transformed, &EngineSettings::default());
        prop_assert!(!outcome.is_blocked());

        let reparsed = parse_compose(&result.output).unwrap().document;
        prop_assert_eq!(&reparsed.services, &transformed.services);
        prop_assert_eq!(&reparsed.volumes, &transformed.volumes);
        prop_assert_eq!(&reparsed.networks, &transformed.networks);
    }

    /// PROPERTY: translating the output a second time changes nothing.
    #[test]
    fn property_second_pass_is_quiet(
        services in proptest::collection::vec(service(), 1..=4),
        declare in any::<bool>(),
    ) {
        let text = render_document(&services, declare);
        let translator = Translator::default();

        let first = translator.translate(&text, "podman-compose");
        prop_assert!(first.is_success(), "{:?}", first.errors);

        let second = translator.translate(&first.output, "podman-compose");
        prop_assert!(second.is_success());
        prop_assert!(second.changes.is_empty(), "{:?}", second.changes);
        prop_assert_eq!(second.output, first.output);
    }
}
