//! Property: the Docker control socket path never leaks into output.

use proptest::prelude::*;

use podshift::{ChangeKind, OutputFormat, Translator};

use crate::strategies::{render_document, service};

fn socket_mount() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("/var/run/docker.sock"), Just("/run/docker.sock")],
        prop_oneof![
            Just("/var/run/docker.sock"),
            Just("/run/docker.sock"),
            Just("/tmp/docker.sock")
        ],
        prop_oneof![Just(""), Just(":ro"), Just(":rw")],
    )
        .prop_map(|(source, target, mode)| format!("{}:{}{}", source, target, mode))
}

/// Extra service lines that name the socket outside the mount
fn socket_reference() -> impl Strategy<Value = String> {
    let sock = prop_oneof![Just("/var/run/docker.sock"), Just("/run/docker.sock")];
    (0..4usize, sock).prop_map(|(shape, sock)| match shape {
        0 => String::new(),
        1 => format!("    command: \"--providers.docker.endpoint=unix://{}\"\n", sock),
        2 => format!("    command: [\"agent\", \"--socket\", \"{}\"]\n", sock),
        _ => format!("    labels:\n      socket: \"{}\"\n", sock),
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no format ever contains the Docker socket path, and exactly
    /// one `modified` change references the socket mount.
    #[test]
    fn property_socket_never_leaks(
        services in proptest::collection::vec(service(), 0..=3),
        mount in socket_mount(),
        reference in socket_reference(),
    ) {
        let mut text = render_document(&services, true);
        let index = services.len();
        text = text.replacen(
            "services:\n",
            &format!(
                "services:\n  s{}:\n    image: agent\n{}    volumes:\n      - {}\n",
                index, reference, mount
            ),
            1,
        );

        let location = format!("services.s{}.volumes[0]", index);
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(&text, format);
            prop_assert!(result.is_success(), "{}: {:?}", format, result.errors);
            prop_assert!(!result.output.contains("/var/run/docker.sock"));
            prop_assert!(!result.output.contains("/run/docker.sock"));

            let modified = result
                .changes
                .iter()
                .filter(|c| c.kind == ChangeKind::Modified && c.location == location)
                .count();
            prop_assert_eq!(modified, 1);
        }
    }
}
