//! Translators share nothing

use std::thread;

use podshift::domain::rules::{RestartRule, SocketRule};
use podshift::{EngineSettings, Translator};

use crate::common::*;

/// CONTRACT: translators with different rule sets and settings coexist.
#[test]
fn contract_reduced_rule_sets_coexist() {
    let full = Translator::default();
    let restart_only =
        Translator::with_rules(EngineSettings::default(), vec![Box::new(RestartRule)]);

    let reduced = restart_only.translate(WEB_REDIS, "podman-compose");
    let complete = full.translate(WEB_REDIS, "podman-compose");

    assert_eq!(reduced.changes.len(), 1);
    assert!(complete.changes.len() > reduced.changes.len());
    assert_eq!(full.rules().len(), 6);
}

/// CONTRACT: settings belong to one translator.
#[test]
fn contract_settings_are_per_translator() {
    let rootless = Translator::with_rules(
        EngineSettings {
            podman_socket: "/run/user/1000/podman/podman.sock".to_string(),
            ..EngineSettings::default()
        },
        vec![Box::new(SocketRule)],
    );
    let rootful = Translator::with_rules(EngineSettings::default(), vec![Box::new(SocketRule)]);

    let a = rootless.translate(SOCKET_MOUNT, "podman-compose");
    let b = rootful.translate(SOCKET_MOUNT, "podman-compose");

    assert!(a.output.contains("/run/user/1000/podman/podman.sock"));
    assert!(!b.output.contains("/run/user/1000"));
}

/// CONTRACT: concurrent translations do not interfere.
#[test]
fn contract_parallel_translations_agree() {
    let expected = Translator::default().translate(WEB_REDIS, "kube");

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| Translator::default().translate(WEB_REDIS, "kube")))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
