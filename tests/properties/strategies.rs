//! Generators for small, valid Compose documents.

use proptest::prelude::*;

/// One generated service, rendered later into Compose text
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    pub image: String,
    pub ports: Vec<(u16, u16)>,
    pub env: Vec<(String, String)>,
    pub volumes: Vec<(String, String)>,
    pub restart: Option<&'static str>,
}

pub fn image() -> impl Strategy<Value = String> {
    proptest::string::string_regex("img[a-z]{0,5}(:[0-9]{1,2})?").unwrap()
}

fn env_pair() -> impl Strategy<Value = (String, String)> {
    (
        proptest::string::string_regex("K[A-Z0-9_]{0,6}").unwrap(),
        proptest::string::string_regex("v[a-z0-9]{0,6}").unwrap(),
    )
}

fn volume_pair() -> impl Strategy<Value = (String, String)> {
    (
        proptest::string::string_regex("vol[a-z]{0,4}").unwrap(),
        proptest::string::string_regex("/[a-z]{1,6}").unwrap(),
    )
}

pub fn service() -> impl Strategy<Value = ServiceSpec> {
    (
        image(),
        proptest::collection::vec((1024u16..=65535, 1u16..=9999), 0..=2),
        proptest::collection::vec(env_pair(), 0..=3),
        proptest::collection::vec(volume_pair(), 0..=2),
        proptest::option::of(prop_oneof![Just("always"), Just("no"), Just("on-failure")]),
    )
        .prop_map(|(image, ports, env, volumes, restart)| ServiceSpec {
            image,
            ports,
            env,
            volumes,
            restart,
        })
}

/// Service names are `s0`, `s1`, ... so they never collide. Duplicate host
/// ports, environment keys and mount targets are skipped.
pub fn render_document(services: &[ServiceSpec], declare_volumes: bool) -> String {
    let mut out = String::from("services:\n");
    let mut volume_names: Vec<String> = Vec::new();
    let mut host_ports: Vec<u16> = Vec::new();

    for (i, service) in services.iter().enumerate() {
        out.push_str(&format!("  s{}:\n    image: {}\n", i, service.image));
        let ports: Vec<_> = service
            .ports
            .iter()
            .filter(|(host, _)| {
                let fresh = !host_ports.contains(host);
                host_ports.push(*host);
                fresh
            })
            .collect();
        if !ports.is_empty() {
            out.push_str("    ports:\n");
            for (host, container) in ports {
                out.push_str(&format!("      - \"{}:{}\"\n", host, container));
            }
        }
        let mut keys: Vec<String> = Vec::new();
        let env: Vec<_> = service
            .env
            .iter()
            .filter(|(key, _)| {
                let fresh = !keys.contains(key);
                keys.push(key.to_string());
                fresh
            })
            .collect();
        if !env.is_empty() {
            out.push_str("    environment:\n");
            for (key, value) in env {
                out.push_str(&format!("      {}: \"{}\"\n", key, value));
            }
        }
        let mut targets: Vec<String> = Vec::new();
        let mounts: Vec<_> = service
            .volumes
            .iter()
            .filter(|(_, target)| {
                let fresh = !targets.contains(target);
                targets.push(target.to_string());
                fresh
            })
            .collect();
        if !mounts.is_empty() {
            out.push_str("    volumes:\n");
            for (name, target) in mounts {
                out.push_str(&format!("      - {}:{}\n", name, target));
                if !volume_names.contains(name) {
                    volume_names.push(name.clone());
                }
            }
        }
        if let Some(restart) = service.restart {
            out.push_str(&format!("    restart: {}\n", restart));
        }
    }

    if declare_volumes && !volume_names.is_empty() {
        out.push_str("volumes:\n");
        for name in volume_names {
            out.push_str(&format!("  {}: {{}}\n", name));
        }
    }
    out
}
