//! Podman-compose emitter
//!
//! Re-serializes the transformed Document as a Compose file. Service keys
//! keep their original order; keys the engine does not model are written
//! back verbatim.

use serde_yaml_ng::{Mapping, Value};

use crate::domain::entities::{
    Document, NetworkDef, Service, VolumeDef, DEFAULT_NETWORK_DRIVER, DEFAULT_VOLUME_DRIVER,
};
use crate::domain::ports::{EmitError, Emitter};
use crate::domain::value_objects::{
    CommandLine, EngineSettings, Healthcheck, MountKind, OutputFormat, VolumeMount,
};

/// Field order for keys that were not in the source (e.g. added by rules)
const CANONICAL_KEYS: &[&str] = &[
    "image",
    "build",
    "container_name",
    "command",
    "entrypoint",
    "environment",
    "ports",
    "volumes",
    "depends_on",
    "restart",
    "healthcheck",
    "labels",
    "cap_add",
    "cap_drop",
    "privileged",
    "devices",
    "networks",
    "network_mode",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeEmitter;

impl ComposeEmitter {
    pub fn new() -> Self {
        Self
    }
}

fn string(s: impl Into<String>) -> Value {
    Value::String(s.into())
}

fn string_seq<'a>(items: impl IntoIterator<Item = &'a String>) -> Value {
    Value::Sequence(items.into_iter().map(|s| string(s.as_str())).collect())
}

fn command_value(command: &CommandLine) -> Value {
    match command {
        CommandLine::Shell(line) => string(line.as_str()),
        CommandLine::Exec(args) => string_seq(args),
    }
}

fn mount_value(mount: &VolumeMount) -> Value {
    // The short syntax cannot mark an anonymous volume read-only
    if mount.kind == MountKind::Anonymous && mount.read_only {
        let mut long = Mapping::new();
        long.insert(string("type"), string("volume"));
        long.insert(string("target"), string(mount.target.as_str()));
        long.insert(string("read_only"), Value::Bool(true));
        return Value::Mapping(long);
    }
    string(mount.to_string())
}

fn healthcheck_value(healthcheck: &Healthcheck) -> Value {
    let mut map = Mapping::new();
    if !healthcheck.test.is_empty() {
        map.insert(string("test"), string_seq(&healthcheck.test));
    }
    let durations = [
        ("interval", &healthcheck.interval),
        ("timeout", &healthcheck.timeout),
        ("start_period", &healthcheck.start_period),
    ];
    for (key, value) in durations {
        if let Some(value) = value {
            map.insert(string(key), string(value.as_str()));
        }
    }
    if let Some(retries) = healthcheck.retries {
        map.insert(string("retries"), Value::Number(retries.into()));
    }
    if healthcheck.disable {
        map.insert(string("disable"), Value::Bool(true));
    }
    Value::Mapping(map)
}

fn depends_on_value(service: &Service) -> Value {
    if service.depends_on.iter().all(|d| d.is_plain()) {
        return Value::Sequence(
            service
                .depends_on
                .iter()
                .map(|d| string(d.service.as_str()))
                .collect(),
        );
    }

    let mut map = Mapping::new();
    for dep in &service.depends_on {
        let mut entry = Mapping::new();
        entry.insert(string("condition"), string(dep.condition.as_str()));
        if !dep.required {
            entry.insert(string("required"), Value::Bool(false));
        }
        map.insert(string(dep.service.as_str()), Value::Mapping(entry));
    }
    Value::Mapping(map)
}

fn string_map<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (string(k.as_str()), string(v.as_str())))
            .collect(),
    )
}

/// Value of one service key, or `None` when the field is unset
fn field_value(service: &Service, key: &str) -> Option<Value> {
    let value = match key {
        "image" => string(service.image.as_deref()?),
        "build" => service.build.clone()?,
        "container_name" => string(service.container_name.as_deref()?),
        "command" => command_value(service.command.as_ref()?),
        "entrypoint" => command_value(service.entrypoint.as_ref()?),
        "environment" if !service.environment.is_empty() => string_map(&service.environment),
        "ports" if !service.ports.is_empty() => Value::Sequence(
            service
                .ports
                .iter()
                .map(|p| string(p.to_string()))
                .collect(),
        ),
        "volumes" if !service.volumes.is_empty() => {
            Value::Sequence(service.volumes.iter().map(mount_value).collect())
        }
        "depends_on" if !service.depends_on.is_empty() => depends_on_value(service),
        "restart" => string(service.restart?.to_string()),
        "healthcheck" => healthcheck_value(service.healthcheck.as_ref()?),
        "labels" if !service.labels.is_empty() => string_map(&service.labels),
        "cap_add" if !service.cap_add.is_empty() => string_seq(&service.cap_add),
        "cap_drop" if !service.cap_drop.is_empty() => string_seq(&service.cap_drop),
        "privileged" if service.privileged => Value::Bool(true),
        "devices" if !service.devices.is_empty() => string_seq(&service.devices),
        "networks" if !service.networks.is_empty() => string_seq(&service.networks),
        "network_mode" => string(service.network_mode.as_deref()?),
        other => service.extras.get(other)?.clone(),
    };
    Some(value)
}

fn service_value(document: &Document, service: &Service) -> Value {
    let mut keys: Vec<&str> = document
        .key_order(&service.name)
        .iter()
        .map(String::as_str)
        .collect();
    for key in CANONICAL_KEYS {
        if !keys.contains(key) {
            keys.push(*key);
        }
    }
    for key in service.extras.keys() {
        if !keys.contains(&key.as_str()) {
            keys.push(key.as_str());
        }
    }

    let mut map = Mapping::new();
    for key in keys {
        if let Some(value) = field_value(service, key) {
            map.insert(string(key), value);
        }
    }
    Value::Mapping(map)
}

fn volume_value(volume: &VolumeDef) -> Value {
    let mut map = Mapping::new();
    if volume.driver != DEFAULT_VOLUME_DRIVER {
        map.insert(string("driver"), string(volume.driver.as_str()));
    }
    if !volume.driver_opts.is_empty() {
        map.insert(string("driver_opts"), string_map(&volume.driver_opts));
    }
    if volume.external {
        map.insert(string("external"), Value::Bool(true));
    }
    Value::Mapping(map)
}

fn network_value(network: &NetworkDef) -> Value {
    let mut map = Mapping::new();
    if network.driver != DEFAULT_NETWORK_DRIVER {
        map.insert(string("driver"), string(network.driver.as_str()));
    }
    if network.external {
        map.insert(string("external"), Value::Bool(true));
    }
    Value::Mapping(map)
}

impl Emitter for ComposeEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::PodmanCompose
    }

    fn emit(&self, document: &Document, _settings: &EngineSettings) -> Result<String, EmitError> {
        let mut root = Mapping::new();

        if let Some(version) = &document.version {
            root.insert(string("version"), string(version.as_str()));
        }
        if let Some(name) = &document.name {
            root.insert(string("name"), string(name.as_str()));
        }

        let services: Mapping = document
            .services
            .values()
            .map(|service| (string(service.name.as_str()), service_value(document, service)))
            .collect();
        root.insert(string("services"), Value::Mapping(services));

        if !document.volumes.is_empty() {
            let volumes: Mapping = document
                .volumes
                .values()
                .map(|v| (string(v.name.as_str()), volume_value(v)))
                .collect();
            root.insert(string("volumes"), Value::Mapping(volumes));
        }
        if !document.networks.is_empty() {
            let networks: Mapping = document
                .networks
                .values()
                .map(|n| (string(n.name.as_str()), network_value(n)))
                .collect();
            root.insert(string("networks"), Value::Mapping(networks));
        }

        for (key, value) in &document.extensions {
            root.insert(string(key.as_str()), value.clone());
        }

        serde_yaml_ng::to_string(&Value::Mapping(root)).map_err(|e| EmitError::Serialization {
            message: e.to_string(),
        })
    }
}
