//! Compose parser
//!
//! Turns Compose YAML text into a [`Document`], normalizing shorthand forms
//! on the way. Parsing either yields a complete Document (plus non-fatal
//! warnings) or a non-empty list of fatal errors, never both.

mod shorthand;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_yaml_ng::{Mapping, Value};
use tracing::debug;

use crate::domain::entities::{Document, NetworkDef, Service, VolumeDef};
use crate::domain::value_objects::{
    CommandLine, Dependency, DependencyCondition, Healthcheck, RestartPolicy,
};
use crate::error::PodshiftError;

pub use shorthand::{
    parse_environment, parse_labels, parse_port, parse_port_entry, parse_volume,
    parse_volume_entry, Environment, MountEntry,
};

/// Compose file versions translated without a warning
const KNOWN_VERSIONS: &[&str] = &[
    "1", "2", "2.0", "2.1", "2.2", "2.3", "2.4", "3", "3.0", "3.1", "3.2", "3.3", "3.4", "3.5",
    "3.6", "3.7", "3.8", "3.9",
];

/// A successfully parsed document and the non-fatal issues found on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub document: Document,
    pub warnings: Vec<String>,
}

/// Collects diagnostics while walking the tree
#[derive(Debug, Default)]
struct ParseContext {
    errors: Vec<PodshiftError>,
    warnings: Vec<String>,
}

impl ParseContext {
    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.errors
            .push(PodshiftError::structural(location, message));
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Parse Compose text into a Document
///
/// A syntax error aborts with exactly one error. Structural errors are
/// collected across the whole document before failing.
pub fn parse_compose(text: &str) -> Result<ParsedDocument, Vec<PodshiftError>> {
    let mut root: Value =
        serde_yaml_ng::from_str(text).map_err(|e| vec![syntax_error(text, &e)])?;
    root.apply_merge()
        .map_err(|e| vec![PodshiftError::structural("document", e.to_string())])?;

    let root = match root {
        Value::Mapping(map) => map,
        Value::Null => {
            return Err(vec![PodshiftError::structural(
                "document",
                "document is empty",
            )])
        }
        _ => {
            return Err(vec![PodshiftError::structural(
                "document",
                "expected a mapping at the top level",
            )])
        }
    };

    let mut ctx = ParseContext::default();
    let mut document = Document::new();
    let mut saw_services = false;

    for (key, value) in root {
        let Some(key) = scalar_string(&key) else {
            ctx.error("document", "top-level keys must be strings");
            continue;
        };
        match key.as_str() {
            "version" => document.version = parse_version(&value, &mut ctx),
            "name" => match scalar_string(&value) {
                Some(name) => document.name = Some(name),
                None => ctx.error("name", "expected a string"),
            },
            "services" => {
                saw_services = true;
                parse_services(value, &mut document, &mut ctx);
            }
            "volumes" => parse_volumes(&value, &mut document, &mut ctx),
            "networks" => parse_networks(&value, &mut document, &mut ctx),
            _ => {
                debug!(key = %key, "retaining unknown top-level key");
                document.extensions.insert(key, value);
            }
        }
    }

    if !saw_services || (document.services.is_empty() && ctx.errors.is_empty()) {
        ctx.error("services", "document declares no services");
    }

    if ctx.errors.is_empty() {
        Ok(ParsedDocument {
            document,
            warnings: ctx.warnings,
        })
    } else {
        Err(ctx.errors)
    }
}

fn syntax_error(text: &str, err: &serde_yaml_ng::Error) -> PodshiftError {
    let (line, column) = err
        .location()
        .map(|loc| (loc.line(), loc.column()))
        .unwrap_or((0, 0));

    let mut message = err.to_string();
    if let Some(context) = line.checked_sub(1).and_then(|i| text.lines().nth(i)) {
        message.push_str(&format!(" (near `{}`)", context.trim()));
    }
    if err.to_string().contains("mapping values are not allowed") {
        message.push_str("; strings containing ': ' need quotes");
    }

    PodshiftError::Syntax {
        line,
        column,
        message,
    }
}

fn parse_version(value: &Value, ctx: &mut ParseContext) -> Option<String> {
    let Some(version) = scalar_string(value) else {
        ctx.warn("version: expected a string; ignoring it");
        return None;
    };
    if !KNOWN_VERSIONS.contains(&version.as_str()) {
        ctx.warn(format!(
            "version: compose file version '{}' is not recognized; translating with Compose Specification semantics",
            version
        ));
    }
    Some(version)
}

fn parse_services(value: Value, document: &mut Document, ctx: &mut ParseContext) {
    let services = match value {
        Value::Mapping(map) => map,
        Value::Null => return,
        _ => {
            ctx.error("services", "expected a mapping of service definitions");
            return;
        }
    };

    // lower-cased name -> first spelling seen
    let mut seen: HashMap<String, String> = HashMap::new();

    for (key, definition) in services {
        let Some(name) = scalar_string(&key) else {
            ctx.error("services", "service names must be strings");
            continue;
        };
        if name.trim().is_empty() {
            ctx.error("services", "service name must not be empty");
            continue;
        }
        if let Some(existing) = seen.get(&name.to_lowercase()) {
            ctx.error(
                format!("services.{}", name),
                format!(
                    "service name collides with '{}' (names are compared case-insensitively)",
                    existing
                ),
            );
            continue;
        }
        seen.insert(name.to_lowercase(), name.clone());

        let definition = match definition {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => {
                ctx.error(format!("services.{}", name), "expected a mapping");
                continue;
            }
        };

        let (service, key_order) = parse_service(&name, definition, ctx);
        document.layout.insert(name.clone(), key_order);
        document.services.insert(name, service);
    }
}

fn parse_service(name: &str, definition: Mapping, ctx: &mut ParseContext) -> (Service, Vec<String>) {
    let mut service = Service::new(name);
    let mut key_order = Vec::new();

    for (key, value) in definition {
        let Some(key) = scalar_string(&key) else {
            ctx.error(format!("services.{}", name), "keys must be strings");
            continue;
        };
        let location = service.location(&key);
        key_order.push(key.clone());

        match key.as_str() {
            "image" => match scalar_string(&value) {
                Some(image) => service.image = Some(image),
                None => ctx.error(location, "expected a string"),
            },
            "build" => service.build = Some(value),
            "ports" => {
                for (i, entry) in sequence(&value, &location, ctx).iter().enumerate() {
                    match parse_port_entry(entry) {
                        Ok(ports) => service.ports.extend(ports),
                        Err(message) => ctx.error(format!("{}[{}]", location, i), message),
                    }
                }
            }
            "volumes" => {
                for (i, entry) in sequence(&value, &location, ctx).iter().enumerate() {
                    match parse_volume_entry(entry) {
                        Ok(MountEntry::Mount(mount)) => service.volumes.push(mount),
                        Ok(MountEntry::Tmpfs(target)) => ctx.warn(format!(
                            "{}[{}]: tmpfs mount of '{}' is not modeled and was dropped",
                            location, i, target
                        )),
                        Err(message) => ctx.error(format!("{}[{}]", location, i), message),
                    }
                }
            }
            "environment" => match parse_environment(&value) {
                Ok(env) => {
                    for var in &env.inherited {
                        ctx.warn(format!(
                            "{}.{}: value is inherited from the host environment, which the target environment may not provide",
                            location, var
                        ));
                    }
                    service.environment = env.vars;
                }
                Err(message) => ctx.error(location, message),
            },
            "depends_on" => service.depends_on = parse_depends_on(&value, &location, ctx),
            "restart" => {
                let policy = match &value {
                    // YAML 1.1 readers turn a bare `no` into false
                    Value::Bool(false) => Some(RestartPolicy::No),
                    other => scalar_string(other).and_then(|s| RestartPolicy::parse(&s)),
                };
                match policy {
                    Some(policy) => service.restart = Some(policy),
                    None => ctx.error(
                        location,
                        "expected one of no, always, on-failure[:N], unless-stopped",
                    ),
                }
            }
            "labels" => match parse_labels(&value) {
                Ok(labels) => service.labels = labels,
                Err(message) => ctx.error(location, message),
            },
            "cap_add" => service.cap_add = string_list(&value, &location, ctx),
            "cap_drop" => service.cap_drop = string_list(&value, &location, ctx),
            "devices" => service.devices = string_list(&value, &location, ctx),
            "privileged" => match value {
                Value::Bool(flag) => service.privileged = flag,
                _ => ctx.error(location, "expected a boolean"),
            },
            "healthcheck" => service.healthcheck = parse_healthcheck(&value, &location, ctx),
            "command" => service.command = parse_command(&value, &location, ctx),
            "entrypoint" => service.entrypoint = parse_command(&value, &location, ctx),
            "networks" => service.networks = parse_service_networks(&value, &location, ctx),
            "network_mode" => match scalar_string(&value) {
                Some(mode) => service.network_mode = Some(mode),
                None => ctx.error(location, "expected a string"),
            },
            "container_name" => match scalar_string(&value) {
                Some(container_name) => service.container_name = Some(container_name),
                None => ctx.error(location, "expected a string"),
            },
            _ => {
                service.extras.insert(key, value);
            }
        }
    }

    if !service.has_image() && service.build.is_none() {
        ctx.error(
            format!("services.{}", name),
            "service must declare either 'image' or 'build'",
        );
    }

    (service, key_order)
}

fn parse_depends_on(value: &Value, location: &str, ctx: &mut ParseContext) -> Vec<Dependency> {
    let mut dependencies = Vec::new();
    match value {
        Value::Null => {}
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                match scalar_string(item) {
                    Some(name) => dependencies.push(Dependency::new(name)),
                    None => ctx.error(format!("{}[{}]", location, i), "expected a service name"),
                }
            }
        }
        Value::Mapping(map) => {
            for (key, options) in map {
                let Some(name) = scalar_string(key) else {
                    ctx.error(location, "service names must be strings");
                    continue;
                };
                let mut dependency = Dependency::new(name.clone());
                if let Value::Mapping(options) = options {
                    if let Some(condition) = options.get("condition").and_then(scalar_string) {
                        match DependencyCondition::parse(&condition) {
                            Some(condition) => dependency = dependency.with_condition(condition),
                            None => ctx.error(
                                format!("{}.{}.condition", location, name),
                                format!("unknown condition '{}'", condition),
                            ),
                        }
                    }
                    if let Some(Value::Bool(false)) = options.get("required") {
                        dependency = dependency.optional();
                    }
                }
                dependencies.push(dependency);
            }
        }
        _ => ctx.error(location, "expected a list or mapping"),
    }
    dependencies
}

fn parse_healthcheck(value: &Value, location: &str, ctx: &mut ParseContext) -> Option<Healthcheck> {
    let Value::Mapping(map) = value else {
        ctx.error(location, "expected a mapping");
        return None;
    };

    let mut healthcheck = Healthcheck::default();
    for (key, val) in map {
        let key = scalar_string(key).unwrap_or_default();
        match key.as_str() {
            "test" => match val {
                Value::String(cmd) => {
                    healthcheck.test = vec!["CMD-SHELL".to_string(), cmd.clone()];
                }
                Value::Sequence(_) => {
                    let test = string_list(val, &format!("{}.test", location), ctx);
                    match test.first().map(String::as_str) {
                        Some("CMD" | "CMD-SHELL" | "NONE") => healthcheck.test = test,
                        _ => ctx.error(
                            format!("{}.test", location),
                            "test must start with CMD, CMD-SHELL or NONE",
                        ),
                    }
                }
                _ => ctx.error(format!("{}.test", location), "expected a string or list"),
            },
            "interval" => healthcheck.interval = scalar_string(val),
            "timeout" => healthcheck.timeout = scalar_string(val),
            "start_period" => healthcheck.start_period = scalar_string(val),
            "retries" => match val.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(retries) => healthcheck.retries = Some(retries),
                None => ctx.error(format!("{}.retries", location), "expected a number"),
            },
            "disable" => healthcheck.disable = matches!(val, Value::Bool(true)),
            other => ctx.warn(format!(
                "{}.{}: healthcheck option is not modeled and was dropped",
                location, other
            )),
        }
    }
    Some(healthcheck)
}

fn parse_command(value: &Value, location: &str, ctx: &mut ParseContext) -> Option<CommandLine> {
    match value {
        Value::Null => None,
        Value::Sequence(_) => Some(CommandLine::Exec(string_list(value, location, ctx))),
        other => match scalar_string(other) {
            Some(line) => Some(CommandLine::Shell(line)),
            None => {
                ctx.error(location, "expected a string or list");
                None
            }
        },
    }
}

fn parse_service_networks(value: &Value, location: &str, ctx: &mut ParseContext) -> Vec<String> {
    match value {
        Value::Mapping(map) => map
            .iter()
            .filter_map(|(key, options)| {
                let name = scalar_string(key)?;
                if !options.is_null() {
                    ctx.warn(format!(
                        "{}.{}: per-network options are not modeled and were dropped",
                        location, name
                    ));
                }
                Some(name)
            })
            .collect(),
        _ => string_list(value, location, ctx),
    }
}

fn parse_volumes(value: &Value, document: &mut Document, ctx: &mut ParseContext) {
    for (name, options) in named_entries(value, "volumes", ctx) {
        let mut volume = VolumeDef::new(name.clone());
        let location = format!("volumes.{}", name);
        for (key, val) in options {
            match key.as_str() {
                "driver" => match scalar_string(&val) {
                    Some(driver) => volume.driver = driver,
                    None => ctx.error(format!("{}.driver", location), "expected a string"),
                },
                "driver_opts" => match val {
                    Value::Mapping(opts) => {
                        volume.driver_opts = opts
                            .iter()
                            .filter_map(|(k, v)| Some((scalar_string(k)?, scalar_string(v)?)))
                            .collect();
                    }
                    _ => ctx.error(format!("{}.driver_opts", location), "expected a mapping"),
                },
                "external" => volume.external = !matches!(val, Value::Bool(false) | Value::Null),
                other => ctx.warn(format!(
                    "{}.{}: volume option is not modeled and was dropped",
                    location, other
                )),
            }
        }
        document.volumes.insert(name, volume);
    }
}

fn parse_networks(value: &Value, document: &mut Document, ctx: &mut ParseContext) {
    for (name, options) in named_entries(value, "networks", ctx) {
        let mut network = NetworkDef::new(name.clone());
        let location = format!("networks.{}", name);
        for (key, val) in options {
            match key.as_str() {
                "driver" => match scalar_string(&val) {
                    Some(driver) => network.driver = driver,
                    None => ctx.error(format!("{}.driver", location), "expected a string"),
                },
                "external" => network.external = !matches!(val, Value::Bool(false) | Value::Null),
                other => ctx.warn(format!(
                    "{}.{}: network option is not modeled and was dropped",
                    location, other
                )),
            }
        }
        document.networks.insert(name, network);
    }
}

/// Entries of a top-level `volumes`/`networks` mapping as name → options
fn named_entries(
    value: &Value,
    section: &str,
    ctx: &mut ParseContext,
) -> Vec<(String, IndexMap<String, Value>)> {
    let map = match value {
        Value::Mapping(map) => map,
        Value::Null => return Vec::new(),
        _ => {
            ctx.error(section, "expected a mapping");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for (key, options) in map {
        let Some(name) = scalar_string(key) else {
            ctx.error(section, "names must be strings");
            continue;
        };
        let options = match options {
            Value::Null => IndexMap::new(),
            Value::Mapping(opts) => opts
                .iter()
                .filter_map(|(k, v)| Some((scalar_string(k)?, v.clone())))
                .collect(),
            _ => {
                ctx.error(format!("{}.{}", section, name), "expected a mapping");
                continue;
            }
        };
        entries.push((name, options));
    }
    entries
}

fn sequence<'a>(value: &'a Value, location: &str, ctx: &mut ParseContext) -> &'a [Value] {
    match value {
        Value::Sequence(items) => items.as_slice(),
        Value::Null => &[],
        _ => {
            ctx.error(location, "expected a list");
            &[]
        }
    }
}

fn string_list(value: &Value, location: &str, ctx: &mut ParseContext) -> Vec<String> {
    let mut out = Vec::new();
    for (i, item) in sequence(value, location, ctx).iter().enumerate() {
        match scalar_string(item) {
            Some(s) => out.push(s),
            None => ctx.error(format!("{}[{}]", location, i), "expected a string"),
        }
    }
    out
}

/// String form of a scalar YAML value (strings, numbers, booleans)
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
