//! Shorthand normalization
//!
//! Compose accepts several spellings for ports, volumes and environments.
//! These helpers turn each spelling into the canonical value objects.

use indexmap::IndexMap;
use serde_yaml_ng::Value;

use crate::domain::value_objects::{MountKind, PortMapping, Protocol, VolumeMount};

use super::scalar_string;

/// Parse one `ports` entry (short string, bare number or long mapping).
///
/// Ranges expand into one mapping per port.
pub fn parse_port_entry(entry: &Value) -> Result<Vec<PortMapping>, String> {
    match entry {
        Value::String(s) => parse_port(s),
        Value::Number(n) => parse_port(&n.to_string()),
        Value::Mapping(map) => parse_long_port(map),
        _ => Err("expected a port string or mapping".to_string()),
    }
}

/// Parse the short port syntax: `[ip:][host:]container[/protocol]`
pub fn parse_port(spec: &str) -> Result<Vec<PortMapping>, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err("empty port mapping".to_string());
    }

    let (spec, protocol) = match spec.rsplit_once('/') {
        Some((rest, proto)) => {
            let protocol = Protocol::parse(proto)
                .ok_or_else(|| format!("unknown protocol '{}' in '{}'", proto, spec))?;
            (rest, protocol)
        }
        None => (spec, Protocol::Tcp),
    };

    let (host_ip, rest) = split_host_ip(spec)?;
    let parts: Vec<&str> = rest.split(':').collect();
    let (host_ip, host, container) = match (host_ip, parts.as_slice()) {
        (ip, [container]) => (ip, "", *container),
        (ip, [host, container]) => (ip, *host, *container),
        (None, [ip, host, container]) => (Some(ip.to_string()), *host, *container),
        _ => return Err(format!("invalid port mapping '{}'", spec)),
    };

    expand_ranges(host_ip, host, container, protocol)
        .map_err(|message| format!("{} in '{}'", message, spec))
}

fn split_host_ip(spec: &str) -> Result<(Option<String>, &str), String> {
    let Some(bracketed) = spec.strip_prefix('[') else {
        return Ok((None, spec));
    };
    let (ip, rest) = bracketed
        .split_once("]:")
        .ok_or_else(|| format!("unterminated IPv6 address in '{}'", spec))?;
    Ok((Some(ip.to_string()), rest))
}

fn expand_ranges(
    host_ip: Option<String>,
    host: &str,
    container: &str,
    protocol: Protocol,
) -> Result<Vec<PortMapping>, String> {
    let (container_start, container_end) = parse_range(container)?;
    let (host_start, host_end) = if host.is_empty() {
        (container_start, container_end)
    } else {
        parse_range(host)?
    };

    if host_end - host_start != container_end - container_start {
        return Err("host and container port ranges differ in size".to_string());
    }

    Ok((0..=(container_end - container_start))
        .map(|offset| PortMapping {
            host_ip: host_ip.clone().filter(|ip| !ip.is_empty()),
            host: host_start + offset,
            container: container_start + offset,
            protocol,
        })
        .collect())
}

fn parse_range(value: &str) -> Result<(u16, u16), String> {
    match value.split_once('-') {
        Some((start, end)) => {
            let start = parse_port_number(start)?;
            let end = parse_port_number(end)?;
            if end < start {
                return Err(format!("descending port range '{}'", value));
            }
            Ok((start, end))
        }
        None => {
            let port = parse_port_number(value)?;
            Ok((port, port))
        }
    }
}

fn parse_port_number(value: &str) -> Result<u16, String> {
    match value.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("invalid port number '{}'", value)),
        Ok(port) => Ok(port),
    }
}

fn parse_long_port(map: &serde_yaml_ng::Mapping) -> Result<Vec<PortMapping>, String> {
    let target = map
        .get("target")
        .and_then(scalar_string)
        .ok_or_else(|| "long port syntax requires 'target'".to_string())?;
    let published = map.get("published").and_then(scalar_string).unwrap_or_default();
    let protocol = match map.get("protocol").and_then(scalar_string) {
        Some(p) => Protocol::parse(&p).ok_or_else(|| format!("unknown protocol '{}'", p))?,
        None => Protocol::Tcp,
    };
    let host_ip = map.get("host_ip").and_then(scalar_string);

    expand_ranges(host_ip, &published, &target, protocol)
}

/// Outcome of parsing one `volumes` entry
#[derive(Debug, Clone, PartialEq)]
pub enum MountEntry {
    Mount(VolumeMount),
    /// A tmpfs mount, which the model has no place for
    Tmpfs(String),
}

/// Parse one `volumes` entry (short string or long mapping)
pub fn parse_volume_entry(entry: &Value) -> Result<MountEntry, String> {
    match entry {
        Value::String(s) => parse_volume(s).map(MountEntry::Mount),
        Value::Mapping(map) => parse_long_volume(map),
        _ => Err("expected a volume string or mapping".to_string()),
    }
}

/// Parse the short volume syntax: `[source:]target[:mode]`
pub fn parse_volume(spec: &str) -> Result<VolumeMount, String> {
    let spec = spec.trim();
    let parts: Vec<&str> = spec.split(':').collect();
    let mount = match parts.as_slice() {
        [target] => VolumeMount::anonymous(*target),
        [source, target] => VolumeMount::new(*source, *target),
        [source, target, mode] => {
            let (read_only, options) = parse_mode(mode)?;
            VolumeMount::new(*source, *target)
                .read_only(read_only)
                .with_options(options)
        }
        _ => return Err(format!("invalid volume mapping '{}'", spec)),
    };

    validate_target(&mount.target, spec)?;
    Ok(mount)
}

fn parse_mode(mode: &str) -> Result<(bool, Vec<String>), String> {
    let mut read_only = false;
    let mut options = Vec::new();
    for flag in mode.split(',').map(str::trim) {
        match flag {
            "ro" => read_only = true,
            "rw" => read_only = false,
            "" => return Err(format!("empty volume mode in '{}'", mode)),
            other => options.push(other.to_string()),
        }
    }
    Ok((read_only, options))
}

fn validate_target(target: &str, spec: &str) -> Result<(), String> {
    if target.is_empty() {
        return Err(format!("missing container path in '{}'", spec));
    }
    if !target.starts_with('/') {
        return Err(format!(
            "container path '{}' must be absolute in '{}'",
            target, spec
        ));
    }
    Ok(())
}

fn parse_long_volume(map: &serde_yaml_ng::Mapping) -> Result<MountEntry, String> {
    let target = map
        .get("target")
        .and_then(scalar_string)
        .ok_or_else(|| "long volume syntax requires 'target'".to_string())?;
    let mount_type = map
        .get("type")
        .and_then(scalar_string)
        .unwrap_or_else(|| "volume".to_string());
    let source = map.get("source").and_then(scalar_string).unwrap_or_default();
    let read_only = matches!(map.get("read_only"), Some(Value::Bool(true)));

    let kind = match mount_type.as_str() {
        "tmpfs" => return Ok(MountEntry::Tmpfs(target)),
        "bind" if source.is_empty() => {
            return Err(format!("bind mount of '{}' requires 'source'", target))
        }
        "bind" => MountKind::Bind,
        "volume" if source.is_empty() => MountKind::Anonymous,
        "volume" => MountKind::Named,
        other => return Err(format!("unsupported mount type '{}'", other)),
    };

    validate_target(&target, &target)?;
    Ok(MountEntry::Mount(VolumeMount {
        source: if kind == MountKind::Anonymous {
            None
        } else {
            Some(source)
        },
        target,
        read_only,
        kind,
        options: Vec::new(),
    }))
}

/// Environment parsed into the mapping form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub vars: IndexMap<String, String>,
    /// Variables declared without a value (inherited from the host)
    pub inherited: Vec<String>,
}

/// Parse `environment` in list (`KEY=VALUE` / `KEY`) or mapping form
pub fn parse_environment(value: &Value) -> Result<Environment, String> {
    let mut env = Environment::default();
    match value {
        Value::Null => {}
        Value::Sequence(items) => {
            for item in items {
                let entry = scalar_string(item)
                    .ok_or_else(|| "environment entries must be strings".to_string())?;
                match entry.split_once('=') {
                    Some((key, val)) => insert_var(&mut env, key, Some(val.to_string()))?,
                    None => insert_var(&mut env, &entry, None)?,
                }
            }
        }
        Value::Mapping(map) => {
            for (key, val) in map {
                let key = scalar_string(key)
                    .ok_or_else(|| "environment keys must be strings".to_string())?;
                let val = match val {
                    Value::Null => None,
                    other => Some(
                        scalar_string(other)
                            .ok_or_else(|| format!("value of '{}' must be a scalar", key))?,
                    ),
                };
                insert_var(&mut env, &key, val)?;
            }
        }
        _ => return Err("expected a list or mapping".to_string()),
    }
    Ok(env)
}

fn insert_var(env: &mut Environment, key: &str, value: Option<String>) -> Result<(), String> {
    let key = key.trim();
    if key.is_empty() {
        return Err("empty environment variable name".to_string());
    }
    match value {
        Some(value) => {
            env.vars.insert(key.to_string(), value);
        }
        None => {
            env.vars.insert(key.to_string(), String::new());
            env.inherited.push(key.to_string());
        }
    }
    Ok(())
}

/// Parse `labels` in list (`key=value`) or mapping form
pub fn parse_labels(value: &Value) -> Result<IndexMap<String, String>, String> {
    let mut labels = IndexMap::new();
    match value {
        Value::Null => {}
        Value::Sequence(items) => {
            for item in items {
                let entry =
                    scalar_string(item).ok_or_else(|| "label entries must be strings".to_string())?;
                let (key, val) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
                labels.insert(key.to_string(), val.to_string());
            }
        }
        Value::Mapping(map) => {
            for (key, val) in map {
                let key =
                    scalar_string(key).ok_or_else(|| "label keys must be strings".to_string())?;
                let val = if val.is_null() {
                    String::new()
                } else {
                    scalar_string(val).ok_or_else(|| format!("label '{}' must be a scalar", key))?
                };
                labels.insert(key, val);
            }
        }
        _ => return Err("expected a list or mapping".to_string()),
    }
    Ok(labels)
}
