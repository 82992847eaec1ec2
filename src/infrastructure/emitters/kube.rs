//! Kube emitter
//!
//! Renders the whole document as one Pod manifest for `podman kube play`.
//! Containers follow startup order; services other services must wait to
//! complete become init containers. Volumes are pod-scoped: a named volume
//! used by several containers is declared once, bind mounts are keyed by
//! host path, and a generated name that clashes gets a numeric suffix.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::entities::{Document, Service};
use crate::domain::ports::{opaque_key_diagnostics, EmitError, Emitter, EmitterDiagnostic};
use crate::domain::rules::DOCKER_SOCKET_PATHS;
use crate::domain::value_objects::{
    duration_seconds, EngineSettings, MountKind, OutputFormat, RestartPolicy, ROOTFUL_PODMAN_SOCKET,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct KubeEmitter;

impl KubeEmitter {
    pub fn new() -> Self {
        Self
    }
}

// === Manifest model ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pod {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    spec: PodSpec,
}

#[derive(Debug, Serialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PodSpec {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    host_network: bool,
    restart_policy: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    init_containers: Vec<Container>,
    containers: Vec<Container>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<PodVolume>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Container {
    name: String,
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<ContainerPort>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    env: Vec<EnvVar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volume_mounts: Vec<VolumeMountRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_context: Option<SecurityContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    liveness_probe: Option<Probe>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerPort {
    container_port: u16,
    host_port: u16,
    #[serde(rename = "hostIP", skip_serializing_if = "Option::is_none")]
    host_ip: Option<String>,
    protocol: &'static str,
}

#[derive(Debug, Serialize)]
struct EnvVar {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VolumeMountRef {
    name: String,
    mount_path: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    read_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SecurityContext {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    privileged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    capabilities: Option<Capabilities>,
}

#[derive(Debug, Serialize)]
struct Capabilities {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    add: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    drop: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Probe {
    exec: ExecAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_delay_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_threshold: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ExecAction {
    command: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct PodVolume {
    name: String,
    #[serde(flatten)]
    source: VolumeSource,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
enum VolumeSource {
    PersistentVolumeClaim(ClaimRef),
    HostPath(HostPathSource),
    EmptyDir(EmptyDirSource),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimRef {
    claim_name: String,
}

#[derive(Debug, Clone, Serialize)]
struct HostPathSource {
    path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
struct EmptyDirSource {}

// === Naming ===

/// Lowercase RFC 1123 label: `[a-z0-9-]`, no leading/trailing dash
pub fn dns_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            label.push(c.to_ascii_lowercase());
        } else if !label.ends_with('-') {
            label.push('-');
        }
    }
    let label = label.trim_matches('-');
    let label: String = label.chars().take(63).collect();
    let label = label.trim_end_matches('-').to_string();
    if label.is_empty() {
        "x".to_string()
    } else {
        label
    }
}

/// Identity of a pod-level volume
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum VolumeKey {
    Claim(String),
    Host(String),
    Scratch(String, usize),
}

/// Pod-scoped volume table
#[derive(Default)]
struct PodVolumes {
    volumes: Vec<PodVolume>,
    names: HashMap<VolumeKey, String>,
}

impl PodVolumes {
    fn name_for(&mut self, key: VolumeKey, preferred: &str, source: VolumeSource) -> String {
        if let Some(name) = self.names.get(&key) {
            return name.clone();
        }

        let base = dns_label(preferred);
        let mut name = base.clone();
        let mut n = 2;
        while self.volumes.iter().any(|v| v.name == name) {
            name = format!("{}-{}", base, n);
            n += 1;
        }

        self.volumes.push(PodVolume {
            name: name.clone(),
            source,
        });
        self.names.insert(key, name.clone());
        name
    }
}

fn host_path_basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .find(|part| !part.is_empty() && *part != ".")
        .unwrap_or("host")
}

fn is_socket_path(path: &str) -> bool {
    path.ends_with(".sock")
        || path == ROOTFUL_PODMAN_SOCKET
        || DOCKER_SOCKET_PATHS.contains(&path)
}

fn volume_mounts(service: &Service, volumes: &mut PodVolumes) -> Vec<VolumeMountRef> {
    service
        .volumes
        .iter()
        .enumerate()
        .map(|(index, mount)| {
            let source = mount.source.clone().unwrap_or_default();
            let name = match mount.kind {
                MountKind::Named => volumes.name_for(
                    VolumeKey::Claim(source.clone()),
                    &source,
                    VolumeSource::PersistentVolumeClaim(ClaimRef {
                        claim_name: source.clone(),
                    }),
                ),
                MountKind::Bind => volumes.name_for(
                    VolumeKey::Host(source.clone()),
                    host_path_basename(&source),
                    VolumeSource::HostPath(HostPathSource {
                        kind: is_socket_path(&source).then_some("Socket"),
                        path: source.clone(),
                    }),
                ),
                MountKind::Anonymous => volumes.name_for(
                    VolumeKey::Scratch(service.name.clone(), index),
                    &format!("{}-scratch-{}", service.name, index),
                    VolumeSource::EmptyDir(EmptyDirSource {}),
                ),
            };
            VolumeMountRef {
                name,
                mount_path: mount.target.clone(),
                read_only: mount.read_only,
            }
        })
        .collect()
}

fn probe(service: &Service) -> Option<Probe> {
    let healthcheck = service.healthcheck.as_ref()?;
    let command = healthcheck.exec_form()?;
    let seconds = |value: &Option<String>| value.as_deref().and_then(duration_seconds);
    Some(Probe {
        exec: ExecAction { command },
        period_seconds: seconds(&healthcheck.interval),
        timeout_seconds: seconds(&healthcheck.timeout),
        initial_delay_seconds: seconds(&healthcheck.start_period),
        failure_threshold: healthcheck.retries,
    })
}

/// Unique label with a `-2`, `-3`, ... suffix when `base` is taken
fn unique_label(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|t| t == base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let suffix = format!("-{}", n);
        let stem: String = base.chars().take(63 - suffix.len()).collect();
        let candidate = format!("{}{}", stem.trim_end_matches('-'), suffix);
        if !taken.iter().any(|t| *t == candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Container name per service, in document order; names that sanitize to
/// the same label are made unique.
fn container_names(document: &Document) -> IndexMap<String, String> {
    let mut taken: Vec<String> = Vec::new();
    let mut names = IndexMap::new();
    for service in document.services.values() {
        let base = dns_label(service.container_name.as_deref().unwrap_or(&service.name));
        let name = unique_label(&base, &taken);
        taken.push(name.clone());
        names.insert(service.name.clone(), name);
    }
    names
}

fn container(
    service: &Service,
    name: String,
    volumes: &mut PodVolumes,
) -> Result<Container, EmitError> {
    let image = service
        .image
        .clone()
        .filter(|_| service.has_image())
        .ok_or_else(|| EmitError::Invariant {
            message: format!("services.{} has no image to run", service.name),
        })?;

    let capabilities = if service.cap_add.is_empty() && service.cap_drop.is_empty() {
        None
    } else {
        Some(Capabilities {
            add: service.cap_add.clone(),
            drop: service.cap_drop.clone(),
        })
    };
    let security_context = if service.privileged || capabilities.is_some() {
        Some(SecurityContext {
            privileged: service.privileged,
            capabilities,
        })
    } else {
        None
    };

    Ok(Container {
        name,
        image,
        command: service.entrypoint.as_ref().map(|e| e.to_args()),
        args: service.command.as_ref().map(|c| c.to_args()),
        ports: service
            .ports
            .iter()
            .map(|p| ContainerPort {
                container_port: p.container,
                host_port: p.host,
                host_ip: p.host_ip.clone(),
                protocol: p.protocol.as_kube(),
            })
            .collect(),
        env: service
            .environment
            .iter()
            .map(|(name, value)| EnvVar {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        volume_mounts: volume_mounts(service, volumes),
        security_context,
        liveness_probe: probe(service),
    })
}

/// Distinct policies of long-running services; an unset restart is `no`
fn restart_policies(document: &Document, init: &[String]) -> Vec<RestartPolicy> {
    let mut policies: Vec<RestartPolicy> = Vec::new();
    for service in document.services.values() {
        if init.contains(&service.name) {
            continue;
        }
        let policy = service.restart.unwrap_or(RestartPolicy::No);
        if !policies.iter().any(|p| p.as_kube() == policy.as_kube()) {
            policies.push(policy);
        }
    }
    policies
}

fn policy_rank(kube: &str) -> u8 {
    match kube {
        "Always" => 0,
        "OnFailure" => 1,
        _ => 2,
    }
}

fn pod_restart_policy(policies: &[RestartPolicy]) -> &'static str {
    policies
        .iter()
        .map(RestartPolicy::as_kube)
        .min_by_key(|p| policy_rank(p))
        .unwrap_or("Always")
}

fn init_services(document: &Document) -> Vec<String> {
    document
        .startup
        .as_ref()
        .map(|plan| plan.run_to_completion.clone())
        .unwrap_or_default()
}

fn pod_name(document: &Document, settings: &EngineSettings) -> String {
    dns_label(document.name.as_deref().unwrap_or(&settings.pod_name))
}

impl Emitter for KubeEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Kube
    }

    fn emit(&self, document: &Document, settings: &EngineSettings) -> Result<String, EmitError> {
        let init = init_services(document);
        let names = container_names(document);
        let mut volumes = PodVolumes::default();
        let mut init_containers = Vec::new();
        let mut containers = Vec::new();

        for service in document.services_in_start_order() {
            let name = names
                .get(&service.name)
                .cloned()
                .unwrap_or_else(|| dns_label(&service.name));
            let spec = container(service, name, &mut volumes)?;
            if init.contains(&service.name) {
                init_containers.push(spec);
            } else {
                containers.push(spec);
            }
        }

        if containers.is_empty() {
            return Err(EmitError::Invariant {
                message: "a pod needs at least one long-running container".to_string(),
            });
        }

        let pod = Pod {
            api_version: "v1",
            kind: "Pod",
            metadata: Metadata {
                name: pod_name(document, settings),
            },
            spec: PodSpec {
                host_network: document
                    .services
                    .values()
                    .any(|s| s.network_mode.as_deref() == Some("host")),
                restart_policy: pod_restart_policy(&restart_policies(document, &init)),
                init_containers,
                containers,
                volumes: volumes.volumes,
            },
        };

        serde_yaml_ng::to_string(&pod).map_err(|e| EmitError::Serialization {
            message: e.to_string(),
        })
    }

    fn diagnose(&self, document: &Document, settings: &EngineSettings) -> Vec<EmitterDiagnostic> {
        let mut diagnostics = opaque_key_diagnostics(self.format(), document);

        let policies = restart_policies(document, &init_services(document));
        if policies.len() > 1 {
            let listed: Vec<String> = policies.iter().map(|p| p.to_string()).collect();
            diagnostics.push(EmitterDiagnostic::warning(format!(
                "services disagree on restart policy ({}); the pod uses {}",
                listed.join(", "),
                pod_restart_policy(&policies)
            )));
        }

        for (service, name) in container_names(document) {
            let wanted = dns_label(
                document
                    .service(&service)
                    .and_then(|s| s.container_name.as_deref())
                    .unwrap_or(service.as_str()),
            );
            if wanted != name {
                diagnostics.push(EmitterDiagnostic::warning(format!(
                    "services.{}: container name '{}' is already taken in the pod; renamed to '{}'",
                    service, wanted, name
                )));
            }
        }

        let mut host_ports: IndexMap<(u16, &'static str), &str> = IndexMap::new();
        let mut container_ports: IndexMap<(u16, &'static str), &str> = IndexMap::new();

        for service in document.services.values() {
            if !service.devices.is_empty() {
                diagnostics.push(EmitterDiagnostic::warning(format!(
                    "{}: devices have no pod manifest equivalent and were dropped",
                    service.location("devices")
                )));
            }
            if !service.labels.is_empty() {
                diagnostics.push(EmitterDiagnostic::warning(format!(
                    "{}: container labels have no pod manifest equivalent and were dropped",
                    service.location("labels")
                )));
            }
            if !service.networks.is_empty() {
                diagnostics.push(EmitterDiagnostic::warning(format!(
                    "{}: containers in one pod share its network; {} dropped",
                    service.location("networks"),
                    service.networks.join(", ")
                )));
            }
            if service.network_mode.as_deref() == Some("host") {
                diagnostics.push(EmitterDiagnostic::warning(format!(
                    "{}: host networking applies to the whole pod",
                    service.location("network_mode")
                )));
            }

            for (index, mount) in service.volumes.iter().enumerate() {
                if mount.kind != MountKind::Bind {
                    continue;
                }
                let source = mount.source.as_deref().unwrap_or_default();
                if !settings.host_path_allowed(source) {
                    diagnostics.push(EmitterDiagnostic::warning(format!(
                        "{}: host path '{}' is outside the allowed host paths; mounted as \
                         hostPath anyway",
                        service.location(&format!("volumes[{}]", index)),
                        source
                    )));
                }
            }

            for port in &service.ports {
                let protocol = port.protocol.as_kube();
                if let Some(owner) = host_ports.get(&(port.host, protocol)) {
                    diagnostics.push(EmitterDiagnostic::error(format!(
                        "host port {}/{} is published by both '{}' and '{}'",
                        port.host,
                        port.protocol,
                        owner,
                        service.name
                    )));
                } else {
                    host_ports.insert((port.host, protocol), &service.name);
                }

                match container_ports.get(&(port.container, protocol)) {
                    Some(owner) if *owner != service.name => {
                        diagnostics.push(EmitterDiagnostic::warning(format!(
                            "port {}/{} is used by both '{}' and '{}'; containers in one pod \
                             share a network namespace",
                            port.container,
                            port.protocol,
                            owner,
                            service.name
                        )));
                    }
                    Some(_) => {}
                    None => {
                        container_ports.insert((port.container, protocol), &service.name);
                    }
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StartupPlan;
    use crate::domain::ports::DiagnosticSeverity;
    use crate::domain::value_objects::{PortMapping, VolumeMount};
    use serde_yaml_ng::Value;

    fn emit(document: &Document) -> Value {
        let text = KubeEmitter::new()
            .emit(document, &EngineSettings::default())
            .unwrap();
        serde_yaml_ng::from_str(&text).unwrap()
    }

    #[test]
    fn dns_label_sanitizes() {
        assert_eq!(dns_label("My_App"), "my-app");
        assert_eq!(dns_label("--web--"), "web");
        assert_eq!(dns_label("___"), "x");
    }

    #[test]
    fn renders_pod_with_containers() {
        let doc = Document::new()
            .with_service(
                Service::new("web")
                    .with_image("nginx")
                    .with_port(PortMapping::new(8080, 80))
                    .with_env("MODE", "prod")
                    .with_restart(RestartPolicy::Always),
            )
            .with_service(Service::new("redis").with_image("redis:7"));
        let pod = emit(&doc);

        assert_eq!(pod["kind"], Value::String("Pod".into()));
        assert_eq!(pod["metadata"]["name"], Value::String("compose".into()));
        assert_eq!(pod["spec"]["restartPolicy"], Value::String("Always".into()));
        let web = &pod["spec"]["containers"][0];
        assert_eq!(web["name"], Value::String("web".into()));
        assert_eq!(web["ports"][0]["containerPort"], Value::Number(80.into()));
        assert_eq!(web["ports"][0]["hostPort"], Value::Number(8080.into()));
        assert_eq!(web["env"][0]["name"], Value::String("MODE".into()));
    }

    #[test]
    fn named_volume_shared_by_two_containers_is_declared_once() {
        let doc = Document::new()
            .with_service(
                Service::new("a")
                    .with_image("x")
                    .with_volume(VolumeMount::new("shared", "/a")),
            )
            .with_service(
                Service::new("b")
                    .with_image("x")
                    .with_volume(VolumeMount::new("shared", "/b").read_only(true)),
            );
        let pod = emit(&doc);

        let volumes = pod["spec"]["volumes"].as_sequence().unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(
            volumes[0]["persistentVolumeClaim"]["claimName"],
            Value::String("shared".into())
        );
        assert_eq!(pod["spec"]["containers"][1]["volumeMounts"][0]["readOnly"], Value::Bool(true));
    }

    #[test]
    fn clashing_volume_names_get_suffix() {
        let doc = Document::new().with_service(
            Service::new("web")
                .with_image("nginx")
                .with_volume(VolumeMount::new("data", "/named"))
                .with_volume(VolumeMount::new("/srv/data", "/bound")),
        );
        let pod = emit(&doc);

        let names: Vec<_> = pod["spec"]["volumes"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["data", "data-2"]);
    }

    #[test]
    fn socket_bind_is_typed_socket() {
        let doc = Document::new().with_service(
            Service::new("agent")
                .with_image("agent")
                .with_volume(VolumeMount::new("/run/podman/podman.sock", "/run/podman/podman.sock")),
        );
        let pod = emit(&doc);
        assert_eq!(
            pod["spec"]["volumes"][0]["hostPath"]["type"],
            Value::String("Socket".into())
        );
    }

    #[test]
    fn completion_dependencies_become_init_containers() {
        let mut doc = Document::new()
            .with_service(Service::new("web").with_image("app"))
            .with_service(Service::new("migrate").with_image("app"));
        doc.startup = Some(StartupPlan {
            order: vec!["migrate".into(), "web".into()],
            run_to_completion: vec!["migrate".into()],
            ..Default::default()
        });
        let pod = emit(&doc);
        assert_eq!(pod["spec"]["initContainers"][0]["name"], Value::String("migrate".into()));
        assert_eq!(pod["spec"]["containers"].as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn document_name_becomes_pod_name() {
        let mut doc = Document::new().with_service(Service::new("web").with_image("nginx"));
        doc.name = Some("Shop_Front".into());
        assert_eq!(emit(&doc)["metadata"]["name"], Value::String("shop-front".into()));
    }

    #[test]
    fn disagreeing_restart_policies_pick_always_and_warn() {
        let doc = Document::new()
            .with_service(Service::new("a").with_image("x").with_restart(RestartPolicy::No))
            .with_service(Service::new("b").with_image("x").with_restart(RestartPolicy::Always));
        assert_eq!(emit(&doc)["spec"]["restartPolicy"], Value::String("Always".into()));

        let diagnostics = KubeEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert!(diagnostics.iter().any(|d| d.message.contains("restart policy")));
    }

    #[test]
    fn no_restart_anywhere_means_never() {
        let doc = Document::new().with_service(Service::new("once").with_image("busybox"));
        assert_eq!(emit(&doc)["spec"]["restartPolicy"], Value::String("Never".into()));
        assert!(KubeEmitter::new()
            .diagnose(&doc, &EngineSettings::default())
            .is_empty());
    }

    #[test]
    fn unset_restart_counts_as_no_when_policies_disagree() {
        let doc = Document::new()
            .with_service(Service::new("job").with_image("busybox"))
            .with_service(Service::new("web").with_image("nginx").with_restart(RestartPolicy::Always));
        assert_eq!(emit(&doc)["spec"]["restartPolicy"], Value::String("Always".into()));

        let diagnostics = KubeEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert!(diagnostics
            .iter()
            .any(|d| d.message.contains("restart policy (no, always)")));
    }

    #[test]
    fn container_names_that_sanitize_alike_are_made_unique() {
        let doc = Document::new()
            .with_service(Service::new("web_1").with_image("nginx"))
            .with_service(Service::new("web-1").with_image("httpd"));
        let pod = emit(&doc);

        let names: Vec<_> = pod["spec"]["containers"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["web-1", "web-1-2"]);

        let diagnostics = KubeEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert!(diagnostics[0].message.contains("renamed to 'web-1-2'"));
    }

    #[test]
    fn duplicate_host_port_is_error_diagnostic() {
        let doc = Document::new()
            .with_service(Service::new("a").with_image("x").with_port(PortMapping::new(8080, 80)))
            .with_service(Service::new("b").with_image("y").with_port(PortMapping::new(8080, 81)));
        let diagnostics = KubeEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert!(diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error && d.message.contains("8080")));
    }

    #[test]
    fn host_path_outside_allowlist_warns() {
        let doc = Document::new().with_service(
            Service::new("web")
                .with_image("nginx")
                .with_volume(VolumeMount::new("/etc/ssl", "/certs")),
        );
        let diagnostics = KubeEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert!(diagnostics[0].message.contains("/etc/ssl"));
    }
}
