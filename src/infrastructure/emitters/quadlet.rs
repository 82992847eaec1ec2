//! Quadlet emitter
//!
//! One `.container` unit per service, in document order, each preceded by a
//! `# --- <name>.container ---` delimiter. Services sharing a network
//! namespace are grouped under a `.pod` unit emitted ahead of them.

use std::fmt::Write as _;

use crate::domain::entities::{Document, Service, ServiceOrdering};
use crate::domain::ports::{opaque_key_diagnostics, EmitError, Emitter, EmitterDiagnostic};
use crate::domain::value_objects::{
    CommandLine, EngineSettings, Healthcheck, MountKind, OutputFormat, RestartPolicy,
};

use super::escaping::{command_line, environment_assignment, escape_specifiers, quote_word};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuadletEmitter;

impl QuadletEmitter {
    pub fn new() -> Self {
        Self
    }
}

/// Delimiter line that opens each unit block
pub fn block_delimiter(unit: &str) -> String {
    format!("# --- {} ---", unit)
}

/// Unit text under construction
///
/// `writeln!` into a `String` cannot fail, so results are discarded.
/// A value with a raw line break would start a new directive, so the first
/// such key is remembered and `finish` refuses the unit.
struct UnitWriter {
    unit: String,
    out: String,
    broken: Option<String>,
}

impl UnitWriter {
    fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            out: format!("{}\n", block_delimiter(unit)),
            broken: None,
        }
    }

    fn section(&mut self, name: &str) {
        if !self.out.ends_with("---\n") {
            self.out.push('\n');
        }
        let _ = writeln!(self.out, "[{}]", name);
    }

    fn entry(&mut self, key: &str, value: impl AsRef<str>) {
        let value = value.as_ref();
        if self.broken.is_none() && value.contains(['\n', '\r']) {
            self.broken = Some(key.to_string());
        }
        let _ = writeln!(self.out, "{}={}", key, value);
    }

    fn finish(self) -> Result<String, EmitError> {
        match self.broken {
            Some(key) => Err(EmitError::Invariant {
                message: format!("{}: {}= value contains a line break", self.unit, key),
            }),
            None => Ok(self.out),
        }
    }
}

fn unit_ordering(document: &Document, service: &Service) -> ServiceOrdering {
    if let Some(ordering) = document
        .startup
        .as_ref()
        .and_then(|plan| plan.ordering(&service.name))
    {
        return ordering.clone();
    }

    let mut ordering = ServiceOrdering::default();
    for dep in &service.depends_on {
        ordering.after.push(dep.service.clone());
        if dep.required {
            ordering.requires.push(dep.service.clone());
        } else {
            ordering.wants.push(dep.service.clone());
        }
    }
    ordering
}

fn runs_to_completion(document: &Document, service: &str) -> bool {
    document
        .startup
        .as_ref()
        .is_some_and(|plan| plan.run_to_completion.iter().any(|s| s == service))
}

/// Compose splits string-form commands into words itself, so both forms
/// reach `Exec=` as a quoted argument list.
fn exec_value(command: &CommandLine) -> String {
    command_line(&command.to_args())
}

/// `Entrypoint=` takes a single string; multi-word entrypoints use the
/// JSON array form Podman accepts.
fn entrypoint_value(entrypoint: &CommandLine) -> Result<String, EmitError> {
    let args = entrypoint.to_args();
    if args.len() == 1 {
        return Ok(quote_word(&args[0]));
    }
    let json = serde_json::to_string(&args).map_err(|e| EmitError::Serialization {
        message: e.to_string(),
    })?;
    Ok(escape_specifiers(&json))
}

fn write_healthcheck(unit: &mut UnitWriter, healthcheck: &Healthcheck) -> Result<(), EmitError> {
    if healthcheck.is_disabled() {
        unit.entry("HealthCmd", "none");
        return Ok(());
    }
    match healthcheck.test.split_first() {
        Some((kind, rest)) if kind == "CMD" && !rest.is_empty() => {
            let json = serde_json::to_string(rest).map_err(|e| EmitError::Serialization {
                message: e.to_string(),
            })?;
            unit.entry("HealthCmd", escape_specifiers(&json));
        }
        Some((kind, rest)) if kind == "CMD-SHELL" && !rest.is_empty() => {
            let script = rest.join(" ");
            if script.contains(['\n', '\r']) {
                // multi-line scripts go through the JSON form, which escapes them
                let args = ["/bin/sh", "-c", script.as_str()];
                let json = serde_json::to_string(&args).map_err(|e| EmitError::Serialization {
                    message: e.to_string(),
                })?;
                unit.entry("HealthCmd", escape_specifiers(&json));
            } else {
                unit.entry("HealthCmd", escape_specifiers(&script));
            }
        }
        _ => return Ok(()),
    }
    if let Some(interval) = &healthcheck.interval {
        unit.entry("HealthInterval", interval);
    }
    if let Some(timeout) = &healthcheck.timeout {
        unit.entry("HealthTimeout", timeout);
    }
    if let Some(retries) = healthcheck.retries {
        unit.entry("HealthRetries", retries.to_string());
    }
    if let Some(start_period) = &healthcheck.start_period {
        unit.entry("HealthStartPeriod", start_period);
    }
    Ok(())
}

/// Network settings owned by the unit itself (not by a pod)
fn network_entries(service: &Service) -> Vec<String> {
    match service.network_mode.as_deref() {
        Some(mode) if mode.starts_with("service:") => Vec::new(),
        Some(mode) => vec![mode.to_string()],
        None => service.networks.clone(),
    }
}

fn container_block(
    document: &Document,
    service: &Service,
    pod: Option<&str>,
    settings: &EngineSettings,
) -> Result<String, EmitError> {
    let image = service
        .image
        .as_deref()
        .filter(|_| service.has_image())
        .ok_or_else(|| EmitError::Invariant {
            message: format!("services.{} has no image to run", service.name),
        })?;

    let mut unit = UnitWriter::new(&format!("{}.container", service.name));

    unit.section("Unit");
    unit.entry("Description", format!("{} container", service.name));
    let ordering = unit_ordering(document, service);
    let as_units = |names: &[String]| {
        names
            .iter()
            .map(|n| format!("{}.service", n))
            .collect::<Vec<_>>()
            .join(" ")
    };
    if !ordering.after.is_empty() {
        unit.entry("After", as_units(&ordering.after));
    }
    if !ordering.requires.is_empty() {
        unit.entry("Requires", as_units(&ordering.requires));
    }
    if !ordering.wants.is_empty() {
        unit.entry("Wants", as_units(&ordering.wants));
    }
    if let Some(RestartPolicy::OnFailure {
        max_retries: Some(n),
    }) = service.restart
    {
        unit.entry("StartLimitBurst", n.to_string());
    }

    unit.section("Container");
    unit.entry("Image", escape_specifiers(image));
    let container_name = service.container_name.as_deref().unwrap_or(&service.name);
    unit.entry("ContainerName", escape_specifiers(container_name));

    match pod {
        Some(pod) => unit.entry("Pod", format!("{}.pod", pod)),
        None => {
            for network in network_entries(service) {
                unit.entry("Network", escape_specifiers(&network));
            }
            for port in &service.ports {
                unit.entry("PublishPort", port.to_string());
            }
        }
    }

    for mount in &service.volumes {
        let value = match mount.kind {
            MountKind::Anonymous => match mount.mode() {
                Some(mode) => format!("{}:{}", mount.target, mode),
                None => mount.target.clone(),
            },
            MountKind::Named | MountKind::Bind => mount.to_string(),
        };
        unit.entry("Volume", escape_specifiers(&value));
    }

    for (key, value) in &service.environment {
        unit.entry("Environment", environment_assignment(key, value));
    }
    for (key, value) in &service.labels {
        unit.entry("Label", environment_assignment(key, value));
    }
    if !service.cap_add.is_empty() {
        unit.entry("AddCapability", service.cap_add.join(" "));
    }
    if !service.cap_drop.is_empty() {
        unit.entry("DropCapability", service.cap_drop.join(" "));
    }
    for device in &service.devices {
        unit.entry("AddDevice", escape_specifiers(device));
    }
    if service.privileged {
        unit.entry("PodmanArgs", "--privileged");
    }
    if let Some(healthcheck) = &service.healthcheck {
        write_healthcheck(&mut unit, healthcheck)?;
    }
    if let Some(entrypoint) = &service.entrypoint {
        unit.entry("Entrypoint", entrypoint_value(entrypoint)?);
    }
    if let Some(command) = &service.command {
        unit.entry("Exec", exec_value(command));
    }

    unit.section("Service");
    if runs_to_completion(document, &service.name) {
        unit.entry("Type", "oneshot");
        unit.entry("RemainAfterExit", "yes");
    } else if let Some(restart) = service.restart {
        unit.entry("Restart", restart.as_systemd());
    }

    unit.section("Install");
    unit.entry("WantedBy", &settings.wanted_by);

    unit.finish()
}

/// `.pod` unit for a namespace group; the pod owns ports and networks
fn pod_block(
    document: &Document,
    group: &[String],
    settings: &EngineSettings,
) -> Result<String, EmitError> {
    let root = &group[0];
    let mut unit = UnitWriter::new(&format!("{}.pod", root));

    unit.section("Unit");
    unit.entry(
        "Description",
        format!("{} pod ({})", root, group.join(", ")),
    );

    unit.section("Pod");
    unit.entry("PodName", escape_specifiers(root));
    if let Some(owner) = document.service(root) {
        for network in network_entries(owner) {
            unit.entry("Network", escape_specifiers(&network));
        }
    }
    for member in group {
        if let Some(service) = document.service(member) {
            for port in &service.ports {
                unit.entry("PublishPort", port.to_string());
            }
        }
    }

    unit.section("Install");
    unit.entry("WantedBy", &settings.wanted_by);
    unit.finish()
}

impl Emitter for QuadletEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Quadlet
    }

    fn emit(&self, document: &Document, settings: &EngineSettings) -> Result<String, EmitError> {
        let groups = document.namespace_groups();
        let mut blocks = Vec::with_capacity(document.services.len() + groups.len());

        for group in &groups {
            blocks.push(pod_block(document, group, settings)?);
        }

        for service in document.services.values() {
            let pod = groups
                .iter()
                .find(|group| group.contains(&service.name))
                .map(|group| group[0].as_str());
            blocks.push(container_block(document, service, pod, settings)?);
        }

        Ok(blocks.join("\n"))
    }

    fn diagnose(&self, document: &Document, _settings: &EngineSettings) -> Vec<EmitterDiagnostic> {
        let mut diagnostics = opaque_key_diagnostics(self.format(), document);

        for service in document.services.values() {
            for (index, mount) in service.volumes.iter().enumerate() {
                let relative = mount.kind == MountKind::Bind
                    && mount
                        .source
                        .as_deref()
                        .is_some_and(|s| s.starts_with('.'));
                if relative {
                    diagnostics.push(EmitterDiagnostic::warning(format!(
                        "{}: relative host path is resolved against the unit file directory",
                        service.location(&format!("volumes[{}]", index))
                    )));
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ServiceOrdering, StartupPlan};
    use crate::domain::value_objects::{Dependency, Healthcheck, PortMapping, VolumeMount};

    fn emit(document: &Document) -> String {
        QuadletEmitter::new()
            .emit(document, &EngineSettings::default())
            .unwrap()
    }

    #[test]
    fn one_block_per_service_in_document_order() {
        let doc = Document::new()
            .with_service(Service::new("web").with_image("nginx"))
            .with_service(Service::new("db").with_image("postgres"));
        let out = emit(&doc);

        let web = out.find("# --- web.container ---").unwrap();
        let db = out.find("# --- db.container ---").unwrap();
        assert!(web < db);
        assert_eq!(out.matches("[Container]").count(), 2);
    }

    #[test]
    fn maps_fields_to_directives() {
        let doc = Document::new().with_service(
            Service::new("web")
                .with_image("nginx")
                .with_port(PortMapping::new(8080, 80))
                .with_volume(VolumeMount::new("web-data", "/srv").read_only(true))
                .with_env("GREETING", "hello world")
                .with_restart(RestartPolicy::Always),
        );
        let out = emit(&doc);

        assert!(out.contains("Image=nginx\n"));
        assert!(out.contains("PublishPort=8080:80\n"));
        assert!(out.contains("Volume=web-data:/srv:ro\n"));
        assert!(out.contains("Environment=\"GREETING=hello world\"\n"));
        assert!(out.contains("Restart=always\n"));
        assert!(out.contains("WantedBy=default.target\n"));
    }

    #[test]
    fn ordering_hints_become_unit_dependencies() {
        let mut doc = Document::new()
            .with_service(
                Service::new("web")
                    .with_image("app")
                    .with_dependency(Dependency::new("db"))
                    .with_dependency(Dependency::new("cache").optional()),
            )
            .with_service(Service::new("db").with_image("postgres"))
            .with_service(Service::new("cache").with_image("redis"));
        let mut plan = StartupPlan::default();
        plan.services.insert(
            "web".into(),
            ServiceOrdering {
                after: vec!["db".into(), "cache".into()],
                requires: vec!["db".into()],
                wants: vec!["cache".into()],
            },
        );
        doc.startup = Some(plan);
        let out = emit(&doc);

        assert!(out.contains("After=db.service cache.service\n"));
        assert!(out.contains("Requires=db.service\n"));
        assert!(out.contains("Wants=cache.service\n"));
    }

    #[test]
    fn on_failure_retries_limit_start_burst() {
        let doc = Document::new().with_service(
            Service::new("job")
                .with_image("busybox")
                .with_restart(RestartPolicy::OnFailure {
                    max_retries: Some(5),
                }),
        );
        let out = emit(&doc);
        assert!(out.contains("StartLimitBurst=5\n"));
        assert!(out.contains("Restart=on-failure\n"));
    }

    #[test]
    fn shared_namespace_emits_pod_header() {
        let mut sidecar = Service::new("proxy").with_image("envoy");
        sidecar.network_mode = Some("service:web".into());
        let doc = Document::new()
            .with_service(
                Service::new("web")
                    .with_image("nginx")
                    .with_port(PortMapping::new(8080, 80)),
            )
            .with_service(sidecar);
        let out = emit(&doc);

        assert!(out.starts_with("# --- web.pod ---\n"));
        assert!(out.contains("[Pod]\nPodName=web\nPublishPort=8080:80\n"));
        assert_eq!(out.matches("Pod=web.pod\n").count(), 2);
    }

    #[test]
    fn no_pod_header_without_sharing() {
        let doc = Document::new()
            .with_service(Service::new("a").with_image("x"))
            .with_service(Service::new("b").with_image("y"));
        assert!(!emit(&doc).contains("[Pod]"));
    }

    #[test]
    fn exec_healthcheck_is_json_array() {
        let mut service = Service::new("web").with_image("nginx");
        service.healthcheck = Some(Healthcheck {
            test: vec!["CMD".into(), "curl".into(), "-f".into(), "http://localhost".into()],
            interval: Some("30s".into()),
            ..Default::default()
        });
        let out = emit(&Document::new().with_service(service));
        assert!(out.contains("HealthCmd=[\"curl\",\"-f\",\"http://localhost\"]\n"));
        assert!(out.contains("HealthInterval=30s\n"));
    }

    #[test]
    fn multi_line_shell_command_stays_one_directive() {
        let mut service = Service::new("web").with_image("nginx");
        service.command = Some(CommandLine::Shell(
            "sh -c 'echo hi'\n[Service]\nExecStartPre=/bin/evil\n".into(),
        ));
        let out = emit(&Document::new().with_service(service));

        assert!(out.contains("Exec=sh -c \"echo hi\" [Service] ExecStartPre=/bin/evil\n"));
        assert_eq!(out.lines().filter(|l| *l == "[Service]").count(), 1);
        assert!(!out.lines().any(|l| l.starts_with("ExecStartPre=")));
    }

    #[test]
    fn multi_line_shell_healthcheck_uses_json_form() {
        let mut service = Service::new("web").with_image("nginx");
        service.healthcheck = Some(Healthcheck {
            test: vec!["CMD-SHELL".into(), "test -f /a\ntest -f /b".into()],
            ..Default::default()
        });
        let out = emit(&Document::new().with_service(service));
        assert!(out.contains("HealthCmd=[\"/bin/sh\",\"-c\",\"test -f /a\\ntest -f /b\"]\n"));
    }

    #[test]
    fn raw_line_break_in_a_value_is_refused() {
        let doc = Document::new().with_service(Service::new("web").with_image("nginx\n[Install]"));
        let err = QuadletEmitter::new()
            .emit(&doc, &EngineSettings::default())
            .unwrap_err();
        assert!(matches!(err, EmitError::Invariant { .. }));
        assert!(err.to_string().contains("Image="));
    }

    #[test]
    fn missing_image_is_invariant_error() {
        let doc = Document::new().with_service(Service::new("app"));
        let err = QuadletEmitter::new()
            .emit(&doc, &EngineSettings::default())
            .unwrap_err();
        assert!(matches!(err, EmitError::Invariant { .. }));
    }

    #[test]
    fn relative_bind_is_diagnosed() {
        let doc = Document::new().with_service(
            Service::new("web")
                .with_image("nginx")
                .with_volume(VolumeMount::new("./conf", "/etc/nginx/conf.d")),
        );
        let diagnostics = QuadletEmitter::new().diagnose(&doc, &EngineSettings::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("services.web.volumes[0]"));
    }
}
