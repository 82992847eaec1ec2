//! Socket rule - relocate Docker control-socket mounts onto Podman's socket

use crate::domain::entities::{Change, Document};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::value_objects::{CommandLine, EngineSettings, MountKind};

/// Paths the Docker daemon serves its API on
pub const DOCKER_SOCKET_PATHS: &[&str] = &["/var/run/docker.sock", "/run/docker.sock"];

/// Where the Podman socket is mounted inside containers
pub const CONTAINER_SOCKET_PATH: &str = "/run/podman/podman.sock";

pub const SOCKET_REASON: &str = "docker.sock has no direct Podman equivalent under rootless mode";

const DOCKER_HOST: &str = "DOCKER_HOST";

/// Rewrites bind mounts of the Docker socket, and any environment value,
/// label, command, entrypoint or healthcheck argument naming it, so no
/// Docker socket path survives translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketRule;

fn is_docker_socket(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    DOCKER_SOCKET_PATHS.contains(&trimmed)
}

fn replace_docker_socket(value: &str, replacement: &str) -> Option<String> {
    if !DOCKER_SOCKET_PATHS.iter().any(|p| value.contains(p)) {
        return None;
    }
    // `/var/run/docker.sock` must go first; it contains `/run/docker.sock`
    Some(
        DOCKER_SOCKET_PATHS
            .iter()
            .fold(value.to_string(), |acc, path| acc.replace(path, replacement)),
    )
}

/// Rewrites every argument naming the Docker socket; true if any changed
fn rewrite_args(args: &mut [String]) -> bool {
    let mut changed = false;
    for arg in args.iter_mut() {
        if let Some(rewritten) = replace_docker_socket(arg, CONTAINER_SOCKET_PATH) {
            *arg = rewritten;
            changed = true;
        }
    }
    changed
}

fn rewrite_command(line: &mut CommandLine) -> bool {
    match line {
        CommandLine::Shell(text) => match replace_docker_socket(text, CONTAINER_SOCKET_PATH) {
            Some(rewritten) => {
                *text = rewritten;
                true
            }
            None => false,
        },
        CommandLine::Exec(args) => rewrite_args(args),
    }
}

impl Rule for SocketRule {
    fn name(&self) -> &'static str {
        "socket"
    }

    fn description(&self) -> &'static str {
        "Replace Docker control-socket mounts with the Podman socket"
    }

    fn apply(&self, document: &mut Document, settings: &EngineSettings, report: &mut RuleReport) {
        let host_socket = settings.podman_socket.as_str();

        for service in document.services.values_mut() {
            let mut relocated_in_container = false;

            for index in 0..service.volumes.len() {
                let mount = &service.volumes[index];
                let source_matches = mount.kind == MountKind::Bind
                    && mount.source.as_deref().is_some_and(is_docker_socket);
                if !source_matches {
                    continue;
                }

                let location = service.location(&format!("volumes[{}]", index));
                let original = mount.to_string();
                let mount = &mut service.volumes[index];
                mount.source = Some(host_socket.to_string());
                if is_docker_socket(&mount.target) {
                    mount.target = CONTAINER_SOCKET_PATH.to_string();
                    relocated_in_container = true;
                }

                report.change(Change::modified(
                    location.clone(),
                    original,
                    mount.to_string(),
                    SOCKET_REASON,
                ));

                if settings.rootless && !settings.socket_is_rootless() {
                    report.warn(format!(
                        "{}: {} is the rootful Podman socket; rootless Podman serves it under \
                         $XDG_RUNTIME_DIR (set podman.socket_path to match the target host)",
                        location, host_socket
                    ));
                }
            }

            // A stray bind of the socket into some other path still leaks
            // the Docker path through the target; fix those too.
            for index in 0..service.volumes.len() {
                if is_docker_socket(&service.volumes[index].target) {
                    let location = service.location(&format!("volumes[{}]", index));
                    let original = service.volumes[index].to_string();
                    service.volumes[index].target = CONTAINER_SOCKET_PATH.to_string();
                    relocated_in_container = true;
                    report.change(Change::modified(
                        location,
                        original,
                        service.volumes[index].to_string(),
                        SOCKET_REASON,
                    ));
                }
            }

            let keys: Vec<String> = service.environment.keys().cloned().collect();
            for key in keys {
                let Some(value) = service.environment.get(&key) else {
                    continue;
                };
                if let Some(rewritten) = replace_docker_socket(value, CONTAINER_SOCKET_PATH) {
                    report.change(Change::modified(
                        service.location(&format!("environment.{}", key)),
                        value.clone(),
                        rewritten.clone(),
                        SOCKET_REASON,
                    ));
                    service.environment.insert(key, rewritten);
                }
            }

            let label_keys: Vec<String> = service.labels.keys().cloned().collect();
            for key in label_keys {
                let Some(value) = service.labels.get(&key) else {
                    continue;
                };
                if let Some(rewritten) = replace_docker_socket(value, CONTAINER_SOCKET_PATH) {
                    report.change(Change::modified(
                        service.location(&format!("labels.{}", key)),
                        value.clone(),
                        rewritten.clone(),
                        SOCKET_REASON,
                    ));
                    service.labels.insert(key, rewritten);
                }
            }

            for field in ["command", "entrypoint"] {
                let slot = if field == "command" {
                    &mut service.command
                } else {
                    &mut service.entrypoint
                };
                let Some(line) = slot.as_mut() else {
                    continue;
                };
                let original = line.to_line();
                if rewrite_command(line) {
                    let rewritten = line.to_line();
                    report.change(Change::modified(
                        format!("services.{}.{}", service.name, field),
                        original,
                        rewritten,
                        SOCKET_REASON,
                    ));
                }
            }

            if let Some(healthcheck) = service.healthcheck.as_mut() {
                let original = healthcheck.test.join(" ");
                if rewrite_args(&mut healthcheck.test) {
                    let rewritten = healthcheck.test.join(" ");
                    report.change(Change::modified(
                        format!("services.{}.healthcheck.test", service.name),
                        original,
                        rewritten,
                        SOCKET_REASON,
                    ));
                }
            }

            if relocated_in_container && !service.environment.contains_key(DOCKER_HOST) {
                let value = format!("unix://{}", CONTAINER_SOCKET_PATH);
                report.change(Change::added(
                    service.location(&format!("environment.{}", DOCKER_HOST)),
                    value.clone(),
                    "Docker clients inside the container need the relocated socket path",
                ));
                service.environment.insert(DOCKER_HOST.to_string(), value);
            }
        }
    }
}
