//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ConfigWarning, OutputFormat};
use crate::error::{PodshiftError, PodshiftResult};

use super::types::Config;

/// Project configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "podshift.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PodshiftResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PodshiftError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit file, then `podshift.toml` in the project root, then the user
/// config file, then defaults. Environment overrides are applied on top.
///
/// An explicit file that cannot be read is an error; a missing project or
/// user file is not.
pub fn load_layered(
    explicit: Option<&Path>,
    project_root: &Path,
) -> PodshiftResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = project_root.join(PROJECT_CONFIG_FILE);
            if project.exists() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.exists())
            }
        }
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// `<config dir>/podshift/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("podshift").join("config.toml"))
}

/// Apply environment variable overrides (PODSHIFT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // PODSHIFT_FORMAT
    if let Some(format) = get_env("PODSHIFT_FORMAT") {
        match format.parse::<OutputFormat>() {
            Ok(format) => config.output.format = format,
            Err(err) => tracing::warn!(%err, "ignoring PODSHIFT_FORMAT"),
        }
    }

    // PODSHIFT_PODMAN_SOCKET
    if let Some(socket) = get_env("PODSHIFT_PODMAN_SOCKET").filter(|s| !s.trim().is_empty()) {
        config.podman.socket_path = socket;
    }

    // PODSHIFT_ROOTLESS
    if let Some(val) = get_env("PODSHIFT_ROOTLESS") {
        config.podman.rootless = val.to_lowercase() != "false" && val != "0";
    }

    // PODSHIFT_POD_NAME
    if let Some(name) = get_env("PODSHIFT_POD_NAME").filter(|s| !s.trim().is_empty()) {
        config.kube.pod_name = name;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output",
        "format",
        "podman",
        "socket_path",
        "rootless",
        "quadlet",
        "wanted_by",
        "kube",
        "pod_name",
        "host_path_allowlist",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
