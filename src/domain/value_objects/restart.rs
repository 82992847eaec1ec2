//! Restart policy value object

use std::fmt;

/// Container restart policy as declared in Compose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestartPolicy {
    No,
    Always,
    /// Restart on non-zero exit, optionally bounded by a retry count
    OnFailure { max_retries: Option<u32> },
    UnlessStopped,
}

impl RestartPolicy {
    /// Parse the Compose spelling (`no`, `always`, `on-failure[:N]`, `unless-stopped`)
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            "no" => return Some(RestartPolicy::No),
            "always" => return Some(RestartPolicy::Always),
            "unless-stopped" => return Some(RestartPolicy::UnlessStopped),
            "on-failure" => return Some(RestartPolicy::OnFailure { max_retries: None }),
            _ => {}
        }

        let retries = value.strip_prefix("on-failure:")?;
        retries
            .parse::<u32>()
            .ok()
            .map(|n| RestartPolicy::OnFailure {
                max_retries: Some(n),
            })
    }

    /// The systemd `Restart=` value closest to this policy
    pub fn as_systemd(&self) -> &'static str {
        match self {
            RestartPolicy::No => "no",
            RestartPolicy::Always | RestartPolicy::UnlessStopped => "always",
            RestartPolicy::OnFailure { .. } => "on-failure",
        }
    }

    /// The pod manifest `restartPolicy` value closest to this policy
    pub fn as_kube(&self) -> &'static str {
        match self {
            RestartPolicy::No => "Never",
            RestartPolicy::Always | RestartPolicy::UnlessStopped => "Always",
            RestartPolicy::OnFailure { .. } => "OnFailure",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::No => f.write_str("no"),
            RestartPolicy::Always => f.write_str("always"),
            RestartPolicy::UnlessStopped => f.write_str("unless-stopped"),
            RestartPolicy::OnFailure { max_retries: None } => f.write_str("on-failure"),
            RestartPolicy::OnFailure {
                max_retries: Some(n),
            } => write!(f, "on-failure:{}", n),
        }
    }
}
