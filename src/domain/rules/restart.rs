//! Restart rule - map `unless-stopped` onto `always`

use crate::domain::entities::{Change, Document};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::value_objects::{EngineSettings, RestartPolicy};

#[derive(Debug, Clone, Copy, Default)]
pub struct RestartRule;

impl Rule for RestartRule {
    fn name(&self) -> &'static str {
        "restart"
    }

    fn description(&self) -> &'static str {
        "Map unless-stopped onto always; systemd and pods have no manual-stop memory"
    }

    fn apply(&self, document: &mut Document, _settings: &EngineSettings, report: &mut RuleReport) {
        for service in document.services.values_mut() {
            if service.restart != Some(RestartPolicy::UnlessStopped) {
                continue;
            }
            service.restart = Some(RestartPolicy::Always);

            let location = service.location("restart");
            report.change(Change::modified(
                location.clone(),
                RestartPolicy::UnlessStopped.to_string(),
                RestartPolicy::Always.to_string(),
                "Podman units do not remember a manual stop; always is the closest policy",
            ));
            report.warn(format!(
                "{}: unless-stopped approximated as always; a stopped container restarts \
                 after reboot",
                location
            ));
        }
    }
}
