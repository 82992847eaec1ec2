//! Unsupported-keys rule - remove Compose keys no Podman target can honor

use crate::domain::entities::{Change, Document};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::value_objects::EngineSettings;

use super::render_value;

/// Service keys that are removed with a warning
pub const UNSUPPORTED_KEYS: &[&str] = &[
    "deploy",
    "profiles",
    "extends",
    "links",
    "external_links",
    "scale",
];

/// Strips `build` and swarm/orchestration keys.
///
/// A service left without an image is a blocking error: there is nothing
/// to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedKeysRule;

fn unsupported_reason(key: &str) -> &'static str {
    match key {
        "deploy" => "swarm deployment settings are not supported by Podman targets",
        "profiles" => "profiles are not supported; the service is always included",
        "extends" => "extends is not resolved; inline the shared settings",
        "links" | "external_links" => "links are not supported; services reach each other by name",
        "scale" => "scale is not supported; one container per service is generated",
        _ => "key is not supported by Podman targets",
    }
}

impl Rule for UnsupportedKeysRule {
    fn name(&self) -> &'static str {
        "unsupported-keys"
    }

    fn description(&self) -> &'static str {
        "Remove build, deploy, profiles and other keys Podman targets cannot express"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn apply(&self, document: &mut Document, _settings: &EngineSettings, report: &mut RuleReport) {
        for service in document.services.values_mut() {
            if let Some(build) = service.build.take() {
                let location = service.location("build");
                if service.has_image() {
                    report.change(Change::warning(
                        location,
                        render_value(&build),
                        format!(
                            "build is not supported; the prebuilt image '{}' is used",
                            service.image.as_deref().unwrap_or_default()
                        ),
                    ));
                } else {
                    report.change(Change::removed(
                        location,
                        render_value(&build),
                        "build is not supported and the service declares no image",
                    ));
                    report.error(format!(
                        "services.{}: declares 'build' without an 'image'; build and push \
                         the image, then reference it with 'image'",
                        service.name
                    ));
                }
            }

            for key in UNSUPPORTED_KEYS {
                if let Some(value) = service.extras.shift_remove(*key) {
                    report.change(Change::warning(
                        service.location(key),
                        render_value(&value),
                        unsupported_reason(key),
                    ));
                }
            }
        }
    }
}
