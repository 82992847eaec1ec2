//! Volume rule - name anonymous volumes and declare implicit named volumes

use std::collections::HashSet;

use crate::domain::entities::{Change, Document, VolumeDef};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::value_objects::{EngineSettings, MountKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeRule;

/// Named-volume sources mounted by any service, declared or not
fn mounted_volume_names(document: &Document) -> HashSet<String> {
    document
        .services
        .values()
        .flat_map(|service| service.volumes.iter())
        .filter(|mount| mount.kind == MountKind::Named)
        .filter_map(|mount| mount.source.clone())
        .collect()
}

/// `<service>-<index>`, suffixed until it clashes with neither a declared
/// volume nor a named volume some service mounts
fn anonymous_volume_name(
    document: &Document,
    mounted: &HashSet<String>,
    service: &str,
    index: usize,
) -> String {
    let taken = |name: &str| document.volumes.contains_key(name) || mounted.contains(name);
    let base = format!("{}-{}", service, index);
    if !taken(&base) {
        return base;
    }
    let mut candidate = format!("{}-anon", base);
    let mut n = 2;
    while taken(&candidate) {
        candidate = format!("{}-anon{}", base, n);
        n += 1;
    }
    candidate
}

impl Rule for VolumeRule {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn description(&self) -> &'static str {
        "Give anonymous volumes stable names and declare volumes used without a declaration"
    }

    fn apply(&self, document: &mut Document, _settings: &EngineSettings, report: &mut RuleReport) {
        let service_names: Vec<String> = document.services.keys().cloned().collect();
        let mounted = mounted_volume_names(document);

        for name in service_names {
            let mount_count = document.services[&name].volumes.len();
            for index in 0..mount_count {
                let mount = &document.services[&name].volumes[index];
                let location = format!("services.{}.volumes[{}]", name, index);

                match mount.kind {
                    MountKind::Anonymous => {
                        let original = mount.to_string();
                        let volume = anonymous_volume_name(document, &mounted, &name, index);
                        document.volumes.insert(volume.clone(), VolumeDef::new(volume.clone()));

                        let Some(service) = document.services.get_mut(&name) else {
                            continue;
                        };
                        let mount = &mut service.volumes[index];
                        mount.source = Some(volume);
                        mount.kind = MountKind::Named;
                        report.change(Change::added(
                            location,
                            mount.to_string(),
                            format!(
                                "anonymous volume at {} given a stable name; its data now \
                                 survives container recreation",
                                original
                            ),
                        ));
                    }
                    MountKind::Named => {
                        let Some(volume) = mount.source.clone() else {
                            continue;
                        };
                        if document.volumes.contains_key(&volume) {
                            continue;
                        }
                        let declared_at = format!("volumes.{}", volume);
                        report.change(Change::added(
                            declared_at.clone(),
                            volume.clone(),
                            format!("volume used by {} was not declared", location),
                        ));
                        report.warn(format!(
                            "{}: auto-declared with the local driver",
                            declared_at
                        ));
                        document.volumes.insert(volume.clone(), VolumeDef::new(volume));
                    }
                    MountKind::Bind => {}
                }
            }
        }
    }
}
