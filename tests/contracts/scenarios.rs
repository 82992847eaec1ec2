//! Reference scenarios

use podshift::{ChangeKind, Translator};

use crate::common::*;

/// CONTRACT: the web/redis document becomes two Quadlet units, a restart
/// rewrite and a volume declaration, with no errors.
mod web_redis {
    use super::*;

    #[test]
    fn contract_quadlet_units() {
        let result = Translator::default().translate(WEB_REDIS, "quadlet");

        assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
        assert_eq!(result.output_format, "quadlet");
        assert_eq!(result.output.matches("# --- ").count(), 2);

        insta::assert_snapshot!(result.output.trim_end(), @r"
        # --- web.container ---
        [Unit]
        Description=web container

        [Container]
        Image=nginx
        ContainerName=web
        PublishPort=8080:80

        [Service]
        Restart=always

        [Install]
        WantedBy=default.target

        # --- redis.container ---
        [Unit]
        Description=redis container

        [Container]
        Image=redis:7
        ContainerName=redis
        Volume=redis-data:/data

        [Service]

        [Install]
        WantedBy=default.target
        ");
    }

    #[test]
    fn contract_restart_rewrite_recorded() {
        let result = Translator::default().translate(WEB_REDIS, "quadlet");

        let restart: Vec<_> = result.changes_at("services.web.restart").collect();
        assert_eq!(restart.len(), 1);
        assert_eq!(restart[0].kind, ChangeKind::Modified);
        assert_eq!(restart[0].original, "unless-stopped");
        assert_eq!(restart[0].transformed, "always");
    }

    #[test]
    fn contract_volume_auto_declared() {
        let result = Translator::default().translate(WEB_REDIS, "quadlet");

        let declared: Vec<_> = result.changes_at("volumes.redis-data").collect();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].kind, ChangeKind::Added);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("redis-data")));
    }
}

/// CONTRACT: a self-dependency is a cycle, for every format.
mod self_dependency {
    use super::*;
    use podshift::OutputFormat;

    #[test]
    fn contract_cycle_blocks_every_format() {
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(SELF_DEPENDENCY, format);
            assert!(result.output.is_empty(), "{} produced output", format);
            assert!(
                result.errors.iter().any(|e| e.contains("cycle")),
                "{}: {:?}",
                format,
                result.errors
            );
        }
    }
}

/// CONTRACT: a build-only service blocks; build with an image degrades.
mod build {
    use super::*;

    #[test]
    fn contract_build_only_service_blocks() {
        let result = Translator::default().translate(BUILD_ONLY, "podman-compose");

        assert!(result.output.is_empty());
        assert_eq!(result.errors.len(), 1);
        let removed: Vec<_> = result
            .changes_at("services.app.build")
            .filter(|c| c.kind == ChangeKind::Removed)
            .collect();
        assert_eq!(removed.len(), 1);
    }

    #[test]
    fn contract_build_with_image_is_a_warning() {
        let input = "services:\n  app:\n    build: .\n    image: registry.local/app:1\n";
        let result = Translator::default().translate(input, "podman-compose");

        assert!(result.is_success(), "errors: {:?}", result.errors);
        assert!(result
            .changes_at("services.app.build")
            .all(|c| c.kind == ChangeKind::Warning));
        assert!(!result.output.contains("build"));
    }
}

/// CONTRACT: the Docker socket never survives translation.
mod socket {
    use super::*;
    use podshift::OutputFormat;

    #[test]
    fn contract_socket_rewritten_in_every_format() {
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(SOCKET_MOUNT, format);
            assert!(result.is_success(), "{}: {:?}", format, result.errors);
            assert!(!result.output.contains("docker.sock"), "{}:\n{}", format, result.output);
            assert!(result.output.contains("podman.sock"));

            let modified = result
                .changes_at("services.agent.volumes[0]")
                .filter(|c| c.kind == ChangeKind::Modified)
                .count();
            assert_eq!(modified, 1);
        }
    }

    #[test]
    fn contract_socket_in_command_rewritten_in_every_format() {
        let translator = Translator::default();
        for format in OutputFormat::ALL {
            let result = translator.translate_to(SOCKET_IN_COMMAND, format);
            assert!(result.is_success(), "{}: {:?}", format, result.errors);
            assert!(!result.output.contains("docker.sock"), "{}:\n{}", format, result.output);

            let mount_changes = result
                .changes_at("services.traefik.volumes[0]")
                .filter(|c| c.kind == ChangeKind::Modified)
                .count();
            assert_eq!(mount_changes, 1);
            assert_eq!(result.changes_at("services.traefik.command").count(), 1);
        }
    }
}
