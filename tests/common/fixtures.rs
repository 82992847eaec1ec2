//! Reusable Compose documents.

/// Two services; `redis-data` is used but never declared.
pub const WEB_REDIS: &str = r#"services:
  web:
    image: nginx
    ports:
      - "8080:80"
    restart: unless-stopped
  redis:
    image: redis:7
    volumes:
      - redis-data:/data
"#;

pub const SELF_DEPENDENCY: &str = r#"services:
  app:
    image: busybox
    depends_on: [app]
"#;

pub const SOCKET_MOUNT: &str = r#"services:
  agent:
    image: portainer/agent
    volumes:
      - /var/run/docker.sock:/var/run/docker.sock
"#;

/// Traefik-style service naming the socket in its command as well
pub const SOCKET_IN_COMMAND: &str = r#"services:
  traefik:
    image: traefik:v3
    command: --providers.docker.endpoint=unix:///var/run/docker.sock
    volumes:
      - /var/run/docker.sock:/var/run/docker.sock:ro
"#;

pub const BUILD_ONLY: &str = r#"services:
  app:
    build: .
"#;

/// Already Podman-friendly: translation records no changes
pub const CLEAN: &str = r#"services:
  web:
    image: nginx
    ports:
      - "8080:80"
    restart: always
"#;

pub const MALFORMED: &str = "services:\n  web: [\n";
