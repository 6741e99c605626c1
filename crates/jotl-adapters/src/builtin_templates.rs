//! Static templates that ship inside the binary.
//!
//! Placeholders use `{{KEY}}`; keys come from `PostgresService::render_context`
//! and `settings::env_context` in `jotl-core`.

use jotl_core::domain::TemplateKind;

/// `jotl/docker-compose.yml` for the Postgres driver.
pub const DOCKER_COMPOSE: &str = r#"version: '3.8'

services:
  postgres:
    image: postgres:latest
    container_name: {{CONTAINER_NAME}}
    environment:
      POSTGRES_DB: {{DB_NAME}}
      POSTGRES_USER: {{DB_USER}}
      POSTGRES_PASSWORD: {{DB_PASSWORD}}
    ports:
      - "{{DB_PORT}}:5432"
    volumes:
      - {{VOLUME}}:/var/lib/postgresql/data
    restart: unless-stopped

volumes:
  {{VOLUME}}:
    driver: local
"#;

/// `jotl/.env`.
pub const ENV_FILE: &str = "# Jotl is a modern CLI tool designed to streamline log management
# for developers like you.
# Please consider starring the repo if you find it useful: https://github.com/ebarthur/jotl

DB_CONNECTION_STRING={{DB_CONNECTION_STRING}}

# Application Configuration (This is read-only)
APP_NAME={{APP_NAME}}
";

/// Source text for a template kind.
pub fn source(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::DockerCompose => DOCKER_COMPOSE,
        TemplateKind::EnvFile => ENV_FILE,
    }
}
