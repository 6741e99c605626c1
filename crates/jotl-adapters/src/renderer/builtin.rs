//! Placeholder substitution over the built-in templates.

use jotl_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, TemplateKind},
    error::JotlResult,
};
use tracing::instrument;

use crate::builtin_templates;

/// Renders the templates compiled into the binary.
///
/// Strict: a placeholder without a value in the context is an error rather
/// than an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl BuiltinRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinRenderer {
    #[instrument(skip_all, fields(template = kind.as_str()))]
    fn render(&self, kind: TemplateKind, context: &RenderContext) -> JotlResult<String> {
        substitute(builtin_templates::source(kind), context).map_err(|key| {
            ApplicationError::RenderingFailed {
                reason: format!(
                    "template '{}' has no value for placeholder '{{{{{}}}}}'",
                    kind.as_str(),
                    key
                ),
            }
            .into()
        })
    }
}

/// Replace every `{{KEY}}` in `template` with its value from `context`.
///
/// Values are inserted verbatim and never re-scanned. Returns the first
/// unknown key on failure.
pub fn substitute(template: &str, context: &RenderContext) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let key = rest[start + 2..start + 2 + len].trim();
        let value = context.get(key).ok_or_else(|| key.to_string())?;

        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotl_core::domain::{
        JotlSettings, LogLevel, PostgresService, ProjectConfig, ProjectName, StorageDriver,
        settings::env_context,
    };

    #[test]
    fn compose_template_has_every_field_substituted() {
        let rendered = BuiltinRenderer::new()
            .render(
                TemplateKind::DockerCompose,
                &PostgresService::default().render_context(),
            )
            .unwrap();

        assert!(!rendered.contains("{{"));
        assert!(rendered.contains("container_name: jotl-postgres"));
        assert!(rendered.contains("POSTGRES_PASSWORD: jotl_password"));
        assert!(rendered.contains("- \"5432:5432\""));
        assert!(rendered.contains("  postgres_data:\n    driver: local"));
    }

    #[test]
    fn env_template_lists_connection_and_name() {
        let config = ProjectConfig {
            name: ProjectName::parse("demo").unwrap(),
            storage_driver: StorageDriver::Sqlite,
            log_level: LogLevel::Info,
            version_control: false,
        };
        let settings = JotlSettings::from_config(&config);

        let rendered = BuiltinRenderer::new()
            .render(TemplateKind::EnvFile, &env_context(&settings))
            .unwrap();

        assert!(rendered.contains("DB_CONNECTION_STRING=jotl/db/jotl.db\n"));
        assert!(rendered.contains("APP_NAME=demo\n"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = BuiltinRenderer::new()
            .render(TemplateKind::EnvFile, &RenderContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("{{DB_CONNECTION_STRING}}"), "{err}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = RenderContext::new().with_variable("A", "{{B}}");
        assert_eq!(substitute("x={{A}}", &ctx).unwrap(), "x={{B}}");
    }

    #[test]
    fn unterminated_placeholder_is_left_alone() {
        let ctx = RenderContext::new();
        assert_eq!(substitute("a {{ b", &ctx).unwrap(), "a {{ b");
    }

    #[test]
    fn whitespace_inside_braces_is_ignored() {
        let ctx = RenderContext::new().with_variable("NAME", "demo");
        assert_eq!(substitute("{{ NAME }}!", &ctx).unwrap(), "demo!");
    }
}
