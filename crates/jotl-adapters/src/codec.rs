//! YAML codec for `jotl/config.yaml`.

use jotl_core::{
    application::{ApplicationError, ports::SettingsCodec},
    domain::JotlSettings,
    error::JotlResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSettingsCodec;

impl YamlSettingsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SettingsCodec for YamlSettingsCodec {
    fn encode(&self, settings: &JotlSettings) -> JotlResult<String> {
        serde_yaml_ng::to_string(settings).map_err(|e| {
            ApplicationError::CodecFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn decode(&self, text: &str) -> JotlResult<JotlSettings> {
        serde_yaml_ng::from_str(text).map_err(|e| {
            ApplicationError::CodecFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
