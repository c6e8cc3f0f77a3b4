use serde::{Deserialize, Serialize};

use super::base::{BurritoModel, TransformMode};

/// Body of an `install` request. Installs always run in [`TransformMode::Each`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub prompt: String,
    mode: TransformMode,
    pub model: BurritoModel,
    pub app: String,
}

impl InstallParams {
    pub fn new(
        app: impl Into<String>,
        model: impl Into<BurritoModel>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            mode: TransformMode::Each,
            model: model.into(),
            app: app.into(),
        }
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }
}
