use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BurritoModel, CompletionType, TransformMode};

/// Where the service should store transform output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveTarget {
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SaveTarget {
    pub fn app(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            key: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Body of a `transform` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<String>>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<BurritoModel>,
    #[serde(default)]
    pub mode: TransformMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_type: Option<CompletionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl TransformParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            hashes: None,
            prompt: prompt.into(),
            system_prompt: None,
            model: None,
            mode: TransformMode::Each,
            completion_type: None,
            save: None,
            force: None,
            debug: None,
        }
    }

    pub fn hashes<I, S>(mut self, hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashes = Some(hashes.into_iter().map(Into::into).collect());
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn model(mut self, model: impl Into<BurritoModel>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn mode(mut self, mode: TransformMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn completion_type(mut self, completion_type: CompletionType) -> Self {
        self.completion_type = Some(completion_type);
        self
    }

    pub fn save(mut self, save: SaveTarget) -> Self {
        self.save = Some(save);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

/// Completion produced for a single hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransformPart<T = Value> {
    pub hash: String,
    pub completion: T,
}

/// Result of `transform`, tagged by the mode that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput<T = Value> {
    /// One completion per hash, in service order.
    Each(Vec<TransformPart<T>>),
    /// A single completion over all hashes.
    All(T),
}

impl<T> TransformOutput<T> {
    pub fn mode(&self) -> TransformMode {
        match self {
            TransformOutput::Each(_) => TransformMode::Each,
            TransformOutput::All(_) => TransformMode::All,
        }
    }

    pub fn into_each(self) -> Option<Vec<TransformPart<T>>> {
        match self {
            TransformOutput::Each(parts) => Some(parts),
            TransformOutput::All(_) => None,
        }
    }

    pub fn into_all(self) -> Option<T> {
        match self {
            TransformOutput::All(value) => Some(value),
            TransformOutput::Each(_) => None,
        }
    }
}

/// Definition of a named transform stored on the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformDefinition {
    #[serde(default)]
    pub system_prompt: String,
    pub prompt: String,
    pub mode: String,
    pub model: String,
}

pub type TransformsCatalog = HashMap<String, TransformDefinition>;
