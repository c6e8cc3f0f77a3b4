use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::ResponseSchema;

/// Body of a `query` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub app: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResponseSchema>,
    /// Seconds the service may cache the answer for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_for: Option<u64>,
    /// Bypass the service-side cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl QueryParams {
    pub fn new(app: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            query: query.into(),
            schema: None,
            cache_for: None,
            force: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<ResponseSchema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn cache_for(mut self, seconds: u64) -> Self {
        self.cache_for = Some(seconds);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }
}

/// Body of a `query/data` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryDataParams {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResponseSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_for: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

impl QueryDataParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            schema: None,
            cache_for: None,
            force: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<ResponseSchema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn cache_for(mut self, seconds: u64) -> Self {
        self.cache_for = Some(seconds);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }
}

/// Loosely structured content record returned by `query`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BurritoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields the service returned that have no dedicated slot.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
