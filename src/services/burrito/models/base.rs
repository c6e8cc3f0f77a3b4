use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model identifier accepted by `install` and `transform`.
///
/// Known models serialize to their wire names, anything else is passed through
/// unchanged as [`BurritoModel::Custom`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum BurritoModel {
    Gpt4,
    Gpt35,
    Mistral7b,
    Mixtral,
    MistralSmall,
    MistralMedium,
    MistralLarge,
    Custom(String),
}

impl BurritoModel {
    pub fn as_str(&self) -> &str {
        match self {
            BurritoModel::Gpt4 => "gpt4",
            BurritoModel::Gpt35 => "gpt3.5",
            BurritoModel::Mistral7b => "mistral7b",
            BurritoModel::Mixtral => "mixtral",
            BurritoModel::MistralSmall => "mistral-small",
            BurritoModel::MistralMedium => "mistral-medium",
            BurritoModel::MistralLarge => "mistral-large",
            BurritoModel::Custom(name) => name,
        }
    }
}

impl From<String> for BurritoModel {
    fn from(name: String) -> Self {
        match name.as_str() {
            "gpt4" => BurritoModel::Gpt4,
            "gpt3.5" => BurritoModel::Gpt35,
            "mistral7b" => BurritoModel::Mistral7b,
            "mixtral" => BurritoModel::Mixtral,
            "mistral-small" => BurritoModel::MistralSmall,
            "mistral-medium" => BurritoModel::MistralMedium,
            "mistral-large" => BurritoModel::MistralLarge,
            _ => BurritoModel::Custom(name),
        }
    }
}

impl From<&str> for BurritoModel {
    fn from(name: &str) -> Self {
        BurritoModel::from(name.to_string())
    }
}

impl From<BurritoModel> for String {
    fn from(model: BurritoModel) -> Self {
        match model {
            BurritoModel::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BurritoModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transform yields one completion per hash or one for all of them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    #[default]
    Each,
    All,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionType {
    Json,
    Text,
}

/// Service-defined description of the shape a query answer should take.
///
/// The client never interprets it, it is forwarded as raw JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ResponseSchema(pub Value);

impl ResponseSchema {
    pub fn from_value(schema: Value) -> Self {
        Self(schema)
    }

    pub fn from_str(s: &str) -> Result<Self, serde_json::Error> {
        let v: Value = serde_json::from_str(s.trim())?;
        Ok(Self::from_value(v))
    }

    pub fn from_type<T: JsonSchema>() -> Result<Self, serde_json::Error> {
        Ok(Self::from_value(serde_json::to_value(schema_for!(T))?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ResponseSchema {
    fn from(schema: Value) -> Self {
        Self::from_value(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_models_use_wire_names() {
        assert_eq!(serde_json::to_value(BurritoModel::Gpt35).unwrap(), json!("gpt3.5"));
        assert_eq!(
            serde_json::to_value(BurritoModel::MistralLarge).unwrap(),
            json!("mistral-large")
        );
        let parsed: BurritoModel = serde_json::from_value(json!("mixtral")).unwrap();
        assert_eq!(parsed, BurritoModel::Mixtral);
    }

    #[test]
    fn unknown_models_pass_through() {
        let model = BurritoModel::from("llama3:70b");
        assert_eq!(model, BurritoModel::Custom("llama3:70b".into()));
        assert_eq!(serde_json::to_value(&model).unwrap(), json!("llama3:70b"));
    }

    #[test]
    fn mode_defaults_to_each() {
        assert_eq!(TransformMode::default(), TransformMode::Each);
        assert_eq!(serde_json::to_value(TransformMode::All).unwrap(), json!("all"));
        assert_eq!(serde_json::to_value(CompletionType::Json).unwrap(), json!("json"));
    }

    #[test]
    fn schema_from_str_and_type() {
        #[derive(JsonSchema)]
        #[allow(dead_code)]
        struct Recipe {
            name: String,
            spicy: bool,
        }

        let schema = ResponseSchema::from_str(r#" {"type":"object"} "#).unwrap();
        assert_eq!(schema.as_value()["type"], "object");
        assert!(ResponseSchema::from_str("nope").is_err());

        let derived = ResponseSchema::from_type::<Recipe>().unwrap();
        assert_eq!(derived.as_value()["properties"]["spicy"]["type"], "boolean");
    }
}
