use serde::{Deserialize, Serialize};

/// Body of a `query/embeddings` request.
///
/// Either `vectors` or `queries` drives the similarity search, the service
/// performs it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EmbeddingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vectors: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<String>>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
}

impl EmbeddingsRequest {
    pub fn from_vectors(vectors: Vec<Vec<f64>>) -> Self {
        Self {
            vectors: Some(vectors),
            ..Default::default()
        }
    }

    pub fn from_queries<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: Some(queries.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn num(mut self, num: u32) -> Self {
        self.num = Some(num);
        self
    }
}

/// One hit of a similarity search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmbeddingsData {
    pub hash: String,
    pub distance: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
