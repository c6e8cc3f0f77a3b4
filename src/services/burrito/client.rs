use std::sync::Arc;

use reqwest::{
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::services::burrito::{
    models::{
        embedding::{EmbeddingsData, EmbeddingsRequest},
        errors::BurritoError,
        install::InstallParams,
        query::{BurritoData, QueryDataParams, QueryParams},
        transform::{TransformOutput, TransformParams, TransformsCatalog},
        TransformMode,
    },
    transport::{RequestOptions, Transport, TransportRequest},
};

#[derive(Debug)]
struct ClientInner {
    base_url: String,
    authorization: HeaderValue,
    defaults: RequestOptions,
    transport: Arc<dyn Transport>,
}

/// Client for the Burrito service.
///
/// Cloning is cheap and clones share configuration and transport, so one client can
/// serve any number of concurrent calls.
#[derive(Clone, Debug)]
pub struct BurritoClient {
    inner: Arc<ClientInner>,
    call_options: Option<RequestOptions>,
}

impl BurritoClient {
    pub(crate) fn new(
        base_url: String,
        api_key: &str,
        defaults: RequestOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, BurritoError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| BurritoError::Config(format!("Invalid api_key header: {e}")))?;
        authorization.set_sensitive(true);

        // validated once here so bad defaults fail at construction
        defaults.header_map()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                authorization,
                defaults,
                transport,
            }),
            call_options: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns a client whose calls use `options` layered over the current ones.
    pub fn with_request_options(&self, options: RequestOptions) -> Self {
        let call_options = match &self.call_options {
            Some(current) => options.merged_over(current),
            None => options,
        };
        Self {
            inner: Arc::clone(&self.inner),
            call_options: Some(call_options),
        }
    }

    /// Runs a query and returns the matching record.
    pub async fn query(&self, params: &QueryParams) -> Result<BurritoData, BurritoError> {
        self.query_as(params).await
    }

    /// Like [`query`](Self::query) but decodes into a caller-chosen type.
    ///
    /// Depending on deployment the service wraps the answer in `{"data": ...}`, both
    /// shapes are accepted.
    #[instrument(name = "burrito.query", skip_all, fields(app = %params.app))]
    pub async fn query_as<T>(&self, params: &QueryParams) -> Result<T, BurritoError>
    where
        T: DeserializeOwned,
    {
        let body = self.post("query", params).await?;
        decode(unwrap_data_envelope(body))
    }

    #[instrument(name = "burrito.query_data", skip_all)]
    pub async fn query_data<T>(&self, params: &QueryDataParams) -> Result<T, BurritoError>
    where
        T: DeserializeOwned,
    {
        decode(self.post("query/data", params).await?)
    }

    #[instrument(name = "burrito.query_embeddings", skip_all)]
    pub async fn query_embeddings(
        &self,
        params: &EmbeddingsRequest,
    ) -> Result<Vec<EmbeddingsData>, BurritoError> {
        decode(self.post("query/embeddings", params).await?)
    }

    /// Installs a prompt for an app. The acknowledgement is returned as sent.
    #[instrument(name = "burrito.install", skip_all, fields(app = %params.app, model = %params.model))]
    pub async fn install(&self, params: &InstallParams) -> Result<Value, BurritoError> {
        self.post("install", params).await
    }

    /// Lists the named transforms stored on the service.
    #[instrument(name = "burrito.get_transforms", skip_all)]
    pub async fn get_transforms(&self) -> Result<TransformsCatalog, BurritoError> {
        decode(self.round_trip(Method::GET, "transforms", None).await?)
    }

    /// Runs a transform. The output variant follows `params.mode`, the response is
    /// not reshaped.
    #[instrument(name = "burrito.transform", skip_all, fields(mode = ?params.mode))]
    pub async fn transform<T>(
        &self,
        params: &TransformParams,
    ) -> Result<TransformOutput<T>, BurritoError>
    where
        T: DeserializeOwned,
    {
        let body = self.post("transform", params).await?;
        match params.mode {
            TransformMode::Each => decode(body).map(TransformOutput::Each),
            TransformMode::All => decode(body).map(TransformOutput::All),
        }
    }

    async fn post<B>(&self, endpoint: &str, params: &B) -> Result<Value, BurritoError>
    where
        B: Serialize,
    {
        let body = serde_json::to_string(params).map_err(|e| {
            error!(%e, endpoint, "failed to encode request body");
            BurritoError::Serialization(format!("Error encoding request body: {e}"))
        })?;
        self.round_trip(Method::POST, endpoint, Some(body)).await
    }

    fn shape(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<TransportRequest, BurritoError> {
        let options = match &self.call_options {
            Some(call) => call.merged_over(&self.inner.defaults),
            None => self.inner.defaults.clone(),
        };

        let mut headers = options.header_map()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.inner.authorization.clone());

        Ok(TransportRequest {
            method,
            url: format!("{}/{}", self.inner.base_url, endpoint),
            headers,
            body,
            timeout: options.timeout,
        })
    }

    async fn round_trip(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<Value, BurritoError> {
        let request = self.shape(method, endpoint, body)?;
        let response = self.inner.transport.send(request).await.map_err(|e| {
            error!(%e, endpoint, "request failed");
            e
        })?;

        if !response.is_success() {
            error!(status = response.status, body = %response.body, endpoint, "request failed");
            return Err(BurritoError::Api {
                status: response.status,
                body: response.body,
            });
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(parsed) => {
                debug!(endpoint, "received response");
                Ok(parsed)
            }
            Err(e) => {
                error!(%e, raw = %response.body, endpoint, "deserialization error");
                Err(BurritoError::Serialization(format!(
                    "Error decoding response body: {e}. Raw JSON was: '{}'",
                    response.body
                )))
            }
        }
    }
}

/// `{"data": X}` becomes `X`. A `data` field that is null, `false`, `0` or `""` is
/// not an envelope and the body passes through whole.
fn unwrap_data_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if is_truthy(&data) => data,
            Some(data) => {
                map.insert("data".into(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn decode<T>(body: Value) -> Result<T, BurritoError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(body).map_err(|e| {
        error!(%e, "response did not match the expected shape");
        BurritoError::Serialization(format!("Unexpected response shape: {e}"))
    })
}
