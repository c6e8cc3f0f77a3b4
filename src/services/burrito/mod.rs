pub mod client;
pub mod client_config;
pub mod models;
pub mod transport;

pub use client::BurritoClient;
pub use client_config::{ClientBuilder, ClientConfig, BURRITO_KEY_VAR, BURRITO_URL_VAR};
pub use models::*;
pub use transport::{
    ReqwestTransport, RequestOptions, Transport, TransportFuture, TransportRequest,
    TransportResponse,
};
