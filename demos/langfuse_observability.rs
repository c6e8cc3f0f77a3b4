use std::error::Error;

use burrito::{
    observability::langfuse::{self, LangfuseOptions},
    ClientBuilder, ClientConfig, QueryParams,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let provider = langfuse::init(LangfuseOptions {
        public_key: Some("pk-lf-..."),
        secret_key: Some("sk-lf-..."),
        host: Some("http://localhost:3000"),
    })?;

    let client = ClientConfig::default().with_env_fallback().build()?;
    let data = client.query(&QueryParams::new("recipes", "guacamole")).await?;
    println!("-> {:#?}", data);

    provider.shutdown()?;
    Ok(())
}
