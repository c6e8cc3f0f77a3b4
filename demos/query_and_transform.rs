use std::error::Error;
use std::time::Duration;

use burrito::{
    init_default_tracing, BurritoModel, ClientBuilder, ClientConfig, EmbeddingsRequest,
    QueryParams, RequestOptions, ResponseSchema, TransformMode, TransformParams,
};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_default_tracing()?;

    let client = ClientConfig::default()
        .default_options(RequestOptions::default().timeout(Duration::from_secs(30)))
        .with_env_fallback()
        .build()?;

    let recipe = client
        .query(
            &QueryParams::new("recipes", "a quick weeknight taco")
                .schema(ResponseSchema::from_value(json!({"type": "object"})))
                .cache_for(3600),
        )
        .await?;
    println!("-> Query: {:#?}", recipe);

    let hits = client
        .query_embeddings(&EmbeddingsRequest::from_queries(["salsa verde"]).num(3))
        .await?;
    for hit in &hits {
        println!("-> {} ({:.3}) {}", hit.hash, hit.distance, hit.title.as_deref().unwrap_or("-"));
    }

    for (name, def) in client.get_transforms().await? {
        println!("-> Transform {name}: {} [{}]", def.prompt, def.mode);
    }

    let titles = client
        .transform::<String>(
            &TransformParams::new("Write a title for {{text}}")
                .hashes(hits.iter().map(|h| h.hash.clone()))
                .model(BurritoModel::MistralSmall),
        )
        .await?;
    if let Some(parts) = titles.into_each() {
        for part in parts {
            println!("-> {}: {}", part.hash, part.completion);
        }
    }

    let digest = client
        .with_request_options(RequestOptions::default().timeout(Duration::from_secs(120)))
        .transform::<Value>(
            &TransformParams::new("Summarize these recipes")
                .hashes(hits.iter().map(|h| h.hash.clone()))
                .mode(TransformMode::All),
        )
        .await?;
    println!("-> Digest: {:#?}", digest.into_all());

    Ok(())
}
