use std::time::Duration;

use anyhow::Result;
use edgesign_core::{Body, Context, OsEnv, Signer};
use edgesign_edgegrid::{Config, RequestSigner};
use edgesign_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;

/// Call an EdgeGrid API with credentials taken from `AKAMAI_*` env values.
///
/// ```shell
/// AKAMAI_HOST=akab-xxx.luna.akamaiapis.net cargo run --example edgegrid
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("edgesign-example/1.0")
        .build()?;

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv);

    let config = Config::new().from_env(&ctx);
    let signer = Signer::new(ctx.clone(), RequestSigner::new(config)?);

    let host = ctx
        .env_var("AKAMAI_HOST")
        .ok_or_else(|| anyhow::anyhow!("env AKAMAI_HOST must be set"))?;
    let req = http::Request::get(format!(
        "https://{host}/diagnostic-tools/v2/ghost-locations/available"
    ))
    .body(Body::empty())?;

    match signer.send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    Ok(())
}
