/// Webhook example: register an endpoint and check a delivery signature.
///
/// A real receiver would read the body and the signature header from the
/// incoming HTTP request; here both are simulated.
use ai_auto_news::{sign_webhook_payload, AiAutoNewsClient, CreateWebhookRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("AI_AUTO_NEWS_API_KEY")?;
    let secret = std::env::var("AI_AUTO_NEWS_WEBHOOK_SECRET")?;
    let client = AiAutoNewsClient::new(api_key.as_str())?;

    let mut request = CreateWebhookRequest::new(
        "https://example.com/hooks/news",
        vec!["post.published".into(), "generation.completed".into()],
    );
    request.secret = Some(secret.clone());
    let webhook = client.webhooks.create(&request).await?;
    println!("Registered webhook: {:?}", webhook.get("id"));

    // Simulated delivery
    let body = r#"{"event":"post.published","data":{"id":"p1"}}"#;
    let signature = sign_webhook_payload(body, &secret);

    if AiAutoNewsClient::verify_webhook_signature(body, &signature, &secret) {
        println!("Signature valid, processing event");
    } else {
        println!("Signature mismatch, rejecting delivery");
    }
    Ok(())
}
