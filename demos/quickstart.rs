/// Quickstart example: list, search and generate posts.
///
/// Reads the API key from `AI_AUTO_NEWS_API_KEY` and prints rate-limit
/// metadata from a raw executor call.
use ai_auto_news::{
    codes, AiAutoNewsClient, ContentType, GenerateRequest, ListPostsParams, SdkConfig,
    SearchParams, Urgency,
};
use reqwest::Method;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("AI_AUTO_NEWS_API_KEY")?;
    let client = AiAutoNewsClient::new(SdkConfig::new(api_key).with_retries(5))?;

    // 1. Latest tech posts
    let posts = client
        .posts
        .list(&ListPostsParams::default().category("tech").published(true))
        .await?;
    println!("Latest tech posts:");
    for post in &posts {
        println!("  {} ({})", post.title, post.slug);
    }

    // 2. Search
    let results = client
        .posts
        .search(&SearchParams::new("rust async").limit(5))
        .await?;
    println!("\nSearch hits: {}", results.len());

    // 3. Generate a news article
    let generated = client
        .generate
        .create(
            &GenerateRequest::new("Open-source AI models")
                .content_type(ContentType::News)
                .urgency(Urgency::High)
                .target_length(600),
        )
        .await?;
    println!("\nGenerated: {} [{}]", generated.title, generated.id);

    // 4. Lookups that may fail: branch on the error code
    match client.posts.get("does-not-exist").await {
        Ok(post) => println!("\nFound {}", post.id),
        Err(err) if err.code == "not_found" => println!("\nNo such post"),
        Err(err) if err.code == codes::REQUEST_FAILED => {
            println!("\nGave up after retries: {err}")
        }
        Err(err) => return Err(err.into()),
    }

    // 5. Raw call with envelope metadata
    let resp = client
        .http()
        .execute(Method::GET, "/analytics/usage", &[], None, None)
        .await?;
    if let Some(rate_limit) = resp.rate_limit() {
        println!(
            "\nRate limit: {} remaining, resets at {}",
            rate_limit.remaining, rate_limit.reset
        );
    }

    Ok(())
}
