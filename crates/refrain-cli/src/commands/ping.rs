use anyhow::Result;
use refrain_search::{Config, SearchClient};

/// Call the backend root and print its greeting.
pub async fn ping(config: &Config) -> Result<()> {
    let client = SearchClient::from_config(config)?;
    let greeting = client.ping().await?;

    println!("✓ {}", client.base_url());
    println!("  {}", greeting);

    Ok(())
}
