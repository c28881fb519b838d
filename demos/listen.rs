//! Prints every notification pushed by a local Utopia instance.
//!
//! `cargo run --example listen -- <token>`

use utopia_api::{Category, Client, ClientOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let token = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: listen <token>"))?;
    let options = ClientOptions {
        notifications: true,
        ..ClientOptions::default()
    };
    let client = Client::new(&token, options).await?;
    println!("{}", client.send(None, None).await?);
    if !client.notifications_active() {
        anyhow::bail!("notification channel unavailable");
    }

    client.on(Category::Message, |e| println!("message event: {}", e.ty));
    let mut any = client.subscribe(Category::Any);
    while let Ok(event) = any.recv().await {
        println!("{} {}", event.ty, serde_json::Value::Object(event.payload));
    }
    println!("channel closed");
    Ok(())
}
