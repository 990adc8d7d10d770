//! `swarmboard key`: the shared API key.

use super::runtime;

pub async fn set(key: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, mut widget) = runtime::start().await?;
    runtime::unlock(&mut widget, password)?;

    widget
        .admin()
        .save_api_key(key)
        .await
        .map_err(|e| e.user_message())?;
    println!("🔑 API key saved.");
    Ok(())
}

pub async fn status() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, widget) = runtime::start().await?;
    println!("  API key: {}", widget.admin().api_key_status().await);
    Ok(())
}
