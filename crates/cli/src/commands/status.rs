//! `swarmboard status`: show connection and data status.

use swarmboard_config::AppConfig;

use super::runtime;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, widget) = runtime::start().await?;
    let status = widget.status().await;

    println!("🐝 Swarm Board Status");
    println!("=====================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  App id:       {}", config.app_id);
    println!("  Variant:      {}", status.variant);
    println!(
        "  Identity:     {}",
        status.uid.as_deref().unwrap_or("not signed in")
    );
    println!("  Store:        {}", status.store);
    println!("  Knowledge:    {} records", status.knowledge_count);
    println!("  API key:      {}", status.api_key);
    println!("  Completion:   {} ({})", status.completion, config.completion.model);
    println!(
        "  History:      {}",
        if status.persist_history {
            config.history_path().display().to_string()
        } else {
            "memory only".to_string()
        }
    );

    if let Some(warning) = &status.auth_warning {
        println!("\n  ⚠️  {warning}");
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `swarmboard onboard` first");
    }

    Ok(())
}
