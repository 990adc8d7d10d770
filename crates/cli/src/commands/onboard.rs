//! `swarmboard onboard`: write the default configuration.

use swarmboard_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🐝 Swarm Board Setup");
    println!("====================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Change [admin] password in {}", config_path.display());
        println!("   2. Run: swarmboard key set <GEMINI_API_KEY> --password <admin password>");
        println!("   3. Add records: swarmboard knowledge add --title ... --content ... --password ...");
        println!("   4. Run: swarmboard chat\n");
    }

    Ok(())
}
