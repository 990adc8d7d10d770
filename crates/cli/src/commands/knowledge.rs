//! `swarmboard knowledge`: admin knowledge management.

use swarmboard_core::knowledge::Category;

use super::runtime;

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, widget) = runtime::start().await?;
    let items = widget.admin().knowledge_listing().await;

    println!("📚 Knowledge Base ({} records)", items.len());
    println!("==============================");
    if items.is_empty() {
        println!("   No records yet. Add one with `swarmboard knowledge add`.");
        return Ok(());
    }
    for item in &items {
        let preview: String = item.content.chars().take(80).collect();
        println!(
            "  {}  [{}] {}  ({})",
            item.id,
            item.category,
            item.title,
            item.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("      {preview}");
    }
    Ok(())
}

pub async fn add(
    category: &str,
    title: &str,
    content: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let category: Category = category.parse()?;
    let (_config, mut widget) = runtime::start().await?;
    runtime::unlock(&mut widget, password)?;

    let id = widget
        .admin()
        .add_knowledge(category, title, content)
        .await
        .map_err(|e| e.user_message())?;
    println!("✅ Added \"{}\" as {id}", title.trim());
    Ok(())
}

pub async fn delete(id: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, mut widget) = runtime::start().await?;
    runtime::unlock(&mut widget, password)?;

    widget
        .admin()
        .delete_knowledge(id)
        .await
        .map_err(|e| e.user_message())?;
    println!("🗑️  Deleted {id}");
    Ok(())
}
