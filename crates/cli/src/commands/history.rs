//! `swarmboard history`: local chat history.

use super::runtime;

pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, widget) = runtime::start().await?;
    if !widget.options().persist_history {
        println!("  History is not persisted for the {} widget.", widget.options().variant);
        return Ok(());
    }
    widget.chat().clear_history().await;
    println!("🧹 Chat history cleared.");
    Ok(())
}
