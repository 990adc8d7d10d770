//! `swarmboard chat`: interactive or single-question mode.

use swarmboard_core::message::{Message, Role};
use swarmboard_widget::SendRejected;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::runtime;

fn print_message(message: &Message) {
    let label = match message.role {
        Role::User => "You",
        Role::Ai => "Swarm",
        Role::System => "System",
    };
    for line in message.content.lines() {
        println!("  {label:>6} > {line}");
    }
}

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, widget) = runtime::start().await?;
    let chat = widget.chat();

    if let Some(question) = message {
        eprint!("  Thinking...");
        let reply = chat.send(&question).await;
        eprint!("\r              \r");
        match reply {
            Ok(reply) => print_message(&reply),
            Err(SendRejected::Empty) => return Err("Message is empty".into()),
            Err(e) => return Err(e.to_string().into()),
        }
        return Ok(());
    }

    let status = widget.status().await;
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Swarm Board Assistant: Chat Mode       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Variant:    {}", status.variant);
    if let Some(logo) = &widget.options().logo {
        println!("  Logo:       {logo}");
    }
    println!("  Model:      {}", config.completion.model);
    println!("  Knowledge:  {} records", status.knowledge_count);
    println!("  API key:    {}", status.api_key);
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type '/clear' to reset the conversation, 'exit' or Ctrl+C to quit.");
    println!();

    for message in chat.messages().await {
        print_message(&message);
    }
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "exit" | "quit" => break,
            "/clear" => {
                for message in chat.clear_history().await {
                    print_message(&message);
                }
            }
            _ => {
                eprint!("  ...");
                let reply = chat.send(input).await;
                eprint!("\r     \r");
                match reply {
                    Ok(reply) => print_message(&reply),
                    Err(SendRejected::Empty) => {}
                    Err(e) => eprintln!("  [{e}]"),
                }
            }
        }
        println!();
        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!("\n  Goodbye! 👋");
    Ok(())
}
