//! Terminal front end for the Aivora support assistant.
//!
//! Drives the same panel state as the web widget against a running API
//! server. A line ending in `\` continues on the next line; `/quit` exits.

mod error;
mod logging;

use std::process::ExitCode;

use aivora_api_client::SupportChatClient;
use aivora_core::models::chat::Role;
use aivora_widget::{ChatAssistant, KeyEvent, SUBTITLE, TITLE};
use clap::Parser;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "aivora", version, about = "Chat with the Aivora assistant")]
struct Cli {
    /// Base URL of the Aivora API.
    #[arg(long, env = "AIVORA_API_URL", default_value = "http://127.0.0.1:3100")]
    server: String,

    /// Access token; without one the assistant refuses to send.
    #[arg(long, env = "AIVORA_TOKEN")]
    token: Option<String>,

    /// Send a single message, print the reply and exit.
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    logging::init()?;
    let cli = Cli::parse();

    let token = cli.token.filter(|t| !t.is_empty());
    let mut client = SupportChatClient::new(&cli.server)?;
    if let Some(t) = &token {
        client = client.with_token(t.clone());
    }
    info!("using {}", client.endpoint());

    let mut chat = ChatAssistant::new(token.is_some());
    chat.toggle_open();

    match cli.message {
        Some(message) => one_shot(&mut chat, &client, message).await,
        None => repl(&mut chat, &client).await,
    }
}

/// Send one message and report the outcome through the exit code.
async fn one_shot(
    chat: &mut ChatAssistant,
    client: &SupportChatClient,
    message: String,
) -> Result<ExitCode> {
    let seen = chat.messages().len();
    chat.set_input(message);
    chat.send(client).await;

    if let Some(error) = chat.error() {
        eprintln!("{error}");
        return Ok(ExitCode::FAILURE);
    }
    print_new_replies(chat, seen);
    Ok(ExitCode::SUCCESS)
}

async fn repl(chat: &mut ChatAssistant, client: &SupportChatClient) -> Result<ExitCode> {
    println!("{TITLE} — {SUBTITLE}");
    print_new_replies(chat, 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut draft = String::new();

    loop {
        let prompt = if draft.is_empty() { "> " } else { ". " };
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if draft.is_empty() && line.trim() == "/quit" {
            break;
        }

        // Trailing backslash behaves like shift+Enter.
        if let Some(continued) = line.strip_suffix('\\') {
            draft.push_str(continued);
            draft.push('\n');
            continue;
        }
        draft.push_str(&line);

        let seen = chat.messages().len();
        chat.set_input(std::mem::take(&mut draft));
        chat.handle_key_down(client, KeyEvent::enter()).await;
        chat.take_scroll_requests();

        if let Some(error) = chat.error() {
            eprintln!("! {error}");
        }
        print_new_replies(chat, seen);
    }

    debug!("leaving chat");
    Ok(ExitCode::SUCCESS)
}

fn print_new_replies(chat: &ChatAssistant, seen: usize) {
    for message in chat
        .messages()
        .iter()
        .skip(seen)
        .filter(|m| m.role == Role::Assistant)
    {
        println!("{}", message.content);
    }
}
