//! Interactive line-based chat.

use anyhow::Result;
use dialoguer::Confirm;
use parley_core::{Conversation, Message, SendOutcome, Sender};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

const HELP: &str = "Commands: /reset  start a new analysis, /session  show the case reference, /history  reprint the transcript, /quit  exit";

enum Command {
    Send(String),
    Reset,
    Session,
    History,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/reset" => Command::Reset,
        "/session" => Command::Session,
        "/history" => Command::History,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Send(line.to_string()),
    }
}

fn render(message: &Message) -> String {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "analyst",
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M"),
        who,
        message.text
    )
}

pub async fn run(conversation: Conversation) -> Result<()> {
    let conversation = Arc::new(Mutex::new(conversation));

    {
        let guard = conversation.lock().await;
        println!("Case {}  ({})", guard.session_id().case_reference(), HELP);
        for message in guard.messages() {
            println!("{}", render(message));
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Session => {
                let guard = conversation.lock().await;
                println!(
                    "Case {} (session {})",
                    guard.session_id().case_reference(),
                    guard.session_id()
                );
            }
            Command::History => {
                let guard = conversation.lock().await;
                for message in guard.messages() {
                    println!("{}", render(message));
                }
            }
            Command::Reset => {
                let confirmed = tokio::task::spawn_blocking(|| {
                    Confirm::new()
                        .with_prompt("Restart the analysis session?")
                        .default(false)
                        .interact()
                })
                .await??;
                if confirmed {
                    let mut guard = conversation.lock().await;
                    let session = guard.reset();
                    println!("Case {}", session.id().case_reference());
                    if let Some(greeting) = session.last_message() {
                        println!("{}", render(greeting));
                    }
                }
            }
            Command::Send(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                println!("analyst is typing...");
                match Conversation::send_shared(&conversation, &text).await {
                    SendOutcome::Replied(reply) => println!("{}", render(&reply)),
                    SendOutcome::Failed(banner) => eprintln!("! {}", banner),
                    SendOutcome::Ignored => {
                        log::debug!("Send ignored: a reply is still pending");
                    }
                    SendOutcome::Stale => {
                        log::debug!("Reply arrived for a previous session and was dropped");
                    }
                }
            }
        }
    }

    Ok(())
}
