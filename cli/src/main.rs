use std::sync::Arc;

use clap::Parser;
use client::net::TransportError;
use client::net::api::HttpTransport;
use client::state::conversation::{
    Conversation, ConversationConfig, LinkOpener, MAX_INPUT_CHARS, OpenLinkError, PromptDispatch,
};
use client::state::prompts::{Icon, PromptShortcut};
use protocol::{Message, Role};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("auto-submit task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "support-chat-cli", about = "Terminal front end for the newsletter support chat")]
struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Do not send the hidden system message to the endpoint.
    #[arg(long)]
    omit_system: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Refresh,
    Help,
    Prompt(usize),
    Say(String),
    Nothing,
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "" => Command::Nothing,
        "/quit" | "/exit" => Command::Quit,
        "/refresh" => Command::Refresh,
        "/help" => Command::Help,
        _ => match trimmed.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n > 0 => Command::Prompt(n - 1),
            _ => Command::Say(line.to_owned()),
        },
    }
}

/// Terminals cannot open a browser tab; print the link instead.
struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, url: &str) -> Result<(), OpenLinkError> {
        println!("  open in your browser: {url}");
        Ok(())
    }
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::User => "[user]",
        Icon::Mail => "[mail]",
        Icon::FileText => "[file]",
        Icon::Cpu => "[cpu] ",
    }
}

fn print_gallery(prompts: &[PromptShortcut]) {
    println!("Hi Dear, Reader");
    println!("What would you like to know?");
    println!("Use one of the most common prompts below or use your own to begin");
    if prompts.is_empty() {
        println!("  No prompts available.");
    }
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  /{} {} {}", i + 1, icon_glyph(prompt.icon), prompt.label);
    }
    println!("  /refresh clears the conversation, /quit exits");
}

fn print_message(message: &Message) {
    match message.role {
        Role::User => println!("you > {}", message.content),
        Role::Assistant => println!("assistant > {}", message.content),
        Role::System => {}
    }
}

/// Input is refused while a reply is still outstanding.
fn ready_for_input(conversation: &Conversation) -> bool {
    if conversation.is_loading() {
        println!("  (waiting for the previous reply)");
        return false;
    }
    true
}

/// Tracks how much of the visible thread has been printed.
struct Renderer {
    shown: usize,
}

impl Renderer {
    fn render(&mut self, conversation: &Conversation) {
        let visible = conversation.visible_messages();
        if visible.len() < self.shown {
            println!("(conversation cleared)");
            self.shown = 0;
        }
        for message in &visible[self.shown..] {
            print_message(message);
        }
        self.shown = visible.len();
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let transport = HttpTransport::new(&cli.base_url)?;
    tracing::info!(url = transport.url(), "chat endpoint");

    let config = ConversationConfig { send_system_messages: !cli.omit_system, ..ConversationConfig::default() };
    let conversation = Conversation::with_config(Arc::new(transport), Arc::new(PrintOpener), config);

    print_gallery(&conversation.prompts());
    let mut renderer = Renderer { shown: 0 };
    renderer.render(&conversation);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Nothing => {}
            Command::Help => print_gallery(&conversation.prompts()),
            Command::Refresh => conversation.refresh(),
            Command::Prompt(_) | Command::Say(_) if !ready_for_input(&conversation) => {}
            Command::Prompt(index) => {
                let Some(prompt) = conversation.prompts().get(index).cloned() else {
                    println!("  no prompt /{}", index + 1);
                    continue;
                };
                match conversation.select_prompt(&prompt.label) {
                    Ok(PromptDispatch::OpenedLink(_)) => {}
                    Ok(PromptDispatch::Scheduled(handles)) => {
                        for handle in handles {
                            handle.await?;
                        }
                    }
                    Err(e) => println!("  {e}"),
                }
            }
            Command::Say(text) => {
                let chars = text.chars().count();
                if chars > MAX_INPUT_CHARS {
                    println!("  ({chars}/{MAX_INPUT_CHARS})");
                }
                conversation.submit_text(text).await;
            }
        }
        renderer.render(&conversation);
    }
    Ok(())
}
