//! Portfolio assistant CLI binary entry point.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use portfolio_assistant::cli::render::render_message;
use portfolio_assistant::cli::{Cli, Commands};
use portfolio_assistant::client::AssistantClient;
use portfolio_assistant::config::{self, AssistantConfig};
use portfolio_assistant::conversation::{Conversation, ConversationEvent, SubmitOutcome};
use portfolio_assistant::portfolio::Portfolio;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AssistantConfig::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(t) = cli.temperature {
        config.settings.temperature = Some(t);
    }
    if let Some(max) = cli.max_tokens {
        config.settings.max_tokens = Some(max);
    }

    let portfolio_path = cli
        .portfolio
        .or_else(|| config.portfolio_path.clone())
        .or_else(|| config::default_portfolio_path().filter(|p| p.exists()));
    let portfolio = Portfolio::load_or_default(portfolio_path.as_deref())?;
    let hyperlinks = !cli.no_hyperlinks;

    match cli.command {
        Commands::Prompt => {
            let client = AssistantClient::new(&config, &portfolio);
            println!("{}", client.system_context());
        }
        Commands::Ask(args) => {
            let conversation = Conversation::new(AssistantClient::new(&config, &portfolio));
            match conversation.submit(&args.text()).await {
                SubmitOutcome::Replied(reply) => println!("{}", render_message(&reply, hyperlinks)),
                SubmitOutcome::Ignored(reason) => {
                    return Err(format!("question ignored: {reason:?}").into())
                }
            }
        }
        Commands::Chat => handle_chat(&config, &portfolio, hyperlinks).await?,
    }

    Ok(())
}

async fn handle_chat(
    config: &AssistantConfig,
    portfolio: &Portfolio,
    hyperlinks: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = AssistantClient::new(config, portfolio);
    if !client.is_configured() {
        eprintln!("No API key found (set API_KEY or GEMINI_API_KEY); replies will be limited.");
    }

    let conversation = Conversation::new(client);
    conversation.subscribe(Arc::new(move |event: ConversationEvent| match event {
        ConversationEvent::AwaitingChanged(true) => eprintln!("  … thinking"),
        ConversationEvent::MessageAppended(message) => {
            if message.role() == portfolio_assistant::types::Role::Assistant {
                println!("{}\n", render_message(&message, hyperlinks));
            }
        }
        ConversationEvent::AwaitingChanged(false) => {}
    }));

    for message in conversation.transcript() {
        println!("{}\n", render_message(&message, hyperlinks));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            _ => {
                conversation.set_input(line);
                conversation.send().await;
            }
        }
    }

    println!();
    Ok(())
}
