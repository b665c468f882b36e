//! Command-line client for the project chat gateway.
//!
//! Connects with a bearer token, joins one project room and sends lines from stdin
//! as chat messages. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval) and re-joins the room. A rejected token exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campus-chat-client -- --token <JWT> --project 64b7f0c2a1d3e4f5a6b7c8d9
//! ```

use clap::Parser;

use campus_chat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "campus-chat-client")]
#[command(about = "Chat in a CollabCampus project room from the terminal", long_about = None)]
struct Args {
    /// WebSocket gateway URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// Bearer token issued for your user
    #[arg(short = 't', long, env = "CHAT_TOKEN", hide_env_values = true)]
    token: String,

    /// Project whose room to join
    #[arg(short = 'p', long)]
    project: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = campus_chat_client::run_client(args.url, args.token, args.project).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
