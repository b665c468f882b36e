//! Realtime project chat gateway.
//!
//! Authenticated project members join per-project rooms over WebSocket and
//! exchange persisted chat messages.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=dev cargo run --bin campus-chat-server -- --seed fixtures/seed.json
//! JWT_SECRET=dev cargo run --bin campus-chat-server -- --issue-token 64b7f0c2a1d3e4f5a6b7c8d9
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use campus_chat_server::{
    domain::UserId,
    infrastructure::{
        auth::JwtTokenValidator,
        store::{InMemoryProjectStore, StoreFixture},
    },
    ui::Server,
};
use campus_chat_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "campus-chat-server")]
#[command(about = "Realtime project chat gateway over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Secret used to verify (and issue) HS256 tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// JSON fixture with users and projects to seed the store
    #[arg(long, env = "CHAT_SEED_FILE")]
    seed: Option<PathBuf>,

    /// Print a signed token for the given user id and exit
    #[arg(long, value_name = "USER_ID")]
    issue_token: Option<String>,

    /// Lifetime of tokens printed by --issue-token
    #[arg(long, default_value = "3600")]
    token_ttl_secs: u64,
}

fn issue_token(
    validator: &JwtTokenValidator,
    user_id: String,
    ttl: Duration,
) -> Result<String, Box<dyn std::error::Error>> {
    let user_id = UserId::try_from(user_id)?;
    Ok(validator.issue(&user_id, ttl)?)
}

fn build_store(seed: Option<PathBuf>) -> Result<InMemoryProjectStore, Box<dyn std::error::Error>> {
    match seed {
        Some(path) => {
            tracing::info!("Loading seed fixture from {}", path.display());
            let fixture = StoreFixture::load(&path)?;
            Ok(InMemoryProjectStore::from_fixture(
                fixture,
                Arc::new(SystemClock),
            )?)
        }
        None => {
            tracing::warn!("No seed fixture given, starting with an empty project store");
            Ok(InMemoryProjectStore::new())
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let validator = JwtTokenValidator::new(args.jwt_secret.as_bytes());

    if let Some(user_id) = args.issue_token {
        let token = issue_token(
            &validator,
            user_id,
            Duration::from_secs(args.token_ttl_secs),
        )?;
        println!("{}", token);
        return Ok(());
    }

    let store = build_store(args.seed)?;
    let server = Server::new(Arc::new(store), Arc::new(validator));
    server.run(args.host, args.port).await
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
