//! Simple chat relay server
//!
//! Run with: cargo run --example simple_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example simple_server                    # binds to 0.0.0.0:3000
//!   cargo run --example simple_server localhost          # binds to 127.0.0.1:3000
//!   cargo run --example simple_server 127.0.0.1:3001     # binds to 127.0.0.1:3001
//!
//! ## Trying it out
//!
//! Watch the stream:
//!   curl -N -H 'Accept: text/event-stream' http://localhost:3000/api/events
//!
//! Send a message:
//!   curl -X POST --data '"hello"' http://localhost:3000/api/chat/send-message
//!
//! Fetch history:
//!   curl http://localhost:3000/api/chat/get-history

use std::net::SocketAddr;
use std::time::Duration;

use chat_relay::{ChatServer, RelayConfig, ServerConfig};

const DEFAULT_PORT: u16 = 3000;

fn parse_bind_addr(arg: Option<String>) -> SocketAddr {
    let Some(arg) = arg else {
        return SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
    };

    if arg == "localhost" {
        return SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));
    }

    arg.parse().unwrap_or_else(|e| {
        eprintln!("Invalid bind address '{}': {}", arg, e);
        std::process::exit(2);
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info".into()),
        )
        .init();

    let addr = parse_bind_addr(std::env::args().nth(1));

    let server = ChatServer::with_relay_config(
        ServerConfig::default().bind(addr).max_connections(1000),
        RelayConfig::default()
            .history_capacity(10_000)
            .stamp_messages(true)
            .keep_alive(Duration::from_secs(15)),
    );

    println!("Chat relay listening on http://{}", server.bind_addr());
    println!("Press Ctrl+C to stop");

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    let stats = server.relay().stats();
    println!(
        "Stats: messages={} deliveries={} failures={} subscribers_total={}",
        stats.messages_accepted, stats.deliveries, stats.delivery_failures, stats.subscriptions_total,
    );

    Ok(())
}
