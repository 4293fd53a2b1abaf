//! Social Quest chat bot entry point.
//!
//! The bot listens for chat envelopes on NATS, runs each one through the
//! game, and publishes the replies back to the router.
//!
//! # Architecture
//!
//! ```text
//! NATS (inbound) --> MessageHandler --> GameEngine --> Dragonfly / memory
//!                          |
//!                          v
//!                  outbound channel --> forwarder --> NATS (outbound)
//! ```
//!
//! Every inbound message is handled on its own task. Replies for one
//! message are queued in order by a single task, so they reach the router
//! in the order the game produced them.

mod config;
mod error;
mod nats;

use std::sync::Arc;

use futures::StreamExt;
use socialquest_game::{GameEngine, MessageHandler, ReplyDispatcher};
use socialquest_store::{DragonflyStore, KvStore, MemoryStore};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;
use crate::error::BotError;
use crate::nats::NatsBridge;

/// Application entry point.
///
/// Initializes logging, loads configuration, connects to NATS and the state
/// store, then handles messages until the subscription ends.
///
/// # Errors
///
/// Returns an error if initialization fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("socialquest-bot starting");

    let config = BotConfig::load()?;
    info!(
        nats_url = config.nats_url,
        inbound_subject = config.inbound_subject,
        outbound_subject = config.outbound_subject,
        persistent = config.dragonfly_url.is_some(),
        max_hp = config.game.max_hp,
        command_prefix = config.game.command_prefix,
        "configuration loaded"
    );

    let nats = NatsBridge::connect(&config.nats_url).await?;

    match config.dragonfly_url.clone() {
        Some(url) => {
            let store = DragonflyStore::connect(&url).await?;
            run(config, store, nats).await?;
        }
        None => {
            warn!("no dragonfly_url configured, game state will not survive a restart");
            run(config, MemoryStore::new(), nats).await?;
        }
    }

    Ok(())
}

/// Wire the game to NATS and process messages until the subscription ends.
async fn run<S>(config: BotConfig, store: S, nats: NatsBridge) -> Result<(), BotError>
where
    S: KvStore + 'static,
{
    let engine = GameEngine::from_config(store, config.game)?;
    let (dispatcher, outbound) = ReplyDispatcher::new(config.outbound_capacity);
    let handler = MessageHandler::new(Arc::new(engine), dispatcher);

    let forwarder = tokio::spawn(
        nats.clone()
            .forward_replies(config.outbound_subject, outbound),
    );

    let mut subscriber = nats.subscribe(&config.inbound_subject).await?;
    info!("social quest ready, awaiting messages");

    while let Some(message) = subscriber.next().await {
        debug!(
            subject = %message.subject,
            payload_size = message.payload.len(),
            "received message"
        );

        let envelope = match NatsBridge::decode_envelope(&message.payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "failed to decode envelope, skipping");
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            if let Some(send) = handler.on_message(&envelope).await {
                if let Err(e) = send.await {
                    warn!(error = %e, "reply task failed");
                }
            }
        });
    }

    info!("NATS subscription ended, shutting down");
    drop(handler);
    if let Err(e) = forwarder.await {
        warn!(error = %e, "reply forwarder failed");
    }
    Ok(())
}
