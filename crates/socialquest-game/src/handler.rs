//! Entry point for inbound messages.
//!
//! [`MessageHandler`] validates the envelope, runs the engine, and hands the
//! resulting texts to the [`ReplyDispatcher`]. It is cheap to clone and can
//! be invoked from many tasks at once.

use std::sync::Arc;

use socialquest_store::KvStore;
use socialquest_types::Envelope;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::damage::{DamageSource, SeededDamage};
use crate::dispatch::ReplyDispatcher;
use crate::engine::GameEngine;

/// Validates, processes, and answers inbound envelopes.
pub struct MessageHandler<S, D = SeededDamage> {
    engine: Arc<GameEngine<S, D>>,
    dispatcher: ReplyDispatcher,
}

impl<S, D> Clone for MessageHandler<S, D> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<S: KvStore, D: DamageSource> MessageHandler<S, D> {
    /// Combine an engine with a dispatcher.
    pub const fn new(engine: Arc<GameEngine<S, D>>, dispatcher: ReplyDispatcher) -> Self {
        Self { engine, dispatcher }
    }

    /// The shared engine.
    pub const fn engine(&self) -> &Arc<GameEngine<S, D>> {
        &self.engine
    }

    /// Process one inbound envelope.
    ///
    /// Envelopes missing the user, room, or text are logged and dropped.
    /// Returns the handle of the task sending the replies, or `None` when
    /// there are none.
    pub async fn on_message(&self, envelope: &Envelope) -> Option<JoinHandle<()>> {
        let sender = match envelope.sender() {
            Ok(sender) => sender,
            Err(e) => {
                warn!(error = %e, "dropping malformed envelope");
                return None;
            }
        };

        let replies = self.engine.handle(&sender).await;
        debug!(
            room = sender.key.room,
            user = sender.key.user,
            replies = replies.len(),
            "message handled"
        );
        self.dispatcher.dispatch(envelope, &replies)
    }
}
