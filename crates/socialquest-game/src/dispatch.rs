//! Outbound reply dispatch.
//!
//! Every reply is a copy of the inbound envelope with `mode` set to
//! `reply` and the text replaced. Copies are built before anything is sent,
//! so the source envelope is never observed half-rewritten. The copies for
//! one event are then sent by a single background task, one after another,
//! which keeps their order intact while leaving the caller free to return.

use socialquest_types::Envelope;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Queues reply envelopes onto the outbound channel.
#[derive(Debug, Clone)]
pub struct ReplyDispatcher {
    tx: mpsc::Sender<Envelope>,
}

impl ReplyDispatcher {
    /// Create a dispatcher and the receiving end of its outbound channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Wrap an existing sender.
    pub const fn from_sender(tx: mpsc::Sender<Envelope>) -> Self {
        Self { tx }
    }

    /// Emit one reply per text, in order, in the background.
    ///
    /// Returns `None` when there is nothing to send. Otherwise returns the
    /// handle of the sending task; callers may await it or drop it.
    pub fn dispatch(&self, source: &Envelope, texts: &[String]) -> Option<JoinHandle<()>> {
        if texts.is_empty() {
            return None;
        }

        let replies: Vec<Envelope> = texts.iter().map(|text| source.reply(text)).collect();
        let tx = self.tx.clone();

        Some(tokio::spawn(async move {
            let total = replies.len();
            for (index, reply) in replies.into_iter().enumerate() {
                if tx.send(reply).await.is_err() {
                    warn!(
                        sent = index,
                        dropped = total.saturating_sub(index),
                        "outbound channel closed, dropping replies"
                    );
                    return;
                }
            }
            debug!(count = total, "replies queued");
        }))
    }
}
