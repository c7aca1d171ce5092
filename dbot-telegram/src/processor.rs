//! Per-update guard around the handler chain, and the per-user FIFO that feeds it.
//!
//! The chain propagates handler errors. This is the outer boundary that stops there: the error
//! is logged, optionally answered with a short notice, and the next update is unaffected.
//!
//! Updates from one user are handled one at a time in arrival order: [`MessageProcessor::enqueue`]
//! appends to that user's queue and a single worker task drains it. Different users run in
//! parallel. A worker exits once its queue is empty.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dbot_core::{Bot, HandlerResponse, Message, TextFormat, UserId};
use handler_chain::HandlerChain;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

/// Sent to the user when their update failed and failure replies are on.
pub const FAILURE_REPLY: &str = "Service is temporarily unavailable, please try again later.";

type Job = (Message, oneshot::Sender<Option<HandlerResponse>>);
type Queues = HashMap<UserId, mpsc::UnboundedSender<Job>>;

/// Runs messages through the chain, one isolated unit of work per update.
#[derive(Clone)]
pub struct MessageProcessor {
    chain: HandlerChain,
    bot: Arc<dyn Bot>,
    reply_on_failure: bool,
    queues: Arc<Mutex<Queues>>,
}

impl MessageProcessor {
    /// Failure replies are on by default.
    pub fn new(chain: HandlerChain, bot: Arc<dyn Bot>) -> Self {
        Self {
            chain,
            bot,
            reply_on_failure: true,
            queues: Arc::default(),
        }
    }

    pub fn with_reply_on_failure(mut self, reply_on_failure: bool) -> Self {
        self.reply_on_failure = reply_on_failure;
        self
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    /// Dispatches one message. Returns None when the chain failed; the failure is logged and,
    /// when enabled, the user is told.
    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    pub async fn process_message(&self, message: &Message) -> Option<HandlerResponse> {
        match self.chain.handle(message).await {
            Ok(response) => Some(response),
            Err(e) => {
                error!(
                    error = %e,
                    user_id = message.user_id(),
                    message_id = %message.id,
                    "Handler chain failed"
                );
                if self.reply_on_failure {
                    if let Err(send_err) = self
                        .bot
                        .send_text(&message.chat, FAILURE_REPLY, TextFormat::Plain)
                        .await
                    {
                        warn!(error = %send_err, chat_id = message.chat.id, "Failed to send failure reply");
                    }
                }
                None
            }
        }
    }

    /// Appends the message to its user's queue and returns immediately. The receiver yields
    /// the outcome once the message has been processed; dropping it is fine.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue(&self, message: Message) -> oneshot::Receiver<Option<HandlerResponse>> {
        let (done_tx, done_rx) = oneshot::channel();
        let user_id = message.user_id();
        let mut queues = self.lock_queues();

        let job = match queues.get(&user_id) {
            Some(queue) => match queue.send((message, done_tx)) {
                Ok(()) => {
                    debug!(user_id, "Queued behind the user's pending updates");
                    return done_rx;
                }
                // Worker is gone (it panicked); start a new one.
                Err(mpsc::error::SendError(job)) => job,
            },
            None => (message, done_tx),
        };

        let (queue, jobs) = mpsc::unbounded_channel();
        // The receiver is alive, so this cannot fail.
        let _ = queue.send(job);
        queues.insert(user_id, queue);
        drop(queues);

        tokio::spawn(self.clone().drain(user_id, jobs));
        done_rx
    }

    /// Number of users with a running worker.
    pub fn active_users(&self) -> usize {
        self.lock_queues().len()
    }

    /// Worker for one user. Senders only push while holding the map lock, so checking the
    /// queue again under that lock before removing the entry cannot lose a message.
    async fn drain(self, user_id: UserId, mut jobs: mpsc::UnboundedReceiver<Job>) {
        loop {
            let (message, done) = match jobs.try_recv() {
                Ok(job) => job,
                Err(_) => {
                    let mut queues = self.lock_queues();
                    match jobs.try_recv() {
                        Ok(job) => job,
                        Err(_) => {
                            queues.remove(&user_id);
                            debug!(user_id, "User queue drained");
                            return;
                        }
                    }
                }
            };

            info!(
                user_id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "step: processing message (handler chain started)"
            );
            let response = self.process_message(&message).await;
            let _ = done.send(response);
        }
    }

    fn lock_queues(&self) -> MutexGuard<'_, Queues> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
