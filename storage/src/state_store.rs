//! In-memory conversation state: one [`Step`] per user plus the append-only list of known users.
//!
//! Every user gets its own `tokio::sync::Mutex<Step>`. The dispatcher holds that lock
//! ([`StepGuard`]) for the whole handler run, so two updates from the same user are applied one
//! after the other while different users proceed in parallel. The map itself is behind a second
//! mutex that is only held for lookups.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dbot_core::{Step, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

struct Slot {
    step: Arc<Mutex<Step>>,
    last_touched: u64,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<UserId, Slot>,
    known_users: Vec<UserId>,
    known_set: HashSet<UserId>,
    clock: u64,
}

impl Inner {
    /// Drops least-recently-touched slots until at most `max` remain. Slots that are locked or
    /// being waited on (someone else holds the Arc) and `keep` are never evicted.
    fn evict_over(&mut self, max: usize, keep: UserId) {
        while self.slots.len() > max {
            let victim = self
                .slots
                .iter()
                .filter(|(uid, slot)| **uid != keep && Arc::strong_count(&slot.step) == 1)
                .min_by_key(|(_, slot)| slot.last_touched)
                .map(|(uid, _)| *uid);

            match victim {
                Some(uid) => {
                    self.slots.remove(&uid);
                    info!(user_id = uid, max_users = max, "Evicted conversation state");
                }
                None => break,
            }
        }
    }
}

/// Exclusive access to one user's step. Dropping the guard releases the user.
pub struct StepGuard {
    user_id: UserId,
    guard: OwnedMutexGuard<Step>,
}

impl StepGuard {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn step(&self) -> Step {
        *self.guard
    }

    /// Overwrites the step. Any step may follow any step.
    pub fn set(&mut self, step: Step) {
        let from = *self.guard;
        if from != step {
            debug!(user_id = self.user_id, from = %from, to = %step, "Step changed");
        }
        *self.guard = step;
    }
}

/// Per-user step store. Unbounded by default; see [`ConversationStateStore::with_max_users`].
pub struct ConversationStateStore {
    inner: Mutex<Inner>,
    max_users: Option<usize>,
}

impl ConversationStateStore {
    /// Creates an unbounded store: entries live for the whole process.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_users: None,
        }
    }

    /// Creates a store keeping at most `max_users` entries (at least one). Evicted users start
    /// over from [`Step::Idle`] but stay in the known-users list.
    pub fn with_max_users(max_users: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_users: Some(max_users.max(1)),
        }
    }

    /// Returns the slot for `user_id`, creating it (Idle, known) on first sight.
    async fn slot(&self, user_id: UserId) -> Arc<Mutex<Step>> {
        let mut inner = self.inner.lock().await;
        inner.clock += 1;
        let now = inner.clock;

        if let Some(slot) = inner.slots.get_mut(&user_id) {
            slot.last_touched = now;
            return slot.step.clone();
        }

        if inner.known_set.insert(user_id) {
            inner.known_users.push(user_id);
            info!(
                user_id = user_id,
                known_users = inner.known_users.len(),
                "New user"
            );
        }

        let step = Arc::new(Mutex::new(Step::Idle));
        inner.slots.insert(
            user_id,
            Slot {
                step: step.clone(),
                last_touched: now,
            },
        );
        if let Some(max) = self.max_users {
            inner.evict_over(max, user_id);
        }
        step
    }

    /// Waits for exclusive access to the user's step, initializing it on first contact.
    pub async fn lock(&self, user_id: UserId) -> StepGuard {
        let slot = self.slot(user_id).await;
        StepGuard {
            user_id,
            guard: slot.lock_owned().await,
        }
    }

    /// Current step of the user. Not a pure read: an unseen user is recorded as known and
    /// initialized to [`Step::Idle`].
    pub async fn get_step(&self, user_id: UserId) -> Step {
        self.lock(user_id).await.step()
    }

    /// Overwrites the user's step without validating the transition.
    pub async fn set_step(&self, user_id: UserId, step: Step) {
        self.lock(user_id).await.set(step);
    }

    /// Every user ever seen, in first-contact order.
    pub async fn known_users(&self) -> Vec<UserId> {
        self.inner.lock().await.known_users.clone()
    }

    pub async fn is_known(&self, user_id: UserId) -> bool {
        self.inner.lock().await.known_set.contains(&user_id)
    }

    /// Number of users that currently have a state entry.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ConversationStateStore {
    fn default() -> Self {
        Self::new()
    }
}
