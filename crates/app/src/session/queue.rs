//! Ordered durable-cart write queue.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::warn;

use plaza::carts::Cart;

use crate::domain::{accounts::records::AccountUuid, carts::CartsService};

/// Retry policy for a single durable-cart write.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// Serializes durable cart writes for one signed-in session.
///
/// Optimistic local updates can fire network writes faster than they
/// complete, so every write is funneled through this bounded FIFO
/// queue and a single consumer task. A write starts only after the
/// previous one finished, success or exhausted retries, which keeps
/// server-side ordering identical to the order the user acted in.
///
/// Exhausted retries are logged and counted, never surfaced; local
/// state is not rolled back, so local and server carts can diverge
/// until the next successful write.
#[derive(Debug)]
pub struct CartSyncQueue {
    tx: mpsc::Sender<Cart>,
    failed_writes: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl CartSyncQueue {
    #[must_use]
    pub fn spawn(
        carts: Arc<dyn CartsService>,
        account: AccountUuid,
        policy: RetryPolicy,
        capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let failed_writes = Arc::new(AtomicU64::new(0));

        let worker = tokio::spawn(drain(carts, account, policy, rx, Arc::clone(&failed_writes)));

        Self {
            tx,
            failed_writes,
            worker,
        }
    }

    /// Appends a full-cart snapshot to the write queue, waiting for
    /// capacity when the queue is full.
    pub async fn enqueue(&self, cart: Cart) {
        if self.tx.send(cart).await.is_err() {
            warn!("cart sync queue consumer is gone, dropping write");
        }
    }

    /// Number of writes abandoned after exhausting retries since the
    /// queue started.
    #[must_use]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Closes the queue and waits for queued writes to drain.
    pub async fn shutdown(self) {
        drop(self.tx);

        if let Err(error) = self.worker.await {
            warn!(%error, "cart sync worker did not shut down cleanly");
        }
    }
}

async fn drain(
    carts: Arc<dyn CartsService>,
    account: AccountUuid,
    policy: RetryPolicy,
    mut rx: mpsc::Receiver<Cart>,
    failed_writes: Arc<AtomicU64>,
) {
    while let Some(cart) = rx.recv().await {
        let mut attempt = 1_u32;

        loop {
            match carts.put_cart(account, cart.clone()).await {
                Ok(()) => break,
                Err(error) if attempt < policy.attempts => {
                    warn!(%error, attempt, "cart write failed, retrying");
                    attempt += 1;
                    sleep(policy.delay).await;
                }
                Err(error) => {
                    warn!(%error, attempts = policy.attempts, "cart write abandoned");
                    failed_writes.fetch_add(1, Ordering::Relaxed);
                    break;
                }
            }
        }
    }
}
