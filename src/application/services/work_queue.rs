use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, mpsc, watch};

use crate::domain::{JobId, JobUrl};

/// Queue item: the only job state a worker holds while capturing.
#[derive(Debug, Clone)]
pub struct CaptureMessage {
    pub job_id: JobId,
    pub url: JobUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue full")]
    Full,
    #[error("queue closed")]
    Closed,
}

/// Bounded FIFO shared by the dispatcher (producer) and every capture worker (consumers).
///
/// Closing stops new submissions only. Workers keep receiving buffered messages, and
/// retries already on their way back, until the queue is empty.
#[derive(Clone)]
pub struct WorkQueue {
    sender: mpsc::Sender<CaptureMessage>,
    receiver: Arc<Mutex<mpsc::Receiver<CaptureMessage>>>,
    closed: Arc<watch::Sender<bool>>,
    pending_requeues: Arc<AtomicUsize>,
    requeued: Arc<Notify>,
}

impl WorkQueue {
    pub fn new(max_depth: usize) -> Self {
        let (sender, receiver) = mpsc::channel(max_depth.max(1));
        let (closed, _) = watch::channel(false);
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            closed: Arc::new(closed),
            pending_requeues: Arc::new(AtomicUsize::new(0)),
            requeued: Arc::new(Notify::new()),
        }
    }

    /// Claims one slot without blocking. The slot is released if the permit is dropped
    /// unused, so a failed submission never changes the depth.
    pub fn try_reserve(&self) -> Result<mpsc::Permit<'_, CaptureMessage>, QueueError> {
        if self.is_closed() {
            return Err(QueueError::Closed);
        }
        self.sender.try_reserve().map_err(|e| match e {
            mpsc::error::TrySendError::Full(()) => QueueError::Full,
            mpsc::error::TrySendError::Closed(()) => QueueError::Closed,
        })
    }

    /// Puts a message back at the tail after `delay`. Runs detached so a worker is
    /// never parked on a full queue. Closing the queue cuts the delay short.
    pub fn requeue(&self, message: CaptureMessage, delay: Duration) {
        self.pending_requeues.fetch_add(1, Ordering::AcqRel);

        let sender = self.sender.clone();
        let pending = Arc::clone(&self.pending_requeues);
        let requeued = Arc::clone(&self.requeued);
        let mut closed = self.closed.subscribe();
        tokio::spawn(async move {
            if !delay.is_zero() && !*closed.borrow_and_update() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = closed.changed() => {}
                }
            }
            let job_id = message.job_id;
            if sender.send(message).await.is_err() {
                tracing::warn!(job_id = %job_id, "Work queue dropped before retry could be enqueued");
            }
            pending.fetch_sub(1, Ordering::AcqRel);
            requeued.notify_waiters();
        });
    }

    /// Next message in submission order. Once the queue is closed this drains what is
    /// left and returns `None` when nothing is buffered or on its way back.
    pub async fn next(&self) -> Option<CaptureMessage> {
        let mut receiver = self.receiver.lock().await;

        let mut closed = self.closed.subscribe();
        if !*closed.borrow_and_update() {
            tokio::select! {
                message = receiver.recv() => return message,
                _ = closed.changed() => {}
            }
        }

        loop {
            let requeued = self.requeued.notified();
            tokio::pin!(requeued);
            requeued.as_mut().enable();

            let pending = self.pending_requeues.load(Ordering::Acquire);
            match receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(_) if pending == 0 => return None,
                Err(_) => {}
            }

            // A retry is still in flight; it skips its delay once the queue is closed.
            tokio::select! {
                message = receiver.recv() => return message,
                _ = &mut requeued => {}
            }
        }
    }

    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    pub fn depth(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}
