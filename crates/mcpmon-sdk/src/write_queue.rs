//! Serialized write queue
//!
//! One background task owns the handler and processes requests strictly in
//! submission order, so writes never interleave. Each submitter gets the
//! handler's result for its own request.

use parking_lot::Mutex;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Errors from submitting to a [`WriteQueue`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteQueueError {
    /// The queue was shut down before the request was accepted
    #[error("Write queue is shut down")]
    Closed,

    /// The worker stopped before answering
    #[error("Write queue worker stopped before completing the request")]
    WorkerStopped,
}

struct Request<T, R> {
    item: T,
    reply: oneshot::Sender<R>,
}

/// Single-worker queue applying `handler` to submitted items in order
pub struct WriteQueue<T, R> {
    sender: Mutex<Option<mpsc::UnboundedSender<Request<T, R>>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<T, R> WriteQueue<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Spawn the worker on the current runtime
    pub fn new<F, Fut>(mut handler: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Request<T, R>>();

        let worker = tokio::spawn(async move {
            while let Some(Request { item, reply }) = receiver.recv().await {
                let result = handler(item).await;
                if reply.send(result).is_err() {
                    tracing::debug!("Write queue submitter went away before the result");
                }
            }
            tracing::debug!("Write queue worker stopped");
        });

        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Enqueue an item and wait for the handler's result
    ///
    /// The item is queued as soon as this is called; the ordering among
    /// submitters is the order of their calls, not of their awaits.
    pub fn submit(&self, item: T) -> impl Future<Output = Result<R, WriteQueueError>> + use<T, R> {
        let (reply, response) = oneshot::channel();
        let queued = match self.sender.lock().as_ref() {
            Some(sender) => sender
                .send(Request { item, reply })
                .map_err(|_| WriteQueueError::Closed),
            None => Err(WriteQueueError::Closed),
        };

        async move {
            queued?;
            response.await.map_err(|_| WriteQueueError::WorkerStopped)
        }
    }

    /// Stop accepting items and wait for the queued ones to finish
    pub async fn shutdown(&self) {
        self.sender.lock().take();
        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Write queue worker failed");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl<T, R> std::fmt::Debug for WriteQueue<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteQueue")
            .field("closed", &self.sender.lock().is_none())
            .finish()
    }
}
