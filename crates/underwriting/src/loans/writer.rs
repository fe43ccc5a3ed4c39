use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::repository::{NewLoanRecord, RecordStore};

/// Handle feeding the background persistence worker.
///
/// Submitting never waits on the store. Store failures surface only in the worker's logs, so a
/// decision already handed to the caller is never affected by persistence.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    sender: mpsc::Sender<NewLoanRecord>,
}

impl RecordWriter {
    /// Spawns the worker on the current tokio runtime. The worker exits once every writer
    /// handle is dropped and the queue is drained.
    pub fn spawn<S>(store: Arc<S>, capacity: usize) -> (Self, JoinHandle<()>)
    where
        S: RecordStore + ?Sized + 'static,
    {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(drain(store, receiver));
        (Self { sender }, handle)
    }

    pub fn submit(&self, record: NewLoanRecord) -> Result<(), WriterError> {
        self.sender.try_send(record).map_err(|err| match err {
            TrySendError::Full(_) => WriterError::QueueFull,
            TrySendError::Closed(_) => WriterError::Closed,
        })
    }
}

async fn drain<S>(store: Arc<S>, mut receiver: mpsc::Receiver<NewLoanRecord>)
where
    S: RecordStore + ?Sized,
{
    while let Some(record) = receiver.recv().await {
        let decision = record.decision;
        match store.append(record).await {
            Ok(stored) => debug!(id = stored.id, %decision, "loan record persisted"),
            Err(err) => error!(error = %err, %decision, "failed to persist loan record"),
        }
    }
    debug!("record writer stopped");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WriterError {
    #[error("persistence queue is full")]
    QueueFull,
    #[error("persistence worker has stopped")]
    Closed,
}

impl WriterError {
    pub(crate) fn log_dropped(self) {
        warn!(error = %self, "loan record dropped before persistence");
    }
}
