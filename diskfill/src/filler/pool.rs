use std::sync::Arc;

use tokio::{
    sync::Semaphore,
    task::{self, JoinHandle},
};

use super::{worker::report_stop, Storage, StopReason, Worker};
use crate::error::Error;

/// Bounded set of blocking threads running fillers.
///
/// A filler only gives its slot back once it stopped, so at most
/// `max_workers` fillers make progress at the same time.
pub struct Pool {
    slots: Arc<Semaphore>,
}

impl Pool {
    pub fn new(max_workers: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max_workers)),
        }
    }
    pub fn spawn<S: Storage>(&self, mut worker: Worker<S>) -> JoinHandle<StopReason> {
        let slots = self.slots.clone();
        let method = worker.method();
        tokio::spawn(async move {
            let _permit = match slots.acquire_owned().await {
                Ok(x) => x,
                Err(err) => return StopReason::Failed(err.to_string()),
            };
            log::debug!("{} filler started", method);
            match task::spawn_blocking(move || worker.run()).await {
                Ok(reason) => reason,
                Err(err) => report_stop(method, Error::from(err), &mut std::io::stdout()),
            }
        })
    }
}
