//! Handles for background collection watchers.

use tokio::task::JoinHandle;

/// Keeps a watcher task alive. Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stops the watcher.
    pub fn unsubscribe(self) {
        // Drop aborts the task
    }

    /// Returns true once the watcher has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
