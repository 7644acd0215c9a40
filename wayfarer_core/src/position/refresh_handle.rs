use tokio::{sync::oneshot, task::JoinHandle};
use tracing::debug;

/// Disposer for the periodic position refresh.
///
/// `stop` ends the task and waits for it. Dropping the handle aborts it.
pub struct RefreshHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub(crate) fn new(stop: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self {
            stop: Some(stop),
            task,
        }
    }

    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        if let Err(err) = (&mut self.task).await {
            debug!("Position refresh ended with {err}");
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.abort();
    }
}
