use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A background task that can be checked for completion and cancelled.
pub trait Cancellable {
    /// Cancel the task if it is still running.
    fn cancel(&mut self);
    /// `true` once the task has returned.
    fn is_done(&self) -> bool;
}

impl Cancellable for JoinHandle<()> {
    fn cancel(&mut self) {
        self.abort();
    }

    fn is_done(&self) -> bool {
        self.is_finished()
    }
}

/// A cooperative shutdown request.
pub trait StopSignal {
    /// Ask the task to stop at its next suspension point.
    fn request_stop(&self);
}

impl StopSignal for watch::Sender<bool> {
    fn request_stop(&self) {
        self.send_replace(true);
    }
}

/// Owns a background task together with its stop channel.
///
/// Dropping the guard requests a stop and cancels the task if it has not
/// returned yet, so a forgotten handle never leaves a worker running.
#[derive(Debug)]
pub struct TaskGuard<H: Cancellable, S: StopSignal> {
    task: Option<H>,
    stop: Option<S>,
}

impl<H: Cancellable, S: StopSignal> TaskGuard<H, S> {
    /// Guard `task`, stoppable through `stop`.
    pub const fn new(task: H, stop: S) -> Self {
        Self {
            task: Some(task),
            stop: Some(stop),
        }
    }

    /// Request a cooperative stop. Idempotent.
    pub fn request_stop(&self) {
        if let Some(stop) = &self.stop {
            stop.request_stop();
        }
    }

    /// Take the task out for joining; the guard no longer cancels it.
    pub fn take_task(&mut self) -> Option<H> {
        self.task.take()
    }

    /// `true` while the guard still owns an unfinished task.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_done())
    }
}

impl<H: Cancellable, S: StopSignal> Drop for TaskGuard<H, S> {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.request_stop();
        }
        if let Some(mut task) = self.task.take()
            && !task.is_done()
        {
            task.cancel();
        }
    }
}
