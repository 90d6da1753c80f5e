//! Round timers scheduled on the tokio runtime.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vocab_core::Timer;

/// Sleeps on each timer and sends it back once it elapses.
pub struct TimerScheduler {
    tx: mpsc::UnboundedSender<Timer>,
    pending: Vec<JoinHandle<()>>,
}

impl TimerScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Timer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            pending: Vec::new(),
        };
        (scheduler, rx)
    }

    pub fn schedule(&mut self, timer: Timer) {
        self.pending.retain(|handle| !handle.is_finished());
        let tx = self.tx.clone();
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(timer.delay).await;
            // receiver gone means the shell is shutting down
            let _ = tx.send(timer);
        }));
    }

    /// Drop every timer that has not fired yet.
    pub fn cancel_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}
