#![cfg(feature = "std")]

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::session::SessionEvent;

/// One-shot timer for the computer's deferred move.
///
/// Each armed timer carries an epoch. Cancelling aborts the sleeping task
/// and moves to a new epoch, so an `OpponentTurn` that was already queued
/// before the cancel is recognised as stale by [`accept`](Self::accept).
pub struct MoveScheduler {
    delay: Duration,
    epoch: u64,
    pending: Option<JoinHandle<()>>,
    events: UnboundedSender<SessionEvent>,
}

impl MoveScheduler {
    pub fn new(delay: Duration, events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            delay,
            epoch: 0,
            pending: None,
            events,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a move is armed and not yet consumed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Arms the timer, replacing any timer already running. Returns the
    /// epoch the eventual `OpponentTurn` will carry.
    pub fn schedule(&mut self) -> u64 {
        self.cancel();
        let epoch = self.epoch;
        let delay = self.delay;
        let events = self.events.clone();
        log::debug!("Opponent move armed (epoch {}, {:?})", epoch, delay);
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = events.send(SessionEvent::OpponentTurn { epoch });
        }));
        epoch
    }

    /// Disarms the timer. Returns `true` if one was armed.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                task.abort();
                log::debug!("Opponent move cancelled (epoch {})", self.epoch);
                self.epoch += 1;
                true
            }
            None => false,
        }
    }

    /// Consumes a fired timer. Only the event of the currently armed epoch
    /// is accepted; anything else is stale.
    pub fn accept(&mut self, epoch: u64) -> bool {
        if self.pending.is_some() && epoch == self.epoch {
            self.pending = None;
            self.epoch += 1;
            true
        } else {
            false
        }
    }
}

impl Drop for MoveScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = MoveScheduler::new(Duration::from_millis(700), tx);
        let epoch = scheduler.schedule();

        let started = tokio::time::Instant::now();
        let event = rx.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(700));
        assert!(matches!(event, SessionEvent::OpponentTurn { epoch: e } if e == epoch));
        assert!(scheduler.accept(epoch));
        assert!(!scheduler.accept(epoch));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = MoveScheduler::new(Duration::from_millis(700), tx);
        scheduler.schedule();
        assert!(scheduler.cancel());

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_event_from_old_epoch_is_stale() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = MoveScheduler::new(Duration::from_millis(10), tx);
        let old = scheduler.schedule();
        let Some(SessionEvent::OpponentTurn { epoch }) = rx.recv().await else {
            panic!("expected a timer event");
        };
        assert_eq!(epoch, old);

        // fired but not yet handled when the timer is re-armed
        let fresh = scheduler.schedule();
        assert_ne!(fresh, old);
        assert!(!scheduler.accept(old));
        assert!(scheduler.accept(fresh));
    }
}
