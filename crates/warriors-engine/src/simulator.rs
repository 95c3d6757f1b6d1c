//! Deferred delivery of simulated replies.
//!
//! The simulator turns an accepted [`PendingReply`] into a timer task that
//! hands the reply back after a fixed delay. The task belongs to the
//! simulator: dropping the simulator aborts it, so nothing is delivered to a
//! conversation that no longer exists.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::conversation::PendingReply;

/// Default delay before a simulated reply arrives.
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(2000);

/// Schedules simulated replies on the tokio runtime.
///
/// At most one reply is scheduled at a time; scheduling another aborts the
/// previous task.
#[derive(Debug)]
pub struct ResponseSimulator {
    delay: Duration,
    ready_tx: mpsc::UnboundedSender<PendingReply>,
    ready_rx: mpsc::UnboundedReceiver<PendingReply>,
    task: Option<JoinHandle<()>>,
}

impl Default for ResponseSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_DELAY)
    }
}

impl ResponseSimulator {
    /// Create a simulator with the given reply delay.
    pub fn new(delay: Duration) -> Self {
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();
        Self {
            delay,
            ready_tx,
            ready_rx,
            task: None,
        }
    }

    /// Schedule `reply` to become ready after the configured delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, reply: PendingReply) {
        self.cancel();

        debug!(
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "simulated reply scheduled"
        );
        let tx = self.ready_tx.clone();
        let delay = self.delay;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(reply);
        }));
    }

    /// Whether a scheduled reply has not been collected yet.
    pub fn is_scheduled(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the scheduled reply.
    ///
    /// Never resolves while nothing is scheduled. Cancel safe, so it can be
    /// used as a `tokio::select!` branch.
    pub async fn next_ready(&mut self) -> Option<PendingReply> {
        let reply = self.ready_rx.recv().await;
        self.task = None;
        reply
    }

    /// Abort the scheduled reply, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("scheduled reply cancelled");
            task.abort();
        }
        // Drain anything that fired but was never collected.
        while self.ready_rx.try_recv().is_ok() {}
    }
}

impl Drop for ResponseSimulator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Conversation, SubmitOutcome};

    fn pending(query: &str) -> (Conversation, PendingReply) {
        let mut conv = Conversation::new();
        conv.set_draft(query);
        match conv.submit() {
            SubmitOutcome::Accepted(reply) => (conv, reply),
            SubmitOutcome::Ignored(reason) => panic!("ignored: {reason:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (_conv, reply) = pending("hello");
        let mut sim = ResponseSimulator::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();

        sim.schedule(reply.clone());
        assert!(sim.is_scheduled());

        let ready = sim.next_ready().await.unwrap();
        assert_eq!(ready, reply);
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(!sim.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_not_ready_before_delay() {
        let (_conv, reply) = pending("hello");
        let mut sim = ResponseSimulator::new(Duration::from_millis(2000));
        sim.schedule(reply);

        let early = tokio::time::timeout(Duration::from_millis(1999), sim.next_ready()).await;
        assert!(early.is_err(), "reply must not arrive before the delay");

        let late = tokio::time::timeout(Duration::from_millis(10), sim.next_ready()).await;
        assert!(late.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (_conv, reply) = pending("hello");
        let mut sim = ResponseSimulator::new(Duration::from_millis(100));
        sim.schedule(reply);
        sim.cancel();
        assert!(!sim.is_scheduled());

        let result = tokio::time::timeout(Duration::from_secs(10), sim.next_ready()).await;
        assert!(result.is_err(), "cancelled reply must never arrive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_scheduled_task() {
        let (_conv, reply) = pending("hello");
        let mut sim = ResponseSimulator::new(Duration::from_millis(100));
        sim.schedule(reply);
        let abort = sim.task.as_ref().unwrap().abort_handle();

        drop(sim);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(abort.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_scheduled_never_resolves() {
        let mut sim = ResponseSimulator::new(Duration::from_millis(10));
        let result = tokio::time::timeout(Duration::from_secs(60), sim.next_ready()).await;
        assert!(result.is_err());
    }
}
