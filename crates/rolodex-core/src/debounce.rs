//! Single-slot debouncer for search-as-you-type.
//!
//! Each [`Debouncer::push`] replaces the pending value and restarts the
//! delay; only the last value of a burst reaches the receiver. Aborted
//! timers are dropped immediately rather than left to fire into nothing.
//!
//! Every delivery is stamped with the generation it was scheduled in. A
//! value that was already sent when [`Debouncer::cancel`] ran is discarded
//! by [`Settled`] instead of surfacing late.

use std::{
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
  },
  time::Duration,
};

use tokio::{sync::mpsc, task::JoinHandle};

/// Delay used for free-text search input.
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

pub struct Debouncer<T> {
  delay:      Duration,
  pending:    Option<JoinHandle<()>>,
  generation: Arc<AtomicU64>,
  tx:         mpsc::UnboundedSender<(u64, T)>,
}

/// Receiving end of a [`Debouncer`]. Yields only values that were neither
/// superseded nor cancelled.
pub struct Settled<T> {
  rx:         mpsc::UnboundedReceiver<(u64, T)>,
  generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
  /// A debouncer and the receiver that settled values are delivered to.
  ///
  /// Must be used from within a tokio runtime.
  pub fn new(delay: Duration) -> (Self, Settled<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let generation = Arc::new(AtomicU64::new(0));
    let settled = Settled { rx, generation: generation.clone() };
    (Self { delay, pending: None, generation, tx }, settled)
  }

  /// Schedule `value`, superseding anything still pending.
  pub fn push(&mut self, value: T) {
    self.cancel();
    let tx = self.tx.clone();
    let delay = self.delay;
    let generation = self.generation.load(Ordering::Relaxed);
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      // The receiver may be gone during shutdown.
      let _ = tx.send((generation, value));
    }));
  }

  /// Drop the pending value, if any, including one already sent but not
  /// yet received.
  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
    self.generation.fetch_add(1, Ordering::Relaxed);
  }

  pub fn is_pending(&self) -> bool {
    self.pending.as_ref().is_some_and(|h| !h.is_finished())
  }

  pub fn delay(&self) -> Duration { self.delay }
}

impl<T> Settled<T> {
  fn is_current(&self, generation: u64) -> bool {
    generation == self.generation.load(Ordering::Relaxed)
  }

  /// Wait for the next settled value. `None` once the debouncer is gone.
  pub async fn recv(&mut self) -> Option<T> {
    loop {
      let (generation, value) = self.rx.recv().await?;
      if self.is_current(generation) {
        return Some(value);
      }
    }
  }

  /// The next settled value if one is ready, skipping stale deliveries.
  pub fn try_recv(&mut self) -> Option<T> {
    while let Ok((generation, value)) = self.rx.try_recv() {
      if self.is_current(generation) {
        return Some(value);
      }
    }
    None
  }
}

impl<T> Drop for Debouncer<T> {
  fn drop(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::time::{sleep, timeout};

  const DELAY: Duration = Duration::from_millis(40);

  #[tokio::test]
  async fn only_the_last_value_of_a_burst_is_delivered() {
    let (mut d, mut rx) = Debouncer::new(DELAY);
    d.push("a");
    d.push("ac");
    d.push("acme");
    assert!(d.is_pending());

    let got = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
    assert_eq!(got, Some("acme"));

    sleep(DELAY * 3).await;
    assert!(rx.try_recv().is_none());
    assert!(!d.is_pending());
  }

  #[tokio::test]
  async fn values_separated_by_a_pause_are_both_delivered() {
    let (mut d, mut rx) = Debouncer::new(DELAY);
    d.push(1);
    assert_eq!(timeout(Duration::from_secs(2), rx.recv()).await.unwrap(), Some(1));
    d.push(2);
    assert_eq!(timeout(Duration::from_secs(2), rx.recv()).await.unwrap(), Some(2));
  }

  #[tokio::test]
  async fn cancel_and_drop_discard_the_pending_value() {
    let (mut d, mut rx) = Debouncer::new(DELAY);
    d.push("gone");
    d.cancel();
    assert!(!d.is_pending());
    sleep(DELAY * 3).await;
    assert!(rx.try_recv().is_none());

    d.push("also gone");
    drop(d);
    // All senders are gone and nothing was sent.
    assert_eq!(timeout(Duration::from_secs(2), rx.recv()).await.unwrap(), None);
  }

  #[tokio::test]
  async fn cancel_discards_a_value_already_in_the_channel() {
    let (mut d, mut rx) = Debouncer::new(DELAY);
    d.push("late");
    sleep(DELAY * 3).await;
    assert!(!d.is_pending());
    d.cancel();
    assert!(rx.try_recv().is_none());

    d.push("fresh");
    assert_eq!(timeout(Duration::from_secs(2), rx.recv()).await.unwrap(), Some("fresh"));
  }
}
