use std::sync::Arc;
use std::sync::atomic::{
  AtomicU64,
  Ordering
};

/// Hands out request tickets; only the newest ticket is current.
///
/// Clones share the same counter, so a component can keep one handle and
/// move clones into the futures it spawns.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
  current: Arc<AtomicU64>
}

impl GenerationCounter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts a new request, making every earlier ticket stale.
  pub fn begin(&self) -> RequestTicket {
    let generation = self
      .current
      .fetch_add(1, Ordering::SeqCst)
      .wrapping_add(1);
    RequestTicket {
      generation,
      current: Arc::clone(&self.current)
    }
  }

  /// Makes every outstanding ticket stale without starting a request.
  pub fn invalidate(&self) {
    self
      .current
      .fetch_add(1, Ordering::SeqCst);
  }

  pub fn generation(&self) -> u64 {
    self.current.load(Ordering::SeqCst)
  }
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
  generation: u64,
  current:    Arc<AtomicU64>
}

impl RequestTicket {
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn is_current(&self) -> bool {
    self.current.load(Ordering::SeqCst)
      == self.generation
  }
}
