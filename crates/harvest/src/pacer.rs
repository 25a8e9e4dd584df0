//! Courtesy delays between downloads.
//!
//! The pipeline decides *when* to wait; a [`Pacer`] decides *how*. Production runs
//! use [`Courtesy`], which simply sleeps. Tests substitute a pacer that records the
//! requested pauses instead of spending wall-clock time on them.

use super::*;

/// Something that can hold the pipeline back for a while.
#[async_trait]
pub trait Pacer: Send + Sync {
  /// Waits for (at least) `delay` before returning.
  async fn pause(&self, delay: Duration);
}

/// Pacer that sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Courtesy;

#[async_trait]
impl Pacer for Courtesy {
  async fn pause(&self, delay: Duration) {
    trace!("Pausing {delay:?} before the next download");
    tokio::time::sleep(delay).await;
  }
}

#[async_trait]
impl<P: Pacer + ?Sized> Pacer for &P {
  async fn pause(&self, delay: Duration) { (**self).pause(delay).await }
}
