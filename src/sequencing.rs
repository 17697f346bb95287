use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A published result and the request sequence that produced it
#[derive(Debug, Clone)]
struct Published<T> {
    sequence: u64,
    value: T,
}

/// Externally visible result slot with last-issued-wins ordering.
///
/// Every request takes a sequence number from [`LatestSlot::issue`] before it
/// starts. A finished request may only replace the visible value when its
/// sequence is higher than the one currently published, so a slow early
/// request can never overwrite the result of a later one.
#[derive(Debug)]
pub struct LatestSlot<T> {
    next_sequence: AtomicU64,
    published: RwLock<Option<Published<T>>>,
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            next_sequence: AtomicU64::new(1),
            published: RwLock::new(None),
        }
    }

    /// Reserve the next sequence number. Sequences start at 1.
    pub fn issue(&self) -> u64 {
        self.next_sequence.fetch_add(1, Ordering::SeqCst)
    }

    /// Highest sequence handed out so far, or 0 if none
    pub fn last_issued(&self) -> u64 {
        self.next_sequence.load(Ordering::SeqCst) - 1
    }

    /// Publish `value` for `sequence`. Returns false if a result from a
    /// later request is already visible.
    pub async fn publish(&self, sequence: u64, value: T) -> bool {
        let mut published = self.published.write().await;
        match published.as_ref() {
            Some(current) if current.sequence >= sequence => false,
            _ => {
                *published = Some(Published { sequence, value });
                true
            }
        }
    }

    pub async fn current(&self) -> Option<T> {
        self.published.read().await.as_ref().map(|p| p.value.clone())
    }

    /// Sequence of the visible result, or 0 if nothing is published
    pub async fn current_sequence(&self) -> u64 {
        self.published.read().await.as_ref().map_or(0, |p| p.sequence)
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
