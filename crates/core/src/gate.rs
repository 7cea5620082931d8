//! Keyed insert gate for category annotations.
//!
//! Category annotations carry a logical uniqueness constraint the store does
//! not enforce: at most one record per `(video_id, frame_num, label)`. The
//! record's primary key is independent of that triple, so two racing creates
//! can both pass an id-based existence check and still produce a duplicate.
//! The gate serializes the check-then-insert sequence per triple within one
//! process.
//!
//! A claim is a lease in a shared map, stamped with its claim time. The
//! holder releases it by dropping the [`InsertLease`]; a holder that never
//! releases (crashed task) is reclaimed by the next claimant once the lease
//! is older than [`LEASE_EXPIRY`]. Waiters poll at [`RETRY_INTERVAL`] rather
//! than queueing, bounded at [`MAX_ACQUIRE_ATTEMPTS`] attempts.
//!
//! The gate is process-local. It does not serialize writers in other
//! processes; a deployment with more than one API process needs a
//! store-level lease instead.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::CoreError;
use crate::types::DbId;

/// A lease older than this is treated as abandoned and may be reclaimed.
pub const LEASE_EXPIRY: Duration = Duration::from_secs(3);

/// How long a waiter sleeps between claim attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum claim attempts before giving up with [`CoreError::LeaseContended`].
///
/// A single stuck holder expires after [`LEASE_EXPIRY`] (attempt ~30), so
/// hitting this bound means the key is being continuously re-claimed by
/// other writers.
pub const MAX_ACQUIRE_ATTEMPTS: u32 = 50;

/// The triple that identifies one logical category annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationKey {
    pub video_id: DbId,
    pub frame_num: i32,
    pub label: String,
}

impl std::fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "video {} frame {} label {:?}",
            self.video_id, self.frame_num, self.label
        )
    }
}

/// Per-key lease map serializing category-annotation inserts.
///
/// Thread-safe via an interior lock; designed to be wrapped in `Arc` and
/// shared across the application. The lock is a synchronous mutex held only
/// for map operations — never across an await — so between observing a key
/// free and recording the claim there is no suspension point another caller
/// could interleave through.
#[derive(Debug, Default)]
pub struct InsertGate {
    leases: Mutex<HashMap<AnnotationKey, Instant>>,
}

impl InsertGate {
    /// Create a new gate with no outstanding leases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt a single claim of `key` without waiting.
    ///
    /// Succeeds when the key is free or its current lease has expired
    /// (reclaim). Returns `None` when a live lease is held by someone else.
    pub fn try_claim(&self, key: &AnnotationKey) -> Option<InsertLease<'_>> {
        let now = Instant::now();
        let mut leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());
        match leases.get(key) {
            Some(held_since) if now.duration_since(*held_since) <= LEASE_EXPIRY => None,
            _ => {
                leases.insert(key.clone(), now);
                Some(InsertLease {
                    gate: self,
                    key: key.clone(),
                    claimed_at: now,
                })
            }
        }
    }

    /// Claim `key`, polling until the current holder releases or its lease
    /// expires.
    ///
    /// Retries every [`RETRY_INTERVAL`] up to [`MAX_ACQUIRE_ATTEMPTS`] times;
    /// sustained contention surfaces as [`CoreError::LeaseContended`].
    pub async fn acquire(&self, key: &AnnotationKey) -> Result<InsertLease<'_>, CoreError> {
        for attempt in 1..=MAX_ACQUIRE_ATTEMPTS {
            if let Some(lease) = self.try_claim(key) {
                return Ok(lease);
            }
            if attempt < MAX_ACQUIRE_ATTEMPTS {
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
        }
        Err(CoreError::LeaseContended(key.to_string()))
    }

    /// Number of live (unexpired) leases. Exposed for health diagnostics.
    pub fn live_leases(&self) -> usize {
        let now = Instant::now();
        let leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());
        leases
            .values()
            .filter(|held_since| now.duration_since(**held_since) <= LEASE_EXPIRY)
            .count()
    }

    fn release(&self, key: &AnnotationKey, claimed_at: Instant) {
        let mut leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());
        // Only remove the entry if it is still ours. If our lease expired
        // and another caller reclaimed the key, their lease stays.
        if leases.get(key).copied() == Some(claimed_at) {
            leases.remove(key);
        }
    }
}

/// RAII claim on one annotation key. Dropping it frees the key.
#[derive(Debug)]
pub struct InsertLease<'a> {
    gate: &'a InsertGate,
    key: AnnotationKey,
    claimed_at: Instant,
}

impl InsertLease<'_> {
    /// The key this lease covers.
    pub fn key(&self) -> &AnnotationKey {
        &self.key
    }
}

impl Drop for InsertLease<'_> {
    fn drop(&mut self) {
        self.gate.release(&self.key, self.claimed_at);
    }
}
