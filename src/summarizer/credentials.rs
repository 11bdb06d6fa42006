//! Provider credential pool with round-robin rotation

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

/// Ordered pool of interchangeable API keys
///
/// The cursor advances on every [`next_key`](CredentialPool::next_key)
/// call, whether or not the resulting request succeeds, so repeated
/// failures never pin traffic to one credential. Membership is fixed
/// after construction; the cursor is the only mutable state and is
/// atomic, safe for concurrent callers.
#[derive(Debug)]
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl CredentialPool {
    /// Create a pool from keys in rotation order.
    ///
    /// An empty pool is a configuration error: the pipeline cannot reach
    /// the provider at all without at least one credential.
    pub fn new(keys: Vec<String>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::Config(
                "credential pool must not be empty".to_string(),
            ));
        }
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Take the next credential, advancing the cursor.
    ///
    /// Returns the key's pool index alongside the key itself so callers
    /// can record which credential served a request.
    pub fn next_key(&self) -> (usize, &str) {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        (index, &self.keys[index])
    }

    /// Number of credentials in the pool
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; pools are non-empty by construction
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
