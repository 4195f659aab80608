//! Collision-free tokens for storage paths and record ids.

use std::process;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Last token handed out anywhere in this process.
static LAST: AtomicI64 = AtomicI64::new(0);

/// Strictly increasing millisecond timestamps.
///
/// Two calls within the same millisecond (or after the clock steps back)
/// get `last + 1` instead of a repeated value. The sequence is shared by
/// every `PathTokens` in the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathTokens;

impl PathTokens {
    /// Create a token source.
    pub fn new() -> Self {
        Self
    }

    /// Next token, greater than every token handed out before.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = LAST
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(prev + 1)
    }

    /// Next token for a storage path, `{millis}-{pid as hex}`. Two processes
    /// saving under the same owner in the same millisecond get different names.
    pub fn next_path(&self) -> String {
        format!("{}-{:x}", self.next(), process::id())
    }
}
