//! Module implement the process-wide source of node identifiers.

use std::sync::Mutex;

// last id handed out, zero means none so far.
static LAST_ID: Mutex<u64> = Mutex::new(0);

/// Return the next node-id for this process. Ids start from 1 and are
/// strictly increasing, across all trees and all threads.
pub fn next_id() -> u64 {
    // a poisoned counter is still a valid integer.
    let mut last = LAST_ID.lock().unwrap_or_else(|err| err.into_inner());
    *last += 1;
    *last
}

#[cfg(test)]
#[path = "id_test.rs"]
mod id_test;
