//! Bounded counting gate limiting how many files are open at once.
//!
//! Decouples CPU-bound analysis fan-out from file-descriptor pressure: any
//! number of workers may run, but at most `limit` of them may hold a file
//! open for reading. A limit of zero means unbounded.

use std::sync::{Condvar, Mutex};

/// A counting gate over file reads.
pub struct ReadGate {
    limit: usize,
    in_flight: Mutex<usize>,
    released: Condvar,
}

/// A held permit; dropping it releases the gate.
pub struct ReadPermit<'a> {
    gate: &'a ReadGate,
}

impl ReadGate {
    /// Creates a gate admitting at most `limit` concurrent readers.
    /// A limit of 0 disables the gate entirely.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            in_flight: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    /// Blocks until a read slot is free, then claims it.
    pub fn acquire(&self) -> ReadPermit<'_> {
        if self.limit > 0 {
            let mut count = self.in_flight.lock().unwrap();
            while *count >= self.limit {
                count = self.released.wait(count).unwrap();
            }
            *count += 1;
        }
        ReadPermit { gate: self }
    }

    /// Returns the number of currently held permits.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock().unwrap()
    }
}

impl Drop for ReadPermit<'_> {
    fn drop(&mut self) {
        if self.gate.limit > 0 {
            let mut count = self.gate.in_flight.lock().unwrap();
            *count -= 1;
            self.gate.released.notify_one();
        }
    }
}
