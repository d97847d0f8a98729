//! The finding stream handed to the caller of `Linter::lint`.

use crate::finding::Finding;
use crossbeam_channel::Receiver;
use gosling_common::{GoslingResult, InternalError};
use std::thread::JoinHandle;

/// A stream of findings produced by one lint run.
///
/// Iteration yields findings in arrival order, which is unspecified across
/// (package, file, rule) evaluations; each finding carries full position
/// information so callers can sort deterministically. The stream ends only
/// after every concurrent evaluation has finished: workers hold clones of
/// the sending half and the channel closes when the last one is dropped.
pub struct FindingStream {
    receiver: Receiver<Finding>,
    coordinator: Option<JoinHandle<GoslingResult<()>>>,
}

impl FindingStream {
    pub(crate) fn new(
        receiver: Receiver<Finding>,
        coordinator: JoinHandle<GoslingResult<()>>,
    ) -> Self {
        Self {
            receiver,
            coordinator: Some(coordinator),
        }
    }

    /// Drains the stream into a vector, then surfaces any infrastructure
    /// error from the run.
    pub fn collect_all(mut self) -> GoslingResult<Vec<Finding>> {
        let findings: Vec<Finding> = self.receiver.iter().collect();
        self.join()?;
        Ok(findings)
    }

    /// Waits for all workers to finish and returns the first infrastructure
    /// error, if any. Remaining findings are discarded.
    pub fn finish(mut self) -> GoslingResult<()> {
        // Drain so workers never block on a full channel.
        for _ in self.receiver.iter() {}
        self.join()
    }

    fn join(&mut self) -> GoslingResult<()> {
        match self.coordinator.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| InternalError::new("lint coordinator panicked"))?,
            None => Ok(()),
        }
    }
}

impl Iterator for FindingStream {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        self.receiver.recv().ok()
    }
}

impl Drop for FindingStream {
    fn drop(&mut self) {
        // Abandoned streams must not leave detached workers blocked on a
        // send; drain and join.
        for _ in self.receiver.try_iter() {}
        if let Some(handle) = self.coordinator.take() {
            let _ = handle.join();
        }
    }
}
