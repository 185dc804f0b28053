use std::num::NonZeroUsize;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

use crate::{Alignment, NwAligner, NwAlignerError, Sequence};

struct WorkItem {
    index: usize,
    seq1: Sequence,
    seq2: Sequence,
}

struct WorkResult {
    index: usize,
    result: Result<Alignment, NwAlignerError>,
}

/// Aligns many independent pairs on a pool of worker threads.
///
/// Each job allocates its own matrices; workers share nothing but the
/// (immutable) aligner configuration.
pub struct BatchAligner {
    work_tx: Option<Sender<WorkItem>>,
    result_rx: Receiver<WorkResult>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl BatchAligner {
    /// One worker per available CPU.
    pub fn new(aligner: NwAligner) -> Self {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::with_workers(aligner, workers)
    }

    pub fn with_workers(aligner: NwAligner, workers: usize) -> Self {
        let workers = workers.max(1);
        debug!("starting {} alignment workers", workers);

        let (work_tx, work_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let handles = (0..workers)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                thread::spawn(move || Self::worker(aligner, work_rx, result_tx))
            })
            .collect();

        Self {
            work_tx: Some(work_tx),
            result_rx,
            workers: handles,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    fn worker(aligner: NwAligner, work_rx: Receiver<WorkItem>, result_tx: Sender<WorkResult>) {
        while let Ok(work) = work_rx.recv() {
            let result = aligner.align_sequences(&work.seq1, &work.seq2);

            if result_tx
                .send(WorkResult {
                    index: work.index,
                    result,
                })
                .is_err()
            {
                break;
            }
        }
    }

    /// Aligns every pair and returns the alignments in input order.
    ///
    /// All jobs are drained before returning, so a failed pair does not leak
    /// results into the next batch. The first error by input position wins.
    pub fn align_all(
        &mut self,
        pairs: Vec<(Sequence, Sequence)>,
    ) -> Result<Vec<Alignment>, NwAlignerError> {
        let total = pairs.len();
        let work_tx = self
            .work_tx
            .as_ref()
            .ok_or(NwAlignerError::WorkerDisconnected)?;

        for (index, (seq1, seq2)) in pairs.into_iter().enumerate() {
            work_tx
                .send(WorkItem { index, seq1, seq2 })
                .map_err(|_| NwAlignerError::WorkerDisconnected)?;
        }

        let mut slots: Vec<Option<Result<Alignment, NwAlignerError>>> =
            (0..total).map(|_| None).collect();
        for _ in 0..total {
            let WorkResult { index, result } = self.result_rx.recv().map_err(|_| {
                warn!("all alignment workers exited with jobs outstanding");
                NwAlignerError::WorkerDisconnected
            })?;
            slots[index] = Some(result);
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(NwAlignerError::WorkerDisconnected)))
            .collect()
    }
}

impl Drop for BatchAligner {
    fn drop(&mut self) {
        // Closing the work channel stops the workers.
        self.work_tx.take();

        while let Some(worker) = self.workers.pop() {
            if worker.join().is_err() {
                warn!("alignment worker panicked during shutdown");
            }
        }
    }
}
