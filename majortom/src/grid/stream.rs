//! Streaming tiling over a bounded channel.
//!
//! A single producer task walks the rows in order and sends cells one at a
//! time. The channel is bounded, so a slow consumer holds the producer back.
//!
//! Two different things can end a stream early, and they are reported
//! separately by [`TileStream::finish`]:
//!
//! - the caller cancels the [`CancellationToken`] ([`StreamOutcome::Cancelled`])
//! - the receiving side goes away ([`StreamOutcome::Disconnected`])
//!
//! For the consumer, the end of data is always `next()` returning `None`.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::aoi::Aoi;
use super::cell::GridCell;
use super::error::GridError;
use super::tiling::CellIter;
use super::Grid;

/// Default capacity of the cell channel.
pub const DEFAULT_STREAM_BUFFER: usize = 1024;

/// Options for [`Grid::tile_stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Channel capacity in cells. Values below 1 are raised to 1.
    pub buffer: usize,
}

impl StreamOptions {
    pub fn with_buffer(buffer: usize) -> Self {
        Self { buffer }
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_STREAM_BUFFER,
        }
    }
}

/// How a stream's producer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Every candidate row was scanned.
    Completed { cells: u64 },
    /// The cancellation token fired first.
    Cancelled { cells: u64 },
    /// The receiver was dropped before the scan finished.
    Disconnected { cells: u64 },
}

impl StreamOutcome {
    /// Number of cells handed to the channel.
    pub fn cells(&self) -> u64 {
        match *self {
            StreamOutcome::Completed { cells }
            | StreamOutcome::Cancelled { cells }
            | StreamOutcome::Disconnected { cells } => cells,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StreamOutcome::Completed { .. })
    }
}

/// Receiving end of a streaming tiling.
///
/// Created by [`Grid::tile_stream`].
pub struct TileStream {
    rx: mpsc::Receiver<GridCell>,
    producer: JoinHandle<StreamOutcome>,
}

impl TileStream {
    /// Next cell, or `None` once the producer has stopped and the channel is
    /// drained.
    pub async fn next(&mut self) -> Option<GridCell> {
        self.rx.recv().await
    }

    /// Stop receiving and wait for the producer to stop.
    ///
    /// Cells still in flight are discarded. If the scan had not finished
    /// yet, the producer sees the closed channel and reports
    /// [`StreamOutcome::Disconnected`].
    pub async fn finish(self) -> Result<StreamOutcome, GridError> {
        let TileStream { rx, producer } = self;
        drop(rx);
        producer
            .await
            .map_err(|e| GridError::StreamProducer(e.to_string()))
    }
}

impl Grid {
    /// Stream the cells intersecting the AOI's bounding box.
    ///
    /// Cells arrive in the same order as [`Grid::cells`]. The producer runs
    /// as a Tokio task, so this must be called from within a Tokio runtime.
    /// Cancelling `cancel` stops the producer at the next cell.
    pub fn tile_stream<A: Aoi + ?Sized>(
        &self,
        aoi: &A,
        options: StreamOptions,
        cancel: CancellationToken,
    ) -> Result<TileStream, GridError> {
        let cells = self.cells(aoi)?;
        let (tx, rx) = mpsc::channel(options.buffer.max(1));
        let producer = tokio::spawn(produce(cells, tx, cancel));
        Ok(TileStream { rx, producer })
    }
}

async fn produce(
    cells: CellIter,
    tx: mpsc::Sender<GridCell>,
    cancel: CancellationToken,
) -> StreamOutcome {
    let mut sent = 0u64;
    for cell in cells {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!(cells = sent, "Tile stream cancelled");
                return StreamOutcome::Cancelled { cells: sent };
            }

            result = tx.send(cell) => {
                if result.is_err() {
                    debug!(cells = sent, "Tile stream receiver dropped");
                    return StreamOutcome::Disconnected { cells: sent };
                }
                sent += 1;
            }
        }
    }
    debug!(cells = sent, "Tile stream completed");
    StreamOutcome::Completed { cells: sent }
}
