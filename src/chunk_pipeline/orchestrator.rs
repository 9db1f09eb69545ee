// In: src/chunk_pipeline/orchestrator.rs

//! Chunk-parallel orchestration of the compression and decompression kernels.
//!
//! The orchestrator validates boundaries against the layout, carves the output
//! buffer into disjoint per-chunk slices with `split_at_mut`, and hands each
//! (chunk, slice) pair to a kernel. Chunks share no mutable state, so the only
//! synchronisation is rayon's join at the end of the batch.

use std::sync::Arc;

use rayon::prelude::*;

use crate::chunk_pipeline::layout::StridedLayout;
use crate::chunk_pipeline::partitioner::{Chunk, ChunkBoundaries};
use crate::config::ExecutionMode;
use crate::error::FpdcError;
use crate::kernels::{decode_chunk, encode_chunk};

//==================================================================================
// 1. Executor
//==================================================================================

/// Runs a batch of independent chunk jobs according to an `ExecutionMode`.
#[derive(Clone)]
pub enum Executor {
    Sequential,
    GlobalPool,
    DedicatedPool(Arc<rayon::ThreadPool>),
}

impl Executor {
    pub fn from_mode(mode: ExecutionMode) -> Result<Self, FpdcError> {
        Ok(match mode {
            ExecutionMode::Sequential => Executor::Sequential,
            ExecutionMode::Parallel { threads: None } => Executor::GlobalPool,
            ExecutionMode::Parallel { threads: Some(n) } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fpdc-worker-{}", i))
                    .build()?;
                Executor::DedicatedPool(Arc::new(pool))
            }
        })
    }

    /// Applies `job` to every task and collects the results in task order,
    /// stopping at the first error.
    fn run<T, R, F>(&self, tasks: Vec<T>, job: F) -> Result<Vec<R>, FpdcError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, FpdcError> + Sync + Send,
    {
        match self {
            Executor::Sequential => tasks.into_iter().map(job).collect(),
            Executor::GlobalPool => tasks.into_par_iter().map(job).collect(),
            Executor::DedicatedPool(pool) => {
                pool.install(|| tasks.into_par_iter().map(job).collect())
            }
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Executor::Sequential => f.write_str("Sequential"),
            Executor::GlobalPool => f.write_str("GlobalPool"),
            Executor::DedicatedPool(pool) => f
                .debug_tuple("DedicatedPool")
                .field(&pool.current_num_threads())
                .finish(),
        }
    }
}

//==================================================================================
// 2. Compression
//==================================================================================

/// Compresses `trace` into `out`, writing each chunk's final absolute cursor
/// into `offsets`.
///
/// All preconditions (coverage, layout, buffer capacity, offset table size)
/// are checked before the first kernel runs.
pub fn compress_trace<const W: usize>(
    trace: &[u64],
    dimensionality: usize,
    bounds: &ChunkBoundaries,
    out: &mut [u8],
    offsets: &mut [usize],
    executor: &Executor,
) -> Result<(), FpdcError> {
    // 1. Validate the configuration against the input.
    if dimensionality < 1 {
        return Err(FpdcError::InvalidDimensionality(dimensionality));
    }
    bounds.ensure_covers(trace.len())?;
    if offsets.len() != bounds.chunk_count() {
        return Err(FpdcError::OffsetTableMismatch {
            expected: bounds.chunk_count(),
            actual: offsets.len(),
        });
    }
    let layout = StridedLayout::new::<W>(bounds)?;

    // 2. Carve the output into disjoint per-chunk slots.
    let regions = layout.split_mut(out)?;
    let tasks: Vec<(Chunk, &mut [u8])> = bounds.chunks().zip(regions).collect();

    log::debug!(
        "compressing {} elements in {} chunks (D={}, W={}, {:?})",
        trace.len(),
        tasks.len(),
        dimensionality,
        W,
        executor
    );

    // 3. Run the kernels.
    let written = executor.run(tasks, |(chunk, region)| {
        encode_chunk::<W>(&trace[chunk.range()], dimensionality, region)
            .map_err(|e| e.in_chunk(chunk.index))
    })?;

    // 4. Publish the offset table.
    for ((entry, &base), bytes) in offsets.iter_mut().zip(layout.bases()).zip(&written) {
        *entry = base + bytes;
    }

    let total: usize = written.iter().sum();
    log::info!(
        "compressed {} elements in {} chunks into {} bytes",
        trace.len(),
        bounds.chunk_count(),
        total
    );
    log_metric!(
        "event" = "compress",
        "elements" = trace.len(),
        "chunks" = bounds.chunk_count(),
        "bytes" = total
    );
    Ok(())
}

//==================================================================================
// 3. Decompression
//==================================================================================

/// Decompresses `input` into `out`, which must hold exactly
/// `bounds.trace_len()` words.
pub fn decompress_trace<const W: usize>(
    input: &[u8],
    dimensionality: usize,
    bounds: &ChunkBoundaries,
    out: &mut [u64],
    executor: &Executor,
) -> Result<(), FpdcError> {
    // 1. Validate the configuration against the output.
    if dimensionality < 1 {
        return Err(FpdcError::InvalidDimensionality(dimensionality));
    }
    if out.len() != bounds.trace_len() {
        return Err(FpdcError::TraceLengthMismatch {
            expected: bounds.trace_len(),
            actual: out.len(),
        });
    }
    let layout = StridedLayout::new::<W>(bounds)?;

    // 2. Pair each chunk's input slot with its slice of the output trace.
    let inputs = layout.split(input);
    let mut rest = out;
    let mut outputs = Vec::with_capacity(bounds.chunk_count());
    for chunk in bounds.chunks() {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(chunk.len());
        outputs.push(head);
        rest = tail;
    }
    let tasks: Vec<((Chunk, &[u8]), &mut [u64])> =
        bounds.chunks().zip(inputs).zip(outputs).collect();

    log::debug!(
        "decompressing {} bytes into {} elements in {} chunks (D={}, W={}, {:?})",
        input.len(),
        bounds.trace_len(),
        tasks.len(),
        dimensionality,
        W,
        executor
    );

    // 3. Run the kernels.
    executor.run(tasks, |((chunk, region), values)| {
        decode_chunk::<W>(region, dimensionality, values)
            .map(|_| ())
            .map_err(|e| e.in_chunk(chunk.index))
    })?;

    log::info!(
        "decompressed {} elements from {} chunks",
        bounds.trace_len(),
        bounds.chunk_count()
    );
    log_metric!(
        "event" = "decompress",
        "elements" = bounds.trace_len(),
        "chunks" = bounds.chunk_count()
    );
    Ok(())
}
