// In: src/bridge/codec.rs

//! `TraceCodec`, the stateful facade over the chunk pipeline.
//!
//! A codec is built once from a `CodecConfig` and reused: it owns the shared
//! configuration and, for `ExecutionMode::Parallel { threads: Some(n) }`, a
//! dedicated rayon pool. The lane width `W` is a const parameter because it is
//! part of the byte-stream format; `TraceCodec::new` fixes it at `WARP_SIZE`.

use std::sync::Arc;

use crate::bridge::format::CompressedTrace;
use crate::chunk_pipeline::orchestrator::{self, Executor};
use crate::chunk_pipeline::{ChunkBoundaries, StridedLayout};
use crate::config::CodecConfig;
use crate::error::FpdcError;
use crate::kernels::bitcast::{samples_as_words, samples_as_words_mut};
use crate::kernels::lane_group::{subchunk_count, LaneGroup};
use crate::kernels::WARP_SIZE;

#[derive(Debug, Clone)]
pub struct TraceCodec<const W: usize = WARP_SIZE> {
    config: Arc<CodecConfig>,
    executor: Executor,
}

impl TraceCodec<WARP_SIZE> {
    /// Builds a codec with the canonical lane width of 32.
    pub fn new(config: CodecConfig) -> Result<Self, FpdcError> {
        Self::with_lane_width(config)
    }
}

impl<const W: usize> TraceCodec<W> {
    /// Builds a codec for lane width `W`. Streams produced with one width can
    /// only be decoded with the same width.
    pub fn with_lane_width(config: CodecConfig) -> Result<Self, FpdcError> {
        config.validate()?;
        let executor = Executor::from_mode(config.execution)?;
        log::debug!("codec ready: W={}, {:?}", W, config);
        Ok(Self {
            config: Arc::new(config),
            executor,
        })
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[inline]
    pub fn lane_width(&self) -> usize {
        W
    }

    //==============================================================================
    // Partitioning & Sizing
    //==============================================================================

    /// Uniform boundaries for `trace_len` elements using the configured chunk size.
    pub fn partition(&self, trace_len: usize) -> Result<ChunkBoundaries, FpdcError> {
        ChunkBoundaries::uniform(trace_len, self.config.chunk_size, W)
    }

    /// Bytes a caller-managed output buffer needs for `bounds`.
    pub fn required_capacity(&self, bounds: &ChunkBoundaries) -> Result<usize, FpdcError> {
        Ok(StridedLayout::new::<W>(bounds)?.capacity())
    }

    //==============================================================================
    // Compression
    //==============================================================================

    /// Compresses `trace` split at `bounds`.
    ///
    /// The returned stream is truncated after the last chunk's final offset.
    pub fn compress(
        &self,
        trace: &[u64],
        bounds: &ChunkBoundaries,
    ) -> Result<CompressedTrace, FpdcError> {
        bounds.ensure_covers(trace.len())?;
        let layout = StridedLayout::new::<W>(bounds)?;
        let mut bytes = vec![0u8; layout.capacity()];
        let mut offsets = vec![0usize; bounds.chunk_count()];

        self.compress_into(trace, bounds, &mut bytes, &mut offsets)?;
        bytes.truncate(offsets.last().copied().unwrap_or(0));

        let header_bytes = bounds
            .chunks()
            .map(|c| subchunk_count(c.len(), W) * LaneGroup::<W>::HEADER_BYTES)
            .sum();

        Ok(CompressedTrace {
            bytes,
            offsets,
            bases: layout.bases().to_vec(),
            elements: trace.len(),
            header_bytes,
        })
    }

    /// Compresses into a caller-supplied buffer of at least
    /// [`TraceCodec::required_capacity`] bytes and an offset table with one
    /// entry per chunk. Nothing is written if either is too small.
    pub fn compress_into(
        &self,
        trace: &[u64],
        bounds: &ChunkBoundaries,
        out: &mut [u8],
        offsets: &mut [usize],
    ) -> Result<(), FpdcError> {
        orchestrator::compress_trace::<W>(
            trace,
            self.config.dimensionality,
            bounds,
            out,
            offsets,
            &self.executor,
        )
    }

    /// Partitions with the configured chunk size, then compresses.
    pub fn compress_uniform(
        &self,
        trace: &[u64],
    ) -> Result<(ChunkBoundaries, CompressedTrace), FpdcError> {
        let bounds = self.partition(trace.len())?;
        let compressed = self.compress(trace, &bounds)?;
        Ok((bounds, compressed))
    }

    /// Compresses `f64` samples by their bit patterns.
    pub fn compress_f64(
        &self,
        samples: &[f64],
        bounds: &ChunkBoundaries,
    ) -> Result<CompressedTrace, FpdcError> {
        self.compress(samples_as_words(samples), bounds)
    }

    //==============================================================================
    // Decompression
    //==============================================================================

    /// Decompresses a stream produced with the same lane width,
    /// dimensionality and boundaries.
    pub fn decompress(
        &self,
        bytes: &[u8],
        bounds: &ChunkBoundaries,
    ) -> Result<Vec<u64>, FpdcError> {
        let mut out = vec![0u64; bounds.trace_len()];
        self.decompress_into(bytes, bounds, &mut out)?;
        Ok(out)
    }

    /// Decompresses into `out`, which must hold exactly `bounds.trace_len()` words.
    pub fn decompress_into(
        &self,
        bytes: &[u8],
        bounds: &ChunkBoundaries,
        out: &mut [u64],
    ) -> Result<(), FpdcError> {
        orchestrator::decompress_trace::<W>(
            bytes,
            self.config.dimensionality,
            bounds,
            out,
            &self.executor,
        )
    }

    pub fn decompress_f64(
        &self,
        bytes: &[u8],
        bounds: &ChunkBoundaries,
    ) -> Result<Vec<f64>, FpdcError> {
        let mut out = vec![0f64; bounds.trace_len()];
        self.decompress_into(bytes, bounds, samples_as_words_mut(&mut out))?;
        Ok(out)
    }
}
