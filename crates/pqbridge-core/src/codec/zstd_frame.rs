//! Zstandard codec (`ZSTD`).
//!
//! Unlike `LZ4_RAW`, each block is a complete zstd frame whose header carries
//! the decoded size, so decompression needs no sizing heuristic.

use log::warn;
use snafu::ResultExt;

use crate::codec::{
    BlockCodec, CodecId,
    error::{CodecResult, CompressSnafu, DecodeSnafu},
};

/// Compression level used unless overridden.
pub const ZSTD_DEFAULT_LEVEL: i32 = 3;

/// Framed zstd block compressor.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self {
            level: ZSTD_DEFAULT_LEVEL,
        }
    }
}

impl ZstdCodec {
    /// Codec compressing at a custom level.
    pub fn with_level(level: i32) -> Self {
        Self { level }
    }
}

impl BlockCodec for ZstdCodec {
    fn id(&self) -> CodecId {
        CodecId::Zstd
    }

    fn compress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        ::zstd::bulk::compress(input, self.level).context(CompressSnafu {
            codec: CodecId::Zstd,
            input_len: input.len(),
        })
    }

    fn decompress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        ::zstd::stream::decode_all(input).map_err(|e| {
            warn!("zstd block of {} bytes failed to decode: {e}", input.len());
            e
        })
        .context(DecodeSnafu {
            codec: CodecId::Zstd,
            input_len: input.len(),
        })
    }
}
