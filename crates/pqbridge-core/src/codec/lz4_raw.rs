//! Raw LZ4 block codec (`LZ4_RAW`).
//!
//! Output is a bare LZ4 block: no size prefix, no frame header, no checksum.
//! The compressed length must be recorded by the caller, and the decoded
//! length is not stored anywhere, so decompression decodes into a buffer
//! sized by [`LZ4_RAW_DECODE_MARGIN`].

use std::io;

use log::warn;
use lz4::block::{self, CompressionMode};
use snafu::ResultExt;

use crate::codec::{
    BlockCodec, CodecId,
    error::{CodecResult, CompressSnafu, DecodeSnafu},
};

/// High-compression level used for every block.
pub const LZ4_RAW_LEVEL: i32 = 9;

/// Destination buffer size for decoding, as a multiple of the compressed
/// length. Compatibility constant of the block format; LZ4 cannot expand a
/// block by more than this.
pub const LZ4_RAW_DECODE_MARGIN: usize = 255;

/// Unframed LZ4 block compressor.
#[derive(Debug, Clone, Copy)]
pub struct Lz4RawCodec {
    level: i32,
}

impl Default for Lz4RawCodec {
    fn default() -> Self {
        Self {
            level: LZ4_RAW_LEVEL,
        }
    }
}

impl Lz4RawCodec {
    /// Codec compressing at a custom high-compression level.
    pub fn with_level(level: i32) -> Self {
        Self { level }
    }

    /// Compression level in use.
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl BlockCodec for Lz4RawCodec {
    fn id(&self) -> CodecId {
        CodecId::Lz4Raw
    }

    fn compress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        let ctx = CompressSnafu {
            codec: CodecId::Lz4Raw,
            input_len: input.len(),
        };
        let bound = block::compress_bound(input.len()).context(ctx)?;
        let mut out = vec![0u8; bound];
        let written = block::compress_to_buffer(
            input,
            Some(CompressionMode::HIGHCOMPRESSION(self.level)),
            false,
            &mut out,
        )
        .context(ctx)?;
        out.truncate(written);
        Ok(out)
    }

    fn decompress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        let ctx = DecodeSnafu {
            codec: CodecId::Lz4Raw,
            input_len: input.len(),
        };
        let capacity = input
            .len()
            .checked_mul(LZ4_RAW_DECODE_MARGIN)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "block too large for the raw LZ4 decode margin",
                )
            })
            .context(ctx)?;

        let mut out = vec![0u8; capacity as usize];
        let decoded = match block::decompress_to_buffer(input, Some(capacity), &mut out) {
            Ok(n) => n,
            Err(e) => {
                warn!("raw LZ4 block of {} bytes failed to decode: {e}", input.len());
                return Err(e).context(ctx);
            }
        };
        out.truncate(decoded);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    const PETER_PARKER_LZ4: [u8; 13] = [
        0xc0, 0x50, 0x65, 0x74, 0x65, 0x72, 0x20, 0x50, 0x61, 0x72, 0x6b, 0x65, 0x72,
    ];

    #[test]
    fn compresses_reference_vector() {
        let codec = Lz4RawCodec::default();
        let out = codec.compress(b"Peter Parker").expect("compress");
        assert_eq!(out, PETER_PARKER_LZ4);
    }

    #[test]
    fn decompresses_reference_vector() {
        let codec = Lz4RawCodec::default();
        let out = codec.decompress(&PETER_PARKER_LZ4).expect("decompress");
        assert_eq!(out, b"Peter Parker");
    }

    #[test]
    fn round_trips_repetitive_and_mixed_blocks() {
        let codec = Lz4RawCodec::default();
        let mut mixed = Vec::new();
        for i in 0u32..4096 {
            mixed.extend_from_slice(&(i % 97).to_le_bytes());
        }
        for block in [vec![], vec![7u8; 1], vec![0u8; 100_000], mixed] {
            let compressed = codec.compress(&block).expect("compress");
            let back = codec.decompress(&compressed).expect("decompress");
            assert_eq!(back, block);
        }
    }

    #[test]
    fn highly_repetitive_block_stays_within_margin() {
        let codec = Lz4RawCodec::default();
        let block = vec![0u8; 1 << 20];
        let compressed = codec.compress(&block).expect("compress");
        assert!(compressed.len() * LZ4_RAW_DECODE_MARGIN >= block.len());
        assert_eq!(codec.decompress(&compressed).expect("decompress"), block);
    }

    #[test]
    fn truncated_block_is_a_decode_error() {
        let codec = Lz4RawCodec::default();
        let err = codec.decompress(&PETER_PARKER_LZ4[..6]).unwrap_err();
        assert!(
            matches!(err, CodecError::Decode { codec: CodecId::Lz4Raw, input_len: 6, .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn empty_block_is_a_decode_error() {
        let err = Lz4RawCodec::default().decompress(&[]).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }), "unexpected error: {err:?}");
    }
}
