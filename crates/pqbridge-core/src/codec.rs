//! Block compression for column chunks.
//!
//! A [`BlockCodec`] compresses and decompresses one already-delimited byte
//! block; it never sees a stream and never frames its output. Callers record
//! block sizes out-of-band (for Parquet, in the column chunk and page
//! headers).
//!
//! Codecs are selected by [`CodecId`], the Parquet compression codec
//! enumeration, through a [`CodecRegistry`] built once at startup and
//! read-only afterwards.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

pub mod error;
#[cfg(feature = "lz4-raw")]
pub mod lz4_raw;
pub mod registry;
#[cfg(feature = "zstd")]
pub mod zstd_frame;

pub use error::{CodecError, CodecResult};
pub use registry::{CodecRegistry, CodecRegistryBuilder};

use crate::codec::error::UnknownCodecIdSnafu;

/// Parquet compression codec ids, with their thrift integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecId {
    /// No compression.
    Uncompressed,
    /// Snappy.
    Snappy,
    /// Gzip.
    Gzip,
    /// LZO.
    Lzo,
    /// Brotli.
    Brotli,
    /// Hadoop-framed LZ4 (deprecated in Parquet).
    Lz4,
    /// Zstandard.
    Zstd,
    /// Raw, unframed LZ4 blocks.
    Lz4Raw,
}

impl CodecId {
    /// Every codec id, in thrift order.
    pub const ALL: [CodecId; 8] = [
        CodecId::Uncompressed,
        CodecId::Snappy,
        CodecId::Gzip,
        CodecId::Lzo,
        CodecId::Brotli,
        CodecId::Lz4,
        CodecId::Zstd,
        CodecId::Lz4Raw,
    ];

    /// The thrift integer value stored in Parquet metadata.
    pub fn as_i32(self) -> i32 {
        match self {
            CodecId::Uncompressed => 0,
            CodecId::Snappy => 1,
            CodecId::Gzip => 2,
            CodecId::Lzo => 3,
            CodecId::Brotli => 4,
            CodecId::Lz4 => 5,
            CodecId::Zstd => 6,
            CodecId::Lz4Raw => 7,
        }
    }
}

impl TryFrom<i32> for CodecId {
    type Error = CodecError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        CodecId::ALL
            .into_iter()
            .find(|c| c.as_i32() == id)
            .ok_or_else(|| UnknownCodecIdSnafu { id }.build())
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecId::Uncompressed => "UNCOMPRESSED",
            CodecId::Snappy => "SNAPPY",
            CodecId::Gzip => "GZIP",
            CodecId::Lzo => "LZO",
            CodecId::Brotli => "BROTLI",
            CodecId::Lz4 => "LZ4",
            CodecId::Zstd => "ZSTD",
            CodecId::Lz4Raw => "LZ4_RAW",
        };
        write!(f, "{name}")
    }
}

/// A paired compress/decompress operating on one self-contained block.
///
/// Implementations hold no mutable state, so one instance can serve
/// concurrent readers and writers.
pub trait BlockCodec: fmt::Debug + Send + Sync {
    /// The codec id this implementation answers to.
    fn id(&self) -> CodecId;

    /// Compress one block. The returned length is whatever the algorithm
    /// produced; nothing is padded or prefixed.
    fn compress(&self, input: &[u8]) -> CodecResult<Vec<u8>>;

    /// Decompress one block produced by [`BlockCodec::compress`].
    ///
    /// Corrupt or truncated input is an error, never a short or zero-filled
    /// result.
    fn decompress(&self, input: &[u8]) -> CodecResult<Vec<u8>>;
}

/// Self-describing registry entry: an id plus how to construct its codec.
#[derive(Clone, Copy)]
pub struct CodecDescriptor {
    /// Codec id the constructed codec answers to.
    pub id: CodecId,
    /// Constructor for the codec.
    pub build: fn() -> Arc<dyn BlockCodec>,
}

impl fmt::Debug for CodecDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Pass-through codec for `UNCOMPRESSED` column chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncompressedCodec;

impl BlockCodec for UncompressedCodec {
    fn id(&self) -> CodecId {
        CodecId::Uncompressed
    }

    fn compress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(input.to_vec())
    }

    fn decompress(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(input.to_vec())
    }
}

/// Descriptors for every codec compiled into this build.
pub fn default_descriptors() -> Vec<CodecDescriptor> {
    let mut out = vec![CodecDescriptor {
        id: CodecId::Uncompressed,
        build: || -> Arc<dyn BlockCodec> { Arc::new(UncompressedCodec) },
    }];
    #[cfg(feature = "lz4-raw")]
    out.push(CodecDescriptor {
        id: CodecId::Lz4Raw,
        build: || -> Arc<dyn BlockCodec> { Arc::new(lz4_raw::Lz4RawCodec::default()) },
    });
    #[cfg(feature = "zstd")]
    out.push(CodecDescriptor {
        id: CodecId::Zstd,
        build: || -> Arc<dyn BlockCodec> { Arc::new(zstd_frame::ZstdCodec::default()) },
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_ids_match_thrift_values() {
        for (i, id) in CodecId::ALL.into_iter().enumerate() {
            let n = i32::try_from(i).expect("small index");
            assert_eq!(id.as_i32(), n);
            assert_eq!(CodecId::try_from(n).expect("known id"), id);
        }
    }

    #[test]
    fn unknown_codec_id_is_rejected() {
        for id in [-1, 8, 42] {
            let err = CodecId::try_from(id).unwrap_err();
            assert!(
                matches!(err, CodecError::UnknownCodecId { id: got } if got == id),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn display_uses_parquet_names() {
        assert_eq!(CodecId::Lz4Raw.to_string(), "LZ4_RAW");
        assert_eq!(CodecId::Uncompressed.to_string(), "UNCOMPRESSED");
    }

    #[test]
    fn uncompressed_is_identity() {
        let codec = UncompressedCodec;
        let block = b"column chunk bytes";
        assert_eq!(codec.compress(block).expect("compress"), block);
        assert_eq!(codec.decompress(block).expect("decompress"), block);
    }

    #[test]
    fn default_descriptors_build_matching_ids() {
        for d in default_descriptors() {
            assert_eq!((d.build)().id(), d.id);
        }
    }
}
