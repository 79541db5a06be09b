//! Errors raised by the codec registry and block codecs.

use std::io;

use snafu::Snafu;

use crate::codec::CodecId;

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while registering, looking up, or running block codecs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodecError {
    /// No codec is registered for the requested id.
    ///
    /// This is a capability/configuration problem (the codec was not compiled
    /// in or not registered), not a data problem.
    #[snafu(display("no block codec registered for {codec}"))]
    CodecNotFound {
        /// The requested codec.
        codec: CodecId,
    },

    /// The integer is not a Parquet compression codec id.
    #[snafu(display("unknown compression codec id: {id}"))]
    UnknownCodecId {
        /// The rejected integer.
        id: i32,
    },

    /// A codec id was registered twice while building a registry.
    #[snafu(display("block codec {codec} registered more than once"))]
    DuplicateCodec {
        /// The id registered twice.
        codec: CodecId,
    },

    /// The input block could not be compressed (for example it exceeds the
    /// algorithm's maximum block size).
    #[snafu(display("{codec} compression failed for a {input_len}-byte block: {source}"))]
    Compress {
        /// The codec that failed.
        codec: CodecId,
        /// Length of the rejected input.
        input_len: usize,
        /// Underlying codec error.
        source: io::Error,
    },

    /// The compressed block is corrupt, truncated, or decodes past the
    /// destination bound.
    #[snafu(display("{codec} decompression failed for a {input_len}-byte block: {source}"))]
    Decode {
        /// The codec that failed.
        codec: CodecId,
        /// Length of the compressed input.
        input_len: usize,
        /// Underlying codec error.
        source: io::Error,
    },
}
