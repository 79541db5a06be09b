//! Write-once table of block codecs keyed by [`CodecId`].
//!
//! Registration only happens on a [`CodecRegistryBuilder`]; [`build`]
//! freezes it into a [`CodecRegistry`] that exposes lookups only. A built
//! registry is never mutated, so it can be shared across threads (behind an
//! `Arc` or a `static`) without locking.
//!
//! [`build`]: CodecRegistryBuilder::build

use std::{collections::HashMap, sync::Arc};

use log::debug;

use crate::codec::{
    BlockCodec, CodecDescriptor, CodecError, CodecId, default_descriptors,
    error::{CodecNotFoundSnafu, CodecResult, DuplicateCodecSnafu},
};

/// Collects codecs during initialization.
#[derive(Debug, Default)]
pub struct CodecRegistryBuilder {
    codecs: HashMap<CodecId, Arc<dyn BlockCodec>>,
}

impl CodecRegistryBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `codec` under its own id.
    ///
    /// Registering an id twice is a programming error and is reported as
    /// [`CodecError::DuplicateCodec`](crate::codec::CodecError::DuplicateCodec);
    /// the first registration is kept.
    pub fn register(&mut self, codec: Arc<dyn BlockCodec>) -> CodecResult<&mut Self> {
        let id = codec.id();
        if self.codecs.contains_key(&id) {
            return DuplicateCodecSnafu { codec: id }.fail();
        }
        self.codecs.insert(id, codec);
        Ok(self)
    }

    /// Register the codec built by `descriptor`.
    pub fn register_descriptor(&mut self, descriptor: &CodecDescriptor) -> CodecResult<&mut Self> {
        self.register((descriptor.build)())
    }

    /// Freeze the table.
    pub fn build(self) -> CodecRegistry {
        let mut ids: Vec<_> = self.codecs.keys().copied().collect();
        ids.sort();
        debug!("codec registry built with {ids:?}");
        CodecRegistry {
            codecs: self.codecs,
        }
    }
}

/// Read-only codec table.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    codecs: HashMap<CodecId, Arc<dyn BlockCodec>>,
}

impl CodecRegistry {
    /// Start building a registry.
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::new()
    }

    /// Build a registry from a list of self-describing codec entries.
    pub fn from_descriptors<'a, I>(descriptors: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = &'a CodecDescriptor>,
    {
        let builder = descriptors
            .into_iter()
            .try_fold(CodecRegistryBuilder::new(), |mut b, d| {
                b.register_descriptor(d)?;
                Ok::<_, CodecError>(b)
            })?;
        Ok(builder.build())
    }

    /// A registry holding every codec compiled into this build (see
    /// [`default_descriptors`]).
    pub fn with_defaults() -> CodecResult<Self> {
        Self::from_descriptors(&default_descriptors())
    }

    /// Find the codec registered for `id`.
    pub fn lookup(&self, id: CodecId) -> CodecResult<Arc<dyn BlockCodec>> {
        self.codecs
            .get(&id)
            .cloned()
            .ok_or_else(|| CodecNotFoundSnafu { codec: id }.build())
    }

    /// Find the codec registered for a raw thrift codec id.
    pub fn lookup_i32(&self, id: i32) -> CodecResult<Arc<dyn BlockCodec>> {
        self.lookup(CodecId::try_from(id)?)
    }

    /// Whether a codec is registered for `id`.
    pub fn contains(&self, id: CodecId) -> bool {
        self.codecs.contains_key(&id)
    }

    /// Registered ids, sorted by thrift value.
    pub fn ids(&self) -> Vec<CodecId> {
        let mut ids: Vec<_> = self.codecs.keys().copied().collect();
        ids.sort();
        ids
    }
}
