//! Opaque pixel resource ownership

use std::fmt;

/// Opaque pixel storage supplied by the host's resource provider.
///
/// Tiles, tilesets and the map backbuffer hold their pixel data through this
/// trait. The map only tracks ownership: each resource is boxed into exactly
/// one owner and released when that owner drops. This crate never creates or
/// inspects image data.
pub trait PixelData: fmt::Debug + Send + Sync {}
