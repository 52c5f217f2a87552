//! Codec and storage gateway for Blobgate.
//!
//! This crate contains the designable core of the service with ZERO web
//! dependencies:
//!
//! - `codec` - Streaming-safe base64 encoding and decoding
//! - `gateway` - Vendor-agnostic blob storage access for one container

pub mod codec;
pub mod gateway;
