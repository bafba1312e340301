//! Object storage for uploaded media
//!
//! MinIO/S3-compatible client used by the media feature. The service never
//! keeps bytes after a request completes; only object keys (public ids) and
//! synthesized URLs leave this module.

mod media_store;

pub use media_store::MediaStore;
