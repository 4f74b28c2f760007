//! osce-storage
//!
//! S3 operations, the attempt store, and scenario catalog loading.

pub mod attempts;
pub mod catalog;
pub mod client;
pub mod error;
pub mod objects;
