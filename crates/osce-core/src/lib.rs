//! osce-core
//!
//! Pure domain types, exam tunables, the scenario catalog, and S3 key
//! conventions. No AWS SDK dependency; this is the shared vocabulary of the
//! OSCE simulator.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod s3_keys;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the object-safe port traits (completion
/// provider, attempt store).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
