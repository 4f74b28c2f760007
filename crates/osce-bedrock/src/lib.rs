//! osce-bedrock
//!
//! The completion provider port and its Bedrock Converse implementation.

pub mod client;
pub mod converse;
pub mod error;
pub mod json;
pub mod provider;
pub mod tokens;
