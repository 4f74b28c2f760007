//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the OSCE bucket.

use uuid::Uuid;

pub const ATTEMPTS_PREFIX: &str = "attempts/";

pub fn attempt(id: Uuid) -> String {
    format!("attempts/{id}.json")
}

pub const SCENARIO_CATALOG: &str = "scenarios/catalog.json";
