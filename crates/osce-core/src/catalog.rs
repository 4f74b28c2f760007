//! Scenario catalog: versioned seed data, migrated and validated at load.
//!
//! The on-disk shape is `{"catalog_version": N, "scenarios": [...]}`. Older
//! seeds are upgraded by [`migrate`] before deserializing, and every scenario
//! is checked by [`validate`] so a malformed rubric is rejected at startup
//! instead of at grading time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::scenario::{Scenario, ScenarioSummary};

/// Current catalog version. Bump this when changing the scenario shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const BUNDLED_SEED: &str = include_str!("../seed/scenarios.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    catalog_version: u32,
    scenarios: Vec<Scenario>,
}

/// Read-only lookup of scenarios by id.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Build a catalog from already-typed scenarios, validating each one.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CoreError> {
        validate(&scenarios)?;
        Ok(Self { scenarios })
    }

    /// Parse, migrate, and validate a catalog document.
    pub fn from_json(contents: &str) -> Result<Self, CoreError> {
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = match json.get("catalog_version") {
            None => 0,
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| CoreError::InvalidCatalog(format!("invalid catalog_version: {v}")))?,
        };

        let migrated = migrate(json, on_disk_version)?;
        let file: CatalogFile = serde_json::from_value(migrated)?;
        Self::new(file.scenarios)
    }

    /// The stations shipped with the binary.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_SEED)
    }

    pub fn lookup(&self, id: &str) -> Result<&Scenario, CoreError> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::ScenarioNotFound(id.to_string()))
    }

    pub fn summaries(&self) -> Vec<ScenarioSummary> {
        self.scenarios.iter().map(Scenario::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Serialize in the current on-disk format.
    pub fn to_json(&self) -> Result<String, CoreError> {
        let file = CatalogFile {
            catalog_version: CURRENT_VERSION,
            scenarios: self.scenarios.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::InvalidCatalog(format!(
            "catalog_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: `patient_prompt` became `persona`; `specialty` and
    // `viva_questions` became required.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidCatalog("catalog is not a JSON object".to_string()))?;
        let scenarios = obj
            .get_mut("scenarios")
            .and_then(|s| s.as_array_mut())
            .ok_or_else(|| CoreError::InvalidCatalog("missing scenarios array".to_string()))?;

        for scenario in scenarios.iter_mut() {
            let Some(s) = scenario.as_object_mut() else {
                return Err(CoreError::InvalidCatalog(
                    "scenario entry is not a JSON object".to_string(),
                ));
            };
            if let Some(prompt) = s.remove("patient_prompt") {
                s.entry("persona").or_insert(prompt);
            }
            s.entry("specialty")
                .or_insert(serde_json::Value::String("General".to_string()));
            s.entry("viva_questions")
                .or_insert(serde_json::Value::Array(Vec::new()));
        }

        obj.insert(
            "catalog_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated scenario catalog v0 → v1");
    }

    Ok(json)
}

/// Reject catalogs that could not be graded correctly.
fn validate(scenarios: &[Scenario]) -> Result<(), CoreError> {
    let mut ids = HashSet::new();

    for scenario in scenarios {
        if scenario.id.trim().is_empty() {
            return Err(CoreError::InvalidCatalog("scenario with empty id".to_string()));
        }
        if !ids.insert(scenario.id.as_str()) {
            return Err(CoreError::InvalidCatalog(format!(
                "duplicate scenario id: {}",
                scenario.id
            )));
        }
        if scenario.rubric.is_empty() {
            return Err(CoreError::InvalidCatalog(format!(
                "{}: rubric is empty",
                scenario.id
            )));
        }

        let mut items = HashSet::new();
        let mut total: u32 = 0;
        for item in &scenario.rubric {
            if item.points == 0 {
                return Err(CoreError::InvalidCatalog(format!(
                    "{}: rubric item \"{}\" has zero points",
                    scenario.id, item.item
                )));
            }
            total = total.checked_add(item.points).ok_or_else(|| {
                CoreError::InvalidCatalog(format!("{}: rubric total points overflow", scenario.id))
            })?;
            if !items.insert(item.item.as_str()) {
                return Err(CoreError::InvalidCatalog(format!(
                    "{}: duplicate rubric item \"{}\"",
                    scenario.id, item.item
                )));
            }
        }
    }

    Ok(())
}
