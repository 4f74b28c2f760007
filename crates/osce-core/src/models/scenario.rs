use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An OSCE station: the patient persona the model plays, the checklist the
/// student is marked against, and the oral questions asked afterwards.
///
/// Scenarios are seed data. They are loaded once at startup through
/// [`crate::catalog::ScenarioCatalog`] and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// Persona text prepended to every patient prompt.
    pub persona: String,
    pub rubric: Vec<RubricItem>,
    pub viva_questions: Vec<VivaQuestion>,
}

impl Scenario {
    /// Sum of the canonical rubric weights.
    pub fn total_points(&self) -> u64 {
        self.rubric.iter().map(|i| u64::from(i.points)).sum()
    }

    /// The canonical item names, in rubric order.
    pub fn item_names(&self) -> Vec<&str> {
        self.rubric.iter().map(|i| i.item.as_str()).collect()
    }

    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            specialty: self.specialty.clone(),
        }
    }
}

/// A single checklist entry.
///
/// `item` is the join key between the canonical rubric and the verdicts a
/// model returns, and is matched verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RubricItem {
    pub category: String,
    pub item: String,
    pub points: u32,
    #[serde(default)]
    pub completed: bool,
}

impl RubricItem {
    /// Points awarded for this item given its completion state.
    pub fn awarded(&self) -> u32 {
        if self.completed { self.points } else { 0 }
    }
}

/// An oral-exam question and the answer an examiner expects.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VivaQuestion {
    pub question: String,
    pub model_answer: String,
}

/// Public listing entry for the station picker.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub specialty: String,
}
