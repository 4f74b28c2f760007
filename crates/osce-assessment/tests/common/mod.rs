#![allow(dead_code)]

use std::sync::Mutex;

use osce_bedrock::error::ProviderError;
use osce_bedrock::provider::{BoxFuture, CompletionProvider, CompletionRequest, ModelTier};
use osce_core::catalog::ScenarioCatalog;
use osce_core::models::attempt::AttemptRecord;
use osce_core::models::dialogue::DialogueTurn;
use osce_core::models::scenario::{RubricItem, Scenario, VivaQuestion};
use osce_storage::attempts::AttemptStore;
use osce_storage::error::StorageError;

/// Provider with a fixed reply per tier that records every request.
pub struct ScriptedProvider {
    fast: Result<String, String>,
    main: Result<String, String>,
    pub calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(fast: Result<&str, &str>, main: Result<&str, &str>) -> Self {
        Self {
            fast: fast.map(str::to_string).map_err(str::to_string),
            main: main.map(str::to_string).map_err(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call succeeds with `main` on the main tier.
    pub fn replying(main: &str) -> Self {
        Self::new(Ok("Chest pain for one hour."), Ok(main))
    }

    /// Every call fails.
    pub fn down() -> Self {
        Self::new(Err("connection refused"), Err("connection refused"))
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, tier: ModelTier) -> usize {
        self.calls().iter().filter(|c| c.tier == tier).count()
    }
}

impl CompletionProvider for ScriptedProvider {
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'_, Result<String, ProviderError>> {
        let reply = match request.tier {
            ModelTier::Fast => self.fast.clone(),
            ModelTier::Main => self.main.clone(),
        };
        self.calls.lock().unwrap().push(request);
        Box::pin(async move { reply.map_err(ProviderError::Invocation) })
    }
}

/// Attempt store that keeps records in memory, or always fails.
#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<AttemptRecord>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AttemptStore for MemoryStore {
    fn insert<'a>(&'a self, record: &'a AttemptRecord) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            if self.fail {
                return Err(StorageError::PutObject("bucket unavailable".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        })
    }

    fn list_recent(&self, limit: usize) -> BoxFuture<'_, Result<Vec<AttemptRecord>, StorageError>> {
        Box::pin(async move {
            let mut records = self.records();
            records.reverse();
            records.truncate(limit);
            Ok(records)
        })
    }
}

pub fn item(category: &str, name: &str, points: u32) -> RubricItem {
    RubricItem {
        category: category.to_string(),
        item: name.to_string(),
        points,
        completed: false,
    }
}

/// A small station with weights 1, 1, 2.
pub fn test_catalog() -> ScenarioCatalog {
    ScenarioCatalog::new(vec![Scenario {
        id: "chest_pain".to_string(),
        name: "Chest Pain Station".to_string(),
        specialty: "Cardiology".to_string(),
        persona: "You are Mr. Jones, 65, with crushing chest pain.".to_string(),
        rubric: vec![
            item("Opening", "Introduces themselves", 1),
            item("Opening", "Confirms patient details", 1),
            item("HPC", "SOCRATES pain assessment", 2),
        ],
        viva_questions: vec![
            VivaQuestion {
                question: "What is your most likely diagnosis?".to_string(),
                model_answer: "Acute coronary syndrome.".to_string(),
            },
            VivaQuestion {
                question: "What is your first investigation?".to_string(),
                model_answer: "12-lead ECG.".to_string(),
            },
        ],
    }])
    .unwrap()
}

/// `n` alternating turns, student first, each with distinct content.
pub fn history(n: usize) -> Vec<DialogueTurn> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                DialogueTurn::student(format!("question {i}"))
            } else {
                DialogueTurn::patient(format!("answer {i}"))
            }
        })
        .collect()
}
