use serde::{Deserialize, Serialize};

/// Processing steps applied to a feature table, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingHistory {
    /// Steps in the order they were applied
    pub steps: Vec<ProcessingStep>,
}

/// A single processing step in the history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Step order (1-indexed)
    pub order: u32,

    /// Method name (e.g. "chromatogram builder", "join aligner")
    pub method: String,

    /// RFC 3339 timestamp when the step ran; not serialized, so identical
    /// runs export identical tables
    #[serde(skip_serializing, default)]
    pub timestamp: String,

    /// Parameters the step ran with
    pub parameters: serde_json::Value,
}

impl ProcessingHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, stamped with the current time
    pub fn add_step(&mut self, method: impl Into<String>, parameters: serde_json::Value) {
        let order = self.steps.len() as u32 + 1;
        self.steps.push(ProcessingStep {
            order,
            method: method.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            parameters,
        });
    }

    /// Append a step whose parameters are a serializable configuration
    pub fn record<C: Serialize>(&mut self, method: impl Into<String>, config: &C) {
        let parameters = serde_json::to_value(config).unwrap_or(serde_json::Value::Null);
        self.add_step(method, parameters);
    }

    /// Append every step of `other`, renumbered after the existing ones
    pub fn extend_from(&mut self, other: &ProcessingHistory) {
        for step in &other.steps {
            let order = self.steps.len() as u32 + 1;
            self.steps.push(ProcessingStep {
                order,
                ..step.clone()
            });
        }
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no step was recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
