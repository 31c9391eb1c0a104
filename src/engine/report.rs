//! Generation report persisted into the run's `meta` JSON.

use serde::{Deserialize, Serialize};

use crate::api::SuggestedSlot;
use crate::engine::blocks::ClassBlock;

/// Alternative windows for a block the search could not place. Suggested
/// slots fit the working grid alone; teacher and room conflicts are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSuggestion {
    pub block: ClassBlock,
    pub suggested_slots: Vec<SuggestedSlot>,
    pub conflict_reasons: Vec<String>,
}

/// Summary of one generation: how many blocks were derived, how many were
/// placed, what was skipped or dropped, and where the leftovers could go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    pub total_blocks: usize,
    pub placed_blocks: usize,
    pub unplaced_blocks: Vec<ClassBlock>,
    /// Per-offering structural diagnostics (missing teachers/rooms, dropped
    /// lab groups). These never abort a generation.
    pub conflicts: Vec<String>,
    pub suggestions: Vec<PlacementSuggestion>,
}

impl GenerationReport {
    /// Whether every derived block found a home.
    pub fn is_complete(&self) -> bool {
        self.placed_blocks == self.total_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_meta_field_names() {
        let report = GenerationReport {
            total_blocks: 3,
            placed_blocks: 2,
            unplaced_blocks: vec![],
            conflicts: vec!["x".to_string()],
            suggestions: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_blocks"], 3);
        assert_eq!(json["placed_blocks"], 2);
        assert!(json["unplaced_blocks"].is_array());
        assert!(json["conflicts"].is_array());
        assert!(json["suggestions"].is_array());
        assert!(!report.is_complete());
    }
}
