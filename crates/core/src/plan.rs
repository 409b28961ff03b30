//! Water-dropping plan
//!
//! Externally supplied suppression schedule: generation index mapped to the
//! grid coordinates to douse that generation. The on-disk format keys
//! generations as strings (`{"5": [[10, 10], [11, 10]]}`); missing keys
//! mean no drops that generation.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Schedule of aerial water drops keyed by generation index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterDropPlan {
    drops: FxHashMap<usize, Vec<[usize; 2]>>,
}

impl WaterDropPlan {
    /// Empty plan: no suppression at any generation
    pub fn empty() -> Self {
        WaterDropPlan::default()
    }

    /// Add drop coordinates for a generation, appending to any already
    /// scheduled.
    pub fn insert(&mut self, generation: usize, coords: impl IntoIterator<Item = [usize; 2]>) {
        self.drops.entry(generation).or_default().extend(coords);
    }

    /// Coordinates scheduled for a generation; empty when none
    pub fn drops_at(&self, generation: usize) -> &[[usize; 2]] {
        self.drops.get(&generation).map_or(&[], Vec::as_slice)
    }

    /// True when `(x, y)` is scheduled for suppression at `generation`
    pub fn contains(&self, generation: usize, x: usize, y: usize) -> bool {
        self.drops_at(generation)
            .iter()
            .any(|c| c[0] == x && c[1] == y)
    }

    /// Number of generations with at least one scheduled drop
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Parse a plan from its JSON wire form.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a key is not a
    /// non-negative integer.
    pub fn from_json_str(json: &str) -> Result<Self, PlanError> {
        let raw: BTreeMap<String, Vec<[usize; 2]>> =
            serde_json::from_str(json).map_err(|e| PlanError::ParseFailed(e.to_string()))?;

        let mut drops = FxHashMap::default();
        for (key, coords) in raw {
            let generation: usize = key
                .parse()
                .map_err(|_| PlanError::InvalidKey(key.clone()))?;
            drops.insert(generation, coords);
        }
        Ok(WaterDropPlan { drops })
    }

    /// Serialize the plan to its JSON wire form (string keys, sorted).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, PlanError> {
        let raw: BTreeMap<String, &Vec<[usize; 2]>> = self
            .drops
            .iter()
            .map(|(generation, coords)| (generation.to_string(), coords))
            .collect();
        serde_json::to_string_pretty(&raw).map_err(|e| PlanError::SerializeFailed(e.to_string()))
    }

    /// Load a plan from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let contents =
            fs::read_to_string(path).map_err(|e| PlanError::LoadFailed(e.to_string()))?;
        WaterDropPlan::from_json_str(&contents)
    }

    /// Save the plan to a JSON file.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlanError> {
        let contents = self.to_json_string()?;
        fs::write(path, contents).map_err(|e| PlanError::SaveFailed(e.to_string()))
    }
}

#[derive(Debug)]
pub enum PlanError {
    /// Failed to read the plan file
    LoadFailed(String),
    /// Plan JSON was malformed
    ParseFailed(String),
    /// A generation key was not a non-negative integer
    InvalidKey(String),
    /// Failed to serialize the plan
    SerializeFailed(String),
    /// Failed to write the plan file
    SaveFailed(String),
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::LoadFailed(msg) => write!(f, "Failed to load plan: {msg}"),
            PlanError::ParseFailed(msg) => write!(f, "Failed to parse plan: {msg}"),
            PlanError::InvalidKey(key) => write!(f, "Invalid generation key '{key}'"),
            PlanError::SerializeFailed(msg) => write!(f, "Failed to serialize plan: {msg}"),
            PlanError::SaveFailed(msg) => write!(f, "Failed to save plan: {msg}"),
        }
    }
}

impl std::error::Error for PlanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_form() {
        let plan = WaterDropPlan::from_json_str(r#"{"5": [[10, 10], [11, 10]], "9": []}"#)
            .expect("valid plan");
        assert_eq!(plan.drops_at(5), &[[10, 10], [11, 10]]);
        assert!(plan.contains(5, 11, 10));
        assert!(!plan.contains(5, 10, 11));
        assert!(plan.drops_at(9).is_empty());
        // missing key means no drops
        assert!(plan.drops_at(6).is_empty());
    }

    #[test]
    fn test_rejects_non_integer_key() {
        let err = WaterDropPlan::from_json_str(r#"{"soon": [[1, 1]]}"#).unwrap_err();
        assert!(matches!(err, PlanError::InvalidKey(_)));
    }

    #[test]
    fn test_wire_form_round_trip() {
        let mut plan = WaterDropPlan::empty();
        plan.insert(3, [[1, 2], [3, 4]]);
        plan.insert(12, [[7, 7]]);
        let json = plan.to_json_string().expect("serializes");
        let parsed = WaterDropPlan::from_json_str(&json).expect("parses");
        assert_eq!(parsed, plan);
    }
}
