//! Descriptor block embedded in every signature.
//!
//! The block maps small integer field ids to values and serializes as
//! `id:value` pairs joined by commas. Pairs are ordered by the *string*
//! form of the id, so `8` lands after `19`. Numeric ordering produces a
//! different byte stream that the remote verifier rejects.

use super::constants::{
    DESCRIPTOR_CONSTANT, DESCRIPTOR_FLAGS, DESCRIPTOR_TAG, ENV_AID, ENV_BOE, ENV_DDRT, ENV_DUMP,
    ENV_INCLUDE_PATHS, ENV_PAGE_ID, ENV_RPU, ENV_TRACK_DELAY, ENV_TRACK_MODE, FIELD_CONSTANT,
    FIELD_END_TIME, FIELD_ENVIRONMENT, FIELD_FLAGS, FIELD_START_TIME, FIELD_TAG,
};
use crate::exceptions::Result;
use log::trace;
use serde::Serialize;
use serde_json::{Map, Value};

/// Value stored under a descriptor field id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(u64),
    Text(String),
    List(Vec<u32>),
    Environment(EnvironmentDescriptor),
}

/// Client environment record stored under field 15
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentDescriptor {
    pub aid: u32,
    #[serde(rename = "pageId")]
    pub page_id: u32,
    pub boe: bool,
    pub ddrt: u32,
    pub paths: PathFilter,
    pub track: TrackSettings,
    pub dump: bool,
    #[serde(rename = "rpU")]
    pub rp_u: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathFilter {
    pub include: Vec<Map<String, Value>>,
    pub exclude: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSettings {
    pub mode: u32,
    pub delay: u32,
    pub paths: Vec<String>,
}

impl Default for EnvironmentDescriptor {
    fn default() -> Self {
        EnvironmentDescriptor {
            aid: ENV_AID,
            page_id: ENV_PAGE_ID,
            boe: ENV_BOE,
            ddrt: ENV_DDRT,
            paths: PathFilter {
                include: vec![Map::new(); ENV_INCLUDE_PATHS],
                exclude: Vec::new(),
            },
            track: TrackSettings {
                mode: ENV_TRACK_MODE,
                delay: ENV_TRACK_DELAY,
                paths: Vec::new(),
            },
            dump: ENV_DUMP,
            rp_u: ENV_RPU.to_string(),
        }
    }
}

/// Field id to value mapping; insertion order carries no meaning
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorBlock {
    fields: Vec<(u32, FieldValue)>,
}

impl DescriptorBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six-field block used by the signer
    pub fn standard(start_ms: u64, end_ms: u64) -> Self {
        let mut block = Self::new();
        block.insert(FIELD_TAG, FieldValue::Integer(DESCRIPTOR_TAG as u64));
        block.insert(FIELD_END_TIME, FieldValue::Integer(end_ms));
        block.insert(
            FIELD_ENVIRONMENT,
            FieldValue::Environment(EnvironmentDescriptor::default()),
        );
        block.insert(FIELD_START_TIME, FieldValue::Integer(start_ms));
        block.insert(FIELD_CONSTANT, FieldValue::Integer(DESCRIPTOR_CONSTANT as u64));
        block.insert(FIELD_FLAGS, FieldValue::List(DESCRIPTOR_FLAGS.to_vec()));
        block
    }

    /// Set a field, replacing any previous value under the same id
    pub fn insert(&mut self, id: u32, value: FieldValue) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((id, value)),
        }
    }

    pub fn get(&self, id: u32) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries keyed by their decimal id, sorted as strings (`10` before `8`)
    fn sorted_entries(&self) -> Vec<(String, &FieldValue)> {
        let mut entries: Vec<(String, &FieldValue)> = self
            .fields
            .iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Field ids in serialization order
    pub fn ordered_ids(&self) -> Vec<String> {
        self.sorted_entries().into_iter().map(|(id, _)| id).collect()
    }

    /// Render as `id:value,id:value,...` with ids in lexicographic order
    pub fn serialize(&self) -> Result<String> {
        let entries = self.sorted_entries();

        let parts = entries
            .into_iter()
            .map(|(id, value)| Ok(format!("{id}:{}", serde_json::to_string(value)?)))
            .collect::<Result<Vec<String>>>()?;

        let serialized = parts.join(",");
        trace!("🧾 descriptor serialized: {serialized}");
        Ok(serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVIRONMENT_JSON: &str = r#"{"aid":6383,"pageId":6241,"boe":false,"ddrt":7,"paths":{"include":[{},{},{},{},{},{},{}],"exclude":[]},"track":{"mode":0,"delay":300,"paths":[]},"dump":true,"rpU":""}"#;

    #[test]
    fn test_standard_block_serialization() {
        let block = DescriptorBlock::standard(1700000000000, 1700000000456);
        let expected = format!(
            "10:1700000000456,15:{ENVIRONMENT_JSON},16:1700000000000,18:44,19:[1,0,1,5],8:3"
        );
        assert_eq!(block.serialize().unwrap(), expected);
    }

    #[test]
    fn test_lexicographic_order() {
        let block = DescriptorBlock::standard(1, 2);
        let ids = block.ordered_ids();
        assert_eq!(ids, vec!["10", "15", "16", "18", "19", "8"]);

        let mut block = DescriptorBlock::new();
        block.insert(9, FieldValue::Integer(9));
        block.insert(100, FieldValue::Integer(100));
        block.insert(2, FieldValue::Integer(2));
        assert_eq!(block.serialize().unwrap(), "100:100,2:2,9:9");
        let serialized_ids: Vec<String> = block
            .serialize()
            .unwrap()
            .split(',')
            .map(|part| part.split(':').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(serialized_ids, block.ordered_ids());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let standard = DescriptorBlock::standard(11, 22);
        let ids = [FIELD_FLAGS, FIELD_TAG, FIELD_START_TIME, FIELD_ENVIRONMENT, FIELD_CONSTANT, FIELD_END_TIME];

        let mut reversed = DescriptorBlock::new();
        for id in ids {
            let value = standard.get(id).cloned().unwrap();
            reversed.insert(id, value);
        }

        assert_eq!(reversed.serialize().unwrap(), standard.serialize().unwrap());
    }

    #[test]
    fn test_insert_replaces() {
        let mut block = DescriptorBlock::new();
        block.insert(8, FieldValue::Integer(1));
        block.insert(8, FieldValue::Bool(true));
        assert_eq!(block.len(), 1);
        assert_eq!(block.serialize().unwrap(), "8:true");
    }

    #[test]
    fn test_value_rendering() {
        let mut block = DescriptorBlock::new();
        block.insert(2, FieldValue::Text("x\"y".to_string()));
        block.insert(1, FieldValue::List(vec![]));
        assert_eq!(block.serialize().unwrap(), r#"1:[],2:"x\"y""#);
        assert!(DescriptorBlock::new().serialize().unwrap().is_empty());
    }
}
