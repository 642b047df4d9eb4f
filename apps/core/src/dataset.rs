use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject name as listed in the dataset's `names` array.
///
/// The values look numeric ("940") but are only ever compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An identifier as it appears in the JSON: OTU ids and demographic ids are
/// integers in the published dataset, but text and floats are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Demographic record for one subject. Everything except `id` may be `null`
/// in the published dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographic {
    pub id: Identifier,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bbtype: Option<String>,
    /// Belly button washing frequency (scrubs per week)
    #[serde(default)]
    pub wfreq: Option<f64>,
}

/// Raw OTU observations for one subject as three parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    /// Subject this sample set belongs to; older exports omit it
    #[serde(default)]
    pub id: Option<SubjectId>,
    pub otu_ids: Vec<Identifier>,
    pub sample_values: Vec<f64>,
    pub otu_labels: Vec<String>,
}

impl SampleSet {
    pub fn is_aligned(&self) -> bool {
        self.otu_ids.len() == self.sample_values.len()
            && self.otu_ids.len() == self.otu_labels.len()
    }
}

/// The document as fetched: `names`, `metadata` and `samples` are positional
/// and describe the same subject at the same index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub names: Vec<SubjectId>,
    pub metadata: Vec<Demographic>,
    pub samples: Vec<SampleSet>,
}

impl RawDataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    const SAMPLE_JSON: &str = r#"{
        "names": ["940", "941"],
        "metadata": [
            {"id": 940, "ethnicity": "Caucasian", "gender": "F", "age": 24.0,
             "location": "Beaufort/NC", "bbtype": "I", "wfreq": 2.0},
            {"id": 941, "ethnicity": "Caucasian/Midleastern", "gender": "F", "age": 34.0,
             "location": "Chicago/IL", "bbtype": "I", "wfreq": null}
        ],
        "samples": [
            {"id": "940", "otu_ids": [1167, 2859], "sample_values": [163, 126],
             "otu_labels": ["Bacteria;Bacteroidetes", "Bacteria;Firmicutes"]},
            {"id": "941", "otu_ids": [944], "sample_values": [5], "otu_labels": ["Bacteria"]}
        ]
    }"#;

    #[test]
    fn parses_published_shape() -> Result<()> {
        let dataset = RawDataset::from_json_str(SAMPLE_JSON)?;

        assert_eq!(dataset.names, vec![SubjectId::from("940"), SubjectId::from("941")]);
        assert_eq!(dataset.metadata[0].id, Identifier::Int(940));
        assert_eq!(dataset.metadata[0].wfreq, Some(2.0));
        assert_eq!(dataset.metadata[1].wfreq, None);
        assert_eq!(dataset.samples[0].otu_ids[0], Identifier::Int(1167));
        assert_eq!(dataset.samples[1].id, Some(SubjectId::from("941")));
        assert!(dataset.samples[0].is_aligned());
        Ok(())
    }

    #[test]
    fn sample_set_id_is_optional() -> Result<()> {
        let samples: SampleSet = serde_json::from_str(
            r#"{"otu_ids": [7], "sample_values": [1], "otu_labels": ["a"]}"#,
        )
        .map_err(DashboardError::from)?;

        assert_eq!(samples.id, None);
        assert!(samples.is_aligned());
        Ok(())
    }

    #[test]
    fn invalid_json_is_a_fetch_failure() {
        let result = RawDataset::from_json_str("{\"names\": [");
        assert!(matches!(result, Err(DashboardError::FetchFailure(_))));
    }

    #[test]
    fn identifiers_display_without_float_noise() {
        assert_eq!(Identifier::Int(1167).to_string(), "1167");
        assert_eq!(Identifier::Float(3.0).to_string(), "3");
        assert_eq!(Identifier::Float(2.5).to_string(), "2.5");
        assert_eq!(Identifier::from("otu-7").to_string(), "otu-7");
    }

    #[test]
    fn misaligned_sample_set_is_detected() {
        let samples = SampleSet {
            id: None,
            otu_ids: vec![Identifier::Int(1), Identifier::Int(2)],
            sample_values: vec![1.0],
            otu_labels: vec!["a".to_string(), "b".to_string()],
        };
        assert!(!samples.is_aligned());
    }
}
