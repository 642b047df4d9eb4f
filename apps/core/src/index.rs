use crate::dataset::{Demographic, RawDataset, SubjectId};
use crate::error::{DashboardError, Result};
use crate::ranking::{rank_samples, RankedSampleSet};
use std::collections::HashMap;
use tracing::debug;

/// One subject's metadata and ranked samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRecord {
    pub name: SubjectId,
    pub metadata: Demographic,
    pub samples: RankedSampleSet,
}

/// All subjects of a dataset, in dataset order, with samples already ranked.
#[derive(Debug, Clone, Default)]
pub struct SubjectIndex {
    records: Vec<SubjectRecord>,
    positions: HashMap<SubjectId, usize>,
}

impl SubjectIndex {
    /// Zip `names`, `metadata` and `samples` positionally and rank every
    /// subject's samples.
    ///
    /// Fails on the first length mismatch rather than producing misaligned
    /// records.
    pub fn build(dataset: RawDataset) -> Result<Self> {
        let RawDataset {
            names,
            metadata,
            samples,
        } = dataset;

        if names.len() != metadata.len() || names.len() != samples.len() {
            return Err(DashboardError::MalformedDataset(format!(
                "names ({}), metadata ({}) and samples ({}) differ in length",
                names.len(),
                metadata.len(),
                samples.len()
            )));
        }

        let mut records = Vec::with_capacity(names.len());
        let mut positions = HashMap::with_capacity(names.len());

        for (position, ((name, metadata), samples)) in
            names.into_iter().zip(metadata).zip(samples).enumerate()
        {
            if !samples.is_aligned() {
                return Err(DashboardError::MalformedDataset(format!(
                    "subject {name}: otu_ids ({}), sample_values ({}) and otu_labels ({}) differ in length",
                    samples.otu_ids.len(),
                    samples.sample_values.len(),
                    samples.otu_labels.len()
                )));
            }

            // Duplicate names resolve to the first occurrence
            positions.entry(name.clone()).or_insert(position);
            records.push(SubjectRecord {
                name,
                metadata,
                samples: rank_samples(samples),
            });
        }

        debug!(subjects = records.len(), "built subject index");

        Ok(Self { records, positions })
    }

    pub fn get(&self, name: &SubjectId) -> Option<&SubjectRecord> {
        self.positions
            .get(name)
            .and_then(|&position| self.records.get(position))
    }

    pub fn contains(&self, name: &SubjectId) -> bool {
        self.positions.contains_key(name)
    }

    /// Subject names in dataset order, as shown in the dropdown.
    pub fn names(&self) -> impl Iterator<Item = &SubjectId> + '_ {
        self.records.iter().map(|record| &record.name)
    }

    pub fn first(&self) -> Option<&SubjectRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dataset::{Identifier, SampleSet};

    pub(crate) fn demographic(id: i64, wfreq: Option<f64>) -> Demographic {
        Demographic {
            id: Identifier::Int(id),
            ethnicity: Some("Caucasian".to_string()),
            gender: Some("F".to_string()),
            age: Some(24.0),
            location: Some("Beaufort/NC".to_string()),
            bbtype: Some("I".to_string()),
            wfreq,
        }
    }

    pub(crate) fn samples(ids: &[i64], values: &[f64]) -> SampleSet {
        SampleSet {
            id: None,
            otu_ids: ids.iter().copied().map(Identifier::Int).collect(),
            sample_values: values.to_vec(),
            otu_labels: ids.iter().map(|id| format!("label {id}")).collect(),
        }
    }

    pub(crate) fn dataset(subjects: &[(&str, i64)]) -> RawDataset {
        RawDataset {
            names: subjects.iter().map(|(name, _)| SubjectId::from(*name)).collect(),
            metadata: subjects
                .iter()
                .map(|(_, id)| demographic(*id, Some(2.0)))
                .collect(),
            samples: subjects
                .iter()
                .map(|_| samples(&[10, 20, 30], &[5.0, 50.0, 15.0]))
                .collect(),
        }
    }

    #[test]
    fn preserves_length_and_order() -> Result<()> {
        let index = SubjectIndex::build(dataset(&[("943", 943), ("940", 940), ("941", 941)]))?;

        assert_eq!(index.len(), 3);
        let names = index.names().map(SubjectId::as_str).collect::<Vec<_>>();
        assert_eq!(names, vec!["943", "940", "941"]);
        Ok(())
    }

    #[test]
    fn ranks_samples_during_construction() -> Result<()> {
        let index = SubjectIndex::build(dataset(&[("940", 940)]))?;
        let record = index
            .get(&SubjectId::from("940"))
            .ok_or_else(|| DashboardError::UnknownSubject(SubjectId::from("940")))?;

        assert_eq!(record.samples.otu_ids, vec!["20", "30", "10"]);
        assert_eq!(record.samples.sample_values, vec![50.0, 15.0, 5.0]);
        assert_eq!(record.metadata.id, Identifier::Int(940));
        Ok(())
    }

    #[test]
    fn rejects_mismatched_top_level_lengths() {
        let mut raw = dataset(&[("940", 940), ("941", 941)]);
        raw.metadata.pop();

        let result = SubjectIndex::build(raw);
        assert!(matches!(result, Err(DashboardError::MalformedDataset(_))));
    }

    #[test]
    fn rejects_misaligned_sample_arrays() {
        let mut raw = dataset(&[("940", 940), ("941", 941)]);
        raw.samples[1].otu_labels.pop();

        match SubjectIndex::build(raw) {
            Err(DashboardError::MalformedDataset(message)) => {
                assert!(message.contains("941"), "unexpected message: {message}");
            }
            other => panic!("expected MalformedDataset, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_resolve_to_first_record() -> Result<()> {
        let index = SubjectIndex::build(dataset(&[("940", 1), ("940", 2)]))?;

        assert_eq!(index.len(), 2);
        let record = index.get(&SubjectId::from("940"));
        assert_eq!(record.map(|r| r.metadata.id.clone()), Some(Identifier::Int(1)));
        Ok(())
    }

    #[test]
    fn empty_dataset_builds_empty_index() -> Result<()> {
        let index = SubjectIndex::build(dataset(&[]))?;
        assert!(index.is_empty());
        assert!(index.first().is_none());
        assert!(!index.contains(&SubjectId::from("940")));
        Ok(())
    }
}
