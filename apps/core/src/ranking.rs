use crate::dataset::{Identifier, SampleSet};
use serde::Serialize;

/// A sample set reordered so index 0 holds the most abundant OTU.
///
/// The three vectors stay parallel: `otu_ids[k]`, `sample_values[k]` and
/// `otu_labels[k]` describe the same observation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RankedSampleSet {
    pub otu_ids: Vec<String>,
    pub sample_values: Vec<f64>,
    pub otu_labels: Vec<String>,
}

impl RankedSampleSet {
    pub fn len(&self) -> usize {
        self.otu_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.otu_ids.is_empty()
    }

    /// Iterate the ranked observations as `(id, value, label)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64, &str)> + '_ {
        self.otu_ids
            .iter()
            .zip(&self.sample_values)
            .zip(&self.otu_labels)
            .map(|((id, value), label)| (id.as_str(), *value, label.as_str()))
    }
}

impl From<RankedSampleSet> for SampleSet {
    fn from(ranked: RankedSampleSet) -> Self {
        Self {
            id: None,
            otu_ids: ranked.otu_ids.into_iter().map(Identifier::Text).collect(),
            sample_values: ranked.sample_values,
            otu_labels: ranked.otu_labels,
        }
    }
}

/// Rank OTUs by abundance, highest first.
///
/// Equal values keep their original relative order (the sort is stable), so
/// the result is deterministic and ranking an already ranked set is a no-op.
/// Callers are expected to have checked that the input arrays are aligned;
/// extra trailing entries in a longer array are dropped by the zip.
pub fn rank_samples(samples: SampleSet) -> RankedSampleSet {
    let mut triples = samples
        .otu_ids
        .into_iter()
        .zip(samples.sample_values)
        .zip(samples.otu_labels)
        .map(|((id, value), label)| (id, value, label))
        .collect::<Vec<_>>();

    triples.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut ranked = RankedSampleSet {
        otu_ids: Vec::with_capacity(triples.len()),
        sample_values: Vec::with_capacity(triples.len()),
        otu_labels: Vec::with_capacity(triples.len()),
    };

    for (id, value, label) in triples {
        ranked.otu_ids.push(id.to_string());
        ranked.sample_values.push(value);
        ranked.otu_labels.push(label);
    }

    ranked
}
