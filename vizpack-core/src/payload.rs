//! The data handed to the report page: one serializable bundle per sample.

use crate::config::TrackConfig;
use crate::pipeline::{
    build_feature_tracks, build_primer_tracks, FeatureSource, FeatureTracks, PrimerSource,
    PrimerTracks,
};
use crate::types::RecordError;
use crate::variant::{summarize_all, VariantRecord, VariantSummary};
use serde::Serialize;

/// Per-base read coverage, aligned with reference positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Coverage(Vec<f64>);

impl Coverage {
    pub fn new(values: Vec<f64>) -> Result<Self, RecordError> {
        if let Some((position, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(RecordError::InvalidCoverage { position, value });
        }
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything gathered for one sample before the report is written.
#[derive(Debug, Clone, Default)]
pub struct SampleInputs {
    pub sample_name: String,
    /// Label of the reference the sample was aligned against
    pub reference_name: String,
    pub consensus: String,
    pub coverage: Coverage,
    pub variants: Vec<VariantRecord>,
    pub feature_sources: Vec<FeatureSource>,
    pub primer_source: Option<PrimerSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationPayload {
    pub sample_name: String,
    pub reference_name: String,
    pub consensus: String,
    pub coverage: Coverage,
    #[serde(rename = "vcfData")]
    pub variants: Vec<VariantSummary>,
    #[serde(rename = "gffData")]
    pub feature_tracks: FeatureTracks,
    #[serde(rename = "primerData")]
    pub primer_tracks: PrimerTracks,
}

impl VisualizationPayload {
    pub fn assemble(inputs: SampleInputs, config: &TrackConfig) -> Self {
        let consensus = inputs.consensus.to_ascii_uppercase();
        if !inputs.coverage.is_empty() && inputs.coverage.len() != consensus.len() {
            log::warn!(
                "Coverage for {} has {} positions but the consensus has {} bases",
                inputs.sample_name,
                inputs.coverage.len(),
                consensus.len()
            );
        }

        let variants = summarize_all(&inputs.variants);
        let feature_tracks = build_feature_tracks(inputs.feature_sources, &config.features);
        let primer_tracks = build_primer_tracks(inputs.primer_source, &consensus, &config.primers);

        log::info!(
            "Assembled {}: {} variants, {} feature tracks, {} primer tracks",
            inputs.sample_name,
            variants.len(),
            feature_tracks.len(),
            primer_tracks.len()
        );

        Self {
            sample_name: inputs.sample_name,
            reference_name: inputs.reference_name,
            consensus,
            coverage: inputs.coverage,
            variants,
            feature_tracks,
            primer_tracks,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
