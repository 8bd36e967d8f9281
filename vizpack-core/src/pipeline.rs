//! Turns annotation and primer sources into named, row-packed tracks
//!
//! A source that is absent or yields nothing to draw gets no entry in the
//! output mapping at all, never an empty track.

use crate::config::DescriptionTable;
use crate::layout::{pack, Placed};
use crate::motif::MotifLocator;
use crate::types::{FeatureRecord, LocatedPrimer, PrimerRecord};
use rayon::prelude::*;
use std::collections::BTreeMap;

pub type FeatureTracks = BTreeMap<String, Vec<Placed<FeatureRecord>>>;
pub type PrimerTracks = BTreeMap<String, Vec<Placed<LocatedPrimer>>>;

/// Parsed contents of one annotation file.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSource {
    pub file_name: String,
    pub features: Vec<FeatureRecord>,
}

impl FeatureSource {
    pub fn new(file_name: impl Into<String>, features: Vec<FeatureRecord>) -> Self {
        Self {
            file_name: file_name.into(),
            features,
        }
    }
}

/// Parsed contents of a primer table.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimerSource {
    pub file_name: String,
    pub primers: Vec<PrimerRecord>,
}

impl PrimerSource {
    pub fn new(file_name: impl Into<String>, primers: Vec<PrimerRecord>) -> Self {
        Self {
            file_name: file_name.into(),
            primers,
        }
    }
}

fn insert_track<T>(
    tracks: &mut BTreeMap<String, Vec<Placed<T>>>,
    description: String,
    file_name: &str,
    track: Vec<Placed<T>>,
) {
    if tracks.contains_key(&description) {
        log::warn!(
            "Track \"{}\" from {} replaces an earlier source with the same description",
            description,
            file_name
        );
    }
    tracks.insert(description, track);
}

pub fn build_feature_tracks(
    sources: Vec<FeatureSource>,
    descriptions: &DescriptionTable,
) -> FeatureTracks {
    let mut tracks = FeatureTracks::new();
    if sources.is_empty() {
        log::info!("No feature sources provided, skipping");
        return tracks;
    }

    // sources are independent; collect keeps input order
    let packed: Vec<(String, Vec<Placed<FeatureRecord>>)> = sources
        .into_par_iter()
        .map(|source| {
            log::debug!(
                "Packing {} features from {}",
                source.features.len(),
                source.file_name
            );
            (source.file_name, pack(source.features))
        })
        .collect();

    for (file_name, track) in packed {
        if track.is_empty() {
            log::warn!("No features in {}, omitting track", file_name);
            continue;
        }
        let description = descriptions.describe(&file_name);
        insert_track(&mut tracks, description, &file_name, track);
    }

    tracks
}

pub fn build_primer_tracks(
    source: Option<PrimerSource>,
    reference: &str,
    descriptions: &DescriptionTable,
) -> PrimerTracks {
    let mut tracks = PrimerTracks::new();
    let Some(source) = source else {
        log::info!("No primers table provided, skipping");
        return tracks;
    };

    log::info!(
        "Locating {} primers from {}",
        source.primers.len(),
        source.file_name
    );
    let outcome = MotifLocator::new(reference).locate(&source.primers);
    if !outcome.unmatched.is_empty() {
        log::warn!(
            "{} of {} primers from {} did not map",
            outcome.unmatched.len(),
            source.primers.len(),
            source.file_name
        );
    }

    if outcome.located.is_empty() {
        log::warn!("No primer was mapped from {}", source.file_name);
        return tracks;
    }

    let description = descriptions.describe(&source.file_name);
    insert_track(&mut tracks, description, &source.file_name, pack(outcome.located));
    tracks
}
