//! vizpack core library
//!
//! Row packing, primer location and variant summaries that turn one sample's
//! parsed annotation, primer and variant records into a visualization payload.

pub mod types;
pub mod layout;
pub mod motif;
pub mod variant;
pub mod config;
pub mod pipeline;
pub mod payload;

// Re-export commonly used types and functions
pub use types::{FeatureRecord, GenomicPos, Interval, LocatedPrimer, PrimerRecord, RecordError, Strand};
pub use layout::{pack, Placed};
pub use motif::{reverse_complement, LocateOutcome, MotifLocator};
pub use variant::{frequency, posterior, summarize, summarize_all, InfoValue, TransformError, VariantRecord, VariantSummary};
pub use config::{DescriptionTable, TrackConfig};
pub use pipeline::{build_feature_tracks, build_primer_tracks, FeatureSource, FeatureTracks, PrimerSource, PrimerTracks};
pub use payload::{Coverage, SampleInputs, VisualizationPayload};

/// Version information for the vizpack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
