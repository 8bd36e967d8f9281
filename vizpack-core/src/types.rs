use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type GenomicPos = u64;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Invalid interval {start}..{end}: end precedes start")]
    InvalidInterval { start: GenomicPos, end: GenomicPos },
    #[error("Primer {name} has an empty sequence")]
    EmptyPrimer { name: String },
    #[error("Primer {name} contains non-nucleotide character {base:?}")]
    InvalidBase { name: String, base: char },
    #[error("Invalid coverage value {value} at position {position}")]
    InvalidCoverage { position: usize, value: f64 },
}

/// Anything with a start/end on the linear reference axis.
pub trait Interval {
    fn start(&self) -> GenomicPos;
    fn end(&self) -> GenomicPos;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Primers named with a `RIGHT` token (any case) bind the reverse strand.
    pub fn from_primer_name(name: &str) -> Self {
        if name.to_uppercase().contains("RIGHT") {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// Annotated feature. Fields are only reachable through the validating
/// constructors, deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeature")]
pub struct FeatureRecord {
    id: String,
    #[serde(rename = "type")]
    feature_type: String,
    name: String,
    start: GenomicPos,
    end: GenomicPos,
}

#[derive(Deserialize)]
struct RawFeature {
    id: String,
    #[serde(rename = "type")]
    feature_type: String,
    name: String,
    start: GenomicPos,
    end: GenomicPos,
}

impl TryFrom<RawFeature> for FeatureRecord {
    type Error = RecordError;

    fn try_from(raw: RawFeature) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.feature_type, raw.name, raw.start, raw.end)
    }
}

impl FeatureRecord {
    pub fn new(
        id: impl Into<String>,
        feature_type: impl Into<String>,
        name: impl Into<String>,
        start: GenomicPos,
        end: GenomicPos,
    ) -> Result<Self, RecordError> {
        if end < start {
            return Err(RecordError::InvalidInterval { start, end });
        }
        Ok(Self {
            id: id.into(),
            feature_type: feature_type.into(),
            name: name.into(),
            start,
            end,
        })
    }

    /// Build a record whose label is the `Name` attribute when the annotation
    /// has one, falling back to the feature identifier.
    pub fn with_display_name(
        id: impl Into<String>,
        feature_type: impl Into<String>,
        name: Option<String>,
        feature_id: &str,
        start: GenomicPos,
        end: GenomicPos,
    ) -> Result<Self, RecordError> {
        let name = name.unwrap_or_else(|| feature_id.to_string());
        Self::new(id, feature_type, name, start, end)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Interval for FeatureRecord {
    fn start(&self) -> GenomicPos {
        self.start
    }

    fn end(&self) -> GenomicPos {
        self.end
    }
}

/// Primer with an uppercased sequence and a strand derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimerRecord {
    name: String,
    sequence: String,
    strand: Strand,
}

impl PrimerRecord {
    pub fn new(name: impl Into<String>, sequence: &str) -> Result<Self, RecordError> {
        let name = name.into();
        let sequence = sequence.trim().to_ascii_uppercase();

        if sequence.is_empty() {
            return Err(RecordError::EmptyPrimer { name });
        }
        if let Some(base) = sequence.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(RecordError::InvalidBase { name, base });
        }

        let strand = Strand::from_primer_name(&name);
        Ok(Self {
            name,
            sequence,
            strand,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }
}

/// One occurrence of a primer on the reference. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedPrimer {
    name: String,
    #[serde(rename = "seq")]
    sequence: String,
    start: GenomicPos,
    end: GenomicPos,
}

impl LocatedPrimer {
    /// Occurrence of `primer` starting at `offset`, spanning the primer's length.
    pub(crate) fn at(primer: &PrimerRecord, offset: GenomicPos) -> Self {
        Self {
            name: primer.name.clone(),
            sequence: primer.sequence.clone(),
            start: offset,
            end: offset + primer.sequence.len() as GenomicPos - 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

impl Interval for LocatedPrimer {
    fn start(&self) -> GenomicPos {
        self.start
    }

    fn end(&self) -> GenomicPos {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_from_primer_name() {
        assert_eq!(Strand::from_primer_name("nCoV-2019_1_LEFT"), Strand::Forward);
        assert_eq!(Strand::from_primer_name("nCoV-2019_1_RIGHT"), Strand::Reverse);
        assert_eq!(Strand::from_primer_name("x_right_alt"), Strand::Reverse);
        assert_eq!(char::from(Strand::Reverse), '-');
    }

    #[test]
    fn test_feature_rejects_inverted_interval() {
        let err = FeatureRecord::new("NC_045512.2", "gene", "S", 20, 10).unwrap_err();
        assert_eq!(err, RecordError::InvalidInterval { start: 20, end: 10 });
        assert!(FeatureRecord::new("NC_045512.2", "gene", "E", 10, 10).is_ok());
    }

    #[test]
    fn test_feature_display_name_fallback() {
        let named =
            FeatureRecord::with_display_name("chr", "gene", Some("ORF1ab".into()), "gene-1", 0, 5)
                .unwrap();
        assert_eq!(named.name(), "ORF1ab");

        let unnamed = FeatureRecord::with_display_name("chr", "gene", None, "gene-1", 0, 5).unwrap();
        assert_eq!(unnamed.name(), "gene-1");
    }

    #[test]
    fn test_primer_normalization() {
        let primer = PrimerRecord::new("p_RIGHT", " acgtn ").unwrap();
        assert_eq!(primer.sequence(), "ACGTN");
        assert_eq!(primer.strand(), Strand::Reverse);

        assert_eq!(
            PrimerRecord::new("p", "").unwrap_err(),
            RecordError::EmptyPrimer { name: "p".into() }
        );
        assert_eq!(
            PrimerRecord::new("p", "AC-GT").unwrap_err(),
            RecordError::InvalidBase {
                name: "p".into(),
                base: '-'
            }
        );
    }

    #[test]
    fn test_feature_serializes_type_field() {
        let feature = FeatureRecord::new("chr", "CDS", "N", 1, 9).unwrap();
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "CDS");
        assert!(json.get("feature_type").is_none());
    }

    #[test]
    fn test_feature_deserialization_validates_interval() {
        let inverted = r#"{"id":"chr","type":"gene","name":"S","start":10,"end":5}"#;
        let err = serde_json::from_str::<FeatureRecord>(inverted).unwrap_err();
        assert!(err.to_string().contains("end precedes start"));

        let valid = r#"{"id":"chr","type":"gene","name":"S","start":5,"end":10}"#;
        let feature: FeatureRecord = serde_json::from_str(valid).unwrap();
        assert_eq!(feature, FeatureRecord::new("chr", "gene", "S", 5, 10).unwrap());
        assert_eq!((feature.start(), feature.end()), (5, 10));
    }

    #[test]
    fn test_located_primer_spans_primer_length() {
        let primer = PrimerRecord::new("p_LEFT", "acg").unwrap();
        let hit = LocatedPrimer::at(&primer, 3);
        assert_eq!((hit.start(), hit.end()), (3, 5));
        assert_eq!(hit.sequence(), "ACG");
    }
}
