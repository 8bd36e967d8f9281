//! Numeric summaries attached to variant calls
//!
//! Both values are rounded to 3 decimals with round-half-away-from-zero
//! (`f64::round`), so an exact half such as `0.0625` becomes `0.063`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Key prefix of the INFO fields that hold allele frequencies.
pub const FREQUENCY_PREFIX: &str = "Freq";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    #[error("No Freq* INFO fields to average")]
    NoFrequencyData,
    #[error("Variant has no quality score")]
    MissingQuality,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Number(f64),
    List(Vec<f64>),
}

impl InfoValue {
    fn values(&self) -> &[f64] {
        match self {
            InfoValue::Number(value) => std::slice::from_ref(value),
            InfoValue::List(values) => values,
        }
    }
}

impl From<f64> for InfoValue {
    fn from(value: f64) -> Self {
        InfoValue::Number(value)
    }
}

impl From<Vec<f64>> for InfoValue {
    fn from(values: Vec<f64>) -> Self {
        InfoValue::List(values)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariantRecord {
    pub position: u64,
    pub reference: String,
    pub variants: Vec<String>,
    pub quality: Option<f64>,
    #[serde(default)]
    pub info: BTreeMap<String, InfoValue>,
}

/// Per-variant output; a transform that failed leaves its field `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSummary {
    pub position: u64,
    pub reference: String,
    pub variants: Vec<String>,
    pub frequency: Option<f64>,
    pub posterior: Option<f64>,
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Mean of every value under a `Freq*` INFO key, lists flattened.
pub fn frequency(record: &VariantRecord) -> Result<f64, TransformError> {
    let pool: Vec<f64> = record
        .info
        .iter()
        .filter(|(key, _)| key.starts_with(FREQUENCY_PREFIX))
        .flat_map(|(_, value)| value.values().iter().copied())
        .collect();

    if pool.is_empty() {
        return Err(TransformError::NoFrequencyData);
    }
    Ok(round3(pool.iter().sum::<f64>() / pool.len() as f64))
}

/// Probability that the call is correct, from its Phred-scaled quality.
pub fn posterior(record: &VariantRecord) -> Result<f64, TransformError> {
    match record.quality {
        Some(quality) if !quality.is_nan() => Ok(round3(1.0 - 10f64.powf(-quality / 10.0))),
        _ => Err(TransformError::MissingQuality),
    }
}

pub fn summarize(record: &VariantRecord) -> VariantSummary {
    let frequency = frequency(record)
        .inspect_err(|e| log::debug!("Variant at {}: {}", record.position, e))
        .ok();
    let posterior = posterior(record)
        .inspect_err(|e| log::debug!("Variant at {}: {}", record.position, e))
        .ok();

    VariantSummary {
        position: record.position,
        reference: record.reference.clone(),
        variants: record.variants.clone(),
        frequency,
        posterior,
    }
}

pub fn summarize_all(records: &[VariantRecord]) -> Vec<VariantSummary> {
    if records.is_empty() {
        log::info!("No variant calls to summarize");
    }
    records.iter().map(summarize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quality: Option<f64>, info: Vec<(&str, InfoValue)>) -> VariantRecord {
        VariantRecord {
            position: 241,
            reference: "C".into(),
            variants: vec!["T".into()],
            quality,
            info: info.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    #[test]
    fn test_frequency_flattens_lists() {
        let r = record(
            None,
            vec![("FreqA", InfoValue::from(0.2)), ("FreqB", InfoValue::from(vec![0.4, 0.6]))],
        );
        assert_eq!(frequency(&r), Ok(0.4));
    }

    #[test]
    fn test_frequency_ignores_other_keys() {
        let r = record(
            None,
            vec![
                ("Freq1", InfoValue::from(0.5)),
                ("Post1", InfoValue::from(0.9)),
                ("freq2", InfoValue::from(0.1)),
                ("DP", InfoValue::from(1200.0)),
            ],
        );
        assert_eq!(frequency(&r), Ok(0.5));
    }

    #[test]
    fn test_frequency_without_fields_fails() {
        let r = record(Some(30.0), vec![("DP", InfoValue::from(10.0))]);
        assert_eq!(frequency(&r), Err(TransformError::NoFrequencyData));

        let empty_list = record(Some(30.0), vec![("Freq1", InfoValue::List(vec![]))]);
        assert_eq!(frequency(&empty_list), Err(TransformError::NoFrequencyData));
    }

    #[test]
    fn test_posterior_from_phred() {
        assert_eq!(posterior(&record(Some(30.0), vec![])), Ok(0.999));
        assert_eq!(posterior(&record(Some(0.0), vec![])), Ok(0.0));
        assert_eq!(posterior(&record(Some(10.0), vec![])), Ok(0.9));
    }

    #[test]
    fn test_posterior_without_quality_fails() {
        assert_eq!(
            posterior(&record(None, vec![])),
            Err(TransformError::MissingQuality)
        );
        assert_eq!(
            posterior(&record(Some(f64::NAN), vec![])),
            Err(TransformError::MissingQuality)
        );
    }

    #[test]
    fn test_round3_half_away_from_zero() {
        assert_eq!(round3(0.0625), 0.063);
        assert_eq!(round3(-0.0625), -0.063);
        assert_eq!(round3(0.1875), 0.188);
        assert_eq!(round3(0.12345), 0.123);
    }

    #[test]
    fn test_missing_quality_is_isolated() {
        let batch = vec![
            record(Some(30.0), vec![("Freq1", InfoValue::from(0.25))]),
            record(None, vec![("Freq1", InfoValue::from(0.5))]),
            record(Some(20.0), vec![]),
        ];
        let summaries = summarize_all(&batch);

        let posteriors: Vec<_> = summaries.iter().map(|s| s.posterior).collect();
        assert_eq!(posteriors, vec![Some(0.999), None, Some(0.99)]);
        let frequencies: Vec<_> = summaries.iter().map(|s| s.frequency).collect();
        assert_eq!(frequencies, vec![Some(0.25), Some(0.5), None]);
    }

    #[test]
    fn test_summary_serializes_nulls() {
        let summary = summarize(&record(None, vec![]));
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["frequency"].is_null());
        assert!(json["posterior"].is_null());
        assert_eq!(json["variants"][0], "T");
        assert_eq!(json["position"], 241);
    }

    #[test]
    fn test_record_deserializes_mixed_info() {
        let json = r#"{
            "position": 3037,
            "reference": "C",
            "variants": ["T", "G"],
            "quality": null,
            "info": {"Freq1": 0.75, "Freq2": [0.5, 1.0]}
        }"#;
        let r: VariantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.variants, vec!["T", "G"]);
        assert_eq!(r.info["Freq2"], InfoValue::List(vec![0.5, 1.0]));
        assert_eq!(frequency(&r), Ok(0.75));
    }
}
