//! Exact primer location on a reference sequence

use crate::types::{GenomicPos, LocatedPrimer, PrimerRecord, Strand};

/// Generate reverse complement of a sequence
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .rev()
        .map(|&nucleotide| complement_nucleotide(nucleotide))
        .collect()
}

/// Complement of an uppercase nucleotide; anything else is returned as is
fn complement_nucleotide(nucleotide: u8) -> u8 {
    match nucleotide {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => nucleotide,
    }
}

/// Primer hits plus the names of primers that matched nowhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocateOutcome {
    pub located: Vec<LocatedPrimer>,
    pub unmatched: Vec<String>,
}

pub struct MotifLocator {
    reference: Vec<u8>,
}

impl MotifLocator {
    pub fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_ascii_uppercase().into_bytes(),
        }
    }

    /// Offsets of every occurrence of `needle`, overlapping ones included.
    pub fn find_all(&self, needle: &[u8]) -> Vec<usize> {
        if needle.is_empty() || needle.len() > self.reference.len() {
            return Vec::new();
        }
        self.reference
            .windows(needle.len())
            .enumerate()
            .filter(|(_, window)| *window == needle)
            .map(|(offset, _)| offset)
            .collect()
    }

    /// Resolve primers to intervals. Reverse primers are searched as their
    /// reverse complement; the reported span always has the primer's length.
    pub fn locate(&self, primers: &[PrimerRecord]) -> LocateOutcome {
        let mut outcome = LocateOutcome::default();

        for primer in primers {
            let forward = primer.sequence().as_bytes();
            let lookup = match primer.strand() {
                Strand::Forward => forward.to_vec(),
                Strand::Reverse => reverse_complement(forward),
            };

            let offsets = self.find_all(&lookup);
            if offsets.is_empty() {
                log::warn!("Primer {} not found on the reference", primer.name());
                outcome.unmatched.push(primer.name().to_string());
                continue;
            }

            log::debug!(
                "Primer {} ({}) found {} time(s)",
                primer.name(),
                char::from(primer.strand()),
                offsets.len()
            );
            outcome.located.extend(
                offsets
                    .into_iter()
                    .map(|offset| LocatedPrimer::at(primer, offset as GenomicPos)),
            );
        }

        outcome
    }
}
