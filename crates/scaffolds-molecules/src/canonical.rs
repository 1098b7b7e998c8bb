//! Deduplication and canonical ordering of raw ligand lines.

use scaffolds_common::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};

use crate::ligand::LigandRecord;

/// Working record list plus the raw lines that could not be parsed.
#[derive(Debug, Default)]
pub struct Canonicalized {
    /// Unique ids, sorted ascending.
    pub records: Vec<LigandRecord>,
    pub malformed: Vec<String>,
}

/// Canonicalize raw `"structure id"` lines.
///
/// Exact duplicate lines collapse first. The survivors are then assigned into an
/// id → structure map in (id, structure) order, so when two lines share an id the
/// lexicographically greater structure wins on every run.
pub fn canonicalize_lines(raw: &str) -> Canonicalized {
    let unique: BTreeSet<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut malformed = Vec::new();
    let mut parsed: Vec<LigandRecord> = Vec::with_capacity(unique.len());
    for line in unique {
        match LigandRecord::parse_line(line) {
            Some(rec) => parsed.push(rec),
            None => malformed.push(line.to_string()),
        }
    }
    parsed.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.structure.cmp(&b.structure)));

    let mut by_id: BTreeMap<String, String> = BTreeMap::new();
    for rec in parsed {
        by_id.insert(rec.id, rec.structure);
    }

    Canonicalized {
        records: by_id
            .into_iter()
            .map(|(id, structure)| LigandRecord { id, structure })
            .collect(),
        malformed,
    }
}

/// Read the raw cache file and build the working record list.
pub async fn canonicalize(raw_path: &Path) -> Result<Vec<LigandRecord>> {
    info!("Removing duplicates from file: {:?}", raw_path);
    let raw = tokio::fs::read_to_string(raw_path).await?;
    let canonical = canonicalize_lines(&raw);

    for line in &canonical.malformed {
        warn!(line = %line, "Dropping malformed ligand line (expected 'structure id')");
    }
    if !canonical.malformed.is_empty() {
        warn!("{} malformed line(s) dropped from {:?}", canonical.malformed.len(), raw_path);
    }
    info!("{} unique ligands", canonical.records.len());

    Ok(canonical.records)
}
