//! Decomposition driver with quarantine-based repair.
//!
//! strip-it aborts the whole batch on the first molecule it cannot handle, but
//! leaves the rows it already wrote in the output table. The driver treats the
//! record right after the last written row as the culprit, moves it to the
//! quarantine log and resubmits the shrunk list. This assumes exactly one bad
//! record per failure and that the tool processes input in order; it does not
//! diagnose anything beyond that.
//!
//! Only a record with a predecessor in the table can be blamed, so at most
//! `len - 1` records are quarantined and the loop runs at most `max(len, 1)`
//! submissions.

use scaffolds_common::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::ligand::{LigandRecord, TargetFiles};
use crate::stripit::{Decomposer, ToolStatus};

/// Suffix strip-it may append to molecule names in its output.
pub const LIGAND_SUFFIX: &str = "_ligand";

pub fn strip_ligand_suffix(id: &str) -> &str {
    id.strip_suffix(LIGAND_SUFFIX).unwrap_or(id)
}

/// Final state of the repair loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompositionOutcome {
    /// strip-it succeeded; the table covers every surviving record.
    Complete { table: PathBuf },
    /// strip-it failed with nothing left to blame. Whatever partial table it wrote is kept.
    Exhausted { table: Option<PathBuf> },
}

impl DecompositionOutcome {
    pub fn table(&self) -> Option<&Path> {
        match self {
            DecompositionOutcome::Complete { table } => Some(table),
            DecompositionOutcome::Exhausted { table } => table.as_deref(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, DecompositionOutcome::Exhausted { .. })
    }
}

/// Summary of one repair run.
#[derive(Debug, Clone)]
pub struct RepairReport {
    pub outcome: DecompositionOutcome,
    pub submissions: usize,
    /// Working list as last submitted.
    pub remaining: Vec<LigandRecord>,
    /// Records moved to the quarantine log, in removal order.
    pub quarantined: Vec<LigandRecord>,
}

/// Id on the last data row of a (partial) scaffold table, header excluded.
pub fn last_good_id(table: &str) -> Option<String> {
    table
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .last()
        .and_then(|l| l.split_whitespace().next())
        .map(|id| strip_ligand_suffix(id).to_string())
}

/// Index of the record following `last_good`, if there is one.
pub fn blame_next(records: &[LigandRecord], last_good: &str) -> Option<usize> {
    let pos = records.iter().position(|r| r.id == last_good)?;
    let next = pos + 1;
    (next < records.len()).then_some(next)
}

pub struct RepairDriver<'a> {
    decomposer: &'a dyn Decomposer,
    files: &'a TargetFiles,
}

impl<'a> RepairDriver<'a> {
    pub fn new(decomposer: &'a dyn Decomposer, files: &'a TargetFiles) -> Self {
        Self { decomposer, files }
    }

    /// Submit `records` until strip-it succeeds or no record can be blamed.
    pub async fn decompose_with_repair(&self, mut records: Vec<LigandRecord>) -> Result<RepairReport> {
        let input = &self.files.no_duplicates;
        let output = &self.files.scaffolds;
        let mut quarantined = Vec::new();
        let mut submissions = 0;

        let outcome = loop {
            submissions += 1;
            write_records(input, &records).await?;

            match self.decomposer.decompose(input, output).await? {
                ToolStatus::Success => break DecompositionOutcome::Complete { table: output.clone() },
                ToolStatus::Failed { code, .. } => {
                    warn!(code = ?code, "strip-it error occurred, trying to fix database...");
                    let partial = read_if_exists(output).await?;
                    let blamed = partial
                        .as_deref()
                        .and_then(last_good_id)
                        .and_then(|id| blame_next(&records, &id));

                    let Some(index) = blamed else {
                        warn!("No further ligand to blame; keeping partial output");
                        let table = partial.map(|_| output.clone());
                        break DecompositionOutcome::Exhausted { table };
                    };

                    let wrong = records.remove(index);
                    append_quarantine(&self.files.wrong_ligands, &wrong).await?;
                    info!(
                        "Removed wrong ligand {}, saved to {:?}",
                        wrong.id, self.files.wrong_ligands
                    );
                    quarantined.push(wrong);

                    remove_if_exists(output).await?;
                }
            }
        };

        info!(
            submitted = records.len() + quarantined.len(),
            quarantined = quarantined.len(),
            submissions,
            exhausted = outcome.is_exhausted(),
            "Decomposition finished"
        );

        Ok(RepairReport { outcome, submissions, remaining: records, quarantined })
    }
}

async fn write_records(path: &Path, records: &[LigandRecord]) -> Result<()> {
    let content = records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, content).await?;
    Ok(())
}

async fn append_quarantine(path: &Path, record: &LigandRecord) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(format!("{}\n", record).as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

async fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}
