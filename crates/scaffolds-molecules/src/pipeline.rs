//! Orchestrator for the scaffold pipeline.

use scaffolds_common::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::acquire::acquire;
use crate::canonical::canonicalize;
use crate::chembl::LigandSource;
use crate::grouping::{group_by_scaffold, ScaffoldGroups};
use crate::ligand::TargetFiles;
use crate::mode::ScaffoldMode;
use crate::repair::{RepairDriver, RepairReport};
use crate::stripit::Decomposer;

/// Everything a run produced.
#[derive(Debug)]
pub struct PipelineResult {
    pub files: TargetFiles,
    pub groups: ScaffoldGroups,
    /// `None` when an existing scaffold table was reused.
    pub repair: Option<RepairReport>,
}

impl PipelineResult {
    pub fn is_exhausted(&self) -> bool {
        self.repair.as_ref().is_some_and(|r| r.outcome.is_exhausted())
    }
}

pub struct ScaffoldPipeline {
    source: Box<dyn LigandSource>,
    decomposer: Box<dyn Decomposer>,
    workdir: PathBuf,
}

impl ScaffoldPipeline {
    pub fn new<P: AsRef<Path>>(
        source: Box<dyn LigandSource>,
        decomposer: Box<dyn Decomposer>,
        workdir: P,
    ) -> Self {
        Self {
            source,
            decomposer,
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Acquire, canonicalize, decompose with repair, then group by `mode`.
    ///
    /// An existing `<target>_scaffolds` table skips canonicalization and decomposition.
    pub async fn run(&self, target: &str, mode: ScaffoldMode) -> Result<PipelineResult> {
        info!("Running scaffold pipeline for target {}", target);
        tokio::fs::create_dir_all(&self.workdir).await?;
        let files = TargetFiles::new(&self.workdir, target);

        acquire(self.source.as_ref(), target, &files.raw).await?;

        let repair = if tokio::fs::try_exists(&files.scaffolds).await? {
            info!("Scaffold table found in cache: {:?}", files.scaffolds);
            None
        } else {
            let records = canonicalize(&files.raw).await?;
            info!("Performing strip-it on inhibitors to file: {:?}", files.scaffolds);
            let report = RepairDriver::new(self.decomposer.as_ref(), &files)
                .decompose_with_repair(records)
                .await?;
            Some(report)
        };

        let table = match &repair {
            Some(report) => report.outcome.table(),
            None => Some(files.scaffolds.as_path()),
        };
        let groups = group_by_scaffold(table, mode).await?;

        Ok(PipelineResult { files, groups, repair })
    }
}
