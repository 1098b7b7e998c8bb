//! Cache-first ligand acquisition.

use scaffolds_common::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::chembl::LigandSource;

/// Ensure the raw ligand file for `target_name` exists at `raw_path`.
///
/// An existing file is returned untouched without contacting the source.
pub async fn acquire(source: &dyn LigandSource, target_name: &str, raw_path: &Path) -> Result<PathBuf> {
    if fs::try_exists(raw_path).await? {
        debug!("Ligands for {} found in cache: {:?}", target_name, raw_path);
        return Ok(raw_path.to_path_buf());
    }

    info!("Downloading inhibitors from ChEMBL...");
    let ligands = source.fetch_ligands(target_name).await?;
    info!("Fetched {} activity records", ligands.len());

    info!("Writing inhibitors to {:?}", raw_path);
    let mut content = String::new();
    for ligand in &ligands {
        content.push_str(&ligand.to_string());
        content.push('\n');
    }
    if let Some(parent) = raw_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(raw_path, content).await?;

    Ok(raw_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ligand::LigandRecord;
    use async_trait::async_trait;
    use scaffolds_common::error::ScaffoldError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct CountingSource {
        calls: AtomicUsize,
        ligands: Vec<LigandRecord>,
    }

    #[async_trait]
    impl LigandSource for CountingSource {
        async fn fetch_ligands(&self, _target_name: &str) -> Result<Vec<LigandRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ligands.clone())
        }
    }

    struct MissingSource;

    #[async_trait]
    impl LigandSource for MissingSource {
        async fn fetch_ligands(&self, target_name: &str) -> Result<Vec<LigandRecord>> {
            Err(ScaffoldError::TargetNotFound(target_name.to_string()))
        }
    }

    #[tokio::test]
    async fn test_writes_one_pair_per_line() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("thrombin");
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            ligands: vec![LigandRecord::new("CCO", "ID1"), LigandRecord::new("CCC", "ID2")],
        };

        let path = acquire(&source, "thrombin", &raw).await.unwrap();
        assert_eq!(path, raw);
        assert_eq!(std::fs::read_to_string(&raw).unwrap(), "CCO ID1\nCCC ID2\n");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_cache_skips_source() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("thrombin");
        std::fs::write(&raw, "CCO ID1\n").unwrap();
        let source = CountingSource { calls: AtomicUsize::new(0), ligands: vec![] };

        acquire(&source, "thrombin", &raw).await.unwrap();
        acquire(&source, "thrombin", &raw).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read_to_string(&raw).unwrap(), "CCO ID1\n");
    }

    #[tokio::test]
    async fn test_target_errors_leave_no_file() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("unknown");

        let err = acquire(&MissingSource, "unknown", &raw).await.unwrap_err();
        assert!(err.is_target_error());
        assert!(!raw.exists());
    }
}
