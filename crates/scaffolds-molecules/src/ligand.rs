//! Ligand records and the per-target files they travel through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A molecule retrieved for a target: ChEMBL id plus SMILES structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LigandRecord {
    pub id: String,
    pub structure: String,
}

impl LigandRecord {
    pub fn new(structure: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            structure: structure.to_string(),
        }
    }

    /// Parse a `"structure id"` line. Tokens past the second are ignored.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let structure = tokens.next()?;
        let id = tokens.next()?;
        Some(Self::new(structure, id))
    }
}

/// Renders the line format shared by the raw cache, the strip-it input and the quarantine log.
impl fmt::Display for LigandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.structure, self.id)
    }
}

/// On-disk files for one target, all named after the target inside the workspace directory.
#[derive(Debug, Clone)]
pub struct TargetFiles {
    pub raw: PathBuf,
    pub no_duplicates: PathBuf,
    pub wrong_ligands: PathBuf,
    pub scaffolds: PathBuf,
}

impl TargetFiles {
    pub fn new<P: AsRef<Path>>(workdir: P, target: &str) -> Self {
        let dir = workdir.as_ref();
        Self {
            raw: dir.join(target),
            no_duplicates: dir.join(format!("{}_no_duplicates", target)),
            wrong_ligands: dir.join(format!("{}_wrong_ligands", target)),
            scaffolds: dir.join(format!("{}_scaffolds", target)),
        }
    }
}
