//! Scaffolds Molecules - ligand retrieval and scaffold grouping pipeline.
//!
//! 1. Fetching IC50 ligands for a human target from ChEMBL
//! 2. Removing duplicates and ordering ligands by id
//! 3. Running strip-it, quarantining ligands it cannot process
//! 4. Merging ligands that share a scaffold
//! 5. Rendering the ranked groups as text

pub mod ligand;
pub mod mode;
pub mod chembl;
pub mod acquire;
pub mod canonical;
pub mod stripit;
pub mod repair;
pub mod grouping;
pub mod report;
pub mod pipeline;

pub use ligand::{LigandRecord, TargetFiles};
pub use mode::ScaffoldMode;
pub use scaffolds_common::error::{Result, ScaffoldError};
