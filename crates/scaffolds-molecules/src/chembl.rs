//! ChEMBL API client.
//!
//! Resolves a free-text protein name to a single human target and pulls the
//! structures of molecules with IC50 activities recorded against it.
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data

use async_trait::async_trait;
use scaffolds_common::error::{Result, ScaffoldError};
use scaffolds_common::sandbox::SandboxClient as Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::ligand::LigandRecord;

pub const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Source of (structure, id) pairs for a named target.
#[async_trait]
pub trait LigandSource: Send + Sync {
    async fn fetch_ligands(&self, target_name: &str) -> Result<Vec<LigandRecord>>;
}

/// Query settings for the ChEMBL client.
#[derive(Debug, Clone)]
pub struct ChemblSettings {
    pub base_url: String,
    pub organism: String,
    pub standard_type: String,
    pub activity_limit: usize,
    pub timeout: Duration,
}

impl Default for ChemblSettings {
    fn default() -> Self {
        Self {
            base_url: CHEMBL_API_URL.to_string(),
            organism: "Homo sapiens".to_string(),
            standard_type: "IC50".to_string(),
            activity_limit: 100,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    total_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TargetPage {
    page_meta: Option<PageMeta>,
    #[serde(default)]
    targets: Vec<TargetHit>,
}

#[derive(Debug, Deserialize)]
struct TargetHit {
    target_chembl_id: String,
}

#[derive(Debug, Deserialize)]
struct ActivityPage {
    #[serde(default)]
    activities: Vec<ActivityHit>,
}

#[derive(Debug, Deserialize)]
struct ActivityHit {
    canonical_smiles: Option<String>,
    molecule_chembl_id: Option<String>,
}

/// Picks the single target id out of a target search page.
///
/// The match count comes from `page_meta.total_count` when present, since the
/// page itself is truncated to the API's page size.
pub fn resolve_single_target(target_name: &str, body: serde_json::Value) -> Result<String> {
    let page: TargetPage = serde_json::from_value(body)?;
    let count = page
        .page_meta
        .and_then(|m| m.total_count)
        .unwrap_or(page.targets.len());

    match count {
        0 => Err(ScaffoldError::TargetNotFound(target_name.to_string())),
        1 => page
            .targets
            .into_iter()
            .next()
            .map(|t| t.target_chembl_id)
            .ok_or_else(|| ScaffoldError::TargetNotFound(target_name.to_string())),
        n => Err(ScaffoldError::AmbiguousTarget { name: target_name.to_string(), count: n }),
    }
}

/// Extracts ligand records from an activity page, skipping rows without a structure.
pub fn parse_activities(body: serde_json::Value) -> Result<Vec<LigandRecord>> {
    let page: ActivityPage = serde_json::from_value(body)?;
    let mut ligands = Vec::with_capacity(page.activities.len());
    for activity in page.activities {
        match (activity.canonical_smiles, activity.molecule_chembl_id) {
            (Some(smiles), Some(id)) => ligands.push(LigandRecord { id, structure: smiles }),
            (_, id) => debug!(molecule = ?id, "Skipping activity without structure"),
        }
    }
    Ok(ligands)
}

/// ChEMBL client for target resolution and activity retrieval.
pub struct ChemblClient {
    client: Client,
    settings: ChemblSettings,
}

impl ChemblClient {
    pub fn new(settings: ChemblSettings) -> Result<Self> {
        let mut client = Client::new(settings.timeout)?;
        client.allow_url_host(&settings.base_url)?;
        Ok(Self { client, settings })
    }

    /// Search targets by synonym, restricted to the configured organism.
    #[instrument(skip(self))]
    pub async fn search_target(&self, target_name: &str) -> Result<String> {
        let url = format!("{}/target.json", self.settings.base_url);

        debug!(target = target_name, organism = %self.settings.organism, "Searching ChEMBL targets");

        let json: serde_json::Value = self.client
            .get(&url)?
            .query(&[
                ("target_synonym__icontains", target_name),
                ("organism", self.settings.organism.as_str()),
                ("only", "target_chembl_id"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resolve_single_target(target_name, json)
    }

    /// Fetch activities of the configured standard type for a target.
    #[instrument(skip(self))]
    pub async fn fetch_activities(&self, target_chembl_id: &str) -> Result<Vec<LigandRecord>> {
        let url = format!("{}/activity.json", self.settings.base_url);
        let limit_str = self.settings.activity_limit.to_string();

        debug!(
            target = target_chembl_id,
            standard_type = %self.settings.standard_type,
            limit = self.settings.activity_limit,
            "Fetching target activities"
        );

        let json: serde_json::Value = self.client
            .get(&url)?
            .query(&[
                ("target_chembl_id", target_chembl_id),
                ("standard_type", self.settings.standard_type.as_str()),
                ("limit", limit_str.as_str()),
                ("only", "canonical_smiles,molecule_chembl_id"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_activities(json)
    }
}

#[async_trait]
impl LigandSource for ChemblClient {
    async fn fetch_ligands(&self, target_name: &str) -> Result<Vec<LigandRecord>> {
        let target_id = self.search_target(target_name).await?;
        info!("Resolved '{}' to ChEMBL target {}", target_name, target_id);
        self.fetch_activities(&target_id).await
    }
}
