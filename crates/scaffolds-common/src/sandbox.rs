use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::ScaffoldError;

/// Default ChEMBL host; every other domain must be allowed explicitly.
pub const CHEMBL_HOST: &str = "www.ebi.ac.uk";

/// An HTTP client capped to an allowlist of approved domains.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client that can only reach the ChEMBL web services.
    pub fn new(timeout: Duration) -> Result<Self, ScaffoldError> {
        let mut allowlist = HashSet::new();
        allowlist.insert(CHEMBL_HOST.to_string());

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("scaffolds/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScaffoldError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Allows the host of `base_url`, e.g. a ChEMBL mirror from the config file.
    pub fn allow_url_host(&mut self, base_url: &str) -> Result<(), ScaffoldError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ScaffoldError::Config(format!("Invalid URL {}: {}", base_url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ScaffoldError::Config(format!("URL has no host: {}", base_url)))?;
        self.allow_domain(host);
        Ok(())
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// GET request builder, refused for hosts outside the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ScaffoldError> {
        if !self.is_allowed(url) {
            return Err(ScaffoldError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
