//! In-memory catalog registry with lookup and domain picker search.

use crate::{
    definition::CatalogDomain,
    error::{CatalogError, Result},
    loader::CatalogLoader,
};
use permset_core::SearchQuery;
use std::sync::{Arc, RwLock};
use tracing::info;

/// In-memory, ordered cache of catalog domains.
///
/// Domains keep picker order: ascending `order` key first, then domains
/// without one in load order.
#[derive(Clone)]
pub struct CatalogRegistry {
    domains: Arc<RwLock<Vec<CatalogDomain>>>,
}

impl CatalogRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a registry holding the given domains.
    ///
    /// # Errors
    /// Returns error if any domain fails validation or a name repeats.
    pub fn from_domains(domains: Vec<CatalogDomain>) -> Result<Self> {
        let registry = Self::new();
        for domain in domains {
            if registry.contains(domain.name()) {
                return Err(CatalogError::ValidationError {
                    domain: domain.name().to_string(),
                    reason: "domain defined more than once".to_string(),
                });
            }
            registry.insert(domain)?;
        }
        Ok(registry)
    }

    /// Create a registry and load all definitions from the given loader.
    ///
    /// # Errors
    /// Returns error if loading fails.
    pub fn load_from(loader: &CatalogLoader) -> Result<Self> {
        let registry = Self::new();
        registry.reload(loader)?;
        Ok(registry)
    }

    /// Reload all domains from the loader, replacing the cache.
    ///
    /// When two files define the same domain name, the first path wins and
    /// the other is skipped with a warning.
    ///
    /// # Errors
    /// Returns error if loading fails.
    pub fn reload(&self, loader: &CatalogLoader) -> Result<()> {
        let loaded = loader.load_all()?;

        let mut cache = self
            .domains
            .write()
            .expect("acquire write lock on catalog");

        cache.clear();
        for domain in loaded {
            Self::upsert(&mut cache, domain);
        }

        info!(count = cache.len(), "reloaded permission catalog");

        Ok(())
    }

    /// Get a domain by name.
    ///
    /// # Errors
    /// Returns error if the domain is not in the catalog.
    pub fn get(&self, name: &str) -> Result<CatalogDomain> {
        let cache = self.domains.read().expect("acquire read lock on catalog");

        cache
            .iter()
            .find(|domain| domain.name() == name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                domain: name.to_string(),
            })
    }

    /// Get all domains in picker order.
    #[must_use]
    pub fn domains(&self) -> Vec<CatalogDomain> {
        let cache = self.domains.read().expect("acquire read lock on catalog");
        cache.clone()
    }

    /// Get all domain names in picker order.
    #[must_use]
    pub fn domain_names(&self) -> Vec<String> {
        let cache = self.domains.read().expect("acquire read lock on catalog");
        cache.iter().map(|d| d.name().to_string()).collect()
    }

    /// Domains shown by the domain picker for a raw search string.
    ///
    /// An empty result is the picker's "no results found" state.
    #[must_use]
    pub fn search(&self, raw_query: &str) -> Vec<CatalogDomain> {
        let query = SearchQuery::new(raw_query);
        let cache = self.domains.read().expect("acquire read lock on catalog");

        cache
            .iter()
            .filter(|domain| domain.matches(&query))
            .cloned()
            .collect()
    }

    /// Get the number of domains in the registry.
    #[must_use]
    pub fn count(&self) -> usize {
        let cache = self.domains.read().expect("acquire read lock on catalog");
        cache.len()
    }

    /// Check if a domain exists in the registry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let cache = self.domains.read().expect("acquire read lock on catalog");
        cache.iter().any(|domain| domain.name() == name)
    }

    /// Add or replace a domain definition.
    ///
    /// # Errors
    /// Returns error if the definition fails validation.
    pub fn insert(&self, domain: CatalogDomain) -> Result<()> {
        domain.validate()?;

        let mut cache = self
            .domains
            .write()
            .expect("acquire write lock on catalog");
        Self::upsert(&mut cache, domain);

        Ok(())
    }

    fn upsert(cache: &mut Vec<CatalogDomain>, domain: CatalogDomain) {
        if let Some(existing) = cache.iter_mut().find(|d| d.name() == domain.name()) {
            *existing = domain;
        } else {
            cache.push(domain);
        }
        // Stable: ties keep insertion order
        cache.sort_by_key(|d| d.domain.order.unwrap_or(u32::MAX));
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
