//! Geometry source and name-fallback resolution
//!
//! A [`GeometrySource`] answers one name query with zero or more coordinate
//! rings. [`SourceResolver`] walks an ordered list of alternate spellings,
//! bounds every attempt with a timeout and spaces consecutive calls by a
//! minimum delay. Unresolved names come back as
//! [`SourceError::Unavailable`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use zonekit_core::{Result, Ring, SourceError, DEFAULT_PRECISION};
use zonekit_geometry::round_ring;

/// External collaborator that resolves a name to coordinate rings
#[async_trait]
pub trait GeometrySource: Send + Sync {
    /// Query a single spelling. An empty result means "not found".
    async fn query(&self, name: &str) -> std::result::Result<Vec<Ring>, SourceError>;
}

/// One spelling substitution: names ending in `suffix` are retried with each
/// replacement in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacements: Vec<String>,
}

impl SuffixRule {
    pub fn new(suffix: impl Into<String>, replacements: &[&str]) -> Self {
        Self {
            suffix: suffix.into(),
            replacements: replacements.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// The reservoir / lake spelling variants used by the provincial registers
pub fn default_suffix_rules() -> Vec<SuffixRule> {
    vec![
        SuffixRule::new("저수지", &["", "호"]),
        SuffixRule::new("호수", &["저수지", ""]),
    ]
}

/// Builds the ordered fallback list for a record name
#[derive(Debug, Clone, Default)]
pub struct NameCandidates {
    rules: Vec<SuffixRule>,
}

impl NameCandidates {
    pub fn new(rules: Vec<SuffixRule>) -> Self {
        Self { rules }
    }

    /// Original name, name without a parenthesised suffix, then every suffix
    /// substitution of the stripped name. Empty and repeated entries are
    /// dropped; order is preserved.
    pub fn build(&self, name: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        let mut push = |candidate: String| {
            let candidate = candidate.trim().to_string();
            if !candidate.is_empty() && !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };

        push(name.to_string());
        let base = name.split('(').next().unwrap_or(name).trim().to_string();
        push(base.clone());

        for rule in &self.rules {
            if let Some(stem) = base.strip_suffix(rule.suffix.as_str()) {
                for replacement in &rule.replacements {
                    push(format!("{stem}{replacement}"));
                }
            }
        }
        candidates
    }
}

/// Walks name candidates against a [`GeometrySource`]
pub struct SourceResolver<S: GeometrySource> {
    source: S,
    timeout: Duration,
    min_delay: Duration,
    precision: u32,
    last_call: Option<Instant>,
}

impl<S: GeometrySource> SourceResolver<S> {
    pub fn new(source: S, timeout: Duration, min_delay: Duration) -> Self {
        Self {
            source,
            timeout,
            min_delay,
            precision: DEFAULT_PRECISION,
            last_call: None,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn pace(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        self.last_call = Some(Instant::now());
    }

    /// Try each candidate in order until one yields a non-empty result.
    ///
    /// Returned rings are rounded to the resolver's precision.
    pub async fn resolve(&mut self, candidates: &[String]) -> Result<Vec<Ring>> {
        for candidate in candidates {
            self.pace().await;
            match tokio::time::timeout(self.timeout, self.source.query(candidate)).await {
                Ok(Ok(rings)) if !rings.is_empty() => {
                    tracing::debug!("Resolved '{}' ({} rings)", candidate, rings.len());
                    return Ok(rings
                        .iter()
                        .map(|ring| round_ring(ring, self.precision))
                        .collect());
                }
                Ok(Ok(_)) => tracing::debug!("No geometry for '{}'", candidate),
                Ok(Err(e)) => tracing::warn!("{}", e),
                Err(_) => tracing::warn!(
                    "{}",
                    SourceError::Timeout {
                        candidate: candidate.clone(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                ),
            }
        }
        Err(SourceError::Unavailable {
            candidates: candidates.to_vec(),
        }
        .into())
    }
}

/// In-memory source keyed by exact name
#[derive(Debug, Clone, Default)]
pub struct StaticGeometrySource {
    entries: HashMap<String, Vec<Ring>>,
}

impl StaticGeometrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, rings: Vec<Ring>) -> Self {
        self.entries.insert(name.into(), rings);
        self
    }

    /// Load a fixture file: a JSON object of `name -> [ring, ...]`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, Vec<Ring>> = serde_json::from_str(&content)?;
        tracing::info!("Loaded {} fixture geometries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl GeometrySource for StaticGeometrySource {
    async fn query(&self, name: &str) -> std::result::Result<Vec<Ring>, SourceError> {
        Ok(self.entries.get(name).cloned().unwrap_or_default())
    }
}
