// ─────────────────────────────────────────────────────────────────────
// SCPN Phantom Geometry — Phantom Record Store
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Persistence boundary for phantom records.
//!
//! The geometry only needs "fetch or create a phantom by UID" and "list its
//! container labels". Database backends implement [`PhantomStore`];
//! [`InMemoryStore`] serves tests and offline sessions.

use std::collections::HashMap;

use phantom_types::error::{PhantomError, PhantomResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One filled container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSample {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_material: Option<String>,
}

/// Stored phantom: UID plus its samples in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhantomRecord {
    pub phantom_uid: String,
    pub containers: Vec<MaterialSample>,
}

impl PhantomRecord {
    pub fn labels(&self) -> Vec<String> {
        self.containers.iter().map(|c| c.label.clone()).collect()
    }
}

pub trait PhantomStore {
    fn fetch(&self, uid: &str) -> PhantomResult<Option<PhantomRecord>>;

    /// Create a record; fails if `uid` already exists.
    fn create(&mut self, uid: &str, labels: &[String]) -> PhantomResult<PhantomRecord>;

    /// Existing record, or a new one built from `labels`.
    fn fetch_or_create(
        &mut self,
        uid: &str,
        labels: Option<&[String]>,
    ) -> PhantomResult<PhantomRecord> {
        if let Some(record) = self.fetch(uid)? {
            return Ok(record);
        }
        match labels {
            Some(labels) => self.create(uid, labels),
            None => Err(PhantomError::RecordNotFound(format!(
                "{uid} (no container labels supplied to create it)"
            ))),
        }
    }

    fn container_labels(&self, uid: &str) -> PhantomResult<Vec<String>> {
        self.fetch(uid)?
            .map(|r| r.labels())
            .ok_or_else(|| PhantomError::RecordNotFound(uid.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    records: HashMap<String, PhantomRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of all records.
    pub fn to_json(&self) -> PhantomResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PhantomResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PhantomStore for InMemoryStore {
    fn fetch(&self, uid: &str) -> PhantomResult<Option<PhantomRecord>> {
        Ok(self.records.get(uid).cloned())
    }

    fn create(&mut self, uid: &str, labels: &[String]) -> PhantomResult<PhantomRecord> {
        if uid.trim().is_empty() {
            return Err(PhantomError::ConfigError(
                "phantom_uid must not be empty".to_string(),
            ));
        }
        if self.records.contains_key(uid) {
            return Err(PhantomError::ConfigError(format!(
                "phantom record {uid} already exists"
            )));
        }
        let record = PhantomRecord {
            phantom_uid: uid.to_string(),
            containers: labels
                .iter()
                .map(|label| MaterialSample {
                    label: label.clone(),
                    base_material: None,
                })
                .collect(),
        };
        info!(uid, containers = labels.len(), "created phantom record");
        self.records.insert(uid.to_string(), record.clone());
        Ok(record)
    }
}
