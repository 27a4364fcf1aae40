//! Local-assumption tracking.

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use prooftree_types::{NodeId, ScopeEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A scope mutation as recorded by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScopeEvent {
    Assumed {
        node_id: NodeId,
        statement: String,
        at: DateTime<Utc>,
    },
    Discharged {
        node_id: NodeId,
        at: DateTime<Utc>,
    },
}

/// Nested local assumptions keyed by the id of the introducing node.
///
/// Reads run concurrently; writes exclude each other and all reads.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    entries: RwLock<BTreeMap<NodeId, ScopeEntry>>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from an ordered event log. Fails on the first event
    /// that violates a scope invariant.
    pub fn replay<I>(events: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = ScopeEvent>,
    {
        let tracker = Self::new();
        let mut applied = 0usize;
        for event in events {
            tracker.apply(event)?;
            applied += 1;
        }
        debug!(events = applied, "scope tracker replayed");
        Ok(tracker)
    }

    pub fn apply(&self, event: ScopeEvent) -> Result<(), EngineError> {
        match event {
            ScopeEvent::Assumed {
                node_id,
                statement,
                at,
            } => self.open_scope_at(node_id, statement, at),
            ScopeEvent::Discharged { node_id, at } => self.close_scope_at(&node_id, at),
        }
    }

    pub fn open_scope(&self, id: NodeId, statement: impl Into<String>) -> Result<(), EngineError> {
        self.open_scope_at(id, statement, Utc::now())
    }

    pub fn open_scope_at(
        &self,
        id: NodeId,
        statement: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let entry = ScopeEntry::new(id, statement, at)?;
        let mut entries = self.write()?;
        if entries.contains_key(&entry.node_id) {
            return Err(EngineError::ScopeAlreadyOpen(entry.node_id));
        }
        debug!(scope = %entry.node_id, "scope opened");
        entries.insert(entry.node_id.clone(), entry);
        Ok(())
    }

    pub fn close_scope(&self, id: &NodeId) -> Result<(), EngineError> {
        self.close_scope_at(id, Utc::now())
    }

    pub fn close_scope_at(&self, id: &NodeId, at: DateTime<Utc>) -> Result<(), EngineError> {
        let mut entries = self.write()?;
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| EngineError::ScopeNotFound(id.clone()))?;
        entry.discharge(at)?;
        debug!(scope = %id, "scope discharged");
        Ok(())
    }

    pub fn entry(&self, id: &NodeId) -> Result<Option<ScopeEntry>, EngineError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Entries that have not been discharged, in id order.
    pub fn active_entries(&self) -> Result<Vec<ScopeEntry>, EngineError> {
        Ok(self
            .read()?
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect())
    }

    /// Active scopes strictly enclosing `id`, outermost first.
    pub fn containing_scopes(&self, id: &NodeId) -> Result<Vec<ScopeEntry>, EngineError> {
        let entries = self.read()?;
        Ok(id
            .ancestors()
            .iter()
            .filter_map(|a| entries.get(a))
            .filter(|e| e.is_active())
            .cloned()
            .collect())
    }

    pub fn scope_depth(&self, id: &NodeId) -> Result<usize, EngineError> {
        Ok(self.containing_scopes(id)?.len())
    }

    /// A scope node is never inside its own scope.
    pub fn is_in_scope(id: &NodeId, scope_id: &NodeId) -> bool {
        scope_id.is_ancestor_of(id)
    }

    pub fn len(&self) -> Result<usize, EngineError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<NodeId, ScopeEntry>>, EngineError> {
        self.entries
            .read()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<NodeId, ScopeEntry>>, EngineError> {
        self.entries
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))
    }
}
