use crate::error::TypesError;
use crate::id::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A local assumption introduced by a `local_assume` node.
///
/// The entry is active until discharged. Discharge happens at most once and
/// never before the introduction time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub node_id: NodeId,
    pub statement: String,
    pub introduced_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharged_at: Option<DateTime<Utc>>,
}

impl ScopeEntry {
    pub fn new(
        node_id: NodeId,
        statement: impl Into<String>,
        introduced_at: DateTime<Utc>,
    ) -> Result<Self, TypesError> {
        let statement = statement.into();
        if node_id.is_zero() {
            return Err(TypesError::invalid_id("", "scope entry id must not be zero"));
        }
        if statement.trim().is_empty() {
            return Err(TypesError::InvalidInput(format!(
                "scope entry {} has a blank statement",
                node_id
            )));
        }
        Ok(Self {
            node_id,
            statement,
            introduced_at,
            discharged_at: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.discharged_at.is_none()
    }

    pub fn discharge(&mut self, at: DateTime<Utc>) -> Result<(), TypesError> {
        if self.discharged_at.is_some() {
            return Err(TypesError::AlreadyDischarged(self.node_id.to_string()));
        }
        if at < self.introduced_at {
            return Err(TypesError::InvalidInput(format!(
                "scope {} discharged at {} before it was introduced at {}",
                self.node_id, at, self.introduced_at
            )));
        }
        self.discharged_at = Some(at);
        Ok(())
    }
}
