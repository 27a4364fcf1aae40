use crate::error::TypesError;
use crate::id::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aspect of a node that a verifier disputes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeTarget {
    Statement,
    Inference,
    Context,
    Dependencies,
    Scope,
    Gap,
    TypeError,
    Domain,
    Completeness,
}

impl ChallengeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statement => "statement",
            Self::Inference => "inference",
            Self::Context => "context",
            Self::Dependencies => "dependencies",
            Self::Scope => "scope",
            Self::Gap => "gap",
            Self::TypeError => "type_error",
            Self::Domain => "domain",
            Self::Completeness => "completeness",
        }
    }
}

impl fmt::Display for ChallengeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    #[default]
    Open,
    Resolved,
    Withdrawn,
    Superseded,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Withdrawn => "withdrawn",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verifier-raised dispute against one aspect of a node.
///
/// Only an open challenge can be closed, and closing is final.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub target_id: NodeId,
    pub target: ChallengeTarget,
    pub reason: String,
    pub raised: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    pub status: ChallengeStatus,
}

impl Challenge {
    pub fn new(
        id: impl Into<String>,
        target_id: NodeId,
        target: ChallengeTarget,
        reason: impl Into<String>,
        raised: DateTime<Utc>,
    ) -> Result<Self, TypesError> {
        let id = id.into();
        let reason = reason.into();
        if id.trim().is_empty() {
            return Err(TypesError::InvalidInput("challenge id is blank".into()));
        }
        if target_id.is_zero() {
            return Err(TypesError::invalid_id("", format!("challenge {} targets the zero id", id)));
        }
        if reason.trim().is_empty() {
            return Err(TypesError::InvalidInput(format!("challenge {} has a blank reason", id)));
        }
        Ok(Self {
            id,
            target_id,
            target,
            reason,
            raised,
            resolved_at: None,
            resolution: None,
            status: ChallengeStatus::Open,
        })
    }

    /// Raise a challenge now with a generated id.
    pub fn raise(
        target_id: NodeId,
        target: ChallengeTarget,
        reason: impl Into<String>,
    ) -> Result<Self, TypesError> {
        let id = format!("ch-{}", uuid::Uuid::new_v4().simple());
        Self::new(id, target_id, target, reason, Utc::now())
    }

    pub fn is_open(&self) -> bool {
        self.status == ChallengeStatus::Open
    }

    /// An open challenge blocks validation of its target.
    pub fn is_blocking(&self) -> bool {
        self.is_open()
    }

    pub fn resolve(&mut self, resolution: impl Into<String>, at: DateTime<Utc>) -> Result<(), TypesError> {
        let resolution = resolution.into();
        if resolution.trim().is_empty() {
            return Err(TypesError::InvalidInput(format!("challenge {} resolution is blank", self.id)));
        }
        self.close(ChallengeStatus::Resolved, Some(resolution), at)
    }

    pub fn withdraw(&mut self, at: DateTime<Utc>) -> Result<(), TypesError> {
        self.close(ChallengeStatus::Withdrawn, None, at)
    }

    pub fn supersede(&mut self, at: DateTime<Utc>) -> Result<(), TypesError> {
        self.close(ChallengeStatus::Superseded, None, at)
    }

    fn close(
        &mut self,
        to: ChallengeStatus,
        resolution: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TypesError> {
        if !self.is_open() {
            return Err(TypesError::InvalidTransition {
                what: "challenge",
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        if at < self.raised {
            return Err(TypesError::InvalidInput(format!(
                "challenge {} closed at {} before it was raised at {}",
                self.id, at, self.raised
            )));
        }
        self.status = to;
        self.resolution = resolution;
        self.resolved_at = Some(at);
        Ok(())
    }
}
