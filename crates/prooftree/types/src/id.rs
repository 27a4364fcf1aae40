use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Hierarchical address of a proof node, e.g. `1.2.3`.
///
/// Every component is a positive integer and the first component is always
/// `1`: the whole tree shares a single root. The empty sequence is the
/// zero (uninitialized) id. It has depth 0, is never a root, and is neither
/// an ancestor nor a descendant of anything.
///
/// Ordering is lexicographic over the numeric components, so `1.2` sorts
/// before `1.2.1`, and `1.2.1` before `1.10`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeId(Vec<u32>);

impl NodeId {
    /// The root id `1`.
    pub fn root() -> Self {
        Self(vec![1])
    }

    /// The zero id (no components).
    pub fn zero() -> Self {
        Self(Vec::new())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Number of components; 0 for the zero id.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Build an id from raw components, checking the same rules as [`NodeId::parse`].
    pub fn from_components(components: Vec<u32>) -> Result<Self, TypesError> {
        let id = Self(components);
        if id.is_zero() {
            return Ok(id);
        }
        if id.0[0] != 1 {
            return Err(TypesError::invalid_id(&id.to_string(), "root component must be 1"));
        }
        if id.0.contains(&0) {
            return Err(TypesError::invalid_id(&id.to_string(), "components must be positive"));
        }
        Ok(id)
    }

    /// Parse a dotted id. Blank input is an error.
    pub fn parse(input: &str) -> Result<Self, TypesError> {
        if input.trim().is_empty() {
            return Err(TypesError::invalid_id(input, "id is blank"));
        }
        let mut components = Vec::new();
        for part in input.split('.') {
            if part.is_empty() {
                return Err(TypesError::invalid_id(input, "empty component"));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TypesError::invalid_id(input, format!("component {:?} is not a positive integer", part)));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(TypesError::invalid_id(input, format!("component {:?} has a leading zero", part)));
            }
            let value: u32 = part
                .parse()
                .map_err(|_| TypesError::invalid_id(input, format!("component {:?} is out of range", part)))?;
            if value == 0 {
                return Err(TypesError::invalid_id(input, "components must be positive"));
            }
            components.push(value);
        }
        if components[0] != 1 {
            return Err(TypesError::invalid_id(input, "root component must be 1"));
        }
        Ok(Self(components))
    }

    /// Parse an id read back from persisted state, where the empty string
    /// encodes the zero id.
    pub fn parse_persisted(input: &str) -> Result<Self, TypesError> {
        if input.is_empty() {
            return Ok(Self::zero());
        }
        Self::parse(input)
    }

    /// The `n`th child of this id (1-based).
    pub fn child(&self, n: u32) -> Result<Self, TypesError> {
        if self.is_zero() {
            return Err(TypesError::invalid_id("", "the zero id has no children"));
        }
        if n == 0 {
            return Err(TypesError::invalid_id(&format!("{}.0", self), "child index must be positive"));
        }
        let mut components = self.0.clone();
        components.push(n);
        Ok(Self(components))
    }

    /// Parent id, or `None` for the root and for the zero id.
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// All strict ancestors, root first.
    pub fn ancestors(&self) -> Vec<Self> {
        (1..self.0.len()).map(|len| Self(self.0[..len].to_vec())).collect()
    }

    /// True iff `self` is a strict prefix of `other`.
    ///
    /// The zero id is an ancestor of nothing and has no ancestors.
    pub fn is_ancestor_of(&self, other: &NodeId) -> bool {
        !self.is_zero() && self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Deepest id that is equal to or an ancestor of both ids. Zero when either
    /// side is zero.
    pub fn common_ancestor(&self, other: &NodeId) -> NodeId {
        let shared = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        Self(self.0[..shared].to_vec())
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}

impl FromStr for NodeId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NodeId::parse_persisted(&s).map_err(serde::de::Error::custom)
    }
}
