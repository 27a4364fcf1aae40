//! Context-reference resolution.
//!
//! A context reference names a definition, an assumption or an external
//! result. A reference may state its kind with a `def:`, `assume:` or `ext:`
//! prefix; otherwise its kind is whatever the lookup resolves it to. When an
//! unprefixed reference does not resolve, its kind is inferred from the
//! references around it, assuming the list is laid out as definitions, then
//! assumptions, then externals.

use crate::error::EngineError;
use crate::lookup::ContextLookup;
use prooftree_types::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Definition,
    Assumption,
    External,
}

impl ReferenceKind {
    const ALL: [ReferenceKind; 3] = [Self::Definition, Self::Assumption, Self::External];

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Definition => "def:",
            Self::Assumption => "assume:",
            Self::External => "ext:",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Assumption => "assumption",
            Self::External => "external",
        }
    }

    fn resolves<L: ContextLookup + ?Sized>(&self, lookup: &L, name: &str) -> bool {
        match self {
            Self::Definition => lookup.has_definition(name),
            Self::Assumption => lookup.has_assumption(name),
            Self::External => lookup.has_external(name),
        }
    }

    fn missing(&self, node: &NodeId, reference: &str) -> EngineError {
        let node = node.clone();
        let reference = reference.to_string();
        match self {
            Self::Definition => EngineError::DefinitionNotFound { node, reference },
            Self::Assumption => EngineError::AssumptionNotFound { node, reference },
            Self::External => EngineError::ExternalNotFound { node, reference },
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an explicit kind prefix off a reference.
pub fn split_reference(raw: &str) -> (Option<ReferenceKind>, &str) {
    for kind in ReferenceKind::ALL {
        if let Some(name) = raw.strip_prefix(kind.prefix()) {
            return (Some(kind), name);
        }
    }
    (None, raw)
}

enum Resolution<'r> {
    Resolved(ReferenceKind),
    Missing {
        explicit: Option<ReferenceKind>,
        reference: &'r str,
    },
}

/// Check that every context reference of `node` resolves to exactly one kind.
///
/// Blank and ambiguous references fail as soon as they are met. Otherwise the
/// first unresolved reference is reported, with its kind taken from its
/// prefix or, failing that, from the nearest resolved reference before it
/// (then after it). With no resolved neighbour it is reported as a missing
/// definition.
pub fn validate_context_refs<L>(node: &Node, lookup: &L) -> Result<(), EngineError>
where
    L: ContextLookup + ?Sized,
{
    let mut resolutions = Vec::with_capacity(node.context.len());
    for (position, raw) in node.context.iter().enumerate() {
        let (explicit, name) = split_reference(raw);
        if name.trim().is_empty() {
            return Err(EngineError::BlankReference {
                node: node.id.clone(),
                position,
            });
        }
        let resolution = match explicit {
            Some(kind) if kind.resolves(lookup, name) => Resolution::Resolved(kind),
            Some(_) => Resolution::Missing {
                explicit,
                reference: raw,
            },
            None => {
                let matches: Vec<ReferenceKind> = ReferenceKind::ALL
                    .into_iter()
                    .filter(|k| k.resolves(lookup, name))
                    .collect();
                match matches.as_slice() {
                    [] => Resolution::Missing {
                        explicit: None,
                        reference: raw,
                    },
                    [kind] => Resolution::Resolved(*kind),
                    _ => {
                        return Err(EngineError::AmbiguousReference {
                            node: node.id.clone(),
                            reference: raw.clone(),
                            matches: matches
                                .iter()
                                .map(ReferenceKind::as_str)
                                .collect::<Vec<_>>()
                                .join(", "),
                        })
                    }
                }
            }
        };
        resolutions.push(resolution);
    }

    for (position, resolution) in resolutions.iter().enumerate() {
        if let Resolution::Missing {
            explicit,
            reference,
        } = resolution
        {
            let kind = (*explicit).unwrap_or_else(|| infer_zone(&resolutions, position));
            return Err(kind.missing(&node.id, reference));
        }
    }
    Ok(())
}

fn infer_zone(resolutions: &[Resolution<'_>], position: usize) -> ReferenceKind {
    let resolved = |r: &Resolution<'_>| match r {
        Resolution::Resolved(kind) => Some(*kind),
        Resolution::Missing { .. } => None,
    };
    resolutions[..position]
        .iter()
        .rev()
        .find_map(resolved)
        .or_else(|| resolutions[position + 1..].iter().find_map(resolved))
        .unwrap_or(ReferenceKind::Definition)
}
