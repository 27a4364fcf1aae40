use crate::error::EngineError;
use crate::lookup::NodeLookup;
use prooftree_types::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Outcome of a cycle search.
///
/// When `has_cycle` is set, `path` walks the cycle and repeats its first
/// element at the end (`path[0] == path[path.len() - 1]`). A self-loop is
/// reported as a two-element path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResult {
    pub has_cycle: bool,
    pub path: Vec<NodeId>,
}

impl CycleResult {
    pub fn none() -> Self {
        Self::default()
    }

    fn found(path: Vec<NodeId>) -> Self {
        Self {
            has_cycle: true,
            path,
        }
    }

    /// Convert a found cycle into an error.
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.has_cycle {
            return Err(EngineError::DependencyCycle { path: self.path });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

struct Frame<'a> {
    node: &'a Node,
    next: usize,
}

/// Three-color depth-first search over dependency edges.
///
/// Dependencies that the lookup cannot resolve are leaves: a dangling
/// reference is a separate error class and never a cycle. The search keeps
/// its own stack, so pathological depth cannot exhaust the thread stack.
pub struct CycleDetector<'a, L: ?Sized> {
    lookup: &'a L,
}

impl<'a, L: NodeLookup + ?Sized> CycleDetector<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Look for a dependency path from `start` back to itself. The reported
    /// path begins and ends at `start`. A start node that does not exist has
    /// no cycle.
    pub fn detect_cycle(&self, start: &NodeId) -> CycleResult {
        match self.search_through(start) {
            Some(path) => {
                debug!(start = %start, len = path.len(), "dependency cycle detected");
                CycleResult::found(path)
            }
            None => CycleResult::none(),
        }
    }

    /// Look for any cycle reachable from `start`, whether or not `start` is
    /// on it. The path begins and ends at the first node re-entered.
    pub fn find_reachable_cycle(&self, start: &NodeId) -> CycleResult {
        let mut finished = Vec::new();
        match self.search(start, &HashSet::new(), &mut finished) {
            Some(path) => {
                debug!(start = %start, len = path.len(), "reachable dependency cycle");
                CycleResult::found(path)
            }
            None => CycleResult::none(),
        }
    }

    /// Sweep the whole node set and return every distinct cycle found.
    ///
    /// Nodes already proven cycle-free, and nodes that belong to a cycle
    /// already reported, are not searched again.
    pub fn validate_all(&self) -> Vec<CycleResult> {
        let mut nodes = self.lookup.all_nodes();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut settled: HashSet<NodeId> = HashSet::new();
        let mut cycles = Vec::new();
        for node in nodes {
            if settled.contains(&node.id) {
                continue;
            }
            let mut finished = Vec::new();
            let found = self.search(&node.id, &settled, &mut finished);
            settled.extend(finished);
            if let Some(path) = found {
                debug!(start = %node.id, len = path.len(), "dependency cycle detected");
                settled.extend(path.iter().cloned());
                cycles.push(CycleResult::found(path));
            }
        }
        info!(nodes = settled.len(), cycles = cycles.len(), "cycle sweep complete");
        cycles
    }

    /// DFS from `start` that only closes on edges back into `start`. A node
    /// explored once without reaching `start` cannot reach it later, so each
    /// node is expanded at most once.
    fn search_through(&self, start: &NodeId) -> Option<Vec<NodeId>> {
        let lookup: &'a L = self.lookup;
        let root = lookup.get_node(start)?;

        let mut seen: HashSet<&NodeId> = HashSet::new();
        seen.insert(&root.id);
        let mut stack = vec![Frame { node: root, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if frame.next >= node.dependencies.len() {
                stack.pop();
                continue;
            }
            let dep = &node.dependencies[frame.next];
            frame.next += 1;

            if dep == start {
                let mut path: Vec<NodeId> = stack.iter().map(|f| f.node.id.clone()).collect();
                path.push(start.clone());
                return Some(path);
            }
            if !seen.insert(dep) {
                continue;
            }
            if let Some(next) = lookup.get_node(dep) {
                stack.push(Frame { node: next, next: 0 });
            }
        }
        None
    }

    /// DFS from `start`. Nodes in `settled` are treated as black. Every node
    /// fully explored without meeting a back edge is appended to `finished`.
    fn search(
        &self,
        start: &NodeId,
        settled: &HashSet<NodeId>,
        finished: &mut Vec<NodeId>,
    ) -> Option<Vec<NodeId>> {
        let lookup: &'a L = self.lookup;
        let root = lookup.get_node(start)?;

        let mut color: HashMap<&NodeId, Color> = HashMap::new();
        let mut stack = vec![Frame { node: root, next: 0 }];
        color.insert(&root.id, Color::Gray);

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if frame.next >= node.dependencies.len() {
                color.insert(&node.id, Color::Black);
                finished.push(node.id.clone());
                stack.pop();
                continue;
            }
            let dep = &node.dependencies[frame.next];
            frame.next += 1;

            if settled.contains(dep) {
                continue;
            }
            match color.get(dep) {
                Some(Color::Gray) => {
                    if let Some(pos) = stack.iter().position(|f| &f.node.id == dep) {
                        let mut path: Vec<NodeId> =
                            stack[pos..].iter().map(|f| f.node.id.clone()).collect();
                        path.push(dep.clone());
                        return Some(path);
                    }
                }
                Some(Color::Black) => {}
                None => match lookup.get_node(dep) {
                    Some(next) => {
                        color.insert(&next.id, Color::Gray);
                        stack.push(Frame { node: next, next: 0 });
                    }
                    None => {
                        color.insert(dep, Color::Black);
                    }
                },
            }
        }
        None
    }
}
