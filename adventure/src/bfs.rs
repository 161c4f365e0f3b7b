//! Generic breadth-first search.
//!
//! The engine knows nothing about machines or rooms: it sees nodes only
//! through the narrow [`Node`] capability (expand, goal test, fingerprint).
//! Parents are tracked by index into a search-local arena, and the result
//! path runs from the root to the first goal node popped from the frontier.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use thiserror::Error;

/// Capability contract for searchable nodes.
pub trait Node: Sized {
    /// Fingerprint type used to prune revisits. Compared by value.
    type Key: Eq + Hash;
    type Error;

    /// Produce this node's successors, in expansion order. May mutate the
    /// node (e.g. advance an underlying machine).
    fn neighbours(&mut self) -> Result<Vec<Self>, Self::Error>;

    /// Does this node satisfy the goal predicate?
    fn is_goal(&self) -> bool;

    /// This node's fingerprint. The engine calls it exactly once per node,
    /// when the node enters the frontier; key functions are allowed to carry
    /// state that advances per call.
    fn key(&self) -> Self::Key;
}

#[derive(Debug, Error)]
pub enum SearchError<E> {
    /// Frontier exhausted without reaching a goal.
    #[error("search exhausted without finding a goal")]
    NotFound,

    /// Node expansion failed.
    #[error(transparent)]
    Expand(E),
}

struct Entry<N> {
    node: N,
    parent: Option<usize>,
}

/// Breadth-first search from `root`. Returns the node sequence from the root
/// to the first goal found, both ends included. Each fingerprint key is
/// visited at most once.
pub fn search<N: Node>(root: N) -> Result<Vec<N>, SearchError<N::Error>> {
    let mut visited = HashSet::new();
    visited.insert(root.key());

    let mut arena = vec![Entry {
        node: root,
        parent: None,
    }];
    let mut frontier = VecDeque::from([0usize]);

    while let Some(index) = frontier.pop_front() {
        if arena[index].node.is_goal() {
            return Ok(extract_path(arena, index));
        }

        let neighbours = arena[index]
            .node
            .neighbours()
            .map_err(SearchError::Expand)?;
        for neighbour in neighbours {
            if visited.insert(neighbour.key()) {
                arena.push(Entry {
                    node: neighbour,
                    parent: Some(index),
                });
                frontier.push_back(arena.len() - 1);
            }
        }
    }

    Err(SearchError::NotFound)
}

fn extract_path<N>(arena: Vec<Entry<N>>, goal: usize) -> Vec<N> {
    let mut indices = Vec::new();
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        indices.push(index);
        cursor = arena[index].parent;
    }
    indices.reverse();

    // Parents always precede children in the arena, so the path indices are
    // strictly increasing and one ordered sweep moves every path node out.
    let mut wanted = indices.iter().copied().peekable();
    let mut path = Vec::with_capacity(indices.len());
    for (index, entry) in arena.into_iter().enumerate() {
        if wanted.peek() == Some(&index) {
            path.push(entry.node);
            wanted.next();
        }
    }
    path
}
