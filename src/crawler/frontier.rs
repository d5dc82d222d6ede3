//! Traversal state for a single crawl
//!
//! This module handles:
//! - The visited set, which guarantees at-most-once fetching
//! - The FIFO work queue (breadth-first order)
//! - Discovery order of every identifier, for the crawl report

use crate::resource::ResourceId;
use std::collections::{HashSet, VecDeque};

/// Visited set and work queue for one crawl
///
/// An identifier enters the visited set exactly once, at the moment it is
/// enqueued. Nothing is ever removed, so the queue cannot see the same
/// identifier twice.
#[derive(Debug)]
pub struct Frontier {
    /// Every identifier ever enqueued
    visited: HashSet<ResourceId>,

    /// Visited identifiers in discovery order
    order: Vec<ResourceId>,

    /// Identifiers awaiting fetch
    queue: VecDeque<ResourceId>,

    /// Identifiers a scope filter turned away at least once
    out_of_scope: HashSet<ResourceId>,
}

impl Frontier {
    /// Creates a frontier seeded with the start identifier
    pub fn new(start: ResourceId) -> Self {
        let mut frontier = Self {
            visited: HashSet::new(),
            order: Vec::new(),
            queue: VecDeque::new(),
            out_of_scope: HashSet::new(),
        };
        frontier.offer(start);
        frontier
    }

    /// Enqueues an identifier unless it was seen before
    ///
    /// Check and insert happen in one step. Returns true if the identifier
    /// was new.
    pub fn offer(&mut self, id: ResourceId) -> bool {
        if !self.visited.insert(id.clone()) {
            return false;
        }

        self.order.push(id.clone());
        self.queue.push_back(id);
        true
    }

    /// Records that a scope filter rejected an identifier
    ///
    /// Returns true the first time an identifier is rejected. The record does
    /// not block a later `offer`, since `subtree-only` decisions depend on the
    /// linking resource.
    pub fn reject(&mut self, id: ResourceId) -> bool {
        self.out_of_scope.insert(id)
    }

    /// Takes the next identifier to fetch
    pub fn next(&mut self) -> Option<ResourceId> {
        self.queue.pop_front()
    }

    /// Returns true if the identifier was already enqueued at some point
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.visited.contains(id)
    }

    /// Number of identifiers still waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of identifiers ever enqueued
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Consumes the frontier, returning visited identifiers in discovery order
    pub fn into_visited(self) -> Vec<ResourceId> {
        self.order
    }
}
