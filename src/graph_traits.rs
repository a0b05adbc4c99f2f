//! Traits describing the node keys our graphs are indexed by.

use std::fmt::Debug;

/// Identifies a node of an [`OwnedGraph`](crate::graph::OwnedGraph).
///
/// Keys are ordered so that neighborhoods, profile tables and batch outputs come out in a
/// reproducible order, and shared across threads by the batch operations.
pub trait NodeKey: Clone + Ord + Debug + Send + Sync {}

impl<T> NodeKey for T where T: Clone + Ord + Debug + Send + Sync {}
