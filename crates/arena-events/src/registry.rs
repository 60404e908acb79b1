//! Listener registry
//!
//! Listeners per (node, event type), kept in registration order, plus a
//! queue of bindings requested while a dispatch was running.

use std::collections::HashMap;

use arena_dom::NodeId;

use crate::EventType;

/// Listener identifier, unique per registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// What a deferred binding attaches to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// One known node
    Node(NodeId),
    /// Every element matching the selector when the binding is applied
    All(String),
    /// The first element matching the selector when the binding is applied
    First(String),
}

/// Binding requested during a dispatch, applied once it finishes
#[derive(Debug, Clone)]
pub struct DeferredBinding<L> {
    pub target: BindTarget,
    pub event_type: EventType,
    pub listener: L,
}

#[derive(Debug, Clone)]
struct Entry<L> {
    id: ListenerId,
    listener: L,
}

/// Event listener storage
#[derive(Debug)]
pub struct ListenerRegistry<L> {
    listeners: HashMap<(NodeId, EventType), Vec<Entry<L>>>,
    deferred: Vec<DeferredBinding<L>>,
    next_id: u64,
}

impl<L> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            deferred: Vec::new(),
            next_id: 0,
        }
    }
}

impl<L: Clone> ListenerRegistry<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event listener
    pub fn add(&mut self, node: NodeId, event_type: EventType, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry((node, event_type))
            .or_default()
            .push(Entry { id, listener });
        id
    }

    /// Remove an event listener
    pub fn remove(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        let key = (node, event_type.clone());
        let Some(entries) = self.listeners.get_mut(&key) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;
        if entries.is_empty() {
            self.listeners.remove(&key);
        }
        removed
    }

    /// Snapshot of the listeners for a node and event type
    ///
    /// The snapshot lets listeners run while the registry is borrowed
    /// elsewhere.
    pub fn listeners_for(&self, node: NodeId, event_type: &EventType) -> Vec<(ListenerId, L)> {
        self.listeners
            .get(&(node, event_type.clone()))
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.id, e.listener.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of listeners on a node for an event type
    pub fn count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.listeners
            .get(&(node, event_type.clone()))
            .map_or(0, Vec::len)
    }

    /// Total number of listeners
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue a binding until the running dispatch finishes
    pub fn defer(&mut self, binding: DeferredBinding<L>) {
        self.deferred.push(binding);
    }

    /// Take the queued bindings, oldest first
    pub fn take_deferred(&mut self) -> Vec<DeferredBinding<L>> {
        std::mem::take(&mut self.deferred)
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }
}
