//! Event binder
//!
//! Selector-based listener registration. Selectors are resolved once, when
//! the binding is made; elements added later do not pick the listener up.

use std::rc::Rc;

use arena_dom::NodeId;
use arena_events::{BindTarget, Event, EventType};

use crate::{EngineError, EngineResult, HandlerScope, Page};

/// A registered listener
pub type Handler = Rc<dyn Fn(&mut HandlerScope<'_>, &mut Event)>;

/// Attach listeners to elements
pub trait EventBinder {
    /// Bind `handler` on every element matching `selector`
    ///
    /// Returns how many elements were bound. A selector with no matches binds
    /// nothing and is not an error.
    fn bind<F>(&mut self, selector: &str, event_type: EventType, handler: F) -> EngineResult<usize>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static;

    /// Bind `handler` on the first element matching `selector`
    ///
    /// Fails with `SelectorMiss` when nothing matches.
    fn bind_one<F>(&mut self, selector: &str, event_type: EventType, handler: F) -> EngineResult<NodeId>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static;

    /// Bind `handler` on a known node
    fn bind_node<F>(&mut self, node: NodeId, event_type: EventType, handler: F) -> EngineResult<()>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static;

    /// Bind `handler` on the document node
    fn bind_document<F>(&mut self, event_type: EventType, handler: F) -> EngineResult<()>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        self.bind_node(NodeId::ROOT, event_type, handler)
    }
}

impl EventBinder for Page {
    fn bind<F>(&mut self, selector: &str, event_type: EventType, handler: F) -> EngineResult<usize>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        let bound = self.register(BindTarget::All(selector.to_string()), event_type.clone(), Rc::new(handler))?;
        if bound.is_empty() {
            tracing::debug!(selector, event = %event_type, "selector matched nothing, binding skipped");
        }
        Ok(bound.len())
    }

    fn bind_one<F>(&mut self, selector: &str, event_type: EventType, handler: F) -> EngineResult<NodeId>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        let bound = self.register(BindTarget::First(selector.to_string()), event_type, Rc::new(handler))?;
        bound
            .first()
            .copied()
            .ok_or_else(|| EngineError::SelectorMiss(selector.to_string()))
    }

    fn bind_node<F>(&mut self, node: NodeId, event_type: EventType, handler: F) -> EngineResult<()>
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        self.register(BindTarget::Node(node), event_type, Rc::new(handler))?;
        Ok(())
    }
}
