//! Page
//!
//! The host side of the event loop. A page owns its document, the listener
//! registry and its collaborators, and delivers events one at a time: every
//! listener runs to completion before the next one starts, and queued events
//! wait until the current dispatch has finished.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use arena_dom::{Document, DomError, FormData, NodeId};
use arena_events::{
    propagation_path, BindTarget, DeferredBinding, Event, EventInit, EventType, Key,
    ListenerRegistry, Modifiers,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use url::Url;

use crate::{ArenaConfig, EngineError, EngineResult, Handler, Host};

/// Result of delivering one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// False when the target was missing or detached
    pub delivered: bool,
    pub default_prevented: bool,
    pub listeners_invoked: usize,
}

struct QueuedEvent {
    event_type: EventType,
    target: NodeId,
    init: EventInit,
}

/// A loaded page
pub struct Page {
    document: Document,
    pub(crate) listeners: ListenerRegistry<Handler>,
    host: Host,
    rng: StdRng,
    clock: Instant,
    queue: VecDeque<QueuedEvent>,
    loaded: bool,
}

impl Page {
    /// Page over an existing document, RNG seeded from the OS
    pub fn new(document: Document, host: Host) -> Self {
        Self::with_rng(document, host, StdRng::from_os_rng())
    }

    /// Page with a deterministic RNG
    pub fn with_seed(document: Document, host: Host, seed: u64) -> Self {
        Self::with_rng(document, host, StdRng::seed_from_u64(seed))
    }

    fn with_rng(document: Document, host: Host, rng: StdRng) -> Self {
        Self {
            document,
            listeners: ListenerRegistry::new(),
            host,
            rng,
            clock: Instant::now(),
            queue: VecDeque::new(),
            loaded: false,
        }
    }

    /// Parse `html` and host it, seeding the RNG from `config`
    pub fn from_html(html: &str, url: &str, config: &ArenaConfig, host: Host) -> Self {
        let document = arena_html::parse_with_url(html, url);
        match config.rng_seed {
            Some(seed) => Self::with_seed(document, host, seed),
            None => Self::new(document, host),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Total registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners on `node` for `event_type`
    pub fn listeners_on(&self, node: NodeId, event_type: &EventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Milliseconds since the page was created
    pub fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    /// First element matching `selector`; a miss is an error
    pub fn query(&self, selector: &str) -> EngineResult<NodeId> {
        self.document
            .query_selector(selector)?
            .ok_or_else(|| EngineError::SelectorMiss(selector.to_string()))
    }

    /// Resolve a binding target and register `handler` on each node
    pub(crate) fn register(
        &mut self,
        target: BindTarget,
        event_type: EventType,
        handler: Handler,
    ) -> EngineResult<Vec<NodeId>> {
        let nodes = match &target {
            BindTarget::Node(node) => {
                if self.document.tree().get(*node).is_none() {
                    return Err(DomError::NotFound.into());
                }
                vec![*node]
            }
            BindTarget::All(selector) => self.document.query_selector_all(selector)?,
            BindTarget::First(selector) => vec![self.query(selector)?],
        };
        for &node in &nodes {
            self.listeners.add(node, event_type.clone(), Rc::clone(&handler));
        }
        tracing::debug!(?target, event = %event_type, bound = nodes.len(), "listeners registered");
        Ok(nodes)
    }

    /// Deliver an event to `target` and, if it bubbles, its ancestors
    pub fn dispatch(&mut self, event_type: EventType, target: NodeId, init: EventInit) -> DispatchOutcome {
        let span = tracing::debug_span!("dispatch", event = %event_type, target = %target);
        let _guard = span.enter();

        if self.document.tree().get(target).is_none() || !self.document.is_connected(target) {
            tracing::debug!("target is not in the document, event dropped");
            return DispatchOutcome::default();
        }

        let init = EventInit {
            timestamp: Some(init.timestamp.unwrap_or_else(|| self.now())),
            ..init
        };
        let mut event = Event::new(event_type, target, init);
        let mut invoked = 0;

        for node in propagation_path(self.document.tree(), target, event.bubbles) {
            let listeners = self.listeners.listeners_for(node, &event.event_type);
            if listeners.is_empty() {
                continue;
            }
            event.current_target = node;
            for (id, handler) in listeners {
                let mut scope = HandlerScope {
                    document: &mut self.document,
                    host: &mut self.host,
                    rng: &mut self.rng,
                    listeners: &mut self.listeners,
                    queue: &mut self.queue,
                };
                handler(&mut scope, &mut event);
                invoked += 1;
                tracing::trace!(listener = id.0, node = %node, "listener finished");
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        self.apply_deferred();

        if !event.is_default_prevented() {
            self.run_default_action(&event);
        }

        DispatchOutcome {
            delivered: true,
            default_prevented: event.is_default_prevented(),
            listeners_invoked: invoked,
        }
    }

    fn apply_deferred(&mut self) {
        for binding in self.listeners.take_deferred() {
            let DeferredBinding {
                target,
                event_type,
                listener,
            } = binding;
            if let Err(err) = self.register(target, event_type, listener) {
                tracing::warn!(%err, "deferred binding skipped");
            }
        }
    }

    /// Browser behaviour that runs unless a listener prevented it
    fn run_default_action(&mut self, event: &Event) {
        if event.event_type != EventType::Submit
            || self.document.tag_name(event.target) != Some("form")
        {
            return;
        }
        match self.form_submission_url(event.target) {
            Ok(url) => {
                tracing::debug!(%url, "native form submission");
                self.host.navigator.navigate(&url);
            }
            Err(err) => tracing::warn!(%err, "form submission skipped"),
        }
    }

    /// `action` resolved against the document; GET forms carry their data
    fn form_submission_url(&self, form: NodeId) -> EngineResult<Url> {
        let action = self
            .document
            .attr(form, "action")
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| self.document.url().to_string());
        let mut url = resolve_url(self.document.url(), &action)?;

        let is_post = self
            .document
            .attr(form, "method")
            .is_some_and(|m| m.eq_ignore_ascii_case("post"));
        if !is_post {
            let data = FormData::from_form(&self.document, form)?;
            if !data.is_empty() {
                url.set_query(Some(&data.to_url_encoded()));
            }
        }
        Ok(url)
    }

    /// Queue an event behind whatever is already pending
    pub fn enqueue(&mut self, event_type: EventType, target: NodeId, init: EventInit) {
        self.queue.push_back(QueuedEvent {
            event_type,
            target,
            init,
        });
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver queued events in FIFO order, including ones queued meanwhile
    pub fn run_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(queued) = self.queue.pop_front() {
            self.dispatch(queued.event_type, queued.target, queued.init);
            delivered += 1;
        }
        delivered
    }

    // === Host input ===

    /// Fire `DOMContentLoaded` at the document, once per page
    pub fn load(&mut self) -> DispatchOutcome {
        if self.loaded {
            tracing::debug!("document already loaded, DOMContentLoaded not fired again");
            return DispatchOutcome::default();
        }
        self.loaded = true;
        self.dispatch(EventType::DomContentLoaded, NodeId::ROOT, EventInit::default())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn click(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::Click, node, EventInit::default())
    }

    pub fn dblclick(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::DblClick, node, EventInit::default())
    }

    pub fn mouse_down(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::MouseDown, node, EventInit::default())
    }

    pub fn mouse_up(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::MouseUp, node, EventInit::default())
    }

    pub fn mouse_enter(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::MouseEnter, node, EventInit::default())
    }

    pub fn mouse_leave(&mut self, node: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::MouseLeave, node, EventInit::default())
    }

    /// Pointer moved over the page background
    pub fn mouse_move(&mut self, x: i32, y: i32) -> DispatchOutcome {
        let target = self.default_target();
        self.mouse_move_over(target, x, y)
    }

    pub fn mouse_move_over(&mut self, node: NodeId, x: i32, y: i32) -> DispatchOutcome {
        self.dispatch(EventType::MouseMove, node, EventInit::at(x, y))
    }

    /// Key pressed with nothing focused
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> DispatchOutcome {
        let target = self.default_target();
        self.key_down_on(target, key, modifiers)
    }

    pub fn key_down_on(&mut self, node: NodeId, key: Key, modifiers: Modifiers) -> DispatchOutcome {
        self.dispatch(EventType::KeyDown, node, EventInit::key(key, modifiers))
    }

    /// Append `text` to a control's value, one `input` event per character
    pub fn type_text(&mut self, node: NodeId, text: &str) -> EngineResult<usize> {
        let mut value = self
            .document
            .value(node)
            .ok_or(DomError::NotAnElement(node))?
            .to_string();
        let mut fired = 0;
        for ch in text.chars() {
            value.push(ch);
            self.document.set_value(node, &value)?;
            self.dispatch(EventType::Input, node, EventInit::default());
            fired += 1;
        }
        Ok(fired)
    }

    /// Request submission of a form
    pub fn submit(&mut self, form: NodeId) -> DispatchOutcome {
        self.dispatch(EventType::Submit, form, EventInit::default())
    }

    fn default_target(&self) -> NodeId {
        self.document.body().unwrap_or(NodeId::ROOT)
    }
}

/// What a listener can reach while it runs
pub struct HandlerScope<'a> {
    document: &'a mut Document,
    host: &'a mut Host,
    rng: &'a mut StdRng,
    listeners: &'a mut ListenerRegistry<Handler>,
    queue: &'a mut VecDeque<QueuedEvent>,
}

impl HandlerScope<'_> {
    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    /// Start playing a sound; failures are logged, never raised
    pub fn play_audio(&mut self, src: &str) {
        match self.host.audio.play(src) {
            Ok(()) => tracing::debug!(src, "audio cue started"),
            Err(err) => tracing::warn!(%err, src, "audio cue dropped"),
        }
    }

    /// Ask the host to navigate; relative URLs resolve against the document
    pub fn navigate(&mut self, target: &str) -> EngineResult<Url> {
        let url = resolve_url(self.document.url(), target)?;
        tracing::debug!(%url, "navigation requested");
        self.host.navigator.navigate(&url);
        Ok(url)
    }

    /// Bind on every match once the current dispatch finishes
    pub fn bind<F>(&mut self, selector: &str, event_type: EventType, handler: F)
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        self.defer(BindTarget::All(selector.to_string()), event_type, Rc::new(handler));
    }

    /// Bind on the first match once the current dispatch finishes
    pub fn bind_one<F>(&mut self, selector: &str, event_type: EventType, handler: F)
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        self.defer(BindTarget::First(selector.to_string()), event_type, Rc::new(handler));
    }

    /// Bind on a known node once the current dispatch finishes
    pub fn bind_node<F>(&mut self, node: NodeId, event_type: EventType, handler: F)
    where
        F: Fn(&mut HandlerScope<'_>, &mut Event) + 'static,
    {
        self.defer(BindTarget::Node(node), event_type, Rc::new(handler));
    }

    fn defer(&mut self, target: BindTarget, event_type: EventType, listener: Handler) {
        self.listeners.defer(DeferredBinding {
            target,
            event_type,
            listener,
        });
    }

    /// Queue an event to run after the current one
    pub fn enqueue(&mut self, event_type: EventType, target: NodeId, init: EventInit) {
        self.queue.push_back(QueuedEvent {
            event_type,
            target,
            init,
        });
    }
}

/// Parse `target`, joining relative references onto `base`
pub(crate) fn resolve_url(base: &str, target: &str) -> EngineResult<Url> {
    let invalid = |source: url::ParseError| EngineError::InvalidUrl {
        url: target.to_string(),
        source,
    };
    match Url::parse(target) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(target))
            .map_err(invalid),
        Err(err) => Err(invalid(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventBinder, RecordingNavigator};
    use arena_media::RecordingPlayer;
    use std::cell::RefCell;

    fn page(html: &str) -> (Page, RecordingNavigator) {
        let nav = RecordingNavigator::new();
        let host = Host::new(RecordingPlayer::new(), nav.clone());
        let document = arena_html::parse_with_url(html, "http://localhost/arena.html");
        (Page::with_seed(document, host, 1), nav)
    }

    #[test]
    fn test_bubbling_order_and_current_target() {
        let (mut page, _) = page(r#"<div id="outer"><span id="inner"></span></div>"#);
        let outer = page.query("#outer").unwrap();
        let inner = page.query("#inner").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for node in [inner, outer, NodeId::ROOT] {
            let seen = Rc::clone(&seen);
            page.bind_node(node, EventType::Click, move |_, event| {
                seen.borrow_mut().push((event.target, event.current_target));
            })
            .unwrap();
        }

        let outcome = page.click(inner);
        assert_eq!(outcome.listeners_invoked, 3);
        assert_eq!(
            *seen.borrow(),
            vec![(inner, inner), (inner, outer), (inner, NodeId::ROOT)]
        );
    }

    #[test]
    fn test_stop_propagation_finishes_current_node() {
        let (mut page, _) = page(r#"<div id="outer"><span id="inner"></span></div>"#);
        let outer = page.query("#outer").unwrap();
        let inner = page.query("#inner").unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = Rc::clone(&hits);
        page.bind_node(inner, EventType::Click, move |_, event| {
            h.borrow_mut().push("stopper");
            event.stop_propagation();
        })
        .unwrap();
        let h = Rc::clone(&hits);
        page.bind_node(inner, EventType::Click, move |_, _| h.borrow_mut().push("sibling"))
            .unwrap();
        let h = Rc::clone(&hits);
        page.bind_node(outer, EventType::Click, move |_, _| h.borrow_mut().push("outer"))
            .unwrap();

        page.click(inner);
        assert_eq!(*hits.borrow(), vec!["stopper", "sibling"]);
    }

    #[test]
    fn test_non_bubbling_events_stay_on_target() {
        let (mut page, _) = page(r#"<div id="outer"><span id="inner"></span></div>"#);
        let outer = page.query("#outer").unwrap();
        let inner = page.query("#inner").unwrap();
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        page.bind_node(outer, EventType::MouseEnter, move |_, _| *h.borrow_mut() += 1)
            .unwrap();

        page.mouse_enter(inner);
        assert_eq!(*hits.borrow(), 0);
        page.mouse_enter(outer);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_detached_target_gets_nothing() {
        let (mut page, _) = page(r#"<div id="outer"><span id="inner"></span></div>"#);
        let outer = page.query("#outer").unwrap();
        let inner = page.query("#inner").unwrap();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        page.bind_node(inner, EventType::Click, move |_, _| *h.borrow_mut() += 1)
            .unwrap();

        page.document_mut().tree_mut().remove_child(outer, inner).unwrap();
        let outcome = page.click(inner);
        assert!(!outcome.delivered);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_unprevented_submit_navigates_with_form_data() {
        let (mut page, nav) = page(
            r#"<form id="f" action="/apply"><input name="name" value="Rex"></form>"#,
        );
        let form = page.query("#f").unwrap();

        let outcome = page.submit(form);
        assert!(!outcome.default_prevented);
        assert_eq!(nav.requests(), vec!["http://localhost/apply?name=Rex"]);
    }

    #[test]
    fn test_prevented_submit_stays() {
        let (mut page, nav) = page(r#"<form id="f"></form>"#);
        page.bind("#f", EventType::Submit, |_, event| event.prevent_default())
            .unwrap();

        let form = page.query("#f").unwrap();
        assert!(page.submit(form).default_prevented);
        assert_eq!(nav.count(), 0);
    }

    #[test]
    fn test_bindings_made_during_dispatch_apply_afterwards() {
        let (mut page, _) = page(r#"<button id="b"></button>"#);
        let hits = Rc::new(RefCell::new(0));

        let h = Rc::clone(&hits);
        page.bind_document(EventType::DomContentLoaded, move |scope, _| {
            let h = Rc::clone(&h);
            scope.bind_one("#b", EventType::Click, move |_, _| *h.borrow_mut() += 1);
        })
        .unwrap();

        let button = page.query("#b").unwrap();
        page.click(button);
        assert_eq!(*hits.borrow(), 0);

        page.load();
        page.click(button);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_load_fires_once() {
        let (mut page, _) = page(r#"<form id="f"></form>"#);
        let form = page.query("#f").unwrap();
        page.bind_document(EventType::DomContentLoaded, |scope, _| {
            scope.bind_one("#f", EventType::Submit, |_, event| event.prevent_default());
        })
        .unwrap();

        assert!(page.load().delivered);
        assert!(page.is_loaded());
        assert_eq!(page.listeners_on(form, &EventType::Submit), 1);

        let again = page.load();
        assert!(!again.delivered);
        assert_eq!(again.listeners_invoked, 0);
        assert_eq!(page.listeners_on(form, &EventType::Submit), 1);
    }

    #[test]
    fn test_queue_is_fifo() {
        let (mut page, _) = page(r#"<i id="a"></i><i id="b"></i>"#);
        let a = page.query("#a").unwrap();
        let b = page.query("#b").unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        page.bind_document(EventType::Click, move |scope, event| {
            o.borrow_mut().push(event.target);
            if event.target == NodeId::ROOT {
                return;
            }
            // Follow-up runs after everything already queued
            scope.enqueue(EventType::Click, NodeId::ROOT, EventInit::default());
        })
        .unwrap();

        page.enqueue(EventType::Click, a, EventInit::default());
        page.enqueue(EventType::Click, b, EventInit::default());
        assert_eq!(page.pending(), 2);
        assert_eq!(page.run_pending(), 4);
        assert_eq!(*order.borrow(), vec![a, b, NodeId::ROOT, NodeId::ROOT]);
    }

    #[test]
    fn test_type_text_fires_input_per_char() {
        let (mut page, _) = page(r#"<input name="name" value="R">"#);
        let input = page.query("input").unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let h = Rc::clone(&hits);
        page.bind_node(input, EventType::Input, move |scope, event| {
            let value = scope.document().value(event.target).unwrap_or_default().to_string();
            h.borrow_mut().push(value);
        })
        .unwrap();

        assert_eq!(page.type_text(input, "ex").unwrap(), 2);
        assert_eq!(*hits.borrow(), vec!["Re", "Rex"]);
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("http://localhost/a/b.html", "c.html").unwrap().as_str(),
            "http://localhost/a/c.html"
        );
        assert_eq!(
            resolve_url("about:blank", "http://nyan.cat").unwrap().as_str(),
            "http://nyan.cat/"
        );
        assert!(matches!(
            resolve_url("about:blank", "relative"),
            Err(EngineError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_timestamps_come_from_page_clock() {
        let (mut page, _) = page("<p></p>");
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&stamps);
        page.bind_document(EventType::Click, move |_, event| s.borrow_mut().push(event.timestamp))
            .unwrap();

        page.click(NodeId::ROOT);
        page.dispatch(EventType::Click, NodeId::ROOT, EventInit::default().with_timestamp(5.0));
        let stamps = stamps.borrow();
        assert!(stamps[0] >= 0.0);
        assert_eq!(stamps[1], 5.0);
    }
}
