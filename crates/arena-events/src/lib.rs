//! Input Events Module
//!
//! Mouse, keyboard, input and form events, the listener registry, and the
//! propagation path an event travels through the DOM.

mod event_type;
mod event;
mod keyboard;
mod registry;
mod path;

pub use event_type::EventType;
pub use event::{Event, EventInit, MouseButton};
pub use keyboard::{Key, Modifiers};
pub use registry::{BindTarget, DeferredBinding, ListenerId, ListenerRegistry};
pub use path::propagation_path;
