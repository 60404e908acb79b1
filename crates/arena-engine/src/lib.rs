//! Arena Engine
//!
//! Hosts a parsed page and wires its behaviour:
//! - `Page`: document, listeners, collaborators and the dispatch loop
//! - `EventBinder`: selector-based listener registration
//! - `reactions`: the arena page's event handlers
//! - `ArenaConfig`: selectors, cue settings and the shortcut target

mod binder;
mod config;
mod host;
mod page;
pub mod reactions;

pub use binder::{EventBinder, Handler};
pub use config::{ArenaConfig, SelectorConfig};
pub use host::{Host, Navigator, RecordingNavigator};
pub use page::{DispatchOutcome, HandlerScope, Page};
pub use reactions::InstallReport;

pub use arena_dom::{select_option, Document, DomError, FormData, NodeId};
pub use arena_events::{Event, EventInit, EventType, Key, Modifiers, MouseButton};
pub use arena_media::{AudioPlayer, MediaError, NullPlayer, RecordingPlayer};

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("No element matches selector: {0}")]
    SelectorMiss(String),

    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
