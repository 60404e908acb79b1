//! Arena reactions
//!
//! The behaviour of the Doggo Arena page, one installer per reaction. Each
//! installer binds through `EventBinder` and reads its selectors from
//! `ArenaConfig`. Missing optional elements are logged, never fatal.

use std::fmt;

use arena_dom::{DomError, FormData, NodeId};
use arena_events::{Event, EventType};
use arena_media::random_cue_index;

use crate::{ArenaConfig, EngineError, EngineResult, EventBinder, HandlerScope, Page};

/// Presentation flags toggled on fighters
pub const INVERTED: &str = "inverted";
pub const FLIPPED: &str = "flipped";
pub const HOVERED: &str = "hovered";

/// What `install` wired up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    pub fighters: usize,
    pub text_inputs: usize,
    pub readout: NodeId,
    pub submit_form: Option<NodeId>,
    pub paragraph: Option<NodeId>,
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fighters, {} text inputs, readout {}",
            self.fighters, self.text_inputs, self.readout
        )?;
        match self.submit_form {
            Some(form) => write!(f, ", form {form}")?,
            None => write!(f, ", no form")?,
        }
        if let Some(p) = self.paragraph {
            write!(f, ", paragraph {p}")?;
        }
        Ok(())
    }
}

/// Install every reaction
pub fn install(page: &mut Page, config: &ArenaConfig) -> EngineResult<InstallReport> {
    config.validate()?;

    let fighters = fighter_moves(page, config)?;
    fighter_hover(page, config)?;
    let readout = cursor_readout(page)?;
    let text_inputs = key_sounds(page, config)?;
    let submit_form = submit_explosion(page, config)?;
    applicant_preview(page, config)?;
    nyan_shortcut(page, config)?;
    let paragraph = paragraph_log(page, config)?;

    let report = InstallReport {
        fighters,
        text_inputs,
        readout,
        submit_form,
        paragraph,
    };
    tracing::info!(%report, "arena reactions installed");
    Ok(report)
}

/// Double click inverts and logs, press flips, release and leave unflip
pub fn fighter_moves(page: &mut Page, config: &ArenaConfig) -> EngineResult<usize> {
    let selector = config.selectors.fighter.as_str();

    let fighters = page.bind(selector, EventType::DblClick, |scope, event| {
        let name = scope
            .document()
            .element(event.current_target)
            .and_then(|e| e.id())
            .unwrap_or("<anonymous>")
            .to_string();
        tracing::info!("{name} was double clicked");
        toggle_flag(scope, event.current_target, INVERTED);
    })?;
    page.bind(selector, EventType::MouseDown, |scope, event| {
        set_flag(scope, event.current_target, FLIPPED, true);
    })?;
    page.bind(selector, EventType::MouseUp, |scope, event| {
        set_flag(scope, event.current_target, FLIPPED, false);
    })?;
    page.bind(selector, EventType::MouseLeave, |scope, event| {
        set_flag(scope, event.current_target, FLIPPED, false);
    })?;

    Ok(fighters)
}

/// Hover highlight that follows the pointer in and out
pub fn fighter_hover(page: &mut Page, config: &ArenaConfig) -> EngineResult<usize> {
    let selector = config.selectors.fighter.as_str();
    let bound = page.bind(selector, EventType::MouseEnter, |scope, event| {
        set_flag(scope, event.current_target, HOVERED, true);
    })?;
    page.bind(selector, EventType::MouseLeave, |scope, event| {
        set_flag(scope, event.current_target, HOVERED, false);
    })?;
    Ok(bound)
}

/// Fixed box at the bottom of the page showing the pointer position
pub fn cursor_readout(page: &mut Page) -> EngineResult<NodeId> {
    let document = page.document_mut();
    let body = document.body().ok_or(DomError::NotFound)?;
    let readout = document.create_element("div");
    if let Some(style) = document.style_mut(readout) {
        style.set("position", "fixed");
        style.set("bottom", "0");
        style.set("backgroundColor", "white");
        style.set("fontSize", "2em");
    }
    document.append_child(body, readout)?;

    page.bind_document(EventType::MouseMove, move |scope, event| {
        let (x, y) = event.coordinates();
        if let Err(err) = scope
            .document_mut()
            .set_text_content(readout, &readout_text(x, y))
        {
            tracing::warn!(%err, "cursor readout not updated");
        }
    })?;
    Ok(readout)
}

/// `(x, y)`
pub fn readout_text(x: i32, y: i32) -> String {
    format!("({x}, {y})")
}

/// Random keystroke cue on every text input
pub fn key_sounds(page: &mut Page, config: &ArenaConfig) -> EngineResult<usize> {
    let cues = config.cues();
    let count = config.keystroke_cues;
    page.bind(&config.selectors.text_input, EventType::Input, move |scope, _| {
        match random_cue_index(scope.rng(), count) {
            Ok(n) => scope.play_audio(&cues.keystroke(n)),
            Err(err) => tracing::warn!(%err, "no keystroke cue"),
        }
    })
}

/// Explosion instead of submitting the first form
pub fn submit_explosion(page: &mut Page, config: &ArenaConfig) -> EngineResult<Option<NodeId>> {
    let explosion = config.cues().explosion();
    let bound = page.bind_one(&config.selectors.form, EventType::Submit, move |scope, event| {
        event.prevent_default();
        scope.play_audio(&explosion);
    });
    optional(bound)
}

/// Once the document has loaded, submitting the application form previews
/// the applicant instead of leaving the page
pub fn applicant_preview(page: &mut Page, config: &ArenaConfig) -> EngineResult<()> {
    let form = config.selectors.application_form.clone();
    let preview = config.selectors.applicant_preview.clone();
    page.bind_document(EventType::DomContentLoaded, move |scope, _| {
        let preview = preview.clone();
        scope.bind_one(&form, EventType::Submit, move |scope, event| {
            show_applicant(scope, event, &preview);
        });
    })
}

fn show_applicant(scope: &mut HandlerScope<'_>, event: &mut Event, preview_selector: &str) {
    event.prevent_default();

    let data = match FormData::from_form(scope.document(), event.current_target) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(%err, "application form unreadable");
            return;
        }
    };
    let name = data.get("name").unwrap_or_default().to_string();
    let picture = data.get("picture-url").unwrap_or_default().to_string();
    let team = data.get("team-name").unwrap_or_default().to_string();

    let preview = match scope.document().query_selector(preview_selector) {
        Ok(Some(node)) => node,
        Ok(None) => {
            tracing::warn!(selector = preview_selector, "applicant preview missing");
            return;
        }
        Err(err) => {
            tracing::warn!(%err, "applicant preview selector rejected");
            return;
        }
    };

    let document = scope.document_mut();
    if let Some(style) = document.style_mut(preview) {
        style.set("backgroundImage", format!("url({picture})"));
        style.set("border", format!("medium solid {team}"));
    }
    match document.query_selector_from(preview, "h1") {
        Ok(Some(title)) => {
            if let Err(err) = document.set_text_content(title, &name) {
                tracing::warn!(%err, "applicant name not shown");
            }
        }
        _ => tracing::warn!("applicant preview has no title"),
    }
    tracing::debug!(name = %name, team = %team, "applicant previewed");
}

/// Alt+Shift+N sends the page to the configured URL
pub fn nyan_shortcut(page: &mut Page, config: &ArenaConfig) -> EngineResult<()> {
    let target = config.nyan_url.clone();
    page.bind_document(EventType::KeyDown, move |scope, event| {
        tracing::debug!(key = ?event.key, modifiers = ?event.modifiers, "keydown");
        if is_nyan_chord(event) {
            if let Err(err) = scope.navigate(&target) {
                tracing::warn!(%err, "shortcut navigation failed");
            }
        }
    })
}

/// Alt+Shift with an `n` key value, either case
pub fn is_nyan_chord(event: &Event) -> bool {
    event.modifiers.alt
        && event.modifiers.shift
        && event.key.as_ref().is_some_and(|key| key.matches_letter('n'))
}

/// Debug log when the first paragraph is clicked
pub fn paragraph_log(page: &mut Page, config: &ArenaConfig) -> EngineResult<Option<NodeId>> {
    let bound = page.bind_one(&config.selectors.paragraph, EventType::Click, |_, event| {
        tracing::debug!(target = %event.target, "this was a p node");
    });
    optional(bound)
}

/// A missing single anchor skips its reaction
fn optional(bound: EngineResult<NodeId>) -> EngineResult<Option<NodeId>> {
    match bound {
        Ok(node) => Ok(Some(node)),
        Err(EngineError::SelectorMiss(selector)) => {
            tracing::debug!(%selector, "no element to bind, reaction skipped");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn set_flag(scope: &mut HandlerScope<'_>, node: NodeId, flag: &str, on: bool) {
    if let Some(classes) = scope.document_mut().class_list_mut(node) {
        classes.toggle(flag, Some(on));
    }
}

fn toggle_flag(scope: &mut HandlerScope<'_>, node: NodeId, flag: &str) {
    if let Some(classes) = scope.document_mut().class_list_mut(node) {
        classes.toggle(flag, None);
    }
}
