#![forbid(unsafe_code)]

//! The post editor host.
//!
//! # Role
//! [`PostEditor`] is the composition root a host embeds: it owns the
//! editable surface, the scheduler, and a [`TextFormatter`], and layers
//! the application concerns on top — toolbar indicators, the save
//! shortcut, draft metadata with validation, and user-facing
//! notifications.
//!
//! # Key routing
//! Ctrl/Cmd+S belongs to the editor, not the engine: it is matched here
//! before any delegation, so saving works even though the formatter only
//! knows `b`/`i`/`u`. Every other key is offered to the engine's
//! shortcut handler; after a consumed key the editor drains the
//! scheduler so the deferred selection-changed notification lands and
//! the toolbar state is fresh by the time the host redraws.

use std::cell::Cell;
use std::rc::Rc;

use inkline_core::{KeyDisposition, KeyEvent, Scheduler};
use inkline_dom::{DocumentError, DomPosition, Surface};
use inkline_engine::{FormatCommand, FormatState, ShortcutOutcome, TextFormatter};

use crate::notifications::NotificationQueue;
use crate::validate::{DraftValidation, validate_draft};

/// A rich-text post editor: surface, formatter, draft fields.
pub struct PostEditor {
    surface: Surface,
    scheduler: Scheduler,
    formatter: TextFormatter,
    notifications: NotificationQueue,
    toolbar: FormatState,
    toolbar_stale: Rc<Cell<bool>>,
    title: String,
    description: String,
    validation: DraftValidation,
    dirty: bool,
    published: bool,
}

impl PostEditor {
    /// Create an editor with an empty surface and draft.
    #[must_use]
    pub fn new() -> Self {
        let surface = Surface::new();
        let scheduler = Scheduler::new();
        let formatter = TextFormatter::new(surface.handle(), scheduler.handle());

        // The engine notifies after each settled mutation; mark the
        // cached toolbar state stale and recompute lazily.
        let toolbar_stale = Rc::new(Cell::new(false));
        let stale = Rc::clone(&toolbar_stale);
        formatter.events().subscribe(move |_| stale.set(true));

        Self {
            surface,
            scheduler,
            formatter,
            notifications: NotificationQueue::new(),
            toolbar: FormatState::inactive(),
            toolbar_stale,
            title: String::new(),
            description: String::new(),
            validation: DraftValidation::default(),
            dirty: false,
            published: false,
        }
    }

    // --- Surface access ---

    /// The editable surface (document + selection).
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Plain text of the editor body, markup stripped.
    #[must_use]
    pub fn body_text(&self) -> String {
        let state = self.surface.read();
        state
            .document
            .plain_text(state.document.root())
            .unwrap_or_default()
    }

    /// The body serialized as markup, the shape a draft persists.
    #[must_use]
    pub fn body_markup(&self) -> String {
        let state = self.surface.read();
        state
            .document
            .inner_markup(state.document.root())
            .unwrap_or_default()
    }

    // --- Formatting ---

    /// Apply a format from a toolbar action.
    ///
    /// Failures surface as an error notification rather than an error
    /// value; the toolbar is a fire-and-forget control.
    pub fn format(&mut self, command: FormatCommand) -> bool {
        match self.formatter.apply_format(command) {
            Ok(()) => {
                self.dirty = true;
                self.settle();
                true
            }
            Err(err) => {
                tracing::debug!(%command, error = %err, "toolbar format failed");
                self.notifications.error(
                    "Formatting Failed",
                    format!("Unable to apply {command} formatting. Please try selecting text first."),
                );
                false
            }
        }
    }

    /// Current toolbar indicator state, refreshed from the last settled
    /// notification.
    pub fn toolbar_state(&mut self) -> FormatState {
        if self.toolbar_stale.take() {
            self.toolbar = self.formatter.format_state();
        }
        self.toolbar
    }

    // --- Key routing ---

    /// Route a key event through the editor.
    ///
    /// The save shortcut is handled here, before the engine sees the
    /// event; formatting shortcuts delegate to the engine.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyDisposition {
        if event.command() && event.is_char_ignore_case('s') {
            self.save(false);
            return KeyDisposition::Consumed;
        }

        match self.formatter.handle_shortcut(event) {
            ShortcutOutcome::Applied(_) => {
                self.dirty = true;
                self.settle();
                KeyDisposition::Consumed
            }
            ShortcutOutcome::Failed(command, err) => {
                tracing::debug!(%command, error = %err, "format shortcut failed");
                self.notifications.error(
                    "Formatting Failed",
                    format!("Unable to apply {command} formatting. Please try selecting text first."),
                );
                KeyDisposition::Consumed
            }
            ShortcutOutcome::Declined => KeyDisposition::Declined,
        }
    }

    // --- Typing ---

    /// Insert text at the selection, replacing whatever it covers.
    ///
    /// With the selection over a freshly inserted formatting wrapper
    /// (the collapsed-cursor flow), this replaces the invisible seed so
    /// the typed text renders formatted. Without any selection the text
    /// appends at the end of the body.
    pub fn insert_text(&mut self, text: &str) -> Result<(), DocumentError> {
        {
            let mut state = self.surface.write();
            let range = match state.selection.primary_range() {
                Some(range) => range,
                None => {
                    let root = state.document.root();
                    let end = state.document.child_count(root)?;
                    state.document.caret(DomPosition::new(root, end))?
                }
            };
            let boundary = state.document.delete_range_contents(&range)?;

            let caret = if state.document.is_text(boundary.node)? {
                state
                    .document
                    .splice_text(boundary.node, boundary.offset, boundary.offset, text)?;
                DomPosition::new(boundary.node, boundary.offset + text.chars().count())
            } else {
                let node = state.document.create_text(text)?;
                state.document.insert_node_at(boundary, node)?;
                DomPosition::new(node, text.chars().count())
            };
            let caret = state.document.caret(caret)?;
            state.selection.add_range(caret);
        }
        self.dirty = true;
        self.toolbar_stale.set(true);
        Ok(())
    }

    // --- Draft metadata ---

    /// The draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the draft title; clears any standing title error.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.validation.title = None;
        self.dirty = true;
    }

    /// The draft description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the draft description; clears any standing description error.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.validation.description = None;
        self.dirty = true;
    }

    /// True when the draft has unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True once the draft has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// The last save attempt's field errors.
    #[must_use]
    pub fn validation(&self) -> &DraftValidation {
        &self.validation
    }

    /// Queued user-facing notifications.
    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    // --- Saving ---

    /// Validate and save the draft; `publish` also marks it published.
    ///
    /// Returns whether the save went through. Validation failures leave
    /// the draft dirty and queue an error notification with the failed
    /// fields recorded in [`PostEditor::validation`].
    pub fn save(&mut self, publish: bool) -> bool {
        let report = validate_draft(&self.title, &self.description, &self.body_text());
        if !report.is_valid() {
            self.validation = report;
            self.notifications.error(
                "Validation Error",
                "Please fix the errors before saving. Check the highlighted fields.",
            );
            return false;
        }
        self.validation = report;
        self.dirty = false;
        if publish {
            self.published = true;
            self.notifications.success(
                "Post Published!",
                "Your post has been published successfully and is now live.",
            );
        } else {
            self.notifications.success(
                "Draft Saved!",
                "Your draft has been saved successfully. You can continue editing later.",
            );
        }
        true
    }

    /// Drain deferred work and refresh the toolbar cache.
    fn settle(&mut self) {
        self.scheduler.run_until_idle();
        if self.toolbar_stale.take() {
            self.toolbar = self.formatter.format_state();
        }
    }
}

impl Default for PostEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PostEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostEditor")
            .field("title", &self.title)
            .field("dirty", &self.dirty)
            .field("published", &self.published)
            .field("toolbar", &self.toolbar)
            .finish_non_exhaustive()
    }
}
