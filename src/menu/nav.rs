//! Navigation stack: the finite-state traversal engine.
//!
//! [`Menu`] holds a back-stack of [`PageState`] values; exactly one page
//! (the top of the stack) receives input. Pages form a static tree, so
//! the stack can never contain a cycle. Processing is single-threaded and
//! run-to-completion: enter/exit staging finishes before the next event
//! is looked at, so there is no partial-transition state to observe.
//!
//! Event routing:
//!
//! | Event  | On a field        | Elsewhere                          |
//! |--------|-------------------|------------------------------------|
//! | Up     | focus up          | focus up                           |
//! | Down   | focus down        | focus down                         |
//! | Right  | increment         | descend / invoke action / back row |
//! | Left   | decrement         | ascend (commit and pop)            |
//! | Toggle | open the menu when closed; unwind-commit and close when open |

use heapless::Vec;

use super::action::{self, ActionOutcome, ExitKind, MenuAction};
use super::entry::{EntryKind, FeatureSet};
use super::field::ChangeHook;
use super::page::{PageId, PageState};
use super::pages::select_cell;
use super::profile::ProfileBinding;
use super::store::ConfigStore;
use super::MAX_DEPTH;

/// Debounced navigation event from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    Up,
    Down,
    /// Decrement the focused field, or ascend out of the page.
    Left,
    /// Increment the focused field, descend, or invoke.
    Right,
    /// Open the menu, or unwind-commit and close it.
    Toggle,
}

/// What an event did; signals are delivered to the caller, never acted
/// on here (a reboot request does not reboot anything).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome {
    /// Menu is closed and the event was not a toggle.
    Ignored,
    /// Event consumed; menu still open.
    Handled,
    /// Menu closed; every staged page was committed on the way out.
    Closed,
    /// Menu closed, committed, and an EEPROM write was requested.
    Saved,
    /// Like [`Saved`](Self::Saved), plus a device-restart request.
    RebootRequested,
}

/// The menu engine: navigation stack, profile binding and feature set.
///
/// # Examples
///
/// ```
/// use tiller::menu::{EventOutcome, FeatureSet, Menu, NavEvent, RamConfigStore};
///
/// let mut store = RamConfigStore::default();
/// let mut menu = Menu::new(&store, FeatureSet::all());
/// assert!(!menu.is_open());
///
/// assert_eq!(menu.handle_event(&mut store, NavEvent::Toggle), EventOutcome::Handled);
/// assert!(menu.is_open());
///
/// // Focus sits on the tuning-profile selector; bump it to profile 2.
/// menu.handle_event(&mut store, NavEvent::Right);
/// assert_eq!(store.active_tuning(), 1);
/// ```
pub struct Menu {
    stack: Vec<PageState, MAX_DEPTH>,
    binding: ProfileBinding,
    features: FeatureSet,
}

impl Menu {
    /// Closed menu with the committed profile indices mirrored from the
    /// store's boot-time state.
    pub fn new<S: ConfigStore>(store: &S, features: FeatureSet) -> Self {
        Self {
            stack: Vec::new(),
            binding: ProfileBinding::new(store),
            features,
        }
    }

    /// Whether any page is on the stack.
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Page currently receiving input.
    pub fn active_page(&self) -> Option<&PageState> {
        self.stack.last()
    }

    /// Committed profile selections.
    pub fn binding(&self) -> &ProfileBinding {
        &self.binding
    }

    /// Feature set fixed at construction.
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Process one navigation event to completion.
    pub fn handle_event<S: ConfigStore>(&mut self, store: &mut S, event: NavEvent) -> EventOutcome {
        match event {
            NavEvent::Toggle => {
                if self.is_open() {
                    self.unwind_commit(store);
                    EventOutcome::Closed
                } else {
                    self.descend(store, PageId::Top)
                }
            }
            _ if !self.is_open() => EventOutcome::Ignored,
            NavEvent::Up => self.focus_move(-1),
            NavEvent::Down => self.focus_move(1),
            NavEvent::Right => self.activate(store),
            NavEvent::Left => self.retreat(store),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Push a child page and run its enter staging.
    fn descend<S: ConfigStore>(&mut self, store: &S, id: PageId) -> EventOutcome {
        let page = PageState::enter(id, &self.binding, store, &self.features);
        if self.stack.push(page).is_err() {
            // Static tree depth is bounded well below MAX_DEPTH.
            debug_assert!(false, "navigation stack overflow");
            #[cfg(feature = "defmt")]
            defmt::warn!("descend ignored: navigation stack full");
        }
        EventOutcome::Handled
    }

    /// Commit and pop the active page; the parent resumes as it was
    /// (its enter staging is *not* re-run, so its own staged edits and
    /// focus survive the child visit).
    fn ascend<S: ConfigStore>(&mut self, store: &mut S) -> EventOutcome {
        if let Some(page) = self.stack.pop() {
            self.binding.commit_from(store, page.id, &page.cells);
        }
        if self.is_open() {
            EventOutcome::Handled
        } else {
            EventOutcome::Closed
        }
    }

    /// Commit every page from the current one up to the root.
    fn unwind_commit<S: ConfigStore>(&mut self, store: &mut S) {
        while let Some(page) = self.stack.pop() {
            self.binding.commit_from(store, page.id, &page.cells);
        }
    }

    /// Move focus by one visible interactive entry, clamped at the ends.
    fn focus_move(&mut self, delta: i32) -> EventOutcome {
        let features = self.features;
        if let Some(page) = self.stack.last_mut() {
            page.focus = page.spec().next_focusable(page.focus, delta, &features);
        }
        EventOutcome::Handled
    }

    /// Right: increment / descend / invoke / back.
    fn activate<S: ConfigStore>(&mut self, store: &mut S) -> EventOutcome {
        let Some(page) = self.stack.last() else {
            return EventOutcome::Ignored;
        };
        match page.focused_entry().kind {
            EntryKind::Numeric(_) | EntryKind::Enum(_) => self.edit(store, 1),
            EntryKind::SubPage(id) => self.descend(store, id),
            EntryKind::Action(a) => self.invoke(store, a),
            EntryKind::Back => self.ascend(store),
            EntryKind::Heading(_) => EventOutcome::Handled, // not focusable
        }
    }

    /// Left: decrement on a field, otherwise ascend.
    fn retreat<S: ConfigStore>(&mut self, store: &mut S) -> EventOutcome {
        let Some(page) = self.stack.last() else {
            return EventOutcome::Ignored;
        };
        match page.focused_entry().kind {
            EntryKind::Numeric(_) | EntryKind::Enum(_) => self.edit(store, -1),
            _ => self.ascend(store),
        }
    }

    /// Adjust the focused field in place; fire its change hook if the
    /// staged value actually moved.
    fn edit<S: ConfigStore>(&mut self, store: &mut S, delta: i32) -> EventOutcome {
        let Some(page) = self.stack.last_mut() else {
            return EventOutcome::Ignored;
        };
        let hook = match page.focused_entry().kind {
            EntryKind::Numeric(f) => {
                let old = f.read(&page.cells);
                let new = f.adjust(&mut page.cells, delta);
                if new != old {
                    f.on_change
                } else {
                    None
                }
            }
            EntryKind::Enum(f) => {
                f.adjust(&mut page.cells, delta);
                None
            }
            _ => None,
        };

        if let Some(hook) = hook {
            // Selector cells are 1-based for display; the hook commits
            // the 0-based index immediately, matching the firmware's
            // change-on-scroll profile switching.
            let staged = match hook {
                ChangeHook::SelectTuningProfile => page.cells[select_cell::TUNING],
                ChangeHook::SelectRateProfile => page.cells[select_cell::RATE],
            };
            let index = (staged - 1) as usize;
            let result = match hook {
                ChangeHook::SelectTuningProfile => self.binding.select_tuning(store, index),
                ChangeHook::SelectRateProfile => self.binding.select_rate(store, index),
            };
            // The selector widget clamps to the profile range, so this
            // cannot fail unless a table is miswired.
            debug_assert!(result.is_ok());
            #[cfg(feature = "defmt")]
            if result.is_err() {
                defmt::warn!("profile selection rejected: index {}", index);
            }
        }
        EventOutcome::Handled
    }

    /// Run an action handler; exit-class actions unwind the whole stack,
    /// persist, and close the menu.
    fn invoke<S: ConfigStore>(&mut self, store: &mut S, action: MenuAction) -> EventOutcome {
        let Some(page) = self.stack.last() else {
            return EventOutcome::Ignored;
        };
        match action::dispatch(action, &self.binding, store, &page.cells) {
            ActionOutcome::Stay => EventOutcome::Handled,
            ActionOutcome::Exit(kind) => {
                self.unwind_commit(store);
                store.persist();
                match kind {
                    ExitKind::Save => EventOutcome::Saved,
                    ExitKind::SaveReboot => EventOutcome::RebootRequested,
                }
            }
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────
