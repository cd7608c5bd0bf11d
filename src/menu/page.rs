//! Pages: static entry tables plus the runtime staged-edit state.
//!
//! A page has no persistent identity beyond its entry table — it is a
//! singleton template ([`PageSpec`]) reused across profile indices. The
//! per-visit state ([`PageState`]) lives on the navigation stack: the
//! focused entry index and the staged cell buffer populated on entry.

use super::entry::{Entry, FeatureSet};
use super::profile::ProfileBinding;
use super::store::ConfigStore;
use super::{pages, Cells, MAX_CELLS};

/// Identity of every page in the static menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageId {
    /// Root page: profile selectors and sub-page links.
    Top,
    /// Per-axis P/I/D/F gains of the selected tuning profile.
    Gains,
    /// Remaining tuning-profile fields (feedforward, level, i-term relax).
    TuningMisc,
    /// Per-profile D-term / yaw filter chain.
    FilterProfile,
    /// Global gyro filter chain.
    FilterGlobal,
    /// IMU-F fusion filter chip settings; applied at boot, so the page
    /// carries its own save-and-reboot row.
    ImufFilter,
    /// Stick rate curve of the selected rate profile.
    RateCurve,
    /// Copy the current profiles onto another slot.
    CopyProfile,
}

// ── Static template ──────────────────────────────────────────────────────

/// Static description of one page: its identity and ordered entry table.
#[derive(Debug)]
pub struct PageSpec {
    pub id: PageId,
    pub entries: &'static [Entry],
}

impl PageSpec {
    /// Index of the first visible, focusable entry.
    pub fn first_focusable(&self, features: &FeatureSet) -> usize {
        self.entries
            .iter()
            .position(|e| e.visible(features) && e.focusable())
            .unwrap_or(0)
    }

    /// Next visible focusable entry from `from` in direction `delta`
    /// (`-1` up, `+1` down). Clamps: returns `from` when there is no
    /// further focusable entry in that direction — no wraparound.
    pub fn next_focusable(&self, from: usize, delta: i32, features: &FeatureSet) -> usize {
        let mut i = from as i32;
        loop {
            i += delta;
            if i < 0 || i as usize >= self.entries.len() {
                return from;
            }
            let entry = &self.entries[i as usize];
            if entry.visible(features) && entry.focusable() {
                return i as usize;
            }
        }
    }
}

// ── Runtime state ────────────────────────────────────────────────────────

/// One page's runtime state while it sits on the navigation stack.
///
/// `cells` is the staged-edit buffer: a working copy of the bound
/// persistent record, loaded by [`PageState::enter`] and exclusively
/// owned by this page until it is flushed (or dropped) on exit. Parent
/// pages keep their state across a child visit — returning from a
/// sub-page must not re-stage the parent's fields.
#[derive(Debug, Clone, Copy)]
pub struct PageState {
    pub id: PageId,
    /// Focused entry index (always a visible, focusable entry).
    pub focus: usize,
    /// Staged-edit buffer; unbound cells stay zero.
    pub cells: Cells,
}

impl PageState {
    /// Enter a page: stage the bound persistent record (selected through
    /// the committed profile indices in `binding`) and focus the first
    /// interactive entry.
    pub fn enter<S: ConfigStore>(
        id: PageId,
        binding: &ProfileBinding,
        store: &S,
        features: &FeatureSet,
    ) -> Self {
        let mut cells: Cells = [0; MAX_CELLS];
        binding.load_into(store, id, &mut cells);
        Self {
            id,
            focus: pages::spec(id).first_focusable(features),
            cells,
        }
    }

    /// Static template backing this page.
    pub fn spec(&self) -> &'static PageSpec {
        pages::spec(self.id)
    }

    /// Entry the focus currently rests on.
    pub fn focused_entry(&self) -> &'static Entry {
        &self.spec().entries[self.focus]
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::RamConfigStore;

    fn entered(id: PageId) -> PageState {
        let store = RamConfigStore::default();
        let binding = ProfileBinding::new(&store);
        PageState::enter(id, &binding, &store, &FeatureSet::all())
    }

    #[test]
    fn enter_focuses_first_interactive_entry() {
        // Every page opens with one or more heading rows; focus must
        // land on the first row below them.
        for id in [
            PageId::Top,
            PageId::Gains,
            PageId::TuningMisc,
            PageId::FilterProfile,
            PageId::FilterGlobal,
            PageId::ImufFilter,
            PageId::RateCurve,
            PageId::CopyProfile,
        ] {
            let page = entered(id);
            assert!(page.focused_entry().focusable(), "{:?}", id);
            for e in &page.spec().entries[..page.focus] {
                assert!(!e.focusable(), "{:?} skipped a focusable row", id);
            }
        }
    }

    #[test]
    fn next_focusable_clamps_at_both_ends() {
        let page = entered(PageId::Gains);
        let spec = page.spec();
        let features = FeatureSet::all();

        // Moving up from the first interactive entry stays put (the
        // heading above it is not focusable).
        assert_eq!(spec.next_focusable(page.focus, -1, &features), page.focus);

        // Moving down from the last entry stays put.
        let last = spec.entries.len() - 1;
        assert_eq!(spec.next_focusable(last, 1, &features), last);
    }

    #[test]
    fn next_focusable_skips_hidden_entries() {
        use crate::menu::pages;

        // On the misc page the THR BOOST row sits directly above BACK and
        // is feature-gated; without the feature, focus jumps across it.
        let spec = pages::spec(PageId::TuningMisc);
        let boost_idx = spec
            .entries
            .iter()
            .position(|e| e.label == "THR BOOST")
            .unwrap();

        let all = FeatureSet::all();
        let none = FeatureSet::none();
        let above = boost_idx - 1;

        assert_eq!(spec.next_focusable(above, 1, &all), boost_idx);
        assert_eq!(spec.next_focusable(above, 1, &none), boost_idx + 1);
    }
}
