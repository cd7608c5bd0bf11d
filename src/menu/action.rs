//! Action dispatch: side-effecting entries that are not plain field edits.

use super::pages::copy_cell;
use super::profile::ProfileBinding;
use super::store::ConfigStore;
use super::Cells;

/// Side-effecting operations a page row can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Commit every staged page up to the root, persist, close the menu.
    SaveExit,
    /// Same as [`SaveExit`](Self::SaveExit), plus a device-restart
    /// request signalled to the caller (never performed here).
    SaveReboot,
    /// Copy the current tuning record onto the staged destination slot.
    CopyTuning,
    /// Copy the current rate record onto the staged destination slot.
    CopyRate,
}

/// How the exit-class actions leave the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExitKind {
    Save,
    SaveReboot,
}

/// What the navigation stack should do after an action handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionOutcome {
    /// Handler finished; stay on the current page.
    Stay,
    /// Unwind the whole stack (committing every page) and close.
    Exit(ExitKind),
}

/// Run an action handler against the active page's staged buffer.
///
/// Copy handlers read their 1-based destination selector from `cells`;
/// the `-` sentinel (0) makes them a silent no-op, per the menu's
/// no-destination-selected convention.
pub(super) fn dispatch<S: ConfigStore>(
    action: MenuAction,
    binding: &ProfileBinding,
    store: &mut S,
    cells: &Cells,
) -> ActionOutcome {
    match action {
        MenuAction::SaveExit => ActionOutcome::Exit(ExitKind::Save),
        MenuAction::SaveReboot => ActionOutcome::Exit(ExitKind::SaveReboot),
        MenuAction::CopyTuning => {
            copy_to_target(cells[copy_cell::TUNING_TARGET], |dst| {
                binding.copy_tuning(store, binding.tuning_index(), dst)
            });
            ActionOutcome::Stay
        }
        MenuAction::CopyRate => {
            copy_to_target(cells[copy_cell::RATE_TARGET], |dst| {
                binding.copy_rate(store, binding.rate_index(), dst)
            });
            ActionOutcome::Stay
        }
    }
}

/// Shared no-op guard for the copy handlers.
fn copy_to_target<F>(target: i32, copy: F)
where
    F: FnOnce(usize) -> Result<(), super::MenuError>,
{
    if target <= 0 {
        // No destination selected.
        #[cfg(feature = "defmt")]
        defmt::debug!("profile copy skipped: no destination selected");
        return;
    }
    // The selector widget clamps to the label range, so the destination
    // is always a valid slot; a failure here means a corrupted cell.
    if copy((target - 1) as usize).is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("profile copy skipped: destination {} out of range", target);
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{RamConfigStore, MAX_CELLS};

    fn fresh() -> (RamConfigStore, ProfileBinding) {
        let store = RamConfigStore::default();
        let binding = ProfileBinding::new(&store);
        (store, binding)
    }

    #[test]
    fn exit_actions_map_to_exit_outcomes() {
        let (mut store, binding) = fresh();
        let cells = [0; MAX_CELLS];

        assert_eq!(
            dispatch(MenuAction::SaveExit, &binding, &mut store, &cells),
            ActionOutcome::Exit(ExitKind::Save)
        );
        assert_eq!(
            dispatch(MenuAction::SaveReboot, &binding, &mut store, &cells),
            ActionOutcome::Exit(ExitKind::SaveReboot)
        );
    }

    #[test]
    fn copy_with_sentinel_destination_is_a_no_op() {
        let (mut store, binding) = fresh();
        let before = store.clone();

        let cells = [0; MAX_CELLS]; // both targets at "-"
        let outcome = dispatch(MenuAction::CopyTuning, &binding, &mut store, &cells);

        assert_eq!(outcome, ActionOutcome::Stay);
        for i in 0..crate::menu::PROFILE_COUNT {
            assert_eq!(*store.tuning(i), *before.tuning(i));
        }
    }

    #[test]
    fn copy_duplicates_current_profile_onto_target() {
        let (mut store, binding) = fresh();
        store.tuning_mut(0).gains[0].p = 77;

        let mut cells = [0; MAX_CELLS];
        cells[copy_cell::TUNING_TARGET] = 3; // slot index 2

        let outcome = dispatch(MenuAction::CopyTuning, &binding, &mut store, &cells);
        assert_eq!(outcome, ActionOutcome::Stay);
        assert_eq!(store.tuning(2).gains[0].p, 77);
        // Other slots untouched.
        assert_eq!(store.tuning(1).gains[0].p, 45);
    }

    #[test]
    fn copy_rate_uses_rate_target_cell() {
        let (mut store, binding) = fresh();
        store.rate_mut(0).tpa_breakpoint = 1800;

        let mut cells = [0; MAX_CELLS];
        cells[copy_cell::RATE_TARGET] = 2; // slot index 1
        dispatch(MenuAction::CopyRate, &binding, &mut store, &cells);

        assert_eq!(store.rate(1).tpa_breakpoint, 1800);
        assert_eq!(store.rate(2).tpa_breakpoint, 1650);
    }
}
