//! Profile binding layer: maps profile selections to persistent records
//! and performs the typed staging/commit copies.
//!
//! The committed profile indices are explicit state owned here — nothing
//! in the engine reads an ambient global. The 1-based selector cells the
//! user scrolls on the top page stay purely staged display values until
//! their change hook fires; only then does the committed index move and
//! the selection propagate to the runtime consumer through
//! [`ConfigStore::activate_tuning`] / [`ConfigStore::activate_rate`].

use super::error::MenuError;
use super::page::PageId;
use super::pages::{
    copy_cell, filter_global_cell, filter_profile_cell, gains_cell, imuf_cell, misc_cell,
    rate_cell, select_cell,
};
use super::store::ConfigStore;
use super::{Cells, PROFILE_COUNT, RATE_PROFILE_COUNT};

/// Committed (0-based) profile selections plus the staging/commit copies
/// between persistent records and page cell buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileBinding {
    tuning_index: usize,
    rate_index: usize,
}

impl ProfileBinding {
    /// Mirror the store's boot-time live selections.
    pub fn new<S: ConfigStore>(store: &S) -> Self {
        let tuning_index = store.active_tuning();
        let rate_index = store.active_rate();
        debug_assert!(tuning_index < PROFILE_COUNT);
        debug_assert!(rate_index < RATE_PROFILE_COUNT);
        Self {
            tuning_index,
            rate_index,
        }
    }

    /// Committed 0-based tuning-profile index.
    pub fn tuning_index(&self) -> usize {
        self.tuning_index
    }

    /// Committed 0-based rate-profile index.
    pub fn rate_index(&self) -> usize {
        self.rate_index
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Commit a tuning-profile selection and propagate it to the runtime
    /// consumer. Subsequent page entries stage from the new record.
    pub fn select_tuning<S: ConfigStore>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Result<(), MenuError> {
        if index >= PROFILE_COUNT {
            return Err(MenuError::InvalidProfileIndex);
        }
        self.tuning_index = index;
        store.activate_tuning(index);
        Ok(())
    }

    /// Commit a rate-profile selection and propagate it.
    pub fn select_rate<S: ConfigStore>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Result<(), MenuError> {
        if index >= RATE_PROFILE_COUNT {
            return Err(MenuError::InvalidProfileIndex);
        }
        self.rate_index = index;
        store.activate_rate(index);
        Ok(())
    }

    // ── Record copy ──────────────────────────────────────────────────

    /// Duplicate one tuning record onto another slot.
    pub fn copy_tuning<S: ConfigStore>(
        &self,
        store: &mut S,
        src: usize,
        dst: usize,
    ) -> Result<(), MenuError> {
        if src >= PROFILE_COUNT || dst >= PROFILE_COUNT {
            return Err(MenuError::InvalidProfileIndex);
        }
        let record = *store.tuning(src);
        *store.tuning_mut(dst) = record;
        Ok(())
    }

    /// Duplicate one rate record onto another slot.
    pub fn copy_rate<S: ConfigStore>(
        &self,
        store: &mut S,
        src: usize,
        dst: usize,
    ) -> Result<(), MenuError> {
        if src >= RATE_PROFILE_COUNT || dst >= RATE_PROFILE_COUNT {
            return Err(MenuError::InvalidProfileIndex);
        }
        let record = *store.rate(src);
        *store.rate_mut(dst) = record;
        Ok(())
    }

    // ── Staging ──────────────────────────────────────────────────────

    /// Populate a page's staged buffer from its bound persistent record.
    ///
    /// Profile-bound pages stage from the record at the committed index;
    /// the top page synthesizes its 1-based selector cells; the copy page
    /// resets its destination selectors to the "none" sentinel.
    pub fn load_into<S: ConfigStore>(&self, store: &S, page: PageId, cells: &mut Cells) {
        match page {
            PageId::Top => {
                cells[select_cell::TUNING] = self.tuning_index as i32 + 1;
                cells[select_cell::RATE] = self.rate_index as i32 + 1;
            }
            PageId::Gains => {
                let t = store.tuning(self.tuning_index);
                cells[gains_cell::SMOOTH_RESPONSE] = t.smooth_response as i32;
                cells[gains_cell::ROLL_P] = t.gains[0].p as i32;
                cells[gains_cell::ROLL_I] = t.gains[0].i as i32;
                cells[gains_cell::ROLL_D] = t.gains[0].d as i32;
                cells[gains_cell::ROLL_F] = t.gains[0].f as i32;
                cells[gains_cell::PITCH_P] = t.gains[1].p as i32;
                cells[gains_cell::PITCH_I] = t.gains[1].i as i32;
                cells[gains_cell::PITCH_D] = t.gains[1].d as i32;
                cells[gains_cell::PITCH_F] = t.gains[1].f as i32;
                cells[gains_cell::YAW_P] = t.gains[2].p as i32;
                cells[gains_cell::YAW_I] = t.gains[2].i as i32;
                cells[gains_cell::YAW_D] = t.gains[2].d as i32;
                cells[gains_cell::YAW_F] = t.gains[2].f as i32;
                cells[gains_cell::I_DECAY] = t.i_decay as i32;
                cells[gains_cell::RESPONSE_WEIGHT] = t.response_weight as i32;
            }
            PageId::TuningMisc => {
                let t = store.tuning(self.tuning_index);
                cells[misc_cell::FF_TRANSITION] = t.feedforward_transition as i32;
                cells[misc_cell::LEVEL_STRENGTH] = t.level_strength as i32;
                cells[misc_cell::HORIZON_STRENGTH] = t.horizon_strength as i32;
                cells[misc_cell::HORIZON_TRANSITION] = t.horizon_transition as i32;
                cells[misc_cell::ITERM_ACCEL_GAIN] = t.iterm_accel_gain as i32;
                cells[misc_cell::ITERM_THROTTLE_THRESHOLD] = t.iterm_throttle_threshold as i32;
                cells[misc_cell::THROTTLE_BOOST] = t.throttle_boost as i32;
            }
            PageId::FilterProfile => {
                let t = store.tuning(self.tuning_index);
                cells[filter_profile_cell::DTERM_LOWPASS_HZ] = t.dterm_lowpass_hz as i32;
                cells[filter_profile_cell::DTERM_LOWPASS2_HZ] = t.dterm_lowpass2_hz as i32;
                cells[filter_profile_cell::DTERM_NOTCH_HZ] = t.dterm_notch_hz as i32;
                cells[filter_profile_cell::DTERM_NOTCH_CUTOFF_HZ] = t.dterm_notch_cutoff_hz as i32;
                cells[filter_profile_cell::YAW_LOWPASS_HZ] = t.yaw_lowpass_hz as i32;
            }
            PageId::FilterGlobal => {
                let f = store.filters();
                cells[filter_global_cell::GYRO_LOWPASS_HZ] = f.gyro_lowpass_hz as i32;
                cells[filter_global_cell::GYRO_LOWPASS2_HZ] = f.gyro_lowpass2_hz as i32;
                cells[filter_global_cell::NOTCH1_HZ] = f.notch1_hz as i32;
                cells[filter_global_cell::NOTCH1_CUTOFF_HZ] = f.notch1_cutoff_hz as i32;
                cells[filter_global_cell::NOTCH2_HZ] = f.notch2_hz as i32;
                cells[filter_global_cell::NOTCH2_CUTOFF_HZ] = f.notch2_cutoff_hz as i32;
                cells[filter_global_cell::KALMAN_Q] = f.kalman_q as i32;
                cells[filter_global_cell::KALMAN_W] = f.kalman_w as i32;
            }
            PageId::ImufFilter => {
                let f = store.filters();
                cells[imuf_cell::W] = f.imuf_w as i32;
                cells[imuf_cell::ROLL_Q] = f.imuf_roll_q as i32;
                cells[imuf_cell::PITCH_Q] = f.imuf_pitch_q as i32;
                cells[imuf_cell::YAW_Q] = f.imuf_yaw_q as i32;
                cells[imuf_cell::ROLL_LPF] = f.imuf_roll_lpf_cutoff_hz as i32;
                cells[imuf_cell::PITCH_LPF] = f.imuf_pitch_lpf_cutoff_hz as i32;
                cells[imuf_cell::YAW_LPF] = f.imuf_yaw_lpf_cutoff_hz as i32;
                cells[imuf_cell::ACC_LPF] = f.imuf_acc_lpf_cutoff_hz as i32;
            }
            PageId::RateCurve => {
                let r = store.rate(self.rate_index);
                cells[rate_cell::RC_RATE_ROLL] = r.rc_rates[0] as i32;
                cells[rate_cell::RC_RATE_PITCH] = r.rc_rates[1] as i32;
                cells[rate_cell::RC_RATE_YAW] = r.rc_rates[2] as i32;
                cells[rate_cell::SUPER_ROLL] = r.super_rates[0] as i32;
                cells[rate_cell::SUPER_PITCH] = r.super_rates[1] as i32;
                cells[rate_cell::SUPER_YAW] = r.super_rates[2] as i32;
                cells[rate_cell::EXPO_ROLL] = r.rc_expo[0] as i32;
                cells[rate_cell::EXPO_PITCH] = r.rc_expo[1] as i32;
                cells[rate_cell::EXPO_YAW] = r.rc_expo[2] as i32;
                cells[rate_cell::THROTTLE_MID] = r.throttle_mid as i32;
                cells[rate_cell::THROTTLE_EXPO] = r.throttle_expo as i32;
                cells[rate_cell::DYN_THROTTLE] = r.dyn_throttle as i32;
                cells[rate_cell::TPA_BREAKPOINT] = r.tpa_breakpoint as i32;
            }
            PageId::CopyProfile => {
                cells[copy_cell::TUNING_TARGET] = 0;
                cells[copy_cell::RATE_TARGET] = 0;
            }
        }
    }

    // ── Commit ───────────────────────────────────────────────────────

    /// Flush a page's staged buffer back to its bound persistent record
    /// and fire the matching change notification.
    ///
    /// Widget clamping guarantees every staged cell already lies in its
    /// field's committed range, so the narrowing casts here cannot
    /// truncate.
    pub fn commit_from<S: ConfigStore>(&self, store: &mut S, page: PageId, cells: &Cells) {
        match page {
            PageId::Top => {
                // Selector hooks already moved the committed indices;
                // leaving the page re-propagates them to the runtime
                // consumers.
                store.activate_tuning(self.tuning_index);
                store.activate_rate(self.rate_index);
            }
            PageId::Gains => {
                let index = self.tuning_index;
                let t = store.tuning_mut(index);
                t.smooth_response = cells[gains_cell::SMOOTH_RESPONSE] as u8;
                t.gains[0].p = cells[gains_cell::ROLL_P] as u8;
                t.gains[0].i = cells[gains_cell::ROLL_I] as u8;
                t.gains[0].d = cells[gains_cell::ROLL_D] as u8;
                t.gains[0].f = cells[gains_cell::ROLL_F] as u16;
                t.gains[1].p = cells[gains_cell::PITCH_P] as u8;
                t.gains[1].i = cells[gains_cell::PITCH_I] as u8;
                t.gains[1].d = cells[gains_cell::PITCH_D] as u8;
                t.gains[1].f = cells[gains_cell::PITCH_F] as u16;
                t.gains[2].p = cells[gains_cell::YAW_P] as u8;
                t.gains[2].i = cells[gains_cell::YAW_I] as u8;
                t.gains[2].d = cells[gains_cell::YAW_D] as u8;
                t.gains[2].f = cells[gains_cell::YAW_F] as u16;
                t.i_decay = cells[gains_cell::I_DECAY] as u8;
                t.response_weight = cells[gains_cell::RESPONSE_WEIGHT] as u8;
                store.tuning_changed(index);
            }
            PageId::TuningMisc => {
                let index = self.tuning_index;
                let t = store.tuning_mut(index);
                t.feedforward_transition = cells[misc_cell::FF_TRANSITION] as u8;
                t.level_strength = cells[misc_cell::LEVEL_STRENGTH] as u8;
                t.horizon_strength = cells[misc_cell::HORIZON_STRENGTH] as u8;
                t.horizon_transition = cells[misc_cell::HORIZON_TRANSITION] as u8;
                t.iterm_accel_gain = cells[misc_cell::ITERM_ACCEL_GAIN] as u16;
                t.iterm_throttle_threshold = cells[misc_cell::ITERM_THROTTLE_THRESHOLD] as u16;
                t.throttle_boost = cells[misc_cell::THROTTLE_BOOST] as u8;
                store.tuning_changed(index);
            }
            PageId::FilterProfile => {
                let index = self.tuning_index;
                let t = store.tuning_mut(index);
                t.dterm_lowpass_hz = cells[filter_profile_cell::DTERM_LOWPASS_HZ] as u16;
                t.dterm_lowpass2_hz = cells[filter_profile_cell::DTERM_LOWPASS2_HZ] as u16;
                t.dterm_notch_hz = cells[filter_profile_cell::DTERM_NOTCH_HZ] as u16;
                t.dterm_notch_cutoff_hz = cells[filter_profile_cell::DTERM_NOTCH_CUTOFF_HZ] as u16;
                t.yaw_lowpass_hz = cells[filter_profile_cell::YAW_LOWPASS_HZ] as u16;
                store.tuning_changed(index);
            }
            PageId::FilterGlobal => {
                let f = store.filters_mut();
                f.gyro_lowpass_hz = cells[filter_global_cell::GYRO_LOWPASS_HZ] as u16;
                f.gyro_lowpass2_hz = cells[filter_global_cell::GYRO_LOWPASS2_HZ] as u16;
                f.notch1_hz = cells[filter_global_cell::NOTCH1_HZ] as u16;
                f.notch1_cutoff_hz = cells[filter_global_cell::NOTCH1_CUTOFF_HZ] as u16;
                f.notch2_hz = cells[filter_global_cell::NOTCH2_HZ] as u16;
                f.notch2_cutoff_hz = cells[filter_global_cell::NOTCH2_CUTOFF_HZ] as u16;
                f.kalman_q = cells[filter_global_cell::KALMAN_Q] as u16;
                f.kalman_w = cells[filter_global_cell::KALMAN_W] as u16;
                store.filters_changed();
            }
            PageId::ImufFilter => {
                // Fusion-chip settings are loaded into the IMU-F at
                // boot; the reboot the page's save row requests applies
                // them, so no runtime recompute fires here.
                let f = store.filters_mut();
                f.imuf_w = cells[imuf_cell::W] as u16;
                f.imuf_roll_q = cells[imuf_cell::ROLL_Q] as u16;
                f.imuf_pitch_q = cells[imuf_cell::PITCH_Q] as u16;
                f.imuf_yaw_q = cells[imuf_cell::YAW_Q] as u16;
                f.imuf_roll_lpf_cutoff_hz = cells[imuf_cell::ROLL_LPF] as u16;
                f.imuf_pitch_lpf_cutoff_hz = cells[imuf_cell::PITCH_LPF] as u16;
                f.imuf_yaw_lpf_cutoff_hz = cells[imuf_cell::YAW_LPF] as u16;
                f.imuf_acc_lpf_cutoff_hz = cells[imuf_cell::ACC_LPF] as u16;
            }
            PageId::RateCurve => {
                // Rate coefficients are read directly by the stick
                // mapping each loop; no derived state to recompute.
                let r = store.rate_mut(self.rate_index);
                r.rc_rates[0] = cells[rate_cell::RC_RATE_ROLL] as u8;
                r.rc_rates[1] = cells[rate_cell::RC_RATE_PITCH] as u8;
                r.rc_rates[2] = cells[rate_cell::RC_RATE_YAW] as u8;
                r.super_rates[0] = cells[rate_cell::SUPER_ROLL] as u8;
                r.super_rates[1] = cells[rate_cell::SUPER_PITCH] as u8;
                r.super_rates[2] = cells[rate_cell::SUPER_YAW] as u8;
                r.rc_expo[0] = cells[rate_cell::EXPO_ROLL] as u8;
                r.rc_expo[1] = cells[rate_cell::EXPO_PITCH] as u8;
                r.rc_expo[2] = cells[rate_cell::EXPO_YAW] as u8;
                r.throttle_mid = cells[rate_cell::THROTTLE_MID] as u8;
                r.throttle_expo = cells[rate_cell::THROTTLE_EXPO] as u8;
                r.dyn_throttle = cells[rate_cell::DYN_THROTTLE] as u8;
                r.tpa_breakpoint = cells[rate_cell::TPA_BREAKPOINT] as u16;
            }
            PageId::CopyProfile => {
                // Destination selectors are scratch state; nothing to flush.
            }
        }
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
    fn new_mirrors_boot_indices() {
        let mut store = RamConfigStore::default();
        store.activate_tuning(2);
        store.activate_rate(1);

        let binding = ProfileBinding::new(&store);
        assert_eq!(binding.tuning_index(), 2);
        assert_eq!(binding.rate_index(), 1);
    }

    #[test]
    fn select_propagates_to_store() {
        let (mut store, mut binding) = fresh();

        binding.select_tuning(&mut store, 1).unwrap();
        assert_eq!(binding.tuning_index(), 1);
        assert_eq!(store.active_tuning(), 1);

        binding.select_rate(&mut store, 2).unwrap();
        assert_eq!(store.active_rate(), 2);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let (mut store, mut binding) = fresh();

        assert_eq!(
            binding.select_tuning(&mut store, PROFILE_COUNT),
            Err(MenuError::InvalidProfileIndex)
        );
        // Committed state untouched on failure.
        assert_eq!(binding.tuning_index(), 0);
        assert_eq!(store.active_tuning(), 0);
    }

    #[test]
    fn load_stages_the_selected_record_only() {
        let (mut store, mut binding) = fresh();
        store.tuning_mut(2).gains[0].p = 123;
        binding.select_tuning(&mut store, 2).unwrap();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::Gains, &mut cells);
        assert_eq!(cells[gains_cell::ROLL_P], 123);

        binding.select_tuning(&mut store, 0).unwrap();
        binding.load_into(&store, PageId::Gains, &mut cells);
        assert_eq!(cells[gains_cell::ROLL_P], 45);
    }

    #[test]
    fn load_then_commit_is_identity() {
        // Staged-copy-then-commit with no edits leaves every record
        // field-for-field unchanged.
        let (mut store, binding) = fresh();
        let before = store.clone();

        for page in [
            PageId::Gains,
            PageId::TuningMisc,
            PageId::FilterProfile,
            PageId::FilterGlobal,
            PageId::ImufFilter,
            PageId::RateCurve,
        ] {
            let mut cells = [0; MAX_CELLS];
            binding.load_into(&store, page, &mut cells);
            binding.commit_from(&mut store, page, &cells);
        }

        assert_eq!(*store.tuning(0), *before.tuning(0));
        assert_eq!(*store.rate(0), *before.rate(0));
        assert_eq!(*store.filters(), *before.filters());
    }

    #[test]
    fn commit_gains_writes_and_notifies() {
        let (mut store, binding) = fresh();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::Gains, &mut cells);
        cells[gains_cell::ROLL_P] = 48;
        cells[gains_cell::YAW_F] = 777;
        binding.commit_from(&mut store, PageId::Gains, &cells);

        assert_eq!(store.tuning(0).gains[0].p, 48);
        assert_eq!(store.tuning(0).gains[2].f, 777);
        assert_eq!(store.tuning_notifications, 1);
        assert_eq!(store.last_notified_tuning, Some(0));
    }

    #[test]
    fn commit_filters_notifies_filter_chain() {
        let (mut store, binding) = fresh();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::FilterGlobal, &mut cells);
        cells[filter_global_cell::GYRO_LOWPASS_HZ] = 90;
        binding.commit_from(&mut store, PageId::FilterGlobal, &cells);

        assert_eq!(store.filters().gyro_lowpass_hz, 90);
        assert_eq!(store.filter_notifications, 1);
        assert_eq!(store.tuning_notifications, 0);
    }

    #[test]
    fn imuf_commit_writes_without_notifying() {
        // Fusion settings apply at the post-reboot init, so the commit
        // must not trigger a runtime filter recompute.
        let (mut store, binding) = fresh();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::ImufFilter, &mut cells);
        cells[imuf_cell::ROLL_Q] = 8000;
        cells[imuf_cell::W] = 48;
        binding.commit_from(&mut store, PageId::ImufFilter, &cells);

        assert_eq!(store.filters().imuf_roll_q, 8000);
        assert_eq!(store.filters().imuf_w, 48);
        assert_eq!(store.filter_notifications, 0);
        assert_eq!(store.tuning_notifications, 0);
    }

    #[test]
    fn rate_commit_does_not_notify_tuning() {
        let (mut store, binding) = fresh();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::RateCurve, &mut cells);
        cells[rate_cell::TPA_BREAKPOINT] = 1500;
        binding.commit_from(&mut store, PageId::RateCurve, &cells);

        assert_eq!(store.rate(0).tpa_breakpoint, 1500);
        assert_eq!(store.tuning_notifications, 0);
        assert_eq!(store.filter_notifications, 0);
    }

    #[test]
    fn copy_duplicates_record() {
        let (mut store, binding) = fresh();
        store.tuning_mut(0).gains[1].d = 44;

        // Snapshot of src before the copy.
        let src_before = *store.tuning(0);

        binding.copy_tuning(&mut store, 0, 2).unwrap();

        // dst now stages identically to what src staged before the copy.
        assert_eq!(*store.tuning(2), src_before);
        // src untouched.
        assert_eq!(*store.tuning(0), src_before);
    }

    #[test]
    fn copy_rejects_out_of_range() {
        let (mut store, binding) = fresh();
        assert_eq!(
            binding.copy_tuning(&mut store, 0, PROFILE_COUNT),
            Err(MenuError::InvalidProfileIndex)
        );
        assert_eq!(
            binding.copy_rate(&mut store, RATE_PROFILE_COUNT, 0),
            Err(MenuError::InvalidProfileIndex)
        );
    }

    #[test]
    fn top_page_stages_one_based_selectors() {
        let (mut store, mut binding) = fresh();
        binding.select_tuning(&mut store, 2).unwrap();

        let mut cells = [0; MAX_CELLS];
        binding.load_into(&store, PageId::Top, &mut cells);
        assert_eq!(cells[select_cell::TUNING], 3);
        assert_eq!(cells[select_cell::RATE], 1);
    }

    #[test]
    fn copy_page_stages_none_sentinels() {
        let (store, binding) = fresh();

        let mut cells = [7; MAX_CELLS];
        binding.load_into(&store, PageId::CopyProfile, &mut cells);
        assert_eq!(cells[copy_cell::TUNING_TARGET], 0);
        assert_eq!(cells[copy_cell::RATE_TARGET], 0);
    }
}
