//! Persistent configuration records and the store interface.
//!
//! The menu engine never owns configuration durability — checksums, flash
//! wear and load/save live in the firmware's storage layer. This module
//! defines the typed records the menu stages from and commits to, the
//! [`ConfigStore`] trait the storage layer implements, and
//! [`RamConfigStore`], an in-memory implementation used by the test suite
//! and host-side tooling.

use super::{AXIS_COUNT, PROFILE_COUNT, RATE_PROFILE_COUNT};

// ── Records ──────────────────────────────────────────────────────────────

/// Control-loop gain set for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisGains {
    pub p: u8,
    pub i: u8,
    pub d: u8,
    /// Feedforward gain; wider range than the P/I/D triplet.
    pub f: u16,
}

/// One persistent tuning profile: per-axis gains plus the response
/// shaping and per-profile filter fields edited by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuningProfile {
    /// Roll, pitch, yaw gains — indexed by axis everywhere.
    pub gains: [AxisGains; AXIS_COUNT],
    /// Smoothed-response mode (off/on).
    pub smooth_response: u8,
    /// I-term decay rate, 1–10.
    pub i_decay: u8,
    /// Response weight, 1–200.
    pub response_weight: u8,
    /// Feedforward transition, displayed in tenths.
    pub feedforward_transition: u8,
    /// Self-level strength (angle mode).
    pub level_strength: u8,
    /// Horizon-mode strength.
    pub horizon_strength: u8,
    /// Horizon-mode transition.
    pub horizon_transition: u8,
    /// I-term acceleration gain, 1000–30000.
    pub iterm_accel_gain: u16,
    /// Throttle threshold for i-term acceleration, 20–1000.
    pub iterm_throttle_threshold: u16,
    /// Throttle boost strength.
    pub throttle_boost: u8,
    // Per-profile D-term / yaw filter chain.
    pub dterm_lowpass_hz: u16,
    pub dterm_lowpass2_hz: u16,
    pub dterm_notch_hz: u16,
    pub dterm_notch_cutoff_hz: u16,
    pub yaw_lowpass_hz: u16,
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self {
            gains: [
                AxisGains { p: 45, i: 80, d: 30, f: 120 }, // roll
                AxisGains { p: 50, i: 84, d: 32, f: 125 }, // pitch
                AxisGains { p: 60, i: 90, d: 0, f: 120 },  // yaw
            ],
            smooth_response: 0,
            i_decay: 4,
            response_weight: 100,
            feedforward_transition: 0,
            level_strength: 50,
            horizon_strength: 50,
            horizon_transition: 75,
            iterm_accel_gain: 3500,
            iterm_throttle_threshold: 250,
            throttle_boost: 5,
            dterm_lowpass_hz: 150,
            dterm_lowpass2_hz: 150,
            dterm_notch_hz: 0,
            dterm_notch_cutoff_hz: 160,
            yaw_lowpass_hz: 0,
        }
    }
}

/// One persistent rate profile: stick-response curve coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateProfile {
    /// Base rc rates per axis, displayed in tenths.
    pub rc_rates: [u8; AXIS_COUNT],
    /// Super-rate curve factor per axis, displayed in tenths.
    pub super_rates: [u8; AXIS_COUNT],
    /// Expo per axis, displayed in tenths.
    pub rc_expo: [u8; AXIS_COUNT],
    pub throttle_mid: u8,
    pub throttle_expo: u8,
    /// Dynamic throttle PID attenuation, displayed in tenths.
    pub dyn_throttle: u8,
    /// Throttle breakpoint for PID attenuation, 1000–2000.
    pub tpa_breakpoint: u16,
}

impl Default for RateProfile {
    fn default() -> Self {
        Self {
            rc_rates: [100, 100, 100],
            super_rates: [70, 70, 70],
            rc_expo: [0, 0, 0],
            throttle_mid: 50,
            throttle_expo: 0,
            dyn_throttle: 10,
            tpa_breakpoint: 1650,
        }
    }
}

/// Global (non-per-profile) gyro filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfig {
    pub gyro_lowpass_hz: u16,
    pub gyro_lowpass2_hz: u16,
    pub notch1_hz: u16,
    pub notch1_cutoff_hz: u16,
    pub notch2_hz: u16,
    pub notch2_cutoff_hz: u16,
    /// Kalman filter Q, present only on builds with the Kalman stage.
    pub kalman_q: u16,
    /// Kalman filter W, 3–512.
    pub kalman_w: u16,
    // IMU-F fusion chip settings, used only on builds with the chip
    // fitted. Loaded into the chip at boot, so edits take effect after
    // a reboot.
    pub imuf_w: u16,
    pub imuf_roll_q: u16,
    pub imuf_pitch_q: u16,
    pub imuf_yaw_q: u16,
    pub imuf_roll_lpf_cutoff_hz: u16,
    pub imuf_pitch_lpf_cutoff_hz: u16,
    pub imuf_yaw_lpf_cutoff_hz: u16,
    pub imuf_acc_lpf_cutoff_hz: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gyro_lowpass_hz: 150,
            gyro_lowpass2_hz: 0,
            notch1_hz: 0,
            notch1_cutoff_hz: 300,
            notch2_hz: 0,
            notch2_cutoff_hz: 100,
            kalman_q: 400,
            kalman_w: 32,
            imuf_w: 32,
            imuf_roll_q: 6000,
            imuf_pitch_q: 6000,
            imuf_yaw_q: 6000,
            imuf_roll_lpf_cutoff_hz: 120,
            imuf_pitch_lpf_cutoff_hz: 120,
            imuf_yaw_lpf_cutoff_hz: 120,
            imuf_acc_lpf_cutoff_hz: 120,
        }
    }
}

// ── Store interface ──────────────────────────────────────────────────────

/// Interface of the persistent configuration store.
///
/// Indices passed to the record accessors must already be validated —
/// out-of-range access is a caller error, checked by the profile binding
/// layer before a page is entered, and implementations are free to panic.
///
/// The `*_changed` hooks are how the menu triggers dependent
/// recomputation after a commit (filter re-init, loop re-tune); the
/// `activate_*` methods propagate a profile selection to the subsystem
/// consuming the live profile at runtime. [`persist`](Self::persist)
/// requests a write of the live configuration to persistent media.
pub trait ConfigStore {
    fn tuning(&self, index: usize) -> &TuningProfile;
    fn tuning_mut(&mut self, index: usize) -> &mut TuningProfile;
    fn rate(&self, index: usize) -> &RateProfile;
    fn rate_mut(&mut self, index: usize) -> &mut RateProfile;
    fn filters(&self) -> &FilterConfig;
    fn filters_mut(&mut self) -> &mut FilterConfig;

    /// Currently live tuning-profile index (initialized at boot).
    fn active_tuning(&self) -> usize;
    /// Currently live rate-profile index (initialized at boot).
    fn active_rate(&self) -> usize;
    /// Switch which tuning record the control loops consume.
    fn activate_tuning(&mut self, index: usize);
    /// Switch which rate record the stick mapping consumes.
    fn activate_rate(&mut self, index: usize);

    /// A tuning record was committed; recompute derived loop state.
    fn tuning_changed(&mut self, index: usize);
    /// The global filter config was committed; re-init the filter chain.
    fn filters_changed(&mut self);
    /// Request a write of the live configuration to persistent media.
    fn persist(&mut self);
}

// ── In-memory store ──────────────────────────────────────────────────────

/// RAM-backed [`ConfigStore`] with default records.
///
/// Used by the test suite and host-side tooling. The notification and
/// activation counters record the cross-cutting effects the menu is
/// required to trigger, so tests can assert on them.
#[derive(Debug, Clone)]
pub struct RamConfigStore {
    tuning: [TuningProfile; PROFILE_COUNT],
    rates: [RateProfile; RATE_PROFILE_COUNT],
    filters: FilterConfig,
    active_tuning: usize,
    active_rate: usize,
    /// Count of `tuning_changed` notifications received.
    pub tuning_notifications: u32,
    /// Index named by the most recent `tuning_changed`.
    pub last_notified_tuning: Option<usize>,
    /// Count of `filters_changed` notifications received.
    pub filter_notifications: u32,
    /// Count of `persist` requests received.
    pub persist_requests: u32,
}

impl Default for RamConfigStore {
    fn default() -> Self {
        Self {
            tuning: [TuningProfile::default(); PROFILE_COUNT],
            rates: [RateProfile::default(); RATE_PROFILE_COUNT],
            filters: FilterConfig::default(),
            active_tuning: 0,
            active_rate: 0,
            tuning_notifications: 0,
            last_notified_tuning: None,
            filter_notifications: 0,
            persist_requests: 0,
        }
    }
}

impl ConfigStore for RamConfigStore {
    fn tuning(&self, index: usize) -> &TuningProfile {
        &self.tuning[index]
    }

    fn tuning_mut(&mut self, index: usize) -> &mut TuningProfile {
        &mut self.tuning[index]
    }

    fn rate(&self, index: usize) -> &RateProfile {
        &self.rates[index]
    }

    fn rate_mut(&mut self, index: usize) -> &mut RateProfile {
        &mut self.rates[index]
    }

    fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    fn filters_mut(&mut self) -> &mut FilterConfig {
        &mut self.filters
    }

    fn active_tuning(&self) -> usize {
        self.active_tuning
    }

    fn active_rate(&self) -> usize {
        self.active_rate
    }

    fn activate_tuning(&mut self, index: usize) {
        self.active_tuning = index;
    }

    fn activate_rate(&mut self, index: usize) {
        self.active_rate = index;
    }

    fn tuning_changed(&mut self, index: usize) {
        self.tuning_notifications += 1;
        self.last_notified_tuning = Some(index);
    }

    fn filters_changed(&mut self) {
        self.filter_notifications += 1;
    }

    fn persist(&mut self) {
        self.persist_requests += 1;
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_has_independent_records() {
        let mut store = RamConfigStore::default();
        store.tuning_mut(1).gains[0].p = 99;

        assert_eq!(store.tuning(1).gains[0].p, 99);
        assert_eq!(store.tuning(0).gains[0].p, 45);
        assert_eq!(store.tuning(2).gains[0].p, 45);
    }

    #[test]
    fn activation_updates_live_indices() {
        let mut store = RamConfigStore::default();
        assert_eq!(store.active_tuning(), 0);

        store.activate_tuning(2);
        store.activate_rate(1);
        assert_eq!(store.active_tuning(), 2);
        assert_eq!(store.active_rate(), 1);
    }

    #[test]
    fn notifications_are_counted() {
        let mut store = RamConfigStore::default();
        store.tuning_changed(1);
        store.tuning_changed(2);
        store.filters_changed();
        store.persist();

        assert_eq!(store.tuning_notifications, 2);
        assert_eq!(store.last_notified_tuning, Some(2));
        assert_eq!(store.filter_notifications, 1);
        assert_eq!(store.persist_requests, 1);
    }

    #[test]
    fn default_values_lie_within_menu_ranges() {
        let t = TuningProfile::default();
        for g in &t.gains {
            assert!(g.p <= 200 && g.i <= 200 && g.d <= 200);
            assert!(g.f <= 2000);
        }
        assert!((1..=10).contains(&t.i_decay));
        assert!((1..=200).contains(&t.response_weight));
        assert!((1000..=30000).contains(&t.iterm_accel_gain));
        assert!((20..=1000).contains(&t.iterm_throttle_threshold));

        let r = RateProfile::default();
        assert!((1000..=2000).contains(&r.tpa_breakpoint));

        let f = FilterConfig::default();
        assert!((3..=512).contains(&f.kalman_w));
        assert!(f.imuf_w <= 1024);
        assert!(f.imuf_roll_q <= 16000);
        assert!(f.imuf_acc_lpf_cutoff_hz <= 450);
    }
}
