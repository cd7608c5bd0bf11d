//! Declarative page tables for the Tiller overlay menu.
//!
//! Everything here is `const` data: label sets, cell-index bindings and
//! the entry table of each page. The generic engine never special-cases a
//! page — adding a row means adding a cell constant, an entry, and its
//! load/commit mapping in [`ProfileBinding`](super::ProfileBinding).

use super::action::MenuAction;
use super::entry::{Entry, Feature, LabelSuffix};
use super::field::{ChangeHook, EnumField, NumericField};
use super::page::{PageId, PageSpec};
use super::{PROFILE_COUNT, RATE_PROFILE_COUNT};

// ── Label sets ───────────────────────────────────────────────────────────

/// Boolean widget labels.
pub const OFF_ON: &[&str] = &["OFF", "ON"];

/// Copy-destination selector labels; index 0 is the "none" sentinel.
pub const PROFILE_TARGETS: &[&str] = &["-", "1", "2", "3"];

// ── Cell bindings ────────────────────────────────────────────────────────

/// Top page: 1-based profile selectors.
pub mod select_cell {
    pub const TUNING: usize = 0;
    pub const RATE: usize = 1;
}

/// Gains page.
pub mod gains_cell {
    pub const SMOOTH_RESPONSE: usize = 0;
    pub const ROLL_P: usize = 1;
    pub const ROLL_I: usize = 2;
    pub const ROLL_D: usize = 3;
    pub const ROLL_F: usize = 4;
    pub const PITCH_P: usize = 5;
    pub const PITCH_I: usize = 6;
    pub const PITCH_D: usize = 7;
    pub const PITCH_F: usize = 8;
    pub const YAW_P: usize = 9;
    pub const YAW_I: usize = 10;
    pub const YAW_D: usize = 11;
    pub const YAW_F: usize = 12;
    pub const I_DECAY: usize = 13;
    pub const RESPONSE_WEIGHT: usize = 14;
}

/// Tuning-misc page.
pub mod misc_cell {
    pub const FF_TRANSITION: usize = 0;
    pub const LEVEL_STRENGTH: usize = 1;
    pub const HORIZON_STRENGTH: usize = 2;
    pub const HORIZON_TRANSITION: usize = 3;
    pub const ITERM_ACCEL_GAIN: usize = 4;
    pub const ITERM_THROTTLE_THRESHOLD: usize = 5;
    pub const THROTTLE_BOOST: usize = 6;
}

/// Per-profile filter page.
pub mod filter_profile_cell {
    pub const DTERM_LOWPASS_HZ: usize = 0;
    pub const DTERM_LOWPASS2_HZ: usize = 1;
    pub const DTERM_NOTCH_HZ: usize = 2;
    pub const DTERM_NOTCH_CUTOFF_HZ: usize = 3;
    pub const YAW_LOWPASS_HZ: usize = 4;
}

/// Global filter page.
pub mod filter_global_cell {
    pub const GYRO_LOWPASS_HZ: usize = 0;
    pub const GYRO_LOWPASS2_HZ: usize = 1;
    pub const NOTCH1_HZ: usize = 2;
    pub const NOTCH1_CUTOFF_HZ: usize = 3;
    pub const NOTCH2_HZ: usize = 4;
    pub const NOTCH2_CUTOFF_HZ: usize = 5;
    pub const KALMAN_Q: usize = 6;
    pub const KALMAN_W: usize = 7;
}

/// IMU-F fusion filter page.
pub mod imuf_cell {
    pub const W: usize = 0;
    pub const ROLL_Q: usize = 1;
    pub const PITCH_Q: usize = 2;
    pub const YAW_Q: usize = 3;
    pub const ROLL_LPF: usize = 4;
    pub const PITCH_LPF: usize = 5;
    pub const YAW_LPF: usize = 6;
    pub const ACC_LPF: usize = 7;
}

/// Rate page.
pub mod rate_cell {
    pub const RC_RATE_ROLL: usize = 0;
    pub const RC_RATE_PITCH: usize = 1;
    pub const RC_RATE_YAW: usize = 2;
    pub const SUPER_ROLL: usize = 3;
    pub const SUPER_PITCH: usize = 4;
    pub const SUPER_YAW: usize = 5;
    pub const EXPO_ROLL: usize = 6;
    pub const EXPO_PITCH: usize = 7;
    pub const EXPO_YAW: usize = 8;
    pub const THROTTLE_MID: usize = 9;
    pub const THROTTLE_EXPO: usize = 10;
    pub const DYN_THROTTLE: usize = 11;
    pub const TPA_BREAKPOINT: usize = 12;
}

/// Copy page: 1-based destination selectors, 0 = none.
pub mod copy_cell {
    pub const TUNING_TARGET: usize = 0;
    pub const RATE_TARGET: usize = 1;
}

// ── Page tables ──────────────────────────────────────────────────────────

const TOP_ENTRIES: &[Entry] = &[
    Entry::heading("-- PROFILE --", LabelSuffix::None),
    Entry::numeric(
        "TUNE PROF",
        NumericField::bounded(select_cell::TUNING, 1, PROFILE_COUNT as i32, 1)
            .with_hook(ChangeHook::SelectTuningProfile),
    ),
    Entry::submenu("GAINS", PageId::Gains),
    Entry::submenu("MISC PP", PageId::TuningMisc),
    Entry::submenu("FILT PP", PageId::FilterProfile),
    Entry::numeric(
        "RATE PROF",
        NumericField::bounded(select_cell::RATE, 1, RATE_PROFILE_COUNT as i32, 1)
            .with_hook(ChangeHook::SelectRateProfile),
    ),
    Entry::submenu("RATES", PageId::RateCurve),
    Entry::submenu("FILT GLB", PageId::FilterGlobal),
    Entry::submenu("IMUF", PageId::ImufFilter).gated(Feature::ImufFilter),
    Entry::submenu("COPY PROF", PageId::CopyProfile).gated(Feature::ProfileCopy),
    Entry::back(),
];

const GAINS_ENTRIES: &[Entry] = &[
    Entry::heading("-- GAINS --", LabelSuffix::TuningProfile),
    Entry::enumerated("SMOOTH", EnumField::with_labels(gains_cell::SMOOTH_RESPONSE, OFF_ON)),
    Entry::numeric("ROLL  P", NumericField::bounded(gains_cell::ROLL_P, 0, 200, 1)),
    Entry::numeric("ROLL  I", NumericField::bounded(gains_cell::ROLL_I, 0, 200, 1)),
    Entry::numeric("ROLL  D", NumericField::bounded(gains_cell::ROLL_D, 0, 200, 1)),
    Entry::numeric("ROLL  F", NumericField::bounded(gains_cell::ROLL_F, 0, 2000, 1)),
    Entry::numeric("PITCH P", NumericField::bounded(gains_cell::PITCH_P, 0, 200, 1)),
    Entry::numeric("PITCH I", NumericField::bounded(gains_cell::PITCH_I, 0, 200, 1)),
    Entry::numeric("PITCH D", NumericField::bounded(gains_cell::PITCH_D, 0, 200, 1)),
    Entry::numeric("PITCH F", NumericField::bounded(gains_cell::PITCH_F, 0, 2000, 1)),
    Entry::numeric("YAW   P", NumericField::bounded(gains_cell::YAW_P, 0, 200, 1)),
    Entry::numeric("YAW   I", NumericField::bounded(gains_cell::YAW_I, 0, 200, 1)),
    Entry::numeric("YAW   D", NumericField::bounded(gains_cell::YAW_D, 0, 200, 1)),
    Entry::numeric("YAW   F", NumericField::bounded(gains_cell::YAW_F, 0, 2000, 1)),
    Entry::numeric("I DECAY", NumericField::bounded(gains_cell::I_DECAY, 1, 10, 1)),
    Entry::numeric("RESP WGT", NumericField::bounded(gains_cell::RESPONSE_WEIGHT, 1, 200, 1)),
    Entry::back(),
    Entry::action("SAVE&EXIT", MenuAction::SaveExit),
];

const TUNING_MISC_ENTRIES: &[Entry] = &[
    Entry::heading("-- MISC PP --", LabelSuffix::TuningProfile),
    Entry::numeric("FF TRANS", NumericField::scaled(misc_cell::FF_TRANSITION, 0, 100, 1, 10)),
    Entry::numeric("ANGLE STR", NumericField::bounded(misc_cell::LEVEL_STRENGTH, 0, 200, 1)),
    Entry::numeric("HORZN STR", NumericField::bounded(misc_cell::HORIZON_STRENGTH, 0, 200, 1)),
    Entry::numeric("HORZN TRS", NumericField::bounded(misc_cell::HORIZON_TRANSITION, 0, 200, 1)),
    Entry::numeric("AG GAIN", NumericField::bounded(misc_cell::ITERM_ACCEL_GAIN, 1000, 30000, 10)),
    Entry::numeric("AG THR", NumericField::bounded(misc_cell::ITERM_THROTTLE_THRESHOLD, 20, 1000, 1)),
    Entry::numeric("THR BOOST", NumericField::bounded(misc_cell::THROTTLE_BOOST, 0, 100, 1))
        .gated(Feature::ThrottleBoost),
    Entry::back(),
];

const FILTER_PROFILE_ENTRIES: &[Entry] = &[
    Entry::heading("-- FILTER PP --", LabelSuffix::TuningProfile),
    Entry::numeric("DTERM LPF", NumericField::bounded(filter_profile_cell::DTERM_LOWPASS_HZ, 0, 500, 1)),
    Entry::numeric("DTERM LPF2", NumericField::bounded(filter_profile_cell::DTERM_LOWPASS2_HZ, 0, 500, 1)),
    Entry::numeric("DTERM NF", NumericField::bounded(filter_profile_cell::DTERM_NOTCH_HZ, 0, 500, 1)),
    Entry::numeric("DTERM NFCO", NumericField::bounded(filter_profile_cell::DTERM_NOTCH_CUTOFF_HZ, 0, 500, 1)),
    Entry::numeric("YAW LPF", NumericField::bounded(filter_profile_cell::YAW_LOWPASS_HZ, 0, 500, 1)),
    Entry::back(),
];

const FILTER_GLOBAL_ENTRIES: &[Entry] = &[
    Entry::heading("-- FILTER GLB --", LabelSuffix::None),
    Entry::numeric("GYRO LPF", NumericField::bounded(filter_global_cell::GYRO_LOWPASS_HZ, 0, 16000, 1)),
    Entry::numeric("GYRO LPF2", NumericField::bounded(filter_global_cell::GYRO_LOWPASS2_HZ, 0, 16000, 1)),
    Entry::numeric("GYRO NF1", NumericField::bounded(filter_global_cell::NOTCH1_HZ, 0, 500, 1)),
    Entry::numeric("GYRO NF1C", NumericField::bounded(filter_global_cell::NOTCH1_CUTOFF_HZ, 0, 500, 1)),
    Entry::numeric("GYRO NF2", NumericField::bounded(filter_global_cell::NOTCH2_HZ, 0, 500, 1)),
    Entry::numeric("GYRO NF2C", NumericField::bounded(filter_global_cell::NOTCH2_CUTOFF_HZ, 0, 500, 1)),
    Entry::numeric("KALMAN Q", NumericField::bounded(filter_global_cell::KALMAN_Q, 0, 16000, 1))
        .gated(Feature::GyroKalman),
    Entry::numeric("KALMAN W", NumericField::bounded(filter_global_cell::KALMAN_W, 3, 512, 1))
        .gated(Feature::GyroKalman),
    Entry::back(),
];

const IMUF_ENTRIES: &[Entry] = &[
    Entry::heading("-- SPRING IMU-F --", LabelSuffix::None),
    Entry::heading("-- CHANGES REQUIRE REBOOT --", LabelSuffix::None),
    Entry::numeric("IMUF W", NumericField::bounded(imuf_cell::W, 0, 1024, 1)),
    Entry::numeric("ROLL Q", NumericField::bounded(imuf_cell::ROLL_Q, 0, 16000, 50)),
    Entry::numeric("PITCH Q", NumericField::bounded(imuf_cell::PITCH_Q, 0, 16000, 50)),
    Entry::numeric("YAW Q", NumericField::bounded(imuf_cell::YAW_Q, 0, 16000, 50)),
    Entry::numeric("ROLL LPF", NumericField::bounded(imuf_cell::ROLL_LPF, 0, 450, 1)),
    Entry::numeric("PITCH LPF", NumericField::bounded(imuf_cell::PITCH_LPF, 0, 450, 1)),
    Entry::numeric("YAW LPF", NumericField::bounded(imuf_cell::YAW_LPF, 0, 450, 1)),
    Entry::numeric("IMUF ACC", NumericField::bounded(imuf_cell::ACC_LPF, 0, 450, 1)),
    Entry::back(),
    Entry::action("SAVE&REBOOT", MenuAction::SaveReboot),
];

const RATE_CURVE_ENTRIES: &[Entry] = &[
    Entry::heading("-- RATES --", LabelSuffix::TuningAndRate),
    Entry::numeric("RC R RATE", NumericField::scaled(rate_cell::RC_RATE_ROLL, 0, 255, 1, 10)),
    Entry::numeric("RC P RATE", NumericField::scaled(rate_cell::RC_RATE_PITCH, 0, 255, 1, 10)),
    Entry::numeric("RC Y RATE", NumericField::scaled(rate_cell::RC_RATE_YAW, 0, 255, 1, 10)),
    Entry::numeric("ROLL SUPER", NumericField::scaled(rate_cell::SUPER_ROLL, 0, 100, 1, 10)),
    Entry::numeric("PITCH SUPER", NumericField::scaled(rate_cell::SUPER_PITCH, 0, 100, 1, 10)),
    Entry::numeric("YAW SUPER", NumericField::scaled(rate_cell::SUPER_YAW, 0, 100, 1, 10)),
    Entry::numeric("RC R EXPO", NumericField::scaled(rate_cell::EXPO_ROLL, 0, 100, 1, 10)),
    Entry::numeric("RC P EXPO", NumericField::scaled(rate_cell::EXPO_PITCH, 0, 100, 1, 10)),
    Entry::numeric("RC Y EXPO", NumericField::scaled(rate_cell::EXPO_YAW, 0, 100, 1, 10)),
    Entry::numeric("THR MID", NumericField::bounded(rate_cell::THROTTLE_MID, 0, 100, 1)),
    Entry::numeric("THR EXPO", NumericField::bounded(rate_cell::THROTTLE_EXPO, 0, 100, 1)),
    Entry::numeric("THR ATT", NumericField::scaled(rate_cell::DYN_THROTTLE, 0, 100, 1, 10)),
    Entry::numeric("TPA BRKPT", NumericField::bounded(rate_cell::TPA_BREAKPOINT, 1000, 2000, 10)),
    Entry::back(),
];

const COPY_PROFILE_ENTRIES: &[Entry] = &[
    Entry::heading("-- COPY PROFILE --", LabelSuffix::None),
    Entry::enumerated("TUNE PROF TO", EnumField::with_labels(copy_cell::TUNING_TARGET, PROFILE_TARGETS)),
    Entry::action("COPY TUNE", MenuAction::CopyTuning),
    Entry::enumerated("RATE PROF TO", EnumField::with_labels(copy_cell::RATE_TARGET, PROFILE_TARGETS)),
    Entry::action("COPY RATE", MenuAction::CopyRate),
    Entry::back(),
];

static TOP: PageSpec = PageSpec { id: PageId::Top, entries: TOP_ENTRIES };
static GAINS: PageSpec = PageSpec { id: PageId::Gains, entries: GAINS_ENTRIES };
static TUNING_MISC: PageSpec = PageSpec { id: PageId::TuningMisc, entries: TUNING_MISC_ENTRIES };
static FILTER_PROFILE: PageSpec = PageSpec { id: PageId::FilterProfile, entries: FILTER_PROFILE_ENTRIES };
static FILTER_GLOBAL: PageSpec = PageSpec { id: PageId::FilterGlobal, entries: FILTER_GLOBAL_ENTRIES };
static IMUF: PageSpec = PageSpec { id: PageId::ImufFilter, entries: IMUF_ENTRIES };
static RATE_CURVE: PageSpec = PageSpec { id: PageId::RateCurve, entries: RATE_CURVE_ENTRIES };
static COPY_PROFILE: PageSpec = PageSpec { id: PageId::CopyProfile, entries: COPY_PROFILE_ENTRIES };

/// Static template for a page id.
pub fn spec(id: PageId) -> &'static PageSpec {
    match id {
        PageId::Top => &TOP,
        PageId::Gains => &GAINS,
        PageId::TuningMisc => &TUNING_MISC,
        PageId::FilterProfile => &FILTER_PROFILE,
        PageId::FilterGlobal => &FILTER_GLOBAL,
        PageId::ImufFilter => &IMUF,
        PageId::RateCurve => &RATE_CURVE,
        PageId::CopyProfile => &COPY_PROFILE,
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────
