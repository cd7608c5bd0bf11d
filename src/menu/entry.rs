//! Page entries: one displayable, navigable row of a menu page.
//!
//! Entries are ordered; order is both display order and tab order. The
//! closed [`EntryKind`] variant replaces the original firmware's
//! pointer-plus-type-tag rows — exhaustive matching replaces runtime type
//! inspection, and the terminator row disappears because slices carry
//! their length.

use super::action::MenuAction;
use super::field::{EnumField, NumericField};
use super::page::PageId;

// ── Feature gating ───────────────────────────────────────────────────────

/// Optional firmware features an entry's presence may depend on.
///
/// The original menu hid these rows at compile time; here the build's
/// feature set is fixed when the [`Menu`](super::Menu) is constructed and
/// hidden rows are skipped by focus movement and the render feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    /// Throttle-boost shaping is compiled into the control loop.
    ThrottleBoost,
    /// Kalman gyro filter stage is available.
    GyroKalman,
    /// IMU-F fusion filter chip is fitted. Such builds omit the Kalman
    /// stage, so this and [`GyroKalman`](Self::GyroKalman) are never
    /// both set on real hardware.
    ImufFilter,
    /// Profile-copy page is enabled.
    ProfileCopy,
}

/// Which optional features this build carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureSet {
    pub throttle_boost: bool,
    pub gyro_kalman: bool,
    pub imuf_filter: bool,
    pub profile_copy: bool,
}

impl FeatureSet {
    /// Everything enabled. A superset no real build ships (Kalman and
    /// IMU-F are exclusive), used to exercise every gated row.
    pub const fn all() -> Self {
        Self {
            throttle_boost: true,
            gyro_kalman: true,
            imuf_filter: true,
            profile_copy: true,
        }
    }

    /// Minimal build: every gated row hidden.
    pub const fn none() -> Self {
        Self {
            throttle_boost: false,
            gyro_kalman: false,
            imuf_filter: false,
            profile_copy: false,
        }
    }

    pub fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::ThrottleBoost => self.throttle_boost,
            Feature::GyroKalman => self.gyro_kalman,
            Feature::ImufFilter => self.imuf_filter,
            Feature::ProfileCopy => self.profile_copy,
        }
    }
}

/// Visibility predicate of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    Always,
    /// Shown only when the named feature is enabled.
    Requires(Feature),
}

// ── Entry ────────────────────────────────────────────────────────────────

/// Live profile index a heading appends to its title, e.g. `-- GAINS -- 2`.
///
/// The original mutated static suffix strings from its enter hooks; here
/// the suffix is a derived display value composed by the render feed from
/// the committed profile indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelSuffix {
    None,
    /// 1-based tuning-profile index, e.g. ` 2`.
    TuningProfile,
    /// 1-based tuning and rate indices, e.g. ` 2-1`.
    TuningAndRate,
}

/// What an entry does when focused and activated.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// Non-focusable title row.
    Heading(LabelSuffix),
    /// Bounded numeric field widget.
    Numeric(NumericField),
    /// Enumerated / boolean field widget.
    Enum(EnumField),
    /// Link descending into a child page.
    SubPage(PageId),
    /// Side-effecting action trigger.
    Action(MenuAction),
    /// Ascend to the parent page (committing the staged buffer).
    Back,
}

/// One row of a page: label, behavior, visibility.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Entry {
    pub label: &'static str,
    pub kind: EntryKind,
    pub shown: Visibility,
}

impl Entry {
    pub const fn heading(label: &'static str, suffix: LabelSuffix) -> Self {
        Self {
            label,
            kind: EntryKind::Heading(suffix),
            shown: Visibility::Always,
        }
    }

    pub const fn numeric(label: &'static str, field: NumericField) -> Self {
        Self {
            label,
            kind: EntryKind::Numeric(field),
            shown: Visibility::Always,
        }
    }

    pub const fn enumerated(label: &'static str, field: EnumField) -> Self {
        Self {
            label,
            kind: EntryKind::Enum(field),
            shown: Visibility::Always,
        }
    }

    pub const fn submenu(label: &'static str, page: PageId) -> Self {
        Self {
            label,
            kind: EntryKind::SubPage(page),
            shown: Visibility::Always,
        }
    }

    pub const fn action(label: &'static str, action: MenuAction) -> Self {
        Self {
            label,
            kind: EntryKind::Action(action),
            shown: Visibility::Always,
        }
    }

    pub const fn back() -> Self {
        Self {
            label: "BACK",
            kind: EntryKind::Back,
            shown: Visibility::Always,
        }
    }

    /// Gate this entry on a firmware feature.
    pub const fn gated(mut self, feature: Feature) -> Self {
        self.shown = Visibility::Requires(feature);
        self
    }

    /// Whether this entry is shown under the given feature set.
    pub fn visible(&self, features: &FeatureSet) -> bool {
        match self.shown {
            Visibility::Always => true,
            Visibility::Requires(feature) => features.enabled(feature),
        }
    }

    /// Whether focus may rest on this entry. Headings are display-only.
    pub fn focusable(&self) -> bool {
        !matches!(self.kind, EntryKind::Heading(_))
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_not_focusable() {
        let e = Entry::heading("-- GAINS --", LabelSuffix::TuningProfile);
        assert!(!e.focusable());
        assert!(e.visible(&FeatureSet::none()));
    }

    #[test]
    fn widgets_links_and_back_are_focusable() {
        assert!(Entry::numeric("X", NumericField::bounded(0, 0, 1, 1)).focusable());
        assert!(Entry::submenu("X", PageId::Gains).focusable());
        assert!(Entry::action("X", MenuAction::SaveExit).focusable());
        assert!(Entry::back().focusable());
    }

    #[test]
    fn gated_entry_follows_feature_set() {
        let e = Entry::numeric("THR BOOST", NumericField::bounded(6, 0, 100, 1))
            .gated(Feature::ThrottleBoost);

        assert!(e.visible(&FeatureSet::all()));
        assert!(!e.visible(&FeatureSet::none()));

        let mut partial = FeatureSet::none();
        partial.throttle_boost = true;
        assert!(e.visible(&partial));
    }

    #[test]
    fn feature_set_enabled_matches_fields() {
        let f = FeatureSet {
            throttle_boost: false,
            gyro_kalman: true,
            imuf_filter: false,
            profile_copy: false,
        };
        assert!(!f.enabled(Feature::ThrottleBoost));
        assert!(f.enabled(Feature::GyroKalman));
        assert!(!f.enabled(Feature::ImufFilter));
        assert!(!f.enabled(Feature::ProfileCopy));
    }
}
