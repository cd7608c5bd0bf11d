//! Menu navigation and staged-edit transaction engine.
//!
//! # Architecture
//!
//! The menu is a static tree of **pages** ([`pages`] holds the declarative
//! tables). Each page is an ordered list of [`Entry`] rows: headings,
//! numeric/enumerated field widgets, sub-page links, action triggers and a
//! back row. Runtime traversal state lives in [`Menu`], a back-stack of
//! [`PageState`] values.
//!
//! ```text
//! Top (profile select)
//! ├── Gains              (per tuning profile)
//! ├── Tuning misc        (per tuning profile)
//! ├── Per-profile filters(per tuning profile)
//! ├── Rates              (per rate profile)
//! ├── Global filters
//! ├── IMU-F fusion filter (fusion-chip builds only)
//! └── Copy profile
//! ```
//!
//! # Staged edits
//!
//! Entering a page bulk-copies the bound persistent record into the page's
//! staged cell buffer (selected by the committed profile index in
//! [`ProfileBinding`]). Field widgets only ever read and write staged
//! cells; persistent records change exclusively when a page exits and its
//! buffer is flushed back through [`ProfileBinding::commit_from`], which
//! also fires the store's change-notification hook so dependent runtime
//! state can be recomputed.
//!
//! Ascending with Back runs the exit flush too — leaving a page always
//! commits its staged buffer, matching the firmware's long-standing
//! behavior. Only the Save+Exit / Save+Reboot actions additionally request
//! an EEPROM write via [`ConfigStore::persist`].

mod action;
mod entry;
mod error;
mod field;
mod nav;
mod page;
pub mod pages;
mod profile;
mod render;
mod store;

pub use action::{ActionOutcome, ExitKind, MenuAction};
pub use entry::{Entry, EntryKind, Feature, FeatureSet, LabelSuffix, Visibility};
pub use error::MenuError;
pub use field::{ChangeHook, EnumField, NumericField};
pub use nav::{EventOutcome, Menu, NavEvent};
pub use page::{PageId, PageSpec, PageState};
pub use profile::ProfileBinding;
pub use render::{render_lines, MenuLine};
pub use store::{
    AxisGains, ConfigStore, FilterConfig, RamConfigStore, RateProfile, TuningProfile,
};

/// Number of selectable tuning profiles.
pub const PROFILE_COUNT: usize = 3;

/// Number of selectable rate profiles.
pub const RATE_PROFILE_COUNT: usize = 3;

/// Number of control axes (roll, pitch, yaw — in that order everywhere).
pub const AXIS_COUNT: usize = 3;

/// Staged-cell capacity of a single page.
///
/// Sized for the largest page table (gains: 15 bound cells). Cells a page
/// does not bind stay zero and are never committed.
pub const MAX_CELLS: usize = 16;

/// Maximum navigation depth. The static page tree is two levels deep; the
/// extra headroom guards future sub-sub-pages without reallocation.
pub const MAX_DEPTH: usize = 4;

/// Maximum number of rows on a single page (display feed capacity).
pub const MAX_ENTRIES: usize = 20;

/// One page's staged-edit buffer: a fixed array of integer cells.
///
/// Field widgets bind to a cell index; the typed mapping between cells and
/// persistent record fields is owned by [`ProfileBinding`].
pub type Cells = [i32; MAX_CELLS];
