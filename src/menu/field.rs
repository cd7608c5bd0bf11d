//! Field widgets: typed, bounded editable values bound to staged cells.
//!
//! A widget never touches persistent storage — it only reads and writes
//! one cell of the active page's staged buffer. Editing clamps to the
//! configured `[min, max]` range; there is no wraparound, matching the
//! bounded-numeric convention of the rest of the firmware.

use super::Cells;

/// Side effect a numeric field may carry, fired by the navigation engine
/// when an adjust actually changed the staged value.
///
/// A closed enum instead of a function pointer keeps the page tables
/// `const` and the dispatch exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeHook {
    /// Commit the staged 1-based tuning-profile selector immediately.
    SelectTuningProfile,
    /// Commit the staged 1-based rate-profile selector immediately.
    SelectRateProfile,
}

// ── Numeric field ────────────────────────────────────────────────────────

/// Bounded integer widget over one staged cell.
///
/// Covers the unsigned-8-bit, unsigned-16-bit and scaled-decimal field
/// kinds: the storage width is implied by `[min, max]`, and `divisor`
/// only affects display — stepping always operates on the underlying
/// integer.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumericField {
    /// Bound cell index in the page's staged buffer.
    pub cell: usize,
    /// Minimum committed value (inclusive).
    pub min: i32,
    /// Maximum committed value (inclusive).
    pub max: i32,
    /// Increment applied per edit event.
    pub step: i32,
    /// Display divisor; 1 renders the raw integer, 10 renders tenths.
    pub divisor: u16,
    /// Optional side effect fired when an edit changes the value.
    pub on_change: Option<ChangeHook>,
}

impl NumericField {
    /// Plain bounded integer field.
    pub const fn bounded(cell: usize, min: i32, max: i32, step: i32) -> Self {
        Self {
            cell,
            min,
            max,
            step,
            divisor: 1,
            on_change: None,
        }
    }

    /// Scaled-decimal field: stored and stepped as an integer, displayed
    /// divided by `divisor`.
    pub const fn scaled(cell: usize, min: i32, max: i32, step: i32, divisor: u16) -> Self {
        Self {
            cell,
            min,
            max,
            step,
            divisor,
            on_change: None,
        }
    }

    /// Attach a change hook (used by the profile selectors on the top page).
    pub const fn with_hook(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    /// Current staged value.
    pub fn read(&self, cells: &Cells) -> i32 {
        cells[self.cell]
    }

    /// Step the staged value by `delta` edit increments, clamped to
    /// `[min, max]`. Returns the new value.
    pub fn adjust(&self, cells: &mut Cells, delta: i32) -> i32 {
        let current = cells[self.cell];
        let next = current
            .saturating_add(delta.saturating_mul(self.step))
            .clamp(self.min, self.max);
        cells[self.cell] = next;
        next
    }

    /// Set the staged value directly. Clamping still applies — committed
    /// values always lie in `[min, max]`.
    pub fn write(&self, cells: &mut Cells, value: i32) {
        cells[self.cell] = value.clamp(self.min, self.max);
    }
}

// ── Enumerated field ─────────────────────────────────────────────────────

/// Boolean / enumerated widget: the staged value is an index into a
/// static label set.
///
/// Displaying an out-of-range index is a programming error (the label set
/// is statically sized), so [`EnumField::label`] indexes directly and
/// panics rather than papering over a corrupted cell.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnumField {
    /// Bound cell index in the page's staged buffer.
    pub cell: usize,
    /// Display label per index; length fixes the valid range.
    pub labels: &'static [&'static str],
}

impl EnumField {
    pub const fn with_labels(cell: usize, labels: &'static [&'static str]) -> Self {
        Self { cell, labels }
    }

    /// Largest valid index.
    pub fn max(&self) -> i32 {
        self.labels.len() as i32 - 1
    }

    /// Current staged index.
    pub fn read(&self, cells: &Cells) -> i32 {
        cells[self.cell]
    }

    /// Step the staged index by `delta`, clamped to the label range.
    /// Returns the new index.
    pub fn adjust(&self, cells: &mut Cells, delta: i32) -> i32 {
        let next = cells[self.cell].saturating_add(delta).clamp(0, self.max());
        cells[self.cell] = next;
        next
    }

    /// Set the staged index directly, clamped to the label range.
    pub fn write(&self, cells: &mut Cells, value: i32) {
        cells[self.cell] = value.clamp(0, self.max());
    }

    /// Label for the current staged index.
    pub fn label(&self, cells: &Cells) -> &'static str {
        self.labels[cells[self.cell] as usize]
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────────
