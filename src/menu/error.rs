/// Errors that can occur while driving the menu engine.
///
/// Bounded-value violations on edit are never errors, widgets clamp.
/// These variants cover caller contract violations: they are surfaced as
/// `Result`s at the profile-binding boundary so the firmware integration
/// can assert on them in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Tuning or rate profile index is out of bounds
    /// (must be < [`PROFILE_COUNT`](super::PROFILE_COUNT) /
    /// [`RATE_PROFILE_COUNT`](super::RATE_PROFILE_COUNT)).
    InvalidProfileIndex,
}
