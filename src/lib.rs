//! Staged-edit overlay menu engine for the Tiller vehicle-control firmware.
//!
//! This crate implements the on-device configuration menu that Tiller
//! renders on its low-resolution overlay display: a static tree of pages
//! whose entries inspect and edit control-loop tuning, filter cutoffs and
//! rate-curve parameters. The engine owns navigation and the staged-edit
//! transaction model only — painting characters, decoding stick gestures
//! and persisting configuration to flash all live behind narrow interfaces
//! ([`MenuLine`], [`NavEvent`] and [`ConfigStore`]).
//!
//! # Architecture
//!
//! ```text
//! NavEvent ──▶ Menu (back-stack of PageState)
//!                │
//!                ├─ FocusMove / Edit ──▶ Field widgets (clamped staged cells)
//!                ├─ Descend ──▶ PageState::enter (stage from ProfileBinding)
//!                ├─ Ascend  ──▶ commit_from (flush staged cells back)
//!                └─ Invoke  ──▶ actions (save+exit, save+reboot, copy profile)
//! ```
//!
//! Every page stages a working copy of its persistent record into a
//! fixed-size cell buffer on entry, edits that copy in place, and flushes
//! it back through the [`ProfileBinding`] layer on exit. The engine is
//! single-threaded and event-driven: one event is processed to completion
//! at a time, and enter/exit staging never suspends.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation anywhere. All storage is fixed-size arrays and
//! `heapless` collections sized by the constants in [`menu`]. The optional
//! `defmt` feature enables structured logging on embedded targets.
//!
//! [`MenuLine`]: menu::MenuLine
//! [`NavEvent`]: menu::NavEvent
//! [`ConfigStore`]: menu::ConfigStore
//! [`ProfileBinding`]: menu::ProfileBinding

#![no_std]

pub mod menu;
