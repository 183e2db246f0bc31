// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for notification configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the notification engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Capacity**: Active toast count bounds
//! - **Timing**: Auto-hide durations
//! - **Sound**: Audio cue settings

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default maximum number of active toasts before tail eviction kicks in.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Minimum allowed toast capacity.
pub const MIN_MAX_TOASTS: usize = 1;

/// Maximum allowed toast capacity.
pub const MAX_MAX_TOASTS: usize = 20;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default auto-hide duration for non-persistent toasts (in milliseconds).
///
/// A duration of `0` disables auto-hide for that toast.
pub const DEFAULT_DURATION_MS: u64 = 4000;

// ==========================================================================
// Sound Defaults
// ==========================================================================

/// Whether audio cues are enabled by default.
///
/// Cues only fire for high and critical priority toasts, and only when the
/// individual toast has its `sound` flag set.
pub const DEFAULT_SOUND_ENABLED: bool = true;
