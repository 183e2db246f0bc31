// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for operator feedback.
//!
//! This module provides a non-intrusive notification engine following
//! toast/snackbar UX patterns. Toasts appear temporarily to inform the
//! operator about events (job completion, machine alarms, e-stop) without
//! blocking interaction; the rendering layer consumes snapshots through
//! [`NotificationManager::subscribe`].
//!
//! # Components
//!
//! - [`toast`] - Core `Toast` record with kind, priority, and position
//! - [`manager`] - `NotificationManager` for ordering, eviction, and lifecycle
//!
//! # Usage
//!
//! ```
//! use cnc_notify::notifications::{NotificationManager, ToastOptions};
//!
//! // One instance at application start, passed to consumers.
//! let manager = NotificationManager::new();
//!
//! let subscription = manager.subscribe(|toasts| {
//!     // re-render from the snapshot
//!     let _ = toasts.len();
//! });
//!
//! manager.show(ToastOptions::success("Program saved"));
//! manager.safety("E-STOP", "Emergency stop engaged");
//!
//! subscription.unsubscribe();
//! ```
//!
//! # Design Considerations
//!
//! - Critical toasts insert at the front; everything else appends at the back
//! - Max active toasts: 5 by default (tail entries beyond capacity are evicted)
//! - Auto-hide: 4 s default, disabled for persistent toasts
//! - Fail silent: unknown ids and playback failures are no-ops, never errors

mod manager;
mod toast;

pub use manager::{NotificationManager, Subscription};
pub use toast::{
    Callback, Position, Priority, Toast, ToastAction, ToastActionKind, ToastId, ToastKind,
    ToastOptions,
};
