// SPDX-License-Identifier: MPL-2.0
//! `cnc_notify` is the toast notification engine for CNC machine-control
//! front-ends.
//!
//! It owns the notification data model, priority-based ordering, capacity
//! eviction, subscriber fan-out, timed auto-dismissal, and best-effort audio
//! cues. Rendering is out of scope: UI layers subscribe to the manager and
//! re-render from the snapshots it broadcasts.

#![doc(html_root_url = "https://docs.rs/cnc_notify/0.3.0")]

pub mod audio;
pub mod config;
pub mod error;
pub mod notifications;

// Re-export the notification API at the crate root for ergonomic imports
pub use config::NotificationConfig;
pub use notifications::{
    Callback, NotificationManager, Position, Priority, Subscription, Toast, ToastAction,
    ToastActionKind, ToastId, ToastKind, ToastOptions,
};
