// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record, its classification and priority
//! enums, and the `ToastOptions` record used to construct toasts.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a toast.
///
/// Ids are caller-supplied or generated as `toast-<millis>-<random>`. An id
/// is only unique among currently-active toasts; once a toast is removed its
/// id may be reused by a later `show` with no relation to the removed entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    /// Creates an id from a caller-supplied string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id from the current wall clock and a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        Self(format!("toast-{}-{:08x}", millis, rand::random::<u32>()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Toast classification.
///
/// The kind drives default styling in the rendering layer and the preset
/// priority applied by the convenience constructors on [`ToastOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Condition that needs attention but doesn't block operation.
    Warning,
    /// Informational message.
    Info,
    /// Machine state change (connection, alarm, limit switch).
    Machine,
    /// Safety-relevant event (e-stop, door interlock).
    Safety,
    /// Job progress event (started, paused, completed).
    Job,
}

impl ToastKind {
    /// Returns the priority preset applied by the convenience constructors.
    ///
    /// Plain [`ToastOptions::new`] does not consult this; an explicitly
    /// constructed toast defaults to [`Priority::Medium`] regardless of kind.
    #[must_use]
    pub fn default_priority(self) -> Priority {
        match self {
            ToastKind::Error | ToastKind::Machine => Priority::High,
            ToastKind::Safety => Priority::Critical,
            ToastKind::Success | ToastKind::Warning | ToastKind::Info | ToastKind::Job => {
                Priority::Medium
            }
        }
    }

    /// Returns the kind as a lowercase string, usable as a style key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
            ToastKind::Machine => "machine",
            ToastKind::Safety => "safety",
            ToastKind::Job => "job",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency tier. Controls insertion position and whether an audio cue fires.
///
/// Ordering is `Low < Medium < High < Critical`. Critical toasts are inserted
/// at the front of the active sequence; everything else is appended at the
/// back, which also makes non-critical toasts more exposed to tail eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Screen region a toast is grouped into by the rendering layer.
///
/// Used only for output partitioning; it has no effect on ordering or
/// eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    TopCenter,
    BottomCenter,
}

/// Shared callback invoked at a toast lifecycle point.
///
/// Cheap to clone; the same callback may be held by the manager and by
/// snapshots handed to subscribers.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    /// Wraps a closure for use as a lifecycle callback.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the callback.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Styling hint for a toast action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastActionKind {
    #[default]
    Default,
    Primary,
    Destructive,
}

/// A user-triggerable action attached to a toast.
#[derive(Debug, Clone)]
pub struct ToastAction {
    label: String,
    on_click: Callback,
    kind: ToastActionKind,
}

impl ToastAction {
    /// Creates an action with the default styling kind.
    pub fn new(label: impl Into<String>, on_click: Callback) -> Self {
        Self {
            label: label.into(),
            on_click,
            kind: ToastActionKind::Default,
        }
    }

    /// Sets the styling kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ToastActionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the action label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the styling kind.
    #[must_use]
    pub fn kind(&self) -> ToastActionKind {
        self.kind
    }

    /// Invokes the action's callback. Called by the rendering layer when the
    /// action is activated.
    pub fn trigger(&self) {
        self.on_click.invoke();
    }
}

/// One notification instance.
///
/// Toasts are created through [`crate::notifications::NotificationManager::show`]
/// and are immutable afterwards except for the `read` flag.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    message: String,
    duration: u64,
    persistent: bool,
    actions: Vec<ToastAction>,
    icon: Option<String>,
    on_click: Option<Callback>,
    on_close: Option<Callback>,
    position: Position,
    sound: bool,
    priority: Priority,
    timestamp: DateTime<Utc>,
    read: bool,
}

impl Toast {
    /// Returns the toast's unique id.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Returns the classification kind.
    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message body (empty string when none was supplied).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the auto-hide duration in milliseconds. `0` means no auto-hide.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Returns whether the toast must be dismissed explicitly.
    #[must_use]
    pub fn persistent(&self) -> bool {
        self.persistent
    }

    /// Returns the attached actions in declaration order.
    #[must_use]
    pub fn actions(&self) -> &[ToastAction] {
        &self.actions
    }

    /// Returns the opaque icon reference, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the screen region this toast is grouped into.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns whether an audio cue may fire for this toast.
    #[must_use]
    pub fn sound(&self) -> bool {
        self.sound
    }

    /// Returns the urgency tier.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns when this toast was created.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether the toast has been marked as read.
    #[must_use]
    pub fn read(&self) -> bool {
        self.read
    }

    /// Invokes the toast's click callback, if any. Called by the rendering
    /// layer when the toast body is activated.
    pub fn trigger_click(&self) {
        if let Some(callback) = &self.on_click {
            callback.invoke();
        }
    }

    pub(crate) fn set_read(&mut self) {
        self.read = true;
    }

    pub(crate) fn fire_on_close(&self) {
        if let Some(callback) = &self.on_close {
            callback.invoke();
        }
    }
}

/// Options record for constructing a toast.
///
/// Every field has an explicit default; builder methods merge overrides on
/// top. The per-kind constructors (`success`, `error`, `warning`, `info`,
/// `machine`, `safety`, `job`) additionally preset priority and persistence:
/// `error` and `machine` raise priority to high, `safety` raises it to
/// critical and makes the toast persistent.
#[derive(Debug, Clone)]
pub struct ToastOptions {
    id: Option<ToastId>,
    kind: ToastKind,
    title: String,
    message: String,
    duration: Option<u64>,
    persistent: bool,
    actions: Vec<ToastAction>,
    icon: Option<String>,
    on_click: Option<Callback>,
    on_close: Option<Callback>,
    position: Position,
    sound: bool,
    priority: Priority,
}

impl ToastOptions {
    /// Creates options with the documented field defaults: empty message,
    /// manager-default duration, not persistent, no actions, top-right
    /// position, sound enabled, medium priority.
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            message: String::new(),
            duration: None,
            persistent: false,
            actions: Vec::new(),
            icon: None,
            on_click: None,
            on_close: None,
            position: Position::default(),
            sound: true,
            priority: Priority::default(),
        }
    }

    /// Creates a success toast (medium priority).
    pub fn success(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Success, title)
    }

    /// Creates an error toast (high priority).
    pub fn error(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Error, title)
    }

    /// Creates a warning toast (medium priority).
    pub fn warning(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Warning, title)
    }

    /// Creates an info toast (medium priority).
    pub fn info(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Info, title)
    }

    /// Creates a machine toast (high priority).
    pub fn machine(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Machine, title)
    }

    /// Creates a safety toast (critical priority, persistent).
    pub fn safety(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Safety, title).persistent(true)
    }

    /// Creates a job toast (medium priority).
    pub fn job(title: impl Into<String>) -> Self {
        Self::classified(ToastKind::Job, title)
    }

    fn classified(kind: ToastKind, title: impl Into<String>) -> Self {
        let mut options = Self::new(kind, title);
        options.priority = kind.default_priority();
        options
    }

    /// Supplies an explicit id instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the message body.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the auto-hide duration in milliseconds. `0` disables auto-hide.
    #[must_use]
    pub fn duration(mut self, millis: u64) -> Self {
        self.duration = Some(millis);
        self
    }

    /// Sets whether the toast must be dismissed explicitly. A persistent
    /// toast never arms an auto-hide timer, regardless of duration.
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Appends a user-triggerable action. Actions keep declaration order.
    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Sets the opaque icon reference.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the callback invoked when the toast body is clicked.
    #[must_use]
    pub fn on_click(mut self, callback: Callback) -> Self {
        self.on_click = Some(callback);
        self
    }

    /// Sets the callback invoked when the toast is hidden or evicted.
    #[must_use]
    pub fn on_close(mut self, callback: Callback) -> Self {
        self.on_close = Some(callback);
        self
    }

    /// Sets the screen region the rendering layer groups this toast into.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets whether an audio cue may fire. Cues only play for high and
    /// critical priority.
    #[must_use]
    pub fn sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Sets the urgency tier.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Resolves the options into a toast, filling in the generated id,
    /// the manager default duration, and the creation timestamp.
    pub(crate) fn into_toast(self, default_duration_ms: u64) -> Toast {
        Toast {
            id: self.id.unwrap_or_else(ToastId::generate),
            kind: self.kind,
            title: self.title,
            message: self.message,
            duration: self.duration.unwrap_or(default_duration_ms),
            persistent: self.persistent,
            actions: self.actions,
            icon: self.icon,
            on_click: self.on_click,
            on_close: self.on_close,
            position: self.position,
            sound: self.sound,
            priority: self.priority,
            timestamp: Utc::now(),
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn generated_ids_have_expected_prefix() {
        let id = ToastId::generate();
        assert!(id.as_str().starts_with("toast-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ToastId::generate();
        let b = ToastId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn options_apply_documented_defaults() {
        let toast = ToastOptions::new(ToastKind::Info, "Tip").into_toast(4000);

        assert_eq!(toast.kind(), ToastKind::Info);
        assert_eq!(toast.title(), "Tip");
        assert_eq!(toast.message(), "");
        assert_eq!(toast.duration(), 4000);
        assert!(!toast.persistent());
        assert!(toast.actions().is_empty());
        assert!(toast.icon().is_none());
        assert_eq!(toast.position(), Position::TopRight);
        assert!(toast.sound());
        assert_eq!(toast.priority(), Priority::Medium);
        assert!(!toast.read());
    }

    #[test]
    fn explicit_duration_overrides_manager_default() {
        let toast = ToastOptions::new(ToastKind::Info, "Tip")
            .duration(1000)
            .into_toast(4000);
        assert_eq!(toast.duration(), 1000);
    }

    #[test]
    fn plain_options_ignore_kind_priority_presets() {
        // Only the classified constructors apply the per-kind priority.
        let toast = ToastOptions::new(ToastKind::Error, "boom").into_toast(4000);
        assert_eq!(toast.priority(), Priority::Medium);
    }

    #[test]
    fn classified_constructors_preset_priority() {
        assert_eq!(
            ToastOptions::error("boom").into_toast(0).priority(),
            Priority::High
        );
        assert_eq!(
            ToastOptions::machine("alarm").into_toast(0).priority(),
            Priority::High
        );
        assert_eq!(
            ToastOptions::success("done").into_toast(0).priority(),
            Priority::Medium
        );
        assert_eq!(
            ToastOptions::job("started").into_toast(0).priority(),
            Priority::Medium
        );
    }

    #[test]
    fn safety_constructor_is_critical_and_persistent() {
        let toast = ToastOptions::safety("E-STOP").into_toast(0);
        assert_eq!(toast.priority(), Priority::Critical);
        assert!(toast.persistent());
    }

    #[test]
    fn builder_overrides_merge_over_presets() {
        let toast = ToastOptions::error("boom")
            .priority(Priority::Low)
            .message("spindle fault")
            .into_toast(0);
        assert_eq!(toast.priority(), Priority::Low);
        assert_eq!(toast.message(), "spindle fault");
    }

    #[test]
    fn caller_supplied_id_is_preserved() {
        let toast = ToastOptions::info("Tip").id("toast-42").into_toast(0);
        assert_eq!(toast.id().as_str(), "toast-42");
    }

    #[test]
    fn actions_preserve_declaration_order() {
        let toast = ToastOptions::warning("limit reached")
            .action(ToastAction::new("Retry", Callback::new(|| {})))
            .action(
                ToastAction::new("Abort", Callback::new(|| {}))
                    .with_kind(ToastActionKind::Destructive),
            )
            .into_toast(0);

        let labels: Vec<_> = toast.actions().iter().map(ToastAction::label).collect();
        assert_eq!(labels, vec!["Retry", "Abort"]);
        assert_eq!(toast.actions()[1].kind(), ToastActionKind::Destructive);
    }

    #[test]
    fn action_trigger_invokes_callback() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        let action = ToastAction::new("Go", Callback::new(|| {
            HITS.fetch_add(1, Ordering::SeqCst);
        }));

        action.trigger();
        action.trigger();
        assert_eq!(HITS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn trigger_click_invokes_callback_when_set() {
        static CLICKS: AtomicUsize = AtomicUsize::new(0);
        let toast = ToastOptions::info("Tip")
            .on_click(Callback::new(|| {
                CLICKS.fetch_add(1, Ordering::SeqCst);
            }))
            .into_toast(0);

        toast.trigger_click();
        assert_eq!(CLICKS.load(Ordering::SeqCst), 1);

        // Without a callback the click is a no-op.
        let silent = ToastOptions::info("quiet").into_toast(0);
        silent.trigger_click();
    }

    #[test]
    fn toast_id_constructors_agree() {
        assert_eq!(ToastId::new("toast-7"), ToastId::from("toast-7"));
        assert_eq!(ToastId::new("toast-7").to_string(), "toast-7");
    }

    #[test]
    fn priority_ordering_is_ascending() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn kind_priority_presets_match_classification() {
        assert_eq!(ToastKind::Error.default_priority(), Priority::High);
        assert_eq!(ToastKind::Machine.default_priority(), Priority::High);
        assert_eq!(ToastKind::Safety.default_priority(), Priority::Critical);
        assert_eq!(ToastKind::Success.default_priority(), Priority::Medium);
        assert_eq!(ToastKind::Info.default_priority(), Priority::Medium);
    }

    #[test]
    fn kind_as_str_is_lowercase() {
        assert_eq!(ToastKind::Safety.as_str(), "safety");
        assert_eq!(ToastKind::Machine.to_string(), "machine");
    }
}
