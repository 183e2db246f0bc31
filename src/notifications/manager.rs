// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `NotificationManager` owns the active toast sequence, assigns
//! priority-based insertion order, enforces the capacity eviction policy,
//! schedules auto-hide timers, and fans out change notifications to
//! subscribers.

use super::toast::{Priority, Toast, ToastId, ToastKind, ToastOptions};
use crate::audio::{Cue, CuePlayer};
use crate::config::{NotificationConfig, ToastCapacity};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};

type Listener = Arc<dyn Fn(&[Toast]) + Send + Sync>;

/// State guarded by the manager's single lock.
struct Inner {
    toasts: VecDeque<Toast>,
    subscribers: Vec<(u64, Listener)>,
    next_subscriber: u64,
}

impl Inner {
    fn snapshot(&self) -> Vec<Toast> {
        self.toasts.iter().cloned().collect()
    }

    fn listeners(&self) -> Vec<Listener> {
        self.subscribers
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Manages the active toast sequence and broadcasts snapshots to subscribers.
///
/// The manager is a cheap-to-clone handle; clones share the same state.
/// Construct one instance at application start and pass it to consumers —
/// tests construct isolated instances the same way.
///
/// All operations take a single internal lock, so concurrent `show`, `hide`,
/// `clear`, and `mark_as_read` calls observe a consistent sequence. User
/// callbacks (subscriber listeners, `on_close`) are invoked after the lock
/// is released, so a listener may safely re-enter the manager.
///
/// No operation returns an error: unknown ids, audio playback failures, and
/// capacity overflow all degrade to silent no-ops or best-effort behavior.
/// A missed toast is not a correctness failure for a UI feedback layer, and
/// callers are not expected to handle notification-layer errors.
#[derive(Clone)]
pub struct NotificationManager {
    inner: Arc<Mutex<Inner>>,
    max_toasts: usize,
    default_duration_ms: u64,
    cues: Option<CuePlayer>,
}

impl NotificationManager {
    /// Creates a manager with the default configuration
    /// (capacity 5, 4000 ms auto-hide, sound enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NotificationConfig::default())
    }

    /// Creates a manager from an explicit configuration.
    ///
    /// The capacity is clamped into the valid range. When `sound` is off no
    /// audio playback thread is started.
    #[must_use]
    pub fn with_config(config: NotificationConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                toasts: VecDeque::new(),
                subscribers: Vec::new(),
                next_subscriber: 0,
            })),
            max_toasts: ToastCapacity::new(config.max_toasts).value(),
            default_duration_ms: config.default_duration_ms,
            cues: config.sound.then(CuePlayer::spawn),
        }
    }

    /// Registers a listener that receives a defensive copy of the active
    /// sequence: once immediately at registration, then exactly once per
    /// mutation.
    ///
    /// Returns a [`Subscription`] handle that removes the listener.
    /// Unsubscribing from inside a listener callback is safe: listeners are
    /// copied out of the lock before each broadcast.
    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + Send + Sync + 'static) -> Subscription {
        let listener: Listener = Arc::new(listener);
        let (id, snapshot) = {
            let mut inner = self.lock();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            inner.subscribers.push((id, Arc::clone(&listener)));
            (id, inner.snapshot())
        };
        listener(&snapshot);
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Shows a toast built from `options` and returns its id.
    ///
    /// Critical-priority toasts are inserted at the front of the sequence;
    /// all others are appended at the back. If the insertion pushes the
    /// sequence past capacity, entries are evicted from the tail and each
    /// evicted toast's `on_close` fires. Subscribers are then notified
    /// exactly once.
    ///
    /// For a non-persistent toast with a non-zero duration, a fire-and-forget
    /// timer hides the toast after the duration elapses. The timer is never
    /// cancelled; if the toast is removed earlier the late hide is a no-op.
    /// When the toast's `sound` flag is set and its priority is high or
    /// critical, a kind-specific audio cue plays on a best-effort basis.
    ///
    /// `show` returns as soon as the snapshot broadcast completes; it never
    /// waits on the timer or the audio cue.
    pub fn show(&self, options: ToastOptions) -> ToastId {
        let toast = options.into_toast(self.default_duration_ms);
        let id = toast.id().clone();
        let duration = toast.duration();
        let persistent = toast.persistent();
        let cue = (toast.sound() && toast.priority() >= Priority::High)
            .then(|| Cue::for_kind(toast.kind()));
        let critical = toast.priority() == Priority::Critical;

        let mut evicted = Vec::new();
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if critical {
                inner.toasts.push_front(toast);
            } else {
                inner.toasts.push_back(toast);
            }
            while inner.toasts.len() > self.max_toasts {
                if let Some(evictee) = inner.toasts.pop_back() {
                    evicted.push(evictee);
                }
            }
            (inner.snapshot(), inner.listeners())
        };

        for toast in &evicted {
            toast.fire_on_close();
        }
        broadcast(&listeners, &snapshot);

        if !persistent && duration > 0 {
            self.schedule_auto_hide(id.clone(), duration);
        }
        if let (Some(cue), Some(player)) = (cue, &self.cues) {
            player.play(cue);
        }

        id
    }

    /// Hides the toast with `id`: fires its `on_close`, removes it, and
    /// broadcasts the new snapshot. Silently does nothing — no broadcast —
    /// when the id is not present, which also makes a late auto-hide timer
    /// firing for an already-removed toast harmless.
    pub fn hide(&self, id: &ToastId) {
        hide_in(&self.inner, id);
    }

    /// Removes all toasts of `kind`, or every toast when `kind` is `None`.
    ///
    /// Unlike [`hide`](Self::hide), `clear` does not fire individual
    /// `on_close` callbacks. The broadcast is unconditional, even when
    /// nothing was removed.
    pub fn clear(&self, kind: Option<ToastKind>) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            match kind {
                Some(kind) => inner.toasts.retain(|toast| toast.kind() != kind),
                None => inner.toasts.clear(),
            }
            (inner.snapshot(), inner.listeners())
        };
        broadcast(&listeners, &snapshot);
    }

    /// Marks the toast with `id` as read and broadcasts. Silently does
    /// nothing when the id is not present.
    pub fn mark_as_read(&self, id: &ToastId) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            let Some(toast) = inner.toasts.iter_mut().find(|toast| toast.id() == id) else {
                return;
            };
            toast.set_read();
            (inner.snapshot(), inner.listeners())
        };
        broadcast(&listeners, &snapshot);
    }

    /// Returns a defensive copy of the active sequence. Does not mutate or
    /// notify.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().snapshot()
    }

    /// Returns the number of active toasts not yet marked as read.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock()
            .toasts
            .iter()
            .filter(|toast| !toast.read())
            .count()
    }

    /// Shows a success toast (medium priority).
    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::success(title).message(message))
    }

    /// Shows an error toast (high priority).
    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::error(title).message(message))
    }

    /// Shows a warning toast (medium priority).
    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::warning(title).message(message))
    }

    /// Shows an info toast (medium priority).
    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::info(title).message(message))
    }

    /// Shows a machine toast (high priority).
    pub fn machine(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::machine(title).message(message))
    }

    /// Shows a safety toast (critical priority, persistent).
    pub fn safety(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::safety(title).message(message))
    }

    /// Shows a job toast (medium priority).
    pub fn job(&self, title: impl Into<String>, message: impl Into<String>) -> ToastId {
        self.show(ToastOptions::job(title).message(message))
    }

    fn schedule_auto_hide(&self, id: ToastId, duration_ms: u64) {
        let Some(handle) = timer_handle() else {
            return;
        };
        let inner = Arc::downgrade(&self.inner);
        handle.spawn(async move {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
            if let Some(inner) = inner.upgrade() {
                hide_in(&inner, &id);
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("NotificationManager")
            .field("toasts", &inner.toasts.len())
            .field("subscribers", &inner.subscribers.len())
            .field("max_toasts", &self.max_toasts)
            .finish()
    }
}

/// Handle returned by [`NotificationManager::subscribe`] that removes the
/// listener. Holds only a weak reference, so an outstanding subscription
/// does not keep the manager state alive.
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Removes the listener. Further mutations will not reach it.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            lock_inner(&inner)
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

fn hide_in(inner: &Mutex<Inner>, id: &ToastId) {
    let removed;
    let (snapshot, listeners) = {
        let mut inner = lock_inner(inner);
        let Some(pos) = inner.toasts.iter().position(|toast| toast.id() == id) else {
            return;
        };
        removed = inner.toasts.remove(pos);
        (inner.snapshot(), inner.listeners())
    };
    if let Some(toast) = &removed {
        toast.fire_on_close();
    }
    broadcast(&listeners, &snapshot);
}

fn broadcast(listeners: &[Listener], snapshot: &[Toast]) {
    for listener in listeners {
        listener(snapshot);
    }
}

// A poisoned lock only means a listener panicked on another thread; the
// toast sequence itself is still consistent, so recover the guard instead
// of propagating the panic into every later operation.
fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns a handle for auto-hide timers: the ambient runtime when inside
/// one, otherwise a lazily-started process-wide single-worker runtime.
/// Returns `None` when the fallback runtime cannot start, in which case the
/// toast simply never auto-hides.
fn timer_handle() -> Option<Handle> {
    if let Ok(handle) = Handle::try_current() {
        return Some(handle);
    }
    static FALLBACK: OnceLock<Option<Runtime>> = OnceLock::new();
    FALLBACK
        .get_or_init(|| {
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("cnc-notify-timer")
                .enable_time()
                .build()
                .ok()
        })
        .as_ref()
        .map(|runtime| runtime.handle().clone())
}
