//! Dismissal watcher for the card's options menu.
//!
//! The menu closes on a pointer-down outside both the menu panel and its
//! trigger, and on `Escape`. Those events come from document-level listeners,
//! which must exist only while the menu is open. The watcher holds a
//! [`ListenerGuard`] exactly while open; dropping the guard (on close or when
//! the session itself is dropped) releases the listeners.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a document pointer-down landed relative to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// Inside the open menu panel.
    Menu,
    /// On the menu trigger button.
    Trigger,
    /// Anywhere else.
    Outside,
}

/// Entries the options menu can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Edit,
    Duplicate,
    Delete,
}

impl MenuAction {
    /// Label rendered for the entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Duplicate => "Duplicate",
            Self::Delete => "Delete",
        }
    }

    /// Whether the entry is rendered with destructive styling.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Releases document listeners when dropped.
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    /// Guard that runs `release` exactly once when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release.
    #[must_use]
    pub const fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Installs the document-level pointer-down and key-down listeners.
///
/// Implementations register the listeners in `attach` and return a guard
/// that removes them.
pub trait DismissListeners {
    fn attach(&mut self) -> ListenerGuard;
}

/// Listener source for hosts that route document events manually.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualListeners;

impl DismissListeners for ManualListeners {
    fn attach(&mut self) -> ListenerGuard {
        ListenerGuard::noop()
    }
}

/// Open/closed state of the options menu plus its listener lifetime.
pub struct DismissalWatcher {
    listeners: Box<dyn DismissListeners>,
    active: Option<ListenerGuard>,
}

impl DismissalWatcher {
    #[must_use]
    pub fn new(listeners: Box<dyn DismissListeners>) -> Self {
        Self {
            listeners,
            active: None,
        }
    }

    /// Whether the menu is open (and listeners are held).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Open the menu, acquiring listeners. Returns false if already open.
    pub fn open(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(self.listeners.attach());
        tracing::trace!("Menu dismiss listeners attached");
        true
    }

    /// Close the menu, releasing listeners. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        let Some(guard) = self.active.take() else {
            return false;
        };
        drop(guard);
        tracing::trace!("Menu dismiss listeners released");
        true
    }

    /// Flip the menu state.
    pub fn toggle(&mut self) {
        if !self.close() {
            self.open();
        }
    }

    /// Handle a document pointer-down. Returns true if the menu closed.
    pub fn pointer_down(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Outside => self.close(),
            PointerTarget::Menu | PointerTarget::Trigger => false,
        }
    }

    /// Replace the listener source. Closes the menu first.
    pub fn replace_listeners(&mut self, listeners: Box<dyn DismissListeners>) {
        self.close();
        self.listeners = listeners;
    }
}

impl fmt::Debug for DismissalWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissalWatcher")
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingListeners;
    use super::*;

    fn watcher() -> (DismissalWatcher, CountingListeners) {
        let listeners = CountingListeners::default();
        (DismissalWatcher::new(Box::new(listeners.clone())), listeners)
    }

    #[test]
    fn listeners_live_only_while_open() {
        let (mut watcher, listeners) = watcher();
        assert_eq!(listeners.live(), 0);

        assert!(watcher.open());
        assert!(watcher.is_open());
        assert_eq!(listeners.live(), 1);

        assert!(!watcher.open());
        assert_eq!(listeners.attached.get(), 1);

        assert!(watcher.close());
        assert!(!watcher.is_open());
        assert_eq!(listeners.live(), 0);
        assert!(!watcher.close());
        assert_eq!(listeners.released.get(), 1);
    }

    #[test]
    fn outside_pointer_closes() {
        let (mut watcher, listeners) = watcher();
        watcher.open();

        assert!(!watcher.pointer_down(PointerTarget::Menu));
        assert!(!watcher.pointer_down(PointerTarget::Trigger));
        assert!(watcher.is_open());

        assert!(watcher.pointer_down(PointerTarget::Outside));
        assert!(!watcher.is_open());
        assert_eq!(listeners.live(), 0);
    }

    #[test]
    fn drop_releases_listeners() {
        let (mut watcher, listeners) = watcher();
        watcher.open();
        drop(watcher);
        assert_eq!(listeners.live(), 0);
    }

    #[test]
    fn toggle_twice_restores_closed() {
        let (mut watcher, listeners) = watcher();
        watcher.toggle();
        assert!(watcher.is_open());
        watcher.toggle();
        assert!(!watcher.is_open());
        assert_eq!(listeners.attached.get(), 1);
        assert_eq!(listeners.released.get(), 1);
    }

    #[test]
    fn replacing_listeners_releases_old_ones() {
        let (mut watcher, old) = watcher();
        watcher.open();

        let new = CountingListeners::default();
        watcher.replace_listeners(Box::new(new.clone()));
        assert_eq!(old.live(), 0);
        assert!(!watcher.is_open());

        watcher.open();
        assert_eq!(new.live(), 1);
    }

    #[test]
    fn menu_labels() {
        assert_eq!(MenuAction::Edit.label(), "Edit");
        assert!(MenuAction::Delete.is_destructive());
        assert!(!MenuAction::Duplicate.is_destructive());
    }
}
