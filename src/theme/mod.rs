mod palette;

pub use palette::{KpiColor, Palette, ThemeMode};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type SubscriptionId = u64;

/// External "is dark mode active" signal with change notification.
///
/// Implementations are single-threaded; callbacks run on the thread that
/// changes the signal.
pub trait ThemeSignal {
    /// Current value, or None when the signal cannot be read.
    fn is_dark(&self) -> Option<bool>;

    /// Register a callback invoked once per actual change of the signal.
    fn subscribe(&self, callback: Box<dyn Fn()>) -> SubscriptionId;

    /// Remove a callback. Returns false if the id was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Resolve the active palette from the signal. Unreadable means light.
pub fn resolve_theme(signal: &dyn ThemeSignal) -> Palette {
    Palette::for_mode(ThemeMode::from_dark(signal.is_dark().unwrap_or(false)))
}

/// Register `callback` to run whenever the theme flips.
pub fn on_theme_change(signal: &dyn ThemeSignal, callback: impl Fn() + 'static) -> SubscriptionId {
    signal.subscribe(Box::new(callback))
}

/// In-process theme signal driven by explicit `set_dark` calls.
#[derive(Default)]
pub struct ThemeSwitch {
    dark: Cell<Option<bool>>,
    next_id: Cell<SubscriptionId>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
}

impl ThemeSwitch {
    pub fn new(dark: Option<bool>) -> Self {
        Self {
            dark: Cell::new(dark),
            ..Self::default()
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        Self::new(Some(mode.is_dark()))
    }

    /// Set the signal. Subscribers are notified only if the value changed;
    /// the return value tells whether they were.
    pub fn set_dark(&self, dark: bool) -> bool {
        if self.dark.get() == Some(dark) {
            return false;
        }
        self.dark.set(Some(dark));
        log::debug!("theme signal changed to {}", ThemeMode::from_dark(dark));

        // Snapshot so callbacks may subscribe or unsubscribe while running.
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb();
        }
        true
    }

    pub fn toggle(&self) -> bool {
        self.set_dark(!self.dark.get().unwrap_or(false))
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl ThemeSignal for ThemeSwitch {
    fn is_dark(&self) -> Option<bool> {
        self.dark.get()
    }

    fn subscribe(&self, callback: Box<dyn Fn()>) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_signal_resolves_to_light() {
        let signal = ThemeSwitch::new(None);
        assert_eq!(resolve_theme(&signal), Palette::light());
    }

    #[test]
    fn resolution_is_a_pure_function_of_the_signal() {
        let signal = ThemeSwitch::new(Some(true));
        assert_eq!(resolve_theme(&signal), resolve_theme(&signal));
        assert_eq!(resolve_theme(&signal).mode, ThemeMode::Dark);
    }

    #[test]
    fn toggling_swaps_every_token() {
        let signal = ThemeSwitch::from_mode(ThemeMode::Light);
        let before = resolve_theme(&signal);
        signal.toggle();
        let after = resolve_theme(&signal);

        assert_eq!(after.mode, ThemeMode::Dark);
        for ((name, old), (_, new)) in before.tokens().iter().zip(after.tokens().iter()) {
            assert_ne!(old, new, "{name} did not change");
        }
    }

    #[test]
    fn notifies_once_per_actual_change() {
        let signal = ThemeSwitch::from_mode(ThemeMode::Light);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        on_theme_change(&signal, move || counter.set(counter.get() + 1));

        assert!(!signal.set_dark(false));
        assert_eq!(hits.get(), 0);

        assert!(signal.set_dark(true));
        assert!(!signal.set_dark(true));
        assert_eq!(hits.get(), 1);

        signal.set_dark(false);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn unsubscribed_callbacks_are_not_called() {
        let signal = ThemeSwitch::from_mode(ThemeMode::Light);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = on_theme_change(&signal, move || counter.set(counter.get() + 1));

        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        assert_eq!(signal.subscriber_count(), 0);

        signal.toggle();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn callback_sees_the_new_value() {
        let signal = Rc::new(ThemeSwitch::from_mode(ThemeMode::Light));
        let seen = Rc::new(Cell::new(None));
        let (probe, slot) = (Rc::clone(&signal), Rc::clone(&seen));
        on_theme_change(signal.as_ref(), move || {
            slot.set(Some(resolve_theme(probe.as_ref()).mode))
        });

        signal.set_dark(true);
        assert_eq!(seen.get(), Some(ThemeMode::Dark));
    }
}
