//! Page-level lifecycle: Loading until a fetch completes, then Loaded or
//! Error. Every new fetch starts over at Loading.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::dashboard::{build_view_with, DashboardPayload, ViewOptions, ViewTree};
use crate::error::Result;
use crate::html;
use crate::source::DataSource;
use crate::theme::{resolve_theme, Palette, SubscriptionId, ThemeSignal};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Loaded(Box<ViewTree>),
    /// Reason is for logs only; the rendered page shows a fixed message.
    Error(String),
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

pub struct DashboardPage {
    source: Box<dyn DataSource>,
    signal: Rc<dyn ThemeSignal>,
    options: ViewOptions,
    state: PageState,
    last_issued: u64,
    theme_subscription: Option<SubscriptionId>,
    /// Set when a theme change arrived while the page was borrowed.
    theme_stale: Rc<Cell<bool>>,
}

impl DashboardPage {
    pub fn new(source: Box<dyn DataSource>, signal: Rc<dyn ThemeSignal>, options: ViewOptions) -> Self {
        Self {
            source,
            signal,
            options,
            state: PageState::Loading,
            last_issued: 0,
            theme_subscription: None,
            theme_stale: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn view(&self) -> Option<&ViewTree> {
        match &self.state {
            PageState::Loaded(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        resolve_theme(self.signal.as_ref())
    }

    /// Enter Loading and hand out a ticket for the new request.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        self.state = PageState::Loading;
        FetchTicket(self.last_issued)
    }

    /// Apply a finished fetch.
    ///
    /// Successes are shown in completion order, so the last one to finish
    /// wins. A failure only surfaces if it belongs to the newest request;
    /// an older request failing late must not wipe a newer view.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<DashboardPayload>) {
        match result {
            Ok(payload) => {
                self.theme_stale.set(false);
                let palette = self.palette();
                let view = build_view_with(&payload, &palette, &self.options);
                self.state = PageState::Loaded(Box::new(view));
            }
            Err(e) if ticket.0 == self.last_issued => {
                log::warn!("dashboard fetch failed: {e}");
                self.state = PageState::Error(e.to_string());
            }
            Err(e) => {
                log::debug!("ignoring failure of superseded fetch {}: {e}", ticket.0);
            }
        }
    }

    /// Fetch from the data source and apply the result.
    pub fn refresh(&mut self) -> &PageState {
        let ticket = self.begin_fetch();
        let result = self.source.fetch();
        self.complete(ticket, result);
        &self.state
    }

    /// True when the theme changed and the view has not caught up yet.
    pub fn theme_pending(&self) -> bool {
        self.theme_stale.get()
    }

    /// Re-fetch if a theme change was missed. Returns whether it did.
    pub fn sync_theme(&mut self) -> bool {
        if !self.theme_stale.get() {
            return false;
        }
        self.refresh();
        true
    }

    /// Render the current state as a complete HTML document.
    pub fn html(&self) -> Result<String> {
        match &self.state {
            PageState::Loading => html::render_loading(&self.palette()),
            PageState::Loaded(view) => html::render_dashboard(view),
            PageState::Error(_) => html::render_error(&self.palette()),
        }
    }

    /// Re-fetch and rebuild whenever the theme signal flips.
    pub fn watch_theme(page: &Rc<RefCell<DashboardPage>>) -> SubscriptionId {
        let weak: Weak<RefCell<DashboardPage>> = Rc::downgrade(page);
        let (signal, stale) = {
            let page = page.borrow();
            (Rc::clone(&page.signal), Rc::clone(&page.theme_stale))
        };

        let id = signal.subscribe(Box::new(move || {
            let Some(page) = weak.upgrade() else {
                return;
            };
            let refreshed = match page.try_borrow_mut() {
                Ok(mut page) => {
                    page.refresh();
                    true
                }
                Err(_) => false,
            };
            if !refreshed {
                // picked up by the next refresh or sync_theme
                stale.set(true);
                log::debug!("theme changed while the page was in use; refresh deferred");
            }
        }));

        if let Some(previous) = page.borrow_mut().theme_subscription.replace(id) {
            signal.unsubscribe(previous);
        }
        id
    }

    /// Stop following the theme signal. Returns false if not watching.
    pub fn unwatch_theme(&mut self) -> bool {
        match self.theme_subscription.take() {
            Some(id) => self.signal.unsubscribe(id),
            None => false,
        }
    }
}

impl Drop for DashboardPage {
    fn drop(&mut self) {
        self.unwatch_theme();
    }
}
