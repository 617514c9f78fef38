//! Application Context
//!
//! Sync core handles plus the UI store, provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use taskboard_sync::{
    Auth, HttpClient, Loader, Mutations, Session, SessionGuard, SharedState, SyncConfig,
    SyncState, View,
};

use crate::storage;
use crate::store::{store_set_view, store_sync, UiStore};

/// Everything wired around one HTTP client and one shared state
#[derive(Clone)]
pub struct Core {
    pub config: SyncConfig,
    pub state: SharedState,
    pub guard: SessionGuard,
    pub loader: Rc<Loader<HttpClient>>,
    pub mutations: Rc<Mutations<HttpClient>>,
    pub auth: Rc<Auth<HttpClient>>,
}

impl Core {
    pub fn new(config: SyncConfig, session: Rc<Session>) -> Self {
        let state = SyncState::shared();
        let client = Rc::new(HttpClient::new(&config, session.clone()));
        Self {
            loader: Rc::new(Loader::new(client.clone(), state.clone())),
            mutations: Rc::new(Mutations::new(client.clone(), state.clone())),
            auth: Rc::new(Auth::new(client, session.clone(), state.clone())),
            guard: SessionGuard::new(session),
            state,
            config,
        }
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    core: StoredValue<Core, LocalStorage>,
    pub store: UiStore,
}

impl AppContext {
    pub fn new(core: Core, store: UiStore) -> Self {
        Self {
            core: StoredValue::new_local(core),
            store,
        }
    }

    /// Clone of the core handles, for use inside `spawn_local`
    pub fn core(&self) -> Core {
        self.core.get_value()
    }

    /// Push the core's current state into the reactive store
    pub fn refresh(&self) {
        let core = self.core();
        let state = core.state.borrow();
        store_sync(&self.store, &state);
    }

    /// Enter a view; `None` means an unknown location
    pub fn enter(&self, requested: Option<View>) {
        let view = self.core().guard.resolve(requested);
        storage::push_location(view);
        store_set_view(&self.store, view);
        self.refresh();
    }

    pub fn navigate(&self, view: View) {
        self.enter(Some(view));
    }

    /// Drop the token and everything cached for this user
    pub fn sign_out(&self) {
        let core = self.core();
        let next = core.guard.sign_out();
        core.state.borrow_mut().reset();
        self.navigate(next);
    }

    /// Queue a warning toast from the UI layer
    pub fn warn(&self, message: &str) {
        self.core().state.borrow_mut().notices.warning(message);
        self.refresh();
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
