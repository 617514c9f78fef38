//! Session and Session Guard
//!
//! The session holds the bearer token for the signed-in user. The guard is a
//! synchronous gate evaluated on every render: it never validates the token
//! against the server, an expired token simply surfaces as failed requests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::models::ProjectId;

// ========================
// Token persistence
// ========================

/// Where the token survives page reloads. The browser build stores it in
/// `localStorage`; tests keep it in memory.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

// ========================
// Session
// ========================

/// Process-wide authentication state with an explicit init/clear lifecycle
pub struct Session {
    token: RefCell<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Restore whatever token the store already holds
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self {
            token: RefCell::new(token),
            store: Box::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    pub fn init(&self, token: impl Into<String>) {
        let token = token.into();
        self.store.save(&token);
        *self.token.borrow_mut() = Some(token);
        log::info!("[SESSION] signed in");
    }

    pub fn clear(&self) {
        self.store.clear();
        *self.token.borrow_mut() = None;
        log::info!("[SESSION] signed out");
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_present(&self) -> bool {
        self.token.borrow().is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the token itself
        f.debug_struct("Session")
            .field("authenticated", &self.is_present())
            .finish()
    }
}

// ========================
// Views and the guard
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    SignIn,
    Dashboard,
    ProjectDetail(ProjectId),
}

impl View {
    pub fn is_protected(&self) -> bool {
        !matches!(self, View::SignIn)
    }

    /// Map a browser location onto a view; `None` for unknown paths
    pub fn from_path(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Some(View::SignIn),
            ["dashboard"] => Some(View::Dashboard),
            ["project", id] => id.parse().ok().map(View::ProjectDetail),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            View::SignIn => "/login".to_string(),
            View::Dashboard => "/dashboard".to_string(),
            View::ProjectDetail(id) => format!("/project/{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    Render(V),
    Redirect(View),
}

#[derive(Debug, Clone)]
pub struct SessionGuard {
    session: Rc<Session>,
}

impl SessionGuard {
    pub fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_present()
    }

    pub fn require_auth<V>(&self, view: V) -> Guarded<V> {
        if self.is_authenticated() {
            Guarded::Render(view)
        } else {
            Guarded::Redirect(View::SignIn)
        }
    }

    /// Final view for a requested location.
    ///
    /// Sign-in is always reachable, protected views need a session and an
    /// unknown location lands on the dashboard or on sign-in.
    pub fn resolve(&self, requested: Option<View>) -> View {
        match requested {
            Some(View::SignIn) => View::SignIn,
            Some(view) => match self.require_auth(view) {
                Guarded::Render(view) => view,
                Guarded::Redirect(to) => to,
            },
            None if self.is_authenticated() => View::Dashboard,
            None => View::SignIn,
        }
    }

    pub fn sign_out(&self) -> View {
        self.session.clear();
        View::SignIn
    }
}
