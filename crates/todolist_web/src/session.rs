//! Per-user session state: lists for the session backend and one-shot
//! flash messages.
//!
//! # Responsibility
//! - Resolve the session from the request cookie at request start.
//! - Hold flash messages until the next rendered page consumes them.
//!
//! # Invariants
//! - Flash messages are cleared by `FlashBag::take`; a message is shown
//!   on exactly one page.
//! - Sessions are process-local; there is no cross-session sharing.

use std::collections::HashMap;
use todolist_core::SessionLists;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "todolist_session";

/// One-shot error/success messages pending display.
#[derive(Debug, Default)]
pub struct FlashBag {
    error: Option<String>,
    success: Option<String>,
}

impl FlashBag {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Consumes pending messages; called once per rendered page.
    pub fn take(&mut self) -> FlashMessages {
        FlashMessages {
            error: self.error.take(),
            success: self.success.take(),
        }
    }
}

/// Messages handed to the view layer for one render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlashMessages {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// State owned by one browser session.
#[derive(Debug, Default)]
pub struct Session {
    pub lists: SessionLists,
    pub flash: FlashBag,
}

/// Process-local registry of sessions keyed by cookie token.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the session id for a request; returns `(id, created)` where
    /// `created` means the response must set the session cookie.
    pub fn resolve(&mut self, cookie_header: Option<&str>) -> (Uuid, bool) {
        if let Some(id) = cookie_header.and_then(session_id_from_cookie) {
            self.sessions.entry(id).or_default();
            return (id, false);
        }

        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::default());
        (id, true)
    }

    pub fn session_mut(&mut self, id: Uuid) -> &mut Session {
        self.sessions.entry(id).or_default()
    }
}

/// Extracts the session token from a `Cookie` header value.
pub fn session_id_from_cookie(header: &str) -> Option<Uuid> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{session_id_from_cookie, FlashBag, SessionRegistry, SESSION_COOKIE};
    use uuid::Uuid;

    #[test]
    fn take_clears_flash_messages() {
        let mut flash = FlashBag::default();
        flash.set_error("bad input");
        flash.set_success("saved");

        let taken = flash.take();
        assert_eq!(taken.error.as_deref(), Some("bad input"));
        assert_eq!(taken.success.as_deref(), Some("saved"));

        let second = flash.take();
        assert!(second.error.is_none());
        assert!(second.success.is_none());
    }

    #[test]
    fn cookie_parsing_finds_the_session_token() {
        let id = Uuid::new_v4();
        let header = format!("theme=dark; {SESSION_COOKIE}={id}; lang=en");
        assert_eq!(session_id_from_cookie(&header), Some(id));

        assert_eq!(session_id_from_cookie("theme=dark"), None);
        assert_eq!(
            session_id_from_cookie(&format!("{SESSION_COOKIE}=not-a-uuid")),
            None
        );
    }

    #[test]
    fn resolve_reuses_known_sessions_and_creates_missing_ones() {
        let mut registry = SessionRegistry::new();

        let (first, created) = registry.resolve(None);
        assert!(created);

        let header = format!("{SESSION_COOKIE}={first}");
        let (again, created) = registry.resolve(Some(&header));
        assert_eq!(again, first);
        assert!(!created);
    }

    #[test]
    fn sessions_are_isolated_per_token() {
        let mut registry = SessionRegistry::new();
        let (first, _) = registry.resolve(None);
        let (second, _) = registry.resolve(None);
        assert_ne!(first, second);

        registry.session_mut(first).flash.set_error("only here");
        let other = registry.session_mut(second).flash.take();
        assert!(other.error.is_none());
    }
}
