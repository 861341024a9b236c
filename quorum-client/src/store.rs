use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::api::{AuthToken, Error, ReplyId, ThreadId, User};

pub const KEY_THEME: &str = "theme";
pub const KEY_THREAD_TOKENS: &str = "thread-owner-tokens";
pub const KEY_REPLY_TOKENS: &str = "reply-owner-tokens";
pub const KEY_AUTH_TOKEN: &str = "auth-token";
pub const KEY_AUTH_USER: &str = "auth-user";

/// Durable string key-value backend for [`Store`].
///
/// Browser builds implement this over LocalStorage; tests use
/// [`MemoryState`]. Writes are best-effort: a failed write is logged and
/// ignored, never surfaced.
pub trait StateStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory [`StateStore`] sharing its map across clones, so a test can drop
/// a [`Store`] and re-[`load`] from the same backend to simulate a reload.
///
/// [`load`]: Store::load
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryState {
    pub fn new() -> MemoryState {
        MemoryState::default()
    }
}

impl StateStore for MemoryState {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(String::from(key), String::from(value));
    }

    fn remove(&mut self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// An entity this browser may have created. Thread and reply ids live in
/// separate spaces that can numerically coincide, hence separate variants
/// (and separate persisted maps).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Owned {
    Thread(ThreadId),
    Reply(ReplyId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub token: AuthToken,
    pub user: User,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Browser-wide mutable state: the two owner-token maps, the session and the
/// theme preference, write-through persisted to a [`StateStore`].
///
/// Every mutation flushes the affected key synchronously, so a page reload at
/// any point retains delete capability.
pub struct Store<S> {
    backend: S,
    thread_tokens: HashMap<ThreadId, String>,
    reply_tokens: HashMap<ReplyId, String>,
    session: Option<Session>,
    theme: Theme,
    auth_required: bool,
}

impl<S: StateStore> Store<S> {
    /// Rehydrates from the backend. Missing or malformed values fall back to
    /// empty/absent defaults instead of failing startup.
    pub fn load(backend: S, auth_required: bool) -> Store<S> {
        let thread_tokens = read_json(&backend, KEY_THREAD_TOKENS).unwrap_or_default();
        let reply_tokens = read_json(&backend, KEY_REPLY_TOKENS).unwrap_or_default();
        let theme = read_json(&backend, KEY_THEME).unwrap_or_default();
        let session = match (
            read_json(&backend, KEY_AUTH_TOKEN),
            read_json(&backend, KEY_AUTH_USER),
        ) {
            (Some(token), Some(user)) => Some(Session { token, user }),
            // a half-persisted session is as good as none
            _ => None,
        };
        Store {
            backend,
            thread_tokens,
            reply_tokens,
            session,
            theme,
            auth_required,
        }
    }

    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    /// Remembers the delete secret for an entity this client just created.
    pub fn record_ownership(&mut self, entity: Owned, token: String) {
        match entity {
            Owned::Thread(id) => {
                self.thread_tokens.insert(id, token);
                write_json(&mut self.backend, KEY_THREAD_TOKENS, &self.thread_tokens);
            }
            Owned::Reply(id) => {
                self.reply_tokens.insert(id, token);
                write_json(&mut self.backend, KEY_REPLY_TOKENS, &self.reply_tokens);
            }
        }
    }

    /// Drops the delete secret after a confirmed successful deletion. Not
    /// called on failed deletes, so the user can retry.
    pub fn forget_ownership(&mut self, entity: Owned) {
        match entity {
            Owned::Thread(id) => {
                self.thread_tokens.remove(&id);
                write_json(&mut self.backend, KEY_THREAD_TOKENS, &self.thread_tokens);
            }
            Owned::Reply(id) => {
                self.reply_tokens.remove(&id);
                write_json(&mut self.backend, KEY_REPLY_TOKENS, &self.reply_tokens);
            }
        }
    }

    pub fn owner_token(&self, entity: Owned) -> Option<&str> {
        match entity {
            Owned::Thread(id) => self.thread_tokens.get(&id).map(|t| t as &str),
            Owned::Reply(id) => self.reply_tokens.get(&id).map(|t| t as &str),
        }
    }

    /// True iff a token is recorded for the entity and the session
    /// precondition holds (a session exists, or this store was configured
    /// for the anonymous-only variant).
    pub fn can_delete(&self, entity: Owned) -> bool {
        self.owner_token(entity).is_some() && self.session_precondition()
    }

    /// Local precondition for create operations: the bearer token to attach,
    /// or `None` in the anonymous-only variant.
    pub fn require_session(&self) -> Result<Option<&AuthToken>, Error> {
        match (&self.session, self.auth_required) {
            (Some(s), _) => Ok(Some(&s.token)),
            (None, false) => Ok(None),
            (None, true) => Err(Error::SignedOut),
        }
    }

    /// Local precondition for delete operations.
    pub fn require_owner_token(&self, entity: Owned) -> Result<&str, Error> {
        if !self.session_precondition() {
            return Err(Error::SignedOut);
        }
        self.owner_token(entity).ok_or(Error::NotOwner)
    }

    fn session_precondition(&self) -> bool {
        !self.auth_required || self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_session(&mut self, token: AuthToken, user: User) {
        write_json(&mut self.backend, KEY_AUTH_TOKEN, &token);
        write_json(&mut self.backend, KEY_AUTH_USER, &user);
        self.session = Some(Session { token, user });
    }

    /// Idempotent: clearing an absent session is a no-op.
    pub fn clear_session(&mut self) {
        self.session = None;
        self.backend.remove(KEY_AUTH_TOKEN);
        self.backend.remove(KEY_AUTH_USER);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        write_json(&mut self.backend, KEY_THEME, &theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }
}

fn read_json<S: StateStore, T: serde::de::DeserializeOwned>(backend: &S, key: &str) -> Option<T> {
    let raw = backend.read(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed persisted state");
            None
        }
    }
}

fn write_json<S: StateStore, T: serde::Serialize>(backend: &mut S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => backend.write(key, &json),
        Err(e) => tracing::warn!(key, error = %e, "failed serializing state for persistence"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserId;

    fn user() -> User {
        User {
            id: UserId(12),
            username: String::from("ada"),
            email: String::from("ada@example.org"),
        }
    }

    fn signed_in_store(state: MemoryState) -> Store<MemoryState> {
        let mut store = Store::load(state, true);
        store.set_session(AuthToken(String::from("tok")), user());
        store
    }

    #[test]
    fn can_delete_needs_both_token_and_session() {
        let mut store = Store::load(MemoryState::new(), true);
        let entity = Owned::Thread(ThreadId(1));

        // no token, no session
        assert!(!store.can_delete(entity));

        // token but no session
        store.record_ownership(entity, String::from("abc123"));
        assert!(!store.can_delete(entity));
        assert_eq!(store.require_owner_token(entity), Err(Error::SignedOut));

        // token and session
        store.set_session(AuthToken(String::from("tok")), user());
        assert!(store.can_delete(entity));
        assert_eq!(store.require_owner_token(entity), Ok("abc123"));

        // session but no token
        assert!(!store.can_delete(Owned::Thread(ThreadId(2))));
        assert_eq!(
            store.require_owner_token(Owned::Thread(ThreadId(2))),
            Err(Error::NotOwner)
        );
    }

    #[test]
    fn anonymous_variant_skips_session_precondition() {
        let mut store = Store::load(MemoryState::new(), false);
        let entity = Owned::Reply(ReplyId(5));
        store.record_ownership(entity, String::from("abc123"));
        assert!(store.can_delete(entity));
        assert_eq!(store.require_session(), Ok(None));
        assert_eq!(store.require_owner_token(entity), Ok("abc123"));
    }

    #[test]
    fn thread_and_reply_maps_are_independent() {
        let mut store = signed_in_store(MemoryState::new());
        // same numeric id on purpose
        store.record_ownership(Owned::Thread(ThreadId(7)), String::from("ttt"));
        assert!(store.can_delete(Owned::Thread(ThreadId(7))));
        assert!(!store.can_delete(Owned::Reply(ReplyId(7))));

        store.record_ownership(Owned::Reply(ReplyId(7)), String::from("rrr"));
        store.forget_ownership(Owned::Thread(ThreadId(7)));
        assert!(!store.can_delete(Owned::Thread(ThreadId(7))));
        assert!(store.can_delete(Owned::Reply(ReplyId(7))));
        assert_eq!(store.owner_token(Owned::Reply(ReplyId(7))), Some("rrr"));
    }

    #[test]
    fn ownership_survives_reload() {
        let state = MemoryState::new();
        let mut store = signed_in_store(state.clone());
        store.record_ownership(Owned::Thread(ThreadId(3)), String::from("abc123"));
        store.record_ownership(Owned::Reply(ReplyId(9)), String::from("def456"));
        drop(store);

        let reloaded = Store::load(state, true);
        assert!(reloaded.signed_in());
        assert_eq!(
            reloaded.owner_token(Owned::Thread(ThreadId(3))),
            Some("abc123")
        );
        assert_eq!(reloaded.owner_token(Owned::Reply(ReplyId(9))), Some("def456"));
        assert!(reloaded.can_delete(Owned::Thread(ThreadId(3))));
    }

    #[test]
    fn failed_delete_keeps_the_token() {
        // the app only calls forget_ownership after a successful delete; a
        // failed request goes through no store mutation at all, so the token
        // and can_delete stay intact
        let mut store = signed_in_store(MemoryState::new());
        let entity = Owned::Thread(ThreadId(1));
        store.record_ownership(entity, String::from("abc123"));
        assert!(store.can_delete(entity));
        assert!(store.can_delete(entity)); // still true after a "failed" round
    }

    #[test]
    fn malformed_persisted_state_degrades_to_defaults() {
        let mut state = MemoryState::new();
        state.write(KEY_THREAD_TOKENS, "{not json");
        state.write(KEY_REPLY_TOKENS, "[1, 2, 3]");
        state.write(KEY_THEME, "\"mauve\"");
        state.write(KEY_AUTH_TOKEN, "\"tok\"");
        state.write(KEY_AUTH_USER, "42");

        let store = Store::load(state, true);
        assert_eq!(store.owner_token(Owned::Thread(ThreadId(1))), None);
        assert_eq!(store.theme(), Theme::Light);
        assert!(!store.signed_in());
    }

    #[test]
    fn half_persisted_session_is_no_session() {
        let mut state = MemoryState::new();
        state.write(KEY_AUTH_TOKEN, "\"tok\"");
        let store = Store::load(state, true);
        assert!(!store.signed_in());
    }

    #[test]
    fn clear_session_is_idempotent() {
        let mut store = signed_in_store(MemoryState::new());
        store.clear_session();
        assert!(!store.signed_in());
        store.clear_session();
        assert!(!store.signed_in());
        assert_eq!(store.require_session(), Err(Error::SignedOut));
    }

    #[test]
    fn session_state_machine() {
        let state = MemoryState::new();
        let mut store = Store::load(state.clone(), true);
        assert!(!store.signed_in());

        store.set_session(AuthToken(String::from("tok")), user());
        assert!(store.signed_in());
        assert_eq!(store.session().unwrap().user.username, "ada");

        // the session survives a reload...
        let mut store = Store::load(state.clone(), true);
        assert!(store.signed_in());

        // ...until signed out, which also survives a reload
        store.clear_session();
        let store = Store::load(state, true);
        assert!(!store.signed_in());
    }

    #[test]
    fn theme_round_trips_human_readable() {
        let state = MemoryState::new();
        let mut store = Store::load(state.clone(), true);
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(state.read(KEY_THEME).as_deref(), Some("\"dark\""));
        let store = Store::load(state, true);
        assert_eq!(store.theme(), Theme::Dark);
    }
}
