// In-memory session store keyed by a browser cookie
use crate::domain::session::Session;
use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "aquaeco_session";

/// A session resolved for one request
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub session: Session,
    pub is_new: bool,
}

impl SessionHandle {
    /// `Set-Cookie` value to send back when the session was just created
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Sessions idle for longer than `idle_ttl` are evicted on the next access
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Look up the request's session, creating a fresh one with default
    /// settings when the cookie is absent, unknown or expired.
    pub async fn resolve(&self, headers: &HeaderMap) -> SessionHandle {
        self.update(headers, |_| {}).await
    }

    /// Apply `f` to the request's session and store the result
    pub async fn update<F>(&self, headers: &HeaderMap, f: F) -> SessionHandle
    where
        F: FnOnce(&mut Session),
    {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle sessions", evicted);
        }

        let (id, is_new) = match session_id(headers).filter(|id| sessions.contains_key(id)) {
            Some(id) => (id, false),
            None => {
                let id = Uuid::new_v4();
                tracing::debug!("Created session {}", id);
                (id, true)
            }
        };

        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            session: Session::new(today()),
            last_seen: now,
        });
        entry.last_seen = now;
        f(&mut entry.session);

        SessionHandle {
            id,
            session: entry.session.clone(),
            is_new,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}
