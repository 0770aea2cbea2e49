//! Session cookie plumbing

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};

use super::state::AppState;
use crate::attribution::AttributionTracker;

/// Tracker resolved for the current request
pub struct RequestSession {
    pub id: String,
    pub tracker: Arc<AttributionTracker>,
    pub is_new: bool,
}

impl RequestSession {
    /// Use the session cookie, or start a new session when the cookie is
    /// absent or names no live session. Ids are only ever minted here.
    pub fn get_or_create(req: &HttpRequest, state: &AppState) -> Self {
        if let Some(session) = Self::existing(req, state) {
            return session;
        }

        let id = crate::attribution::SessionRegistry::new_session_id();
        Self {
            tracker: state.sessions.tracker(&id),
            id,
            is_new: true,
        }
    }

    /// Look up an existing session without creating one
    pub fn existing(req: &HttpRequest, state: &AppState) -> Option<Self> {
        let cookie = req.cookie(&state.cookie_name)?;
        let tracker = state.sessions.existing(cookie.value())?;
        Some(Self {
            id: cookie.value().to_string(),
            tracker,
            is_new: false,
        })
    }

    /// Attach the session cookie when this request started the session
    pub fn attach(&self, builder: &mut HttpResponseBuilder, state: &AppState) {
        if self.is_new {
            builder.cookie(
                Cookie::build(state.cookie_name.clone(), self.id.clone())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish(),
            );
        }
    }
}
