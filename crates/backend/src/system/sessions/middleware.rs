use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use std::net::SocketAddr;

use super::repository::{self, Session};
use crate::shared::config;

pub const SESSION_HEADER: &str = "X-Session-ID";

/// Sessions exceeding this many requests get blocked outright.
pub const SESSION_REQUEST_CAP: i64 = 500;

/// Session id resolved for the current request. Handlers pull this out of
/// request extensions to correlate work with the caller.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// What to do with the session the client presented.
#[derive(Debug, PartialEq)]
pub enum Disposition {
    /// No usable session, mint a new id
    Fresh,
    /// Known live session, keep using it
    Reuse,
    /// Session is blocked, refuse the request
    Blocked,
}

/// Classify a looked-up session. Expired sessions are replaced rather than
/// revived, so stale ids quietly roll over to fresh ones.
pub fn classify(session: Option<&Session>, now: DateTime<Utc>, timeout_minutes: i64) -> Disposition {
    let session = match session {
        Some(s) => s,
        None => return Disposition::Fresh,
    };

    if session.is_blocked {
        return Disposition::Blocked;
    }

    match DateTime::parse_from_rfc3339(&session.last_activity) {
        Ok(last) => {
            if now.signed_duration_since(last.with_timezone(&Utc))
                > Duration::minutes(timeout_minutes)
            {
                Disposition::Fresh
            } else {
                Disposition::Reuse
            }
        }
        // Unparseable timestamp, treat the session as expired
        Err(_) => Disposition::Fresh,
    }
}

/// Middleware that resolves or creates the caller's session.
///
/// The resolved id is placed in request extensions and echoed back in the
/// response X-Session-ID header so the browser can persist it.
pub async fn session_tracker(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let timeout = config::get().limits.session_timeout_minutes;

    let existing = match &presented {
        Some(id) => repository::get_by_id(id).await.map_err(|e| {
            tracing::error!("Session lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?,
        None => None,
    };

    let session_id = match classify(existing.as_ref(), Utc::now(), timeout) {
        Disposition::Blocked => {
            tracing::warn!(session_id = ?presented, "Blocked session refused");
            return Err(StatusCode::FORBIDDEN);
        }
        Disposition::Reuse => {
            let session = existing.expect("Reuse implies a looked-up session");
            if session.request_count + 1 > SESSION_REQUEST_CAP {
                tracing::warn!(session_id = %session.id, "Session exceeded request cap, blocking");
                repository::block(&session.id).await.map_err(|e| {
                    tracing::error!("Failed to block session: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
                return Err(StatusCode::FORBIDDEN);
            }
            repository::touch(&session.id).await.map_err(|e| {
                tracing::error!("Failed to touch session: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            session.id
        }
        Disposition::Fresh => {
            let id = uuid::Uuid::new_v4().to_string();
            repository::create(&id, &addr.ip().to_string())
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create session: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
            tracing::debug!(session_id = %id, "New session started");
            id
        }
    };

    req.extensions_mut().insert(SessionId(session_id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(last_activity: DateTime<Utc>, blocked: bool) -> Session {
        Session {
            id: "s-1".into(),
            ip_address: "127.0.0.1".into(),
            created_at: last_activity.to_rfc3339(),
            last_activity: last_activity.to_rfc3339(),
            request_count: 5,
            is_blocked: blocked,
        }
    }

    #[test]
    fn missing_session_starts_fresh() {
        assert_eq!(classify(None, Utc::now(), 30), Disposition::Fresh);
    }

    #[test]
    fn live_session_is_reused() {
        let now = Utc::now();
        let s = session(now - Duration::minutes(5), false);
        assert_eq!(classify(Some(&s), now, 30), Disposition::Reuse);
    }

    #[test]
    fn idle_session_rolls_over() {
        let now = Utc::now();
        let s = session(now - Duration::minutes(31), false);
        assert_eq!(classify(Some(&s), now, 30), Disposition::Fresh);
    }

    #[test]
    fn blocked_session_is_refused_even_when_idle() {
        let now = Utc::now();
        let s = session(now - Duration::hours(5), true);
        assert_eq!(classify(Some(&s), now, 30), Disposition::Blocked);
    }

    #[test]
    fn garbage_timestamp_counts_as_expired() {
        let mut s = session(Utc::now(), false);
        s.last_activity = "not-a-timestamp".into();
        assert_eq!(classify(Some(&s), Utc::now(), 30), Disposition::Fresh);
    }
}
