//! HTTP routes
//!
//! Thin axum adapter over [`ChatRelay`]. Handlers translate requests into
//! relay calls and relay errors into status codes; nothing else lives here.
//!
//! | Route | Method | Response |
//! |---|---|---|
//! | `/api/chat/get-history` | GET | JSON array of message strings |
//! | `/api/chat/send-message` | POST | empty 200, 400 if body is not a JSON string |
//! | `/api/events` | GET | `text/event-stream`, 404 unless the client accepts it |
//! | `/api/stats` | GET | JSON relay counters |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::Semaphore;

use crate::error::Error;
use crate::relay::ChatRelay;
use crate::server::config::ServerConfig;
use crate::sse;
use crate::stats::RelayStats;

/// History fetch route
pub const HISTORY_PATH: &str = "/api/chat/get-history";
/// Send route
pub const SEND_PATH: &str = "/api/chat/send-message";
/// Event stream route
pub const EVENTS_PATH: &str = "/api/events";
/// Stats route
pub const STATS_PATH: &str = "/api/stats";

/// Shared handler state
#[derive(Clone)]
struct AppState {
    relay: Arc<ChatRelay>,
    subscriber_slots: Option<Arc<Semaphore>>,
}

/// Build the router for a relay
pub fn router(relay: Arc<ChatRelay>, config: &ServerConfig) -> Router {
    let subscriber_slots =
        (config.max_connections > 0).then(|| Arc::new(Semaphore::new(config.max_connections)));

    let state = AppState {
        relay,
        subscriber_slots,
    };

    Router::new()
        .route(HISTORY_PATH, get(get_history))
        .route(SEND_PATH, post(send_message))
        .route(EVENTS_PATH, get(events))
        .route(STATS_PATH, get(get_stats))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(state)
}

async fn get_history(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.relay.history_texts())
}

async fn send_message(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, Error> {
    state.relay.send_json(&body)?;
    Ok(StatusCode::OK)
}

async fn get_stats(State(state): State<AppState>) -> Json<RelayStats> {
    Json(state.relay.stats())
}

async fn events(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, Error> {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());

    if !sse::accepts_event_stream(accept) {
        return Err(Error::NotEventStream);
    }

    // Take the slot before registering so a rejected request never counts
    // as a subscriber
    let permit = match state.subscriber_slots {
        Some(ref slots) => match Arc::clone(slots).try_acquire_owned() {
            Ok(permit) => Some(permit),
            Err(_) => {
                tracing::warn!("Subscriber rejected: limit reached");
                return Err(Error::SubscriberLimit);
            }
        },
        None => None,
    };

    let mut subscription = state.relay.subscribe()?;
    if let Some(permit) = permit {
        subscription = subscription.hold_permit(permit);
    }

    let keep_alive = KeepAlive::new().interval(state.relay.config().keep_alive_interval);
    let sse = Sse::new(subscription.into_events()).keep_alive(keep_alive);

    Ok(([(header::CONNECTION, "keep-alive")], sse).into_response())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            Error::NotEventStream => StatusCode::NOT_FOUND,
            Error::SubscriberLimit | Error::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            Error::Registry(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            Error::NotEventStream => "Page not Found".to_string(),
            other => other.to_string(),
        };

        (status, body).into_response()
    }
}
