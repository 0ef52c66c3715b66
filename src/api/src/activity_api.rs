use std::convert::Infallible;

use axum::{
    extract::Query,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures_util::Stream;
use tokio::sync::broadcast::error::RecvError;
use types::activity::{ListActivitiesResp, QueryParams};

use crate::AppResult;

pub fn routes() -> Router {
    Router::new()
        .route("/list", get(list_activities))
        .route("/stream", get(stream_activities))
}

async fn list_activities(Query(query): Query<QueryParams>) -> AppResult<Json<ListActivitiesResp>> {
    Ok(Json(events::search(query).await))
}

/// Pushes every activity insert to the client as one SSE event. A client
/// that falls behind the channel capacity misses events instead of
/// blocking writers.
async fn stream_activities() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = events::subscribe();
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(activity) => {
                    if let Ok(event) = Event::default().json_data(&activity) {
                        yield Ok(event);
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
