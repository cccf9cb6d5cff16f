// Server-Sent Events streaming utilities
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Serialize;
use std::convert::Infallible;
use tokio::sync::watch;

/// Stream the current value of a watch channel, then one event per change.
///
/// `project` turns each value into the JSON payload of an event named `name`.
pub fn sse_from_watch<T, P, F>(
    mut rx: watch::Receiver<T>,
    name: &'static str,
    project: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: Send + Sync + 'static,
    P: Serialize,
    F: Fn(&T) -> P + Send + 'static,
{
    let stream = async_stream::stream! {
        loop {
            let event = {
                let value = rx.borrow_and_update();
                Event::default().event(name).json_data(project(&*value))
            };

            match event {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::error!("Failed to encode {} event: {}", name, e),
            }

            // Sender dropped: the service is shutting down
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
