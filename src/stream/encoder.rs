//! Producer side of the line protocol.

use futures::stream::{BoxStream, Stream};
use futures::StreamExt;

use super::decoder::{DATA_PREFIX, DONE_SENTINEL};
use crate::error::Result;
use crate::types::{StreamEvent, WireFrame};

/// Render one event as a complete frame line, including the trailing `\n`.
pub fn encode_frame(event: &StreamEvent) -> Result<String> {
    let payload = match WireFrame::from_event(event) {
        Some(frame) => serde_json::to_string(&frame)?,
        None => DONE_SENTINEL.to_string(),
    };
    Ok(format!("{DATA_PREFIX}{payload}\n"))
}

/// Render an event stream as frame lines.
///
/// Output stops after the first `Done`; if the source ends without one, the
/// terminator is appended so consumers always see a graceful end.
pub fn encode_stream<S>(events: S) -> BoxStream<'static, Result<String>>
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut inner = std::pin::pin!(events);
        let mut done = false;

        while let Some(event) = inner.next().await {
            done = event.is_done();
            yield encode_frame(&event);
            if done {
                break;
            }
        }

        if !done {
            yield encode_frame(&StreamEvent::Done);
        }
    };
    Box::pin(stream)
}
