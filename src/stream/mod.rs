//! Streaming delivery: the `data:` line protocol in both directions.
//!
//! Each event is one line `data: <json>\n`; the literal line
//! `data: [DONE]\n` ends the stream.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode, events, parse_line, StreamDecoder, DATA_PREFIX, DONE_SENTINEL};
pub use encoder::{encode_frame, encode_stream};
