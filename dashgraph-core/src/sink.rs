//! Render Sinks
//!
//! A sink receives exactly one view per affected output after every input
//! change. Drawing is out of scope here; the sinks in this module collect
//! views in memory or serialize them as frames for a renderer on the other
//! side of a pipe.
//!
//! # Frame formats
//!
//! - JSON lines: one `{"output": .., "view": ..}` object per line.
//! - MessagePack: the same frame encoded with named fields, prefixed by its
//!   length as a big-endian `u32`.

use std::io::Write;

use serde::Serialize;
use tracing::trace;

use crate::error::SinkError;

/// Consumer of computed views.
pub trait RenderSink<V> {
    /// Accept the latest view of `output`.
    fn deliver(&mut self, output: &str, view: &V) -> Result<(), SinkError>;

    /// Called once after all views of one input change were delivered.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct Frame<'a, V> {
    output: &'a str,
    view: &'a V,
}

/// Keeps every delivered view in memory, in delivery order.
#[derive(Debug, Clone)]
pub struct CollectingSink<V> {
    frames: Vec<(String, V)>,
    flushes: usize,
}

impl<V> CollectingSink<V> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            flushes: 0,
        }
    }

    pub fn frames(&self) -> &[(String, V)] {
        &self.frames
    }

    /// Output names in delivery order.
    pub fn outputs(&self) -> Vec<&str> {
        self.frames.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Most recent view delivered for `output`.
    pub fn last(&self, output: &str) -> Option<&V> {
        self.frames
            .iter()
            .rev()
            .find(|(name, _)| name == output)
            .map(|(_, view)| view)
    }

    /// Number of completed deliveries (one per input change).
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Drain the collected frames.
    pub fn take(&mut self) -> Vec<(String, V)> {
        std::mem::take(&mut self.frames)
    }
}

impl<V> Default for CollectingSink<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> RenderSink<V> for CollectingSink<V> {
    fn deliver(&mut self, output: &str, view: &V) -> Result<(), SinkError> {
        self.frames.push((output.to_string(), view.clone()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Writes each view as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<V: Serialize, W: Write> RenderSink<V> for JsonLinesSink<W> {
    fn deliver(&mut self, output: &str, view: &V) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &Frame { output, view })?;
        self.writer.write_all(b"\n")?;
        trace!(output, "json frame written");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each view as a length-prefixed MessagePack frame.
#[derive(Debug)]
pub struct MsgPackSink<W> {
    writer: W,
}

impl<W: Write> MsgPackSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<V: Serialize, W: Write> RenderSink<V> for MsgPackSink<W> {
    fn deliver(&mut self, output: &str, view: &V) -> Result<(), SinkError> {
        let bytes = rmp_serde::to_vec_named(&Frame { output, view })?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "frame exceeds u32::MAX bytes"))?;
        self.writer.write_all(&len.to_be_bytes())?;
        self.writer.write_all(&bytes)?;
        trace!(output, bytes = bytes.len(), "msgpack frame written");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ControlState, ViewModel};

    #[test]
    fn collecting_sink_keeps_order_and_latest() {
        let mut sink = CollectingSink::new();
        sink.deliver("a", &1).unwrap();
        sink.deliver("b", &2).unwrap();
        sink.deliver("a", &3).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.outputs(), ["a", "b", "a"]);
        assert_eq!(sink.last("a"), Some(&3));
        assert_eq!(sink.flushes(), 1);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.frames().is_empty());
    }

    #[test]
    fn json_lines_frames() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let view = ViewModel::Control(ControlState { disabled: false });
        sink.deliver("select-year", &view).unwrap();
        sink.deliver("output", &ViewModel::Empty).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["output"], "select-year");
        assert_eq!(first["view"]["kind"], "control");
    }

    #[test]
    fn msgpack_frames_are_length_prefixed() {
        let mut sink = MsgPackSink::new(Vec::new());
        sink.deliver("output", &ViewModel::Empty).unwrap();

        let bytes = sink.into_inner();
        let len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(bytes.len(), 4 + len);

        let value: serde_json::Value = rmp_serde::from_slice(&bytes[4..]).unwrap();
        assert_eq!(value["output"], "output");
        assert_eq!(value["view"]["kind"], "empty");
    }
}
