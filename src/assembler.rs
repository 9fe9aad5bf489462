use crate::error::{Error, Result};
use crate::value::Value;
use crate::xml::XmlEvent;


/// One open element inside a target subtree: its in-progress `Object`, the
/// text seen so far between its tags, and whether any child element has
/// already been folded into the object (attributes alone don't count).
struct Frame {
    name: String,
    obj: Value,
    text: String,
    has_children: bool,
}

impl Frame {
    fn new(name: String) -> Frame {
        Frame { name, obj: Value::Object(Vec::new()), text: String::new(), has_children: false }
    }

    fn push_attr(&mut self, key: &str, value: String) {
        if let Value::Object(entries) = &mut self.obj {
            entries.push((format!("@{key}"), Value::String(value)));
        }
    }
}

/// Scope tracking plus record assembly (spec §4.3/§4.4 combined): tracks
/// element-path depth, detects entry/exit of the named target element at
/// whatever depth it occurs, and — while inside a target subtree —
/// materializes one [`Value`] per occurrence from the event stream.
pub(crate) struct Assembler {
    target_name: String,
    max_record_bytes: Option<usize>,
    depth: usize,
    target_depth: Option<usize>,
    frames: Vec<Frame>,
    record_bytes: usize,
}

impl Assembler {
    pub(crate) fn new(target_name: String, max_record_bytes: Option<usize>) -> Assembler {
        Assembler {
            target_name,
            max_record_bytes,
            depth: 0,
            target_depth: None,
            frames: Vec::new(),
            record_bytes: 0,
        }
    }

    /// Feeds one token to the state machine. Returns `Some(value)` exactly
    /// when this event closed a target-element occurrence.
    pub(crate) fn handle(&mut self, event: &XmlEvent) -> Result<Option<Value>> {
        match event {
            XmlEvent::Start { name, attrs } => self.start(name, attrs).map(|()| None),
            XmlEvent::Text(text) | XmlEvent::CData(text) => self.text(text).map(|()| None),
            XmlEvent::End { name } => self.end(name),
            XmlEvent::Eof => Ok(None),
        }
    }

    /// True once every open frame has been closed and no target subtree is
    /// in progress; the driver checks this at end-of-document.
    pub(crate) fn is_idle(&self) -> bool {
        self.target_depth.is_none() && self.frames.is_empty() && self.depth == 0
    }

    fn start(&mut self, name: &str, attrs: &[(String, String)]) -> Result<()> {
        self.depth += 1;

        if self.target_depth.is_none() && name == self.target_name {
            self.target_depth = Some(self.depth);
            self.record_bytes = 0;
        }

        if self.target_depth.is_some() {
            let mut frame = Frame::new(name.to_string());
            for (key, value) in attrs {
                self.charge(key.len() + value.len())?;
                frame.push_attr(key, value.clone());
            }
            self.frames.push(frame);
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };
        self.record_bytes = self.record_bytes.checked_add(text.len()).unwrap_or(usize::MAX);
        if let Some(limit) = self.max_record_bytes {
            if self.record_bytes > limit {
                return Err(Error::resource_limit(format!(
                    "record exceeds the configured limit of {limit} bytes"
                )));
            }
        }
        frame
            .text
            .try_reserve(text.len())
            .map_err(|_| Error::memory("failed to grow a record's text buffer"))?;
        frame.text.push_str(text);
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<Option<Value>> {
        if self.target_depth.is_none() {
            self.depth -= 1;
            return Ok(None);
        }

        let frame = self
            .frames
            .pop()
            .expect("a frame is pushed for every Start seen while inside a target subtree");
        if frame.name != name {
            return Err(Error::parse(
                format!("mismatched closing tag: expected </{}>, found </{}>", frame.name, name),
                None,
            ));
        }

        let value = Self::finish_frame(frame);

        let is_target_close = self.target_depth == Some(self.depth);
        self.depth -= 1;

        if is_target_close {
            self.target_depth = None;
            debug_assert!(self.frames.is_empty());
            Ok(Some(value))
        } else {
            let parent = self.frames.last_mut().expect("a target subtree's frame stack is never empty mid-subtree");
            parent.obj.push_child(name, value);
            parent.has_children = true;
            Ok(None)
        }
    }

    fn charge(&mut self, bytes: usize) -> Result<()> {
        self.record_bytes = self.record_bytes.checked_add(bytes).unwrap_or(usize::MAX);
        if let Some(limit) = self.max_record_bytes {
            if self.record_bytes > limit {
                return Err(Error::resource_limit(format!(
                    "record exceeds the configured limit of {limit} bytes"
                )));
            }
        }
        Ok(())
    }

    fn finish_frame(frame: Frame) -> Value {
        let trimmed = frame.text.trim_matches(|c: char| c.is_ascii_whitespace());
        let has_text = !trimmed.is_empty();
        let Value::Object(mut entries) = frame.obj else {
            unreachable!("a frame's working value is always an Object");
        };

        if entries.is_empty() && !frame.has_children {
            if has_text {
                Value::String(trimmed.to_string())
            } else {
                Value::Null
            }
        } else if frame.has_children {
            Value::Object(entries)
        } else if has_text {
            entries.push(("#text".to_string(), Value::String(trimmed.to_string())));
            Value::Object(entries)
        } else {
            Value::Object(entries)
        }
    }
}
