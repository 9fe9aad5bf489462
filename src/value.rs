use std::fmt::Write as _;


/// The intermediate in-memory record.
///
/// A deliberately small sum type rather than a dynamic dictionary: records
/// assembled from one target-element subtree are small and short-lived, so
/// a `Vec` of pairs beats a hash map both in allocation cost and in
/// preserving document order among same-named children.
///
/// `Array` exists purely to hold same-named child elements in document
/// order (spec.md's child-array rule); it is never produced on its own —
/// only as the value of an `Object` entry created for a child element name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Null,
    String(String),
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
}

impl Value {
    /// Appends a child value under `key` on an `Object` frame, creating a
    /// one-element array the first time `key` is seen and pushing onto it
    /// thereafter. `self` must already be an `Object` — the assembler only
    /// ever calls this on parent frames, which are always objects.
    pub(crate) fn push_child(&mut self, key: &str, child: Value) {
        let Value::Object(entries) = self else {
            unreachable!("push_child called on a non-Object parent frame");
        };
        for (k, existing) in entries.iter_mut() {
            if k == key {
                if let Value::Array(items) = existing {
                    items.push(child);
                    return;
                }
            }
        }
        entries.push((key.to_string(), Value::Array(vec![child])));
    }

    /// Writes this value as a single line of compact JSON, terminated by `\n`.
    pub(crate) fn encode_line(&self, out: &mut String) {
        self.encode(out);
        out.push('\n');
    }

    fn encode(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::String(s) => encode_string(s, out),
            Value::Object(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    encode_string(key, out);
                    out.push(':');
                    value.encode(out);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.encode(out);
                }
                out.push(']');
            }
        }
    }
}

/// Escapes and quotes a string per strict JSON rules: `"`, `\`, control
/// characters below `0x20` (with the six named shorthands where they
/// apply), everything else verbatim — including non-ASCII UTF-8, which
/// needs no escaping in JSON.
fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
