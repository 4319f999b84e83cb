//! Purpose: Render flattened values as pretty text with optional ANSI color.
//! Exports: colorize_value.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: Tuples render with parentheses so tuple-ness stays visible.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use rejig::api::{Scalar, Value};

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
// Avoid bright variants that can lose contrast on themes like Solarized.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

pub fn colorize_value(value: &Value, use_color: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, use_color, &mut out);
    out
}

fn write_value(value: &Value, indent: usize, use_color: bool, out: &mut String) {
    match value {
        Value::Scalar(scalar) => write_scalar(scalar, use_color, out),
        Value::Seq(items) | Value::Set(items) => {
            write_items(items, ("[", "]"), indent, use_color, out)
        }
        Value::Tuple(items) => write_items(items, ("(", ")"), indent, use_color, out),
        Value::Record(entries) => {
            write_entries(entries.iter(), entries.len(), indent, use_color, out)
        }
        Value::Node(node) => write_entries(node.attrs(), node.len(), indent, use_color, out),
        Value::Foreign(object) => {
            push_colored(&format!("<{}>", object.type_label()), COLOR_NULL, use_color, out)
        }
    }
}

fn write_scalar(scalar: &Scalar, use_color: bool, out: &mut String) {
    match scalar {
        Scalar::Null => push_colored("null", COLOR_NULL, use_color, out),
        Scalar::Bool(value) => {
            let text = if *value { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, use_color, out);
        }
        Scalar::Int(value) => push_colored(&value.to_string(), COLOR_NUMBER, use_color, out),
        Scalar::Float(value) => push_colored(&value.to_string(), COLOR_NUMBER, use_color, out),
        Scalar::Str(text) => {
            let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
            push_colored(&encoded, COLOR_STRING, use_color, out);
        }
        Scalar::Bytes(bytes) => {
            let joined = bytes
                .iter()
                .map(|byte| byte.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            push_colored(&format!("[{joined}]"), COLOR_NUMBER, use_color, out);
        }
    }
}

fn write_items(
    items: &[Value],
    (open, close): (&str, &str),
    indent: usize,
    use_color: bool,
    out: &mut String,
) {
    if items.is_empty() {
        push_colored(&format!("{open}{close}"), COLOR_PUNCT, use_color, out);
        return;
    }
    push_colored(open, COLOR_PUNCT, use_color, out);
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        push_indent(indent + 1, out);
        write_value(item, indent + 1, use_color, out);
        if idx + 1 < items.len() {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored(close, COLOR_PUNCT, use_color, out);
}

fn write_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    len: usize,
    indent: usize,
    use_color: bool,
    out: &mut String,
) {
    if len == 0 {
        push_colored("{}", COLOR_PUNCT, use_color, out);
        return;
    }
    push_colored("{", COLOR_PUNCT, use_color, out);
    out.push('\n');
    for (idx, (key, value)) in entries.enumerate() {
        push_indent(indent + 1, out);
        let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
        push_colored(&encoded, COLOR_KEY, use_color, out);
        push_colored(":", COLOR_PUNCT, use_color, out);
        out.push(' ');
        write_value(value, indent + 1, use_color, out);
        if idx + 1 < len {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored("}", COLOR_PUNCT, use_color, out);
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if use_color {
        out.push_str("\u{1b}[");
        out.push_str(color);
        out.push('m');
        out.push_str(text);
        out.push_str("\u{1b}[0m");
    } else {
        out.push_str(text);
    }
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
}
