// Diagnostic tree printer for loaded nodes. Human-oriented output,
// indentation proportional to depth; never a machine contract.
use std::io;

use crate::core::node::Node;
use crate::core::value::Value;

/// Spaces per nesting level when callers do not pick their own.
pub const DEFAULT_INDENT: usize = 10;

/// Writes an indented dump of `node` and everything beneath it.
/// Read-only; recurses into node attributes, record entries, and
/// sequence elements.
pub fn detail<W: io::Write>(node: &Node, out: &mut W, indent: usize) -> io::Result<()> {
    writeln!(out, "\u{221f} node[{}]", node.len())?;
    for (key, value) in node.attrs() {
        write_value(value, Some(key), 1, indent, out)?;
    }
    Ok(())
}

fn write_value<W: io::Write>(
    value: &Value,
    label: Option<&str>,
    level: usize,
    indent: usize,
    out: &mut W,
) -> io::Result<()> {
    let pad = " ".repeat(level * indent);
    match label {
        Some(label) => writeln!(out, "{pad}\u{221f} {label} -> {}", summary(value))?,
        None => writeln!(out, "{pad}\u{221f} {}", summary(value))?,
    }
    match value {
        Value::Node(node) => {
            for (key, value) in node.attrs() {
                write_value(value, Some(key), level + 1, indent, out)?;
            }
        }
        Value::Record(entries) => {
            for (key, value) in entries {
                write_value(value, Some(key), level + 1, indent, out)?;
            }
        }
        Value::Seq(items) | Value::Tuple(items) | Value::Set(items) => {
            for item in items {
                write_value(item, None, level + 1, indent, out)?;
            }
        }
        Value::Scalar(_) | Value::Foreign(_) => {}
    }
    Ok(())
}

fn summary(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => scalar.to_string(),
        Value::Seq(items) => format!("list[{}]", items.len()),
        Value::Tuple(items) => format!("tuple[{}]", items.len()),
        Value::Set(items) => format!("set[{}]", items.len()),
        Value::Record(entries) => format!("record[{}]", entries.len()),
        Value::Node(node) => format!("node[{}]", node.len()),
        Value::Foreign(object) => format!("foreign<{}>", object.type_label()),
    }
}
