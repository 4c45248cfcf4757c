//! JSON snapshot encoding.

use crate::models::Subscription;
use serde::Serialize;
use std::error::Error;

/// Serialize the tree as a pretty JSON document.
///
/// 4-space indentation; non-ASCII characters are written literally, not
/// escaped. Provider metadata carried in the flattened `extra` maps is
/// included as-is.
pub fn render_json(tree: &[Subscription]) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
