// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree geometry dumps.
//!
//! [`write_tree`] renders a subtree as indented text, one node per line, and
//! [`to_json`] renders it as nested JSON objects. Both measure on demand, so
//! the output is current even without a preceding update.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use sprig_core::node::{MetaValue, NodeId, NodeStore};

/// Writes `root` and its descendants as indented text.
///
/// Each line shows the kind, the name (if any), the parent-relative rectangle,
/// and a `disabled` marker for disabled nodes.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn write_tree(store: &mut NodeStore, root: NodeId, writer: &mut dyn Write) -> io::Result<()> {
    write_node(store, root, 0, writer)
}

fn write_node(
    store: &mut NodeStore,
    id: NodeId,
    depth: usize,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let rect = store.local_rect(id);
    write!(writer, "{:indent$}{}", "", store.kind(id), indent = depth * 2)?;
    if let Some(name) = store.name(id) {
        write!(writer, " \"{name}\"")?;
    }
    write!(
        writer,
        " [{} {} {}x{}]",
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height()
    )?;
    if !store.is_enabled(id) {
        write!(writer, " disabled")?;
    }
    writeln!(writer)?;

    let children: Vec<NodeId> = store.children(id).collect();
    for child in children {
        write_node(store, child, depth + 1, writer)?;
    }
    Ok(())
}

/// Renders `root` and its descendants as a JSON object.
pub fn to_json(store: &mut NodeStore, root: NodeId) -> Value {
    let rect = store.local_rect(root);
    let global = store.global_rect(root);
    let metadata: Map<String, Value> = store
        .metadata_entries(root)
        .map(|(key, value)| (key.to_owned(), meta_to_json(value)))
        .collect();
    let children: Vec<NodeId> = store.children(root).collect();
    let children: Vec<Value> = children
        .into_iter()
        .map(|child| to_json(store, child))
        .collect();

    json!({
        "index": root.index(),
        "kind": store.kind(root),
        "name": store.name(root),
        "enabled": store.is_enabled(root),
        "local": [rect.x0, rect.y0, rect.width(), rect.height()],
        "global": [global.x0, global.y0, global.width(), global.height()],
        "metadata": metadata,
        "children": children,
    })
}

fn meta_to_json(value: &MetaValue) -> Value {
    match value {
        MetaValue::Bool(b) => Value::Bool(*b),
        MetaValue::Int(i) => json!(i),
        MetaValue::Float(f) => json!(f),
        MetaValue::Text(s) => Value::String(s.clone()),
    }
}
