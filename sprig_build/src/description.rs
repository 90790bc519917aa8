// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative node descriptions and their JSON form.
//!
//! A JSON description is an object with a required `type` and any of these
//! optional keys:
//!
//! | Key | Value |
//! | --- | --- |
//! | `name` | string |
//! | `index`, `enabled`, `ignore_layout`, `volatile` | boolean |
//! | `width`, `height` | number, `"N%"`, `"auto"`, or `null` |
//! | `left`, `top`, `grow` | number |
//! | `margin`, `padding` | number or `[left, top, right, bottom]` |
//! | `anchor`, `origin`, `fill`, `scale` | number or `[x, y]` |
//! | `flex` | `"none"`, `"horizontal"`, or `"vertical"` |
//! | `align_x`, `align_y` | `"start"`, `"center"`, or `"end"` |
//! | `metadata` | object of booleans, numbers, and strings |
//! | `children` | array of descriptions |
//!
//! Unknown keys are rejected.

use kurbo::{Insets, Vec2};
use serde_json::Value;

use sprig_core::geometry::{Align, FlexMode, Size};
use sprig_core::node::{MetaValue, NodeOptions, Style};

use crate::error::BuildError;

/// A recursive description of a node and its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct Description {
    /// Kind tag looked up in the [`Registry`](crate::Registry).
    pub kind: String,
    /// Name, index, enabled state, and style.
    pub options: NodeOptions,
    /// Metadata entries, applied in order.
    pub metadata: Vec<(String, MetaValue)>,
    /// Child descriptions, in placement order.
    pub children: Vec<Self>,
}

impl Description {
    /// Creates an unnamed description of the given kind with default options.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: NodeOptions::default(),
            metadata: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the node name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.options.style = style;
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Appends a child description.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up a metadata entry by key, last entry first.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&MetaValue> {
        self.metadata
            .iter()
            .rev()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Parses a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedDescription`] if the text is not JSON or
    /// does not describe a node, and [`BuildError::Layout`] for malformed size
    /// strings.
    pub fn from_json_str(text: &str) -> Result<Self, BuildError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| BuildError::malformed("", e.to_string()))?;
        Self::from_json(&value)
    }

    /// Reads a description from a parsed JSON value.
    ///
    /// # Errors
    ///
    /// See [`from_json_str`](Self::from_json_str).
    pub fn from_json(value: &Value) -> Result<Self, BuildError> {
        read_node(value, "")
    }
}

fn read_node(value: &Value, at: &str) -> Result<Description, BuildError> {
    let Some(object) = value.as_object() else {
        return Err(BuildError::malformed(at, "expected an object"));
    };
    let kind = match object.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        Some(_) => return Err(BuildError::malformed(&join(at, "type"), "expected a string")),
        None => return Err(BuildError::malformed(at, "missing `type`")),
    };

    let mut description = Description::new(kind);
    for (key, value) in object {
        let here = join(at, key);
        let options = &mut description.options;
        let style = &mut options.style;
        match key.as_str() {
            "type" => {}
            "name" => options.name = Some(read_str(value, &here)?.to_owned()),
            "index" => options.index = read_bool(value, &here)?,
            "enabled" => options.enabled = read_bool(value, &here)?,
            "width" => style.width = read_size(value, &here)?,
            "height" => style.height = read_size(value, &here)?,
            "left" => style.left = read_f64(value, &here)?.into(),
            "top" => style.top = read_f64(value, &here)?.into(),
            "margin" => style.margin = read_insets(value, &here)?,
            "padding" => style.padding = read_insets(value, &here)?,
            "anchor" => style.anchor = read_vec2(value, &here)?,
            "origin" => style.origin = read_vec2(value, &here)?,
            "fill" => style.fill = read_vec2(value, &here)?,
            "scale" => style.scale = read_vec2(value, &here)?,
            "flex" => style.flex_mode = read_flex_mode(value, &here)?,
            "align_x" => style.align_x = read_align(value, &here)?,
            "align_y" => style.align_y = read_align(value, &here)?,
            "grow" => style.flex_grow = read_f64(value, &here)?,
            "ignore_layout" => style.ignore_layout = read_bool(value, &here)?,
            "volatile" => style.volatile = read_bool(value, &here)?,
            "metadata" => description.metadata = read_metadata(value, &here)?,
            "children" => {
                let Some(items) = value.as_array() else {
                    return Err(BuildError::malformed(&here, "expected an array"));
                };
                for (n, item) in items.iter().enumerate() {
                    let child = read_node(item, &join(&here, &n.to_string()))?;
                    description.children.push(child);
                }
            }
            _ => return Err(BuildError::malformed(&here, "unknown key")),
        }
    }
    Ok(description)
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_owned()
    } else {
        format!("{at}.{key}")
    }
}

fn read_str<'a>(value: &'a Value, at: &str) -> Result<&'a str, BuildError> {
    value
        .as_str()
        .ok_or_else(|| BuildError::malformed(at, "expected a string"))
}

fn read_bool(value: &Value, at: &str) -> Result<bool, BuildError> {
    value
        .as_bool()
        .ok_or_else(|| BuildError::malformed(at, "expected a boolean"))
}

fn read_f64(value: &Value, at: &str) -> Result<f64, BuildError> {
    value
        .as_f64()
        .ok_or_else(|| BuildError::malformed(at, "expected a number"))
}

fn read_size(value: &Value, at: &str) -> Result<Size, BuildError> {
    match value {
        Value::Null => Ok(Size::Auto),
        Value::Number(n) => n
            .as_f64()
            .map(Size::Fixed)
            .ok_or_else(|| BuildError::malformed(at, "number out of range")),
        Value::String(s) => Ok(Size::parse(s)?),
        _ => Err(BuildError::malformed(at, "expected a number or string")),
    }
}

/// Reads a scalar or a fixed-length array of numbers.
fn read_numbers<const N: usize>(value: &Value, at: &str) -> Result<[f64; N], BuildError> {
    if let Some(v) = value.as_f64() {
        return Ok([v; N]);
    }
    let reason = || format!("expected a number or an array of {N} numbers");
    let items = value
        .as_array()
        .filter(|items| items.len() == N)
        .ok_or_else(|| BuildError::malformed(at, reason()))?;
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .ok_or_else(|| BuildError::malformed(at, reason()))?;
    }
    Ok(out)
}

fn read_insets(value: &Value, at: &str) -> Result<Insets, BuildError> {
    let [left, top, right, bottom] = read_numbers::<4>(value, at)?;
    Ok(Insets::new(left, top, right, bottom))
}

fn read_vec2(value: &Value, at: &str) -> Result<Vec2, BuildError> {
    let [x, y] = read_numbers::<2>(value, at)?;
    Ok(Vec2::new(x, y))
}

fn read_flex_mode(value: &Value, at: &str) -> Result<FlexMode, BuildError> {
    match read_str(value, at)? {
        "none" => Ok(FlexMode::None),
        "horizontal" => Ok(FlexMode::Horizontal),
        "vertical" => Ok(FlexMode::Vertical),
        other => Err(BuildError::malformed(at, format!("unknown flex mode `{other}`"))),
    }
}

fn read_align(value: &Value, at: &str) -> Result<Align, BuildError> {
    match read_str(value, at)? {
        "start" => Ok(Align::Start),
        "center" => Ok(Align::Center),
        "end" => Ok(Align::End),
        other => Err(BuildError::malformed(at, format!("unknown alignment `{other}`"))),
    }
}

fn read_metadata(value: &Value, at: &str) -> Result<Vec<(String, MetaValue)>, BuildError> {
    let Some(object) = value.as_object() else {
        return Err(BuildError::malformed(at, "expected an object"));
    };
    object
        .iter()
        .map(|(key, value)| {
            let meta = match value {
                Value::Bool(b) => MetaValue::Bool(*b),
                Value::String(s) => MetaValue::Text(s.clone()),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => MetaValue::Int(i),
                    None => MetaValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                _ => {
                    return Err(BuildError::malformed(
                        &join(at, key),
                        "expected a boolean, number, or string",
                    ));
                }
            };
            Ok((key.clone(), meta))
        })
        .collect()
}
