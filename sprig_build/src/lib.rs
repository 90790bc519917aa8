// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative construction of sprig layout trees.
//!
//! A [`Description`] is a recursive record naming a node kind, its options,
//! metadata, and children. It can be written in Rust with the builder methods
//! or read from JSON ([`Description::from_json_str`]). A [`Factory`] turns a
//! description into nodes of a [`NodeStore`](sprig_core::node::NodeStore),
//! looking up each kind's behavior in its [`Registry`].
//!
//! ```
//! use sprig_build::Factory;
//! use sprig_core::node::NodeStore;
//!
//! let mut store = NodeStore::new();
//! let root = Factory::default()
//!     .build_json(
//!         &mut store,
//!         r#"{ "type": "container", "name": "root", "width": 120,
//!              "children": [{ "type": "container", "name": "body", "height": 40 }] }"#,
//!         None,
//!     )
//!     .unwrap();
//! let body = store.resolve(root, "body").unwrap();
//! assert_eq!(store.height(body), 40.0);
//! ```

mod description;
mod error;
mod factory;

pub use description::Description;
pub use error::BuildError;
pub use factory::{Constructor, Factory, Registry};
