// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kind registry and tree construction.

use std::collections::HashMap;
use std::fmt;

use sprig_core::behavior::{Container, NodeBehavior};
use sprig_core::error::LayoutError;
use sprig_core::node::{CONTAINER_KIND, InsertAt, NodeId, NodeStore};

use crate::description::Description;
use crate::error::BuildError;

/// Produces the behavior for a node from its description.
pub type Constructor = Box<dyn Fn(&Description) -> Box<dyn NodeBehavior>>;

/// Maps kind tags to behavior constructors.
///
/// The default registry knows [`CONTAINER_KIND`].
pub struct Registry {
    constructors: HashMap<String, Constructor>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("Registry")
            .field("kinds", &kinds)
            .finish_non_exhaustive()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(CONTAINER_KIND, |_| Box::new(Container));
        registry
    }
}

impl Registry {
    /// Creates a registry that knows no kinds.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers a constructor, replacing any previous one for `kind`.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        constructor: impl Fn(&Description) -> Box<dyn NodeBehavior> + 'static,
    ) -> &mut Self {
        self.constructors.insert(kind.into(), Box::new(constructor));
        self
    }

    /// Returns whether `kind` is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Iterates over the registered kind tags, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    fn construct(&self, description: &Description) -> Result<Box<dyn NodeBehavior>, LayoutError> {
        self.constructors
            .get(&description.kind)
            .map(|constructor| constructor(description))
            .ok_or_else(|| LayoutError::UnknownKind {
                kind: description.kind.clone(),
            })
    }

    /// Finds the first kind in `description` (depth first) with no constructor.
    fn check(&self, description: &Description) -> Result<(), LayoutError> {
        if !self.contains(&description.kind) {
            return Err(LayoutError::UnknownKind {
                kind: description.kind.clone(),
            });
        }
        description
            .children
            .iter()
            .try_for_each(|child| self.check(child))
    }
}

/// Builds node trees from [`Description`]s.
#[derive(Debug, Default)]
pub struct Factory {
    registry: Registry,
}

impl Factory {
    /// Creates a factory over the given registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry for registering further kinds.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Builds `description` into `store` and returns the subtree root.
    ///
    /// Each node is created, inserted at the end of its parent (the subtree
    /// root under `parent`, if given), and then its children are built. The
    /// subtree root receives
    /// [`NodeEvent::Attached`](sprig_core::behavior::NodeEvent::Attached)
    /// once every descendant exists.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownKind`] for a kind with no constructor.
    /// Kinds are checked before anything is created, so the store is
    /// unchanged on error.
    pub fn build(
        &self,
        store: &mut NodeStore,
        description: &Description,
        parent: Option<NodeId>,
    ) -> Result<NodeId, BuildError> {
        self.registry.check(description)?;
        let root = self.build_node(store, description, parent)?;
        store.attach(root);
        Ok(root)
    }

    /// Parses JSON text and builds it; see [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// Returns any error from [`Description::from_json_str`] or
    /// [`build`](Self::build).
    pub fn build_json(
        &self,
        store: &mut NodeStore,
        text: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, BuildError> {
        let description = Description::from_json_str(text)?;
        self.build(store, &description, parent)
    }

    fn build_node(
        &self,
        store: &mut NodeStore,
        description: &Description,
        parent: Option<NodeId>,
    ) -> Result<NodeId, BuildError> {
        let behavior = self.registry.construct(description)?;
        let id = store.create_node(
            description.kind.as_str(),
            behavior,
            description.options.clone(),
        );
        for (key, value) in &description.metadata {
            store.set_metadata(id, key.as_str(), value.clone());
        }
        if let Some(parent) = parent {
            store.insert(parent, id, InsertAt::End)?;
        }
        for child in &description.children {
            self.build_node(store, child, Some(id))?;
        }
        Ok(id)
    }
}
