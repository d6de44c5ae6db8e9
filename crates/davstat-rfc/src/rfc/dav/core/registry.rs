//! Routing and `WebDAV` metadata collaborators.
//!
//! The engine never resolves paths or decides which actions are exposed over
//! `WebDAV` itself. The host supplies a [`RouteResolver`] and a
//! [`MetadataRegistry`]; [`ActionRegistry`] is a ready-made in-memory
//! registry populated through [`ActionRegistry::enable_webdav_for`].

use std::collections::HashMap;
use std::fmt;

use super::href::Href;

/// Identity of the host action serving a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionId {
    pub controller: String,
    pub action: String,
}

impl ActionId {
    #[must_use]
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller, self.action)
    }
}

/// How an action is exposed over `WebDAV`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebDavMetadata {
    /// Whether the action serves a collection.
    pub collection: bool,
    /// Alternate format extensions the action can render.
    pub accept: Vec<String>,
}

impl WebDavMetadata {
    /// Metadata for a collection action.
    #[must_use]
    pub fn collection() -> Self {
        Self {
            collection: true,
            accept: Vec::new(),
        }
    }

    /// Metadata for a plain resource action.
    #[must_use]
    pub fn resource() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_accept<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = formats.into_iter().map(Into::into).collect();
        self
    }
}

/// Options of an [`ActionRegistry::enable_webdav_for`] declaration.
///
/// `collection` defaults to `true` when left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebDavOptions {
    pub collection: Option<bool>,
    pub accept: Vec<String>,
}

impl WebDavOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collection(mut self, collection: bool) -> Self {
        self.collection = Some(collection);
        self
    }

    #[must_use]
    pub fn accept<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = formats.into_iter().map(Into::into).collect();
        self
    }
}

impl From<WebDavOptions> for WebDavMetadata {
    fn from(options: WebDavOptions) -> Self {
        Self {
            collection: options.collection.unwrap_or(true),
            accept: options.accept,
        }
    }
}

/// Maps request paths to host actions.
pub trait RouteResolver {
    /// Resolves `path` to the action serving it, if any.
    fn recognize(&self, path: &str) -> Option<ActionId>;

    /// Builds the URL of `path` rendered by `action` in the format `extension`.
    fn url_for(&self, path: &str, _action: &ActionId, extension: &str) -> String {
        Href::new(path).with_extension(extension).into()
    }
}

/// Read-only view of per-action `WebDAV` metadata.
pub trait MetadataRegistry {
    fn metadata_for(&self, action: &ActionId) -> Option<&WebDavMetadata>;
}

/// In-memory [`MetadataRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionId, WebDavMetadata>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `actions` of `controller` as `WebDAV`-enabled.
    ///
    /// A repeated declaration for the same action replaces the earlier one.
    pub fn enable_webdav_for(
        &mut self,
        controller: &str,
        actions: &[&str],
        options: &WebDavOptions,
    ) -> &mut Self {
        for action in actions {
            let id = ActionId::new(controller, *action);
            tracing::debug!(%id, ?options, "Enabling WebDAV");
            self.actions.insert(id, options.clone().into());
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl MetadataRegistry for ActionRegistry {
    fn metadata_for(&self, action: &ActionId) -> Option<&WebDavMetadata> {
        self.actions.get(action)
    }
}
