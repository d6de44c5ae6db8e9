//! Sub-resource declaration and collection.

use crate::error::{RfcError, RfcResult};
use crate::rfc::dav::core::{
    MetadataRegistry, ResourceDescriptor, ResourceFormat, ResourceOptions, RouteResolver,
};

/// A sub-resource path declared by the host, with its overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubresourceDeclaration {
    pub path: String,
    pub options: ResourceOptions,
}

/// Handed to the host's responder to describe the current resource.
///
/// `format` attaches attributes to the primary resource when the named
/// format is the one being rendered. `subresource` declares members of a
/// collection; it is a no-op unless the request renders a collection.
#[derive(Debug)]
pub struct ResponseSelector {
    request_format: ResourceFormat,
    resource: ResourceOptions,
    declarations: Vec<SubresourceDeclaration>,
}

impl ResponseSelector {
    pub(crate) fn new(request_format: ResourceFormat, resource: ResourceOptions) -> Self {
        Self {
            request_format,
            resource,
            declarations: Vec::new(),
        }
    }

    /// The format the primary resource is rendered as.
    #[must_use]
    pub fn request_format(&self) -> &ResourceFormat {
        &self.request_format
    }

    /// Merges `options` into the primary resource if `name` is the request format.
    ///
    /// ## Errors
    /// Returns `UnknownFormat` if `name` is not a known format extension.
    pub fn format(&mut self, name: &str, options: ResourceOptions) -> RfcResult<&mut Self> {
        let format = ResourceFormat::from_extension(name)?;
        if format == self.request_format {
            self.resource.merge(options);
        }
        Ok(self)
    }

    /// Declares one member of the collection.
    pub fn subresource(&mut self, path: impl Into<String>, options: ResourceOptions) -> &mut Self {
        let path = path.into();
        if self.request_format.is_collection() {
            self.declarations
                .push(SubresourceDeclaration { path, options });
        } else {
            tracing::debug!(%path, "Ignoring sub-resource of a non-collection");
        }
        self
    }

    /// Declares several members sharing the same overrides.
    pub fn subresources<I, S>(&mut self, paths: I, options: &ResourceOptions) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.subresource(path, options.clone());
        }
        self
    }

    /// Returns the declared members in declaration order.
    #[must_use]
    pub fn declarations(&self) -> &[SubresourceDeclaration] {
        &self.declarations
    }

    pub(crate) fn into_parts(self) -> (ResourceOptions, Vec<SubresourceDeclaration>) {
        (self.resource, self.declarations)
    }
}

/// Expands declarations into resource descriptors using the host's routes
/// and metadata.
pub struct SubresourceCollector<'a> {
    routes: &'a dyn RouteResolver,
    registry: &'a dyn MetadataRegistry,
    default_format: &'a ResourceFormat,
}

impl<'a> SubresourceCollector<'a> {
    #[must_use]
    pub fn new(
        routes: &'a dyn RouteResolver,
        registry: &'a dyn MetadataRegistry,
        default_format: &'a ResourceFormat,
    ) -> Self {
        Self {
            routes,
            registry,
            default_format,
        }
    }

    /// Resolves every declaration, in order.
    ///
    /// A collection action yields one collection descriptor. A plain action
    /// without alternate formats yields one descriptor in the declared (or
    /// default) format. Every alternate format adds a descriptor at the
    /// format-suffixed URL.
    ///
    /// ## Errors
    /// Returns `MissingWebDavMetadata` if a path resolves to no action or to
    /// an action without metadata, and `UnknownFormat` for an unknown
    /// alternate format.
    pub fn collect(
        &self,
        declarations: &[SubresourceDeclaration],
    ) -> RfcResult<Vec<ResourceDescriptor>> {
        let mut resources = Vec::with_capacity(declarations.len());

        for SubresourceDeclaration { path, options } in declarations {
            let missing = || RfcError::MissingWebDavMetadata(path.clone());
            let action = self.routes.recognize(path).ok_or_else(missing)?;
            let meta = self.registry.metadata_for(&action).ok_or_else(missing)?;
            tracing::trace!(%path, %action, ?meta, "Collecting sub-resource");

            if meta.collection {
                resources.push(ResourceDescriptor::from_options(
                    path.as_str(),
                    options.clone().with_format(ResourceFormat::Collection),
                    self.default_format,
                ));
            } else if meta.accept.is_empty() {
                resources.push(ResourceDescriptor::from_options(
                    path.as_str(),
                    options.clone(),
                    self.default_format,
                ));
            } else {
                // Variants are the only representations of a plain action with alternates.
            }

            for extension in &meta.accept {
                let format = ResourceFormat::from_extension(extension)?;
                let url = self.routes.url_for(path, &action, format.tag());
                resources.push(ResourceDescriptor::from_options(
                    url,
                    options.clone().with_format(format),
                    self.default_format,
                ));
            }
        }

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::dav::core::{ActionId, ActionRegistry, WebDavOptions};

    struct Routes;

    impl RouteResolver for Routes {
        fn recognize(&self, path: &str) -> Option<ActionId> {
            if path.starts_with("/folders") {
                Some(ActionId::new("folders", "index"))
            } else if path.starts_with("/notes") {
                Some(ActionId::new("notes", "show"))
            } else if path.starts_with("/files") {
                Some(ActionId::new("files", "show"))
            } else {
                None
            }
        }
    }

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry
            .enable_webdav_for("folders", &["index"], &WebDavOptions::new())
            .enable_webdav_for(
                "notes",
                &["show"],
                &WebDavOptions::new().collection(false).accept(["txt", "pdf"]),
            )
            .enable_webdav_for("files", &["show"], &WebDavOptions::new().collection(false));
        registry
    }

    fn declare(paths: &[&str]) -> Vec<SubresourceDeclaration> {
        let mut selector = ResponseSelector::new(ResourceFormat::Collection, ResourceOptions::new());
        selector.subresources(paths.iter().copied(), &ResourceOptions::new().with_size(7));
        selector.into_parts().1
    }

    #[test]
    fn selector_ignores_members_of_plain_resources() {
        let txt = ResourceFormat::from_extension("txt").unwrap();
        let mut selector = ResponseSelector::new(txt, ResourceOptions::new());
        selector.subresource("/files/a", ResourceOptions::new());
        assert!(selector.declarations().is_empty());
    }

    #[test]
    fn selector_format_merges_only_the_request_format() {
        let txt = ResourceFormat::from_extension("txt").unwrap();
        let mut selector = ResponseSelector::new(txt, ResourceOptions::new());
        selector
            .format("pdf", ResourceOptions::new().with_size(1))
            .unwrap()
            .format("txt", ResourceOptions::new().with_size(2))
            .unwrap();

        let (resource, _) = selector.into_parts();
        assert_eq!(resource.size, Some(2));
    }

    #[test]
    fn selector_rejects_unknown_format() {
        let mut selector = ResponseSelector::new(ResourceFormat::Collection, ResourceOptions::new());
        assert!(matches!(
            selector.format("nope-nope", ResourceOptions::new()),
            Err(RfcError::UnknownFormat(_))
        ));
    }

    #[test]
    fn collects_collections_plain_and_variants() {
        let registry = registry();
        let default_format = ResourceFormat::default();
        let collector = SubresourceCollector::new(&Routes, &registry, &default_format);

        let resources = collector
            .collect(&declare(&["/folders/a", "/files/b", "/notes/c"]))
            .unwrap();
        let hrefs: Vec<_> = resources.iter().map(|r| r.href().as_str()).collect();

        assert_eq!(hrefs, ["/folders/a/", "/files/b", "/notes/c.txt", "/notes/c.pdf"]);
        assert!(resources[0].is_collection());
        assert_eq!(resources[1].format(), &default_format);
        assert_eq!(resources[2].format().mime_type(), Some("text/plain"));
        assert!(resources.iter().all(|r| r.size() == Some(7)));
    }

    #[test]
    fn unresolvable_path_is_missing_metadata() {
        let registry = registry();
        let default_format = ResourceFormat::default();
        let collector = SubresourceCollector::new(&Routes, &registry, &default_format);

        assert!(matches!(
            collector.collect(&declare(&["/folders/a", "/elsewhere"])),
            Err(RfcError::MissingWebDavMetadata(path)) if path == "/elsewhere"
        ));
    }

    #[test]
    fn undeclared_action_is_missing_metadata() {
        let registry = ActionRegistry::new();
        let default_format = ResourceFormat::default();
        let collector = SubresourceCollector::new(&Routes, &registry, &default_format);

        assert!(matches!(
            collector.collect(&declare(&["/files/b"])),
            Err(RfcError::MissingWebDavMetadata(path)) if path == "/files/b"
        ));
    }
}
