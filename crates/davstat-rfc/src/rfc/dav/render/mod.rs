//! Multistatus rendering.
//!
//! [`render`] is the single entry point a host calls for a PROPFIND: it
//! runs the host's responder, expands collection members when the depth asks
//! for them, resolves every resource's properties and serializes the
//! document. A [`Renderer`] carries the state of one render pass (the
//! namespace prefix counter) and must not be shared between requests.

mod collector;
mod prefix;
mod resolver;

use chrono::{DateTime, Utc};

pub use collector::{ResponseSelector, SubresourceCollector, SubresourceDeclaration};
pub use prefix::{PrefixAllocator, PrefixedProperty};
pub use resolver::{
    ComputedProperties, QUOTA_AVAILABLE_BYTES, QUOTA_USED_BYTES, format_creation_date,
    format_http_date,
};

use crate::error::RfcResult;
use crate::rfc::dav::build::serialize_multistatus;
use crate::rfc::dav::core::{
    ActionId, Depth, Href, MetadataRegistry, Multistatus, PropertyContent, PropertyValue,
    PropfindRequest, Propstat, PropstatResponse, RenderedProperty, ResourceDescriptor,
    ResourceFormat, ResourceOptions, RouteResolver, Status, StatusResponse, status_line,
};

/// Host callback describing the current resource and its members.
pub type Responder<'a> = Box<dyn FnOnce(&mut ResponseSelector) -> RfcResult<()> + 'a>;

/// Everything the host supplies for one PROPFIND render.
pub struct RenderContext<'a> {
    href: Href,
    request: PropfindRequest,
    depth: Depth,
    format: Option<ResourceFormat>,
    action: Option<ActionId>,
    default_format: ResourceFormat,
    resource: ResourceOptions,
    routes: &'a dyn RouteResolver,
    registry: &'a dyn MetadataRegistry,
    responder: Option<Responder<'a>>,
}

impl<'a> RenderContext<'a> {
    /// Creates a context for the resource at `href`.
    ///
    /// Defaults: empty `prop` request, depth `0`, no explicit format, the
    /// binary default format and no responder.
    #[must_use]
    pub fn new(
        href: impl Into<Href>,
        routes: &'a dyn RouteResolver,
        registry: &'a dyn MetadataRegistry,
    ) -> Self {
        Self {
            href: href.into(),
            request: PropfindRequest::default(),
            depth: Depth::default(),
            format: None,
            action: None,
            default_format: ResourceFormat::default(),
            resource: ResourceOptions::default(),
            routes,
            registry,
            responder: None,
        }
    }

    #[must_use]
    pub fn with_request(mut self, request: PropfindRequest) -> Self {
        self.request = request;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the explicitly requested format (e.g. from a `.pdf` suffix).
    #[must_use]
    pub fn with_format(mut self, format: ResourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the action serving the request. Without it the href is resolved
    /// through the route resolver.
    #[must_use]
    pub fn with_action(mut self, action: ActionId) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_default_format(mut self, format: ResourceFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Sets attributes of the primary resource.
    #[must_use]
    pub fn with_resource(mut self, options: ResourceOptions) -> Self {
        self.resource = options;
        self
    }

    #[must_use]
    pub fn with_responder(
        mut self,
        responder: impl FnOnce(&mut ResponseSelector) -> RfcResult<()> + 'a,
    ) -> Self {
        self.responder = Some(Box::new(responder));
        self
    }

    #[must_use]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    fn request_format(&self) -> ResourceFormat {
        let action = self
            .action
            .clone()
            .or_else(|| self.routes.recognize(self.href.as_str()));
        let metadata = action
            .as_ref()
            .and_then(|action| self.registry.metadata_for(action));

        ResourceFormat::for_request(self.format.clone(), metadata, &self.default_format)
    }
}

/// State of one render pass.
#[derive(Debug, Default)]
pub struct Renderer {
    prefixes: PrefixAllocator,
    clock: Option<DateTime<Utc>>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the time used for resources without `updated_at`.
    #[must_use]
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    /// Renders one `response` per resource, primary resource first.
    ///
    /// ## Errors
    /// Propagates errors of the responder, sub-resource collection, property
    /// resolution, status lines and XML serialization. No partial document
    /// is returned.
    pub fn propstat(&mut self, ctx: RenderContext<'_>) -> RfcResult<String> {
        let request_format = ctx.request_format();
        tracing::debug!(
            href = %ctx.href,
            format = request_format.tag(),
            depth = %ctx.depth,
            request = ?ctx.request,
            "Rendering PROPFIND"
        );

        let mut selector = ResponseSelector::new(request_format.clone(), ctx.resource);
        if let Some(responder) = ctx.responder {
            responder(&mut selector)?;
        }
        let (mut options, declarations) = selector.into_parts();

        if options.size.is_none() && !declarations.is_empty() {
            options.size = u64::try_from(declarations.len()).ok();
        }
        let primary = ResourceDescriptor::from_options(ctx.href, options, &request_format);

        let mut resources = vec![primary];
        if ctx.depth.includes_members() && request_format.is_collection() {
            let collector =
                SubresourceCollector::new(ctx.routes, ctx.registry, &ctx.default_format);
            resources.extend(collector.collect(&declarations)?);
        }

        let mut multistatus = Multistatus::new();
        for resource in &resources {
            multistatus.add_response(self.propstat_response(resource, &ctx.request)?);
        }

        Ok(serialize_multistatus(&multistatus)?)
    }

    /// Renders a single resource-level response with `status` and an
    /// optional error description.
    ///
    /// ## Errors
    /// Returns `UnknownStatusCode` for an unknown status, or an XML error.
    pub fn response(
        &mut self,
        href: impl Into<Href>,
        status: Option<&Status>,
        error: Option<&str>,
    ) -> RfcResult<String> {
        let mut multistatus = Multistatus::new();
        multistatus.add_response(StatusResponse {
            href: href.into(),
            status: status_line(status)?,
            error: error.map(str::to_owned),
        });
        Ok(serialize_multistatus(&multistatus)?)
    }

    /// Renders a resource-level `404 Not Found` response.
    ///
    /// ## Errors
    /// Returns an error if XML serialization fails.
    pub fn not_found(&mut self, href: impl Into<Href>) -> RfcResult<String> {
        self.response(href, Some(&Status::NOT_FOUND), None)
    }

    fn propstat_response(
        &mut self,
        resource: &ResourceDescriptor,
        request: &PropfindRequest,
    ) -> RfcResult<PropstatResponse> {
        let computed =
            ComputedProperties::resolve(resource, self.clock.unwrap_or_else(Utc::now))?;
        let status = status_line(resource.status())?;

        let (namespaces, requested) = match request.requested_properties() {
            Some(list) if !list.is_empty() => self.prefixes.assign(list),
            _ => (
                Vec::new(),
                computed.names().map(PrefixedProperty::dav).collect(),
            ),
        };

        let properties = requested
            .into_iter()
            .map(|prop| RenderedProperty {
                content: match computed.get(&prop.lookup_name) {
                    None => PropertyContent::Empty,
                    Some(PropertyValue::Element(thunk)) => PropertyContent::Element(thunk.produce()),
                    Some(scalar) => scalar
                        .as_text()
                        .map_or(PropertyContent::Empty, PropertyContent::Text),
                },
                element_name: prop.element_name,
                attributes: prop.attributes,
            })
            .collect();

        Ok(PropstatResponse {
            href: resource.href().clone(),
            propstats: vec![Propstat {
                namespaces,
                status,
                properties,
            }],
        })
    }
}

/// Renders a PROPFIND multistatus document with a fresh [`Renderer`].
///
/// ## Summary
/// Returns the XML document together with the depth that was applied, so the
/// host can echo it in the `Depth` response header.
///
/// ## Errors
/// See [`Renderer::propstat`].
#[tracing::instrument(skip(ctx), fields(href = %ctx.href, depth = %ctx.depth))]
pub fn render(ctx: RenderContext<'_>) -> RfcResult<(String, Depth)> {
    let depth = ctx.depth;
    let xml = Renderer::new().propstat(ctx)?;
    tracing::debug!(bytes = xml.len(), "Rendered multistatus");
    Ok((xml, depth))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::rfc::dav::core::{ActionRegistry, RequestedProperty, WebDavOptions};

    struct Routes;

    impl RouteResolver for Routes {
        fn recognize(&self, path: &str) -> Option<ActionId> {
            if path.ends_with('/') || !path.contains('.') {
                Some(ActionId::new("folders", "index"))
            } else {
                Some(ActionId::new("files", "show"))
            }
        }
    }

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.enable_webdav_for("folders", &["index"], &WebDavOptions::new());
        registry.enable_webdav_for("files", &["show"], &WebDavOptions::new().collection(false));
        registry
    }

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 3, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn collection_format_comes_from_metadata() {
        let registry = registry();
        let ctx = RenderContext::new("/docs", &Routes, &registry);
        assert!(ctx.request_format().is_collection());

        let ctx = RenderContext::new("/docs/a.txt", &Routes, &registry)
            .with_default_format(ResourceFormat::from_extension("txt").unwrap());
        assert_eq!(ctx.request_format().tag(), "txt");
    }

    #[test]
    fn declared_members_size_the_collection() {
        let registry = registry();
        let ctx = RenderContext::new("/docs", &Routes, &registry)
            .with_request(PropfindRequest::prop(vec![RequestedProperty::new(
                "getcontentlength",
            )]))
            .with_responder(|selector| {
                selector
                    .subresource("/docs/a.txt", ResourceOptions::new())
                    .subresource("/docs/b.txt", ResourceOptions::new());
                Ok(())
            });

        let xml = Renderer::new().with_clock(fixed()).propstat(ctx).unwrap();
        assert!(xml.contains("<D:getcontentlength>2</D:getcontentlength>"));
        assert_eq!(xml.matches("<D:response>").count(), 1);
    }

    #[test]
    fn responder_errors_propagate() {
        let registry = registry();
        let ctx = RenderContext::new("/docs", &Routes, &registry).with_responder(|selector| {
            selector.format("nope-nope", ResourceOptions::new())?;
            Ok(())
        });

        assert!(matches!(
            render(ctx),
            Err(crate::error::RfcError::UnknownFormat(_))
        ));
    }

    #[test]
    fn not_found_response() {
        let xml = Renderer::new().not_found("/gone").unwrap();
        assert!(xml.contains("<D:href>/gone</D:href><D:status>HTTP/1.1 404 Not Found</D:status>"));
        assert!(!xml.contains("D:propstat"));
    }

    #[test]
    fn response_with_error() {
        let status = Status::symbol("unprocessable_entity");
        let xml = Renderer::new()
            .response("/doc", Some(&status), Some("cannot process"))
            .unwrap();
        assert!(xml.contains("<D:status>HTTP/1.1 422 Unprocessable Entity</D:status>"));
        assert!(xml.contains("<D:error>cannot process</D:error>"));
    }
}
