//! `WebDAV` PROPFIND core types.
//!
//! This module defines the request-scoped data the renderer works on:
//! depth, status lines, requested properties, resource descriptors and the
//! host-supplied routing/metadata collaborators.

mod depth;
mod href;
pub mod method;
mod multistatus;
mod namespace;
pub mod property;
mod propfind;
mod registry;
mod resource;
mod status;

pub use depth::Depth;
pub use href::Href;
pub use multistatus::{
    Multistatus, PropertyContent, Propstat, PropstatResponse, RenderedProperty, Response,
    StatusResponse,
};
pub use namespace::{DAV_NS, DAV_PREFIX, NamespaceBinding, is_qualified_name, split_prefixed_name};
pub use property::{ElementThunk, PropertyValue, StandardProperty, XmlFragment};
pub use propfind::{PropfindRequest, RequestedProperty};
pub use registry::{
    ActionId, ActionRegistry, MetadataRegistry, RouteResolver, WebDavMetadata, WebDavOptions,
};
pub use resource::{ResourceDescriptor, ResourceFormat, ResourceOptions, UpdatedAt};
pub use status::{HTTP_VERSION, Status, status_line};
