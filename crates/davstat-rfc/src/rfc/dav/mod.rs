//! `WebDAV` PROPFIND types and processing.
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`Depth`, `Status`, `ResourceDescriptor`, etc.)
//! - [`parse`] - Property request parsing (XML bodies and structured input)
//! - [`build`] - Multistatus XML serialization
//! - [`render`] - Property resolution, sub-resource collection and rendering

pub mod build;
pub mod core;
pub mod parse;
pub mod render;

// Re-export commonly used types
pub use self::core::{
    ActionId, ActionRegistry, DAV_NS, Depth, Href, MetadataRegistry, PropfindRequest,
    RequestedProperty, ResourceDescriptor, ResourceFormat, ResourceOptions, RouteResolver,
    Status, UpdatedAt, WebDavMetadata, WebDavOptions,
};
pub use parse::{parse_propfind, propfind_from_value};
pub use render::{RenderContext, Renderer, ResponseSelector, render};
