//! Synthetic namespace prefixes for requested properties.
//!
//! Some clients match returned element names assuming every property carries
//! an explicit prefix. Each requested property that declares a namespace gets
//! a fresh `lp<N>` prefix, declared on the enclosing `propstat`; everything
//! else is rendered under `D:`. The counter lives for one render pass and is
//! shared by every resource of the document, so prefixes never repeat.

use crate::rfc::dav::core::{DAV_NS, DAV_PREFIX, NamespaceBinding, RequestedProperty};

/// Prefix stem for allocated namespaces.
const PREFIX_STEM: &str = "lp";

/// A requested property after prefix assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedProperty {
    /// Qualified element name, e.g. `D:getetag` or `lp2:color`.
    pub element_name: String,
    /// Name looked up among the computed properties.
    pub lookup_name: String,
    /// Attributes forwarded onto the element.
    pub attributes: Vec<(String, String)>,
}

impl PrefixedProperty {
    /// A property in the `DAV:` namespace.
    #[must_use]
    pub fn dav(name: &str) -> Self {
        Self {
            element_name: NamespaceBinding::new(DAV_PREFIX, DAV_NS).qualify(name),
            lookup_name: name.to_owned(),
            attributes: Vec::new(),
        }
    }
}

/// Allocates `lp<N>` prefixes.
#[derive(Debug, Clone)]
pub struct PrefixAllocator {
    next: usize,
}

impl Default for PrefixAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl PrefixAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a fresh prefix to `uri`. Repeated URIs get repeated bindings.
    pub fn allocate(&mut self, uri: &str) -> NamespaceBinding {
        let binding = NamespaceBinding::new(format!("{PREFIX_STEM}{}", self.next), uri);
        self.next += 1;
        binding
    }

    /// Assigns element names to `requested`, preserving order.
    ///
    /// Returns the namespace declarations for the enclosing `propstat` along
    /// with the prefixed properties.
    pub fn assign(
        &mut self,
        requested: &[RequestedProperty],
    ) -> (Vec<NamespaceBinding>, Vec<PrefixedProperty>) {
        let mut namespaces = Vec::new();
        let mut properties = Vec::with_capacity(requested.len());

        for property in requested {
            if property.has_prefix() {
                tracing::warn!(
                    name = %property.name,
                    "PROPFIND prop request contains a namespace prefix, matching on the local name only"
                );
            }
            let local_name = property.local_name();

            let element_name = match property.namespace.as_deref() {
                Some(uri) => {
                    let binding = self.allocate(uri);
                    let name = binding.qualify(local_name);
                    namespaces.push(binding);
                    name
                }
                None => PrefixedProperty::dav(local_name).element_name,
            };

            properties.push(PrefixedProperty {
                element_name,
                lookup_name: local_name.to_owned(),
                attributes: property.attributes.clone(),
            });
        }

        (namespaces, properties)
    }
}
