//! PROPFIND request types.

use super::namespace::split_prefixed_name;

/// A property named in a PROPFIND `prop` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedProperty {
    /// Property name as the client wrote it.
    pub name: String,
    /// Namespace declared through a bare `xmlns` attribute, if any.
    pub namespace: Option<String>,
    /// Any other attributes, forwarded onto the rendered element.
    pub attributes: Vec<(String, String)>,
}

impl RequestedProperty {
    /// Creates a property request without namespace or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
        }
    }

    /// Declares the property's namespace. An empty URI leaves it in `DAV:`.
    #[must_use]
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.namespace = (!uri.is_empty()).then_some(uri);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Returns whether the name already carries a `prefix:` part.
    #[must_use]
    pub fn has_prefix(&self) -> bool {
        self.name.contains(':')
    }

    /// Returns the name without any client prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        split_prefixed_name(&self.name).1
    }
}

/// A PROPFIND request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropfindRequest {
    /// Request all computed properties.
    AllProp,
    /// Request specific properties, in client order.
    Prop(Vec<RequestedProperty>),
}

impl PropfindRequest {
    /// Creates an allprop request.
    #[must_use]
    pub fn allprop() -> Self {
        Self::AllProp
    }

    /// Creates a prop request.
    #[must_use]
    pub fn prop(properties: Vec<RequestedProperty>) -> Self {
        Self::Prop(properties)
    }

    /// Returns whether this is an allprop request.
    #[must_use]
    pub fn is_allprop(&self) -> bool {
        matches!(self, Self::AllProp)
    }

    /// Returns whether every computed property should be rendered.
    ///
    /// An empty `prop` list names nothing explicitly and falls back to all.
    #[must_use]
    pub fn wants_all(&self) -> bool {
        match self {
            Self::AllProp => true,
            Self::Prop(properties) => properties.is_empty(),
        }
    }

    /// Returns the requested properties for a prop request.
    #[must_use]
    pub fn requested_properties(&self) -> Option<&[RequestedProperty]> {
        match self {
            Self::Prop(properties) => Some(properties),
            Self::AllProp => None,
        }
    }
}

impl Default for PropfindRequest {
    /// An absent body is an empty `prop` request.
    fn default() -> Self {
        Self::Prop(Vec::new())
    }
}
