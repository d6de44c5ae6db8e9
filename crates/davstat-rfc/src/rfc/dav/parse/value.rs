//! Structured (JSON) property requests.
//!
//! Hosts that decode request bodies into a parameter tree before they reach
//! the engine hand it over in this shape:
//!
//! ```json
//! {"propfind": {"allprop": null}}
//! {"propfind": {"prop": {"getlastmodified": null, "color": {"xmlns": "urn:x"}}}}
//! ```

use serde_json::{Map, Value};

use super::error::{ParseError, ParseResult};
use crate::rfc::dav::core::{PropfindRequest, RequestedProperty, is_qualified_name};

/// Builds a PROPFIND request from a structured parameter tree.
///
/// A `null` tree, or one whose `propfind` entry is `null`, is an empty
/// `prop` request. Property order follows the object's key order.
///
/// ## Errors
/// Returns an error if `propfind` is missing, names both (or neither of)
/// `allprop` and `prop`, any entry has an unexpected shape, or a property
/// or attribute name is not a valid XML name.
#[tracing::instrument(skip(value))]
pub fn propfind_from_value(value: &Value) -> ParseResult<PropfindRequest> {
    let propfind = match value {
        Value::Null => return Ok(PropfindRequest::default()),
        Value::Object(map) => map
            .get("propfind")
            .ok_or_else(|| ParseError::missing_element("propfind"))?,
        _ => return Err(ParseError::invalid_value("request must be an object")),
    };

    let propfind = match propfind {
        Value::Null => return Ok(PropfindRequest::default()),
        Value::Object(map) => map,
        _ => return Err(ParseError::invalid_value("propfind must be an object")),
    };

    match (propfind.get("allprop"), propfind.get("prop")) {
        (Some(_), Some(_)) => Err(ParseError::ambiguous()),
        (Some(_), None) => Ok(PropfindRequest::allprop()),
        (None, Some(prop)) => prop_list(prop).map(PropfindRequest::prop),
        (None, None) => Err(ParseError::missing_element("allprop or prop")),
    }
}

fn prop_list(prop: &Value) -> ParseResult<Vec<RequestedProperty>> {
    match prop {
        Value::Null => Ok(Vec::new()),
        Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::Array(names) => names
            .iter()
            .map(|name| match name {
                Value::String(name) => checked_name(name).map(RequestedProperty::new),
                other => Err(ParseError::invalid_value(format!(
                    "property name must be a string, got {other}"
                ))),
            })
            .collect(),
        Value::Object(entries) => entries
            .iter()
            .map(|(name, options)| property_with_options(name, options))
            .collect(),
        other => Err(ParseError::invalid_value(format!(
            "prop must be an object or a list, got {other}"
        ))),
    }
}

fn checked_name(name: &str) -> ParseResult<&str> {
    if is_qualified_name(name) {
        Ok(name)
    } else {
        Err(ParseError::invalid_value(format!("{name:?} is not a valid XML name")))
    }
}

fn property_with_options(name: &str, options: &Value) -> ParseResult<RequestedProperty> {
    let property = RequestedProperty::new(checked_name(name)?);
    match options {
        // Text content of a requested property carries no meaning.
        Value::Null | Value::String(_) => Ok(property),
        Value::Object(attributes) => apply_attributes(property, attributes),
        other => Err(ParseError::invalid_value(format!(
            "options of {name} must be an object, got {other}"
        ))),
    }
}

fn apply_attributes(
    mut property: RequestedProperty,
    attributes: &Map<String, Value>,
) -> ParseResult<RequestedProperty> {
    for (key, value) in attributes {
        let value = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => {
                return Err(ParseError::invalid_value(format!(
                    "attribute {key} of {} must be a scalar",
                    property.name
                )));
            }
        };

        if key == "xmlns" {
            property = property.with_namespace(value);
        } else if !key.starts_with("xmlns:") {
            property = property.with_attribute(checked_name(key)?, value);
        } else {
            // Prefix declarations only matter to the client.
        }
    }
    Ok(property)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rfc::dav::parse::ParseErrorKind;

    #[test]
    fn null_is_empty_prop() {
        assert_eq!(
            propfind_from_value(&Value::Null).unwrap(),
            PropfindRequest::default()
        );
        assert_eq!(
            propfind_from_value(&json!({"propfind": null})).unwrap(),
            PropfindRequest::default()
        );
    }

    #[test]
    fn allprop() {
        let req = propfind_from_value(&json!({"propfind": {"allprop": null}})).unwrap();
        assert!(req.is_allprop());
    }

    #[test]
    fn prop_map_in_order() {
        let req = propfind_from_value(&json!({
            "propfind": {"prop": {
                "getlastmodified": null,
                "displaycolor": {"xmlns": "http://example.com/ns", "flavor": "dark"},
                "getcontentlength": ""
            }}
        }))
        .unwrap();

        let props = req.requested_properties().unwrap();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["getlastmodified", "displaycolor", "getcontentlength"]);
        assert_eq!(props[1].namespace.as_deref(), Some("http://example.com/ns"));
        assert_eq!(props[1].attributes, [("flavor".to_owned(), "dark".to_owned())]);
    }

    #[test]
    fn prop_list_of_names() {
        let req = propfind_from_value(&json!({"propfind": {"prop": ["resourcetype"]}})).unwrap();
        assert_eq!(req.requested_properties().unwrap()[0].name, "resourcetype");

        let req = propfind_from_value(&json!({"propfind": {"prop": []}})).unwrap();
        assert!(req.wants_all());
    }

    #[test]
    fn ambiguous_request_fails() {
        let err = propfind_from_value(&json!({"propfind": {"allprop": null, "prop": []}}))
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::AmbiguousRequest);
    }

    #[test]
    fn malformed_shapes_fail() {
        let missing = propfind_from_value(&json!({"other": 1})).unwrap_err();
        assert_eq!(missing.kind, ParseErrorKind::MissingElement);

        let neither = propfind_from_value(&json!({"propfind": {}})).unwrap_err();
        assert_eq!(neither.kind, ParseErrorKind::MissingElement);

        let bad = propfind_from_value(&json!({"propfind": {"prop": 3}})).unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidValue);

        let bad = propfind_from_value(&json!({"propfind": {"prop": {"a": {"b": []}}}})).unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn invalid_xml_names_fail() {
        let bad = propfind_from_value(&json!({"propfind": {"prop": {"a b><evil/": null}}}))
            .unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidValue);

        let bad = propfind_from_value(&json!({"propfind": {"prop": ["1st"]}})).unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidValue);

        let bad = propfind_from_value(&json!({"propfind": {"prop": {"color": {"x y": "1"}}}}))
            .unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn empty_xmlns_and_prefix_declarations_are_dropped() {
        let req = propfind_from_value(&json!({
            "propfind": {"prop": {"color": {"xmlns": "", "xmlns:x": "urn:x", "shade": "1"}}}
        }))
        .unwrap();

        let prop = &req.requested_properties().unwrap()[0];
        assert_eq!(prop.namespace, None);
        assert_eq!(prop.attributes, [("shade".to_owned(), "1".to_owned())]);
    }
}
