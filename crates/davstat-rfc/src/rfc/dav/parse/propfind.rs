//! PROPFIND request XML parsing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{ParseError, ParseResult};
use crate::rfc::dav::core::{PropfindRequest, RequestedProperty};

/// Parses a PROPFIND request body.
///
/// ## Summary
/// Only the element local names of `propfind`, `allprop` and `prop` are
/// matched. Direct children of `prop` become requested properties named
/// exactly as written. A bare `xmlns` attribute on a property declares its
/// namespace; any other attribute is kept for the rendered element.
///
/// An empty (or whitespace-only) body is an empty `prop` request.
///
/// ## Errors
/// Returns an error if the XML is malformed, the root is not `propfind`,
/// or the request does not name exactly one of `allprop` and `prop`.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_propfind(xml: &[u8]) -> ParseResult<PropfindRequest> {
    if xml.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("Empty PROPFIND body, returning empty prop request");
        return Ok(PropfindRequest::default());
    }

    tracing::debug!("Parsing PROPFIND XML request");

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut level = 0_usize;
    let mut saw_root = false;
    let mut allprop = false;
    let mut properties: Option<Vec<RequestedProperty>> = None;
    let mut in_prop = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let is_start = matches!(event, Event::Start(_));

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let local_name_bytes = e.local_name();
                let local_name = std::str::from_utf8(local_name_bytes.as_ref())?;

                match level {
                    0 => {
                        if local_name != "propfind" {
                            return Err(ParseError::unexpected_element(local_name));
                        }
                        saw_root = true;
                    }
                    1 => match local_name {
                        "allprop" => allprop = true,
                        "prop" => {
                            properties.get_or_insert_with(Vec::new);
                            in_prop = is_start;
                        }
                        "propname" => {
                            return Err(ParseError::unexpected_element("propname"));
                        }
                        other => tracing::debug!(element = other, "Ignoring PROPFIND child"),
                    },
                    2 if in_prop => {
                        if let Some(list) = properties.as_mut() {
                            list.push(requested_property(e)?);
                        }
                    }
                    _ => {}
                }

                if is_start {
                    level += 1;
                }
            }
            Event::End(ref e) => {
                level = level.saturating_sub(1);
                if level == 1 && e.local_name().as_ref() == b"prop" {
                    in_prop = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Ok(PropfindRequest::default());
    }

    match (allprop, properties) {
        (true, Some(_)) => Err(ParseError::ambiguous()),
        (true, None) => Ok(PropfindRequest::allprop()),
        (false, Some(properties)) => Ok(PropfindRequest::prop(properties)),
        (false, None) => Err(ParseError::missing_element("allprop or prop")),
    }
}

fn requested_property(e: &BytesStart<'_>) -> ParseResult<RequestedProperty> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;
    let mut property = RequestedProperty::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        if key == "xmlns" {
            property = property.with_namespace(value);
        } else if !key.starts_with("xmlns:") {
            property = property.with_attribute(key, value);
        } else {
            // Prefix declarations only matter to the client.
        }
    }

    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::dav::parse::ParseErrorKind;

    #[test]
    fn parse_empty_body() {
        let req = parse_propfind(b"").unwrap();
        assert_eq!(req, PropfindRequest::default());

        let req = parse_propfind(b"  \n ").unwrap();
        assert!(req.wants_all());
    }

    #[test]
    fn parse_allprop() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#;

        let req = parse_propfind(xml).unwrap();
        assert!(req.is_allprop());
    }

    #[test]
    fn parse_prop_keeps_order_and_names() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<propfind xmlns="DAV:">
  <prop>
    <getlastmodified/>
    <resourcetype></resourcetype>
    <D:getcontentlength xmlns:D="DAV:"/>
  </prop>
</propfind>"#;

        let req = parse_propfind(xml).unwrap();
        let props = req.requested_properties().unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].name, "getlastmodified");
        assert_eq!(props[1].name, "resourcetype");
        assert_eq!(props[2].name, "D:getcontentlength");
        assert_eq!(props[2].local_name(), "getcontentlength");
        assert!(props[2].namespace.is_none());
    }

    #[test]
    fn parse_bare_xmlns_and_attributes() {
        let xml = br#"<propfind xmlns="DAV:">
  <prop>
    <displaycolor xmlns="http://example.com/ns" flavor="dark"/>
  </prop>
</propfind>"#;

        let req = parse_propfind(xml).unwrap();
        let prop = &req.requested_properties().unwrap()[0];
        assert_eq!(prop.name, "displaycolor");
        assert_eq!(prop.namespace.as_deref(), Some("http://example.com/ns"));
        assert_eq!(prop.attributes, [("flavor".to_owned(), "dark".to_owned())]);
    }

    #[test]
    fn empty_bare_xmlns_is_dav() {
        let xml = br#"<propfind xmlns="DAV:"><prop><foo xmlns=""/></prop></propfind>"#;
        let req = parse_propfind(xml).unwrap();

        let prop = &req.requested_properties().unwrap()[0];
        assert_eq!(prop.name, "foo");
        assert_eq!(prop.namespace, None);
    }

    #[test]
    fn nested_property_content_is_ignored() {
        let xml = br#"<propfind xmlns="DAV:">
  <prop>
    <resourcetype><collection/></resourcetype>
  </prop>
</propfind>"#;

        let req = parse_propfind(xml).unwrap();
        assert_eq!(req.requested_properties().unwrap().len(), 1);
    }

    #[test]
    fn empty_prop_element() {
        let req = parse_propfind(br#"<propfind xmlns="DAV:"><prop/></propfind>"#).unwrap();
        assert_eq!(req, PropfindRequest::prop(Vec::new()));
    }

    #[test]
    fn allprop_and_prop_is_ambiguous() {
        let xml = br#"<propfind xmlns="DAV:"><allprop/><prop><getetag/></prop></propfind>"#;
        let err = parse_propfind(xml).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::AmbiguousRequest);
    }

    #[test]
    fn neither_allprop_nor_prop() {
        let err = parse_propfind(br#"<propfind xmlns="DAV:"/>"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingElement);
    }

    #[test]
    fn wrong_root() {
        let err = parse_propfind(br#"<propertyupdate xmlns="DAV:"/>"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedElement);
    }

    #[test]
    fn propname_is_unsupported() {
        let err = parse_propfind(br#"<propfind xmlns="DAV:"><propname/></propfind>"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedElement);
    }

    #[test]
    fn malformed_xml() {
        let err = parse_propfind(b"<propfind><prop></propfind>").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::XmlError);
    }
}
