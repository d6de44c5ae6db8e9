//! Multistatus XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::rfc::dav::core::{
    DAV_NS, DAV_PREFIX, Multistatus, NamespaceBinding, PropertyContent, PropstatResponse,
    RenderedProperty, Response, StatusResponse, XmlFragment,
};

/// Serializes a multistatus response to XML.
///
/// ## Summary
/// Writes the XML declaration and a `D:multistatus` root bound to `DAV:`,
/// followed by one `D:response` per entry. Inside each `D:propstat` the
/// `D:prop` block precedes `D:status`.
///
/// ## Errors
/// Returns an error if XML writing fails or if the generated XML is not valid UTF-8.
pub fn serialize_multistatus(multistatus: &Multistatus) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = qualified("multistatus");
    let mut elem = BytesStart::new(root.as_str());
    let dav = NamespaceBinding::new(DAV_PREFIX, DAV_NS);
    elem.push_attribute((dav.attribute_name().as_str(), dav.uri.as_str()));
    writer.write_event(Event::Start(elem))?;

    for response in &multistatus.responses {
        match response {
            Response::Propstat(response) => write_propstat_response(&mut writer, response)?,
            Response::Status(response) => write_status_response(&mut writer, response)?,
        }
    }

    writer.write_event(Event::End(BytesEnd::new(root.as_str())))?;

    let result = writer.into_inner();
    String::from_utf8(result).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in multistatus XML: {}", e);
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in XML output",
        )))
    })
}

fn write_propstat_response<W: std::io::Write>(
    writer: &mut Writer<W>,
    response: &PropstatResponse,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;
    write_text_element(writer, "D:href", response.href.as_str())?;

    for propstat in &response.propstats {
        let mut elem = BytesStart::new("D:propstat");
        for binding in &propstat.namespaces {
            elem.push_attribute((binding.attribute_name().as_str(), binding.uri.as_str()));
        }
        writer.write_event(Event::Start(elem))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &propstat.properties {
            write_property(writer, prop)?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        write_text_element(writer, "D:status", &propstat.status)?;

        writer.write_event(Event::End(BytesEnd::new("D:propstat")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:response")))?;
    Ok(())
}

fn write_status_response<W: std::io::Write>(
    writer: &mut Writer<W>,
    response: &StatusResponse,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;
    write_text_element(writer, "D:href", response.href.as_str())?;
    write_text_element(writer, "D:status", &response.status)?;
    if let Some(ref error) = response.error {
        write_text_element(writer, "D:error", error)?;
    }
    writer.write_event(Event::End(BytesEnd::new("D:response")))?;
    Ok(())
}

fn write_property<W: std::io::Write>(
    writer: &mut Writer<W>,
    prop: &RenderedProperty,
) -> Result<(), quick_xml::Error> {
    let mut elem = BytesStart::new(prop.element_name.as_str());
    for (key, value) in &prop.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    match &prop.content {
        PropertyContent::Empty => writer.write_event(Event::Empty(elem))?,
        PropertyContent::Text(text) => {
            writer.write_event(Event::Start(elem))?;
            writer.write_event(Event::Text(BytesText::new(text)))?;
            writer.write_event(Event::End(BytesEnd::new(prop.element_name.as_str())))?;
        }
        PropertyContent::Element(fragment) => {
            writer.write_event(Event::Start(elem))?;
            write_fragment(writer, fragment)?;
            writer.write_event(Event::End(BytesEnd::new(prop.element_name.as_str())))?;
        }
    }
    Ok(())
}

/// Writes a fragment in the `DAV:` namespace.
fn write_fragment<W: std::io::Write>(
    writer: &mut Writer<W>,
    fragment: &XmlFragment,
) -> Result<(), quick_xml::Error> {
    let name = qualified(&fragment.name);
    if fragment.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name.as_str())))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
    if let Some(ref text) = fragment.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &fragment.children {
        write_fragment(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn qualified(local: &str) -> String {
    format!("{DAV_PREFIX}:{local}")
}
