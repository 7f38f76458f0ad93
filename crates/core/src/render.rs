//! Text renderings: the output document as XML, the value tree as JSON.
//!
//! Indentation and the XML declaration are cosmetic; the element tree is
//! fixed by [`crate::document`].

use crate::document::{Content, Document, Element};
use crate::error::RenderError;
use crate::value::Dict;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    /// Emit the `<?xml ...?>` header.
    pub declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: 2,
            declaration: true,
        }
    }
}

pub fn to_xml(doc: &Document, options: &RenderOptions) -> Result<String, RenderError> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };
    if options.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;
    }
    write_element(&mut writer, &doc.root)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), RenderError> {
    let name = element.tag.element_name();
    let mut start = BytesStart::new(name);
    if let Some((key, value)) = element.tag.attribute() {
        start.push_attribute((key, value.as_str()));
    }
    match &element.content {
        Content::Elements(children) if children.is_empty() => {
            writer.write_event(Event::Empty(start)).map_err(xml_err)?;
        }
        Content::Elements(children) => {
            writer.write_event(Event::Start(start)).map_err(xml_err)?;
            for child in children {
                write_element(writer, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_err)?;
        }
        Content::Text(text) => {
            writer.write_event(Event::Start(start)).map_err(xml_err)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_err)?;
        }
    }
    Ok(())
}

fn xml_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Xml(e.to_string())
}

/// The resolved top-level mapping as a JSON object, keys in source order.
pub fn to_json(entries: &Dict, pretty: bool) -> Result<String, RenderError> {
    let text = if pretty {
        serde_json::to_string_pretty(entries)?
    } else {
        serde_json::to_string(entries)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::serialize;
    use crate::value::Value;

    fn sample() -> Dict {
        vec![
            ("x", Value::Integer(5)),
            ("arr", Value::Array(vec![Value::Integer(1), Value::Null])),
            ("empty", Value::Dict(Dict::new())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn indented_xml_layout() {
        let xml = to_xml(&serialize(&sample()), &RenderOptions::default()).unwrap();
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<config>
  <entry name=\"x\">5</entry>
  <entry name=\"arr\">
    <array_item index=\"0\">1</array_item>
    <array_item index=\"1\">null</array_item>
  </entry>
  <entry name=\"empty\"/>
</config>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn compact_xml_without_declaration() {
        let options = RenderOptions {
            indent: 0,
            declaration: false,
        };
        let xml = to_xml(&serialize(&sample()), &options).unwrap();
        assert_eq!(
            xml,
            "<config><entry name=\"x\">5</entry><entry name=\"arr\">\
<array_item index=\"0\">1</array_item><array_item index=\"1\">null</array_item>\
</entry><entry name=\"empty\"/></config>"
        );
    }

    #[test]
    fn empty_document_is_self_closing_root() {
        let options = RenderOptions {
            indent: 2,
            declaration: false,
        };
        assert_eq!(to_xml(&serialize(&Dict::new()), &options).unwrap(), "<config/>");
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let doc = serialize(&sample());
        let options = RenderOptions::default();
        assert_eq!(
            to_xml(&doc, &options).unwrap(),
            to_xml(&doc, &options).unwrap()
        );
    }

    #[test]
    fn json_rendering_keeps_order() {
        assert_eq!(
            to_json(&sample(), false).unwrap(),
            r#"{"x":5,"arr":[1,null],"empty":{}}"#
        );
    }
}
