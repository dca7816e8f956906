//! Typed XML resources.
//!
//! ```xml
//! <resources>
//!     <string name="title">Hello</string>
//!     <boolean name="rtl">false</boolean>
//!     <int name="max_items">20</int>
//!     <float name="scale">1.5</float>
//!     <string-array name="weekdays">
//!         <item>Mon</item>
//!         <item>Tue</item>
//!     </string-array>
//! </resources>
//! ```
//!
//! Elements other than the ones above are ignored. Text is trimmed.

use std::io::BufRead;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use serde_json::{Number, Value};

use crate::{error::Error, traits::DocumentParser, types::LocalizedData};

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    String,
    Boolean,
    Integer,
    Float,
    StringArray,
}

impl ElementKind {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"string" => Some(ElementKind::String),
            b"boolean" | b"bool" => Some(ElementKind::Boolean),
            b"int" | b"integer" | b"long" => Some(ElementKind::Integer),
            b"float" | b"double" => Some(ElementKind::Float),
            b"string-array" => Some(ElementKind::StringArray),
            _ => None,
        }
    }

    fn convert(self, name: &str, text: String) -> Result<Value, Error> {
        let invalid = |kind: &str| {
            Error::InvalidResource(format!("`{}` is not a valid {} for `{}`", text, kind, name))
        };
        match self {
            ElementKind::String => Ok(Value::String(text)),
            ElementKind::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid("boolean")),
            },
            ElementKind::Integer => text
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid("integer")),
            ElementKind::Float => text
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid("float")),
            ElementKind::StringArray if text.is_empty() => Ok(Value::Array(Vec::new())),
            ElementKind::StringArray => Ok(Value::Array(vec![Value::String(text)])),
        }
    }
}

impl DocumentParser for XmlParser {
    fn parse(&self, bytes: &[u8]) -> Result<LocalizedData, Error> {
        let mut xml_reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut data = LocalizedData::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if let Some(kind) = ElementKind::from_tag(e.name().as_ref()) {
                        let name = element_name(e)?;
                        let value = match kind {
                            ElementKind::StringArray => read_items(&mut xml_reader)?,
                            _ => kind.convert(&name, read_text(&mut xml_reader)?)?,
                        };
                        data.insert(name, value);
                    }
                }
                Event::Empty(ref e) => {
                    if let Some(kind) = ElementKind::from_tag(e.name().as_ref()) {
                        let name = element_name(e)?;
                        let value = kind.convert(&name, String::new())?;
                        data.insert(name, value);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(data)
    }
}

fn element_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::InvalidResource(format!(
        "<{}> element is missing a 'name' attribute",
        String::from_utf8_lossy(e.name().as_ref())
    )))
}

/// Collects the text up to the end of the current element, ignoring nested tags.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::InvalidResource("unexpected end of document".to_string()));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

fn read_items<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<Value, Error> {
    let mut buf = Vec::new();
    let mut items = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"item" => {
                items.push(Value::String(read_text(xml_reader)?));
            }
            Event::Empty(e) if e.name().as_ref() == b"item" => {
                items.push(Value::String(String::new()));
            }
            Event::Start(_) => {
                read_text(xml_reader)?;
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::InvalidResource("unexpected end of document".to_string()));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(Value::Array(items))
}
