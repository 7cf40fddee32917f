// crates/feed-codec/src/encoder.rs
//! Feed encoding logic

use crate::error::CodecResult;
use crate::{CodecError, INDENT_SIZE};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rsskeep_core::{FeedDocument, Item};
use std::collections::HashSet;
use std::io::Write;

/// Feed encoder
pub struct FeedEncoder;

impl FeedEncoder {
    /// Encodes a document as an indented, UTF-8 RSS 2.0 string
    pub fn encode(doc: &FeedDocument) -> CodecResult<String> {
        let bytes = Self::encode_to_vec(doc)?;
        String::from_utf8(bytes).map_err(|e| CodecError::InvalidXml(e.to_string()))
    }

    /// Encodes a document into a byte buffer
    ///
    /// The document is checked first, so content XML cannot carry is
    /// reported before anything is written.
    pub fn encode_to_vec(doc: &FeedDocument) -> CodecResult<Vec<u8>> {
        check_document(doc)?;
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("rss");
        root.push_attribute(("version", doc.version()));
        for ns in doc.namespaces() {
            let key = if ns.prefix.is_empty() {
                "xmlns".to_string()
            } else {
                format!("xmlns:{}", ns.prefix)
            };
            root.push_attribute((key.as_str(), ns.uri.as_str()));
        }
        writer.write_event(Event::Start(root))?;

        let channel = doc.channel();
        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        write_text_element(&mut writer, "title", channel.title())?;
        write_text_element(&mut writer, "link", channel.link())?;
        write_text_element(&mut writer, "description", channel.description())?;

        for item in channel.items() {
            write_item(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');

        log::debug!(
            "Encoded feed with {} items ({} bytes)",
            doc.item_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn check_document(doc: &FeedDocument) -> CodecResult<()> {
    let mut seen = HashSet::new();
    for ns in doc.namespaces() {
        let field = if ns.prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", ns.prefix)
        };
        if !ns.prefix.is_empty() && !is_ncname(&ns.prefix) {
            return Err(unencodable(&field, "prefix is not a valid XML name"));
        }
        if !seen.insert(ns.prefix.as_str()) {
            return Err(unencodable(&field, "prefix is declared twice"));
        }
        check_text(&field, &ns.uri)?;
    }

    let channel = doc.channel();
    check_text("channel.title", channel.title())?;
    check_text("channel.link", channel.link())?;
    check_text("channel.description", channel.description())?;

    for (i, item) in channel.items().iter().enumerate() {
        let fields = [
            ("title", Some(item.title.as_str())),
            ("link", Some(item.link.as_str())),
            ("pubDate", Some(item.pub_date.as_str())),
            ("description", Some(item.description.as_str())),
            ("guid", item.guid()),
        ];
        for (name, text) in fields {
            if let Some(text) = text {
                check_text(&format!("item[{}].{}", i, name), text)?;
            }
        }
    }
    Ok(())
}

fn check_text(field: &str, text: &str) -> CodecResult<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(unencodable(
            field,
            &format!("character U+{:04X} is not allowed in XML", c as u32),
        )),
        None => Ok(()),
    }
}

/// XML 1.0 `Char` production (surrogates cannot occur in a `char`)
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Namespace prefix: a name without colons
fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    first_ok && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn unencodable(field: &str, reason: &str) -> CodecError {
    CodecError::Unencodable {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &Item) -> CodecResult<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "link", &item.link)?;
    write_text_element(writer, "pubDate", &item.pub_date)?;
    write_text_element(writer, "description", &item.description)?;
    if let Some(guid) = item.guid() {
        write_text_element(writer, "guid", guid)?;
    }
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> CodecResult<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
