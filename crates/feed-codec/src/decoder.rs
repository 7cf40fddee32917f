// crates/feed-codec/src/decoder.rs
//! Feed decoding logic

use crate::error::{CodecError, CodecResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rsskeep_core::{Channel, ChannelFields, FeedDocument, Item, Namespace, RSS_VERSION};

/// Feed decoder
pub struct FeedDecoder;

impl FeedDecoder {
    /// Decodes an RSS 2.0 document
    ///
    /// Whitespace between elements is ignored, text inside modeled fields is
    /// kept exactly. Unknown elements are skipped.
    pub fn decode(content: &str) -> CodecResult<FeedDocument> {
        let mut reader = Reader::from_str(content);
        let mut state = DecodeState::default();
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                CodecError::XmlParse(format!("{} (at byte {})", e, reader.buffer_position()))
            })?;

            match event {
                Event::Start(e) => {
                    let name = element_name(&e);
                    state.open(&name, &e)?;
                }
                Event::Empty(e) => {
                    // <title/> and friends behave like an open/close pair
                    let name = element_name(&e);
                    state.open(&name, &e)?;
                    state.close(&name)?;
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    state.close(&name)?;
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    state.text(&text)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| CodecError::InvalidXml(err.to_string()))?;
                    state.cdata(text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        state.finish()
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Text being collected for a modeled leaf element
struct Capture {
    depth: usize,
    text: String,
}

#[derive(Default)]
struct PartialItem {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    description: Option<String>,
    guid: Option<String>,
}

impl PartialItem {
    fn set(&mut self, field: &str, value: String) {
        match field {
            "title" => self.title = Some(value),
            "link" => self.link = Some(value),
            "pubDate" => self.pub_date = Some(value),
            "description" => self.description = Some(value),
            "guid" => self.guid = Some(value),
            _ => {}
        }
    }

    fn into_item(self, position: usize) -> CodecResult<Item> {
        let missing = |field: &str| CodecError::MissingField(format!("item[{}].{}", position, field));
        Ok(Item::restored(
            self.title.ok_or_else(|| missing("title"))?,
            self.link.ok_or_else(|| missing("link"))?,
            self.pub_date.ok_or_else(|| missing("pubDate"))?,
            self.description.ok_or_else(|| missing("description"))?,
            self.guid,
        ))
    }
}

#[derive(Default)]
struct DecodeState {
    stack: Vec<String>,
    root_closed: bool,
    version: Option<String>,
    namespaces: Vec<Namespace>,
    channel_count: usize,
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    items: Vec<Item>,
    current_item: Option<PartialItem>,
    capture: Option<Capture>,
}

impl DecodeState {
    fn open(&mut self, name: &str, e: &BytesStart<'_>) -> CodecResult<()> {
        self.stack.push(name.to_string());
        let depth = self.stack.len();

        match depth {
            1 => {
                if self.root_closed {
                    return Err(CodecError::InvalidXml(
                        "more than one root element".to_string(),
                    ));
                }
                if name != "rss" {
                    return Err(CodecError::UnexpectedElement(name.to_string()));
                }
                self.read_root_attributes(e)?;
            }
            2 if name == "channel" => {
                self.channel_count += 1;
                if self.channel_count > 1 {
                    return Err(CodecError::InvalidXml(
                        "more than one <channel> element".to_string(),
                    ));
                }
            }
            3 if self.in_channel() => match name {
                "item" => self.current_item = Some(PartialItem::default()),
                "title" | "link" | "description" => self.start_capture(depth),
                _ => {}
            },
            4 if self.in_item() => {
                if matches!(name, "title" | "link" | "pubDate" | "description" | "guid") {
                    self.start_capture(depth);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> CodecResult<()> {
        let depth = self.stack.len();
        if self.stack.pop().is_none() {
            return Err(CodecError::InvalidXml(format!("unmatched </{}>", name)));
        }

        if let Some(capture) = self.capture.take() {
            if capture.depth == depth {
                self.assign(name, capture.text);
            } else {
                self.capture = Some(capture);
            }
        }

        match depth {
            1 => self.root_closed = true,
            3 if name == "item" && self.in_channel() => {
                if let Some(partial) = self.current_item.take() {
                    let item = partial.into_item(self.items.len())?;
                    self.items.push(item);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> CodecResult<()> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(CodecError::InvalidXml(
                "text outside of the root element".to_string(),
            ));
        }
        self.cdata(text);
        Ok(())
    }

    fn cdata(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            if capture.depth == self.stack.len() {
                capture.text.push_str(text);
            }
        }
    }

    fn start_capture(&mut self, depth: usize) {
        self.capture = Some(Capture {
            depth,
            text: String::new(),
        });
    }

    fn assign(&mut self, name: &str, value: String) {
        if let Some(item) = self.current_item.as_mut() {
            item.set(name, value);
            return;
        }
        match name {
            "title" => self.title = Some(value),
            "link" => self.link = Some(value),
            "description" => self.description = Some(value),
            _ => {}
        }
    }

    fn in_channel(&self) -> bool {
        self.stack.len() >= 2 && self.stack[1] == "channel"
    }

    fn in_item(&self) -> bool {
        self.in_channel() && self.current_item.is_some() && self.stack[2] == "item"
    }

    fn read_root_attributes(&mut self, e: &BytesStart<'_>) -> CodecResult<()> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| CodecError::InvalidXml(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();

            if key == "version" {
                self.version = Some(value);
            } else if key == "xmlns" {
                self.namespaces.push(Namespace::new("", value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.namespaces.push(Namespace::new(prefix, value));
            }
        }
        Ok(())
    }

    fn finish(self) -> CodecResult<FeedDocument> {
        if let Some(open) = self.stack.last() {
            return Err(CodecError::InvalidXml(format!(
                "unexpected end of document inside <{}>",
                open
            )));
        }
        if !self.root_closed {
            return Err(CodecError::MissingField("rss".to_string()));
        }

        match self.version.as_deref() {
            Some(RSS_VERSION) => {}
            Some(other) => return Err(CodecError::UnsupportedVersion(other.to_string())),
            None => return Err(CodecError::MissingField("rss.version".to_string())),
        }

        if self.channel_count == 0 {
            return Err(CodecError::MissingField("channel".to_string()));
        }

        let fields = ChannelFields {
            title: self
                .title
                .ok_or_else(|| CodecError::MissingField("channel.title".to_string()))?,
            link: self
                .link
                .ok_or_else(|| CodecError::MissingField("channel.link".to_string()))?,
            description: self
                .description
                .ok_or_else(|| CodecError::MissingField("channel.description".to_string()))?,
        };

        log::debug!("Decoded feed with {} items", self.items.len());

        let doc = self
            .namespaces
            .into_iter()
            .fold(
                FeedDocument::from_channel(Channel::with_items(fields, self.items)),
                |doc, ns| doc.with_namespace(ns.prefix, ns.uri),
            );
        Ok(doc)
    }
}
