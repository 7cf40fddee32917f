//! Feed items

use crate::policy::FeedPolicy;
use serde::Serialize;

/// Raw item values collected from the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
}

/// A single entry in the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub link: String,
    /// Opaque date token, ordered as a plain string
    pub pub_date: String,
    pub description: String,
    guid: Option<String>,
}

impl Item {
    /// Creates an item without a guid
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        pub_date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            pub_date: pub_date.into(),
            description: description.into(),
            guid: None,
        }
    }

    /// Builds an item from user input, deriving the guid when `policy` asks for it
    pub fn from_fields(fields: ItemFields, policy: &FeedPolicy) -> Self {
        let item = Self::new(fields.title, fields.link, fields.pub_date, fields.description);
        if policy.include_guid {
            item.with_guid_from_link()
        } else {
            item
        }
    }

    /// Rebuilds an item read back from a stored feed, guid included as found
    pub fn restored(
        title: String,
        link: String,
        pub_date: String,
        description: String,
        guid: Option<String>,
    ) -> Self {
        Self {
            guid,
            ..Self::new(title, link, pub_date, description)
        }
    }

    /// Sets the guid to a copy of the link
    pub fn with_guid_from_link(mut self) -> Self {
        self.guid = Some(self.link.clone());
        self
    }

    /// Consumer-facing identifier; new items copy it from `link`
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }
}
