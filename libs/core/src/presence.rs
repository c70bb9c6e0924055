//! The payload handed to the presentation service.
use presence_assets::AssetHandle;
use serde::{Deserialize, Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub url: String,
}

impl Button {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// A button is only shown when both its title and URL are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub asset: AssetHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Image {
    pub fn new(asset: AssetHandle, caption: Option<String>) -> Self {
        Self { asset, caption }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichPresence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_timestamp: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button1: Option<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button2: Option<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
}

impl RichPresence {
    pub fn builder(application_id: Option<String>) -> RichPresenceBuilder {
        RichPresenceBuilder {
            inner: RichPresence {
                application_id,
                ..Default::default()
            },
        }
    }
}

fn serialize_timestamp<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(timestamp) => {
            let formatted = timestamp
                .format(&Rfc3339)
                .map_err(serde::ser::Error::custom)?;
            serializer.serialize_some(&formatted)
        }
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Default)]
pub struct RichPresenceBuilder {
    inner: RichPresence,
}

impl RichPresenceBuilder {
    pub fn details(mut self, details: Option<String>) -> Self {
        self.inner.details = details;
        self
    }

    pub fn state(mut self, state: Option<String>) -> Self {
        self.inner.state = state;
        self
    }

    pub fn start_timestamp(mut self, timestamp: Option<OffsetDateTime>) -> Self {
        self.inner.start_timestamp = timestamp;
        self
    }

    pub fn large_image(mut self, image: Option<Image>) -> Self {
        self.inner.large_image = image;
        self
    }

    pub fn small_image(mut self, image: Option<Image>) -> Self {
        self.inner.small_image = image;
        self
    }

    pub fn button1(mut self, button: Option<Button>) -> Self {
        self.inner.button1 = button;
        self
    }

    pub fn button2(mut self, button: Option<Button>) -> Self {
        self.inner.button2 = button;
        self
    }

    pub fn party_id(mut self, party_id: Option<String>) -> Self {
        self.inner.party_id = party_id;
        self
    }

    pub fn build(self) -> RichPresence {
        self.inner
    }
}
