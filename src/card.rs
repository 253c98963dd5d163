//! Adaptive Card message builders.
//!
//! Builds an immutable card description from message content. The
//! description serializes to the Adaptive Card JSON schema consumed by
//! the external renderer.

use serde::Serialize;

use crate::models::notification::{MessageButton, NotificationRecord};

const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_VERSION: &str = "1.0";

/// Text size hint for a text block.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    /// Small print.
    Small,
    /// Headline size.
    ExtraLarge,
}

/// Text weight hint for a text block.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextWeight {
    /// Subdued text.
    Lighter,
    /// Emphasised text.
    Bolder,
}

/// One element of the card body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CardElement {
    /// Plain text.
    TextBlock {
        /// Displayed text.
        text: String,
        /// Size hint.
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<TextSize>,
        /// Weight hint.
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<TextWeight>,
        /// Whether long text wraps.
        wrap: bool,
    },
    /// Hero image.
    Image {
        /// Image URL.
        url: String,
        /// Image size hint.
        size: &'static str,
    },
}

/// A card action.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CardAction {
    /// Open a URL in the browser.
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl {
        /// Button caption.
        title: String,
        /// Target URL.
        url: String,
    },
}

/// Immutable Adaptive Card description.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardDescription {
    #[serde(rename = "type")]
    card_type: &'static str,
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    /// Body elements in display order.
    pub body: Vec<CardElement>,
    /// Action buttons in display order.
    pub actions: Vec<CardAction>,
}

/// Message content rendered onto the card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardContent {
    /// Headline.
    pub title: String,
    /// Hero image URL.
    pub image_link: Option<String>,
    /// Body text.
    pub summary: Option<String>,
    /// Author line.
    pub author: Option<String>,
    /// Present buttons, primary first.
    pub buttons: Vec<MessageButton>,
}

impl CardContent {
    /// Extract card content from a record, keeping only present buttons.
    #[must_use]
    pub fn from_record(record: &NotificationRecord) -> Self {
        Self {
            title: record.title.clone(),
            image_link: record.image_link.clone(),
            summary: record.summary.clone(),
            author: record.author.clone(),
            buttons: record
                .primary_button()
                .into_iter()
                .chain(record.secondary_button())
                .collect(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Build the card description for `content`.
///
/// Empty optional fields are omitted rather than rendered blank.
#[must_use]
pub fn build_card(content: &CardContent) -> CardDescription {
    let mut body = vec![CardElement::TextBlock {
        text: content.title.clone(),
        size: Some(TextSize::ExtraLarge),
        weight: Some(TextWeight::Bolder),
        wrap: true,
    }];

    if let Some(url) = non_empty(content.image_link.as_ref()) {
        body.push(CardElement::Image {
            url: url.to_owned(),
            size: "stretch",
        });
    }
    if let Some(summary) = non_empty(content.summary.as_ref()) {
        body.push(CardElement::TextBlock {
            text: summary.to_owned(),
            size: None,
            weight: None,
            wrap: true,
        });
    }
    if let Some(author) = non_empty(content.author.as_ref()) {
        body.push(CardElement::TextBlock {
            text: author.to_owned(),
            size: Some(TextSize::Small),
            weight: Some(TextWeight::Lighter),
            wrap: true,
        });
    }

    let actions = content
        .buttons
        .iter()
        .map(|button| CardAction::OpenUrl {
            title: button.title.clone(),
            url: button.link.clone(),
        })
        .collect();

    CardDescription {
        card_type: "AdaptiveCard",
        schema: CARD_SCHEMA,
        version: CARD_VERSION,
        body,
        actions,
    }
}
