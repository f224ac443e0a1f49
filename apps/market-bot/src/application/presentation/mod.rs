//! Presentation Model
//!
//! Platform-neutral replies: a plain text notice, or an embed with an
//! optional image attachment. The Discord adapter maps these onto the
//! platform's own builders.

pub mod format;

use chrono::{DateTime, Utc};

// =============================================================================
// Embed
// =============================================================================

/// Embed side-bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedColor {
    /// Gains, open market.
    Green,
    /// Losses, closed market.
    Red,
    /// Neutral information.
    Blue,
    /// Positions and popular lists.
    Gold,
    /// Category browser.
    Purple,
}

impl EmbedColor {
    /// RGB value as `0xRRGGBB`.
    #[must_use]
    pub const fn rgb(&self) -> u32 {
        match self {
            Self::Green => 0x002E_CC71,
            Self::Red => 0x00E7_4C3C,
            Self::Blue => 0x0034_98DB,
            Self::Gold => 0x00F1_C40F,
            Self::Purple => 0x009B_59B6,
        }
    }

    /// Green for a gain or flat move, red for a loss.
    #[must_use]
    pub const fn for_direction(is_gain: bool) -> Self {
        if is_gain { Self::Green } else { Self::Red }
    }
}

/// One name/value pair in an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body (markdown).
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

/// A rich message card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Title line.
    pub title: String,
    /// Optional text under the title.
    pub description: Option<String>,
    /// Side-bar color.
    pub color: EmbedColor,
    /// Fields in display order.
    pub fields: Vec<EmbedField>,
    /// Footer text.
    pub footer: Option<String>,
    /// Timestamp shown next to the footer.
    pub timestamp: Option<DateTime<Utc>>,
    /// Filename of an attachment shown as the embed image.
    pub image: Option<String>,
}

impl Embed {
    /// Start an embed with a title and color.
    #[must_use]
    pub fn new(title: impl Into<String>, color: EmbedColor) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
            image: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the footer.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Show the named attachment as the embed image.
    #[must_use]
    pub fn image(mut self, filename: impl Into<String>) -> Self {
        self.image = Some(filename.into());
        self
    }

    /// Field by name, if present.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

// =============================================================================
// Reply
// =============================================================================

/// A file sent with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename, also used to reference the file from an embed.
    pub filename: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// How a command invocation ended, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Data was found and formatted.
    Success,
    /// A normal reply that is not a result: not-found, empty state, usage.
    Notice,
    /// The failure boundary caught an error.
    Failed,
}

impl Outcome {
    /// Metric label value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Notice => "notice",
            Self::Failed => "failed",
        }
    }
}

/// Everything sent back for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Plain message text.
    pub content: Option<String>,
    /// Rich card.
    pub embed: Option<Embed>,
    /// Attached file.
    pub attachment: Option<Attachment>,
    /// How the invocation ended.
    pub outcome: Outcome,
}

impl Reply {
    /// A successful embed reply.
    #[must_use]
    pub const fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
            attachment: None,
            outcome: Outcome::Success,
        }
    }

    /// A plain text notice (not-found, empty state, usage).
    #[must_use]
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            embed: None,
            attachment: None,
            outcome: Outcome::Notice,
        }
    }

    /// A plain text failure report.
    #[must_use]
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failed,
            ..Self::notice(text)
        }
    }

    /// Attach a file.
    #[must_use]
    pub fn with_attachment(mut self, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.attachment = Some(Attachment {
            filename: filename.into(),
            bytes,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_match_discord_palette() {
        assert_eq!(EmbedColor::Green.rgb(), 0x2ecc71);
        assert_eq!(EmbedColor::Red.rgb(), 0xe74c3c);
        assert_eq!(EmbedColor::for_direction(true), EmbedColor::Green);
        assert_eq!(EmbedColor::for_direction(false), EmbedColor::Red);
    }

    #[test]
    fn embed_builder_keeps_field_order() {
        let embed = Embed::new("t", EmbedColor::Blue)
            .field("a", "1", true)
            .field("b", "2", false)
            .footer("f");

        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(embed.get_field("b").map(|f| f.inline), Some(false));
        assert_eq!(embed.footer.as_deref(), Some("f"));
    }

    #[test]
    fn reply_outcomes() {
        assert_eq!(Reply::notice("x").outcome, Outcome::Notice);
        assert_eq!(Reply::failure("x").outcome, Outcome::Failed);
        assert_eq!(Reply::failure("x").content.as_deref(), Some("x"));

        let reply = Reply::embed(Embed::new("t", EmbedColor::Blue)).with_attachment("a.png", vec![1]);
        assert_eq!(reply.outcome, Outcome::Success);
        assert_eq!(reply.attachment.map(|a| a.filename), Some("a.png".to_string()));
    }
}
