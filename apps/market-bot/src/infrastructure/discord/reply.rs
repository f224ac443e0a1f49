//! Mapping of presentation replies onto serenity builders.

use poise::serenity_prelude as serenity;

use crate::application::presentation::{Embed, Reply};

/// Build the poise reply for a command result.
#[must_use]
pub fn create_reply(reply: Reply) -> poise::CreateReply {
    let mut out = poise::CreateReply::default();

    if let Some(content) = reply.content {
        out = out.content(content);
    }
    if let Some(embed) = reply.embed {
        out = out.embed(create_embed(embed));
    }
    if let Some(attachment) = reply.attachment {
        out = out.attachment(serenity::CreateAttachment::bytes(
            attachment.bytes,
            attachment.filename,
        ));
    }
    out
}

fn create_embed(embed: Embed) -> serenity::CreateEmbed {
    let mut out = serenity::CreateEmbed::new()
        .title(embed.title)
        .colour(embed.color.rgb());

    if let Some(description) = embed.description {
        out = out.description(description);
    }
    for field in embed.fields {
        out = out.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = embed.footer {
        out = out.footer(serenity::CreateEmbedFooter::new(footer));
    }
    if let Some(timestamp) = embed
        .timestamp
        .and_then(|t| serenity::Timestamp::from_unix_timestamp(t.timestamp()).ok())
    {
        out = out.timestamp(timestamp);
    }
    if let Some(filename) = embed.image {
        out = out.image(format!("attachment://{filename}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::application::presentation::EmbedColor;

    #[test]
    fn embed_maps_every_part() {
        let embed = Embed::new("📊 AAPL Chart (30 days)", EmbedColor::Green)
            .description("desc")
            .field("High", "$1.00", true)
            .field("Low", "$0.50", true)
            .footer("Data from Alpaca")
            .timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
            .image("AAPL_chart.png");

        let json = serde_json::to_value(create_embed(embed)).unwrap();
        assert_eq!(json["title"], "📊 AAPL Chart (30 days)");
        assert_eq!(json["description"], "desc");
        assert_eq!(json["color"], EmbedColor::Green.rgb());
        assert_eq!(json["fields"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["footer"]["text"], "Data from Alpaca");
        assert_eq!(json["image"]["url"], "attachment://AAPL_chart.png");
    }

    #[test]
    fn notice_has_content_only() {
        let reply = create_reply(Reply::notice("📭 You don't have any open positions."));
        assert_eq!(
            reply.content.as_deref(),
            Some("📭 You don't have any open positions.")
        );
        assert!(reply.embeds.is_empty());
        assert!(reply.attachments.is_empty());
    }

    #[test]
    fn attachment_is_forwarded() {
        let reply = Reply::embed(Embed::new("t", EmbedColor::Blue))
            .with_attachment("comparison_chart.png", vec![1, 2, 3]);
        let reply = create_reply(reply);
        assert_eq!(reply.attachments.len(), 1);
        assert_eq!(reply.attachments[0].filename, "comparison_chart.png");
        assert_eq!(reply.embeds.len(), 1);
    }
}
