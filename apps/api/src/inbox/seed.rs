//! Startup sample data. The inbox has no durable backing — there is no real
//! webhook ingestion yet — so the triage surface is seeded with a fixed set
//! of messages covering both platforms, both channels, and every status.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::message::{Channel, MessageStatus, Platform, SocialMessage};

pub fn sample_messages() -> Vec<SocialMessage> {
    let now = Utc::now();

    let seed = |minutes_ago: i64,
                platform: Platform,
                channel: Channel,
                author: &str,
                snippet: &str,
                status: MessageStatus,
                intent: Option<&str>| SocialMessage {
        id: Uuid::new_v4(),
        platform,
        channel,
        author: author.to_string(),
        snippet: snippet.to_string(),
        timestamp: now - Duration::minutes(minutes_ago),
        status,
        intent: intent.map(str::to_string),
    };

    vec![
        seed(
            4,
            Platform::Instagram,
            Channel::Comment,
            "ria.makes",
            "How much is the large print? Do you ship to Canada?",
            MessageStatus::Unread,
            Some("pricing"),
        ),
        seed(
            12,
            Platform::Facebook,
            Channel::Message,
            "Daniel Okafor",
            "Hi! My order #4177 arrived with a cracked frame.",
            MessageStatus::Unread,
            Some("support"),
        ),
        seed(
            35,
            Platform::Facebook,
            Channel::Comment,
            "Marta Kowalska",
            "Love this collection, the colours are stunning!",
            MessageStatus::Unread,
            None,
        ),
        seed(
            68,
            Platform::Instagram,
            Channel::Message,
            "tom_builds_stuff",
            "Are you taking commissions this month?",
            MessageStatus::Snoozed,
            Some("commission"),
        ),
        seed(
            190,
            Platform::Instagram,
            Channel::Comment,
            "jules.draws",
            "Second this, would love a restock of the A3 size",
            MessageStatus::Responded,
            Some("restock"),
        ),
        seed(
            260,
            Platform::Facebook,
            Channel::Message,
            "Priya Nair",
            "Thanks for the quick reply yesterday, sorted now!",
            MessageStatus::Responded,
            None,
        ),
    ]
}
