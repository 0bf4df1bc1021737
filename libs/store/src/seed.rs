//! Demo catalogue loaded at startup

use chrono::{DateTime, Duration, Utc};

use crate::{
    ids::IdAllocator,
    models::{AgeRating, Video},
};

/// Public sample clip every seeded video plays
pub const SAMPLE_VIDEO: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

/// (title, genre, minutes before now, publisher, producer)
const CATALOGUE: [(&str, &str, i64, &str, &str); 3] = [
    ("Sunset Skate Line", "Sports", 3, "City Film", "A. Nolan"),
    ("Latte Art 101", "Food", 30, "CafeCo", "B. Cruz"),
    ("Mini Synth Jam", "Music", 90, "RoomLab", "C. Lee"),
];

/// Build the seed videos, drawing their ids from `ids`
pub fn seed_videos(ids: &mut IdAllocator, now: DateTime<Utc>) -> Vec<Video> {
    CATALOGUE
        .iter()
        .map(|&(title, genre, minutes_ago, publisher, producer)| Video {
            id: ids.next_video_id(),
            title: title.to_string(),
            genre: genre.to_string(),
            age_rating: AgeRating::Pg,
            src: SAMPLE_VIDEO.to_string(),
            media_type: "video/mp4".to_string(),
            created_at: now - Duration::minutes(minutes_ago),
            publisher: publisher.to_string(),
            producer: producer.to_string(),
        })
        .collect()
}
