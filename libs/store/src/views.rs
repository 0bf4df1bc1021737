//! Screen projections of the store
//!
//! Each function here reads the store and returns exactly what one screen
//! renders. Nothing in this module mutates state.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    error::{StoreError, StoreResult},
    models::{AgeRating, Comment, MediaBlob, Session, Video, VideoId},
    store::Store,
};

/// File types offered by the upload picker
pub const ACCEPT_TYPES: &str = "video/mp4,image/*";

/// Genres offered by the search filter
pub const GENRES: [&str; 3] = ["Sports", "Food", "Music"];

pub const NO_COMMENTS: &str = "No comments yet.";
pub const NO_RESULTS: &str = "No results.";

/// Relative age label such as `5m ago`
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let s = (now - then).num_seconds();
    if s < 60 {
        return format!("{s}s ago");
    }
    let m = s / 60;
    if m < 60 {
        return format!("{m}m ago");
    }
    let h = m / 60;
    if h < 24 {
        return format!("{h}h ago");
    }
    format!("{}d ago", h / 24)
}

/// One row in the feed or the search results
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard<'a> {
    pub id: &'a VideoId,
    pub title: &'a str,
    pub genre: &'a str,
    pub age_rating: AgeRating,
    pub age: String,
}

impl<'a> VideoCard<'a> {
    fn new(video: &'a Video, now: DateTime<Utc>) -> Self {
        Self {
            id: &video.id,
            title: &video.title,
            genre: &video.genre,
            age_rating: video.age_rating,
            age: time_ago(video.created_at, now),
        }
    }
}

/// The "Latest" feed, newest first
pub fn feed(store: &Store, now: DateTime<Utc>) -> Vec<VideoCard<'_>> {
    store
        .list_videos_by_recency()
        .into_iter()
        .map(|video| VideoCard::new(video, now))
        .collect()
}

/// Five-star rating widget
#[derive(Debug, Clone, PartialEq)]
pub struct Stars {
    pub value: f64,
    /// `lit[n - 1]` is set when star `n` is highlighted
    pub lit: [bool; 5],
    pub label: String,
}

impl Stars {
    pub fn new(value: f64) -> Self {
        let rounded = value.round();
        let mut lit = [false; 5];
        for (n, star) in (1..=5).zip(lit.iter_mut()) {
            *star = f64::from(n) <= rounded;
        }

        Self {
            value,
            lit,
            label: format!("{value:.2} / 5"),
        }
    }
}

/// Watch page for a single video
#[derive(Debug, Clone)]
pub struct WatchView<'a> {
    pub video: &'a Video,
    pub stars: Stars,
    pub comments: &'a [Comment],
    /// Shown in place of the thread when there are no comments
    pub placeholder: Option<&'static str>,
}

pub fn watch<'a>(store: &'a Store, id: &VideoId) -> StoreResult<WatchView<'a>> {
    let video = store
        .video(id)
        .ok_or_else(|| StoreError::VideoNotFound(id.clone()))?;
    let comments = store.comments(id);

    Ok(WatchView {
        video,
        stars: Stars::new(store.average_rating(id)),
        comments,
        placeholder: comments.is_empty().then_some(NO_COMMENTS),
    })
}

/// Search page results
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    pub items: Vec<VideoCard<'a>>,
    pub placeholder: Option<&'static str>,
    /// Choices for the genre filter
    pub genres: &'static [&'static str],
    /// Choices for the age rating filter
    pub age_ratings: &'static [AgeRating],
}

pub fn search<'a>(
    store: &'a Store,
    query: &str,
    genre: &str,
    age_rating: &str,
    now: DateTime<Utc>,
) -> SearchResults<'a> {
    let items: Vec<_> = store
        .search(query, genre, age_rating)
        .into_iter()
        .map(|video| VideoCard::new(video, now))
        .collect();
    let placeholder = items.is_empty().then_some(NO_RESULTS);

    SearchResults {
        items,
        placeholder,
        genres: &GENRES,
        age_ratings: &AgeRating::ALL,
    }
}

/// Whether the upload form may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadGate {
    LoginRequired,
    CreatorsOnly,
    Open,
}

impl UploadGate {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            None => UploadGate::LoginRequired,
            Some(session) if session.can_upload() => UploadGate::Open,
            Some(_) => UploadGate::CreatorsOnly,
        }
    }

    /// Notice shown instead of the form
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            UploadGate::LoginRequired => Some("Login as a creator to upload."),
            UploadGate::CreatorsOnly => Some("Only creators can upload."),
            UploadGate::Open => None,
        }
    }
}

/// Values held by the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub publisher: String,
    pub producer: String,
    pub genre: String,
    pub age_rating: AgeRating,
    pub media: Option<MediaBlob>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            title: "My demo video".to_string(),
            publisher: String::new(),
            producer: String::new(),
            genre: String::new(),
            age_rating: AgeRating::Pg,
            media: None,
        }
    }
}

impl UploadForm {
    /// The submit button stays disabled until a file is picked
    pub fn can_submit(&self) -> bool {
        self.media.is_some()
    }

    /// File types the picker accepts
    pub fn accept(&self) -> &'static str {
        ACCEPT_TYPES
    }

    /// File picker change
    pub fn pick(&mut self, media: MediaBlob) {
        debug!("Picked {} for upload", media.file_name);
        self.media = Some(media);
    }
}

/// Top bar state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView<'a> {
    pub email: Option<&'a str>,
    pub show_upload: bool,
    pub show_login: bool,
    pub show_logout: bool,
}

pub fn header(store: &Store) -> HeaderView<'_> {
    let session = store.session();
    HeaderView {
        email: session.map(|s| s.email.as_str()),
        show_upload: session.is_some_and(Session::can_upload),
        show_login: session.is_none(),
        show_logout: session.is_some(),
    }
}
