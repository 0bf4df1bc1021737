//! The view-model store
//!
//! Holds the session, the video catalogue, comments and ratings, and exposes
//! the read and write operations the views call. The store is a plain owned
//! value: build one at startup and pass it by reference.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    error::{StoreError, StoreResult},
    ids::IdAllocator,
    models::{Comment, MediaBlob, Role, Session, Video, VideoFields, VideoId},
    seed,
};

/// In-memory application state
pub struct Store {
    session: Option<Session>,
    videos: Vec<Video>,
    comments: HashMap<VideoId, Vec<Comment>>,
    ratings: HashMap<VideoId, Vec<u8>>,
    ids: IdAllocator,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("session", &self.session)
            .field("videos", &self.videos.len())
            .field("comments", &self.comments.values().map(Vec::len).sum::<usize>())
            .field("ratings", &self.ratings.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl Store {
    /// Create an empty store
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            session: None,
            videos: Vec::new(),
            comments: HashMap::new(),
            ratings: HashMap::new(),
            ids: IdAllocator::new(),
            clock: Box::new(clock),
        }
    }

    /// Create a store holding the demo catalogue
    pub fn seeded(clock: impl Clock + 'static) -> Self {
        let mut store = Self::new(clock);
        let now = store.clock.now();
        store.videos = seed::seed_videos(&mut store.ids, now);
        info!("Store seeded with {} videos", store.videos.len());
        store
    }

    // ----- session -----

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a session; any prior session is replaced
    pub fn login(&mut self, email: impl Into<String>, role: Role) -> &Session {
        let session = Session::new(email, role);
        info!("Session started for {} as {}", session.email, session.role);
        self.session.insert(session)
    }

    /// Register a new account. Identical to `login`: there is no account
    /// store to check against.
    pub fn register(&mut self, email: impl Into<String>, role: Role) -> &Session {
        self.login(email, role)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Session ended for {}", session.email);
        }
    }

    /// Check that the active session may upload
    pub fn require_creator(&self) -> StoreResult<&Session> {
        match &self.session {
            None => Err(StoreError::LoginRequired),
            Some(session) if session.can_upload() => Ok(session),
            Some(session) => Err(StoreError::PermissionDenied { role: session.role }),
        }
    }

    // ----- videos -----

    /// Videos in stored order (newest upload first)
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn video(&self, id: &VideoId) -> Option<&Video> {
        self.videos.iter().find(|video| &video.id == id)
    }

    fn ensure_video(&self, id: &VideoId) -> StoreResult<()> {
        match self.video(id) {
            Some(_) => Ok(()),
            None => {
                warn!("Rejected operation on unknown video {}", id);
                Err(StoreError::VideoNotFound(id.clone()))
            }
        }
    }

    /// Videos ordered by creation time, newest first. Videos created at the
    /// same instant keep their stored order.
    pub fn list_videos_by_recency(&self) -> Vec<&Video> {
        let mut sorted: Vec<&Video> = self.videos.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    /// Filter videos by title substring (case-insensitive), genre and age
    /// rating. Empty arguments do not filter.
    pub fn search(&self, query: &str, genre: &str, age_rating: &str) -> Vec<&Video> {
        let needle = query.to_lowercase();
        let results: Vec<&Video> = self
            .videos
            .iter()
            .filter(|video| needle.is_empty() || video.title.to_lowercase().contains(&needle))
            .filter(|video| genre.is_empty() || video.genre == genre)
            .filter(|video| age_rating.is_empty() || video.age_rating.as_str() == age_rating)
            .collect();

        debug!(
            "Search query={:?} genre={:?} age={:?} matched {}",
            query,
            genre,
            age_rating,
            results.len()
        );
        results
    }

    /// Publish a new video as the active creator
    ///
    /// The video is placed at the head of the catalogue and returned so the
    /// caller can open it.
    pub fn create_video(&mut self, fields: VideoFields, media: MediaBlob) -> StoreResult<&Video> {
        if let Err(e) = self.require_creator() {
            warn!("Upload rejected: {}", e);
            return Err(e);
        }

        let video = Video {
            id: self.ids.next_video_id(),
            title: fields.title,
            genre: fields.genre,
            age_rating: fields.age_rating,
            media_type: media.media_type(),
            src: media.handle,
            created_at: self.clock.now(),
            publisher: fields.publisher,
            producer: fields.producer,
        };

        info!("Video {} created: {}", video.id, video.title);
        self.videos.insert(0, video);
        Ok(&self.videos[0])
    }

    // ----- comments -----

    /// Comments on a video, most recent first
    pub fn comments(&self, video_id: &VideoId) -> &[Comment] {
        self.comments
            .get(video_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Post a comment as the active session
    ///
    /// Callers reject blank text before calling; the text is stored as given.
    pub fn post_comment(&mut self, video_id: &VideoId, text: impl Into<String>) -> StoreResult<&Comment> {
        let Some(session) = &self.session else {
            warn!("Comment on {} rejected: no active session", video_id);
            return Err(StoreError::LoginRequired);
        };
        let author_email = session.email.clone();
        self.ensure_video(video_id)?;

        let comment = Comment {
            id: self.ids.next_comment_id(),
            video_id: video_id.clone(),
            author_email,
            text: text.into(),
            posted_at: self.clock.now(),
        };

        info!("Comment {} posted on {} by {}", comment.id, video_id, comment.author_email);
        let thread = self.comments.entry(video_id.clone()).or_default();
        thread.insert(0, comment);
        Ok(&thread[0])
    }

    // ----- ratings -----

    pub fn ratings(&self, video_id: &VideoId) -> &[u8] {
        self.ratings
            .get(video_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Record a rating. Values are not range-checked and repeated ratings
    /// all count.
    pub fn submit_rating(&mut self, video_id: &VideoId, value: u8) -> StoreResult<()> {
        self.ensure_video(video_id)?;
        self.ratings.entry(video_id.clone()).or_default().push(value);
        debug!("Rating {} recorded for {}", value, video_id);
        Ok(())
    }

    /// Mean of the ratings recorded for a video, 0 when there are none
    pub fn average_rating(&self, video_id: &VideoId) -> f64 {
        average(self.ratings(video_id))
    }
}

fn average(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    f64::from(sum) / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::AgeRating;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> ManualClock {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ManualClock::stepping(start, Duration::seconds(1))
    }

    fn fields(title: &str) -> VideoFields {
        VideoFields {
            title: title.to_string(),
            genre: "Food".to_string(),
            age_rating: AgeRating::Twelve,
            publisher: "Pub".to_string(),
            producer: "Prod".to_string(),
        }
    }

    fn id(raw: &str) -> VideoId {
        VideoId(raw.to_string())
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[2, 4]), 3.0);
        assert_eq!(average(&[5, 4, 4]), 13.0 / 3.0);
    }

    #[test]
    fn test_seeded_store_holds_catalogue() {
        let store = Store::seeded(clock());
        let titles: Vec<_> = store.videos().iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["Sunset Skate Line", "Latte Art 101", "Mini Synth Jam"]);
        assert!(store.session().is_none());
    }

    #[test]
    fn test_rating_unknown_video_is_rejected() {
        let mut store = Store::seeded(clock());
        let err = store.submit_rating(&id("v99"), 3).unwrap_err();
        assert_eq!(err, StoreError::VideoNotFound(id("v99")));
        assert!(store.ratings(&id("v99")).is_empty());
    }

    #[test]
    fn test_comment_on_unknown_video_is_rejected() {
        let mut store = Store::seeded(clock());
        store.login("a@b.c", Role::Consumer);
        let err = store.post_comment(&id("v42"), "hi").unwrap_err();
        assert_eq!(err, StoreError::VideoNotFound(id("v42")));
        assert!(store.comments(&id("v42")).is_empty());
    }

    #[test]
    fn test_comment_ids_are_allocated_in_order() {
        let mut store = Store::seeded(clock());
        store.login("a@b.c", Role::Consumer);
        let first = store.post_comment(&id("v1"), "one").unwrap().id.clone();
        let second = store.post_comment(&id("v2"), "two").unwrap().id.clone();
        assert_eq!(first.as_str(), "c1");
        assert_eq!(second.as_str(), "c2");
    }

    #[test]
    fn test_new_video_ids_continue_after_seed() {
        let mut store = Store::seeded(clock());
        store.login("maker@b.c", Role::Creator);
        let video = store
            .create_video(fields("Fresh"), MediaBlob::new("f.mp4", "video/mp4", "blob:f"))
            .unwrap();
        assert_eq!(video.id.as_str(), "v4");
    }

    #[test]
    fn test_require_creator_without_session() {
        let store = Store::seeded(clock());
        assert_eq!(store.require_creator().unwrap_err(), StoreError::LoginRequired);
    }

    #[test]
    fn test_logout_without_session_is_noop() {
        let mut store = Store::seeded(clock());
        store.logout();
        assert!(store.session().is_none());
    }
}
