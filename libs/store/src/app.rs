//! Navigation shell
//!
//! `App` owns the store and the current route, and applies the checks each
//! form performs before the store is called.

use tracing::warn;

use crate::{
    error::{StoreError, StoreResult},
    models::{Role, VideoFields, VideoId},
    store::Store,
    views::{self, UploadForm, UploadGate, WatchView},
};

/// Alert shown when a logged-out user tries to comment
pub const LOGIN_FIRST: &str = "Login first";

/// Screen currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Watch(VideoId),
    Search,
    Upload,
    Login,
    Register,
}

/// Which auth form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    /// The route the "Need an account?" / "Have an account?" link leads to
    pub fn other(&self) -> Route {
        match self {
            AuthMode::Login => Route::Register,
            AuthMode::Register => Route::Login,
        }
    }
}

/// Result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action changed state
    Applied,
    /// The form was not in a submittable state; nothing happened
    Ignored,
    /// A blocking alert was shown; nothing happened
    Alert(&'static str),
    /// The current screen does not allow the action
    Denied(UploadGate),
}

/// Application shell
#[derive(Debug)]
pub struct App {
    store: Store,
    route: Route,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            route: Route::Home,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Switch screens. Watch routes must name an existing video.
    pub fn go(&mut self, route: Route) -> StoreResult<()> {
        if let Route::Watch(id) = &route {
            if self.store.video(id).is_none() {
                warn!("Refusing to open unknown video {}", id);
                return Err(StoreError::VideoNotFound(id.clone()));
            }
        }
        self.route = route;
        Ok(())
    }

    pub fn open(&mut self, id: &VideoId) -> StoreResult<()> {
        self.go(Route::Watch(id.clone()))
    }

    /// The watch view for the current route, if a video is open
    pub fn watching(&self) -> Option<WatchView<'_>> {
        match &self.route {
            Route::Watch(id) => views::watch(&self.store, id).ok(),
            _ => None,
        }
    }

    pub fn upload_gate(&self) -> UploadGate {
        UploadGate::for_session(self.store.session())
    }

    /// Comment form submission on the watch screen
    pub fn submit_comment(&mut self, text: &str) -> Outcome {
        let Route::Watch(id) = &self.route else {
            return Outcome::Ignored;
        };
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }

        match self.store.post_comment(id, text) {
            Ok(_) => Outcome::Applied,
            Err(StoreError::LoginRequired) => Outcome::Alert(LOGIN_FIRST),
            Err(e) => {
                warn!("Comment dropped: {}", e);
                Outcome::Ignored
            }
        }
    }

    /// Star click on the watch screen
    pub fn rate(&mut self, value: u8) -> Outcome {
        let Route::Watch(id) = &self.route else {
            return Outcome::Ignored;
        };

        match self.store.submit_rating(id, value) {
            Ok(()) => Outcome::Applied,
            Err(_) => Outcome::Ignored,
        }
    }

    /// Upload form submission; opens the new video on success
    pub fn submit_upload(&mut self, form: UploadForm) -> Outcome {
        let gate = self.upload_gate();
        if gate != UploadGate::Open {
            return Outcome::Denied(gate);
        }
        let Some(media) = form.media else {
            return Outcome::Ignored;
        };

        let fields = VideoFields {
            title: form.title,
            genre: form.genre,
            age_rating: form.age_rating,
            publisher: form.publisher,
            producer: form.producer,
        };

        let created = self
            .store
            .create_video(fields, media)
            .map(|video| video.id.clone());
        match created {
            Ok(id) => {
                self.route = Route::Watch(id);
                Outcome::Applied
            }
            Err(_) => Outcome::Denied(self.upload_gate()),
        }
    }

    /// Login or register form submission; returns to the feed
    pub fn submit_auth(&mut self, mode: AuthMode, email: &str, role: Role) -> Outcome {
        match mode {
            AuthMode::Login => self.store.login(email, role),
            AuthMode::Register => self.store.register(email, role),
        };
        self.route = Route::Home;
        Outcome::Applied
    }

    pub fn logout(&mut self) {
        self.store.logout();
    }
}
