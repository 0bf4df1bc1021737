//! View-model store for the VidCube demo
//!
//! This crate holds everything the client keeps in memory: the current
//! session, the video catalogue, comments and ratings. It provides the pure
//! read operations the screens render from, the mutations their forms
//! trigger, and a small navigation shell tying the two together.
//!
//! ```rust
//! use store::{Role, Store, SystemClock};
//!
//! let mut store = Store::seeded(SystemClock);
//! store.login("viewer@example.com", Role::Consumer);
//!
//! let latte = store.search("latte", "", "");
//! assert_eq!(latte.len(), 1);
//!
//! let id = latte[0].id.clone();
//! store.submit_rating(&id, 4).unwrap();
//! assert_eq!(store.average_rating(&id), 4.0);
//! ```

pub mod app;
pub mod clock;
pub mod error;
pub mod ids;
pub mod models;
pub mod seed;
pub mod store;
pub mod views;

pub use app::{App, AuthMode, Outcome, Route};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use models::{AgeRating, Comment, CommentId, MediaBlob, Role, Session, Video, VideoFields, VideoId};
pub use store::Store;
