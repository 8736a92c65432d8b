pub mod app;
pub mod config;
pub mod error;
pub mod journal;
pub mod meals;
pub mod session;
pub mod state;
pub mod stats;
pub mod workouts;

pub use error::CommandError;
pub use session::{Screen, Session, UserProfile};
