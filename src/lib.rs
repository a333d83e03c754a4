//! Story Personalizer: the reading core of an interactive story app.
//!
//! Substitutes participant names and Swedish pronouns into pre-written
//! story text, and provides the catalog, reading-session, and preference
//! logic the reader builds on.

pub mod core;
pub mod schema;

pub use crate::core::personalize::{personalize, Cast};
pub use crate::schema::participant::{Gender, Participant};
