//! The views module contains the components for all Layouts and Routes for our app.

mod search;
pub use search::Search;
