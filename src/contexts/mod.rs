// Context modules for application state management
pub mod error;
pub mod suggest;

pub use error::*;
pub use suggest::*;
