pub mod card;
pub mod model;
pub mod source;
pub mod suggest_box;

pub use card::*;
pub use model::*;
pub use source::*;
pub use suggest_box::*;
