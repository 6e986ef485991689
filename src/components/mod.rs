//! Shared components of the search page: the input, the dropdown under it and
//! the container the selected bird is rendered into.

mod search_input;
pub use search_input::{SearchInput, SearchKey};

mod suggestion_list;
pub use suggestion_list::SuggestionList;

mod bird_images;
pub use bird_images::BirdImages;
