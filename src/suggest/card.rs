use crate::utils::config::NO_IMAGE_PLACEHOLDER;
use crate::utils::text_utils::{derive_filename, escape_html};

/// What the `bird-images` container shows after a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirdCard {
    Bird { label: String, image_src: String },
    Placeholder,
}

impl BirdCard {
    /// Card for `label`, with the image looked up under `image_base`
    pub fn for_label(label: &str, image_base: &str) -> Self {
        BirdCard::Bird {
            label: label.to_string(),
            image_src: format!("{}/{}", image_base, derive_filename(label)),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            BirdCard::Bird { label, image_src } => {
                let name = escape_html(label);
                format!(
                    r#"<div class="bird-card"><img src="{src}" alt="{name}"><div class="bird-caption">{name}</div></div>"#,
                    src = escape_html(image_src),
                    name = name,
                )
            }
            BirdCard::Placeholder => NO_IMAGE_PLACEHOLDER.to_string(),
        }
    }
}
