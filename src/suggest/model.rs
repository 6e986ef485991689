use serde::Deserialize;
use serde_json::Value;

use crate::contexts::LookupResult;

/// A candidate returned by the suggestion service.
///
/// `image_url` is accepted from the service but the displayed image is derived
/// from the label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion {
    pub label: String,
    pub image_url: Option<String>,
}

impl Suggestion {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// The label, if there is one to show
    pub fn display_label(&self) -> Option<&str> {
        if self.label.is_empty() {
            None
        } else {
            Some(&self.label)
        }
    }
}

/// One element of the service's JSON array, before normalization
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireSuggestion {
    Text(String),
    Item {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        value: Option<String>,
        // non-string values are dropped, not rejected
        #[serde(default)]
        image_url: Option<Value>,
    },
}

impl From<WireSuggestion> for Suggestion {
    fn from(wire: WireSuggestion) -> Self {
        match wire {
            WireSuggestion::Text(label) => Suggestion::new(label),
            WireSuggestion::Item {
                label,
                value,
                image_url,
            } => {
                let label = label
                    .filter(|l| !l.is_empty())
                    .or(value)
                    .unwrap_or_default();
                let image_url = match image_url {
                    Some(Value::String(url)) => Some(url),
                    _ => None,
                };
                Suggestion { label, image_url }
            }
        }
    }
}

/// Decode a service response body into suggestions, keeping the service's order
pub fn parse_suggestions(body: &[u8]) -> LookupResult<Vec<Suggestion>> {
    let items: Vec<WireSuggestion> = serde_json::from_slice(body)?;
    Ok(items.into_iter().map(Suggestion::from).collect())
}
