//! src/domain/news.rs

use crate::domain::{lenient, ValidationError};

/// A news post of the `news` collection. `image` holds a data URL.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub news_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub news_content: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: String,
}

impl NewsItem {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.news_title.trim().is_empty() {
            return Err(ValidationError::MissingField("news_title"));
        }
        Ok(self)
    }

    /// Only data URLs and http(s) links are rendered as images.
    pub fn has_image(&self) -> bool {
        let image = self.image.trim();
        image.starts_with("data:image/")
            || image.starts_with("https://")
            || image.starts_with("http://")
    }
}
