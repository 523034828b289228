//! src/domain/menu.rs

use crate::domain::{lenient, DocumentId, ValidationError};

/// A dish of the vendor menu, stored in the `dishes` collection.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id", default, deserialize_with = "lenient::optional_document_id")]
    pub id: Option<DocumentId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image_url: String,
}

impl MenuItem {
    pub fn price_display(&self) -> String {
        format!("LKR {:.2}", self.price)
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct MenuItemFormData {
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// Body sent to `dishes/store`.
#[derive(Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
}

impl TryFrom<MenuItemFormData> for NewMenuItem {
    type Error = ValidationError;

    fn try_from(form: MenuItemFormData) -> Result<Self, Self::Error> {
        let name = form.name.trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        let price_text = form.price.trim();
        let price = if price_text.is_empty() {
            0.0
        } else {
            price_text
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| ValidationError::InvalidNumber(price_text.to_owned()))?
        };
        Ok(Self {
            name,
            price,
            description: form.description.trim().to_owned(),
            image_url: form.image_url.trim().to_owned(),
        })
    }
}
