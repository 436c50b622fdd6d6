use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A coffee on the menu.
///
/// Field names on the wire are the ones existing clients already send and
/// read (`ID`, `ImageURL`, …); snake_case spellings are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    #[serde(rename = "ImageURL", alias = "image_url")]
    pub image_url: String,
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
    /// Free text, never parsed.
    #[serde(rename = "Cost", alias = "cost")]
    pub cost: String,
    #[serde(rename = "Article", alias = "article")]
    pub article: String,
}

/// The caller-controlled part of a [`Product`], decoded from create and
/// update bodies. An `ID` in the body is ignored; missing fields are empty.
///
/// Keys match without regard to case or underscores, so `ImageURL`,
/// `imageUrl` and `image_url` all fill the same field. An exact spelling
/// wins over a folded one when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ProductDraft {
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub cost: String,
    pub article: String,
}

impl TryFrom<Map<String, Value>> for ProductDraft {
    type Error = String;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            image_url: text_field(&body, "ImageURL")?,
            title: text_field(&body, "Title")?,
            description: text_field(&body, "Description")?,
            cost: text_field(&body, "Cost")?,
            article: text_field(&body, "Article")?,
        })
    }
}

fn text_field(body: &Map<String, Value>, name: &str) -> Result<String, String> {
    let folded = fold(name);
    let value = body
        .get(name)
        .or_else(|| body.iter().find(|(key, _)| fold(key) == folded).map(|(_, v)| v));
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(format!("`{name}` must be a string, got {other}")),
    }
}

fn fold(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Product {
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Self {
            id,
            image_url: draft.image_url,
            title: draft.title,
            description: draft.description,
            cost: draft.cost,
            article: draft.article,
        }
    }

    /// Overwrites the editable fields. The identifier and article code stay.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.image_url = draft.image_url;
        self.title = draft.title;
        self.description = draft.description;
        self.cost = draft.cost;
    }
}
