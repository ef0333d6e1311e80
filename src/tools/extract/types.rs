use serde::{Deserialize, Serialize};

/// Scalar fields of one review. `None` means the field was not found.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MainRow {
    pub review_id: String,
    pub source: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub score: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub text: Option<String>,
}

impl MainRow {
    /// Look a scalar field up by its column name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.title.as_deref(),
            "subtitle" => self.subtitle.as_deref(),
            "score" => self.score.as_deref(),
            "author" => self.author.as_deref(),
            "date" => self.date.as_deref(),
            "text" => self.text.as_deref(),
            _ => None,
        }
    }
}

/// One value of a multi-valued field, pointing back at its review.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AssocRow {
    pub review_id: String,
    pub value: String,
}

/// Everything pulled out of one document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub main: MainRow,
    #[serde(default)]
    pub platforms: Vec<AssocRow>,
    #[serde(default)]
    pub developers: Vec<AssocRow>,
    #[serde(default)]
    pub publishers: Vec<AssocRow>,
    #[serde(default)]
    pub genres: Vec<AssocRow>,
}

impl Extraction {
    /// Names of `required` scalar fields this review lacks.
    pub fn missing_fields<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .map(String::as_str)
            .filter(|name| self.main.field(name).is_none())
            .collect()
    }
}
