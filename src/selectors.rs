//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::config::FieldSelectors;
use crate::error::{Result, ReviewError};
use crate::types::Sel;

/// Selector for paragraphs inside a review body.
pub static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Compile one configured selector.
pub fn compile(sel: &Sel) -> Result<Selector> {
    Selector::parse(&sel.0).map_err(|e| ReviewError::selector_error(&sel.0, format!("{e:?}")))
}

fn compile_all(sels: &[Sel]) -> Result<Vec<Selector>> {
    sels.iter().map(compile).collect()
}

/// [`FieldSelectors`] compiled once per run.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub title: Vec<Selector>,
    pub subtitle: Vec<Selector>,
    pub score: Vec<Selector>,
    pub author: Vec<Selector>,
    pub date: Vec<Selector>,
    pub body: Vec<Selector>,
    pub platforms: Vec<Selector>,
    pub developers: Vec<Selector>,
    pub publishers: Vec<Selector>,
    pub genres: Vec<Selector>,
}

impl CompiledSelectors {
    pub fn compile(fields: &FieldSelectors) -> Result<Self> {
        Ok(Self {
            title: compile_all(&fields.title)?,
            subtitle: compile_all(&fields.subtitle)?,
            score: compile_all(&fields.score)?,
            author: compile_all(&fields.author)?,
            date: compile_all(&fields.date)?,
            body: compile_all(&fields.body)?,
            platforms: compile_all(&fields.platforms)?,
            developers: compile_all(&fields.developers)?,
            publishers: compile_all(&fields.publishers)?,
            genres: compile_all(&fields.genres)?,
        })
    }
}
