//! Output tables: the five record sets concatenated across documents.


use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::MissingField;
use crate::error::Result;
use crate::tools::extract::{AssocRow, Extraction, MainRow};

pub const MAIN_TABLE: &str = "df_cb_main.csv";
pub const PLATFORM_TABLE: &str = "df_cb_platform.csv";
pub const DEVELOPER_TABLE: &str = "df_cb_developer.csv";
pub const PUBLISHER_TABLE: &str = "df_cb_publisher.csv";
pub const GENRE_TABLE: &str = "df_cb_genre.csv";

const MAIN_COLUMNS: [&str; 8] = [
    "review_id", "source", "title", "subtitle", "score", "author", "date", "text",
];

/// How absent scalar cells are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blank {
    Empty,
    Marker(String),
}

impl Blank {
    pub fn from_policy(policy: MissingField, marker: &str) -> Self {
        match policy {
            MissingField::Marker => Blank::Marker(marker.to_string()),
            // Reviews dropped under SkipReview never reach the tables, so
            // remaining gaps in optional fields render empty.
            MissingField::Empty | MissingField::SkipReview => Blank::Empty,
        }
    }

    fn cell<'a>(&'a self, value: Option<&'a str>) -> &'a str {
        match (value, self) {
            (Some(v), _) => v,
            (None, Blank::Empty) => "",
            (None, Blank::Marker(m)) => m.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tables {
    pub main: Vec<MainRow>,
    pub platforms: Vec<AssocRow>,
    pub developers: Vec<AssocRow>,
    pub publishers: Vec<AssocRow>,
    pub genres: Vec<AssocRow>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's rows, keeping document order.
    pub fn push(&mut self, extraction: Extraction) {
        self.main.push(extraction.main);
        self.platforms.extend(extraction.platforms);
        self.developers.extend(extraction.developers);
        self.publishers.extend(extraction.publishers);
        self.genres.extend(extraction.genres);
    }

    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Write all five tables into `dir`, creating it if needed.
    pub fn write_all(&self, dir: &Path, blank: &Blank) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(5);

        let main_path = dir.join(MAIN_TABLE);
        write_main(&main_path, &self.main, blank)?;
        written.push(main_path);

        for (name, column, rows) in [
            (PLATFORM_TABLE, "platform", &self.platforms),
            (DEVELOPER_TABLE, "developer", &self.developers),
            (PUBLISHER_TABLE, "publisher", &self.publishers),
            (GENRE_TABLE, "genre", &self.genres),
        ] {
            let path = dir.join(name);
            write_assoc(&path, column, rows)?;
            written.push(path);
        }

        info!(
            dir = %dir.display(),
            reviews = self.main.len(),
            platforms = self.platforms.len(),
            developers = self.developers.len(),
            publishers = self.publishers.len(),
            genres = self.genres.len(),
            "wrote tables"
        );
        Ok(written)
    }
}

/// Leading column is the unnamed 0-based row index.
fn write_main(path: &Path, rows: &[MainRow], blank: &Blank) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    let mut header = vec![""];
    header.extend(MAIN_COLUMNS);
    w.write_record(&header)?;
    for (idx, row) in rows.iter().enumerate() {
        let index = idx.to_string();
        w.write_record([
            index.as_str(),
            row.review_id.as_str(),
            row.source.as_str(),
            blank.cell(row.title.as_deref()),
            blank.cell(row.subtitle.as_deref()),
            blank.cell(row.score.as_deref()),
            blank.cell(row.author.as_deref()),
            blank.cell(row.date.as_deref()),
            blank.cell(row.text.as_deref()),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_assoc(path: &Path, column: &str, rows: &[AssocRow]) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["", "review_id", column])?;
    for (idx, row) in rows.iter().enumerate() {
        let index = idx.to_string();
        w.write_record([index.as_str(), row.review_id.as_str(), row.value.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
