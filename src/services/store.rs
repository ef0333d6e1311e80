use crate::{error::*, types::*};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub trait PageStore {
    fn save(&self, page: &RawPage) -> Result<PathBuf>;
    fn load(&self, id: &PageId) -> Result<RawPage>;
    /// Saved page ids, sorted.
    fn list(&self) -> Result<Vec<PageId>>;
}

/// Raw pages as `<root>/<id>.html`.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    /// Creates `root` (and parents) if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &PageId) -> PathBuf {
        self.root.join(id.file_name())
    }
}

impl PageStore for LocalFsStore {
    fn save(&self, page: &RawPage) -> Result<PathBuf> {
        let p = self.path_for(&page.id);
        // Plain overwrite; a crash mid-write leaves a truncated file.
        fs::write(&p, page.html.as_bytes())?;
        Ok(p)
    }

    fn load(&self, id: &PageId) -> Result<RawPage> {
        let bytes = fs::read(self.path_for(id))?;
        let html = String::from_utf8(bytes).map_err(|_| ReviewError::Decode {
            url: self.path_for(id).display().to_string(),
        })?;
        Ok(RawPage {
            id: id.clone(),
            html,
        })
    }

    fn list(&self) -> Result<Vec<PageId>> {
        let mut out = Vec::new();
        if !self.root.exists() {
            return Ok(out);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name,
                None => continue,
            };
            match PageId::from_stem(stem) {
                Some(id) => out.push(id),
                None => warn!(path = %path.display(), "ignoring html file with a blank name"),
            }
        }
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, html: &str) -> RawPage {
        RawPage {
            id: PageId::parse(id).unwrap(),
            html: html.to_string(),
        }
    }

    #[test]
    fn open_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data").join("raw");
        let store = LocalFsStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn save_load_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsStore::open(dir.path()).unwrap();
        let stored = page("1100-6440000", "<html><body>Jeu vidéo — 9/10 ✓\r\n</body></html>");
        let path = store.save(&stored).unwrap();
        assert!(path.ends_with("1100-6440000.html"));
        assert_eq!(store.load(&stored.id).unwrap(), stored);
    }

    #[test]
    fn save_overwrites_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsStore::open(dir.path()).unwrap();
        store.save(&page("1-2", "old")).unwrap();
        store.save(&page("1-2", "new")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.load(&PageId::parse("1-2").unwrap()).unwrap().html, "new");
    }

    #[test]
    fn list_is_sorted_and_keeps_every_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsStore::open(dir.path()).unwrap();
        store.save(&page("20-1", "b")).unwrap();
        store.save(&page("100-5", "a")).unwrap();
        store.save(&page("20-0", "c")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("index.html"), "x").unwrap();

        let ids: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["100-5", "20-0", "20-1", "index"]);
    }
}
