#[cfg(test)]
mod tests {
    use crate::config::SiteConfig;
    use crate::error::ReviewError;
    use crate::services::fetch::Fetcher;
    use crate::services::store::{LocalFsStore, PageStore};
    use crate::tools::pages::*;
    use crate::types::ReviewLink;
    use std::cell::Cell;

    struct CountingFetcher {
        calls: Cell<usize>,
    }

    impl Fetcher for CountingFetcher {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn fetch_text(&self, url: &str) -> crate::Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("<html><body>{url}</body></html>"))
        }
    }

    #[test]
    fn page_id_is_trailing_digit_pair() {
        let id = page_id_from_url("http://www.gamespot.com/reviews/halo-5-review/1900-6416270/")
            .unwrap();
        assert_eq!(id.as_str(), "1900-6416270");
        assert_eq!(id.file_name(), "1900-6416270.html");
    }

    #[test]
    fn page_id_requires_trailing_slash_and_digits() {
        for url in [
            "http://www.gamespot.com/reviews/halo-5-review/1900-6416270",
            "http://www.gamespot.com/reviews/halo-5-review/",
            "http://www.gamespot.com/reviews/1900-abc/",
            "http://www.gamespot.com/reviews/1900-6416270/extra/",
        ] {
            let err = page_id_from_url(url).unwrap_err();
            assert!(matches!(err, ReviewError::MissingPageId(_)), "{url}");
        }
    }

    #[test]
    fn absolute_url_prefixes_origin() {
        let site = SiteConfig::default();
        let url = absolute_url(&site, &ReviewLink("/reviews/a/1900-1/".into())).unwrap();
        assert_eq!(url, "http://www.gamespot.com/reviews/a/1900-1/");

        let passthrough =
            absolute_url(&site, &ReviewLink("https://other.example/reviews/b/1-2/".into())).unwrap();
        assert_eq!(passthrough, "https://other.example/reviews/b/1-2/");
    }

    #[test]
    fn fetch_page_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsStore::open(dir.path()).unwrap();
        let fetcher = CountingFetcher { calls: Cell::new(0) };
        let url = "http://www.gamespot.com/reviews/x/1900-42/";

        let path = fetch_page(&fetcher, &store, url).unwrap();
        assert_eq!(path, dir.path().join("1900-42.html"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("<html><body>{url}</body></html>")
        );
    }

    #[test]
    fn fetch_page_without_id_fails_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsStore::open(dir.path()).unwrap();
        let fetcher = CountingFetcher { calls: Cell::new(0) };

        let err = fetch_page(&fetcher, &store, "http://www.gamespot.com/reviews/").unwrap_err();
        assert!(matches!(err, ReviewError::MissingPageId(_)));
        assert_eq!(fetcher.calls.get(), 0);
        assert!(store.list().unwrap().is_empty());
    }
}
