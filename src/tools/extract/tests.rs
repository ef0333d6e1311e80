#[cfg(test)]
mod tests {
    use crate::config::FieldSelectors;
    use crate::selectors::CompiledSelectors;
    use crate::tools::extract::*;
    use crate::types::Sel;

    const REVIEW: &str = r#"
        <html><head><title>Foo Review - GameSpot</title></head>
        <body>
          <section class="kubrick-info">
            <h1 class="kubrick-info__title">  Foo
            </h1>
          </section>
          <p class="news-deck">A tidy little sequel.</p>
          <div class="news-byline">
            By <a href="/profile/jane/">Jane   Doe</a>
            on <time datetime="2016-01-05T08:00:00-0800">January 5, 2016</time>
          </div>
          <div class="gs-score__cell"><span>8.5</span></div>
          <article class="js-content-entity-body">
            <p>First   paragraph.</p>
            <p></p>
            <p>Second <em>paragraph</em>.</p>
          </article>
          <div class="pod-objectStats-info__systems">
            <ul><li>PC</li><li>PS5</li><li>PC</li></ul>
          </div>
          <dl class="pod-objectStats-additional">
            <dd><a href="/developer/studio-a/">Studio A</a></dd>
            <dd><a href="/publisher/pub-1/">Pub One</a>, <a href="/publisher/pub-2/">Pub Two</a></dd>
            <dd><a href="/genre/action/">Action</a></dd>
          </dl>
        </body></html>
    "#;

    fn sels() -> CompiledSelectors {
        CompiledSelectors::compile(&FieldSelectors::default()).unwrap()
    }

    fn values(rows: &[AssocRow]) -> Vec<&str> {
        rows.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn extracts_main_row_and_associations() {
        let ex = extract_html(REVIEW, "1900-1", "GameSpot", &sels());

        assert_eq!(ex.main.review_id, "1900-1");
        assert_eq!(ex.main.source, "GameSpot");
        assert_eq!(ex.main.title.as_deref(), Some("Foo"));
        assert_eq!(ex.main.subtitle.as_deref(), Some("A tidy little sequel."));
        assert_eq!(ex.main.score.as_deref(), Some("8.5"));
        assert_eq!(ex.main.author.as_deref(), Some("Jane Doe"));
        assert_eq!(ex.main.date.as_deref(), Some("2016-01-05T08:00:00-0800"));
        assert_eq!(
            ex.main.text.as_deref(),
            Some("First paragraph.\n\nSecond paragraph.")
        );

        assert_eq!(values(&ex.platforms), vec!["PC", "PS5"]);
        assert_eq!(values(&ex.developers), vec!["Studio A"]);
        assert_eq!(values(&ex.publishers), vec!["Pub One", "Pub Two"]);
        assert_eq!(values(&ex.genres), vec!["Action"]);
    }

    #[test]
    fn association_rows_reference_main_row() {
        let ex = extract_html(REVIEW, "1900-77", "GameSpot", &sels());
        let all = ex
            .platforms
            .iter()
            .chain(&ex.developers)
            .chain(&ex.publishers)
            .chain(&ex.genres);
        for row in all {
            assert_eq!(row.review_id, ex.main.review_id);
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let s = sels();
        let a = extract_html(REVIEW, "1-1", "GameSpot", &s);
        let b = extract_html(REVIEW, "1-1", "GameSpot", &s);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_fields_are_absent_not_errors() {
        let html = "<html><body><h1>Only a title</h1></body></html>";
        let ex = extract_html(html, "2-2", "GameSpot", &sels());
        assert_eq!(ex.main.title.as_deref(), Some("Only a title"));
        assert_eq!(ex.main.score, None);
        assert_eq!(ex.main.date, None);
        assert_eq!(ex.main.text, None);
        assert!(ex.platforms.is_empty());
        assert!(ex.genres.is_empty());

        let required = vec!["title".to_string(), "score".to_string()];
        assert_eq!(ex.missing_fields(&required), vec!["score"]);
    }

    #[test]
    fn date_falls_back_to_text() {
        let html = r#"<div class="news-byline"><time>March 3, 2015</time></div>"#;
        let ex = extract_html(html, "3-3", "GameSpot", &sels());
        assert_eq!(ex.main.date.as_deref(), Some("March 3, 2015"));
    }

    #[test]
    fn body_without_paragraphs_uses_container_text() {
        let html = r#"<div class="js-content-entity-body">Just   text<br>here</div>"#;
        let ex = extract_html(html, "4-4", "GameSpot", &sels());
        assert_eq!(ex.main.text.as_deref(), Some("Just text here"));
    }

    #[test]
    fn line_breaks_and_blocks_separate_words() {
        let html = r#"<h1 class="kubrick-info__title">Super<br>Mario</h1>
            <div class="js-content-entity-body"><p>The good<br>The bad</p><p>A <b>bold</b>, fine game.</p></div>
            <ul class="system-list"><li><span>Xbox</span><br>Series X</li></ul>"#;
        let ex = extract_html(html, "4-5", "GameSpot", &sels());
        assert_eq!(ex.main.title.as_deref(), Some("Super Mario"));
        assert_eq!(
            ex.main.text.as_deref(),
            Some("The good The bad\n\nA bold, fine game.")
        );
        assert_eq!(values(&ex.platforms), vec!["Xbox Series X"]);
    }

    #[test]
    fn list_uses_first_selector_with_values() {
        let mut fields = FieldSelectors::default();
        fields.platforms = vec![Sel(".missing li".into()), Sel(".systems span".into())];
        let s = CompiledSelectors::compile(&fields).unwrap();
        let html = r#"<div class="systems"><span> Xbox One </span><span>Switch</span></div>"#;
        let ex = extract_html(html, "5-5", "GameSpot", &s);
        assert_eq!(values(&ex.platforms), vec!["Xbox One", "Switch"]);
    }

    #[test]
    fn empty_matches_fall_through_to_next_selector() {
        let html = r#"<h1 class="kubrick-info__title">   </h1><h1 class="news-title">Bar</h1>"#;
        let ex = extract_html(html, "6-6", "GameSpot", &sels());
        assert_eq!(ex.main.title.as_deref(), Some("Bar"));
    }
}
