use scraper::{Html, Selector};
use url::Url;

use engine_logging::engine_warn;

/// Where the book title lives on the access page.
const TITLE_SELECTOR: &str = "dl.EnglishBox dd h5";
/// Audio pages are the only `.shtml` links on the access page.
const AUDIO_LINK_SUFFIX: &str = ".shtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPage {
    pub title: Option<String>,
    /// Absolute URLs in document order.
    pub links: Vec<String>,
}

/// Extract the title and the audio links from an access page.
///
/// - title: text of the first `dl.EnglishBox dd h5`, each text node trimmed
///   and concatenated; empty text counts as absent
/// - links: every `a[href]` whose raw href ends in `.shtml`, joined onto `base`
pub fn parse_access_page(html: &str, base: &Url) -> AccessPage {
    let doc = Html::parse_document(html);
    let title_sel = Selector::parse(TITLE_SELECTOR).ok();
    let anchor_sel = Selector::parse("a[href]").ok();

    let title = title_sel
        .as_ref()
        .and_then(|sel| doc.select(sel).next())
        .map(|node| node.text().map(str::trim).collect::<String>())
        .filter(|t| !t.is_empty());

    let links = anchor_sel
        .as_ref()
        .map(|sel| {
            doc.select(sel)
                .filter_map(|anchor| anchor.value().attr("href"))
                .filter(|href| href.ends_with(AUDIO_LINK_SUFFIX))
                .filter_map(|href| match base.join(href) {
                    Ok(url) => Some(url.to_string()),
                    Err(err) => {
                        engine_warn!("Skipping unresolvable link {:?}: {}", href, err);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    AccessPage { title, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://mp3.bookmall.com.cn").unwrap()
    }

    #[test]
    fn title_text_nodes_are_trimmed_and_joined() {
        let html = "<dl class=\"EnglishBox\"><dd><h5>\n  Oxford <b> English </b>\n</h5></dd></dl>";
        let page = parse_access_page(html, &base());
        assert_eq!(page.title.as_deref(), Some("OxfordEnglish"));
    }

    #[test]
    fn title_outside_the_box_is_ignored() {
        let html = "<h5>Stray</h5><dl class=\"Other\"><dd><h5>Nope</h5></dd></dl>";
        assert_eq!(parse_access_page(html, &base()).title, None);
    }

    #[test]
    fn suffix_match_is_exact() {
        let html = r#"<a href="a.shtml?x=1">q</a><a href="b.SHTML">u</a><a href="c.html">h</a><a>no href</a>"#;
        assert!(parse_access_page(html, &base()).links.is_empty());
    }
}
