// HTML to plain text
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Paragraph selectors tried in order; the first one producing text wins.
static CONTENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["#mw-content-text p", "article p", "main p", "p"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector"))
        .collect()
});

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));

/// Text of the main article paragraphs, whitespace collapsed.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in CONTENT_SELECTORS.iter() {
        let paragraphs: Vec<String> = document
            .select(selector)
            .map(|p| {
                let mut buf = String::new();
                collect_text(p, &mut buf);
                collapse_whitespace(&buf)
            })
            .filter(|t| !t.is_empty())
            .collect();

        if !paragraphs.is_empty() {
            return paragraphs.join(" ");
        }
    }

    String::new()
}

/// All visible text of the page, skipping script and style content.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut buf = String::new();
    collect_text(root, &mut buf);
    collapse_whitespace(&buf)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(el) = ElementRef::wrap(child) {
            if !SKIPPED_TAGS.contains(&el.value().name()) {
                collect_text(el, out);
            }
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><style>p { color: red }</style></head>
        <body>
          <nav>Navigation</nav>
          <div id="mw-content-text">
            <p>The charging   market is
               worth 12.4 billion.</p>
            <p>Growth hit 30%.</p>
          </div>
          <script>var x = "ignored";</script>
        </body></html>"#;

    #[test]
    fn main_text_prefers_article_paragraphs() {
        assert_eq!(
            extract_main_text(PAGE),
            "The charging market is worth 12.4 billion. Growth hit 30%."
        );
    }

    #[test]
    fn page_text_skips_scripts_and_styles() {
        let text = extract_page_text(PAGE);
        assert!(text.starts_with("Navigation The charging market"));
        assert!(!text.contains("ignored"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn main_text_is_empty_without_paragraphs() {
        let html = "<html><body><div>Only a div</div></body></html>";
        assert_eq!(extract_main_text(html), "");
        assert_eq!(extract_page_text(html), "Only a div");
    }
}
