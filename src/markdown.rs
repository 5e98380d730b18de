//! Markdown to HTML via pulldown-cmark.
//!
//! Fenced code keeps its info string as `class="language-*"` so a client-side
//! highlighter (or plain CSS) can style Scala and Python samples.

use maud::{Markup, PreEscaped};
use pulldown_cmark::{Options, Parser, html as md_html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Render a full article body.
pub fn render_body(markdown: &str) -> Markup {
    let parser = Parser::new_ext(markdown, options());
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    PreEscaped(html)
}

/// Render short markdown for a block container (the hero description).
///
/// A single paragraph loses its `<p>` wrapper; anything else (lists,
/// headings, several paragraphs) is returned as rendered block HTML.
pub fn render_inline(markdown: &str) -> Markup {
    let parser = Parser::new_ext(markdown.trim(), options());
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    let trimmed = html.trim_end();
    let inner = trimmed
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .filter(|s| !s.contains("<p>"))
        .unwrap_or(trimmed);
    PreEscaped(inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_renders_fenced_code_with_language() {
        let html = render_body("```scala\nval x = 1\n```").into_string();
        assert!(html.contains(r#"<code class="language-scala">"#));
        assert!(html.contains("val x = 1"));
    }

    #[test]
    fn body_escapes_code_contents() {
        let html = render_body("```python\nif a < b: pass\n```").into_string();
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn body_renders_tables() {
        let html = render_body("| a | b |\n|---|---|\n| 1 | 2 |").into_string();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn inline_strips_paragraph() {
        let html = render_inline("Articles about *Scala*.").into_string();
        assert_eq!(html, "Articles about <em>Scala</em>.");
    }

    #[test]
    fn inline_keeps_block_structure() {
        let html = render_inline("First.\n\nSecond.").into_string();
        assert_eq!(html, "<p>First.</p>\n<p>Second.</p>");

        let list = render_inline("- Scala\n- Python").into_string();
        assert!(list.starts_with("<ul>"));
        assert!(list.ends_with("</ul>"));
    }

    #[test]
    fn inline_empty_is_empty() {
        assert_eq!(render_inline("").into_string(), "");
    }
}
