//! Rendering of generated gift suggestions.
//!
//! The service replies with markdown. [`render_html`] produces an HTML
//! fragment for embedding in a page, [`render_terminal`] produces text for
//! the CLI. Raw HTML in the reply is shown as text in both.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_ITALIC: &str = "\x1b[3m";
const ANSI_STRIKE: &str = "\x1b[9m";
const ANSI_CODE: &str = "\x1b[36m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";
const RULE_WIDTH: usize = 40;

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

fn escape_raw_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

pub fn render_html(input: &str) -> String {
    let parser = Parser::new_ext(input, parser_options()).map(escape_raw_html);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalStyle {
    #[default]
    Plain,
    Ansi,
}

pub fn render_terminal(input: &str, style: TerminalStyle) -> String {
    let mut renderer = TerminalRenderer::new(style);
    for event in Parser::new_ext(input, parser_options()).map(escape_raw_html) {
        renderer.event(event);
    }
    renderer.finish()
}

struct TerminalRenderer {
    style: TerminalStyle,
    out: String,
    prefixes: Vec<String>,
    at_line_start: bool,
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    /// Visible characters written since the current heading opened.
    heading_width: Option<usize>,
}

impl TerminalRenderer {
    fn new(style: TerminalStyle) -> Self {
        Self {
            style,
            out: String::new(),
            prefixes: Vec::new(),
            at_line_start: true,
            lists: Vec::new(),
            links: Vec::new(),
            heading_width: None,
        }
    }

    fn begin_text(&mut self) {
        if self.at_line_start {
            for prefix in &self.prefixes {
                self.out.push_str(prefix);
            }
            self.at_line_start = false;
        }
    }

    fn open_style(&mut self, code: &str) {
        if self.style == TerminalStyle::Ansi {
            self.begin_text();
            self.out.push_str(code);
        }
    }

    fn close_style(&mut self) {
        if self.style == TerminalStyle::Ansi {
            self.out.push_str(ANSI_RESET);
        }
    }

    fn write(&mut self, text: &str) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                self.out.push('\n');
                self.at_line_start = true;
            }
            if segment.is_empty() {
                continue;
            }
            self.begin_text();
            self.out.push_str(segment);
            if let Some(width) = self.heading_width.as_mut() {
                *width += segment.chars().count();
            }
        }
    }

    fn end_line(&mut self) {
        if !self.at_line_start {
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    fn end_block(&mut self) {
        self.end_line();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.write(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(raw) | Event::InlineHtml(raw) => self.write(&raw),
            Event::SoftBreak => self.write(" "),
            Event::HardBreak => self.write("\n"),
            Event::Rule => {
                self.end_line();
                self.open_style(ANSI_DIM);
                self.write(&"─".repeat(RULE_WIDTH));
                self.close_style();
                self.end_block();
            }
            Event::TaskListMarker(checked) => self.write(if checked { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn inline_code(&mut self, code: &CowStr<'_>) {
        match self.style {
            TerminalStyle::Ansi => {
                self.open_style(ANSI_CODE);
                self.write(code);
                self.close_style();
            }
            TerminalStyle::Plain => self.write(&format!("`{code}`")),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.end_block_if_content();
                let depth = level as usize;
                if depth > 2 {
                    self.write(&format!("{} ", "#".repeat(depth)));
                }
                self.open_style(ANSI_BOLD);
                self.heading_width = Some(0);
            }
            Tag::BlockQuote { .. } => {
                self.end_block_if_content();
                self.prefixes.push("│ ".to_string());
            }
            Tag::CodeBlock { .. } => {
                self.end_block_if_content();
                self.prefixes.push("    ".to_string());
                self.open_style(ANSI_CODE);
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.end_block_if_content();
                } else {
                    self.end_line();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.end_line();
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                self.write(&marker);
                self.prefixes.push(" ".repeat(marker.chars().count()));
            }
            Tag::Emphasis => self.open_style(ANSI_ITALIC),
            Tag::Strong => self.open_style(ANSI_BOLD),
            Tag::Strikethrough => self.open_style(ANSI_STRIKE),
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(level) => {
                let width = self.heading_width.take().unwrap_or(0);
                self.close_style();
                let underline = match level {
                    HeadingLevel::H1 => Some('='),
                    HeadingLevel::H2 => Some('-'),
                    _ => None,
                };
                if let Some(ch) = underline {
                    self.end_line();
                    self.write(&ch.to_string().repeat(width));
                }
                self.end_block();
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.end_block();
                } else {
                    self.end_line();
                }
            }
            TagEnd::BlockQuote { .. } => {
                self.end_line();
                self.prefixes.pop();
                self.end_block();
            }
            TagEnd::CodeBlock => {
                self.close_style();
                self.end_line();
                self.prefixes.pop();
                self.end_block();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.end_block();
                }
            }
            TagEnd::Item => {
                self.end_line();
                self.prefixes.pop();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.close_style(),
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    self.write(&format!(" ({url})"));
                }
            }
            _ => {}
        }
    }

    fn end_block_if_content(&mut self) {
        if !self.out.is_empty() {
            self.end_block();
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUGGESTIONS: &str = "# Gift Ideas\n\n\
## For the hiker\n\n\
1. **Trail camera** for *wildlife* shots\n\
2. A `carabiner` multitool\n\n\
> Keep it under 50 USD.\n\n\
---\n";

    #[test]
    fn html_formats_common_markdown() {
        let rendered = render_html(SUGGESTIONS);
        assert!(rendered.contains("<h1>Gift Ideas</h1>"));
        assert!(rendered.contains("<h2>For the hiker</h2>"));
        assert!(rendered.contains("<ol>"));
        assert!(rendered.contains("<strong>Trail camera</strong>"));
        assert!(rendered.contains("<em>wildlife</em>"));
        assert!(rendered.contains("<code>carabiner</code>"));
        assert!(rendered.contains("<blockquote>"));
        assert!(rendered.contains("<hr />"));
    }

    #[test]
    fn html_escapes_raw_markup() {
        let rendered = render_html("Try <script>alert(1)</script> this");
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn plain_terminal_headings_and_lists() {
        let rendered = render_terminal("# Gifts\n\n- Socks\n- **Scarf**\n", TerminalStyle::Plain);
        assert_eq!(rendered, "Gifts\n=====\n\n- Socks\n- Scarf");
    }

    #[test]
    fn heading_underline_matches_visible_text() {
        let rendered = render_terminal("> # Title\n", TerminalStyle::Plain);
        assert_eq!(rendered, "│ Title\n│ =====");

        let rendered = render_terminal("## A `mug`\n", TerminalStyle::Plain);
        assert_eq!(rendered, "A `mug`\n-------");

        let rendered = render_terminal("# A *b* c\n", TerminalStyle::Ansi);
        assert_eq!(rendered.lines().nth(1), Some("====="));
    }

    #[test]
    fn plain_terminal_numbered_list_and_quote() {
        let rendered = render_terminal(
            "1. Mug\n2. Beans\n\n> Think `local`\n",
            TerminalStyle::Plain,
        );
        assert_eq!(rendered, "1. Mug\n2. Beans\n\n│ Think `local`");
    }

    #[test]
    fn plain_terminal_nested_list_indents() {
        let rendered = render_terminal("- Books\n  - Fiction\n", TerminalStyle::Plain);
        assert_eq!(rendered, "- Books\n  - Fiction");
    }

    #[test]
    fn plain_terminal_loose_list_keeps_marker_on_text_line() {
        let rendered = render_terminal("- Socks\n\n- Scarf\n", TerminalStyle::Plain);
        assert_eq!(rendered, "- Socks\n- Scarf");
    }

    #[test]
    fn ansi_terminal_wraps_emphasis() {
        let rendered = render_terminal("a **bold** pick", TerminalStyle::Ansi);
        assert_eq!(rendered, "a \x1b[1mbold\x1b[0m pick");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_terminal("", TerminalStyle::Plain), "");
        assert_eq!(render_html(""), "");
    }
}
