//! Default markdown renderer backed by pulldown-cmark

use crate::core::context::RenderOptions;
use crate::data::constants::IMAGE_EMBED;
use crate::features::images::embed_to_img_tag;
use crate::utils::error::GridResult;
use crate::utils::host::MarkdownRenderer;
use pulldown_cmark::utils::TextMergeStream;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// CommonMark extensions enabled for cells and documents
pub fn cmark_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Renders cell markdown with pulldown-cmark
#[derive(Debug, Clone)]
pub struct PulldownRenderer {
    expand_embeds: bool,
}

impl PulldownRenderer {
    pub fn new() -> Self {
        PulldownRenderer {
            expand_embeds: true,
        }
    }

    pub fn from_options(options: &RenderOptions) -> Self {
        PulldownRenderer {
            expand_embeds: options.expand_embeds,
        }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str, source_path: &str) -> GridResult<String> {
        let parser = TextMergeStream::new(Parser::new_ext(markdown, cmark_options()));
        let events = EmbedExpander::new(source_path, self.expand_embeds).expand(parser);

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }
}

/// Replaces `![[...]]` in text events (outside code blocks) with `<img>`
/// HTML events
pub(crate) struct EmbedExpander<'p> {
    source_path: &'p str,
    enabled: bool,
    in_code_block: bool,
}

impl<'p> EmbedExpander<'p> {
    pub(crate) fn new(source_path: &'p str, enabled: bool) -> Self {
        EmbedExpander {
            source_path,
            enabled,
            in_code_block: false,
        }
    }

    pub(crate) fn expand<'a>(
        mut self,
        events: impl Iterator<Item = Event<'a>>,
    ) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        for event in events {
            self.push(event, &mut out);
        }
        out
    }

    /// Process one event into `out`
    pub(crate) fn push<'a>(&mut self, event: Event<'a>, out: &mut Vec<Event<'a>>) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                self.in_code_block = true;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                out.push(event);
            }
            Event::Text(text)
                if self.enabled && !self.in_code_block && IMAGE_EMBED.is_match(&text) =>
            {
                self.split_text(&text, out);
            }
            other => out.push(other),
        }
    }

    fn split_text<'a>(&self, text: &str, out: &mut Vec<Event<'a>>) {
        let mut last = 0;
        for caps in IMAGE_EMBED.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                let before = text[last..whole.start()].to_string();
                out.push(Event::Text(CowStr::from(before)));
            }
            out.push(Event::InlineHtml(CowStr::from(embed_to_img_tag(
                &caps[1],
                self.source_path,
            ))));
            last = whole.end();
        }
        if last < text.len() {
            out.push(Event::Text(CowStr::from(text[last..].to_string())));
        }
    }
}
