//! Page assembly on top of the tag stream.

use crate::config::MAIN_NAMESPACE;
use crate::error::Result;
use crate::models::{PageType, WikiPage};
use crate::parser::{DumpHandler, DumpParser, DumpSource, ElementContext};
use crate::phrase::LINK_REGEX;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default)]
struct PartialPage {
    id: Option<u32>,
    title: Option<String>,
    ns: Option<i32>,
    redirect: bool,
    text: Option<String>,
}

/// Builds [`WikiPage`]s from `<page>` elements, one at a time.
#[derive(Debug, Default)]
pub struct PageBuilder {
    current: Option<PartialPage>,
    ready: Option<WikiPage>,
    skipped: u64,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the most recently completed page, if any.
    pub fn take_page(&mut self) -> Option<WikiPage> {
        self.ready.take()
    }

    /// Pages dropped for lacking a title or a numeric id.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn finish(&mut self, page: PartialPage) {
        let (Some(id), Some(title)) = (page.id, page.title) else {
            debug!("Skipping page without id or title");
            self.skipped += 1;
            return;
        };
        let ns = page.ns.unwrap_or(MAIN_NAMESPACE);

        let page_type = if page.redirect {
            let target = page
                .text
                .as_deref()
                .and_then(|text| LINK_REGEX.captures(text))
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_default();
            PageType::Redirect(target)
        } else if ns != MAIN_NAMESPACE {
            PageType::Special
        } else {
            PageType::Entry
        };

        self.ready = Some(WikiPage {
            id,
            title,
            ns,
            page_type,
            text: page.text,
        });
    }
}

impl DumpHandler for PageBuilder {
    fn on_element_start(&mut self, tag: &str, _context: &ElementContext) {
        match tag {
            "page" => self.current = Some(PartialPage::default()),
            "redirect" => {
                if let Some(page) = self.current.as_mut() {
                    page.redirect = true;
                }
            }
            _ => {}
        }
    }

    fn on_element_end(&mut self, tag: &str, context: &ElementContext) {
        if tag == "page" {
            if let Some(page) = self.current.take() {
                self.finish(page);
            }
            return;
        }

        let Some(page) = self.current.as_mut() else {
            return;
        };
        let in_page = context.parent() == Some("page");
        match tag {
            "title" if in_page => page.title = Some(context.contents().to_string()),
            "ns" if in_page => page.ns = context.contents().trim().parse().ok(),
            // <revision> and <contributor> carry ids of their own
            "id" if in_page => page.id = context.contents().trim().parse().ok(),
            "text" => page.text = Some(context.contents().to_string()),
            _ => {}
        }
    }
}

/// Lazy iterator over the pages of a dump.
pub struct WikiReader {
    parser: DumpParser<PageBuilder>,
}

impl WikiReader {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_source(DumpSource::open(path)?))
    }

    pub fn from_source(source: DumpSource) -> Self {
        Self {
            parser: DumpParser::new(source, PageBuilder::new()),
        }
    }

    pub fn skipped(&self) -> u64 {
        self.parser.handler().skipped()
    }
}

impl Iterator for WikiReader {
    type Item = Result<WikiPage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(page) = self.parser.handler_mut().take_page() {
                return Some(Ok(page));
            }
            match self.parser.advance() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
