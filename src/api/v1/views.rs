/*
 * Responsibility
 * - 表示専用の adapter: render 済みの view-model を HTML にするだけ
 * - escape は ramhorns の {{ }} に任せる (server 由来の文字列もそのまま渡す)
 */
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use ramhorns::Template;

use crate::services::payload::SchemaVariant;
use crate::services::render::{BlogCard, FetchView, NO_ENTRIES, ResultsView, StatusMessage};

const CONSOLE_TEMPLATE: &str = include_str!("../../../templates/console.html");

// RFC 3986 unreserved characters stay as-is inside the `{blog_id}` segment.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(ramhorns::Content)]
struct ConsolePage<'a> {
    api_base: &'a str,
    schema: &'a str,
    content_field: &'a str,
    nested: bool,
    register_status: Option<StatusLine<'a>>,
    fetch_status: Option<StatusLine<'a>>,
    results: Option<ResultsSection<'a>>,
}

#[derive(ramhorns::Content)]
struct StatusLine<'a> {
    color: &'a str,
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct ResultsSection<'a> {
    empty: bool,
    no_entries: &'a str,
    has_notice: bool,
    notice: &'a str,
    has_error: bool,
    error: &'a str,
    entries: Vec<CardItem<'a>>,
}

#[derive(ramhorns::Content)]
struct CardItem<'a> {
    href: String,
    id: &'a str,
    title: &'a str,
    category: &'a str,
    state: &'a str,
    published: &'a str,
    created: &'a str,
    keywords: &'a str,
}

impl<'a> From<&'a StatusMessage> for StatusLine<'a> {
    fn from(status: &'a StatusMessage) -> Self {
        StatusLine {
            color: status.tone.color(),
            text: &status.text,
        }
    }
}

impl<'a> From<&'a BlogCard> for CardItem<'a> {
    fn from(card: &'a BlogCard) -> Self {
        CardItem {
            href: format!("/api/v1/blogs/{}", utf8_percent_encode(&card.id, ID_SEGMENT)),
            id: &card.id,
            title: &card.title,
            category: &card.category,
            state: &card.state,
            published: &card.published,
            created: &card.created,
            keywords: &card.keywords,
        }
    }
}

impl<'a> From<&'a ResultsView> for ResultsSection<'a> {
    fn from(view: &'a ResultsView) -> Self {
        let mut section = ResultsSection {
            empty: false,
            no_entries: NO_ENTRIES,
            has_notice: false,
            notice: "",
            has_error: false,
            error: "",
            entries: vec![],
        };
        match view {
            ResultsView::Entries(cards) => {
                section.entries = cards.iter().map(CardItem::from).collect()
            }
            ResultsView::Empty => section.empty = true,
            ResultsView::NotFound(notice) => {
                section.has_notice = true;
                section.notice = notice;
            }
            ResultsView::Error(error) => {
                section.has_error = true;
                section.error = error;
            }
        }
        section
    }
}

/// Everything one page render needs. `fetch` is `None` until the user asks
/// for the list; the fetch status line still shows the last known state.
pub struct PageContext<'a> {
    pub api_base: &'a str,
    pub schema: SchemaVariant,
    pub register_status: Option<&'a StatusMessage>,
    pub fetch_status: Option<&'a StatusMessage>,
    pub fetch: Option<&'a FetchView>,
}

pub struct Views {
    console: Template<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ramhorns::Error> {
        Ok(Self {
            console: Template::new(CONSOLE_TEMPLATE)?,
        })
    }

    pub fn console_page(&self, ctx: PageContext<'_>) -> String {
        let fetch_status = ctx
            .fetch
            .map(|f| &f.status)
            .or(ctx.fetch_status)
            .map(StatusLine::from);

        self.console.render(&ConsolePage {
            api_base: ctx.api_base,
            schema: ctx.schema.as_str(),
            content_field: ctx.schema.content_field(),
            nested: ctx.schema == SchemaVariant::Nested,
            register_status: ctx.register_status.map(StatusLine::from),
            fetch_status,
            results: ctx.fetch.map(|f| ResultsSection::from(&f.results)),
        })
    }
}
