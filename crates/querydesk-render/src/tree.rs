//! Display tree built from a transcript snapshot.

use querydesk_session::{
    Entry, Exchange, ExchangeId, RenderableResult, Role, StructuredResult, Table,
    TranscriptSnapshot,
};

use tracing::trace;

use crate::markdown::to_safe_html;
use crate::{ANSWER_LABEL, QUERY_LABEL, RESULT_LABEL};

/// Rendered transcript, one view per exchange in transcript order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTree {
    pub exchanges: Vec<ExchangeView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeView {
    pub id: ExchangeId,
    pub role: Role,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Verbatim text, never interpreted.
    Text(String),
    /// Section heading inside a structured result.
    Label(&'static str),
    /// Markdown source plus its sanitized HTML.
    RichText { source: String, html: String },
    CodeBlock { language: &'static str, code: String },
    Table(TableView),
    ErrorNotice { message: String },
}

/// Table cells already textualized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&Table> for TableView {
    fn from(table: &Table) -> Self {
        Self {
            header: table.columns().to_vec(),
            rows: table
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_display_string()).collect())
                .collect(),
        }
    }
}

/// Project the whole snapshot. Pure: equal snapshots give equal trees.
pub fn render(snapshot: &TranscriptSnapshot) -> DisplayTree {
    trace!(exchanges = snapshot.len(), "rendering transcript");
    DisplayTree {
        exchanges: snapshot.iter().map(render_exchange).collect(),
    }
}

pub fn render_exchange(exchange: &Exchange) -> ExchangeView {
    let blocks = match exchange.entry() {
        Entry::User(text) => vec![Block::Text(text.clone())],
        Entry::Bot(RenderableResult::PlainText(text)) => vec![rich_text(text)],
        Entry::Bot(RenderableResult::Structured(result)) => structured_blocks(result),
        Entry::BotError(error) => vec![Block::ErrorNotice {
            message: error.message.clone(),
        }],
    };
    ExchangeView {
        id: exchange.id(),
        role: exchange.role(),
        blocks,
    }
}

fn rich_text(source: &str) -> Block {
    Block::RichText {
        source: source.to_string(),
        html: to_safe_html(source),
    }
}

fn structured_blocks(result: &StructuredResult) -> Vec<Block> {
    let mut blocks = vec![
        Block::Label(QUERY_LABEL),
        Block::CodeBlock {
            language: "sql",
            code: result.query.clone(),
        },
        Block::Label(RESULT_LABEL),
        Block::Table(TableView::from(&result.table)),
    ];
    if !result.answer.trim().is_empty() {
        blocks.push(Block::Label(ANSWER_LABEL));
        blocks.push(rich_text(&result.answer));
    }
    blocks
}
