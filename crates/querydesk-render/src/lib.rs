//! Transcript rendering for QueryDesk.
//!
//! `render` projects a transcript snapshot into a `DisplayTree`; the
//! `html` and `text` backends turn that tree into a standalone HTML page or
//! a terminal transcript. Nothing here touches session state.

pub mod html;
pub mod markdown;
pub mod text;
pub mod tree;

pub use html::to_html_page;
pub use text::{exchange_to_plain_text, to_plain_text};
pub use tree::{render, render_exchange, Block, DisplayTree, ExchangeView, TableView};

pub const QUERY_LABEL: &str = "Query:";
pub const RESULT_LABEL: &str = "Execution Result:";
pub const ANSWER_LABEL: &str = "Answer:";
