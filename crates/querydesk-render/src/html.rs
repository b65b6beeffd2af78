//! Standalone HTML page output.

use std::fmt::Write;

use pulldown_cmark::escape::escape_html;
use querydesk_session::Role;

use crate::tree::{Block, DisplayTree, TableView};

const STYLE: &str = "\
body{font-family:sans-serif;max-width:960px;margin:2em auto;padding:0 1em}\
.exchange{margin:1em 0;padding:.75em 1em;border-radius:6px}\
.user{background:#eef3fb}.bot{background:#f6f6f6}\
.label{font-weight:bold;margin:.5em 0 .25em}\
pre{background:#272822;color:#f8f8f2;padding:.75em;overflow-x:auto}\
table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:.25em .5em;text-align:left}\
.error-notice{color:#8a1f11;background:#fbe3e4;border:1px solid #e8a0a0;padding:.5em}";

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

/// Render the tree as a complete HTML document.
pub fn to_html_page(tree: &DisplayTree) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>QueryDesk transcript</title>\n");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n");

    for exchange in &tree.exchanges {
        let class = match exchange.role {
            Role::User => "user",
            Role::Bot => "bot",
        };
        let _ = writeln!(
            out,
            "<div class=\"exchange {class}\" id=\"exchange-{}\">",
            exchange.id.get()
        );
        for block in &exchange.blocks {
            push_block(&mut out, block);
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Text(text) => {
            let _ = writeln!(out, "<p>{}</p>", escape(text));
        }
        Block::Label(label) => {
            let _ = writeln!(out, "<div class=\"label\">{}</div>", escape(label));
        }
        Block::RichText { html, .. } => {
            out.push_str("<div class=\"rich-text\">\n");
            out.push_str(html);
            out.push_str("</div>\n");
        }
        Block::CodeBlock { language, code } => {
            let _ = writeln!(
                out,
                "<pre><code class=\"language-{language}\">{}</code></pre>",
                escape(code)
            );
        }
        Block::Table(table) => push_table(out, table),
        Block::ErrorNotice { message } => {
            let _ = writeln!(
                out,
                "<div class=\"error-notice\" role=\"alert\">{}</div>",
                escape(message)
            );
        }
    }
}

fn push_table(out: &mut String, table: &TableView) {
    out.push_str("<table>\n<thead><tr>");
    for column in &table.header {
        let _ = write!(out, "<th>{}</th>", escape(column));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}
