//! Terminal transcript output.

use std::fmt::Write;

use querydesk_session::Role;

use crate::tree::{Block, DisplayTree, ExchangeView, TableView};

/// Render the whole tree as plain text.
pub fn to_plain_text(tree: &DisplayTree) -> String {
    let mut out = String::new();
    for exchange in &tree.exchanges {
        push_exchange(&mut out, exchange);
    }
    out
}

/// Render a single exchange, for incremental output.
pub fn exchange_to_plain_text(exchange: &ExchangeView) -> String {
    let mut out = String::new();
    push_exchange(&mut out, exchange);
    out
}

fn push_exchange(out: &mut String, exchange: &ExchangeView) {
    let who = match exchange.role {
        Role::User => "you",
        Role::Bot => "bot",
    };
    let _ = writeln!(out, "[{}] {who}", exchange.id);
    for block in &exchange.blocks {
        match block {
            Block::Text(text) => push_indented(out, text),
            Block::Label(label) => {
                let _ = writeln!(out, "  {label}");
            }
            Block::RichText { source, .. } => push_indented(out, source),
            Block::CodeBlock { language, code } => {
                let _ = writeln!(out, "  ```{language}");
                push_indented(out, code);
                out.push_str("  ```\n");
            }
            Block::Table(table) => push_table(out, table),
            Block::ErrorNotice { message } => {
                let _ = writeln!(out, "  ! {message}");
            }
        }
    }
    out.push('\n');
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "  {line}");
    }
}

fn push_table(out: &mut String, table: &TableView) {
    let mut widths: Vec<usize> = table.header.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = {
        let mut rule = String::from("  +");
        for width in &widths {
            rule.push_str(&"-".repeat(width + 2));
            rule.push('+');
        }
        rule.push('\n');
        rule
    };

    out.push_str(&rule);
    push_row(out, &table.header, &widths);
    out.push_str(&rule);
    for row in &table.rows {
        push_row(out, row, &widths);
    }
    if !table.rows.is_empty() {
        out.push_str(&rule);
    }
    let _ = writeln!(
        out,
        "  ({} row{})",
        table.rows.len(),
        if table.rows.len() == 1 { "" } else { "s" }
    );
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push_str("  |");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        let _ = write!(out, " {cell}{} |", " ".repeat(pad));
    }
    out.push('\n');
}
