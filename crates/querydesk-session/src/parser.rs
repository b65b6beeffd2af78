//! Backend reply normalization.
//!
//! A single content-kind dispatch decides the shape: `text/*` replies are
//! wrapped verbatim, everything else must decode to
//! `{query, table: {columns, rows}, answer}`. Any structural violation is a
//! `MalformedResponse` for the whole reply.

use serde::Deserialize;
use serde_json::Value;

use crate::result::{Cell, ExchangeError, RenderableResult, StructuredResult, Table};
use crate::{ContentKind, RawReply};

#[derive(Deserialize)]
struct WireResult {
    query: String,
    table: WireTable,
    answer: String,
}

#[derive(Deserialize)]
struct WireTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Parse a raw reply. Pure: the same input always yields an equal result.
pub fn parse(raw: &RawReply) -> Result<RenderableResult, ExchangeError> {
    match raw.content_kind {
        ContentKind::PlainText => Ok(RenderableResult::PlainText(
            String::from_utf8_lossy(&raw.body).into_owned(),
        )),
        ContentKind::Json => parse_structured(&raw.body).map(RenderableResult::Structured),
    }
}

/// Decode and validate a structured reply body.
pub fn parse_structured(body: &[u8]) -> Result<StructuredResult, ExchangeError> {
    let wire: WireResult = serde_json::from_slice(body)
        .map_err(|e| ExchangeError::malformed(format!("invalid result payload: {e}")))?;

    let rows = wire
        .table
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(Cell::from).collect())
        .collect();
    let table = Table::new(wire.table.columns, rows)?;

    Ok(StructuredResult {
        query: wire.query,
        table,
        answer: wire.answer,
    })
}
