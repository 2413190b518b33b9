//! Derived view engine
//!
//! Pure functions over the in-memory record collection: the filtered subset
//! the UI renders and the aggregate statistics shown in the dashboard's stat
//! row. No I/O, no mutation of inputs, and a valid (possibly all-zero)
//! result for an empty collection.

use markt_common::model::{FieldSet, Kategorie, Record};
use serde::Serialize;
use std::collections::HashSet;

/// Category filter state of the dashboard's chip row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KategorieFilter {
    /// "Alle" — no category restriction
    #[default]
    Alle,
    /// Only records of one category
    Nur(Kategorie),
}

impl KategorieFilter {
    fn admits(&self, kategorie: Option<Kategorie>) -> bool {
        match self {
            KategorieFilter::Alle => true,
            KategorieFilter::Nur(wanted) => kategorie == Some(*wanted),
        }
    }
}

impl From<Option<Kategorie>> for KategorieFilter {
    fn from(value: Option<Kategorie>) -> Self {
        match value {
            Some(k) => KategorieFilter::Nur(k),
            None => KategorieFilter::Alle,
        }
    }
}

/// Compute the visible subset of records for the dashboard grid
///
/// A record is visible when its category passes the filter AND the query
/// matches one of `artikelname`, `marke`, `ort`, `beschreibung`
/// (case-insensitive substring, absent fields treated as empty). An empty
/// query matches everything. Input order is preserved.
pub fn visible_records<'a>(
    all: &'a [Record],
    query: &str,
    filter: KategorieFilter,
) -> Vec<&'a Record> {
    let query = query.to_lowercase();
    all.iter()
        .filter(|r| filter.admits(r.fields.kategorie) && matches_query(&r.fields, &query))
        .collect()
}

/// Search-field match against the dashboard's four searchable fields
///
/// `query` must already be lowercased.
fn matches_query(fields: &FieldSet, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    [
        &fields.artikelname,
        &fields.marke,
        &fields.ort,
        &fields.beschreibung,
    ]
    .into_iter()
    .any(|f| f.as_deref().unwrap_or("").to_lowercase().contains(query))
}

/// Compute the visible subset for the table page's broader search
///
/// Unlike [`visible_records`], the table page matches against every field
/// value, numbers and enum spellings included. No category filter.
pub fn search_records<'a>(all: &'a [Record], query: &str) -> Vec<&'a Record> {
    let query = query.to_lowercase();
    all.iter()
        .filter(|r| matches_any_field(&r.fields, &query))
        .collect()
}

/// True when the lowercased query is a substring of any field value
///
/// Enum fields match on their wire spellings, numeric fields on their plain
/// decimal rendering. An empty query matches.
fn matches_any_field(fields: &FieldSet, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let text_fields = [
        &fields.artikelname,
        &fields.beschreibung,
        &fields.groesse,
        &fields.marke,
        &fields.farbe,
        &fields.foto_1,
        &fields.foto_2,
        &fields.foto_3,
        &fields.foto_4,
        &fields.vorname,
        &fields.nachname,
        &fields.email,
        &fields.telefon,
        &fields.ort,
    ];
    if text_fields
        .into_iter()
        .any(|f| f.as_deref().unwrap_or("").to_lowercase().contains(query))
    {
        return true;
    }
    if let Some(preis) = fields.preis {
        if preis.to_string().contains(query) {
            return true;
        }
    }
    if let Some(zustand) = fields.zustand {
        if zustand.as_str().contains(query) {
            return true;
        }
    }
    if let Some(kategorie) = fields.kategorie {
        if kategorie.as_str().contains(query) {
            return true;
        }
    }
    false
}

/// Aggregate statistics over the full record collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    /// Count of all records
    pub total: usize,
    /// Arithmetic mean of `preis` over records with a price; 0 when none has one
    pub avg_price: f64,
    /// Records in one of the two "new" conditions
    pub neu_count: usize,
    /// Distinct categories in use
    pub kategorie_count: usize,
}

/// Compute dashboard statistics
///
/// Records without a price are excluded from both sum and divisor of the
/// average. Deterministic for any iteration order.
pub fn compute_stats(all: &[Record]) -> Stats {
    let total = all.len();

    let prices: Vec<f64> = all.iter().filter_map(|r| r.fields.preis).collect();
    let avg_price = if prices.is_empty() {
        0.0
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    };

    let neu_count = all
        .iter()
        .filter(|r| r.fields.zustand.is_some_and(|z| z.is_neu()))
        .count();

    let kategorie_count = all
        .iter()
        .filter_map(|r| r.fields.kategorie)
        .collect::<HashSet<_>>()
        .len();

    Stats {
        total,
        avg_price,
        neu_count,
        kategorie_count,
    }
}
