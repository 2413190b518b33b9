//! Field merge engine
//!
//! Combines user-entered form fields with fields extracted from a photo
//! scan. The scan is asynchronous, so the user may have typed into the form
//! by the time it completes; merging must never clobber what they entered,
//! only fill gaps. Deliberately the inverse of a last-writer-wins policy.
//!
//! The merge is an explicit typed pass over the enumerated field list, so
//! every field's presence rule is checked — not just whichever keys the
//! extraction service happened to return.

use markt_common::model::FieldSet;

/// Merge extracted fields into an existing field set, fill-empty-only
///
/// For each field: the extracted value lands only where the existing value
/// is unset (`None`, or the empty string for text fields); otherwise the
/// existing value is preserved, including "already empty" when the
/// extraction has nothing to offer. Numeric fields follow the same presence
/// rule — `0` is a real value, only `None` is unset.
///
/// Pure function: no side effects, no error conditions. A partial or empty
/// extraction is "no information", not a failure.
pub fn merge(existing: &FieldSet, extracted: &FieldSet) -> FieldSet {
    FieldSet {
        artikelname: fill_text(&existing.artikelname, &extracted.artikelname),
        beschreibung: fill_text(&existing.beschreibung, &extracted.beschreibung),
        preis: fill(&existing.preis, &extracted.preis),
        zustand: fill(&existing.zustand, &extracted.zustand),
        kategorie: fill(&existing.kategorie, &extracted.kategorie),
        groesse: fill_text(&existing.groesse, &extracted.groesse),
        marke: fill_text(&existing.marke, &extracted.marke),
        farbe: fill_text(&existing.farbe, &extracted.farbe),
        foto_1: fill_text(&existing.foto_1, &extracted.foto_1),
        foto_2: fill_text(&existing.foto_2, &extracted.foto_2),
        foto_3: fill_text(&existing.foto_3, &extracted.foto_3),
        foto_4: fill_text(&existing.foto_4, &extracted.foto_4),
        vorname: fill_text(&existing.vorname, &extracted.vorname),
        nachname: fill_text(&existing.nachname, &extracted.nachname),
        email: fill_text(&existing.email, &extracted.email),
        telefon: fill_text(&existing.telefon, &extracted.telefon),
        ort: fill_text(&existing.ort, &extracted.ort),
    }
}

/// Presence-only fill: `Some` is present regardless of value
fn fill<T: Clone>(existing: &Option<T>, extracted: &Option<T>) -> Option<T> {
    match existing {
        Some(_) => existing.clone(),
        None => extracted.clone(),
    }
}

/// Text fill: the empty string also counts as unset for overwrite purposes
fn fill_text(existing: &Option<String>, extracted: &Option<String>) -> Option<String> {
    match existing.as_deref() {
        Some(v) if !v.is_empty() => existing.clone(),
        _ => extracted.clone().or_else(|| existing.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markt_common::model::{Kategorie, Zustand};

    fn typed() -> FieldSet {
        FieldSet {
            artikelname: Some("Lederjacke".to_string()),
            preis: Some(45.0),
            zustand: Some(Zustand::SehrGut),
            ..Default::default()
        }
    }

    #[test]
    fn test_never_overwrites_existing_values() {
        let extracted = FieldSet {
            artikelname: Some("Jacke, braun".to_string()),
            preis: Some(30.0),
            zustand: Some(Zustand::Gut),
            ..Default::default()
        };
        let merged = merge(&typed(), &extracted);
        assert_eq!(merged.artikelname.as_deref(), Some("Lederjacke"));
        assert_eq!(merged.preis, Some(45.0));
        assert_eq!(merged.zustand, Some(Zustand::SehrGut));
    }

    #[test]
    fn test_fills_gaps() {
        let extracted = FieldSet {
            marke: Some("Zara".to_string()),
            kategorie: Some(Kategorie::Damenkleidung),
            groesse: Some("M".to_string()),
            ..Default::default()
        };
        let merged = merge(&typed(), &extracted);
        assert_eq!(merged.marke.as_deref(), Some("Zara"));
        assert_eq!(merged.kategorie, Some(Kategorie::Damenkleidung));
        assert_eq!(merged.groesse.as_deref(), Some("M"));
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let existing = FieldSet {
            marke: Some(String::new()),
            ..Default::default()
        };
        let extracted = FieldSet {
            marke: Some("Nike".to_string()),
            ..Default::default()
        };
        let merged = merge(&existing, &extracted);
        assert_eq!(merged.marke.as_deref(), Some("Nike"));
    }

    #[test]
    fn test_preserves_already_empty_when_extraction_has_nothing() {
        let existing = FieldSet {
            marke: Some(String::new()),
            ..Default::default()
        };
        let merged = merge(&existing, &FieldSet::default());
        assert_eq!(merged.marke.as_deref(), Some(""));
    }

    #[test]
    fn test_zero_price_is_present() {
        let existing = FieldSet {
            preis: Some(0.0),
            ..Default::default()
        };
        let extracted = FieldSet {
            preis: Some(25.0),
            ..Default::default()
        };
        let merged = merge(&existing, &extracted);
        assert_eq!(merged.preis, Some(0.0));
    }

    #[test]
    fn test_idempotent_on_empty_extraction() {
        let existing = typed();
        let merged = merge(&existing, &FieldSet::default());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_empty_existing_takes_full_extraction() {
        let extracted = FieldSet {
            artikelname: Some("Sneaker".to_string()),
            kategorie: Some(Kategorie::Schuhe),
            preis: Some(0.0),
            ..Default::default()
        };
        let merged = merge(&FieldSet::default(), &extracted);
        assert_eq!(merged, extracted);
    }
}
