//! Listing record model
//!
//! A `Record` is one persisted marketplace listing as the records backend
//! returns it: a stable server-assigned identity, creation/update timestamps,
//! and a `FieldSet` of independently-optional listing attributes.
//!
//! Field names and enum value spellings are the wire schema shared with the
//! records backend and the photo extraction service — they must not be
//! renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition of an item ("Zustand")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zustand {
    Gut,
    Zufriedenstellend,
    NeuMitEtikett,
    NeuOhneEtikett,
    SehrGut,
}

impl Zustand {
    /// All conditions in display order (form select order)
    pub const ALL: [Zustand; 5] = [
        Zustand::Gut,
        Zustand::Zufriedenstellend,
        Zustand::NeuMitEtikett,
        Zustand::NeuOhneEtikett,
        Zustand::SehrGut,
    ];

    /// Wire spelling, as exchanged with the records backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Zustand::Gut => "gut",
            Zustand::Zufriedenstellend => "zufriedenstellend",
            Zustand::NeuMitEtikett => "neu_mit_etikett",
            Zustand::NeuOhneEtikett => "neu_ohne_etikett",
            Zustand::SehrGut => "sehr_gut",
        }
    }

    /// German display label
    pub fn label(&self) -> &'static str {
        match self {
            Zustand::Gut => "Gut",
            Zustand::Zufriedenstellend => "Zufriedenstellend",
            Zustand::NeuMitEtikett => "Neu mit Etikett",
            Zustand::NeuOhneEtikett => "Neu ohne Etikett",
            Zustand::SehrGut => "Sehr gut",
        }
    }

    /// True for the two "new" conditions (with/without tag)
    pub fn is_neu(&self) -> bool {
        matches!(self, Zustand::NeuMitEtikett | Zustand::NeuOhneEtikett)
    }
}

/// Category of an item ("Kategorie")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kategorie {
    Damenkleidung,
    Herrenkleidung,
    Kinderkleidung,
    Schuhe,
    Accessoires,
    Taschen,
    Schmuck,
    Sonstiges,
}

impl Kategorie {
    /// All categories in display order (filter chip row order)
    pub const ALL: [Kategorie; 8] = [
        Kategorie::Damenkleidung,
        Kategorie::Herrenkleidung,
        Kategorie::Kinderkleidung,
        Kategorie::Schuhe,
        Kategorie::Accessoires,
        Kategorie::Taschen,
        Kategorie::Schmuck,
        Kategorie::Sonstiges,
    ];

    /// Wire spelling, as exchanged with the records backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Kategorie::Damenkleidung => "damenkleidung",
            Kategorie::Herrenkleidung => "herrenkleidung",
            Kategorie::Kinderkleidung => "kinderkleidung",
            Kategorie::Schuhe => "schuhe",
            Kategorie::Accessoires => "accessoires",
            Kategorie::Taschen => "taschen",
            Kategorie::Schmuck => "schmuck",
            Kategorie::Sonstiges => "sonstiges",
        }
    }

    /// German display label
    pub fn label(&self) -> &'static str {
        match self {
            Kategorie::Damenkleidung => "Damenkleidung",
            Kategorie::Herrenkleidung => "Herrenkleidung",
            Kategorie::Kinderkleidung => "Kinderkleidung",
            Kategorie::Schuhe => "Schuhe",
            Kategorie::Accessoires => "Accessoires",
            Kategorie::Taschen => "Taschen",
            Kategorie::Schmuck => "Schmuck",
            Kategorie::Sonstiges => "Sonstiges",
        }
    }
}

/// Named, independently-optional attributes of one listing
///
/// Absent (`None`) and empty string both render as "unset" in presentation.
/// Serialization skips absent fields so partial field sets stay partial on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artikelname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beschreibung: Option<String>,
    /// Price in EUR. Non-negative expected, not enforced here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preis: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zustand: Option<Zustand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kategorie: Option<Kategorie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groesse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farbe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vorname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nachname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ort: Option<String>,
}

impl FieldSet {
    /// First non-empty photo reference, used as the list-display photo
    pub fn primary_photo(&self) -> Option<&str> {
        self.photos().into_iter().next()
    }

    /// All non-empty photo references in slot order
    pub fn photos(&self) -> Vec<&str> {
        [&self.foto_1, &self.foto_2, &self.foto_3, &self.foto_4]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.is_empty())
            .collect()
    }

    /// Seller display name: first and last name joined with a space
    pub fn seller_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.vorname, &self.nachname]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// One persisted marketplace listing
///
/// Identity and timestamps are assigned by the records backend: `record_id`
/// on creation (immutable thereafter), `updated_at` on each mutation. The
/// backend spells the timestamp keys without underscores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: String,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedat", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub fields: FieldSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&Zustand::NeuMitEtikett).unwrap(),
            "\"neu_mit_etikett\""
        );
        assert_eq!(
            serde_json::to_string(&Kategorie::Damenkleidung).unwrap(),
            "\"damenkleidung\""
        );
        let z: Zustand = serde_json::from_str("\"sehr_gut\"").unwrap();
        assert_eq!(z, Zustand::SehrGut);
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(Zustand::NeuOhneEtikett.label(), "Neu ohne Etikett");
        assert_eq!(Zustand::Zufriedenstellend.label(), "Zufriedenstellend");
        assert_eq!(Kategorie::Taschen.label(), "Taschen");
        assert_eq!(Kategorie::Sonstiges.label(), "Sonstiges");
    }

    #[test]
    fn test_is_neu() {
        assert!(Zustand::NeuMitEtikett.is_neu());
        assert!(Zustand::NeuOhneEtikett.is_neu());
        assert!(!Zustand::SehrGut.is_neu());
        assert!(!Zustand::Gut.is_neu());
    }

    #[test]
    fn test_fieldset_skips_absent_fields() {
        let fields = FieldSet {
            artikelname: Some("Lederjacke".to_string()),
            preis: Some(45.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["artikelname"], "Lederjacke");
    }

    #[test]
    fn test_primary_photo_skips_empty_slots() {
        let fields = FieldSet {
            foto_1: Some(String::new()),
            foto_3: Some("https://example.org/a.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.primary_photo(), Some("https://example.org/a.jpg"));
        assert_eq!(fields.photos().len(), 1);
    }

    #[test]
    fn test_primary_photo_none_when_all_unset() {
        assert_eq!(FieldSet::default().primary_photo(), None);
    }

    #[test]
    fn test_seller_name_joins_parts() {
        let both = FieldSet {
            vorname: Some("Anna".to_string()),
            nachname: Some("Schmidt".to_string()),
            ..Default::default()
        };
        assert_eq!(both.seller_name().as_deref(), Some("Anna Schmidt"));

        let first_only = FieldSet {
            vorname: Some("Anna".to_string()),
            ..Default::default()
        };
        assert_eq!(first_only.seller_name().as_deref(), Some("Anna"));

        assert_eq!(FieldSet::default().seller_name(), None);
    }

    #[test]
    fn test_record_deserializes_backend_keys() {
        let json = r#"{
            "record_id": "699c3bc70ed1606ddd89088d",
            "createdat": "2025-11-03T09:15:00Z",
            "updatedat": null,
            "fields": { "artikelname": "Sneaker", "kategorie": "schuhe" }
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_id, "699c3bc70ed1606ddd89088d");
        assert!(record.updated_at.is_none());
        assert_eq!(record.fields.kategorie, Some(Kategorie::Schuhe));
        assert!(record.fields.preis.is_none());
    }
}
