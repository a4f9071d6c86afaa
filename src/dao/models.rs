use std::{fmt, str::FromStr};

use mongodb::bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::schema::{DocumentReader, SchemaError};

/// Game stored in the `games` collection.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct GameEntity {
    /// Primary key of the game.
    pub id: ObjectId,
    /// Display title, never empty.
    #[validate(length(min = 1))]
    pub title: String,
    /// Free-text body.
    pub description: String,
}

impl GameEntity {
    /// Validate a raw `games` document.
    pub fn from_document(document: &Document) -> Result<Self, SchemaError> {
        let reader = DocumentReader::new(document);
        let entity = Self {
            id: reader.object_id("_id")?,
            title: reader.string("title")?,
            description: reader.string("description")?,
        };
        entity.validate()?;
        Ok(entity)
    }
}

/// Fixed reference row of the `experience_levels` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceLevelEntity {
    /// Integer primary key (1..=3 by convention).
    pub id: i64,
    /// Short level name.
    pub level: String,
    /// Display color.
    pub color: String,
    /// Human-readable description.
    pub label: String,
}

impl ExperienceLevelEntity {
    /// Validate a raw `experience_levels` document.
    pub fn from_document(document: &Document) -> Result<Self, SchemaError> {
        let reader = DocumentReader::new(document);
        Ok(Self {
            id: reader.integer("_id")?,
            level: reader.string("level")?,
            color: reader.string("color")?,
            label: reader.string("label")?,
        })
    }
}

/// Tip stored in the `tips` collection.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TipEntity {
    /// Primary key of the tip.
    pub id: ObjectId,
    /// Game the tip belongs to. Not checked against the `games` collection.
    pub game_id: ObjectId,
    /// Experience level the tip targets; only the range is enforced.
    #[validate(range(min = 1, exclusive_max = 4))]
    pub experience_id: i64,
    /// Whether the tip is free of story spoilers.
    pub spoiler_free: bool,
    /// Display title.
    pub title: String,
    /// Free-text body.
    pub description: String,
    /// Like counter, only ever incremented.
    #[validate(range(min = 0))]
    pub likes: i64,
}

impl TipEntity {
    /// Field incremented by the like operation.
    pub const LIKES_FIELD: &'static str = "likes";

    /// Validate a raw `tips` document.
    pub fn from_document(document: &Document) -> Result<Self, SchemaError> {
        let reader = DocumentReader::new(document);
        let entity = Self {
            id: reader.object_id("_id")?,
            game_id: reader.object_id("game_id")?,
            experience_id: reader.integer("experience_id")?,
            spoiler_free: reader.boolean("spoiler_free")?,
            title: reader.string("title")?,
            description: reader.string("description")?,
            likes: reader.integer(Self::LIKES_FIELD)?,
        };
        entity.validate()?;
        Ok(entity)
    }
}

/// Why a tip was reported. Serialized as its human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Reason {
    /// The tip is wrong.
    #[serde(rename = "Incorrect Information")]
    Incorrect,
    /// The tip no longer applies.
    #[serde(rename = "Outdated")]
    Outdated,
    /// The tip has a typo.
    #[serde(rename = "Typo")]
    Typo,
}

impl Reason {
    /// Every reason, in declaration order.
    pub const ALL: [Reason; 3] = [Reason::Incorrect, Reason::Outdated, Reason::Typo];

    /// Stored and displayed label of the reason.
    pub fn label(self) -> &'static str {
        match self {
            Reason::Incorrect => "Incorrect Information",
            Reason::Outdated => "Outdated",
            Reason::Typo => "Typo",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Reason {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.label() == value)
            .ok_or_else(|| SchemaError::UnknownReason(value.to_owned()))
    }
}

/// Report filed against a tip, stored in the `reports` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntity {
    /// Primary key of the report.
    pub id: ObjectId,
    /// Reported tip; it existed when the report was created.
    pub tip_id: ObjectId,
    /// Why the tip was reported.
    pub reason: Reason,
    /// Free-text body.
    pub description: String,
}

impl ReportEntity {
    /// Validate a raw `reports` document.
    pub fn from_document(document: &Document) -> Result<Self, SchemaError> {
        let reader = DocumentReader::new(document);
        Ok(Self {
            id: reader.object_id("_id")?,
            tip_id: reader.object_id("tip_id")?,
            reason: reader.string("reason")?.parse()?,
            description: reader.string("description")?,
        })
    }
}

/// Report content before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReportEntity {
    /// Identifier of the reported tip.
    pub tip_id: ObjectId,
    /// Why the tip was reported.
    pub reason: Reason,
    /// Free-text body.
    pub description: String,
}

impl NewReportEntity {
    /// Document inserted into the `reports` collection; `_id` is left to the store.
    pub fn to_document(&self) -> Document {
        doc! {
            "tip_id": self.tip_id,
            "reason": self.reason.label(),
            "description": self.description.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    fn tip_document(experience_id: i32, likes: i32) -> Document {
        doc! {
            "_id": ObjectId::parse_str("64c3cdfbd54e7b39dc4b1d74").unwrap(),
            "game_id": ObjectId::parse_str("64c3c941d54e7b39dc4b1d6d").unwrap(),
            "experience_id": experience_id,
            "spoiler_free": true,
            "title": "Parry everything",
            "description": "Most bosses can be parried.",
            "likes": likes,
        }
    }

    #[test]
    fn tip_document_is_validated() {
        let tip = TipEntity::from_document(&tip_document(2, 3)).unwrap();
        assert_eq!(tip.id.to_hex(), "64c3cdfbd54e7b39dc4b1d74");
        assert_eq!(tip.game_id.to_hex(), "64c3c941d54e7b39dc4b1d6d");
        assert_eq!(tip.experience_id, 2);
        assert_eq!(tip.likes, 3);
    }

    #[test]
    fn tip_experience_must_be_between_one_and_three() {
        assert!(TipEntity::from_document(&tip_document(1, 0)).is_ok());
        assert!(TipEntity::from_document(&tip_document(3, 0)).is_ok());
        assert!(matches!(
            TipEntity::from_document(&tip_document(0, 0)),
            Err(SchemaError::Constraint(_))
        ));
        assert!(matches!(
            TipEntity::from_document(&tip_document(4, 0)),
            Err(SchemaError::Constraint(_))
        ));
    }

    #[test]
    fn tip_likes_cannot_be_negative() {
        assert!(matches!(
            TipEntity::from_document(&tip_document(1, -1)),
            Err(SchemaError::Constraint(_))
        ));
    }

    #[test]
    fn game_title_must_not_be_empty() {
        let document = doc! { "_id": ObjectId::new(), "title": "", "description": "" };
        assert!(GameEntity::from_document(&document).is_err());

        let document = doc! { "_id": ObjectId::new(), "title": "Elden Ring", "description": "" };
        assert_eq!(
            GameEntity::from_document(&document).unwrap().title,
            "Elden Ring"
        );
    }

    #[test]
    fn experience_level_uses_integer_id() {
        let document = doc! { "_id": 1, "level": "beginner", "color": "#00ff00", "label": "New" };
        let level = ExperienceLevelEntity::from_document(&document).unwrap();
        assert_eq!(level.id, 1);
        assert_eq!(level.label, "New");
    }

    #[test]
    fn reason_labels_round_trip_through_the_table() {
        for reason in Reason::ALL {
            assert_eq!(reason.label().parse::<Reason>().unwrap(), reason);
        }
        assert_eq!(Reason::Incorrect.to_string(), "Incorrect Information");
        assert!("INCORRECT".parse::<Reason>().is_err());
    }

    #[test]
    fn reason_serializes_as_label() {
        let json = serde_json::to_string(&Reason::Incorrect).unwrap();
        assert_eq!(json, "\"Incorrect Information\"");
        let parsed: Reason = serde_json::from_str("\"Typo\"").unwrap();
        assert_eq!(parsed, Reason::Typo);
    }

    #[test]
    fn new_report_stores_label_and_native_tip_id() {
        let tip_id = ObjectId::new();
        let report = NewReportEntity {
            tip_id,
            reason: Reason::Outdated,
            description: "Patched in 1.2".into(),
        };
        let document = report.to_document();
        assert_eq!(document.get("tip_id"), Some(&Bson::ObjectId(tip_id)));
        assert_eq!(
            document.get("reason"),
            Some(&Bson::String("Outdated".into()))
        );
        assert!(document.get("_id").is_none());

        let mut stored = document.clone();
        stored.insert("_id", ObjectId::new());
        let entity = ReportEntity::from_document(&stored).unwrap();
        assert_eq!(entity.reason, Reason::Outdated);
        assert_eq!(entity.tip_id, tip_id);
    }
}
