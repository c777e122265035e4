//! Entity identifiers for Wikibase.
//!
//! An entity identifier is a letter prefix followed by a decimal serial
//! number, e.g. `Q42` (an item) or `P31` (a property). The same identifier
//! also appears as the last path segment of a concept URI such as
//! `http://www.wikidata.org/entity/Q42`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdError;

/// Kind of entity named by an identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Item,
    Property,
    Lexeme,
    MediaInfo,
    EntitySchema,
}

impl EntityType {
    /// Returns the entity type for an identifier prefix (case-insensitive).
    pub fn from_prefix(prefix: &str) -> Option<EntityType> {
        match prefix.to_ascii_uppercase().as_str() {
            "Q" => Some(EntityType::Item),
            "P" => Some(EntityType::Property),
            "L" => Some(EntityType::Lexeme),
            "M" => Some(EntityType::MediaInfo),
            "E" => Some(EntityType::EntitySchema),
            _ => None,
        }
    }

    /// Creates an EntityType from its wire name (the `entity-type` field).
    pub fn from_name(name: &str) -> Option<EntityType> {
        match name {
            "item" => Some(EntityType::Item),
            "property" => Some(EntityType::Property),
            "lexeme" => Some(EntityType::Lexeme),
            "mediainfo" => Some(EntityType::MediaInfo),
            "entity-schema" => Some(EntityType::EntitySchema),
            _ => None,
        }
    }

    /// Returns the wire name of this entity type.
    pub fn name(self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
            EntityType::Lexeme => "lexeme",
            EntityType::MediaInfo => "mediainfo",
            EntityType::EntitySchema => "entity-schema",
        }
    }

    /// Returns the canonical identifier prefix for this entity type.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityType::Item => "Q",
            EntityType::Property => "P",
            EntityType::Lexeme => "L",
            EntityType::MediaInfo => "M",
            EntityType::EntitySchema => "E",
        }
    }
}

/// An entity identifier such as `Q42`.
///
/// The prefixed form is the canonical round-trip string: parsing it and
/// formatting the result yields the same text. Serial numbers with leading
/// zeros are rejected so that this holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: String,
    serial: u64,
    prefixed_id: String,
}

impl EntityId {
    /// Parses an identifier of the form `<letters><digits>`.
    pub fn parse(s: &str) -> Result<EntityId, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
            .map_or(s.len(), |(i, _)| i);
        let (prefix, rest) = s.split_at(split);

        if prefix.is_empty() {
            return match rest.chars().next() {
                Some(c) if c.is_ascii_digit() => Err(IdError::MissingPrefix),
                Some(c) => Err(IdError::InvalidChar { char: c }),
                None => Err(IdError::Empty),
            };
        }
        if rest.is_empty() {
            return Err(IdError::MissingSerial);
        }
        if let Some(c) = rest.chars().find(|c| !c.is_ascii_digit()) {
            return Err(IdError::InvalidChar { char: c });
        }
        if rest.starts_with('0') {
            return Err(IdError::LeadingZero);
        }

        let serial = rest.parse::<u64>().map_err(|_| IdError::SerialOverflow)?;
        Ok(EntityId {
            prefix: prefix.to_string(),
            serial,
            prefixed_id: s.to_string(),
        })
    }

    /// Parses the identifier from the last `/`-separated segment of `s`.
    ///
    /// No URI validation is done: `http://www.wikidata.org/entity/Q42`,
    /// `entity/Q42` and `Q42` all yield `Q42`.
    pub fn from_uri(s: &str) -> Result<EntityId, IdError> {
        EntityId::parse(last_path_segment(s))
    }

    /// Builds an identifier from a prefix and serial number.
    pub fn from_parts(prefix: &str, serial: u64) -> Result<EntityId, IdError> {
        if prefix.is_empty() {
            return Err(IdError::MissingPrefix);
        }
        if let Some(c) = prefix.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(IdError::InvalidChar { char: c });
        }
        if serial == 0 {
            return Err(IdError::LeadingZero);
        }
        Ok(EntityId {
            prefix: prefix.to_string(),
            serial,
            prefixed_id: format!("{prefix}{serial}"),
        })
    }

    /// Returns the letter prefix (e.g. `Q`).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the serial number (e.g. `42` for `Q42`).
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Returns the canonical prefixed form (e.g. `Q42`).
    pub fn prefixed_id(&self) -> &str {
        &self.prefixed_id
    }

    /// Returns the entity type implied by the prefix, if it is a known one.
    pub fn entity_type(&self) -> Option<EntityType> {
        EntityType::from_prefix(&self.prefix)
    }
}

/// Returns the text after the last `/` (the whole string if there is none).
pub fn last_path_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefixed_id)
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse(s)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.prefixed_id)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EntityId::parse(&s).map_err(serde::de::Error::custom)
    }
}
