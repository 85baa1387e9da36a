//! Catalog entries
//!
//! Skills and perks share one record shape. Which of the two an entry is
//! depends only on the collection it was loaded into, never on its fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Character archetype an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Ranger,
    Rogue,
    Fighter,
    Barbarian,
    Wizard,
    Cleric,
    Bard,
    Warlock,
}

impl CharacterClass {
    /// Every class, in filter-bar order
    pub const ALL: [CharacterClass; 8] = [
        CharacterClass::Ranger,
        CharacterClass::Rogue,
        CharacterClass::Fighter,
        CharacterClass::Barbarian,
        CharacterClass::Wizard,
        CharacterClass::Cleric,
        CharacterClass::Bard,
        CharacterClass::Warlock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Bard => "Bard",
            CharacterClass::Warlock => "Warlock",
        }
    }

    /// Lowercase tag used in data files
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Ranger => "ranger",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Fighter => "fighter",
            CharacterClass::Barbarian => "barbarian",
            CharacterClass::Wizard => "wizard",
            CharacterClass::Cleric => "cleric",
            CharacterClass::Bard => "bard",
            CharacterClass::Warlock => "warlock",
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            CharacterClass::Ranger => (120, 200, 80),
            CharacterClass::Rogue => (170, 170, 190),
            CharacterClass::Fighter => (200, 140, 80),
            CharacterClass::Barbarian => (220, 60, 50),
            CharacterClass::Wizard => (90, 140, 255),
            CharacterClass::Cleric => (250, 230, 140),
            CharacterClass::Bard => (230, 120, 200),
            CharacterClass::Warlock => (150, 70, 200),
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a class tag is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown character class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        CharacterClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnknownClass(tag.to_string()))
    }
}

/// Which collection an entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Skill,
    Perk,
}

impl ItemKind {
    /// Maximum number of entries of this kind that can be selected
    pub fn capacity(&self) -> usize {
        match self {
            ItemKind::Skill => 2,
            ItemKind::Perk => 4,
        }
    }

    /// Query parameter carrying selections of this kind
    pub fn query_key(&self) -> &'static str {
        match self {
            ItemKind::Skill => "skills",
            ItemKind::Perk => "perks",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Skill => "Skill",
            ItemKind::Perk => "Perk",
        }
    }
}

/// A single skill or perk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique within its collection; used as the identity everywhere
    pub name: String,
    pub description: String,
    pub class: CharacterClass,
    /// Display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<String>,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            class,
            cooldown: None,
        }
    }

    pub fn with_cooldown(mut self, cooldown: impl Into<String>) -> Self {
        self.cooldown = Some(cooldown.into());
        self
    }
}
