//! Query-string codec for loadouts
//!
//! A loadout is written as `skills=<name>,<name>&perks=<name>,...` with each
//! name percent-encoded the way `encodeURIComponent` does it, so commas and
//! ampersands inside names survive the round trip.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::catalog::{Catalog, ItemKind};
use crate::picker::Selection;

/// Characters escaped inside a single name
const NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const KINDS: [ItemKind; 2] = [ItemKind::Skill, ItemKind::Perk];

/// Percent-encode a single name
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME).to_string()
}

/// Decode a single name. `+` is read as a space. Invalid UTF-8 yields `None`.
pub fn decode_name(raw: &str) -> Option<String> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .ok()
}

/// Serialize a selection into a query string (without the leading `?`)
pub fn encode(selection: &Selection) -> String {
    KINDS
        .iter()
        .map(|&kind| {
            let names: Vec<String> = selection
                .items(kind)
                .iter()
                .map(|item| encode_name(&item.name))
                .collect();
            format!("{}={}", kind.query_key(), names.join(","))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Raw value of the first occurrence of `key`, if any
pub fn param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Decoded, non-empty names listed under `key`, in query order
pub fn names(query: &str, key: &str) -> Vec<String> {
    let Some(raw) = param(query, key) else {
        return Vec::new();
    };

    raw.split(',')
        .filter_map(|entry| {
            let name = decode_name(entry);
            if name.is_none() {
                log::debug!("Ignoring undecodable {} entry: {}", key, entry);
            }
            name
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Rebuild a selection from a query string.
///
/// Names are resolved by exact match against the matching collection.
/// Unknown names, duplicates and anything past capacity are dropped.
pub fn decode(query: &str, catalog: &Catalog) -> Selection {
    let mut selection = Selection::new();

    for kind in KINDS {
        for name in names(query, kind.query_key()) {
            let Some(item) = catalog.find(kind, &name) else {
                log::debug!("Ignoring unknown {} in query: {}", kind.name(), name);
                continue;
            };
            if selection.is_selected(kind, &item.name) {
                continue;
            }
            if !selection.toggle(kind, item).changed() {
                log::debug!("Ignoring {} past capacity: {}", kind.name(), name);
            }
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, CharacterClass};

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogItem::new("Sneak Attack", "", CharacterClass::Rogue).with_cooldown("3 turns"),
                CatalogItem::new("Evasion", "", CharacterClass::Rogue).with_cooldown("5 turns"),
                CatalogItem::new("Smoke, Mirrors & Co", "", CharacterClass::Bard).with_cooldown("1 turn"),
            ],
            vec![
                CatalogItem::new("Alert", "", CharacterClass::Fighter),
                CatalogItem::new("Tough", "", CharacterClass::Barbarian),
                CatalogItem::new("Lucky", "", CharacterClass::Bard),
                CatalogItem::new("Sentinel", "", CharacterClass::Fighter),
                CatalogItem::new("Élan", "", CharacterClass::Bard),
            ],
        )
    }

    fn select(catalog: &Catalog, skills: &[&str], perks: &[&str]) -> Selection {
        let mut selection = Selection::new();
        for name in skills {
            selection.toggle(ItemKind::Skill, catalog.find(ItemKind::Skill, name).unwrap());
        }
        for name in perks {
            selection.toggle(ItemKind::Perk, catalog.find(ItemKind::Perk, name).unwrap());
        }
        selection
    }

    fn skill_names(selection: &Selection) -> Vec<&str> {
        selection.skills().iter().map(|i| i.name.as_str()).collect()
    }

    fn perk_names(selection: &Selection) -> Vec<&str> {
        selection.perks().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_encode_format() {
        let catalog = sample_catalog();
        let selection = select(&catalog, &["Sneak Attack", "Evasion"], &["Alert"]);
        assert_eq!(encode(&selection), "skills=Sneak%20Attack,Evasion&perks=Alert");
        assert_eq!(encode(&Selection::new()), "skills=&perks=");
    }

    #[test]
    fn test_encode_escapes_separators() {
        assert_eq!(encode_name("Smoke, Mirrors & Co"), "Smoke%2C%20Mirrors%20%26%20Co");
        assert_eq!(encode_name("Élan"), "%C3%89lan");
        assert_eq!(encode_name("it's (fine)!*~"), "it's%20(fine)!*~");
        assert_eq!(encode_name("a+b=c"), "a%2Bb%3Dc");
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let catalog = sample_catalog();
        // Deliberately not in catalog order
        let selection = select(&catalog, &["Evasion", "Smoke, Mirrors & Co"], &["Sentinel", "Élan", "Alert"]);

        let restored = decode(&encode(&selection), &catalog);
        assert_eq!(restored, selection);
        assert_eq!(skill_names(&restored), vec!["Evasion", "Smoke, Mirrors & Co"]);
    }

    #[test]
    fn test_decode_example_query() {
        let catalog = sample_catalog();
        let selection = decode("?skills=Sneak%20Attack,Evasion&perks=Alert", &catalog);
        assert_eq!(skill_names(&selection), vec!["Sneak Attack", "Evasion"]);
        assert_eq!(perk_names(&selection), vec!["Alert"]);
    }

    #[test]
    fn test_decode_ignores_unknown_and_empty() {
        let catalog = sample_catalog();
        let selection = decode("?skills=Unknown&perks=", &catalog);
        assert!(selection.is_empty());

        let selection = decode("skills=,Evasion,,&perks=Alert,", &catalog);
        assert_eq!(skill_names(&selection), vec!["Evasion"]);
        assert_eq!(perk_names(&selection), vec!["Alert"]);

        assert!(decode("", &catalog).is_empty());
        assert!(decode("?foo=bar&skills", &catalog).is_empty());
        assert!(decode("skills=%FF%FE", &catalog).is_empty());
    }

    #[test]
    fn test_decode_respects_kind_and_capacity() {
        let catalog = sample_catalog();
        // Perk names under skills are not resolved
        let selection = decode("skills=Alert,Evasion,Evasion,Sneak%20Attack,Smoke%2C%20Mirrors%20%26%20Co", &catalog);
        assert_eq!(skill_names(&selection), vec!["Evasion", "Sneak Attack"]);

        let selection = decode("perks=Alert,Tough,Lucky,Sentinel,%C3%89lan", &catalog);
        assert_eq!(perk_names(&selection), vec!["Alert", "Tough", "Lucky", "Sentinel"]);
    }

    #[test]
    fn test_decode_plus_and_first_param() {
        let catalog = sample_catalog();
        let selection = decode("skills=Sneak+Attack&skills=Evasion", &catalog);
        assert_eq!(skill_names(&selection), vec!["Sneak Attack"]);
    }

    #[test]
    fn test_names_are_exact_match() {
        let catalog = sample_catalog();
        assert!(decode("skills=sneak%20attack", &catalog).is_empty());
        assert!(decode("skills=Evasion%20", &catalog).is_empty());
    }
}
