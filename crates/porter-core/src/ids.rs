//! Sequential identifiers for locally created entities.
//!
//! Local IDs look like `ISS-2024-007`: prefix, year, zero-padded sequence.
//! Server-assigned IDs (numeric) are kept as-is and never pass through here.
//!
//! The generator keeps a high-water mark per prefix+year. Deleting an entity
//! does not lower it, so an ID is never handed out twice by the same
//! generator even across add/delete cycles.

use std::collections::HashMap;

pub const PREFIX_ISSUE: &str = "ISS";
pub const PREFIX_EMAIL: &str = "EML";
pub const PREFIX_MEETING: &str = "MTG";
pub const PREFIX_SUPPLIER: &str = "SUP";
pub const PREFIX_EVENT: &str = "EVT";

/// Parsed form of a sequential ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialId<'a> {
    pub prefix: &'a str,
    pub year: i32,
    pub number: u32,
}

/// Parse `PREFIX-YYYY-NNN`. Returns `None` for anything else (including
/// numeric server IDs).
#[must_use]
pub fn parse_sequential_id(id: &str) -> Option<SequentialId<'_>> {
    let mut parts = id.splitn(3, '-');
    let prefix = parts.next()?;
    let year = parts.next()?;
    let number = parts.next()?;
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) || year.len() != 4 {
        return None;
    }
    Some(SequentialId {
        prefix,
        year: year.parse().ok()?,
        number: number.parse().ok()?,
    })
}

/// Monotonic generator of `PREFIX-YYYY-NNN` identifiers.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    high_water: HashMap<(String, i32), u32>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a generator that continues after every ID in `existing`.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let mut generator = Self::new();
        for id in existing {
            generator.observe(id);
        }
        generator
    }

    /// Raise the high-water mark if `id` is a sequential ID above it.
    pub fn observe(&mut self, id: &str) {
        if let Some(parsed) = parse_sequential_id(id) {
            let entry = self
                .high_water
                .entry((parsed.prefix.to_string(), parsed.year))
                .or_insert(0);
            *entry = (*entry).max(parsed.number);
        }
    }

    /// Issue the next ID for `prefix` in `year`.
    pub fn next_id(&mut self, prefix: &str, year: i32) -> String {
        let entry = self.high_water.entry((prefix.to_string(), year)).or_insert(0);
        *entry += 1;
        format!("{prefix}-{year}-{:03}", *entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_issue_ids() {
        let parsed = parse_sequential_id("ISS-2024-042").expect("should parse");
        assert_eq!(parsed.prefix, "ISS");
        assert_eq!(parsed.year, 2024);
        assert_eq!(parsed.number, 42);
    }

    #[test]
    fn numeric_server_ids_are_not_sequential() {
        assert!(parse_sequential_id("17").is_none());
        assert!(parse_sequential_id("iss-2024-001").is_none());
        assert!(parse_sequential_id("ISS-24-001").is_none());
    }

    #[test]
    fn continues_after_highest_seen() {
        let mut ids = IdGenerator::seeded(["ISS-2024-001", "ISS-2024-007", "EML-2024-003"]);
        assert_eq!(ids.next_id(PREFIX_ISSUE, 2024), "ISS-2024-008");
        assert_eq!(ids.next_id(PREFIX_EMAIL, 2024), "EML-2024-004");
        assert_eq!(ids.next_id(PREFIX_ISSUE, 2025), "ISS-2025-001");
    }

    #[test]
    fn never_reissues_after_delete() {
        let mut ids = IdGenerator::seeded(["ISS-2024-001", "ISS-2024-002"]);
        let third = ids.next_id(PREFIX_ISSUE, 2024);
        // Deleting ISS-2024-003 from a collection does not rewind the generator.
        let fourth = ids.next_id(PREFIX_ISSUE, 2024);
        assert_ne!(third, fourth);
        assert_eq!(fourth, "ISS-2024-004");
    }

    #[test]
    fn observing_lower_ids_keeps_mark() {
        let mut ids = IdGenerator::seeded(["ISS-2024-010"]);
        ids.observe("ISS-2024-002");
        assert_eq!(ids.next_id(PREFIX_ISSUE, 2024), "ISS-2024-011");
    }
}
