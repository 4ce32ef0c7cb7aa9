//! Slot discovery DTOs
//!
//! The slots endpoint has been seen answering in two shapes for the same
//! logical range:
//!
//! ```json
//! { "slotTimeRange": { "startTime": "...", "endTime": "..." } }
//! { "startTime": "...", "endTime": "..." }
//! ```
//!
//! Both normalize to [`TimeRange`]. The nested form takes precedence when an
//! entry carries both. It is not known whether the flat form is a legacy API
//! version, so neither shape is assumed to be going away.

use serde::{Deserialize, Serialize};

use crate::domain::slot::TimeRange;
use crate::dto::page::PageResponse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRange {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl WireRange {
    fn to_range(&self) -> Option<TimeRange> {
        match (non_blank(&self.start_time), non_blank(&self.end_time)) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)),
            _ => None,
        }
    }
}

/// Which of the two wire shapes an entry was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotShape {
    Nested,
    Flat,
}

/// One entry of the slots page, in either supported shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    #[serde(default)]
    pub slot_time_range: Option<WireRange>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl SlotEntry {
    /// Normalizes either shape; entries with neither complete shape yield `None`
    pub fn normalize(&self) -> Option<TimeRange> {
        self.read().map(|(range, _)| range)
    }

    /// The normalized range together with the shape it came from
    pub fn read(&self) -> Option<(TimeRange, SlotShape)> {
        if let Some(range) = self.slot_time_range.as_ref().and_then(WireRange::to_range) {
            return Some((range, SlotShape::Nested));
        }
        WireRange {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
        .to_range()
        .map(|range| (range, SlotShape::Flat))
    }
}

impl PageResponse<SlotEntry> {
    /// All usable ranges, in response order
    pub fn time_ranges(&self) -> Vec<TimeRange> {
        self.content().iter().filter_map(SlotEntry::normalize).collect()
    }

    /// Number of usable entries that only carried the flat shape
    pub fn flat_count(&self) -> usize {
        self.content()
            .iter()
            .filter_map(SlotEntry::read)
            .filter(|(_, shape)| *shape == SlotShape::Flat)
            .count()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(body: serde_json::Value) -> SlotEntry {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_both_shapes_normalize_identically() {
        let nested = entry(json!({
            "slotTimeRange": {
                "startTime": "2025-08-06T03:30:00Z",
                "endTime": "2025-08-06T04:00:00Z"
            }
        }));
        let flat = entry(json!({
            "startTime": "2025-08-06T03:30:00Z", "endTime": "2025-08-06T04:00:00Z"
        }));

        assert!(nested.normalize().is_some());
        assert_eq!(nested.normalize(), flat.normalize());
    }

    #[test]
    fn test_nested_shape_wins_over_flat_fields() {
        let both = entry(json!({
            "slotTimeRange": { "startTime": "A", "endTime": "B" },
            "startTime": "C", "endTime": "D"
        }));
        assert_eq!(both.normalize(), Some(TimeRange::new("A", "B")));
    }

    #[test]
    fn test_incomplete_nested_falls_back_to_flat() {
        let e = entry(json!({
            "slotTimeRange": { "startTime": "A" },
            "startTime": "C", "endTime": "D"
        }));
        assert_eq!(e.normalize(), Some(TimeRange::new("C", "D")));
    }

    #[test]
    fn test_incomplete_entries_are_dropped() {
        let page: PageResponse<SlotEntry> = serde_json::from_value(json!({
            "data": { "content": [
                { "startTime": "A" },
                { "slotTimeRange": { "startTime": "", "endTime": "B" } },
                { "startTime": "E", "endTime": "F" },
                { "slotTimeRange": { "startTime": "G", "endTime": "H" } }
            ]}
        }))
        .unwrap();

        assert_eq!(
            page.time_ranges(),
            vec![TimeRange::new("E", "F"), TimeRange::new("G", "H")]
        );
    }

    #[test]
    fn test_flat_entries_are_counted() {
        let page: PageResponse<SlotEntry> = serde_json::from_value(json!({
            "data": { "content": [
                { "slotTimeRange": { "startTime": "A", "endTime": "B" } },
                { "startTime": "C", "endTime": "D" },
                { "slotTimeRange": { "startTime": "E" }, "startTime": "E", "endTime": "F" },
                { "startTime": "G" }
            ]}
        }))
        .unwrap();

        assert_eq!(page.content()[0].read().map(|(_, s)| s), Some(SlotShape::Nested));
        assert_eq!(page.content()[1].read().map(|(_, s)| s), Some(SlotShape::Flat));
        assert!(page.content()[3].read().is_none());
        assert_eq!(page.flat_count(), 2);
    }
}
