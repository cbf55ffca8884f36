//! Column ordering for the analytics table.
//!
//! Fields are first collected in first-seen order across all records, then a
//! fixed rule table promotes, demotes or drops a handful of well-known fields.

use super::payload::Record;
use std::collections::HashSet;

pub const TIME_MINUTE: &str = "timeMinute";
pub const GROUP_PLAY: &str = "groupPlay";
pub const WATCH_UCNT: &str = "watchUcnt";
pub const PCU_TOTAL: &str = "pcuTotal";
pub const KEY_EVENT: &str = "keyEvent";

/// Position class of a field in the final order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Head,
    Body,
    Tail(u8),
    Last,
}

/// Rule table. `None` means the field never becomes a column.
fn slot(field: &str) -> Option<Slot> {
    match field {
        TIME_MINUTE => Some(Slot::Head),
        GROUP_PLAY => None,
        WATCH_UCNT => Some(Slot::Tail(0)),
        PCU_TOTAL => Some(Slot::Tail(1)),
        KEY_EVENT => Some(Slot::Last),
        _ => Some(Slot::Body),
    }
}

/// Union of record keys in first-seen order.
///
/// Records are walked in order and each record's keys in document order.
pub fn discover_fields<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    let mut discovered = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                discovered.push(key.clone());
            }
        }
    }
    discovered
}

/// Apply the positional rules to a discovered field list.
///
/// `timeMinute` leads, `groupPlay` is dropped, `watchUcnt` then `pcuTotal`
/// follow the remaining fields, and `keyEvent` is always the final column,
/// even when no record carries it. Fields in the same class keep their
/// relative order.
pub fn apply_rules(discovered: Vec<String>) -> Vec<String> {
    let mut ordered: Vec<(Slot, String)> = discovered
        .into_iter()
        .filter_map(|field| slot(&field).map(|s| (s, field)))
        .collect();
    // Stable, so first-seen order survives within a class
    ordered.sort_by_key(|(s, _)| *s);

    let mut fields: Vec<String> = ordered.into_iter().map(|(_, field)| field).collect();
    if fields.last().map(String::as_str) != Some(KEY_EVENT) {
        fields.push(KEY_EVENT.to_string());
    }
    fields
}

/// Compute the column order for a set of records.
pub fn order_fields(records: &[Record]) -> Vec<String> {
    apply_rules(discover_fields(records))
}
