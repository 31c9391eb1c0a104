//! Public API surface shared by the engine, the repository layer, and the
//! HTTP edge.
//!
//! Identifiers are opaque integer newtypes; the remaining items describe the
//! fixed weekly grid vocabulary that every layer speaks (days 1..=5, slots
//! 1..=7, morning/afternoon halves).

use serde::{Deserialize, Serialize};

/// Academic session identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SessionId(pub i64);

/// Semester offering identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SemesterOfferingId(pub i64);

/// Course offering identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CourseOfferingId(pub i64);

/// Subject identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SubjectId(pub i64);

/// Teacher identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TeacherId(pub i64);

/// Room identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub i64);

/// Schedule run identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RunId(pub i64);

/// Schedule block identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(pub i64);

/// Schedule entry identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntryId(pub i64);

macro_rules! impl_id_conversions {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                pub fn new(value: i64) -> Self {
                    $name(value)
                }

                pub fn value(&self) -> i64 {
                    self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i64> for $name {
                fn from(v: i64) -> Self {
                    $name(v)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

impl_id_conversions!(
    SessionId,
    SemesterOfferingId,
    CourseOfferingId,
    SubjectId,
    TeacherId,
    RoomId,
    RunId,
    BlockId,
    EntryId,
);

/// Sentinel room id used by course offerings that do not require a room.
/// Blocks carrying it bypass the room occupancy check.
pub const ROOM_SENTINEL: RoomId = RoomId(0);

impl RoomId {
    /// Whether this id is the "no room required" sentinel.
    pub fn is_sentinel(&self) -> bool {
        *self == ROOM_SENTINEL
    }
}

/// Number of teaching days per week (1=Mon .. 5=Fri).
pub const DAYS_PER_WEEK: u8 = 5;

/// Number of slots per teaching day.
pub const SLOTS_PER_DAY: u8 = 7;

/// Last slot of the morning half; the lunch gap sits between this slot and
/// the next one and has no slot number of its own.
pub const MORNING_LAST_SLOT: u8 = 4;

/// Day-of-week number for Friday.
pub const FRIDAY: u8 = 5;

/// A concrete position on the weekly grid offered for a block that could not
/// be placed. The window fits the working grid alone; teacher and room
/// conflicts are ignored (this is a UI hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedSlot {
    pub day_of_week: u8,
    pub slot_start: u8,
    pub slot_length: u8,
}

/// Short display label for a day number, `"?"` out of range.
pub fn day_label(day: u8) -> &'static str {
    match day {
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        _ => "?",
    }
}

/// Wall-clock label for a slot number. Slots 1..=4 run from 09:00 in
/// 55-minute periods; lunch is 12:40-13:50; slots 5..=7 run from 13:50.
pub fn slot_label(slot: u8) -> &'static str {
    match slot {
        1 => "09:00-09:55",
        2 => "09:55-10:50",
        3 => "10:50-11:45",
        4 => "11:45-12:40",
        5 => "13:50-14:45",
        6 => "14:45-15:40",
        7 => "15:40-16:35",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_sentinel() {
        assert!(RoomId::new(0).is_sentinel());
        assert!(!RoomId::new(17).is_sentinel());
    }

    #[test]
    fn test_id_roundtrip() {
        let id = TeacherId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(TeacherId::from(42), id);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_labels() {
        assert_eq!(day_label(1), "Mon");
        assert_eq!(day_label(5), "Fri");
        assert_eq!(day_label(6), "?");
        assert_eq!(slot_label(4), "11:45-12:40");
        assert_eq!(slot_label(5), "13:50-14:45");
        assert_eq!(slot_label(0), "?");
    }
}
