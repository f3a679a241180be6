use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use slotbook_core::errors::EngineError;
use slotbook_core::models::{
    booking::{Booking, BookingId, CustomerInfo},
    provider::ProviderId,
    schedule::{DayOverride, Schedule, WeeklyPattern},
    time::{normalize_slots, DateKey, TimeSlot},
};

fn slot(raw: &str) -> TimeSlot {
    TimeSlot::parse(raw).expect("valid slot")
}

#[rstest]
#[case("00:00")]
#[case("09:00")]
#[case("12:30")]
#[case("23:59")]
fn test_time_slot_accepts_canonical_forms(#[case] raw: &str) {
    assert_eq!(TimeSlot::parse(raw).unwrap().as_str(), raw);
}

#[rstest]
#[case("9:00")]
#[case("09:0")]
#[case("0900")]
#[case("24:00")]
#[case("23:60")]
#[case("ab:cd")]
#[case("09:00 ")]
#[case("")]
fn test_time_slot_rejects_malformed_input(#[case] raw: &str) {
    match TimeSlot::parse(raw) {
        Err(EngineError::InvalidSlotFormat(seen)) => assert_eq!(seen, raw),
        other => panic!("Expected InvalidSlotFormat, got: {:?}", other),
    }
}

#[test]
fn test_time_slot_ordering_is_chronological() {
    let mut slots = vec![slot("14:00"), slot("09:00"), slot("10:30")];
    slots.sort();

    let ordered: Vec<&str> = slots.iter().map(TimeSlot::as_str).collect();
    assert_eq!(ordered, vec!["09:00", "10:30", "14:00"]);
}

#[test]
fn test_time_slot_deserialization_validates() {
    let ok: TimeSlot = from_str("\"09:00\"").expect("canonical slot deserializes");
    assert_eq!(ok.as_str(), "09:00");

    let err = from_str::<TimeSlot>("\"9:00\"");
    assert!(err.is_err());
}

#[test]
fn test_date_key_is_canonical_and_zero_padded() {
    let key = DateKey::from_ymd(2024, 6, 7).unwrap();
    assert_eq!(key.to_string(), "2024-06-07");
    assert_eq!(key, DateKey::parse("2024-06-07").unwrap());
}

#[test]
fn test_date_key_strips_time_of_day() {
    let morning = Utc.with_ymd_and_hms(2024, 6, 7, 0, 0, 1).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 6, 7, 23, 59, 59).unwrap();

    assert_eq!(
        DateKey::from_datetime(morning),
        DateKey::from_datetime(evening)
    );
}

#[test]
fn test_date_key_rejects_impossible_dates() {
    assert!(matches!(
        DateKey::parse("2024-13-01"),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        DateKey::from_ymd(2024, 2, 30),
        Err(EngineError::Validation(_))
    ));
}

#[rstest]
#[case("2024-06-02", 0)] // Sunday
#[case("2024-06-03", 1)] // Monday
#[case("2024-06-07", 5)] // Friday
#[case("2024-06-08", 6)] // Saturday
fn test_date_key_weekday_index(#[case] raw: &str, #[case] expected: u8) {
    assert_eq!(DateKey::parse(raw).unwrap().weekday_index(), expected);
}

#[test]
fn test_normalize_slots_sorts_ascending() {
    let normalized = normalize_slots(vec![slot("11:00"), slot("09:00"), slot("10:00")]).unwrap();
    let ordered: Vec<&str> = normalized.iter().map(TimeSlot::as_str).collect();
    assert_eq!(ordered, vec!["09:00", "10:00", "11:00"]);
}

#[test]
fn test_normalize_slots_rejects_duplicates() {
    let result = normalize_slots(vec![slot("09:00"), slot("10:00"), slot("09:00")]);
    match result {
        Err(EngineError::DuplicateSlot(duplicate)) => assert_eq!(duplicate.as_str(), "09:00"),
        other => panic!("Expected DuplicateSlot, got: {:?}", other),
    }
}

#[test]
fn test_weekly_pattern_rejects_invalid_weekday() {
    let result = WeeklyPattern::new([0, 7], vec![slot("09:00")]);
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_weekly_pattern_dedups_working_days() {
    let pattern = WeeklyPattern::new([1, 1, 2], vec![]).unwrap();
    assert_eq!(pattern.working_days.len(), 2);
}

#[test]
fn test_schedule_persisted_representation() {
    let mut schedule = Schedule::new(
        WeeklyPattern::new([0, 1, 2], vec![slot("09:00"), slot("10:00")]).unwrap(),
    );
    schedule.overrides.insert(
        DateKey::parse("2024-06-07").unwrap(),
        DayOverride {
            is_working: false,
            slots: vec![],
        },
    );

    let value = to_value(&schedule).expect("Failed to serialize schedule");
    assert_eq!(
        value,
        json!({
            "weekly_pattern": {
                "working_days": [0, 1, 2],
                "default_slots": ["09:00", "10:00"],
            },
            "overrides": {
                "2024-06-07": { "is_working": false, "slots": [] },
            },
        })
    );

    let roundtrip: Schedule = from_str(&to_string(&schedule).unwrap()).unwrap();
    assert_eq!(roundtrip, schedule);
}

#[test]
fn test_booking_serialization() {
    let booking = Booking {
        id: BookingId(7),
        provider_id: ProviderId::new(),
        date: Some(DateKey::parse("2024-06-08").unwrap()),
        time: Some(slot("09:00")),
        service_refs: vec!["haircut".to_string()],
        customer: CustomerInfo {
            name: "Amir".to_string(),
            phone: "0912-000-0000".to_string(),
        },
        created_at: Utc::now(),
    };

    let json = to_string(&booking).expect("Failed to serialize booking");
    let deserialized: Booking = from_str(&json).expect("Failed to deserialize booking");

    assert_eq!(deserialized, booking);
}

#[test]
fn test_booking_tolerates_missing_date_and_time() {
    let booking = Booking {
        id: BookingId(1),
        provider_id: ProviderId::new(),
        date: None,
        time: None,
        service_refs: vec![],
        customer: CustomerInfo {
            name: "Reza".to_string(),
            phone: "".to_string(),
        },
        created_at: Utc::now(),
    };

    let json = to_string(&booking).expect("Failed to serialize booking");
    let deserialized: Booking = from_str(&json).expect("Failed to deserialize booking");

    assert_eq!(deserialized.date, None);
    assert_eq!(deserialized.time, None);
}
