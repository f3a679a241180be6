use std::sync::Arc;

use pretty_assertions::assert_eq;
use slotbook_core::errors::EngineError;
use slotbook_core::models::booking::{BookingDraft, CustomerInfo};
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::schedule::WeeklyPattern;
use slotbook_core::models::time::{DateKey, TimeSlot};
use slotbook_engine::{
    AvailabilityResolver, BookingFlow, BookingLedger, ConfirmOutcome, FlowStep, ScheduleStore,
};

fn slot(raw: &str) -> TimeSlot {
    TimeSlot::parse(raw).expect("valid slot")
}

fn date(raw: &str) -> DateKey {
    DateKey::parse(raw).expect("valid date")
}

fn customer(name: &str) -> CustomerInfo {
    CustomerInfo {
        name: name.to_string(),
        phone: "0912-000-0000".to_string(),
    }
}

struct Engine {
    schedules: Arc<ScheduleStore>,
    ledger: Arc<BookingLedger>,
    resolver: AvailabilityResolver,
}

fn engine() -> Engine {
    let schedules = Arc::new(ScheduleStore::new());
    let ledger = Arc::new(BookingLedger::new());
    let resolver = AvailabilityResolver::new(Arc::clone(&schedules), Arc::clone(&ledger));
    Engine {
        schedules,
        ledger,
        resolver,
    }
}

fn saturday_provider(engine: &Engine) -> ProviderId {
    let pattern = WeeklyPattern::new(
        [6],
        vec![slot("09:00"), slot("10:00"), slot("11:00")],
    )
    .unwrap();
    engine.schedules.register(pattern).unwrap()
}

#[test]
fn test_happy_path_reaches_confirmed() {
    let engine = engine();
    let provider = saturday_provider(&engine);
    let mut flow = BookingFlow::new();

    assert_eq!(flow.step(), FlowStep::SelectProvider);
    flow.select_provider(provider).unwrap();
    flow.select_services(vec!["haircut".to_string()]).unwrap();
    flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("09:00"))
        .unwrap();
    flow.enter_info(customer("Amir")).unwrap();
    assert_eq!(flow.step(), FlowStep::Review);

    let outcome = flow.confirm(&engine.resolver, &engine.ledger).unwrap();
    let booking = match outcome {
        ConfirmOutcome::Confirmed(booking) => booking,
        other => panic!("Expected Confirmed, got: {:?}", other),
    };

    assert_eq!(flow.step(), FlowStep::Confirmed);
    assert_eq!(booking.date, Some(date("2024-06-08")));
    assert_eq!(booking.time, Some(slot("09:00")));
    assert_eq!(booking.customer.name, "Amir");
    assert_eq!(engine.ledger.list_for(provider, date("2024-06-08")).len(), 1);
}

#[test]
fn test_steps_must_run_in_order() {
    let engine = engine();
    let mut flow = BookingFlow::new();

    let result = flow.select_services(vec![]);
    assert!(matches!(result, Err(EngineError::Validation(_))));

    let result = flow.confirm(&engine.resolver, &engine.ledger);
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_select_date_time_requires_an_available_slot() {
    let engine = engine();
    let provider = saturday_provider(&engine);
    let mut flow = BookingFlow::new();

    flow.select_provider(provider).unwrap();
    flow.select_services(vec![]).unwrap();

    // 2024-06-07 is a Friday: not a working day, nothing is available.
    let result = flow.select_date_time(&engine.resolver, date("2024-06-07"), slot("09:00"));
    assert!(matches!(result, Err(EngineError::Validation(_))));
    assert_eq!(flow.step(), FlowStep::SelectDateTime);

    // A slot someone else already booked is equally unavailable.
    engine
        .ledger
        .try_create(
            provider,
            date("2024-06-08"),
            slot("09:00"),
            BookingDraft {
                service_refs: vec![],
                customer: customer("Reza"),
            },
        )
        .unwrap();
    let result = flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("09:00"));
    assert!(matches!(result, Err(EngineError::Validation(_))));

    flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("10:00"))
        .unwrap();
    assert_eq!(flow.step(), FlowStep::EnterInfo);
}

#[test]
fn test_back_walks_toward_the_first_step() {
    let engine = engine();
    let provider = saturday_provider(&engine);
    let mut flow = BookingFlow::new();

    flow.select_provider(provider).unwrap();
    flow.select_services(vec![]).unwrap();
    assert_eq!(flow.step(), FlowStep::SelectDateTime);

    flow.back().unwrap();
    assert_eq!(flow.step(), FlowStep::SelectServices);
    flow.back().unwrap();
    assert_eq!(flow.step(), FlowStep::SelectProvider);

    // Already at the first step: back stays put.
    flow.back().unwrap();
    assert_eq!(flow.step(), FlowStep::SelectProvider);
}

#[test]
fn test_confirmed_is_terminal_until_restart() {
    let engine = engine();
    let provider = saturday_provider(&engine);
    let mut flow = BookingFlow::new();

    flow.select_provider(provider).unwrap();
    flow.select_services(vec![]).unwrap();
    flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("09:00"))
        .unwrap();
    flow.enter_info(customer("Amir")).unwrap();
    flow.confirm(&engine.resolver, &engine.ledger).unwrap();

    assert!(matches!(flow.back(), Err(EngineError::Validation(_))));

    flow.restart();
    assert_eq!(flow.step(), FlowStep::SelectProvider);
}

#[test]
fn test_lost_race_returns_to_date_time_with_refreshed_availability() {
    let engine = engine();
    let provider = saturday_provider(&engine);
    let mut flow = BookingFlow::new();

    flow.select_provider(provider).unwrap();
    flow.select_services(vec![]).unwrap();
    flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("09:00"))
        .unwrap();
    flow.enter_info(customer("Amir")).unwrap();

    // A concurrent booking claims the chosen slot between review and confirm.
    engine
        .ledger
        .try_create(
            provider,
            date("2024-06-08"),
            slot("09:00"),
            BookingDraft {
                service_refs: vec![],
                customer: customer("Reza"),
            },
        )
        .unwrap();

    let outcome = flow.confirm(&engine.resolver, &engine.ledger).unwrap();
    let available = match outcome {
        ConfirmOutcome::SlotConflict { available } => available,
        other => panic!("Expected SlotConflict, got: {:?}", other),
    };

    assert_eq!(flow.step(), FlowStep::SelectDateTime);
    let refreshed: Vec<&str> = available.iter().map(TimeSlot::as_str).collect();
    assert_eq!(refreshed, vec!["10:00", "11:00"]);

    // Picking one of the refreshed slots completes the booking.
    flow.select_date_time(&engine.resolver, date("2024-06-08"), slot("10:00"))
        .unwrap();
    flow.enter_info(customer("Amir")).unwrap();
    let outcome = flow.confirm(&engine.resolver, &engine.ledger).unwrap();
    assert!(matches!(outcome, ConfirmOutcome::Confirmed(_)));
    assert_eq!(engine.ledger.list_for(provider, date("2024-06-08")).len(), 2);
}
