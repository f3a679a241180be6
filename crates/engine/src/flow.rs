use slotbook_core::errors::{EngineError, EngineResult};
use slotbook_core::models::booking::{Booking, BookingDraft, CustomerInfo};
use slotbook_core::models::provider::ProviderId;
use slotbook_core::models::time::{DateKey, TimeSlot};

use crate::ledger::BookingLedger;
use crate::resolver::AvailabilityResolver;

/// Steps of the linear booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    SelectProvider,
    SelectServices,
    SelectDateTime,
    EnterInfo,
    Review,
    Confirmed,
}

/// Result of a confirmation attempt.
#[derive(Debug)]
pub enum ConfirmOutcome {
    Confirmed(Booking),
    /// The chosen slot was claimed between selection and confirmation. The
    /// flow is back at date/time selection; `available` is the refreshed
    /// slot list for the chosen date.
    SlotConflict { available: Vec<TimeSlot> },
}

/// Drives a single booking from provider selection through confirmation.
///
/// Transitions are linear and forward; [`BookingFlow::back`] steps backward
/// from any state except `Confirmed`, which is terminal and only left by
/// [`BookingFlow::restart`].
#[derive(Debug)]
pub struct BookingFlow {
    step: FlowStep,
    provider_id: Option<ProviderId>,
    service_refs: Vec<String>,
    date: Option<DateKey>,
    time: Option<TimeSlot>,
    customer: Option<CustomerInfo>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: FlowStep::SelectProvider,
            provider_id: None,
            service_refs: Vec::new(),
            date: None,
            time: None,
            customer: None,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    fn expect_step(&self, expected: FlowStep) -> EngineResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(EngineError::Validation(format!(
                "flow is at {:?}, expected {:?}",
                self.step, expected
            )))
        }
    }

    pub fn select_provider(&mut self, provider_id: ProviderId) -> EngineResult<()> {
        self.expect_step(FlowStep::SelectProvider)?;
        self.provider_id = Some(provider_id);
        self.step = FlowStep::SelectServices;
        Ok(())
    }

    pub fn select_services(&mut self, service_refs: Vec<String>) -> EngineResult<()> {
        self.expect_step(FlowStep::SelectServices)?;
        self.service_refs = service_refs;
        self.step = FlowStep::SelectDateTime;
        Ok(())
    }

    /// Requires the chosen slot to be currently present in the resolver's
    /// availability for that date.
    pub fn select_date_time(
        &mut self,
        resolver: &AvailabilityResolver,
        date: DateKey,
        time: TimeSlot,
    ) -> EngineResult<()> {
        self.expect_step(FlowStep::SelectDateTime)?;
        let provider_id = self.selected_provider()?;

        let available = resolver.available_slots(provider_id, date)?;
        if !available.contains(&time) {
            return Err(EngineError::Validation(format!(
                "slot {time} is not available on {date}"
            )));
        }

        self.date = Some(date);
        self.time = Some(time);
        self.step = FlowStep::EnterInfo;
        Ok(())
    }

    pub fn enter_info(&mut self, customer: CustomerInfo) -> EngineResult<()> {
        self.expect_step(FlowStep::EnterInfo)?;
        self.customer = Some(customer);
        self.step = FlowStep::Review;
        Ok(())
    }

    /// Re-invokes the ledger's atomic create. Losing the race to a
    /// concurrent booking is not an error: the flow returns to date/time
    /// selection and hands back a refreshed availability list instead of
    /// silently proceeding.
    pub fn confirm(
        &mut self,
        resolver: &AvailabilityResolver,
        ledger: &BookingLedger,
    ) -> EngineResult<ConfirmOutcome> {
        self.expect_step(FlowStep::Review)?;
        let provider_id = self.selected_provider()?;
        let date = self
            .date
            .ok_or_else(|| EngineError::Validation("no date selected".to_string()))?;
        let time = self
            .time
            .clone()
            .ok_or_else(|| EngineError::Validation("no time selected".to_string()))?;
        let customer = self
            .customer
            .clone()
            .ok_or_else(|| EngineError::Validation("no customer info entered".to_string()))?;

        let draft = BookingDraft {
            service_refs: self.service_refs.clone(),
            customer,
        };

        match ledger.try_create(provider_id, date, time, draft) {
            Ok(booking) => {
                self.step = FlowStep::Confirmed;
                Ok(ConfirmOutcome::Confirmed(booking))
            }
            Err(EngineError::SlotTaken { .. }) => {
                self.time = None;
                self.step = FlowStep::SelectDateTime;
                let available = resolver.available_slots(provider_id, date)?;
                Ok(ConfirmOutcome::SlotConflict { available })
            }
            Err(other) => Err(other),
        }
    }

    /// Steps backward. Allowed from any state except `Confirmed`; at the
    /// first step this is a no-op.
    pub fn back(&mut self) -> EngineResult<()> {
        self.step = match self.step {
            FlowStep::SelectProvider => FlowStep::SelectProvider,
            FlowStep::SelectServices => FlowStep::SelectProvider,
            FlowStep::SelectDateTime => FlowStep::SelectServices,
            FlowStep::EnterInfo => FlowStep::SelectDateTime,
            FlowStep::Review => FlowStep::EnterInfo,
            FlowStep::Confirmed => {
                return Err(EngineError::Validation(
                    "a confirmed flow can only be restarted".to_string(),
                ))
            }
        };
        Ok(())
    }

    /// Discards everything and returns to provider selection.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    fn selected_provider(&self) -> EngineResult<ProviderId> {
        self.provider_id
            .ok_or_else(|| EngineError::Validation("no provider selected".to_string()))
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}
