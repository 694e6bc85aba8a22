use serde::Serialize;

use crate::models::ChargeNumber;
use crate::utils::date_range::DateRange;
use crate::utils::duration::Duration;

/// The cumulative time billed to one charge number within one report period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bill {
    charge_number: ChargeNumber,
    duration: Duration,
}

impl Bill {
    pub fn new(charge_number: ChargeNumber, duration: Duration) -> Self {
        Self {
            charge_number,
            duration,
        }
    }

    pub fn charge_number(&self) -> &ChargeNumber {
        &self.charge_number
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Billed time for one period, one bill per charge number.
///
/// Bills are always held in ascending charge number order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BillingReport {
    date_range: DateRange,
    bills: Vec<Bill>,
}

impl BillingReport {
    pub fn new(date_range: DateRange, mut bills: Vec<Bill>) -> Self {
        bills.sort_by(|lhs, rhs| lhs.charge_number.cmp(&rhs.charge_number));
        Self { date_range, bills }
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn bill_for(&self, charge_number: &ChargeNumber) -> Option<&Bill> {
        self.bills
            .binary_search_by(|bill| bill.charge_number.cmp(charge_number))
            .ok()
            .map(|index| &self.bills[index])
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_milliseconds(
            self.bills
                .iter()
                .map(|bill| bill.duration.to_milliseconds())
                .sum(),
        )
    }
}
