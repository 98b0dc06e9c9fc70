use super::domain::Payment;
use super::period::Period;
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PaymentTotals {
    pub(crate) haben: Decimal,
    pub(crate) count: usize,
}

/// Sums payments dated inside the period, keyed by tenant id.
pub(crate) fn aggregate_payments<'a>(
    payments: &'a [Payment],
    period: &Period,
) -> HashMap<&'a str, PaymentTotals> {
    let mut totals: HashMap<&str, PaymentTotals> = HashMap::new();
    for payment in payments
        .iter()
        .filter(|payment| period.contains_date(payment.date))
    {
        let entry = totals.entry(payment.tenant_id.as_str()).or_default();
        entry.haben += payment.amount;
        entry.count += 1;
    }
    totals
}
