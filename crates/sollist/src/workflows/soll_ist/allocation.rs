//! Distribution of received money across cost buckets.
//!
//! Tenant payments follow the MRG priority (BK, then HK, then Miete) when the
//! SOLL is not covered. Owner settlements of vacancy costs are split pro rata.

use super::domain::{CostBucket, TOLERANCE};
use super::soll::SollBreakdown;
use rust_decimal::Decimal;
use serde::Serialize;

/// IST per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub ist_bk: Decimal,
    pub ist_hk: Decimal,
    pub ist_miete: Decimal,
}

impl Allocation {
    fn covering(soll: &SollBreakdown) -> Self {
        Self {
            ist_bk: soll.bk,
            ist_hk: soll.hk,
            ist_miete: soll.miete,
        }
    }

    pub fn get(&self, bucket: CostBucket) -> Decimal {
        match bucket {
            CostBucket::Betriebskosten => self.ist_bk,
            CostBucket::Heizkosten => self.ist_hk,
            CostBucket::Miete => self.ist_miete,
        }
    }

    fn set(&mut self, bucket: CostBucket, value: Decimal) {
        match bucket {
            CostBucket::Betriebskosten => self.ist_bk = value,
            CostBucket::Heizkosten => self.ist_hk = value,
            CostBucket::Miete => self.ist_miete = value,
        }
    }

    pub fn total(&self) -> Decimal {
        self.ist_bk + self.ist_hk + self.ist_miete
    }
}

fn is_covered(soll: &SollBreakdown, haben: Decimal) -> bool {
    haben >= soll.betrag - TOLERANCE
}

/// Allocates a tenant's payments in statutory priority order.
///
/// A covered SOLL is booked in full and any excess stays unallocated (it is
/// reported as overpayment, never per bucket).
pub fn allocate(soll: &SollBreakdown, haben: Decimal) -> Allocation {
    if is_covered(soll, haben) {
        return Allocation::covering(soll);
    }
    if haben < TOLERANCE {
        return Allocation::default();
    }

    let mut allocation = Allocation::default();
    let mut remaining = haben;
    for bucket in CostBucket::statutory_order() {
        let share = remaining.min(soll.get(bucket));
        allocation.set(bucket, share);
        remaining -= share;
    }
    allocation
}

/// Splits `haben` across buckets by each bucket's share of the SOLL.
pub fn split_proportionally(soll: &SollBreakdown, haben: Decimal) -> Allocation {
    if is_covered(soll, haben) {
        return Allocation::covering(soll);
    }
    if soll.betrag.is_zero() {
        return Allocation::default();
    }

    let mut allocation = Allocation::default();
    for bucket in CostBucket::statutory_order() {
        allocation.set(bucket, soll.get(bucket) * haben / soll.betrag);
    }
    allocation
}
