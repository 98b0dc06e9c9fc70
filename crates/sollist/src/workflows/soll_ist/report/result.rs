use super::super::allocation::Allocation;
use super::super::soll::{SollBreakdown, SollSource};
use rust_decimal::Decimal;
use serde::Serialize;

/// Who a result belongs to. Vacancies carry a synthetic tenant identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultIdentity {
    pub tenant_id: String,
    pub tenant_name: String,
    pub unit_id: String,
    pub unit_label: String,
    pub property_id: String,
    pub property_name: String,
}

/// Everything needed to derive one result.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub identity: ResultIdentity,
    pub source: SollSource,
    pub invoice_count: usize,
    pub soll: SollBreakdown,
    pub allocation: Allocation,
    pub haben_betrag: Decimal,
    pub payment_count: usize,
}

/// SOLL/IST of one tenant or one vacant unit for the period.
///
/// `saldo > 0` means the tenant still owes; `ueberzahlung` is the amount
/// paid beyond the SOLL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSollIstResult {
    pub tenant_id: String,
    pub tenant_name: String,
    pub unit_id: String,
    pub unit_label: String,
    pub property_id: String,
    pub property_name: String,
    pub soll_source: SollSource,
    pub invoice_count: usize,
    pub soll_bk: Decimal,
    pub soll_hk: Decimal,
    pub soll_miete: Decimal,
    pub soll_betrag: Decimal,
    pub ist_bk: Decimal,
    pub ist_hk: Decimal,
    pub ist_miete: Decimal,
    pub haben_betrag: Decimal,
    pub saldo: Decimal,
    pub diff_bk: Decimal,
    pub diff_hk: Decimal,
    pub diff_miete: Decimal,
    pub diff_gesamt: Decimal,
    pub ueberzahlung: Decimal,
    pub payment_count: usize,
    pub is_vacancy: bool,
}

impl TenantSollIstResult {
    /// Sum of the allocated buckets; differs from `haben_betrag` by the overpayment.
    pub fn ist_gesamt(&self) -> Decimal {
        self.ist_bk + self.ist_hk + self.ist_miete
    }
}

impl From<Settlement> for TenantSollIstResult {
    fn from(settlement: Settlement) -> Self {
        let Settlement {
            identity,
            source,
            invoice_count,
            soll,
            allocation,
            haben_betrag,
            payment_count,
        } = settlement;

        let saldo = soll.betrag - haben_betrag;

        Self {
            tenant_id: identity.tenant_id,
            tenant_name: identity.tenant_name,
            unit_id: identity.unit_id,
            unit_label: identity.unit_label,
            property_id: identity.property_id,
            property_name: identity.property_name,
            soll_source: source,
            invoice_count,
            soll_bk: soll.bk,
            soll_hk: soll.hk,
            soll_miete: soll.miete,
            soll_betrag: soll.betrag,
            ist_bk: allocation.ist_bk,
            ist_hk: allocation.ist_hk,
            ist_miete: allocation.ist_miete,
            haben_betrag,
            saldo,
            diff_bk: soll.bk - allocation.ist_bk,
            diff_hk: soll.hk - allocation.ist_hk,
            diff_miete: soll.miete - allocation.ist_miete,
            diff_gesamt: soll.betrag - allocation.total(),
            ueberzahlung: (-saldo).max(Decimal::ZERO),
            payment_count,
            is_vacancy: source == SollSource::Vacancy,
        }
    }
}
