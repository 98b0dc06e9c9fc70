use super::allocation::allocate;
use super::domain::{Invoice, Portfolio};
use super::eligibility::{self, EligibleTenant, Scope};
use super::payments::{aggregate_payments, PaymentTotals};
use super::period::Period;
use super::report::{ResultIdentity, Settlement, SollIstReport, SollIstTotals, TenantSollIstResult};
use super::soll::{contract_soll, invoice_soll, SollSource};
use super::vacancy::settle_vacancies;
use std::collections::HashMap;
use tracing::{debug, info, info_span};

/// SOLL/IST computation for one period and optional property.
///
/// Holds no state between runs; `compute` only reads the portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SollIstEngine {
    period: Period,
    property_id: Option<String>,
}

impl SollIstEngine {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            property_id: None,
        }
    }

    pub fn for_property(mut self, property_id: impl Into<String>) -> Self {
        self.property_id = Some(property_id.into());
        self
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn property_id(&self) -> Option<&str> {
        self.property_id.as_deref()
    }

    pub fn compute(&self, portfolio: &Portfolio) -> SollIstReport {
        let span = info_span!(
            "soll_ist",
            period = %self.period.label(),
            property = self.property_id().unwrap_or("*")
        );
        let _entered = span.enter();

        let scope = Scope::build(portfolio, self.property_id());
        let tenants = eligibility::eligible_tenants(&portfolio.tenants, &scope, &self.period);
        let invoices = tenant_invoices(&portfolio.invoices, &self.period);
        let payments = aggregate_payments(&portfolio.payments, &self.period);

        let mut results: Vec<TenantSollIstResult> = tenants
            .iter()
            .map(|entry| {
                let tenant_id = entry.tenant.id.as_str();
                self.settle_tenant(
                    entry,
                    invoices.get(tenant_id).map(Vec::as_slice).unwrap_or_default(),
                    payments.get(tenant_id).copied().unwrap_or_default(),
                    &scope,
                )
            })
            .collect();
        results.extend(settle_vacancies(&portfolio.invoices, &scope, &self.period));

        let totals = SollIstTotals::aggregate(&results);
        info!(
            tenants = totals.tenant_count,
            vacancies = totals.vacancy_count,
            soll = %totals.soll_gesamt,
            haben = %totals.haben_betrag,
            saldo = %totals.saldo,
            "computed SOLL/IST"
        );

        SollIstReport {
            period: self.period,
            property_id: self.property_id.clone(),
            results,
            totals,
        }
    }

    fn settle_tenant(
        &self,
        entry: &EligibleTenant<'_>,
        invoices: &[&Invoice],
        payments: PaymentTotals,
        scope: &Scope<'_>,
    ) -> TenantSollIstResult {
        let EligibleTenant { tenant, unit } = *entry;

        let (source, soll) = if invoices.is_empty() {
            debug!(tenant = %tenant.id, "no invoices in period, projecting SOLL from contract");
            (
                SollSource::Contract,
                contract_soll(tenant, self.period.month_count()),
            )
        } else {
            (SollSource::Invoices, invoice_soll(invoices.iter().copied()))
        };

        Settlement {
            identity: ResultIdentity {
                tenant_id: tenant.id.clone(),
                tenant_name: tenant.name.clone(),
                unit_id: unit.id.clone(),
                unit_label: unit.label.clone(),
                property_id: unit.property_id.clone(),
                property_name: scope.property_name(&unit.property_id),
            },
            source,
            invoice_count: invoices.len(),
            soll,
            allocation: allocate(&soll, payments.haben),
            haben_betrag: payments.haben,
            payment_count: payments.count,
        }
        .into()
    }
}

/// Non-vacancy invoices in the period, keyed by tenant id.
fn tenant_invoices<'a>(
    invoices: &'a [Invoice],
    period: &Period,
) -> HashMap<&'a str, Vec<&'a Invoice>> {
    let mut grouped: HashMap<&str, Vec<&Invoice>> = HashMap::new();
    for invoice in invoices
        .iter()
        .filter(|invoice| !invoice.is_vacancy && period.contains_month(invoice.year, invoice.month))
    {
        if let Some(tenant_id) = invoice.tenant_id.as_deref() {
            grouped.entry(tenant_id).or_default().push(invoice);
        }
    }
    grouped
}
