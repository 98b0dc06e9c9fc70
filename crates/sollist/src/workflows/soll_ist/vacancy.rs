use super::allocation::split_proportionally;
use super::domain::{Invoice, Unit};
use super::eligibility::Scope;
use super::period::Period;
use super::report::{ResultIdentity, Settlement, TenantSollIstResult};
use super::soll::{vacancy_soll, SollSource};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// One aggregate result per vacant unit, in order of first invoice.
pub(crate) fn settle_vacancies(
    invoices: &[Invoice],
    scope: &Scope<'_>,
    period: &Period,
) -> Vec<TenantSollIstResult> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&Invoice>> = HashMap::new();

    for invoice in invoices
        .iter()
        .filter(|invoice| invoice.is_vacancy && period.contains_month(invoice.year, invoice.month))
    {
        let Some(unit_id) = invoice.unit_id.as_deref() else {
            continue;
        };
        if scope.unit(unit_id).is_none() {
            debug!(invoice = %invoice.id, unit = unit_id, "vacancy invoice outside property scope");
            continue;
        }
        grouped
            .entry(unit_id)
            .or_insert_with(|| {
                order.push(unit_id);
                Vec::new()
            })
            .push(invoice);
    }

    order
        .into_iter()
        .filter_map(|unit_id| {
            let unit = scope.unit(unit_id)?;
            let invoices = grouped.get(unit_id)?;
            Some(settle_unit(unit, invoices, scope))
        })
        .collect()
}

fn settle_unit(unit: &Unit, invoices: &[&Invoice], scope: &Scope<'_>) -> TenantSollIstResult {
    let soll = vacancy_soll(invoices.iter().copied());
    let haben_betrag: Decimal = invoices.iter().map(|invoice| invoice.paid_amount).sum();
    let payment_count = invoices
        .iter()
        .filter(|invoice| invoice.paid_amount > Decimal::ZERO)
        .count();

    Settlement {
        identity: ResultIdentity {
            tenant_id: format!("vacancy-{}", unit.id),
            tenant_name: vacancy_label(invoices.len()),
            unit_id: unit.id.clone(),
            unit_label: unit.label.clone(),
            property_id: unit.property_id.clone(),
            property_name: scope.property_name(&unit.property_id),
        },
        source: SollSource::Vacancy,
        invoice_count: invoices.len(),
        soll,
        allocation: split_proportionally(&soll, haben_betrag),
        haben_betrag,
        payment_count,
    }
    .into()
}

fn vacancy_label(invoice_count: usize) -> String {
    if invoice_count == 1 {
        "Leerstand (1 Vorschreibung)".to_string()
    } else {
        format!("Leerstand ({invoice_count} Vorschreibungen)")
    }
}
