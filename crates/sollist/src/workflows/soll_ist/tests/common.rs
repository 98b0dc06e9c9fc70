use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::workflows::soll_ist::domain::{
    Invoice, Payment, Portfolio, Property, Tenant, Unit, VatRates,
};
use crate::workflows::soll_ist::period::Period;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn q1() -> Period {
    Period::new(2025, 1, 3).expect("valid period")
}

pub(super) fn property(id: &str, name: &str) -> Property {
    Property {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub(super) fn unit(id: &str, property_id: &str) -> Unit {
    Unit {
        id: id.to_string(),
        property_id: property_id.to_string(),
        label: format!("Top {}", id.trim_start_matches('u')),
    }
}

/// Contract of 800 rent, 150 BK and 100 HK advance, running since 2024.
pub(super) fn tenant(id: &str, unit_id: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        unit_id: unit_id.to_string(),
        name: id.to_string(),
        grundmiete: dec!(800),
        bk_vorschuss: dec!(150),
        hk_vorschuss: dec!(100),
        mietbeginn: Some(date(2024, 1, 1)),
        mietende: None,
        deleted_at: None,
    }
}

/// 110 BK + 60 HK + 330 Miete gross, billed as 500.
pub(super) fn invoice(id: &str, tenant_id: &str, month: u32) -> Invoice {
    Invoice {
        id: id.to_string(),
        tenant_id: Some(tenant_id.to_string()),
        unit_id: None,
        year: 2025,
        month,
        grundmiete: dec!(300),
        betriebskosten: dec!(100),
        heizungskosten: dec!(50),
        vat: VatRates::default(),
        gesamtbetrag: dec!(500),
        is_vacancy: false,
        paid_amount: Decimal::ZERO,
    }
}

pub(super) fn vacancy_invoice(id: &str, unit_id: &str, month: u32, paid: Decimal) -> Invoice {
    Invoice {
        id: id.to_string(),
        tenant_id: None,
        unit_id: Some(unit_id.to_string()),
        year: 2025,
        month,
        grundmiete: Decimal::ZERO,
        betriebskosten: dec!(100),
        heizungskosten: dec!(50),
        vat: VatRates::default(),
        gesamtbetrag: dec!(170),
        is_vacancy: true,
        paid_amount: paid,
    }
}

pub(super) fn payment(id: &str, tenant_id: &str, amount: Decimal, on: NaiveDate) -> Payment {
    Payment {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        amount,
        date: on,
    }
}

/// Two properties covering every path through the pipeline:
///
/// - `anna` (u1): three invoices of 500, pays 1600 (overpaid by 100)
/// - `bernd` (u2): no invoices, contract fallback, pays 1000
/// - `clara` (u3): three invoices of 500, pays 400 inside the period
/// - `dora` (u3): tenancy ended in 2024, excluded
/// - `emil` (u2): soft-deleted, excluded
/// - `felix` (u5, second property): pays exactly 1500
/// - u4: vacant, two vacancy invoices of 170, owner settled one
pub(super) fn sample_portfolio() -> Portfolio {
    let mut dora = tenant("dora", "u3");
    dora.mietbeginn = Some(date(2022, 1, 1));
    dora.mietende = Some(date(2024, 12, 31));

    let mut emil = tenant("emil", "u2");
    emil.deleted_at = date(2025, 2, 1).and_hms_opt(9, 0, 0);

    Portfolio {
        properties: vec![
            property("p1", "Lindengasse 4"),
            property("p2", "Hauptplatz 9"),
        ],
        units: vec![
            unit("u1", "p1"),
            unit("u2", "p1"),
            unit("u3", "p1"),
            unit("u4", "p1"),
            unit("u5", "p2"),
        ],
        tenants: vec![
            tenant("anna", "u1"),
            tenant("bernd", "u2"),
            tenant("clara", "u3"),
            dora,
            emil,
            tenant("felix", "u5"),
        ],
        invoices: vec![
            invoice("a-1", "anna", 1),
            invoice("a-2", "anna", 2),
            invoice("a-3", "anna", 3),
            invoice("c-1", "clara", 1),
            invoice("c-2", "clara", 2),
            invoice("c-3", "clara", 3),
            invoice("c-4", "clara", 4),
            invoice("d-1", "dora", 1),
            vacancy_invoice("v-1", "u4", 1, dec!(170)),
            vacancy_invoice("v-2", "u4", 2, Decimal::ZERO),
            invoice("f-1", "felix", 1),
            invoice("f-2", "felix", 2),
            invoice("f-3", "felix", 3),
        ],
        payments: vec![
            payment("pa-1", "anna", dec!(500), date(2025, 1, 3)),
            payment("pa-2", "anna", dec!(500), date(2025, 2, 3)),
            payment("pa-3", "anna", dec!(600), date(2025, 3, 3)),
            payment("pb-1", "bernd", dec!(1000), date(2025, 1, 15)),
            payment("pc-1", "clara", dec!(400), date(2025, 2, 1)),
            payment("pc-2", "clara", dec!(500), date(2025, 4, 2)),
            payment("pd-1", "dora", dec!(500), date(2025, 1, 5)),
            payment("pf-1", "felix", dec!(1500), date(2025, 3, 28)),
        ],
    }
}
