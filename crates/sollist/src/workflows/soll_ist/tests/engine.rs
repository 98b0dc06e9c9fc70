use super::common::*;
use crate::workflows::soll_ist::domain::{Portfolio, VatRates, TOLERANCE};
use crate::workflows::soll_ist::soll::SollSource;
use crate::workflows::soll_ist::SollIstEngine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn run(portfolio: &Portfolio) -> crate::workflows::soll_ist::SollIstReport {
    SollIstEngine::new(q1()).compute(portfolio)
}

/// Single tenant billed 100 BK / 50 HK / 300 Miete without VAT.
fn single_tenant_paying(amount: Decimal) -> Portfolio {
    let mut billed = invoice("i-1", "t1", 1);
    billed.vat = VatRates {
        betriebskosten: Decimal::ZERO,
        heizungskosten: Decimal::ZERO,
        miete: Decimal::ZERO,
    };
    billed.gesamtbetrag = dec!(450);

    Portfolio {
        properties: vec![property("p1", "Lindengasse 4")],
        units: vec![unit("u1", "p1")],
        tenants: vec![tenant("t1", "u1")],
        invoices: vec![billed],
        payments: vec![payment("pay-1", "t1", amount, date(2025, 1, 20))],
    }
}

#[test]
fn results_follow_tenant_order_then_vacancies() {
    let report = run(&sample_portfolio());
    let ids: Vec<_> = report
        .results
        .iter()
        .map(|result| result.tenant_id.as_str())
        .collect();
    assert_eq!(ids, vec!["anna", "bernd", "clara", "felix", "vacancy-u4"]);
}

#[test]
fn underpayment_is_allocated_by_statutory_priority() {
    let report = run(&single_tenant_paying(dec!(120)));
    let result = report.result_for("t1").expect("tenant result");

    assert_eq!(result.soll_betrag, dec!(450));
    assert_eq!(result.ist_bk, dec!(100));
    assert_eq!(result.ist_hk, dec!(20));
    assert_eq!(result.ist_miete, dec!(0));
    assert_eq!(result.saldo, dec!(330));
    assert_eq!(result.ueberzahlung, Decimal::ZERO);
    assert_eq!(result.diff_hk, dec!(30));
    assert_eq!(result.diff_gesamt, dec!(330));
}

#[test]
fn overpayment_is_reported_only_in_aggregate() {
    let report = run(&single_tenant_paying(dec!(500)));
    let result = report.result_for("t1").expect("tenant result");

    assert_eq!(result.ist_bk, dec!(100));
    assert_eq!(result.ist_hk, dec!(50));
    assert_eq!(result.ist_miete, dec!(300));
    assert_eq!(result.saldo, dec!(-50));
    assert_eq!(result.ueberzahlung, dec!(50));
    assert_eq!(result.diff_gesamt, Decimal::ZERO);
}

#[test]
fn sample_portfolio_covers_every_soll_path() {
    let report = run(&sample_portfolio());

    let anna = report.result_for("anna").expect("anna");
    assert_eq!(anna.soll_source, SollSource::Invoices);
    assert_eq!(anna.invoice_count, 3);
    assert_eq!(
        (anna.soll_bk, anna.soll_hk, anna.soll_miete),
        (dec!(330), dec!(180), dec!(990))
    );
    assert_eq!(anna.haben_betrag, dec!(1600));
    assert_eq!(anna.payment_count, 3);
    assert_eq!(anna.ueberzahlung, dec!(100));

    let bernd = report.result_for("bernd").expect("bernd");
    assert_eq!(bernd.soll_source, SollSource::Contract);
    assert_eq!(bernd.soll_betrag, dec!(3495.00));
    assert_eq!(bernd.ist_bk, dec!(495.00));
    assert_eq!(bernd.ist_hk, dec!(360.00));
    assert_eq!(bernd.ist_miete, dec!(145.00));
    assert_eq!(bernd.saldo, dec!(2495.00));

    let clara = report.result_for("clara").expect("clara");
    assert_eq!(clara.invoice_count, 3, "April invoice is outside the period");
    assert_eq!(clara.haben_betrag, dec!(400));
    assert_eq!(clara.payment_count, 1);
    assert_eq!(
        (clara.ist_bk, clara.ist_hk, clara.ist_miete),
        (dec!(330), dec!(70), dec!(0))
    );

    let felix = report.result_for("felix").expect("felix");
    assert_eq!(felix.saldo, Decimal::ZERO);
    assert_eq!(felix.property_name, "Hauptplatz 9");

    let vacancy = report.result_for("vacancy-u4").expect("vacancy");
    assert!(vacancy.is_vacancy);
    assert_eq!(vacancy.soll_betrag, dec!(340));
    assert_eq!((vacancy.ist_bk, vacancy.ist_hk), (dec!(110), dec!(60)));
    assert_eq!(vacancy.unit_label, "Top 4");

    assert!(report.result_for("dora").is_none());
    assert!(report.result_for("emil").is_none());
}

#[test]
fn totals_foot_to_the_result_list() {
    let report = run(&sample_portfolio());
    let totals = &report.totals;

    assert_eq!(totals.soll_gesamt, dec!(8335));
    assert_eq!(totals.haben_betrag, dec!(4670));
    assert_eq!(totals.saldo, dec!(3665));
    assert_eq!(totals.ueberzahlung, dec!(100));
    assert_eq!(totals.ist_gesamt, dec!(4570));
    assert_eq!(totals.diff_gesamt, dec!(3765));
    assert_eq!(
        totals.soll_bk + totals.soll_hk + totals.soll_miete,
        totals.soll_gesamt
    );
    assert_eq!(
        totals.diff_bk + totals.diff_hk + totals.diff_miete,
        totals.diff_gesamt
    );
    assert_eq!(totals.tenant_count, 4);
    assert_eq!(totals.vacancy_count, 1);
    assert_eq!(totals.payment_count, 7);
}

#[test]
fn every_result_satisfies_the_settlement_invariants() {
    let report = run(&sample_portfolio());

    for result in &report.results {
        let components = result.soll_bk + result.soll_hk + result.soll_miete;
        assert!((components - result.soll_betrag).abs() < TOLERANCE, "{}", result.tenant_id);
        assert!(result.ist_bk <= result.soll_bk);
        assert!(result.ist_hk <= result.soll_hk);
        assert!(result.ist_miete <= result.soll_miete);
        assert_eq!(result.saldo, result.soll_betrag - result.haben_betrag);
        assert!(result.saldo <= Decimal::ZERO || result.ueberzahlung.is_zero());
        if result.is_vacancy {
            assert_eq!(result.soll_miete, Decimal::ZERO);
            assert_eq!(result.ist_miete, Decimal::ZERO);
        }
    }
}

#[test]
fn property_scope_limits_tenants_and_vacancies() {
    let report = SollIstEngine::new(q1())
        .for_property("p2")
        .compute(&sample_portfolio());

    assert_eq!(report.property_id.as_deref(), Some("p2"));
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].tenant_id, "felix");
    assert_eq!(report.totals.vacancy_count, 0);
}

#[test]
fn repeated_runs_are_identical() {
    let portfolio = sample_portfolio();
    let engine = SollIstEngine::new(q1());

    let first = engine.compute(&portfolio);
    let second = engine.compute(&portfolio);
    assert_eq!(first, second);
}

#[test]
fn summary_orders_arrears_and_groups_properties() {
    let summary = run(&sample_portfolio()).summary();

    assert_eq!(summary.period, "2025-01..2025-03");
    assert_eq!(summary.result_count, 5);
    assert_eq!(summary.arrears_count, 3);
    assert_eq!(summary.overpaid_count, 1);
    assert_eq!(summary.settled_count, 1);
    assert_eq!(summary.collection_rate, dec!(0.5483));

    let arrears: Vec<_> = summary
        .arrears
        .iter()
        .map(|entry| (entry.tenant_id.as_str(), entry.saldo))
        .collect();
    assert_eq!(
        arrears,
        vec![
            ("bernd", dec!(2495.00)),
            ("clara", dec!(1100)),
            ("vacancy-u4", dec!(170)),
        ]
    );

    let properties: Vec<_> = summary
        .properties
        .iter()
        .map(|subtotal| (subtotal.property_id.as_str(), subtotal.totals.soll_gesamt))
        .collect();
    assert_eq!(properties, vec![("p1", dec!(6835)), ("p2", dec!(1500))]);
}

#[test]
fn empty_portfolio_yields_empty_report() {
    let report = run(&Portfolio::default());
    assert!(report.results.is_empty());
    assert_eq!(report.totals.result_count(), 0);
    assert_eq!(report.totals.collection_rate(), Decimal::ZERO);
}

#[test]
fn vacancy_invoices_are_reported_even_when_the_unit_is_let() {
    let mut portfolio = sample_portfolio();
    portfolio
        .invoices
        .push(vacancy_invoice("v-u1", "u1", 1, Decimal::ZERO));

    let report = run(&portfolio);
    let anna = report.result_for("anna").expect("anna");
    assert_eq!(anna.soll_betrag, dec!(1500));
    assert_eq!(anna.invoice_count, 3);

    let vacancy = report.result_for("vacancy-u1").expect("vacancy of let unit");
    assert_eq!(vacancy.soll_betrag, dec!(170));
    assert_eq!(vacancy.unit_label, "Top 1");
    assert_eq!(vacancy.tenant_name, "Leerstand (1 Vorschreibung)");

    let ids: Vec<_> = report
        .vacancy_results()
        .map(|result| result.tenant_id.as_str())
        .collect();
    assert_eq!(ids, vec!["vacancy-u4", "vacancy-u1"]);
}
