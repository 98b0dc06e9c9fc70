use crate::infra::money;
use rust_decimal::Decimal;
use serde_json::json;
use sollist::config::OutputFormat;
use sollist::error::AppError;
use sollist::workflows::soll_ist::{CostBucket, SollIstReport, SollIstTotals};

pub(crate) fn print_report(
    report: &SollIstReport,
    format: OutputFormat,
    list_results: bool,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            let summary = report.summary();
            let payload = if list_results {
                json!({ "summary": summary, "results": report.results })
            } else {
                json!({ "summary": summary })
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => render_text(report, list_results),
    }
    Ok(())
}

fn render_text(report: &SollIstReport, list_results: bool) {
    let summary = report.summary();
    let totals = &summary.totals;

    match &summary.property_id {
        Some(property_id) => println!("SOLL/IST {} (property {})", summary.period, property_id),
        None => println!("SOLL/IST {}", summary.period),
    }
    println!(
        "- {} tenants | {} vacancies | collection rate {}%",
        totals.tenant_count,
        totals.vacancy_count,
        money(summary.collection_rate * Decimal::ONE_HUNDRED)
    );
    println!(
        "- SOLL {} | IST {} | Haben {} | Saldo {} | Überzahlung {}",
        money(totals.soll_gesamt),
        money(totals.ist_gesamt),
        money(totals.haben_betrag),
        money(totals.saldo),
        money(totals.ueberzahlung)
    );
    println!(
        "- {} in arrears | {} settled | {} overpaid",
        summary.arrears_count, summary.settled_count, summary.overpaid_count
    );

    println!("Buckets:");
    for bucket in CostBucket::statutory_order() {
        let (soll, ist, diff) = bucket_totals(totals, bucket);
        println!(
            "  - {:<6} SOLL {:>12} | IST {:>12} | Diff {:>12}",
            bucket.label(),
            money(soll),
            money(ist),
            money(diff)
        );
    }

    println!("Properties:");
    for subtotal in &summary.properties {
        println!(
            "  - {} ({}): SOLL {} | Haben {} | Saldo {}",
            subtotal.property_name,
            subtotal.property_id,
            money(subtotal.totals.soll_gesamt),
            money(subtotal.totals.haben_betrag),
            money(subtotal.totals.saldo)
        );
    }

    if summary.arrears.is_empty() {
        println!("Arrears: none");
    } else {
        println!("Arrears:");
        for entry in &summary.arrears {
            println!(
                "  - {} ({}, {}): {}",
                entry.tenant_name,
                entry.unit_label,
                entry.property_name,
                money(entry.saldo)
            );
        }
    }

    if !list_results {
        return;
    }

    println!("Results:");
    for result in &report.results {
        println!(
            "  - {} [{}] via {}: SOLL {} (BK {} / HK {} / Miete {}) | IST {} (BK {} / HK {} / Miete {}) | Saldo {} | {} payments",
            result.tenant_name,
            result.unit_label,
            result.soll_source.label(),
            money(result.soll_betrag),
            money(result.soll_bk),
            money(result.soll_hk),
            money(result.soll_miete),
            money(result.ist_gesamt()),
            money(result.ist_bk),
            money(result.ist_hk),
            money(result.ist_miete),
            money(result.saldo),
            result.payment_count
        );
    }
}

fn bucket_totals(totals: &SollIstTotals, bucket: CostBucket) -> (Decimal, Decimal, Decimal) {
    match bucket {
        CostBucket::Betriebskosten => (totals.soll_bk, totals.ist_bk, totals.diff_bk),
        CostBucket::Heizkosten => (totals.soll_hk, totals.ist_hk, totals.diff_hk),
        CostBucket::Miete => (totals.soll_miete, totals.ist_miete, totals.diff_miete),
    }
}
