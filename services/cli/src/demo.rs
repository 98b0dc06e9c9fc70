use crate::infra::parse_format;
use crate::render::print_report;
use clap::Args;
use serde_json::{json, Value};
use sollist::config::{AppConfig, OutputFormat};
use sollist::error::AppError;
use sollist::workflows::soll_ist::{Period, Portfolio, PortfolioSnapshot, SollIstEngine};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Year of the sample portfolio; the first quarter is reported
    #[arg(long, default_value_t = 2025)]
    pub(crate) year: i32,
    /// Output format: text or json (defaults to SOLLIST_OUTPUT)
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<OutputFormat>,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let period = Period::quarter(args.year, 1)?;
    let portfolio = demo_portfolio(args.year)?;
    let report = SollIstEngine::new(period).compute(&portfolio);

    println!("Sample portfolio: invoice-backed, contract fallback and vacancy paths\n");
    print_report(&report, args.format.unwrap_or(config.report.output), true)
}

/// Built from a raw snapshot so the demo also exercises the ingestion adapter.
pub(crate) fn demo_portfolio(year: i32) -> Result<Portfolio, AppError> {
    let snapshot: PortfolioSnapshot = serde_json::from_value(demo_snapshot(year))?;
    Ok(snapshot.normalize()?)
}

fn demo_snapshot(year: i32) -> Value {
    let invoice = |id: &str, tenant: &str, month: u32, total: &str| {
        json!({
            "id": id, "tenantId": tenant, "year": year, "month": month,
            "grundmiete": 620, "betriebskosten": 140, "heizungskosten": 60,
            "gesamtbetrag": total
        })
    };
    let vacancy = |id: &str, month: u32, paid: u32| {
        json!({
            "id": id, "unitId": "u-4", "year": year, "month": month, "isVacancy": true,
            "betriebskosten": 95, "heizungskosten": 40, "gesamtbetrag": "152.50",
            "paidAmount": paid
        })
    };
    let paid_on = |month: u32, day: u32| format!("{year}-{month:02}-{day:02}");

    json!({
        "properties": [
            {"id": "p-linden", "name": "Lindengasse 4"},
            {"id": "p-haupt", "name": "Hauptplatz 9"}
        ],
        "units": [
            {"id": "u-1", "propertyId": "p-linden", "topNummer": "Top 1"},
            {"id": "u-2", "propertyId": "p-linden", "topNummer": "Top 2"},
            {"id": "u-3", "propertyId": "p-linden", "topNummer": "Top 3"},
            {"id": "u-4", "propertyId": "p-linden", "topNummer": "Top 4"},
            {"id": "u-5", "propertyId": "p-haupt", "topNummer": "Top 1"}
        ],
        "tenants": [
            {"id": "t-berger", "unitId": "u-1", "firstName": "Anna", "lastName": "Berger",
             "grundmiete": 620, "bkVorschuss": 140, "hkVorschuss": 60, "mietbeginn": "2021-03-01"},
            {"id": "t-novak", "unitId": "u-2", "firstName": "Petra", "lastName": "Novak",
             "grundmiete": 800, "bkVorschuss": 150, "hkVorschuss": 100, "mietbeginn": format!("{year}-01-01")},
            {"id": "t-steiner", "unit_id": "u-3", "first_name": "Karl", "last_name": "Steiner",
             "grundmiete": 620, "bk_vorschuss": 140, "hk_vorschuss": 60, "mietbeginn": "2019-09-01"},
            {"id": "t-moser", "unitId": "u-4", "firstName": "Eva", "lastName": "Moser",
             "grundmiete": 540, "mietbeginn": "2018-01-01", "mietende": format!("{}-12-31", year - 1)},
            {"id": "t-wagner", "unitId": "u-5", "firstName": "Lukas", "lastName": "Wagner",
             "grundmiete": 710, "bkVorschuss": 130, "hkVorschuss": 55, "mietbeginn": "2022-05-01"}
        ],
        "invoices": [
            invoice("inv-b1", "t-berger", 1, "916.00"),
            invoice("inv-b2", "t-berger", 2, "916.00"),
            invoice("inv-b3", "t-berger", 3, "916.00"),
            invoice("inv-s1", "t-steiner", 1, "916.00"),
            invoice("inv-s2", "t-steiner", 2, "916.00"),
            invoice("inv-s3", "t-steiner", 3, "925.00"),
            vacancy("inv-v1", 1, 150),
            vacancy("inv-v2", 2, 0),
            vacancy("inv-v3", 3, 0)
        ],
        "payments": [
            {"id": "pay-1", "tenantId": "t-berger", "amount": 916, "date": paid_on(1, 3)},
            {"id": "pay-2", "tenantId": "t-berger", "amount": 916, "date": paid_on(2, 3)},
            {"id": "pay-3", "tenantId": "t-berger", "amount": 1000, "date": paid_on(3, 4)},
            {"id": "pay-4", "tenantId": "t-novak", "amount": "1500.00", "date": paid_on(2, 10)},
            {"id": "pay-5", "tenant_id": "t-steiner", "betrag": 450, "paymentDate": paid_on(1, 28)},
            {"id": "pay-6", "tenantId": "t-wagner", "amount": 2837.50, "date": paid_on(3, 30)}
        ]
    })
}
