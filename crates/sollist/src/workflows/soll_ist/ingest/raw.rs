use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawProperty {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawUnit {
    pub id: Option<String>,
    pub property_id: Option<String>,
    pub top_nummer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawTenant {
    pub id: Option<String>,
    pub unit_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub grundmiete: Option<Decimal>,
    pub bk_vorschuss: Option<Decimal>,
    pub hk_vorschuss: Option<Decimal>,
    pub mietbeginn: Option<String>,
    pub mietende: Option<String>,
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawInvoice {
    pub id: Option<String>,
    pub tenant_id: Option<String>,
    pub unit_id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub grundmiete: Option<Decimal>,
    pub betriebskosten: Option<Decimal>,
    pub heizungskosten: Option<Decimal>,
    pub ust_satz_bk: Option<Decimal>,
    pub ust_satz_heizung: Option<Decimal>,
    pub ust_satz_miete: Option<Decimal>,
    pub gesamtbetrag: Option<Decimal>,
    pub is_vacancy: Option<bool>,
    pub paid_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawPayment {
    pub id: Option<String>,
    pub tenant_id: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<String>,
}

impl From<Map<String, Value>> for RawProperty {
    fn from(map: Map<String, Value>) -> Self {
        let record = Record(&map);
        Self {
            id: record.string(&["id"]),
            name: record.string(&["name", "bezeichnung"]),
        }
    }
}

impl From<Map<String, Value>> for RawUnit {
    fn from(map: Map<String, Value>) -> Self {
        let record = Record(&map);
        Self {
            id: record.string(&["id"]),
            property_id: record.string(&["property_id", "propertyId"]),
            top_nummer: record.string(&["top_nummer", "topNummer"]),
        }
    }
}

impl From<Map<String, Value>> for RawTenant {
    fn from(map: Map<String, Value>) -> Self {
        let record = Record(&map);
        Self {
            id: record.string(&["id"]),
            unit_id: record.string(&["unit_id", "unitId"]),
            first_name: record.string(&["first_name", "firstName"]),
            last_name: record.string(&["last_name", "lastName"]),
            grundmiete: record.decimal(&["grundmiete"]),
            bk_vorschuss: record.decimal(&["bk_vorschuss", "bkVorschuss"]),
            hk_vorschuss: record.decimal(&["hk_vorschuss", "hkVorschuss"]),
            mietbeginn: record.string(&["mietbeginn"]),
            mietende: record.string(&["mietende"]),
            deleted_at: record.string(&["deleted_at", "deletedAt"]),
        }
    }
}

impl From<Map<String, Value>> for RawInvoice {
    fn from(map: Map<String, Value>) -> Self {
        let record = Record(&map);
        Self {
            id: record.string(&["id"]),
            tenant_id: record.string(&["tenant_id", "tenantId"]),
            unit_id: record.string(&["unit_id", "unitId"]),
            year: record.integer(&["year"]),
            month: record.integer(&["month"]),
            grundmiete: record.decimal(&["grundmiete"]),
            betriebskosten: record.decimal(&["betriebskosten"]),
            heizungskosten: record.decimal(&["heizungskosten"]),
            ust_satz_bk: record.decimal(&["ust_satz_bk", "ustSatzBk"]),
            ust_satz_heizung: record.decimal(&["ust_satz_heizung", "ustSatzHeizung"]),
            ust_satz_miete: record.decimal(&["ust_satz_miete", "ustSatzMiete"]),
            gesamtbetrag: record.decimal(&["gesamtbetrag", "gesamtBetrag"]),
            is_vacancy: record.flag(&["is_vacancy", "isVacancy"]),
            paid_amount: record.decimal(&["paid_amount", "paidAmount"]),
        }
    }
}

impl From<Map<String, Value>> for RawPayment {
    fn from(map: Map<String, Value>) -> Self {
        let record = Record(&map);
        Self {
            id: record.string(&["id"]),
            tenant_id: record.string(&["tenant_id", "tenantId"]),
            amount: record.decimal(&["amount", "betrag"]),
            date: record.string(&["date", "paymentDate", "buchungsDatum", "buchungsdatum"]),
        }
    }
}

/// Field lookup over one storage record. Each field may appear under several
/// keys; the first key holding a usable value wins.
struct Record<'a>(&'a Map<String, Value>);

impl Record<'_> {
    fn pick<T>(&self, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(convert)
    }

    /// Strings or numbers (ids are sometimes numeric); blank strings are absent.
    fn string(&self, keys: &[&str]) -> Option<String> {
        self.pick(keys, |value| match value {
            Value::String(text) => Some(text.trim().to_string()).filter(|text| !text.is_empty()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    }

    fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        self.pick(keys, decimal_from_value)
    }

    /// Whole numbers given as integers, integral floats, or numeric strings.
    fn integer<T: TryFrom<i64>>(&self, keys: &[&str]) -> Option<T> {
        self.pick(keys, |value| {
            decimal_from_value(value)
                .filter(|number| number.fract().is_zero())
                .and_then(|number| number.to_i64())
                .and_then(|number| T::try_from(number).ok())
        })
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        self.pick(keys, |value| match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}

/// Accepts JSON numbers or numeric strings; anything else is absent.
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn decimals_accept_numbers_and_strings() {
        let invoice: RawInvoice = serde_json::from_value(json!({
            "grundmiete": 800.5,
            "betriebskosten": "150.25",
            "heizungskosten": "",
            "gesamtBetrag": 1e3,
            "paidAmount": null,
        }))
        .expect("invoice parses");

        assert_eq!(invoice.grundmiete, Some(dec!(800.5)));
        assert_eq!(invoice.betriebskosten, Some(dec!(150.25)));
        assert_eq!(invoice.heizungskosten, None);
        assert_eq!(invoice.gesamtbetrag, Some(dec!(1000)));
        assert_eq!(invoice.paid_amount, None);
    }

    #[test]
    fn malformed_numbers_degrade_to_absent() {
        let tenant: RawTenant = serde_json::from_value(json!({
            "id": 42,
            "grundmiete": "n/a",
            "bkVorschuss": true,
        }))
        .expect("tenant parses");

        assert_eq!(tenant.id.as_deref(), Some("42"));
        assert_eq!(tenant.grundmiete, None);
        assert_eq!(tenant.bk_vorschuss, None);
    }

    #[test]
    fn snake_and_camel_case_are_equivalent() {
        let camel: RawTenant = serde_json::from_value(json!({
            "unitId": "u1", "bkVorschuss": 150, "hkVorschuss": 100, "deletedAt": "2025-01-01"
        }))
        .expect("camel parses");
        let snake: RawTenant = serde_json::from_value(json!({
            "unit_id": "u1", "bk_vorschuss": 150, "hk_vorschuss": 100, "deleted_at": "2025-01-01"
        }))
        .expect("snake parses");

        assert_eq!(camel.unit_id, snake.unit_id);
        assert_eq!(camel.bk_vorschuss, snake.bk_vorschuss);
        assert_eq!(camel.hk_vorschuss, snake.hk_vorschuss);
        assert_eq!(camel.deleted_at, snake.deleted_at);
    }

    #[test]
    fn parse_datetime_supports_rfc3339_and_date_strings() {
        let rfc = parse_datetime("2025-03-31T22:30:00Z").expect("parse rfc");
        assert_eq!(rfc.date(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());

        let date = parse_date("2025-01-15").expect("parse date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

        assert!(parse_datetime("  ").is_none());
        assert!(parse_datetime("15.01.2025").is_none());
    }

    #[test]
    fn record_with_both_spellings_takes_first_usable_key() {
        let unit: RawUnit = serde_json::from_value(json!({
            "id": "u1", "propertyId": "p1", "property_id": "p1", "topNummer": "Top 1", "top_nummer": ""
        }))
        .expect("unit parses");
        assert_eq!(unit.property_id.as_deref(), Some("p1"));
        assert_eq!(unit.top_nummer.as_deref(), Some("Top 1"));

        let payment: RawPayment = serde_json::from_value(json!({
            "id": "pay1", "tenant_id": null, "tenantId": "t1", "amount": "n/a", "betrag": 120
        }))
        .expect("payment parses");
        assert_eq!(payment.tenant_id.as_deref(), Some("t1"));
        assert_eq!(payment.amount, Some(dec!(120)));
    }

    #[test]
    fn billing_month_and_vacancy_flag_are_read_leniently() {
        let invoice: RawInvoice = serde_json::from_value(json!({
            "year": "2025", "month": 3.0, "isVacancy": "true"
        }))
        .expect("invoice parses");
        assert_eq!(invoice.year, Some(2025));
        assert_eq!(invoice.month, Some(3));
        assert_eq!(invoice.is_vacancy, Some(true));

        let malformed: RawInvoice = serde_json::from_value(json!({
            "year": "twenty", "month": -1, "is_vacancy": 1
        }))
        .expect("invoice parses");
        assert_eq!(malformed.year, None);
        assert_eq!(malformed.month, None);
        assert_eq!(malformed.is_vacancy, Some(true));

        let fractional: RawInvoice =
            serde_json::from_value(json!({"month": 2.5, "isVacancy": "maybe"})).expect("parses");
        assert_eq!(fractional.month, None);
        assert_eq!(fractional.is_vacancy, None);
    }
}
