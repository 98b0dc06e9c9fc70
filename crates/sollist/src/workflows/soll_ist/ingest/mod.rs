//! Boundary adapter between storage snapshots and the canonical schema.
//!
//! Raw records accept either naming convention and may omit any numeric
//! field. Normalization applies the zero default and the VAT defaults once,
//! so later stages never see an optional amount.

mod raw;

pub use raw::{RawInvoice, RawPayment, RawProperty, RawTenant, RawUnit};

use super::domain::{Invoice, Payment, Portfolio, Property, Tenant, Unit, VatRates};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Property,
    Unit,
    Tenant,
    Invoice,
    Payment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Property => "property",
            RecordKind::Unit => "unit",
            RecordKind::Tenant => "tenant",
            RecordKind::Invoice => "invoice",
            RecordKind::Payment => "payment",
        };
        f.write_str(label)
    }
}

/// Malformed input collections. Missing amounts are never an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("{kind} at position {index} has no id")]
    MissingIdentity { kind: RecordKind, index: usize },
    #[error("{kind} {id} is missing required field `{field}`")]
    MissingField {
        kind: RecordKind,
        id: String,
        field: &'static str,
    },
    #[error("{kind} {id} has unparsable date `{value}` in `{field}`")]
    InvalidDate {
        kind: RecordKind,
        id: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read portfolio snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid portfolio snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("portfolio snapshot rejected: {0}")]
    Ingest(#[from] IngestError),
}

/// Collections exactly as delivered by the storage collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioSnapshot {
    pub properties: Vec<RawProperty>,
    pub units: Vec<RawUnit>,
    pub tenants: Vec<RawTenant>,
    pub invoices: Vec<RawInvoice>,
    pub payments: Vec<RawPayment>,
}

impl PortfolioSnapshot {
    pub fn normalize(self) -> Result<Portfolio, IngestError> {
        let properties = self
            .properties
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_property(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let units = self
            .units
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_unit(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let tenants = self
            .tenants
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_tenant(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let invoices = self
            .invoices
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_invoice(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let payments = self
            .payments
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_payment(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            properties = properties.len(),
            units = units.len(),
            tenants = tenants.len(),
            invoices = invoices.len(),
            payments = payments.len(),
            "normalized portfolio snapshot"
        );

        Ok(Portfolio {
            properties,
            units,
            tenants,
            invoices,
            payments,
        })
    }
}

pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Portfolio, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Portfolio, SnapshotError> {
        let snapshot: PortfolioSnapshot = serde_json::from_reader(reader)?;
        Ok(snapshot.normalize()?)
    }
}

fn require_id(kind: RecordKind, index: usize, id: Option<String>) -> Result<String, IngestError> {
    id.ok_or(IngestError::MissingIdentity { kind, index })
}

fn require<T>(
    kind: RecordKind,
    id: &str,
    field: &'static str,
    value: Option<T>,
) -> Result<T, IngestError> {
    value.ok_or_else(|| IngestError::MissingField {
        kind,
        id: id.to_string(),
        field,
    })
}

fn optional_date<T>(
    kind: RecordKind,
    id: &str,
    field: &'static str,
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, IngestError> {
    match value {
        None => Ok(None),
        Some(value) => match parse(&value) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(IngestError::InvalidDate {
                kind,
                id: id.to_string(),
                field,
                value,
            }),
        },
    }
}

fn normalize_property(index: usize, raw: RawProperty) -> Result<Property, IngestError> {
    let id = require_id(RecordKind::Property, index, raw.id)?;
    let name = raw.name.unwrap_or_else(|| id.clone());
    Ok(Property { id, name })
}

fn normalize_unit(index: usize, raw: RawUnit) -> Result<Unit, IngestError> {
    let id = require_id(RecordKind::Unit, index, raw.id)?;
    let property_id = require(RecordKind::Unit, &id, "property_id", raw.property_id)?;
    let label = raw.top_nummer.unwrap_or_else(|| id.clone());
    Ok(Unit {
        id,
        property_id,
        label,
    })
}

fn normalize_tenant(index: usize, raw: RawTenant) -> Result<Tenant, IngestError> {
    let kind = RecordKind::Tenant;
    let id = require_id(kind, index, raw.id)?;
    let unit_id = require(kind, &id, "unit_id", raw.unit_id)?;
    let name = match (raw.first_name, raw.last_name) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(name), None) | (None, Some(name)) => name,
        (None, None) => id.clone(),
    };
    let mietbeginn = optional_date(kind, &id, "mietbeginn", raw.mietbeginn, raw::parse_date)?;
    let mietende = optional_date(kind, &id, "mietende", raw.mietende, raw::parse_date)?;
    let deleted_at = optional_date(kind, &id, "deleted_at", raw.deleted_at, raw::parse_datetime)?;

    Ok(Tenant {
        id,
        unit_id,
        name,
        grundmiete: raw.grundmiete.unwrap_or_default(),
        bk_vorschuss: raw.bk_vorschuss.unwrap_or_default(),
        hk_vorschuss: raw.hk_vorschuss.unwrap_or_default(),
        mietbeginn,
        mietende,
        deleted_at,
    })
}

fn normalize_invoice(index: usize, raw: RawInvoice) -> Result<Invoice, IngestError> {
    let kind = RecordKind::Invoice;
    let id = require_id(kind, index, raw.id)?;
    if raw.year.is_none() || raw.month.is_none() {
        debug!(invoice = %id, "invoice has no usable billing month and matches no period");
    }
    let is_vacancy = raw.is_vacancy.unwrap_or(false);

    if is_vacancy && raw.unit_id.is_none() {
        return Err(IngestError::MissingField {
            kind,
            id,
            field: "unit_id",
        });
    }
    if raw.tenant_id.is_none() && raw.unit_id.is_none() {
        return Err(IngestError::MissingField {
            kind,
            id,
            field: "tenant_id",
        });
    }

    let defaults = VatRates::default();
    let vat = VatRates {
        betriebskosten: raw.ust_satz_bk.unwrap_or(defaults.betriebskosten),
        heizungskosten: raw.ust_satz_heizung.unwrap_or(defaults.heizungskosten),
        miete: raw.ust_satz_miete.unwrap_or(defaults.miete),
    };

    Ok(Invoice {
        id,
        tenant_id: raw.tenant_id,
        unit_id: raw.unit_id,
        year: raw.year.unwrap_or_default(),
        month: raw.month.unwrap_or_default(),
        grundmiete: raw.grundmiete.unwrap_or_default(),
        betriebskosten: raw.betriebskosten.unwrap_or_default(),
        heizungskosten: raw.heizungskosten.unwrap_or_default(),
        vat,
        gesamtbetrag: raw.gesamtbetrag.unwrap_or_default(),
        is_vacancy,
        paid_amount: raw.paid_amount.unwrap_or_default(),
    })
}

fn normalize_payment(index: usize, raw: RawPayment) -> Result<Payment, IngestError> {
    let kind = RecordKind::Payment;
    let id = require_id(kind, index, raw.id)?;
    let tenant_id = require(kind, &id, "tenant_id", raw.tenant_id)?;
    let date = optional_date(kind, &id, "date", raw.date, raw::parse_date)?;
    let date = require(kind, &id, "date", date)?;

    Ok(Payment {
        id,
        tenant_id,
        amount: raw.amount.unwrap_or_default(),
        date,
    })
}
