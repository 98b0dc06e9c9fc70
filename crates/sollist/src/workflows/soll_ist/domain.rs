use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Amounts closer than one cent are treated as equal.
pub const TOLERANCE: Decimal = dec!(0.01);

/// Cost buckets a tenant liability is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBucket {
    Betriebskosten,
    Heizkosten,
    Miete,
}

impl CostBucket {
    /// MRG payment priority: operating costs, then heating, then base rent.
    pub const fn statutory_order() -> [Self; 3] {
        [Self::Betriebskosten, Self::Heizkosten, Self::Miete]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Betriebskosten => "BK",
            Self::Heizkosten => "HK",
            Self::Miete => "Miete",
        }
    }
}

/// VAT percentages per cost bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatRates {
    pub betriebskosten: Decimal,
    pub heizungskosten: Decimal,
    pub miete: Decimal,
}

impl VatRates {
    pub fn rate(&self, bucket: CostBucket) -> Decimal {
        match bucket {
            CostBucket::Betriebskosten => self.betriebskosten,
            CostBucket::Heizkosten => self.heizungskosten,
            CostBucket::Miete => self.miete,
        }
    }

    /// Gross amount of `net` in `bucket`.
    pub fn gross(&self, bucket: CostBucket, net: Decimal) -> Decimal {
        net * (Decimal::ONE + self.rate(bucket) / dec!(100))
    }
}

impl Default for VatRates {
    fn default() -> Self {
        Self {
            betriebskosten: dec!(10),
            heizungskosten: dec!(20),
            miete: dec!(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: String,
    pub property_id: String,
    pub label: String,
}

/// Tenancy contract as read from the tenancy module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tenant {
    pub id: String,
    pub unit_id: String,
    pub name: String,
    pub grundmiete: Decimal,
    pub bk_vorschuss: Decimal,
    pub hk_vorschuss: Decimal,
    pub mietbeginn: Option<NaiveDate>,
    pub mietende: Option<NaiveDate>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Tenant {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A Vorschreibung: one billed month for a tenant, or for a vacant unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: String,
    pub tenant_id: Option<String>,
    pub unit_id: Option<String>,
    pub year: i32,
    pub month: u32,
    pub grundmiete: Decimal,
    pub betriebskosten: Decimal,
    pub heizungskosten: Decimal,
    pub vat: VatRates,
    /// Authoritative gross total.
    pub gesamtbetrag: Decimal,
    pub is_vacancy: bool,
    /// Owner-side settlement of a vacancy invoice.
    pub paid_amount: Decimal,
}

impl Invoice {
    pub fn net(&self, bucket: CostBucket) -> Decimal {
        match bucket {
            CostBucket::Betriebskosten => self.betriebskosten,
            CostBucket::Heizkosten => self.heizungskosten,
            CostBucket::Miete => self.grundmiete,
        }
    }

    pub fn gross(&self, bucket: CostBucket) -> Decimal {
        self.vat.gross(bucket, self.net(bucket))
    }
}

/// A payment already attributed to a tenant upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Canonical, already-scoped input collections for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Portfolio {
    pub properties: Vec<Property>,
    pub units: Vec<Unit>,
    pub tenants: Vec<Tenant>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
}
