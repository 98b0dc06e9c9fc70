use super::domain::{CostBucket, Invoice, Tenant, VatRates, TOLERANCE};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Where the SOLL of a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SollSource {
    Invoices,
    Contract,
    Vacancy,
}

impl SollSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invoices => "Vorschreibungen",
            Self::Contract => "Vertrag (Hochrechnung)",
            Self::Vacancy => "Leerstand",
        }
    }
}

/// Gross amount owed per bucket plus the billed total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SollBreakdown {
    pub bk: Decimal,
    pub hk: Decimal,
    pub miete: Decimal,
    pub betrag: Decimal,
}

impl SollBreakdown {
    pub fn from_components(bk: Decimal, hk: Decimal, miete: Decimal) -> Self {
        Self {
            bk,
            hk,
            miete,
            betrag: bk + hk + miete,
        }
    }

    pub fn get(&self, bucket: CostBucket) -> Decimal {
        match bucket {
            CostBucket::Betriebskosten => self.bk,
            CostBucket::Heizkosten => self.hk,
            CostBucket::Miete => self.miete,
        }
    }

    fn set(&mut self, bucket: CostBucket, value: Decimal) {
        match bucket {
            CostBucket::Betriebskosten => self.bk = value,
            CostBucket::Heizkosten => self.hk = value,
            CostBucket::Miete => self.miete = value,
        }
    }

    pub fn component_sum(&self) -> Decimal {
        self.bk + self.hk + self.miete
    }

    pub fn is_balanced(&self) -> bool {
        (self.component_sum() - self.betrag).abs() < TOLERANCE
    }

    /// Rescales the components so they foot to the billed total.
    ///
    /// The billed total is never touched. When there are no components to
    /// scale, the whole total is booked to `primary`.
    pub fn reconcile(self, primary: CostBucket) -> Self {
        if self.is_balanced() {
            return self;
        }

        let component_sum = self.component_sum();
        let mut reconciled = Self {
            betrag: self.betrag,
            ..Self::default()
        };

        if component_sum.is_zero() {
            debug!(billed = %self.betrag, bucket = primary.label(), "no components to scale, booking total to primary bucket");
            reconciled.set(primary, self.betrag);
            return reconciled;
        }

        let factor = self.betrag / component_sum;
        for bucket in CostBucket::statutory_order() {
            reconciled.set(bucket, self.get(bucket) * factor);
        }

        // Division leaves a residual far below a cent; the last non-empty
        // bucket absorbs it so the components foot exactly.
        let residual = self.betrag - reconciled.component_sum();
        if !residual.is_zero() {
            if let Some(bucket) = CostBucket::statutory_order()
                .into_iter()
                .rev()
                .find(|bucket| !reconciled.get(*bucket).is_zero())
            {
                reconciled.set(bucket, reconciled.get(bucket) + residual);
            }
        }

        debug!(
            billed = %self.betrag,
            components = %component_sum,
            factor = %factor,
            "rescaled SOLL components to billed total"
        );
        reconciled
    }
}

/// Invoice-backed SOLL of a tenant.
pub fn invoice_soll<'a, I>(invoices: I) -> SollBreakdown
where
    I: IntoIterator<Item = &'a Invoice>,
{
    accumulate(invoices, &CostBucket::statutory_order()).reconcile(CostBucket::Miete)
}

/// SOLL of a vacant unit. Vacancies carry no rent liability.
pub fn vacancy_soll<'a, I>(invoices: I) -> SollBreakdown
where
    I: IntoIterator<Item = &'a Invoice>,
{
    accumulate(
        invoices,
        &[CostBucket::Betriebskosten, CostBucket::Heizkosten],
    )
    .reconcile(CostBucket::Betriebskosten)
}

/// Projected SOLL from contract terms when no invoice exists yet.
///
/// Always uses the default rates; there is no invoice to take rates from.
pub fn contract_soll(tenant: &Tenant, month_count: u32) -> SollBreakdown {
    let rates = VatRates::default();
    let months = Decimal::from(month_count);
    SollBreakdown::from_components(
        rates.gross(CostBucket::Betriebskosten, tenant.bk_vorschuss * months),
        rates.gross(CostBucket::Heizkosten, tenant.hk_vorschuss * months),
        rates.gross(CostBucket::Miete, tenant.grundmiete * months),
    )
}

fn accumulate<'a, I>(invoices: I, buckets: &[CostBucket]) -> SollBreakdown
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut soll = SollBreakdown::default();
    for invoice in invoices {
        soll.betrag += invoice.gesamtbetrag;
        for &bucket in buckets {
            soll.set(bucket, soll.get(bucket) + invoice.gross(bucket));
        }
    }
    soll
}
