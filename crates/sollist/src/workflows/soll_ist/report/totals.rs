use super::result::TenantSollIstResult;
use rust_decimal::Decimal;
use serde::Serialize;

/// Portfolio-level control totals over tenant and vacancy results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SollIstTotals {
    pub soll_bk: Decimal,
    pub soll_hk: Decimal,
    pub soll_miete: Decimal,
    pub soll_gesamt: Decimal,
    pub ist_bk: Decimal,
    pub ist_hk: Decimal,
    pub ist_miete: Decimal,
    pub ist_gesamt: Decimal,
    pub diff_bk: Decimal,
    pub diff_hk: Decimal,
    pub diff_miete: Decimal,
    pub diff_gesamt: Decimal,
    pub haben_betrag: Decimal,
    pub saldo: Decimal,
    pub ueberzahlung: Decimal,
    pub payment_count: usize,
    pub tenant_count: usize,
    pub vacancy_count: usize,
}

impl SollIstTotals {
    pub fn aggregate<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a TenantSollIstResult>,
    {
        results.into_iter().fold(Self::default(), |mut totals, result| {
            totals.add(result);
            totals
        })
    }

    fn add(&mut self, result: &TenantSollIstResult) {
        self.soll_bk += result.soll_bk;
        self.soll_hk += result.soll_hk;
        self.soll_miete += result.soll_miete;
        self.soll_gesamt += result.soll_betrag;
        self.ist_bk += result.ist_bk;
        self.ist_hk += result.ist_hk;
        self.ist_miete += result.ist_miete;
        self.ist_gesamt += result.ist_gesamt();
        self.diff_bk += result.diff_bk;
        self.diff_hk += result.diff_hk;
        self.diff_miete += result.diff_miete;
        self.diff_gesamt += result.diff_gesamt;
        self.haben_betrag += result.haben_betrag;
        self.saldo += result.saldo;
        self.ueberzahlung += result.ueberzahlung;
        self.payment_count += result.payment_count;
        if result.is_vacancy {
            self.vacancy_count += 1;
        } else {
            self.tenant_count += 1;
        }
    }

    pub fn result_count(&self) -> usize {
        self.tenant_count + self.vacancy_count
    }

    /// Share of the SOLL covered by allocated IST, four decimal places.
    pub fn collection_rate(&self) -> Decimal {
        if self.soll_gesamt.is_zero() {
            return Decimal::ZERO;
        }
        (self.ist_gesamt / self.soll_gesamt).round_dp(4)
    }
}
