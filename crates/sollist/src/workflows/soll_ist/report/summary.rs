use super::super::domain::TOLERANCE;
use super::super::period::Period;
use super::result::TenantSollIstResult;
use super::totals::SollIstTotals;
use super::views::{ArrearsEntry, PropertySubtotal, SollIstSummary};
use serde::Serialize;
use std::collections::HashMap;

/// Output of one engine run: tenant results first, then vacancies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SollIstReport {
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub results: Vec<TenantSollIstResult>,
    pub totals: SollIstTotals,
}

impl SollIstReport {
    pub fn tenant_results(&self) -> impl Iterator<Item = &TenantSollIstResult> {
        self.results.iter().filter(|result| !result.is_vacancy)
    }

    pub fn vacancy_results(&self) -> impl Iterator<Item = &TenantSollIstResult> {
        self.results.iter().filter(|result| result.is_vacancy)
    }

    pub fn result_for(&self, tenant_id: &str) -> Option<&TenantSollIstResult> {
        self.results
            .iter()
            .find(|result| result.tenant_id == tenant_id)
    }

    pub fn summary(&self) -> SollIstSummary {
        let in_arrears = |result: &&TenantSollIstResult| result.saldo >= TOLERANCE;

        let mut arrears: Vec<ArrearsEntry> = self
            .results
            .iter()
            .filter(in_arrears)
            .map(ArrearsEntry::from_result)
            .collect();
        arrears.sort_by(|a, b| b.saldo.cmp(&a.saldo));

        let arrears_count = arrears.len();
        let overpaid_count = self
            .results
            .iter()
            .filter(|result| result.ueberzahlung >= TOLERANCE)
            .count();

        SollIstSummary {
            period: self.period.label(),
            property_id: self.property_id.clone(),
            result_count: self.results.len(),
            arrears_count,
            overpaid_count,
            settled_count: self.results.len() - arrears_count - overpaid_count,
            collection_rate: self.totals.collection_rate(),
            arrears,
            properties: self.property_subtotals(),
            totals: self.totals.clone(),
        }
    }

    fn property_subtotals(&self) -> Vec<PropertySubtotal> {
        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut grouped: HashMap<&str, Vec<&TenantSollIstResult>> = HashMap::new();
        for result in &self.results {
            let members = grouped.entry(result.property_id.as_str()).or_default();
            if members.is_empty() {
                order.push((result.property_id.as_str(), result.property_name.as_str()));
            }
            members.push(result);
        }

        order
            .into_iter()
            .map(|(property_id, property_name)| PropertySubtotal {
                property_id: property_id.to_string(),
                property_name: property_name.to_string(),
                totals: SollIstTotals::aggregate(
                    grouped.get(property_id).into_iter().flatten().copied(),
                ),
            })
            .collect()
    }
}
