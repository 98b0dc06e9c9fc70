use super::result::TenantSollIstResult;
use super::totals::SollIstTotals;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrearsEntry {
    pub tenant_id: String,
    pub tenant_name: String,
    pub unit_label: String,
    pub property_name: String,
    pub saldo: Decimal,
    pub is_vacancy: bool,
}

impl ArrearsEntry {
    pub(crate) fn from_result(result: &TenantSollIstResult) -> Self {
        Self {
            tenant_id: result.tenant_id.clone(),
            tenant_name: result.tenant_name.clone(),
            unit_label: result.unit_label.clone(),
            property_name: result.property_name.clone(),
            saldo: result.saldo,
            is_vacancy: result.is_vacancy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySubtotal {
    pub property_id: String,
    pub property_name: String,
    pub totals: SollIstTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SollIstSummary {
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub result_count: usize,
    pub arrears_count: usize,
    pub settled_count: usize,
    pub overpaid_count: usize,
    pub collection_rate: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arrears: Vec<ArrearsEntry>,
    pub properties: Vec<PropertySubtotal>,
    pub totals: SollIstTotals,
}
