use super::domain::{Portfolio, Property, Tenant, Unit};
use super::period::Period;
use std::collections::HashMap;
use tracing::debug;

/// Unit and property lookups for one computation, restricted to the scope.
pub(crate) struct Scope<'a> {
    units: HashMap<&'a str, &'a Unit>,
    properties: HashMap<&'a str, &'a Property>,
}

impl<'a> Scope<'a> {
    pub(crate) fn build(portfolio: &'a Portfolio, property_id: Option<&str>) -> Self {
        let units = portfolio
            .units
            .iter()
            .filter(|unit| property_id.map_or(true, |id| unit.property_id == id))
            .map(|unit| (unit.id.as_str(), unit))
            .collect();
        let properties = portfolio
            .properties
            .iter()
            .map(|property| (property.id.as_str(), property))
            .collect();

        Self { units, properties }
    }

    pub(crate) fn unit(&self, unit_id: &str) -> Option<&'a Unit> {
        self.units.get(unit_id).copied()
    }

    /// Falls back to the id when the property record was not delivered.
    pub(crate) fn property_name(&self, property_id: &str) -> String {
        self.properties
            .get(property_id)
            .map_or_else(|| property_id.to_string(), |property| property.name.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exclusion {
    OutOfScope,
    Deleted,
    StartsAfterPeriod,
    EndedBeforePeriod,
}

impl Exclusion {
    const fn label(self) -> &'static str {
        match self {
            Self::OutOfScope => "unit outside property scope",
            Self::Deleted => "soft-deleted",
            Self::StartsAfterPeriod => "tenancy starts after period",
            Self::EndedBeforePeriod => "tenancy ended before period",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EligibleTenant<'a> {
    pub(crate) tenant: &'a Tenant,
    pub(crate) unit: &'a Unit,
}

pub(crate) fn check<'a>(
    tenant: &Tenant,
    scope: &Scope<'a>,
    period: &Period,
) -> Result<&'a Unit, Exclusion> {
    let unit = scope.unit(&tenant.unit_id).ok_or(Exclusion::OutOfScope)?;
    if tenant.is_deleted() {
        return Err(Exclusion::Deleted);
    }
    if tenant
        .mietbeginn
        .is_some_and(|start| start > period.end_date())
    {
        return Err(Exclusion::StartsAfterPeriod);
    }
    if tenant
        .mietende
        .is_some_and(|end| end < period.start_date())
    {
        return Err(Exclusion::EndedBeforePeriod);
    }
    Ok(unit)
}

/// Tenants active in the period, in input order.
pub(crate) fn eligible_tenants<'a>(
    tenants: &'a [Tenant],
    scope: &Scope<'a>,
    period: &Period,
) -> Vec<EligibleTenant<'a>> {
    tenants
        .iter()
        .filter_map(|tenant| match check(tenant, scope, period) {
            Ok(unit) => Some(EligibleTenant { tenant, unit }),
            Err(reason) => {
                debug!(tenant = %tenant.id, reason = reason.label(), "tenant excluded");
                None
            }
        })
        .collect()
}
