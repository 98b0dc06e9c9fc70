//! SOLL/IST computation for a property portfolio.
//!
//! The pipeline runs in a single pass over already-fetched collections:
//! eligibility filter, SOLL derivation, payment aggregation, statutory
//! allocation, and the vacancy branch, followed by a totals reduction.

pub mod allocation;
pub mod domain;
mod eligibility;
mod engine;
pub mod ingest;
mod payments;
pub mod period;
pub mod report;
pub mod soll;
mod vacancy;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, split_proportionally, Allocation};
pub use domain::{
    CostBucket, Invoice, Payment, Portfolio, Property, Tenant, Unit, VatRates, TOLERANCE,
};
pub use engine::SollIstEngine;
pub use ingest::{IngestError, PortfolioSnapshot, RecordKind, SnapshotError, SnapshotImporter};
pub use period::{Period, PeriodError};
pub use report::{
    ArrearsEntry, PropertySubtotal, SollIstReport, SollIstSummary, SollIstTotals,
    TenantSollIstResult,
};
pub use soll::{SollBreakdown, SollSource};
