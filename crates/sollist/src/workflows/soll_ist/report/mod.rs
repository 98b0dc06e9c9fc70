mod result;
mod summary;
mod totals;
pub mod views;

pub use result::{ResultIdentity, Settlement, TenantSollIstResult};
pub use summary::SollIstReport;
pub use totals::SollIstTotals;
pub use views::{ArrearsEntry, PropertySubtotal, SollIstSummary};
