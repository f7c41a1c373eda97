mod class_imbalance;
mod disparity;
mod divergence;
mod metric;
mod report;

pub use class_imbalance::{class_imbalance, class_imbalance_per_label};
pub use disparity::{cddl, dpl};
pub use divergence::{kl_divergence, kl_divergence_pmf, ks, ks_pmf};
pub use metric::Metric;
pub use report::{AuditConfig, BiasReport, ReportEntry};
