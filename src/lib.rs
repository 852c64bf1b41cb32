pub mod audit;
pub mod catalog;
pub mod discovery;
pub mod formatter;
pub mod presentation;

// Re-export main types for convenient access
pub use formatter::{
    format, format_into, format_with, Disposition, FormatOptions, FormatOutcome, Guard,
    TitleCaseFormatter,
};

pub use presentation::FormattedText;

// Re-export catalog audit utilities for the CLI and integration tests
pub use audit::{run_audit, AuditConfig, AuditSummary, FileStats, FileStatus};
pub use catalog::{audit_catalog, CatalogKind, CatalogReport, Violation};
pub use discovery::{discover_catalogs, DiscoveryConfig};
