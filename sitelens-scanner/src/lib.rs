pub mod catalog;
pub mod error;
pub mod generator;
pub mod result;
pub mod target;

pub use error::{ScanError, ValidationError};
pub use generator::{AuditHandle, MockAuditor, PendingAudit, DEFAULT_LATENCY};
pub use result::{AuditReport, Category, Grade, Rating};
pub use target::{validate, NormalizedUrl};
