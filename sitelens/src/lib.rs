// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    build_auditor, deliver_report, resolve_output_path, run_audit, AuditArgs,
};

// Re-export audit functionality from sitelens-core
pub use sitelens_core::audit::{execute_audit, AuditOptions, AuditProgressCallback, LOADING_STEPS};
pub use sitelens_core::report::ReportFormat;
