mod dataflow;
mod diagnostic;
mod sink;

pub use dataflow::{
    emit_dataflow_diagnostics, emit_dataflow_diagnostics_parallel, emit_function_diagnostics,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use sink::{DiagnosticBuffer, DiagnosticSink};
