//! This module contains checks for dataflow anomalies left in the IR after
//! lowering. Lowering marks source-level control flow gaps with `unreachable`
//! instructions; inspecting their provenance tells which user mistake, if
//! any, is to blame.

use coda_ir::{module::FuncRef, Function, InstData, InstId, Loc, Module, Origin, SourcePos, Span};
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind},
    sink::{DiagnosticBuffer, DiagnosticSink},
};

/// Checks every function defined in `module` and reports what it finds to
/// `sink`, following the declaration order of the module.
pub fn emit_dataflow_diagnostics(module: &Module, sink: &mut dyn DiagnosticSink) {
    for func_ref in module.iter_functions() {
        if module.is_external(func_ref) {
            continue;
        }

        emit_function_diagnostics(func_ref, &module.funcs[func_ref], sink);
    }
}

/// Same as [`emit_dataflow_diagnostics`], with the per-function work fanned
/// out across threads. The diagnostic sequence reported to `sink` is
/// identical to the sequential one.
pub fn emit_dataflow_diagnostics_parallel(module: &Module, sink: &mut dyn DiagnosticSink) {
    let func_refs: Vec<_> = module
        .iter_functions()
        .filter(|func_ref| !module.is_external(*func_ref))
        .collect();

    let mut buffers: Vec<_> = func_refs
        .into_par_iter()
        .map(|func_ref| {
            let mut buffer = DiagnosticBuffer::new();
            emit_function_diagnostics(func_ref, &module.funcs[func_ref], &mut buffer);
            (func_ref, buffer)
        })
        .collect();

    buffers.sort_by_key(|(func_ref, _)| func_ref.as_u32());
    for (_, buffer) in buffers {
        for diagnostic in buffer.diagnostics {
            sink.report(diagnostic);
        }
    }
}

pub fn emit_function_diagnostics(
    func_ref: FuncRef,
    func: &Function,
    sink: &mut dyn DiagnosticSink,
) {
    trace!("checking dataflow in %{} ({func_ref})", func.sig.name());
    FuncDiagnostics::new(func, sink).run();
}

struct FuncDiagnostics<'a> {
    func: &'a Function,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> FuncDiagnostics<'a> {
    fn new(func: &'a Function, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { func, sink }
    }

    fn run(&mut self) {
        for block in self.func.layout.iter_block() {
            for inst in self.func.layout.iter_inst(block) {
                self.classify(inst);
            }
        }
    }

    fn emit(&mut self, kind: DiagnosticKind, pos: SourcePos) {
        let diagnostic = Diagnostic::new(kind, pos);
        debug!("{diagnostic}");
        self.sink.report(diagnostic);
    }

    fn classify(&mut self, inst: InstId) {
        let loc = self.func.dfg.inst_loc(inst);

        match self.func.dfg.inst(inst) {
            InstData::Unreachable => self.classify_unreachable(loc),

            InstData::Jump { .. }
            | InstData::Br { .. }
            | InstData::BrTable { .. }
            | InstData::Return { .. } => self.classify_branch_or_return(loc),

            InstData::Binary { .. } | InstData::Call { .. } | InstData::Phi { .. } => {}
        }
    }

    fn classify_unreachable(&mut self, loc: Loc) {
        // Synthetic unreachables are introduced by the compiler itself, for
        // example when dead code is eliminated. There is no source construct
        // to blame for those.
        let Loc::Source { origin, span } = loc else {
            return;
        };

        match origin {
            // The most common way to end up with an unreachable instruction
            // is a missing return statement; lowering tags it with the
            // enclosing function declaration.
            Origin::FuncDecl => self.diagnose_missing_return(span),

            // A non-exhaustive switch also lowers to an unreachable
            // instruction.
            Origin::SwitchStmt => {
                if let Some(end) = span.end {
                    self.emit(DiagnosticKind::NonExhaustiveSwitch, end);
                }
            }

            Origin::ReturnStmt | Origin::ImplicitReturn => {}
        }
    }

    fn diagnose_missing_return(&mut self, span: Span) {
        let sig = &self.func.sig;

        // Closures don't always resolve a result type; stay quiet rather
        // than blame the wrong construct.
        let Some(ret_ty) = sig.ret_ty() else {
            return;
        };

        if ret_ty.is_unit() || sig.is_no_return() {
            return;
        }

        let Some(end) = span.end else {
            debug_assert!(false, "function-decl unreachable without an end position");
            return;
        };

        self.emit(DiagnosticKind::MissingReturn { ret_ty }, end);
    }

    fn classify_branch_or_return(&mut self, loc: Loc) {
        if !self.func.sig.is_no_return() {
            return;
        }

        let Loc::Source { origin, span } = loc else {
            return;
        };

        // Only terminators lowered from a return statement, explicit or
        // synthesized at the end of the body, are worth flagging here.
        if !matches!(origin, Origin::ReturnStmt | Origin::ImplicitReturn) {
            return;
        }

        if let Some(start) = span.start {
            self.emit(DiagnosticKind::ReturnFromNoReturn, start);
        }
    }
}
