use std::fmt;

use coda_ir::{loc::SourcePos, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Control falls off the end of a function that must produce a value.
    MissingReturn { ret_ty: Type },

    /// A switch fails to cover every possible case.
    NonExhaustiveSwitch,

    /// A return is reached inside a function that never returns.
    ReturnFromNoReturn,
}

impl DiagnosticKind {
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::MissingReturn { .. } => 1,
            Self::NonExhaustiveSwitch => 2,
            Self::ReturnFromNoReturn => 3,
        }
    }

    pub fn as_str(self) -> String {
        format!("DF{:04}", self.as_u16())
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::MissingReturn { .. } | Self::NonExhaustiveSwitch => Severity::Error,
            Self::ReturnFromNoReturn => Severity::Warning,
        }
    }

    pub fn message(self) -> String {
        match self {
            Self::MissingReturn { ret_ty } => {
                format!("missing return in a function expected to return `{ret_ty}`")
            }
            Self::NonExhaustiveSwitch => "switch must be exhaustive".to_string(),
            Self::ReturnFromNoReturn => {
                "return inside a function that never returns".to_string()
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => "error".fmt(f),
            Self::Warning => "warning".fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub pos: SourcePos,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, pos: SourcePos) -> Self {
        Self { kind, pos }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} @ {}",
            self.severity(),
            self.kind,
            self.kind.message(),
            self.pos
        )
    }
}
