//! This module contains source provenance definitions.
//!
//! Lowering tags every function and instruction with a [`Loc`] recording the
//! source construct it came from. Instructions introduced by the compiler
//! itself carry [`Loc::Synthetic`].
use std::fmt;

/// Source provenance of an IR entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Loc {
    /// No source counterpart.
    #[default]
    Synthetic,

    /// Lowered from a source construct.
    Source { origin: Origin, span: Span },
}

impl Loc {
    pub fn source(origin: Origin, span: Span) -> Self {
        Self::Source { origin, span }
    }

    pub fn is_synthetic(self) -> bool {
        matches!(self, Self::Synthetic)
    }

    pub fn span(self) -> Option<Span> {
        match self {
            Self::Synthetic => None,
            Self::Source { span, .. } => Some(span),
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Synthetic => write!(f, "synthetic"),
            Self::Source { origin, span } => write!(f, "@{origin}({span})"),
        }
    }
}

/// The source construct an entity was lowered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A function declaration.
    FuncDecl,

    /// A switch statement.
    SwitchStmt,

    /// An explicit return statement.
    ReturnStmt,

    /// A return inserted by lowering at the end of a body.
    ImplicitReturn,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FuncDecl => write!(f, "fn_decl"),
            Self::SwitchStmt => write!(f, "switch"),
            Self::ReturnStmt => write!(f, "ret"),
            Self::ImplicitReturn => write!(f, "implicit_ret"),
        }
    }
}

/// Byte range in the source text. Either endpoint may be unknown, e.g. for
/// constructs recovered from partially elided syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Option<SourcePos>,
    pub end: Option<SourcePos>,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: Some(SourcePos(start)),
            end: Some(SourcePos(end)),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

/// Byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePos(pub u32);

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loc_display() {
        assert_eq!(Loc::Synthetic.to_string(), "synthetic");
        assert_eq!(
            Loc::source(Origin::FuncDecl, Span::new(4, 120)).to_string(),
            "@fn_decl(4..120)"
        );

        let half_open = Span {
            start: None,
            end: Some(SourcePos(9)),
        };
        assert_eq!(
            Loc::source(Origin::SwitchStmt, half_open).to_string(),
            "@switch(..9)"
        );
    }

    #[test]
    fn default_is_synthetic() {
        assert!(Loc::default().is_synthetic());
        assert_eq!(Loc::default().span(), None);
    }
}
