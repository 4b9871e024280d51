//! This module contains coda IR function definitions.
use smallvec::SmallVec;

use super::{DataFlowGraph, Layout, Linkage, Loc, Type, ValueId};

#[derive(Debug)]
pub struct Function {
    pub sig: Signature,

    /// Source construct the function was lowered from.
    pub loc: Loc,

    pub arg_values: SmallVec<[ValueId; 8]>,
    pub dfg: DataFlowGraph,
    pub layout: Layout,
}

impl Function {
    pub fn new(sig: Signature, loc: Loc) -> Self {
        let mut dfg = DataFlowGraph::new();
        let arg_values = sig
            .args()
            .iter()
            .enumerate()
            .map(|(idx, arg_ty)| {
                let value = dfg.make_arg_value(*arg_ty, idx);
                dfg.make_value(value)
            })
            .collect();

        Self {
            sig,
            loc,
            arg_values,
            dfg,
            layout: Layout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Name of the function.
    name: String,

    /// Linkage of the function.
    linkage: Linkage,

    args: SmallVec<[Type; 8]>,

    /// Result type of the function, or `None` when the declaring construct
    /// doesn't resolve one.
    ret_ty: Option<Type>,

    /// `true` if the declared type guarantees that the function never
    /// returns to its caller.
    no_return: bool,
}

impl Signature {
    pub fn new(name: &str, linkage: Linkage, args: &[Type], ret_ty: Option<Type>) -> Self {
        Self {
            name: name.to_string(),
            linkage,
            args: args.into(),
            ret_ty,
            no_return: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    pub fn update_linkage(&mut self, linkage: Linkage) {
        self.linkage = linkage;
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    pub fn ret_ty(&self) -> Option<Type> {
        self.ret_ty
    }

    pub fn is_no_return(&self) -> bool {
        self.no_return
    }

    pub fn set_no_return(&mut self, no_return: bool) {
        self.no_return = no_return;
    }
}
