//! This module contains coda IR instruction definitions.
use std::fmt;

use smallvec::SmallVec;

use crate::{module::FuncRef, BlockId, ValueId};

/// An opaque reference to [`InstData`].
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct InstId(pub u32);
cranelift_entity::entity_impl!(InstId);

/// An instruction data definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstData {
    /// Binary instructions.
    Binary { code: BinaryOp, args: [ValueId; 2] },

    /// Call a function declared in the module.
    Call {
        callee: FuncRef,
        args: SmallVec<[ValueId; 8]>,
    },

    /// Phi function.
    Phi {
        values: SmallVec<[ValueId; 8]>,
        blocks: SmallVec<[BlockId; 8]>,
    },

    /// Unconditional jump instruction.
    Jump { dest: BlockId },

    /// Conditional jump instruction.
    Br {
        cond: ValueId,
        nz_dest: BlockId,
        z_dest: BlockId,
    },

    /// Indirect jump instruction. `args[0]` is the scrutinee, the rest are
    /// compared against it pairwise with `table`.
    BrTable {
        args: SmallVec<[ValueId; 8]>,
        default: Option<BlockId>,
        table: SmallVec<[BlockId; 8]>,
    },

    /// Return.
    Return { arg: Option<ValueId> },

    /// Control never reaches this point.
    Unreachable,
}

impl InstData {
    pub fn binary(code: BinaryOp, lhs: ValueId, rhs: ValueId) -> Self {
        Self::Binary {
            code,
            args: [lhs, rhs],
        }
    }

    pub fn call(callee: FuncRef, args: &[ValueId]) -> Self {
        Self::Call {
            callee,
            args: args.into(),
        }
    }

    pub fn phi(args: &[(ValueId, BlockId)]) -> Self {
        Self::Phi {
            values: args.iter().map(|(value, _)| *value).collect(),
            blocks: args.iter().map(|(_, block)| *block).collect(),
        }
    }

    pub fn jump(dest: BlockId) -> Self {
        Self::Jump { dest }
    }

    pub fn br(cond: ValueId, nz_dest: BlockId, z_dest: BlockId) -> Self {
        Self::Br {
            cond,
            nz_dest,
            z_dest,
        }
    }

    pub fn br_table(
        scrutinee: ValueId,
        default: Option<BlockId>,
        arms: &[(ValueId, BlockId)],
    ) -> Self {
        let mut args = SmallVec::with_capacity(arms.len() + 1);
        args.push(scrutinee);
        args.extend(arms.iter().map(|(value, _)| *value));

        Self::BrTable {
            args,
            default,
            table: arms.iter().map(|(_, block)| *block).collect(),
        }
    }

    pub fn ret(arg: Option<ValueId>) -> Self {
        Self::Return { arg }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Jump { .. }
                | Self::Br { .. }
                | Self::BrTable { .. }
                | Self::Return { .. }
                | Self::Unreachable
        )
    }
}

/// Binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Eq,
    Lt,
    Gt,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::And => "and",
            Self::Or => "or",
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Gt => "gt",
        };
        write!(f, "{s}")
    }
}
