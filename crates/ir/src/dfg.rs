//! This module contains the coda IR data flow graph.
use cranelift_entity::{entity_impl, packed_option::PackedOption, PrimaryMap, SecondaryMap};
use rustc_hash::FxHashMap;

use super::{Immediate, InstData, InstId, Loc, Type, Value, ValueId};

#[derive(Debug, Default)]
pub struct DataFlowGraph {
    #[doc(hidden)]
    pub blocks: PrimaryMap<BlockId, Block>,
    #[doc(hidden)]
    pub values: PrimaryMap<ValueId, Value>,
    insts: PrimaryMap<InstId, InstData>,
    inst_locs: SecondaryMap<InstId, Loc>,
    inst_results: SecondaryMap<InstId, PackedOption<ValueId>>,
    #[doc(hidden)]
    pub immediates: FxHashMap<Immediate, ValueId>,
}

impl DataFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_block(&mut self) -> BlockId {
        self.blocks.push(Block::new())
    }

    pub fn make_value(&mut self, value: Value) -> ValueId {
        self.values.push(value)
    }

    /// Creates an instruction carrying the provenance it was lowered with.
    /// Instructions the compiler invents for itself carry [`Loc::Synthetic`].
    pub fn make_inst(&mut self, data: InstData, loc: Loc) -> InstId {
        let inst = self.insts.push(data);
        self.inst_locs[inst] = loc;
        inst
    }

    pub fn make_imm_value<Imm>(&mut self, imm: Imm) -> ValueId
    where
        Imm: Into<Immediate>,
    {
        let imm: Immediate = imm.into();
        if let Some(&value) = self.immediates.get(&imm) {
            return value;
        }

        let ty = imm.ty();
        let value_data = Value::Immediate { imm, ty };
        let value = self.make_value(value_data);
        self.immediates.insert(imm, value);
        value
    }

    pub fn make_arg_value(&mut self, ty: Type, idx: usize) -> Value {
        Value::Arg { ty, idx }
    }

    pub fn attach_result(&mut self, inst: InstId, value: ValueId) {
        debug_assert!(self.inst_results[inst].is_none());
        self.inst_results[inst] = value.into();
    }

    pub fn inst(&self, inst: InstId) -> &InstData {
        &self.insts[inst]
    }

    pub fn inst_loc(&self, inst: InstId) -> Loc {
        self.inst_locs[inst]
    }

    pub fn inst_result(&self, inst: InstId) -> Option<ValueId> {
        self.inst_results[inst].expand()
    }

    pub fn value(&self, value: ValueId) -> &Value {
        &self.values[value]
    }

    pub fn value_ty(&self, value: ValueId) -> Type {
        match &self.values[value] {
            Value::Inst { ty, .. } | Value::Arg { ty, .. } | Value::Immediate { ty, .. } => *ty,
        }
    }

    pub fn is_terminator(&self, inst: InstId) -> bool {
        self.insts[inst].is_terminator()
    }
}

/// An opaque reference to [`Block`].
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);
entity_impl!(BlockId, "block");

/// A block data definition.
/// A Block data doesn't hold any information for layout of a program. It is
/// managed by [`super::layout::Layout`].
#[derive(Debug, Clone, Default)]
pub struct Block {}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }
}
