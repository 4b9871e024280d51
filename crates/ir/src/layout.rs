//! This module contains function layout information including block order and
//! instruction order.
use cranelift_entity::SecondaryMap;

use super::{BlockId, InstId};

#[derive(Debug, Clone)]
pub struct Layout {
    blocks: SecondaryMap<BlockId, BlockNode>,
    insts: SecondaryMap<InstId, InstNode>,
    entry_block: Option<BlockId>,
    last_block: Option<BlockId>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    pub fn new() -> Self {
        Self {
            blocks: SecondaryMap::new(),
            insts: SecondaryMap::new(),
            entry_block: None,
            last_block: None,
        }
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        self.entry_block
    }

    pub fn last_block(&self) -> Option<BlockId> {
        self.last_block
    }

    pub fn prev_block_of(&self, block: BlockId) -> Option<BlockId> {
        debug_assert!(self.is_block_inserted(block));
        self.blocks[block].prev
    }

    pub fn next_block_of(&self, block: BlockId) -> Option<BlockId> {
        debug_assert!(self.is_block_inserted(block));
        self.blocks[block].next
    }

    pub fn is_block_inserted(&self, block: BlockId) -> bool {
        Some(block) == self.entry_block || self.blocks[block] != BlockNode::default()
    }

    pub fn first_inst_of(&self, block: BlockId) -> Option<InstId> {
        debug_assert!(self.is_block_inserted(block));
        self.blocks[block].first_inst
    }

    pub fn last_inst_of(&self, block: BlockId) -> Option<InstId> {
        debug_assert!(self.is_block_inserted(block));
        self.blocks[block].last_inst
    }

    pub fn prev_inst_of(&self, inst: InstId) -> Option<InstId> {
        debug_assert!(self.is_inst_inserted(inst));
        self.insts[inst].prev
    }

    pub fn next_inst_of(&self, inst: InstId) -> Option<InstId> {
        debug_assert!(self.is_inst_inserted(inst));
        self.insts[inst].next
    }

    pub fn inst_block(&self, inst: InstId) -> BlockId {
        debug_assert!(self.is_inst_inserted(inst));
        self.insts[inst].block.unwrap()
    }

    pub fn is_inst_inserted(&self, inst: InstId) -> bool {
        self.insts[inst] != InstNode::default()
    }

    pub fn iter_block(&self) -> impl Iterator<Item = BlockId> + '_ {
        BlockIter {
            next: self.entry_block,
            blocks: &self.blocks,
        }
    }

    pub fn iter_inst(&self, block: BlockId) -> impl Iterator<Item = InstId> + '_ {
        debug_assert!(self.is_block_inserted(block));
        InstIter {
            next: self.blocks[block].first_inst,
            insts: &self.insts,
        }
    }

    pub fn append_block(&mut self, block: BlockId) {
        debug_assert!(!self.is_block_inserted(block));

        let mut block_node = BlockNode::default();

        if let Some(last_block) = self.last_block {
            let last_block_node = &mut self.blocks[last_block];
            last_block_node.next = Some(block);
            block_node.prev = Some(last_block);
        } else {
            self.entry_block = Some(block);
        }

        self.blocks[block] = block_node;
        self.last_block = Some(block);
    }

    pub fn append_inst(&mut self, inst: InstId, block: BlockId) {
        debug_assert!(self.is_block_inserted(block));
        debug_assert!(!self.is_inst_inserted(inst));

        let block_node = &mut self.blocks[block];
        let mut inst_node = InstNode::with_block(block);

        if let Some(last_inst) = block_node.last_inst {
            inst_node.prev = Some(last_inst);
            self.insts[last_inst].next = Some(inst);
        } else {
            block_node.first_inst = Some(inst);
        }

        block_node.last_inst = Some(inst);
        self.insts[inst] = inst_node;
    }
}

struct BlockIter<'a> {
    next: Option<BlockId>,
    blocks: &'a SecondaryMap<BlockId, BlockNode>,
}

impl Iterator for BlockIter<'_> {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        let next = self.next?;
        self.next = self.blocks[next].next;
        Some(next)
    }
}

struct InstIter<'a> {
    next: Option<InstId>,
    insts: &'a SecondaryMap<InstId, InstNode>,
}

impl Iterator for InstIter<'_> {
    type Item = InstId;

    fn next(&mut self) -> Option<InstId> {
        let next = self.next?;
        self.next = self.insts[next].next;
        Some(next)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
struct BlockNode {
    prev: Option<BlockId>,
    next: Option<BlockId>,
    first_inst: Option<InstId>,
    last_inst: Option<InstId>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
struct InstNode {
    /// An block in which the inst exists.
    block: Option<BlockId>,
    /// A previous instruction.
    prev: Option<InstId>,
    /// A next instruction.
    next: Option<InstId>,
}

impl InstNode {
    fn with_block(block: BlockId) -> Self {
        Self {
            block: Some(block),
            prev: None,
            next: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{super::dfg::DataFlowGraph, *};
    use crate::{inst::BinaryOp, InstData, Loc};

    impl DataFlowGraph {
        /// Returns dummy instruction.
        fn make_dummy_inst(&mut self) -> InstId {
            let v0 = self.make_imm_value(1i32);
            let v1 = self.make_imm_value(2i32);
            self.make_inst(InstData::binary(BinaryOp::Add, v0, v1), Loc::Synthetic)
        }
    }

    #[test]
    fn test_block_append() {
        let mut layout = Layout::new();
        let mut dfg = DataFlowGraph::new();
        assert_eq!(layout.entry_block, None);
        assert_eq!(layout.last_block, None);

        // block1.
        let b1 = dfg.make_block();
        layout.append_block(b1);
        assert_eq!(layout.entry_block, Some(b1));
        assert_eq!(layout.last_block, Some(b1));
        assert_eq!(layout.prev_block_of(b1), None);
        assert_eq!(layout.next_block_of(b1), None);

        // block1 -> block2.
        let b2 = dfg.make_block();
        layout.append_block(b2);
        assert_eq!(layout.entry_block, Some(b1));
        assert_eq!(layout.last_block, Some(b2));
        assert_eq!(layout.prev_block_of(b1), None);
        assert_eq!(layout.next_block_of(b1), Some(b2));
        assert_eq!(layout.prev_block_of(b2), Some(b1));
        assert_eq!(layout.next_block_of(b2), None);

        // block1 -> block2 -> block3.
        let b3 = dfg.make_block();
        layout.append_block(b3);
        assert_eq!(layout.entry_block, Some(b1));
        assert_eq!(layout.last_block, Some(b3));
        assert_eq!(layout.next_block_of(b2), Some(b3));
        assert_eq!(layout.prev_block_of(b3), Some(b2));
        assert_eq!(layout.next_block_of(b3), None);
    }

    #[test]
    fn test_inst_append() {
        let mut layout = Layout::new();
        let mut dfg = DataFlowGraph::new();
        let b1 = dfg.make_block();
        layout.append_block(b1);
        assert_eq!(layout.first_inst_of(b1), None);
        assert_eq!(layout.last_inst_of(b1), None);

        // inst1.
        let i1 = dfg.make_dummy_inst();
        layout.append_inst(i1, b1);
        assert_eq!(layout.first_inst_of(b1), Some(i1));
        assert_eq!(layout.last_inst_of(b1), Some(i1));
        assert_eq!(layout.inst_block(i1), b1);
        assert_eq!(layout.prev_inst_of(i1), None);
        assert_eq!(layout.next_inst_of(i1), None);

        // inst1 -> inst2.
        let i2 = dfg.make_dummy_inst();
        layout.append_inst(i2, b1);
        assert_eq!(layout.first_inst_of(b1), Some(i1));
        assert_eq!(layout.last_inst_of(b1), Some(i2));
        assert_eq!(layout.prev_inst_of(i2), Some(i1));
        assert_eq!(layout.next_inst_of(i1), Some(i2));
        assert_eq!(layout.inst_block(i2), b1);
    }

    #[test]
    fn test_iteration_order() {
        let mut layout = Layout::new();
        let mut dfg = DataFlowGraph::new();

        let b1 = dfg.make_block();
        let b2 = dfg.make_block();
        layout.append_block(b1);
        layout.append_block(b2);

        let i1 = dfg.make_dummy_inst();
        let i2 = dfg.make_dummy_inst();
        let i3 = dfg.make_dummy_inst();
        layout.append_inst(i1, b1);
        layout.append_inst(i2, b1);
        layout.append_inst(i3, b2);

        assert_eq!(layout.iter_block().collect::<Vec<_>>(), vec![b1, b2]);
        assert_eq!(layout.iter_inst(b1).collect::<Vec<_>>(), vec![i1, i2]);
        assert_eq!(layout.iter_inst(b2).collect::<Vec<_>>(), vec![i3]);
    }
}
