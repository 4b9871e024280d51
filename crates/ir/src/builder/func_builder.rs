use crate::{BlockId, Function, Immediate, InstData, InstId, Loc, Type, Value, ValueId};

pub struct FunctionBuilder<'a> {
    func: &'a mut Function,
    cur_block: Option<BlockId>,
    loc: Loc,
}

impl<'a> FunctionBuilder<'a> {
    pub fn new(func: &'a mut Function) -> Self {
        Self {
            func,
            cur_block: None,
            loc: Loc::Synthetic,
        }
    }

    pub fn finish(self) {
        if cfg!(debug_assertions) {
            for block in self.func.layout.iter_block() {
                let last_inst = self.func.layout.last_inst_of(block);
                debug_assert!(
                    last_inst.map_or(false, |inst| self.func.dfg.is_terminator(inst)),
                    "all blocks must end in a terminator: `{block}` doesn't"
                );
            }
        }
    }

    pub fn append_block(&mut self) -> BlockId {
        let block = self.func.dfg.make_block();
        self.func.layout.append_block(block);
        block
    }

    pub fn switch_to_block(&mut self, block: BlockId) {
        debug_assert!(self.func.layout.is_block_inserted(block));
        self.cur_block = Some(block);
    }

    /// Sets the provenance attached to subsequently inserted instructions.
    pub fn set_loc(&mut self, loc: Loc) {
        self.loc = loc;
    }

    pub fn make_imm_value<Imm>(&mut self, imm: Imm) -> ValueId
    where
        Imm: Into<Immediate>,
    {
        self.func.dfg.make_imm_value(imm)
    }

    /// Inserts an instruction into the current block and returns a `ValueId`
    /// for the result.
    ///
    /// # Parameters
    /// - `data`: The instruction to insert.
    /// - `ret_ty`: The result type of the instruction. A result value will be
    ///   created with this type and associated with the instruction.
    pub fn insert_inst(&mut self, data: InstData, ret_ty: Type) -> ValueId {
        let inst = self.append_inst(data);

        let result = Value::Inst { inst, ty: ret_ty };
        let result = self.func.dfg.make_value(result);
        self.func.dfg.attach_result(inst, result);

        result
    }

    /// Inserts an instruction into the current block without creating a
    /// result value (i.e., for instructions that have no result).
    ///
    /// Please refer to [`Self::insert_inst`] if the instruction has a result.
    pub fn insert_inst_no_result(&mut self, data: InstData) {
        self.append_inst(data);
    }

    pub fn current_block(&self) -> Option<BlockId> {
        self.cur_block
    }

    pub fn type_of(&self, value: ValueId) -> Type {
        self.func.dfg.value_ty(value)
    }

    pub fn args(&self) -> &[ValueId] {
        &self.func.arg_values
    }

    fn append_inst(&mut self, data: InstData) -> InstId {
        let block = self.cur_block.unwrap();
        debug_assert!(
            self.func
                .layout
                .last_inst_of(block)
                .map_or(true, |inst| !self.func.dfg.is_terminator(inst)),
            "instructions can't be appended after a terminator"
        );

        let inst = self.func.dfg.make_inst(data, self.loc);
        self.func.layout.append_inst(inst, block);
        inst
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::{inst::BinaryOp, InstData, Loc, Origin, Span, Type};

    #[test]
    fn entry_block() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[], Some(Type::Unit));

        let b0 = builder.append_block();
        builder.switch_to_block(b0);
        let v0 = builder.make_imm_value(1i8);
        let v1 = builder.make_imm_value(2i8);
        let v2 = builder.insert_inst(InstData::binary(BinaryOp::Add, v0, v1), Type::I8);
        builder.insert_inst(InstData::binary(BinaryOp::Sub, v2, v0), Type::I8);
        builder.insert_inst_no_result(InstData::ret(None));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func() -> unit {
    block0:
        v2.i8 = add 1.i8 2.i8;
        v3.i8 = sub v2 1.i8;
        return;
}
"
        );
    }

    #[test]
    fn entry_block_with_args() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[Type::I32, Type::I64], Some(Type::Unit));

        let entry_block = builder.append_block();
        builder.switch_to_block(entry_block);
        let args = builder.args();
        let (arg0, arg1) = (args[0], args[1]);
        assert_eq!(args.len(), 2);
        let v2 = builder.insert_inst(InstData::binary(BinaryOp::Mul, arg0, arg1), Type::I64);
        builder.insert_inst(InstData::binary(BinaryOp::Add, v2, arg1), Type::I64);
        builder.insert_inst_no_result(InstData::ret(None));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func(v0.i32, v1.i64) -> unit {
    block0:
        v2.i64 = mul v0 v1;
        v3.i64 = add v2 v1;
        return;
}
"
        );
    }

    #[test]
    fn entry_block_with_return() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[], Some(Type::I32));

        let entry_block = builder.append_block();

        builder.switch_to_block(entry_block);
        let v0 = builder.make_imm_value(1i32);
        builder.insert_inst_no_result(InstData::ret(Some(v0)));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func() -> i32 {
    block0:
        return 1.i32;
}
"
        );
    }

    #[test]
    fn then_else_merge_block() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[Type::I64], Some(Type::Unit));

        let entry_block = builder.append_block();
        let then_block = builder.append_block();
        let else_block = builder.append_block();
        let merge_block = builder.append_block();

        let arg0 = builder.args()[0];

        builder.switch_to_block(entry_block);
        builder.insert_inst_no_result(InstData::br(arg0, then_block, else_block));

        builder.switch_to_block(then_block);
        let v1 = builder.make_imm_value(1i64);
        builder.insert_inst_no_result(InstData::jump(merge_block));

        builder.switch_to_block(else_block);
        let v2 = builder.make_imm_value(2i64);
        builder.insert_inst_no_result(InstData::jump(merge_block));

        builder.switch_to_block(merge_block);
        let phi = InstData::phi(&[(v1, then_block), (v2, else_block)]);
        let v3 = builder.insert_inst(phi, Type::I64);
        builder.insert_inst(InstData::binary(BinaryOp::Add, v3, arg0), Type::I64);
        builder.insert_inst_no_result(InstData::ret(None));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func(v0.i64) -> unit {
    block0:
        br v0 block1 block2;

    block1:
        jump block3;

    block2:
        jump block3;

    block3:
        v3.i64 = phi (1.i64 block1) (2.i64 block2);
        v4.i64 = add v3 v0;
        return;
}
"
        );
    }

    #[test]
    fn source_backed_insts() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[], Some(Type::I32));

        let b0 = builder.append_block();
        builder.switch_to_block(b0);
        builder.set_loc(Loc::source(Origin::ReturnStmt, Span::new(10, 19)));
        let v0 = builder.make_imm_value(7i32);
        builder.insert_inst_no_result(InstData::ret(Some(v0)));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func() -> i32 {
    block0:
        @ret(10..19) return 7.i32;
}
"
        );
    }
}
