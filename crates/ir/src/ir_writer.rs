//! This module contains the human readable form of coda IR.
use std::io;

use crate::{BlockId, Function, InstData, InstId, Loc, Module, Signature, Value, ValueId};

pub struct ModuleWriter<'a> {
    module: &'a Module,
}

impl<'a> ModuleWriter<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }

    pub fn write(&mut self, mut w: impl io::Write) -> io::Result<()> {
        for func_ref in self.module.iter_functions() {
            let func = &self.module.funcs[func_ref];
            if func.sig.linkage().has_definition() {
                let mut func_writer = FuncWriter::new(func);
                func_writer.write(&mut w)?;
            } else {
                self.write_declaration(&func.sig, &mut w)?;
            }
            writeln!(w)?;
        }

        Ok(())
    }

    pub fn dump_string(&mut self) -> io::Result<String> {
        let mut s = Vec::new();
        self.write(&mut s)?;
        unsafe { Ok(String::from_utf8_unchecked(s)) }
    }

    fn write_declaration(&mut self, sig: &Signature, mut w: impl io::Write) -> io::Result<()> {
        write!(w, "declare {} %{}(", sig.linkage(), sig.name())?;

        let mut delim = "";
        for ty in sig.args() {
            write!(w, "{delim}{ty}")?;
            delim = ", ";
        }
        write!(w, ")")?;

        if let Some(ret_ty) = sig.ret_ty() {
            write!(w, " -> {ret_ty}")?;
        }

        writeln!(w, ";")
    }
}

pub struct FuncWriter<'a> {
    func: &'a Function,
    level: u8,
}

impl<'a> FuncWriter<'a> {
    pub fn new(func: &'a Function) -> Self {
        Self { func, level: 0 }
    }

    pub fn write(&mut self, mut w: impl io::Write) -> io::Result<()> {
        write!(
            w,
            "func {} %{}(",
            self.func.sig.linkage(),
            self.func.sig.name()
        )?;

        let mut delim = "";
        for &value in &self.func.arg_values {
            write!(w, "{delim}")?;
            self.write_value_with_ty(value, &mut w)?;
            delim = ", ";
        }
        write!(w, ")")?;

        if let Some(ret_ty) = self.func.sig.ret_ty() {
            write!(w, " -> {ret_ty}")?;
        }

        if !self.func.loc.is_synthetic() {
            write!(w, " {}", self.func.loc)?;
        }

        writeln!(w, " {{")?;
        self.level += 1;

        let mut is_first = true;
        for block in self.func.layout.iter_block() {
            if !is_first {
                writeln!(w)?;
            }
            self.write_block_with_inst(block, &mut w)?;
            is_first = false;
        }

        self.level -= 1;
        writeln!(w, "}}")?;

        Ok(())
    }

    pub fn dump_string(&mut self) -> io::Result<String> {
        let mut s = Vec::new();
        self.write(&mut s)?;
        unsafe { Ok(String::from_utf8_unchecked(s)) }
    }

    fn write_block_with_inst(&mut self, block: BlockId, mut w: impl io::Write) -> io::Result<()> {
        self.indent(&mut w)?;
        writeln!(w, "{block}:")?;

        self.level += 1;
        for inst in self.func.layout.iter_inst(block) {
            self.indent(&mut w)?;
            self.write_inst(inst, &mut w)?;
            writeln!(w, ";")?;
        }
        self.level -= 1;

        Ok(())
    }

    fn write_inst(&mut self, inst: InstId, mut w: impl io::Write) -> io::Result<()> {
        let loc = self.func.dfg.inst_loc(inst);
        if !loc.is_synthetic() {
            write!(w, "{loc} ")?;
        }

        if let Some(result) = self.func.dfg.inst_result(inst) {
            self.write_value(result, &mut w)?;
            write!(w, ".{} = ", self.func.dfg.value_ty(result))?;
        }

        match self.func.dfg.inst(inst) {
            InstData::Binary { code, args } => {
                write!(w, "{code} ")?;
                self.write_value(args[0], &mut w)?;
                write!(w, " ")?;
                self.write_value(args[1], &mut w)
            }

            InstData::Call { callee, args } => {
                write!(w, "call {callee}")?;
                for &arg in args {
                    write!(w, " ")?;
                    self.write_value(arg, &mut w)?;
                }
                Ok(())
            }

            InstData::Phi { values, blocks } => {
                write!(w, "phi")?;
                for (&value, block) in values.iter().zip(blocks.iter()) {
                    write!(w, " (")?;
                    self.write_value(value, &mut w)?;
                    write!(w, " {block})")?;
                }
                Ok(())
            }

            InstData::Jump { dest } => write!(w, "jump {dest}"),

            InstData::Br {
                cond,
                nz_dest,
                z_dest,
            } => {
                write!(w, "br ")?;
                self.write_value(*cond, &mut w)?;
                write!(w, " {nz_dest} {z_dest}")
            }

            InstData::BrTable {
                args,
                default,
                table,
            } => {
                write!(w, "br_table ")?;
                self.write_value(args[0], &mut w)?;
                if let Some(default) = default {
                    write!(w, " {default}")?;
                }
                for (&value, block) in args[1..].iter().zip(table.iter()) {
                    write!(w, " (")?;
                    self.write_value(value, &mut w)?;
                    write!(w, " {block})")?;
                }
                Ok(())
            }

            InstData::Return { arg } => {
                write!(w, "return")?;
                if let Some(arg) = arg {
                    write!(w, " ")?;
                    self.write_value(*arg, &mut w)?;
                }
                Ok(())
            }

            InstData::Unreachable => write!(w, "unreachable"),
        }
    }

    fn write_value(&self, value: ValueId, mut w: impl io::Write) -> io::Result<()> {
        match self.func.dfg.value(value) {
            Value::Immediate { imm, ty } => write!(w, "{imm}.{ty}"),
            _ => write!(w, "v{}", value.0),
        }
    }

    fn write_value_with_ty(&self, value: ValueId, mut w: impl io::Write) -> io::Result<()> {
        self.write_value(value, &mut w)?;
        write!(w, ".{}", self.func.dfg.value_ty(value))
    }

    fn indent(&self, mut w: impl io::Write) -> io::Result<()> {
        w.write_all(" ".repeat(self.level as usize * 4).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{test_util::*, ModuleBuilder},
        inst::BinaryOp,
        Linkage, Origin, Span, Type,
    };

    #[test]
    fn module_dump() {
        let mut mb = ModuleBuilder::new();

        let ext_sig =
            Signature::new("min", Linkage::External, &[Type::I32, Type::I32], Some(Type::I32));
        let ext = mb.declare_function(ext_sig, Loc::Synthetic);

        let sig = Signature::new("main", Linkage::Public, &[Type::I32], Some(Type::I32));
        let func_ref = mb.declare_function(sig, Loc::source(Origin::FuncDecl, Span::new(0, 42)));

        let mut builder = mb.func_builder(func_ref);
        let b0 = builder.append_block();
        builder.switch_to_block(b0);
        let arg0 = builder.args()[0];
        let v1 = builder.make_imm_value(1i32);
        let v2 = builder.insert_inst(InstData::call(ext, &[arg0, v1]), Type::I32);
        builder.insert_inst_no_result(InstData::ret(Some(v2)));
        builder.finish();

        let module = mb.build();
        let mut writer = ModuleWriter::new(&module);
        assert_eq!(
            writer.dump_string().unwrap(),
            "declare external %min(i32, i32) -> i32;

func public %main(v0.i32) -> i32 @fn_decl(0..42) {
    block0:
        v2.i32 = call func0 v0 1.i32;
        return v2;
}

"
        );
    }

    #[test]
    fn branch_table_dump() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[Type::I32], Some(Type::Unit));

        let b0 = builder.append_block();
        let b1 = builder.append_block();
        let b2 = builder.append_block();
        let b3 = builder.append_block();

        let arg0 = builder.args()[0];
        builder.switch_to_block(b0);
        let v1 = builder.make_imm_value(1i32);
        let v2 = builder.make_imm_value(2i32);
        builder.insert_inst_no_result(InstData::br_table(arg0, Some(b3), &[(v1, b1), (v2, b2)]));

        builder.switch_to_block(b1);
        builder.insert_inst_no_result(InstData::ret(None));

        builder.switch_to_block(b2);
        builder.insert_inst_no_result(InstData::ret(None));

        builder.switch_to_block(b3);
        builder.insert_inst_no_result(InstData::Unreachable);
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func(v0.i32) -> unit {
    block0:
        br_table v0 block3 (1.i32 block1) (2.i32 block2);

    block1:
        return;

    block2:
        return;

    block3:
        unreachable;
}
"
        );
    }

    #[test]
    fn binary_op_dump() {
        let mut mb = TestModuleBuilder::new();
        let mut builder = mb.func_builder(&[Type::I64, Type::I64], Some(Type::I1));

        let b0 = builder.append_block();
        builder.switch_to_block(b0);
        let args = builder.args();
        let (arg0, arg1) = (args[0], args[1]);
        let v2 = builder.insert_inst(InstData::binary(BinaryOp::Lt, arg0, arg1), Type::I1);
        let v3 = builder.insert_inst(InstData::binary(BinaryOp::Eq, arg0, arg1), Type::I1);
        let v4 = builder.insert_inst(InstData::binary(BinaryOp::Or, v2, v3), Type::I1);
        builder.insert_inst_no_result(InstData::ret(Some(v4)));
        builder.finish();

        let module = mb.build();
        let func = module.funcs.values().next().unwrap();
        assert_eq!(
            dump_func(func),
            "func public %test_func(v0.i64, v1.i64) -> i1 {
    block0:
        v2.i1 = lt v0 v1;
        v3.i1 = eq v0 v1;
        v4.i1 = or v2 v3;
        return v4;
}
"
        );
    }
}
