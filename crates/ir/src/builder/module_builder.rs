use super::FunctionBuilder;
use crate::{module::FuncRef, Function, Loc, Module, Signature};

#[derive(Debug, Default)]
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_function(&mut self, sig: Signature, loc: Loc) -> FuncRef {
        self.module.funcs.push(Function::new(sig, loc))
    }

    pub fn func_builder(&mut self, func: FuncRef) -> FunctionBuilder<'_> {
        FunctionBuilder::new(&mut self.module.funcs[func])
    }

    pub fn build(self) -> Module {
        self.module
    }
}
