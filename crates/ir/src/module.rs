use cranelift_entity::{entity_impl, PrimaryMap};

use super::{Function, Linkage};

#[derive(Debug, Default)]
pub struct Module {
    /// Holds all functions declared in the module.
    pub funcs: PrimaryMap<FuncRef, Function>,
}

impl Module {
    pub fn new() -> Self {
        Self {
            funcs: PrimaryMap::default(),
        }
    }

    /// Returns `func_ref` in the module, in declaration order.
    pub fn iter_functions(&self) -> impl Iterator<Item = FuncRef> {
        self.funcs.keys()
    }

    /// Returns `true` if the function has external linkage.
    pub fn is_external(&self, func_ref: FuncRef) -> bool {
        self.funcs[func_ref].sig.linkage() == Linkage::External
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncRef(u32);
entity_impl!(FuncRef, "func");
