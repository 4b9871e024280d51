mod func_builder;
mod module_builder;

pub use func_builder::FunctionBuilder;
pub use module_builder::ModuleBuilder;

pub mod test_util {
    use super::*;

    use crate::{
        ir_writer::FuncWriter,
        module::{FuncRef, Module},
        Function, Linkage, Loc, Signature, Type,
    };

    pub struct TestModuleBuilder {
        module_builder: ModuleBuilder,
        func_ref: Option<FuncRef>,
    }

    impl TestModuleBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn func_builder(&mut self, args: &[Type], ret_ty: Option<Type>) -> FunctionBuilder {
            let sig = Signature::new("test_func", Linkage::Public, args, ret_ty);
            let func_ref = self.module_builder.declare_function(sig, Loc::Synthetic);
            self.func_ref = Some(func_ref);
            self.module_builder.func_builder(func_ref)
        }

        pub fn build(self) -> Module {
            self.module_builder.build()
        }
    }

    pub fn dump_func(func: &Function) -> String {
        let mut writer = FuncWriter::new(func);
        writer.dump_string().unwrap()
    }

    impl Default for TestModuleBuilder {
        fn default() -> Self {
            Self {
                module_builder: ModuleBuilder::new(),
                func_ref: None,
            }
        }
    }
}
