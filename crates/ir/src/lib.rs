pub mod builder;
pub mod dfg;
pub mod function;
pub mod inst;
pub mod ir_writer;
pub mod layout;
pub mod linkage;
pub mod loc;
pub mod module;
pub mod types;
pub mod value;

pub use dfg::{Block, BlockId, DataFlowGraph};
pub use function::{Function, Signature};
pub use inst::{BinaryOp, InstData, InstId};
pub use layout::Layout;
pub use linkage::Linkage;
pub use loc::{Loc, Origin, SourcePos, Span};
pub use module::Module;
pub use types::Type;
pub use value::{Immediate, Value, ValueId};
