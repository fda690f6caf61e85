use crate::context::Context;
use crate::error::RuntimeResult;
use fxhash::FxHashMap;

mod class;
mod compare;
mod holder;
mod object;

pub use class::{ClassData, ClassRef, InstanceData, Method};
pub use compare::*;
pub use holder::ObjectHolder;
pub use object::{is_true, Object};

/// Name-to-object mapping, serving both as a lexical scope frame and
/// as an instance's field table.
pub type Closure = FxHashMap<String, ObjectHolder>;

/// Contract between the parser's AST nodes and this runtime. A node
/// that returns control without producing a value returns an empty
/// holder.
pub trait Executable {
    fn execute(&self, closure: &mut Closure, context: &mut dyn Context)
        -> RuntimeResult<ObjectHolder>;
}
