use crate::*;
use std::cell::{Ref as CellRef, RefCell, RefMut};
use std::io::Write;
use std::rc::Rc;

/// Shared cell holding a heap-allocated object.
pub(crate) type ObjectCell = RefCell<Object>;

#[derive(Debug, Clone)]
enum Handle {
    /// Shared ownership, reference-counted.
    Owned(Rc<ObjectCell>),
    /// Non-owning view. The caller guarantees the pointee outlives the
    /// holder; used to bind `self` without creating a cycle.
    Borrowed(Ref<ObjectCell>),
}

/// Uniform handle over a runtime object, in one of three states:
/// owning, borrowing, or empty. Dereferencing an empty holder is a
/// programming error and panics.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder(Option<Handle>);

impl ObjectHolder {
    /// Move `object` to the heap and take shared ownership of it.
    pub fn own(object: Object) -> Self {
        ObjectHolder(Some(Handle::Owned(Rc::new(RefCell::new(object)))))
    }

    /// The empty holder.
    pub fn none() -> Self {
        ObjectHolder(None)
    }

    /// A non-owning view of the same object. Does not keep the object
    /// alive; the caller guarantees it outlives the view.
    pub fn share(&self) -> Self {
        match &self.0 {
            Some(Handle::Owned(rc)) => {
                ObjectHolder(Some(Handle::Borrowed(Ref::from_ref(rc.as_ref()))))
            }
            Some(Handle::Borrowed(r)) => ObjectHolder(Some(Handle::Borrowed(*r))),
            None => ObjectHolder(None),
        }
    }

    /// The underlying cell, or `None` for the empty holder.
    pub(crate) fn get(&self) -> Option<&ObjectCell> {
        match &self.0 {
            Some(Handle::Owned(rc)) => Some(rc),
            Some(Handle::Borrowed(r)) => Some(&**r),
            None => None,
        }
    }

    fn cell(&self) -> &ObjectCell {
        self.get().expect("dereferenced an empty ObjectHolder")
    }

    /// Borrow the held object. Panics if the holder is empty.
    pub fn object(&self) -> CellRef<'_, Object> {
        self.cell().borrow()
    }

    /// Mutably borrow the held object. Panics if the holder is empty.
    pub fn object_mut(&self) -> RefMut<'_, Object> {
        self.cell().borrow_mut()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }
}

impl ObjectHolder {
    pub fn as_number(&self) -> Option<i64> {
        match self.get() {
            Some(cell) => match &*cell.borrow() {
                Object::Number(num) => Some(*num),
                _ => None,
            },
            None => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.get() {
            Some(cell) => match &*cell.borrow() {
                Object::Bool(b) => Some(*b),
                _ => None,
            },
            None => None,
        }
    }

    /// Borrow the held byte string, if the object is one.
    pub fn as_str(&self) -> Option<CellRef<'_, str>> {
        let cell = self.get()?;
        CellRef::filter_map(cell.borrow(), |object| match object {
            Object::String(s) => Some(s.as_str()),
            _ => None,
        })
        .ok()
    }

    pub fn as_class(&self) -> Option<ClassRef> {
        match self.get() {
            Some(cell) => match &*cell.borrow() {
                Object::Class(class) => Some(*class),
                _ => None,
            },
            None => None,
        }
    }
}

impl ObjectHolder {
    /// True if `self` holds a class instance whose chain defines
    /// `name` with exactly `argc` formal parameters.
    pub fn has_method(&self, name: &str, argc: usize) -> bool {
        match self.get() {
            Some(cell) => match &*cell.borrow() {
                Object::Instance(instance) => instance.has_method(name, argc),
                _ => false,
            },
            None => false,
        }
    }

    /// Call method `name` on the held instance. A fresh closure binds
    /// `self` (shared, non-owning) and then each formal parameter to
    /// the corresponding actual argument, in order.
    pub fn call(
        &self,
        name: &str,
        args: &[ObjectHolder],
        context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        let class = match self.get() {
            Some(cell) => match &*cell.borrow() {
                Object::Instance(instance) => instance.class(),
                _ => return Err(RuntimeError::no_method()),
            },
            None => return Err(RuntimeError::no_method()),
        };
        let method = match class.get_method(name) {
            Some(method) if method.formal_params().len() == args.len() => method,
            _ => return Err(RuntimeError::no_method()),
        };
        let mut closure = Closure::default();
        closure.insert("self".to_string(), self.share());
        for (param, arg) in method.formal_params().iter().zip(args) {
            closure.insert(param.clone(), arg.clone());
        }
        method.body().execute(&mut closure, context)
    }

    /// Print the held object to the context's output stream. Instances
    /// dispatch `__str__` when their class chain defines it with zero
    /// parameters, and fall back to an address identity token.
    pub fn print(&self, context: &mut dyn Context) -> RuntimeResult<()> {
        match &*self.object() {
            Object::Instance(instance) if instance.has_method("__str__", 0) => {}
            Object::Instance(_) => {
                let addr = self.cell() as *const ObjectCell as usize;
                write!(context.output_stream(), "{:#x}", addr)?;
                return Ok(());
            }
            object => {
                object.write_value(context.output_stream())?;
                return Ok(());
            }
        }
        let result = self.call("__str__", &[], context)?;
        result.print(context)
    }
}
