extern crate mython;
use mython::*;

// Method bodies are built by the parser in the real interpreter; the
// stubs below stand in for it.

/// Body returning a fixed boolean.
struct ConstBool(bool);

impl Executable for ConstBool {
    fn execute(
        &self,
        _closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        Ok(ObjectHolder::own(Object::Bool(self.0)))
    }
}

/// Body returning a fixed number.
struct ConstNum(i64);

impl Executable for ConstNum {
    fn execute(
        &self,
        _closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        Ok(ObjectHolder::own(Object::Number(self.0)))
    }
}

/// Body returning a fixed string.
struct ConstStr(&'static str);

impl Executable for ConstStr {
    fn execute(
        &self,
        _closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        Ok(ObjectHolder::own(Object::String(self.0.to_string())))
    }
}

/// Body performing `self.<field> = <value>`.
struct SetField {
    field: &'static str,
    value: i64,
}

impl Executable for SetField {
    fn execute(
        &self,
        closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        let receiver = closure.get("self").cloned().expect("self is bound");
        match &mut *receiver.object_mut() {
            Object::Instance(instance) => {
                instance.fields_mut().insert(
                    self.field.to_string(),
                    ObjectHolder::own(Object::Number(self.value)),
                );
            }
            _ => panic!("receiver is not an instance"),
        }
        Ok(ObjectHolder::none())
    }
}

/// Body performing `return self.<field>`.
struct GetField(&'static str);

impl Executable for GetField {
    fn execute(
        &self,
        closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        let receiver = closure.get("self").cloned().expect("self is bound");
        let value = match &*receiver.object() {
            Object::Instance(instance) => instance
                .fields()
                .get(self.0)
                .cloned()
                .unwrap_or_else(ObjectHolder::none),
            _ => panic!("receiver is not an instance"),
        };
        Ok(value)
    }
}

/// Body performing `return <param>`.
struct ReturnParam(&'static str);

impl Executable for ReturnParam {
    fn execute(
        &self,
        closure: &mut Closure,
        _context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        Ok(closure
            .get(self.0)
            .cloned()
            .unwrap_or_else(ObjectHolder::none))
    }
}

/// Body performing `return self.<field> == <param>`.
struct CompareFieldEq {
    field: &'static str,
    param: &'static str,
}

impl Executable for CompareFieldEq {
    fn execute(
        &self,
        closure: &mut Closure,
        context: &mut dyn Context,
    ) -> RuntimeResult<ObjectHolder> {
        let receiver = closure.get("self").cloned().expect("self is bound");
        let other = closure.get(self.param).cloned().expect("parameter is bound");
        let field = match &*receiver.object() {
            Object::Instance(instance) => instance
                .fields()
                .get(self.field)
                .cloned()
                .unwrap_or_else(ObjectHolder::none),
            _ => panic!("receiver is not an instance"),
        };
        let result = equal(&field, &other, context)?;
        Ok(ObjectHolder::own(Object::Bool(result)))
    }
}

fn number(num: i64) -> ObjectHolder {
    ObjectHolder::own(Object::Number(num))
}

fn string(s: &str) -> ObjectHolder {
    ObjectHolder::own(Object::String(s.to_string()))
}

fn instance_of(class: ClassRef) -> ObjectHolder {
    ObjectHolder::own(Object::Instance(InstanceData::new(class)))
}

#[test]
fn method_lookup_walks_parent() {
    let base = ClassData::new(
        "Base",
        vec![
            Method::new("m", vec![], Box::new(ConstNum(1))),
            Method::new("only_base", vec![], Box::new(ConstNum(3))),
        ],
        None,
    );
    let derived = ClassData::new(
        "Derived",
        vec![Method::new("m", vec![], Box::new(ConstNum(2)))],
        Some(base),
    );
    assert!(derived.get_method("absent").is_none());

    let mut ctx = DummyContext::new();
    let inst = instance_of(derived);
    assert_eq!(Some(2), inst.call("m", &[], &mut ctx).unwrap().as_number());
    assert_eq!(
        Some(3),
        inst.call("only_base", &[], &mut ctx).unwrap().as_number()
    );
    let base_inst = instance_of(base);
    assert_eq!(
        Some(1),
        base_inst.call("m", &[], &mut ctx).unwrap().as_number()
    );
}

#[test]
fn has_method_checks_arity() {
    let class = ClassData::new(
        "C",
        vec![Method::new(
            "m",
            vec!["a".to_string()],
            Box::new(ConstNum(0)),
        )],
        None,
    );
    assert!(class.has_method("m", 1));
    assert!(!class.has_method("m", 0));
    assert!(!class.has_method("absent", 0));
    let inst = instance_of(class);
    assert!(inst.has_method("m", 1));
    assert!(!inst.has_method("m", 2));
    assert!(!number(1).has_method("m", 1));
    assert!(!ObjectHolder::none().has_method("m", 1));
}

#[test]
fn call_binds_self_and_mutates_fields() {
    let class = ClassData::new(
        "Counter",
        vec![
            Method::new(
                "set",
                vec![],
                Box::new(SetField {
                    field: "value",
                    value: 5,
                }),
            ),
            Method::new("get", vec![], Box::new(GetField("value"))),
        ],
        None,
    );
    let inst = instance_of(class);
    let mut ctx = DummyContext::new();
    assert!(inst.call("get", &[], &mut ctx).unwrap().is_none());
    assert!(inst.call("set", &[], &mut ctx).unwrap().is_none());
    // The mutation performed through `self` is visible afterwards.
    assert_eq!(Some(5), inst.call("get", &[], &mut ctx).unwrap().as_number());
    let obj = inst.object();
    match &*obj {
        Object::Instance(instance) => assert!(instance.fields().contains_key("value")),
        _ => unreachable!(),
    }
}

#[test]
fn call_binds_parameters_in_order() {
    let class = ClassData::new(
        "Pair",
        vec![Method::new(
            "second",
            vec!["a".to_string(), "b".to_string()],
            Box::new(ReturnParam("b")),
        )],
        None,
    );
    let inst = instance_of(class);
    let mut ctx = DummyContext::new();
    let result = inst
        .call("second", &[number(1), number(2)], &mut ctx)
        .unwrap();
    assert_eq!(Some(2), result.as_number());
}

#[test]
fn missing_method() {
    let class = ClassData::new(
        "C",
        vec![Method::new("m", vec![], Box::new(ConstNum(0)))],
        None,
    );
    let inst = instance_of(class);
    let mut ctx = DummyContext::new();

    let err = inst.call("absent", &[], &mut ctx).unwrap_err();
    assert_eq!(RuntimeErrKind::NoMethod, err.kind);
    assert_eq!("Method not found", err.message);
    // Arity mismatch is the same failure.
    assert!(inst.call("m", &[number(1)], &mut ctx).is_err());
    // So is calling through a non-instance or empty holder.
    assert!(number(1).call("m", &[], &mut ctx).is_err());
    assert!(ObjectHolder::none().call("m", &[], &mut ctx).is_err());
}

#[test]
fn equality_dispatch_is_inherited() {
    let parent = ClassData::new(
        "P",
        vec![Method::new(
            "__eq__",
            vec!["other".to_string()],
            Box::new(ConstBool(true)),
        )],
        None,
    );
    let child = ClassData::new("C", vec![], Some(parent));
    let inst = instance_of(child);
    let mut ctx = DummyContext::new();
    assert!(equal(&inst, &number(3), &mut ctx).unwrap());
    assert!(!not_equal(&inst, &number(3), &mut ctx).unwrap());
    // Only the left operand dispatches.
    assert!(equal(&number(3), &inst, &mut ctx).is_err());
}

#[test]
fn equality_dispatch_uses_arguments() {
    let class = ClassData::new(
        "Boxed",
        vec![Method::new(
            "__eq__",
            vec!["other".to_string()],
            Box::new(CompareFieldEq {
                field: "n",
                param: "other",
            }),
        )],
        None,
    );
    let inst = instance_of(class);
    match &mut *inst.object_mut() {
        Object::Instance(instance) => {
            instance.fields_mut().insert("n".to_string(), number(7));
        }
        _ => unreachable!(),
    }
    let mut ctx = DummyContext::new();
    assert!(equal(&inst, &number(7), &mut ctx).unwrap());
    assert!(!equal(&inst, &number(8), &mut ctx).unwrap());
}

#[test]
fn ordering_dispatch() {
    let class = ClassData::new(
        "Ord",
        vec![
            Method::new(
                "__lt__",
                vec!["other".to_string()],
                Box::new(ConstBool(false)),
            ),
            Method::new(
                "__eq__",
                vec!["other".to_string()],
                Box::new(ConstBool(true)),
            ),
        ],
        None,
    );
    let inst = instance_of(class);
    let mut ctx = DummyContext::new();
    assert!(!less(&inst, &number(0), &mut ctx).unwrap());
    assert!(greater_or_equal(&inst, &number(0), &mut ctx).unwrap());
    assert!(!greater(&inst, &number(0), &mut ctx).unwrap());
    assert!(less_or_equal(&inst, &number(0), &mut ctx).unwrap());
}

#[test]
fn dunder_result_must_be_bool() {
    let class = ClassData::new(
        "Bad",
        vec![Method::new(
            "__eq__",
            vec!["other".to_string()],
            Box::new(ConstNum(1)),
        )],
        None,
    );
    let inst = instance_of(class);
    let mut ctx = DummyContext::new();
    let err = equal(&inst, &number(1), &mut ctx).unwrap_err();
    assert_eq!(RuntimeErrKind::Type, err.kind);
}

#[test]
fn print_scalars() {
    let mut ctx = DummyContext::new();
    number(42).print(&mut ctx).unwrap();
    string(" hi").print(&mut ctx).unwrap();
    ObjectHolder::own(Object::Bool(true)).print(&mut ctx).unwrap();
    ObjectHolder::own(Object::Bool(false)).print(&mut ctx).unwrap();
    assert_eq!("42 hiTrueFalse", ctx.output());
}

#[test]
fn print_class() {
    let class = ClassData::new("Rect", vec![], None);
    let mut ctx = DummyContext::new();
    ObjectHolder::own(Object::Class(class)).print(&mut ctx).unwrap();
    assert_eq!("Class Rect", ctx.output());
}

#[test]
fn str_dispatch_is_dynamic() {
    let base = ClassData::new(
        "Base",
        vec![Method::new("__str__", vec![], Box::new(ConstStr("base")))],
        None,
    );
    let derived = ClassData::new(
        "Derived",
        vec![Method::new("__str__", vec![], Box::new(ConstStr("derived")))],
        Some(base),
    );

    let mut ctx = DummyContext::new();
    instance_of(base).print(&mut ctx).unwrap();
    assert_eq!("base", ctx.output());

    // The override in the actual class of the instance wins.
    let mut ctx = DummyContext::new();
    instance_of(derived).print(&mut ctx).unwrap();
    assert_eq!("derived", ctx.output());

    // Inherited when the derived class has no override.
    let plain = ClassData::new("Plain", vec![], Some(base));
    let mut ctx = DummyContext::new();
    instance_of(plain).print(&mut ctx).unwrap();
    assert_eq!("base", ctx.output());
}

#[test]
fn print_identity_without_str() {
    let bare = ClassData::new("Bare", vec![], None);
    let mut ctx = DummyContext::new();
    instance_of(bare).print(&mut ctx).unwrap();
    assert!(ctx.output().starts_with("0x"));

    // A `__str__` taking parameters does not qualify.
    let wrong_arity = ClassData::new(
        "WrongArity",
        vec![Method::new(
            "__str__",
            vec!["x".to_string()],
            Box::new(ConstStr("nope")),
        )],
        None,
    );
    let mut ctx = DummyContext::new();
    instance_of(wrong_arity).print(&mut ctx).unwrap();
    assert!(ctx.output().starts_with("0x"));
}

#[test]
fn share_views_same_object() {
    let class = ClassData::new("C", vec![], None);
    let owner = instance_of(class);
    let view = owner.share();
    assert!(view.is_some());
    match &mut *view.object_mut() {
        Object::Instance(instance) => {
            instance.fields_mut().insert("x".to_string(), number(1));
        }
        _ => unreachable!(),
    }
    match &*owner.object() {
        Object::Instance(instance) => assert!(instance.fields().contains_key("x")),
        _ => unreachable!(),
    }
    assert!(ObjectHolder::none().share().is_none());
}

#[test]
fn try_as_projections() {
    assert_eq!(Some(3), number(3).as_number());
    assert_eq!(None, number(3).as_bool());
    assert!(number(3).as_str().is_none());
    let s = string("abc");
    assert_eq!("abc", &*s.as_str().unwrap());
    let class = ClassData::new("C", vec![], None);
    let holder = ObjectHolder::own(Object::Class(class));
    assert_eq!(Some(class), holder.as_class());
    assert!(holder.as_number().is_none());
    assert!(ObjectHolder::none().as_number().is_none());
}

#[test]
fn simple_context_delegates() {
    let mut sink: Vec<u8> = vec![];
    {
        let mut ctx = SimpleContext::new(&mut sink);
        number(7).print(&mut ctx).unwrap();
    }
    assert_eq!(b"7".to_vec(), sink);
}
