use crate::*;

/// A user-defined method: its name, the ordered formal parameter
/// names, and the executable body built by the parser.
pub struct Method {
    name: String,
    formal_params: Vec<String>,
    body: Box<dyn Executable>,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        formal_params: Vec<String>,
        body: Box<dyn Executable>,
    ) -> Self {
        Method {
            name: name.into(),
            formal_params,
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formal_params(&self) -> &[String] {
        &self.formal_params
    }

    pub fn body(&self) -> &dyn Executable {
        &*self.body
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Method {}({:?})", self.name, self.formal_params)
    }
}

/// Non-owning handle to a class record. Classes are created once and
/// live for the rest of the program; parents always outlive children.
pub type ClassRef = Ref<ClassData>;

/// A class: owns its methods, refers to its parent without owning it.
#[derive(Debug)]
pub struct ClassData {
    name: String,
    methods: Vec<Method>,
    parent: Option<ClassRef>,
}

impl ClassData {
    /// Allocate a class record for the remainder of the program.
    pub fn new(
        name: impl Into<String>,
        methods: Vec<Method>,
        parent: Option<ClassRef>,
    ) -> ClassRef {
        Ref::new(ClassData {
            name: name.into(),
            methods,
            parent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find a method by name: linear scan of the own table, then the
    /// parent chain. First hit wins, starting at the derived class.
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        match self.methods.iter().find(|method| method.name() == name) {
            Some(method) => Some(method),
            None => match &self.parent {
                Some(parent) => parent.get_method(name),
                None => None,
            },
        }
    }

    /// True if the chain defines `name` with exactly `argc` formal
    /// parameters.
    pub fn has_method(&self, name: &str, argc: usize) -> bool {
        matches!(self.get_method(name), Some(method) if method.formal_params().len() == argc)
    }
}

/// A class instance: a borrowed reference to its class and its field
/// table. The class outlives all of its instances.
#[derive(Debug)]
pub struct InstanceData {
    class: ClassRef,
    fields: Closure,
}

impl InstanceData {
    pub fn new(class: ClassRef) -> Self {
        InstanceData {
            class,
            fields: Closure::default(),
        }
    }

    pub fn class(&self) -> ClassRef {
        self.class
    }

    pub fn fields(&self) -> &Closure {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Closure {
        &mut self.fields
    }

    pub fn has_method(&self, name: &str, argc: usize) -> bool {
        self.class.has_method(name, argc)
    }
}
