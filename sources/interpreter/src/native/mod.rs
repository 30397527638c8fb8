use std::{collections::HashMap, fmt};

use crate::{error::Throwable, Interpreter};

pub mod host;
pub mod io;

/// A method implemented by the host. It works directly on the interpreter's
/// operand stack, popping its arguments and pushing its result.
pub type NativeFunction = fn(&mut Interpreter) -> Result<(), Throwable>;

pub trait NativeModule {
    fn classname() -> &'static str;

    fn methods() -> Vec<(String, NativeFunction)>;

    fn register(registry: &mut NativeRegistry) {
        for (name, method) in Self::methods() {
            registry.register(name, method);
        }
    }
}

/// Build the `(name, function)` pair for a native method, keyed by the name
/// `invokevirtual` resolves to, eg. `java/io/PrintStream.println:(I)V`
#[macro_export]
macro_rules! static_method {
    (class: $class: expr, name: $name: expr, descriptor: $descriptor: expr => $method: expr) => {{
        let method: $crate::native::NativeFunction = $method;
        (format!("{}.{}:{}", $class, $name, $descriptor), method)
    }};
}

/// Native methods, keyed by resolved method name
#[derive(Clone, Default)]
pub struct NativeRegistry {
    methods: HashMap<String, NativeFunction>,
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built in `println` and `nextInt` bindings
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        io::PrintStream::register(&mut registry);
        io::Scanner::register(&mut registry);

        registry
    }

    pub fn register(&mut self, name: impl Into<String>, method: NativeFunction) {
        self.methods.insert(name.into(), method);
    }

    pub fn get(&self, name: &str) -> Option<NativeFunction> {
        self.methods.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
