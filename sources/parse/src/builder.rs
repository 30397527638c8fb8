use crate::pool::{
    ConstantClass, ConstantEntry, ConstantFloat, ConstantInteger, ConstantMember,
    ConstantNameAndType, ConstantPool, ConstantString, ConstantUtf8, PoolError, PoolRef,
};

/// Largest class file index a single-byte reference can address
const MAX_ENTRIES: usize = u8::MAX as usize;

/// Assembles a [`ConstantPool`] without hand encoding info bytes.
///
/// Every method returns the 1-based class file index of the entry it added,
/// which is what instructions and other entries use to refer to it.
#[derive(Debug, Default)]
pub struct PoolBuilder {
    pool: ConstantPool,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConstantEntry) -> Result<u8, PoolError> {
        if self.pool.len() >= MAX_ENTRIES {
            return Err(PoolError::PoolFull(MAX_ENTRIES));
        }

        self.pool.insert(entry);
        Ok(self.pool.len() as u8)
    }

    pub fn utf8(&mut self, text: &str) -> Result<u8, PoolError> {
        self.push(ConstantEntry::Utf8(ConstantUtf8 {
            bytes: text.as_bytes().to_vec(),
        }))
    }

    pub fn integer(&mut self, value: i32) -> Result<u8, PoolError> {
        self.push(ConstantEntry::Integer(ConstantInteger { value }))
    }

    pub fn float(&mut self, value: f32) -> Result<u8, PoolError> {
        self.push(ConstantEntry::Float(ConstantFloat { value }))
    }

    pub fn class(&mut self, name: &str) -> Result<u8, PoolError> {
        let name = self.utf8(name)?;
        self.push(ConstantEntry::Class(ConstantClass {
            name: PoolRef::to(name),
        }))
    }

    pub fn string(&mut self, text: &str) -> Result<u8, PoolError> {
        let text = self.utf8(text)?;
        self.push(ConstantEntry::String(ConstantString {
            string: PoolRef::to(text),
        }))
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> Result<u8, PoolError> {
        let name = self.utf8(name)?;
        let descriptor = self.utf8(descriptor)?;
        self.push(ConstantEntry::NameAndType(ConstantNameAndType {
            name: PoolRef::to(name),
            descriptor: PoolRef::to(descriptor),
        }))
    }

    pub fn field(&mut self, class: &str, name: &str, descriptor: &str) -> Result<u8, PoolError> {
        let member = self.member(class, name, descriptor)?;
        self.push(ConstantEntry::Field(member))
    }

    pub fn method(&mut self, class: &str, name: &str, descriptor: &str) -> Result<u8, PoolError> {
        let member = self.member(class, name, descriptor)?;
        self.push(ConstantEntry::Method(member))
    }

    pub fn interface_method(
        &mut self,
        class: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<u8, PoolError> {
        let member = self.member(class, name, descriptor)?;
        self.push(ConstantEntry::InterfaceMethod(member))
    }

    fn member(
        &mut self,
        class: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<ConstantMember, PoolError> {
        let class = self.class(class)?;
        let name_and_type = self.name_and_type(name, descriptor)?;

        Ok(ConstantMember {
            class: PoolRef::to(class),
            name_and_type: PoolRef::to(name_and_type),
        })
    }

    pub fn build(self) -> ConstantPool {
        self.pool
    }
}
