use std::fmt;

use enum_as_inner::EnumAsInner;
use support::bytes_ext::SafeBuf;
use thiserror::Error;
use tracing::trace;

/// Deepest chain of references followed before resolution gives up.
/// Well formed pools never need more than three hops.
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// Most entries visited while resolving a single name. Bounds pools whose
/// entries reference the same entry more than once.
pub const MAX_RESOLUTION_STEPS: usize = 4096;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("constant pool index {index} out of range (pool has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("unknown constant pool tag {0}")]
    UnknownTag(u8),

    #[error("malformed {tag:?} entry, expected {expected} info bytes but got {got}")]
    MalformedEntry {
        tag: ConstantTag,
        expected: usize,
        got: usize,
    },

    #[error("entry @ {index} ({tag:?}) does not resolve to a name")]
    NotResolvable { index: usize, tag: ConstantTag },

    #[error("entry @ {index} is not valid utf-8")]
    InvalidUtf8 { index: usize },

    #[error("resolving entry @ {index} did not terminate, the pool references itself")]
    Cycle { index: usize },

    #[error("resolving entry @ {index} visited more than {limit} entries")]
    TooManySteps { index: usize, limit: usize },

    #[error("constant pool cannot address more than {0} entries")]
    PoolFull(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantTag {
    Utf8,
    Integer,
    Float,
    Class,
    String,
    Field,
    Method,
    InterfaceMethod,
    NameAndType,
}

impl ConstantTag {
    pub fn from_tag(tag: u8) -> Result<Self, PoolError> {
        Ok(match tag {
            1 => ConstantTag::Utf8,
            3 => ConstantTag::Integer,
            4 => ConstantTag::Float,
            7 => ConstantTag::Class,
            8 => ConstantTag::String,
            9 => ConstantTag::Field,
            10 => ConstantTag::Method,
            11 => ConstantTag::InterfaceMethod,
            12 => ConstantTag::NameAndType,
            t => return Err(PoolError::UnknownTag(t)),
        })
    }

    pub fn value(&self) -> u8 {
        match self {
            ConstantTag::Utf8 => 1,
            ConstantTag::Integer => 3,
            ConstantTag::Float => 4,
            ConstantTag::Class => 7,
            ConstantTag::String => 8,
            ConstantTag::Field => 9,
            ConstantTag::Method => 10,
            ConstantTag::InterfaceMethod => 11,
            ConstantTag::NameAndType => 12,
        }
    }

    /// Number of info bytes the entry carries, `None` for variable length
    fn info_len(&self) -> Option<usize> {
        match self {
            ConstantTag::Utf8 => None,
            ConstantTag::Class | ConstantTag::String => Some(2),
            _ => Some(4),
        }
    }
}

/// A reference from one pool entry to another, kept as the two raw info bytes.
///
/// The referenced entry lives at `first + second - 1` in the (0-based) pool.
/// The bytes are summed rather than shifted together; everything that reads
/// references out of the pool, including the operand bytes of `getstatic` and
/// `invokevirtual`, addresses entries this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRef {
    pub first: u8,
    pub second: u8,
}

impl PoolRef {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Reference to the 1-based class file index `index`
    pub fn to(index: u8) -> Self {
        Self::new(0, index)
    }

    pub fn index(&self) -> Option<usize> {
        (self.first as usize + self.second as usize).checked_sub(1)
    }

    fn read(info: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self::new(info.try_get_u8()?, info.try_get_u8()?))
    }
}

impl fmt::Display for PoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}+{}", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantUtf8 {
    pub bytes: Vec<u8>,
}

impl ConstantUtf8 {
    pub fn try_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.bytes.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantInteger {
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantFloat {
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantClass {
    pub name: PoolRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantString {
    pub string: PoolRef,
}

/// Shared shape of field, method and interface method references
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantMember {
    pub class: PoolRef,
    pub name_and_type: PoolRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantNameAndType {
    pub name: PoolRef,
    pub descriptor: PoolRef,
}

#[derive(EnumAsInner, Clone, Debug, PartialEq)]
pub enum ConstantEntry {
    Utf8(ConstantUtf8),
    Integer(ConstantInteger),
    Float(ConstantFloat),
    Class(ConstantClass),
    String(ConstantString),
    Field(ConstantMember),
    Method(ConstantMember),
    InterfaceMethod(ConstantMember),
    NameAndType(ConstantNameAndType),
}

impl ConstantEntry {
    /// Build an entry from a tag and its raw info bytes, as handed over by the
    /// class file loader.
    pub fn from_raw(tag: u8, info: &[u8]) -> Result<Self, PoolError> {
        let tag = ConstantTag::from_tag(tag)?;

        if let Some(expected) = tag.info_len() {
            if info.len() != expected {
                return Err(PoolError::MalformedEntry {
                    tag,
                    expected,
                    got: info.len(),
                });
            }
        }

        let malformed = |_| PoolError::MalformedEntry {
            tag,
            expected: tag.info_len().unwrap_or_default(),
            got: info.len(),
        };

        let mut buf = info;
        let entry = match tag {
            ConstantTag::Utf8 => ConstantEntry::Utf8(ConstantUtf8 {
                bytes: info.to_vec(),
            }),
            ConstantTag::Integer => ConstantEntry::Integer(ConstantInteger {
                value: buf.try_get_i32().map_err(malformed)?,
            }),
            ConstantTag::Float => ConstantEntry::Float(ConstantFloat {
                value: f32::from_bits(buf.try_get_u32().map_err(malformed)?),
            }),
            ConstantTag::Class => ConstantEntry::Class(ConstantClass {
                name: PoolRef::read(&mut buf).map_err(malformed)?,
            }),
            ConstantTag::String => ConstantEntry::String(ConstantString {
                string: PoolRef::read(&mut buf).map_err(malformed)?,
            }),
            ConstantTag::Field | ConstantTag::Method | ConstantTag::InterfaceMethod => {
                let member = ConstantMember {
                    class: PoolRef::read(&mut buf).map_err(malformed)?,
                    name_and_type: PoolRef::read(&mut buf).map_err(malformed)?,
                };

                match tag {
                    ConstantTag::Field => ConstantEntry::Field(member),
                    ConstantTag::Method => ConstantEntry::Method(member),
                    _ => ConstantEntry::InterfaceMethod(member),
                }
            }
            ConstantTag::NameAndType => ConstantEntry::NameAndType(ConstantNameAndType {
                name: PoolRef::read(&mut buf).map_err(malformed)?,
                descriptor: PoolRef::read(&mut buf).map_err(malformed)?,
            }),
        };

        Ok(entry)
    }

    pub fn tag(&self) -> ConstantTag {
        match self {
            ConstantEntry::Utf8(_) => ConstantTag::Utf8,
            ConstantEntry::Integer(_) => ConstantTag::Integer,
            ConstantEntry::Float(_) => ConstantTag::Float,
            ConstantEntry::Class(_) => ConstantTag::Class,
            ConstantEntry::String(_) => ConstantTag::String,
            ConstantEntry::Field(_) => ConstantTag::Field,
            ConstantEntry::Method(_) => ConstantTag::Method,
            ConstantEntry::InterfaceMethod(_) => ConstantTag::InterfaceMethod,
            ConstantEntry::NameAndType(_) => ConstantTag::NameAndType,
        }
    }
}

/// The constant pool of the class being interpreted. Entries are stored
/// 0-based; class file index `n` is entry `n - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
    entries: Vec<ConstantEntry>,
}

impl From<Vec<ConstantEntry>> for ConstantPool {
    fn from(entries: Vec<ConstantEntry>) -> Self {
        Self { entries }
    }
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ConstantEntry) {
        self.entries.push(entry)
    }

    pub fn get(&self, index: usize) -> Option<&ConstantEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstantEntry> {
        self.entries.iter()
    }

    /// Look an entry up, failing with [`PoolError::IndexOutOfRange`] when absent
    pub fn entry(&self, index: usize) -> Result<&ConstantEntry, PoolError> {
        self.get(index).ok_or(PoolError::IndexOutOfRange {
            index: index as i64,
            len: self.len(),
        })
    }

    /// Resolve the entry at `index` into a name.
    ///
    /// Utf8 entries are the leaves. Every other entry follows its first
    /// reference, then appends `.` (method refs) or `:` (name and types),
    /// then follows its second reference if it has one. A method ref therefore
    /// resolves to something like `java/io/PrintStream.println:(I)V`.
    pub fn resolve(&self, index: usize) -> Result<String, PoolError> {
        self.resolve_nested(index, 0, &mut 0)
    }

    /// Resolve the entry a [`PoolRef`] points at
    pub fn resolve_ref(&self, reference: PoolRef) -> Result<String, PoolError> {
        self.follow(reference, 0, &mut 0)
    }

    fn follow(
        &self,
        reference: PoolRef,
        depth: usize,
        steps: &mut usize,
    ) -> Result<String, PoolError> {
        let index = reference.index().ok_or(PoolError::IndexOutOfRange {
            index: -1,
            len: self.len(),
        })?;

        self.resolve_nested(index, depth, steps)
    }

    fn resolve_nested(
        &self,
        index: usize,
        depth: usize,
        steps: &mut usize,
    ) -> Result<String, PoolError> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(PoolError::Cycle { index });
        }

        *steps += 1;
        if *steps > MAX_RESOLUTION_STEPS {
            return Err(PoolError::TooManySteps {
                index,
                limit: MAX_RESOLUTION_STEPS,
            });
        }

        let entry = self.entry(index)?;
        let depth = depth + 1;

        let name = match entry {
            ConstantEntry::Utf8(data) => data
                .try_string()
                .map_err(|_| PoolError::InvalidUtf8 { index })?,
            ConstantEntry::Class(data) => self.follow(data.name, depth, steps)?,
            ConstantEntry::String(data) => self.follow(data.string, depth, steps)?,
            ConstantEntry::Field(data) | ConstantEntry::InterfaceMethod(data) => {
                let class = self.follow(data.class, depth, steps)?;
                let name_and_type = self.follow(data.name_and_type, depth, steps)?;
                format!("{class}{name_and_type}")
            }
            ConstantEntry::Method(data) => {
                let class = self.follow(data.class, depth, steps)?;
                let name_and_type = self.follow(data.name_and_type, depth, steps)?;
                format!("{class}.{name_and_type}")
            }
            ConstantEntry::NameAndType(data) => {
                let name = self.follow(data.name, depth, steps)?;
                let descriptor = self.follow(data.descriptor, depth, steps)?;
                format!("{name}:{descriptor}")
            }
            ConstantEntry::Integer(_) | ConstantEntry::Float(_) => {
                return Err(PoolError::NotResolvable {
                    index,
                    tag: entry.tag(),
                })
            }
        };

        trace!("resolved pool entry @ {} to {:?}", index, name);
        Ok(name)
    }
}
