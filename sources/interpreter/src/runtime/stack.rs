use support::long::{combine32, split64};
use thiserror::Error;

use super::value::RuntimeValue;

/// The operand stack of the method being interpreted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperandStack {
    values: Vec<RuntimeValue>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<RuntimeValue>) {
        self.values.push(value.into())
    }

    pub fn pop(&mut self) -> Option<RuntimeValue> {
        self.values.pop()
    }

    pub fn peek(&self) -> Option<&RuntimeValue> {
        self.values.last()
    }

    /// Push a long as its two halves, high first
    pub fn push_long(&mut self, value: i64) {
        let (high, low) = split64(value);
        self.values.push(RuntimeValue::Int(high));
        self.values.push(RuntimeValue::Int(low));
    }

    /// Read the long in the top two slots without popping it
    pub fn peek_long(&self) -> Option<i64> {
        let len = self.values.len();
        if len < 2 {
            return None;
        }

        let high = self.values[len - 2].int_value()?;
        let low = self.values[len - 1].int_value()?;
        Some(combine32(high, low))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[RuntimeValue] {
        &self.values
    }

    pub fn clear(&mut self) {
        self.values.clear()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalsError {
    #[error("no local @ {index} ({len} populated)")]
    Unset { index: usize, len: usize },

    #[error("first store to local {index} skips unpopulated locals ({len} populated)")]
    OutOfOrderStore { index: usize, len: usize },

    #[error("local {index} exceeds the {max} declared locals")]
    OutOfBounds { index: usize, max: usize },
}

/// The local variable array.
///
/// Locals are populated in order: a store overwrites an existing slot or
/// appends the next one. Storing further out than the next slot would leave
/// a hole, so it is rejected with [`LocalsError::OutOfOrderStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locals {
    slots: Vec<RuntimeValue>,
    max: Option<usize>,
}

impl Locals {
    /// `max` is the method's declared local variable count, if known
    pub fn new(max: Option<usize>) -> Self {
        Self {
            slots: Vec::with_capacity(max.unwrap_or_default()),
            max,
        }
    }

    pub fn load(&self, index: usize) -> Result<&RuntimeValue, LocalsError> {
        self.slots.get(index).ok_or(LocalsError::Unset {
            index,
            len: self.slots.len(),
        })
    }

    pub fn store(&mut self, index: usize, value: RuntimeValue) -> Result<(), LocalsError> {
        self.check_store(index)?;

        if index < self.slots.len() {
            self.slots[index] = value;
        } else {
            self.slots.push(value);
        }

        Ok(())
    }

    /// Store the two halves of a long at `index` and `index + 1`. Nothing is
    /// written unless both slots can be.
    pub fn store_pair(
        &mut self,
        index: usize,
        high: RuntimeValue,
        low: RuntimeValue,
    ) -> Result<(), LocalsError> {
        self.check_store(index)?;
        self.check_bounds(index + 1)?;

        self.store(index, high)?;
        self.store(index + 1, low)
    }

    fn check_store(&self, index: usize) -> Result<(), LocalsError> {
        self.check_bounds(index)?;

        let len = self.slots.len();
        if index > len {
            return Err(LocalsError::OutOfOrderStore { index, len });
        }

        Ok(())
    }

    fn check_bounds(&self, index: usize) -> Result<(), LocalsError> {
        match self.max {
            Some(max) if index >= max => Err(LocalsError::OutOfBounds { index, max }),
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn values(&self) -> &[RuntimeValue] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.clear()
    }
}
