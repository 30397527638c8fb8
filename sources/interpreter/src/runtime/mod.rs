pub mod stack;
pub mod value;
