pub mod builder;
pub mod pool;

extern crate anyhow;
extern crate bytes;
extern crate enum_as_inner;
extern crate support;
