pub mod bytes_ext;
pub mod encoding;
pub mod long;
