use parse::pool::PoolError;
use thiserror::Error;

use crate::runtime::stack::LocalsError;

/// Conditions an instruction reports back to the driver instead of faulting.
/// The driver decides whether they end the run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    #[error("Error: Divides by Zero")]
    DivideByZero,
}

/// A fault raised while executing an instruction
#[derive(Error, Debug)]
pub enum Throwable {
    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Locals(#[from] LocalsError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[macro_export]
macro_rules! internal {
    ($msg:literal $(,)?) => {
        $crate::error::Throwable::Internal(anyhow::anyhow!($msg))
    };
    ($err:expr $(,)?) => {
        $crate::error::Throwable::Internal(anyhow::anyhow!($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::Throwable::Internal(anyhow::anyhow!($fmt, $($arg)*))
    };
}

