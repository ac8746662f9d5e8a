//! Macros for error creation and handling

/// Create a [`CodedError`](crate::CodedError) from a format string
///
/// A plain literal is used as-is; with arguments it behaves like `format!`.
#[macro_export]
macro_rules! coded {
    ($($arg:tt)+) => {
        $crate::CodedError::new(::std::format!($($arg)+))
    };
}

/// Wrap an error, optionally with a formatted message
#[macro_export]
macro_rules! wrap {
    ($err:expr $(,)?) => {
        $crate::CodedError::wrap($err)
    };
    ($err:expr, $($arg:tt)+) => {
        $crate::CodedError::wrap_with($err, ::std::format!($($arg)+))
    };
}

/// Return early with a coded error
#[macro_export]
macro_rules! bail {
    ($code:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::coded!($($arg)+).with_code($code),
        ))
    };
}

/// Return early with a coded error unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $code:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($code, $($arg)+);
        }
    };
}
