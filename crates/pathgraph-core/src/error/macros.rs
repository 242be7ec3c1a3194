//! Error macros for pathgraph

/// Macro for returning an invalid configuration error
#[macro_export]
macro_rules! bail_config {
    ($($arg:tt)*) => {
        return Err($crate::error::PathError::invalid_configuration(format!($($arg)*)))
    };
}
