//! Logging macros that capture the caller's source location

/// The [`SourceLocation`](crate::SourceLocation) of the macro call site
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(file!(), line!(), module_path!())
    };
}

/// Log at an explicit level.
///
/// ```ignore
/// log_at!(logger, Level::Info, "http", "served {} in {}ms", path, ms);
/// log_at!(logger, Level::Info, "http", { "status" => 200, "path" => path }; "served");
/// ```
///
/// The message and metadata are only built if some destination accepts the level.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $label:expr, { $($key:expr => $value:expr),* $(,)? }; $($arg:tt)+) => {
        $logger.log(
            $level,
            $label,
            || format!($($arg)+),
            || {
                #[allow(unused_mut)]
                let mut metadata = $crate::Metadata::new();
                $(metadata.insert($key, $value);)*
                metadata
            },
            None,
            $crate::location!(),
        )
    };
    ($logger:expr, $level:expr, $label:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $label,
            || format!($($arg)+),
            $crate::Metadata::new,
            None,
            $crate::location!(),
        )
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Verbose, $label, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $label, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $label, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warning, $label, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $label, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $label:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Critical, $label, $($arg)+)
    };
}
