//! Call-site logging macros.
//!
//! Each module declares its channel once with [`log_channel!`], then logs
//! with one macro per level. Every macro checks the global threshold before
//! anything else, so on the rejected path the format arguments are never
//! evaluated.
//!
//! `error_log!` and `warning_log!` also record the enclosing function name.
//! `debug_log!` and `trace_log!` only emit in builds with
//! `debug_assertions`; their arguments are still type-checked elsewhere.
//!
//! # Examples
//!
//! ```
//! use rust_channel_logger::{error_log, info_log, log_channel};
//!
//! log_channel!(Net);
//!
//! fn connect(port: u16) {
//!     info_log!("connecting on port {}", port);
//!     error_log!("connect failed");
//! }
//!
//! connect(8080);
//!
//! // An explicit channel overrides the module's
//! info_log!(channel: "Disk"; "mounted {} volumes", 2);
//! ```

/// Declare the channel used by the logging macros in this module.
#[macro_export]
macro_rules! log_channel {
    ($name:ident) => {
        #[allow(dead_code)]
        const LOG_CHANNEL: &str = ::std::stringify!($name);
    };
}

/// Name of the enclosing function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        match name.rfind("::") {
            ::std::option::Option::Some(pos) => &name[pos + 2..],
            ::std::option::Option::None => name,
        }
    }};
}

/// Guarded write on a specific logger instance.
///
/// # Examples
///
/// ```
/// use rust_channel_logger::{log_to, Logger, LogLevel};
///
/// let logger = Logger::new();
/// log_to!(logger, LogLevel::Info, "Net", "Items: {}", 100);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr, $channel:expr, $($arg:tt)+) => {{
        let level = $level;
        let logger = &$logger;
        if logger.is_level_enabled(level) {
            logger.write_fmt_args($channel, ::std::option::Option::None, level, ::std::format_args!($($arg)+));
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_impl {
    ($level:expr, $channel:expr, $function:expr, $($arg:tt)+) => {{
        let level = $level;
        let logger = $crate::logger();
        if logger.is_level_enabled(level) {
            logger.write_fmt_args($channel, $function, level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Log at an explicit level on the module channel.
///
/// ```
/// use rust_channel_logger::{log_channel, log_write, LogLevel};
///
/// log_channel!(Cdrom);
/// log_write!(LogLevel::Verbose, "seek to sector {}", 16);
/// ```
#[macro_export]
macro_rules! log_write {
    ($level:expr, channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!($level, $channel, ::std::option::Option::None, $($arg)+)
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__log_impl!($level, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
    };
}

/// Log an error, tagged with the enclosing function name.
#[macro_export]
macro_rules! error_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!(
            $crate::LogLevel::Error,
            $channel,
            ::std::option::Option::Some($crate::__function_name!()),
            $($arg)+
        )
    };
    ($($arg:tt)+) => {
        $crate::__log_impl!(
            $crate::LogLevel::Error,
            LOG_CHANNEL,
            ::std::option::Option::Some($crate::__function_name!()),
            $($arg)+
        )
    };
}

/// Log a warning, tagged with the enclosing function name.
#[macro_export]
macro_rules! warning_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!(
            $crate::LogLevel::Warning,
            $channel,
            ::std::option::Option::Some($crate::__function_name!()),
            $($arg)+
        )
    };
    ($($arg:tt)+) => {
        $crate::__log_impl!(
            $crate::LogLevel::Warning,
            LOG_CHANNEL,
            ::std::option::Option::Some($crate::__function_name!()),
            $($arg)+
        )
    };
}

#[macro_export]
macro_rules! info_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Info, $channel, ::std::option::Option::None, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Info, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Verbose, $channel, ::std::option::Option::None, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Verbose, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
    };
}

#[macro_export]
macro_rules! dev_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Dev, $channel, ::std::option::Option::None, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_impl!($crate::LogLevel::Dev, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
    };
}

/// Debug-level message; a no-op without `debug_assertions`.
#[macro_export]
macro_rules! debug_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        if ::std::cfg!(debug_assertions) {
            $crate::__log_impl!($crate::LogLevel::Debug, $channel, ::std::option::Option::None, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if ::std::cfg!(debug_assertions) {
            $crate::__log_impl!($crate::LogLevel::Debug, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
        }
    };
}

/// Trace-level message; a no-op without `debug_assertions`.
#[macro_export]
macro_rules! trace_log {
    (channel: $channel:expr; $($arg:tt)+) => {
        if ::std::cfg!(debug_assertions) {
            $crate::__log_impl!($crate::LogLevel::Trace, $channel, ::std::option::Option::None, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if ::std::cfg!(debug_assertions) {
            $crate::__log_impl!($crate::LogLevel::Trace, LOG_CHANNEL, ::std::option::Option::None, $($arg)+)
        }
    };
}
