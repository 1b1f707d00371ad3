//! Callback appender
//!
//! A callback sink is a plain function pointer paired with an opaque user
//! parameter. The pair is the sink's identity: registering it twice is a
//! no-op, and unregistering it removes exactly that pair.

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::ffi::c_void;
use std::fmt;
use std::ptr;

/// Signature of a callback sink.
///
/// Called synchronously with the registry lock held. The callback must not
/// call any of the logger configuration functions; log records it emits
/// itself are discarded.
pub type CallbackFunction =
    fn(user: UserParam, channel: &str, function: &str, level: LogLevel, message: &str);

/// Opaque, non-owning user parameter handed back to a callback.
///
/// The logger never dereferences it and does not keep the referent alive.
/// Whoever registers a callback with a pointer to some object must
/// unregister it before that object is dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserParam(*mut c_void);

// SAFETY: the logger only stores and compares the pointer value; any
// dereference happens in user code under the registration contract above.
unsafe impl Send for UserParam {}
unsafe impl Sync for UserParam {}

impl UserParam {
    /// A parameter carrying no context
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    pub fn new<T>(value: &T) -> Self {
        Self(value as *const T as *mut c_void)
    }

    pub const fn from_ptr(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub const fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Reborrow the referent.
    ///
    /// # Safety
    ///
    /// The parameter must have been created from a live `&T` that is still
    /// valid for `'a`.
    pub unsafe fn as_ref<'a, T>(&self) -> Option<&'a T> {
        (self.0 as *const T).as_ref()
    }
}

impl Default for UserParam {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for UserParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserParam({:p})", self.0)
    }
}

pub struct CallbackAppender {
    function: CallbackFunction,
    user: UserParam,
}

impl CallbackAppender {
    pub fn new(function: CallbackFunction, user: UserParam) -> Self {
        Self { function, user }
    }

    /// Identity comparison on the (function, user parameter) pair
    pub fn is(&self, function: CallbackFunction, user: UserParam) -> bool {
        self.function as usize == function as usize && self.user == user
    }
}

impl Appender for CallbackAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        (self.function)(
            self.user,
            entry.channel,
            entry.function_name(),
            entry.level,
            &entry.message,
        );
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "callback"
    }
}
