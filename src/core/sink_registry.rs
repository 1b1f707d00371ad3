//! Sink registry
//!
//! Holds every active output sink in delivery order. One mutex covers both
//! configuration and the per-record fan-out loop, so disabling a sink can
//! never race with a write to it.
//!
//! **Per-Sink Isolation**: each sink is called inside `catch_unwind`; an
//! error or panic in one sink is reported on stderr and counted, and the
//! remaining sinks still receive the record.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    timestamp::TimestampFormat,
};
use crate::appenders::{
    CallbackAppender, CallbackFunction, ConsoleAppender, DebugConsoleAppender, FileAppender,
    UserParam,
};
use parking_lot::{Mutex, MutexGuard};
use std::any::Any;
use std::cell::RefCell;
use std::path::Path;

thread_local! {
    // Registries whose fan-out loop is running on this thread
    static DISPATCHING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks one registry as dispatching on this thread. Clears the mark even if
/// a sink unwinds through us.
struct DispatchScope {
    registry: usize,
}

impl DispatchScope {
    fn enter(registry: &SinkRegistry) -> Option<Self> {
        let registry = registry_key(registry);
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&registry) {
                None
            } else {
                active.push(registry);
                Some(DispatchScope { registry })
            }
        })
    }

    fn active(registry: &SinkRegistry) -> bool {
        let registry = registry_key(registry);
        DISPATCHING.with(|active| active.borrow().contains(&registry))
    }
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|&key| key == self.registry) {
                active.remove(pos);
            }
        });
    }
}

fn registry_key(registry: &SinkRegistry) -> usize {
    registry as *const SinkRegistry as usize
}

enum Sink {
    Console(ConsoleAppender),
    Debug(DebugConsoleAppender),
    File(FileAppender),
    Callback(CallbackAppender),
    Custom(Box<dyn Appender>),
}

impl Sink {
    fn appender(&mut self) -> &mut dyn Appender {
        match self {
            Sink::Console(appender) => appender,
            Sink::Debug(appender) => appender,
            Sink::File(appender) => appender,
            Sink::Callback(appender) => appender,
            Sink::Custom(appender) => appender.as_mut(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Sink::Console(appender) => appender.name(),
            Sink::Debug(appender) => appender.name(),
            Sink::File(appender) => appender.name(),
            Sink::Callback(appender) => appender.name(),
            Sink::Custom(appender) => appender.name(),
        }
    }
}

struct RegistryState {
    sinks: Vec<Sink>,
    timestamp_format: TimestampFormat,
}

impl RegistryState {
    fn position(&self, predicate: impl Fn(&Sink) -> bool) -> Option<usize> {
        self.sinks.iter().position(predicate)
    }

    fn remove(&mut self, index: Option<usize>) {
        if let Some(index) = index {
            let mut sink = self.sinks.remove(index);
            if let Err(e) = sink.appender().flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed on removal: {}", sink.name(), e);
            }
        }
    }
}

pub struct SinkRegistry {
    state: Mutex<RegistryState>,
}

impl SinkRegistry {
    /// An empty registry with no sinks enabled
    pub const fn new() -> Self {
        Self {
            state: parking_lot::const_mutex(RegistryState {
                sinks: Vec::new(),
                timestamp_format: TimestampFormat::Elapsed,
            }),
        }
    }

    /// Lock for a configuration change. Returns `None` when called from
    /// inside one of this registry's sinks on this thread, where locking
    /// would deadlock.
    fn lock_for_config(&self, operation: &str) -> Option<MutexGuard<'_, RegistryState>> {
        let guard = self.lock_outside_dispatch();
        if guard.is_none() {
            eprintln!(
                "[LOGGER WARNING] {} called from inside a log sink; ignored",
                operation
            );
        }
        guard
    }

    fn lock_outside_dispatch(&self) -> Option<MutexGuard<'_, RegistryState>> {
        if DispatchScope::active(self) {
            return None;
        }
        Some(self.state.lock())
    }

    pub fn set_console_output(&self, enabled: bool, timestamps: bool) {
        let Some(mut state) = self.lock_for_config("set_console_output") else {
            return;
        };
        let index = state.position(|sink| matches!(sink, Sink::Console(_)));

        if !enabled {
            state.remove(index);
            return;
        }

        match index {
            Some(index) => {
                if let Sink::Console(console) = &mut state.sinks[index] {
                    console.set_timestamps(timestamps);
                }
            }
            None => {
                let console = ConsoleAppender::new(timestamps)
                    .with_timestamp_format(state.timestamp_format.clone());
                state.sinks.push(Sink::Console(console));
            }
        }
    }

    pub fn set_debug_output(&self, enabled: bool) {
        let Some(mut state) = self.lock_for_config("set_debug_output") else {
            return;
        };
        let index = state.position(|sink| matches!(sink, Sink::Debug(_)));

        if !enabled {
            state.remove(index);
        } else if index.is_none() {
            state.sinks.push(Sink::Debug(DebugConsoleAppender::new()));
        }
    }

    /// Enable, reconfigure or disable the file sink.
    ///
    /// Re-enabling with the same path only updates the timestamp setting.
    /// A new path truncates and reopens; if that fails the file sink ends up
    /// disabled and the error is returned.
    pub fn set_file_output(&self, enabled: bool, path: Option<&Path>, timestamps: bool) -> Result<()> {
        let Some(mut state) = self.lock_for_config("set_file_output") else {
            return Ok(());
        };
        let index = state.position(|sink| matches!(sink, Sink::File(_)));

        let path = match (enabled, path) {
            (true, Some(path)) => path,
            (true, None) => {
                state.remove(index);
                return Err(LoggerError::config(
                    "file output",
                    "enabling the file sink requires a path",
                ));
            }
            (false, _) => {
                state.remove(index);
                return Ok(());
            }
        };

        if let Some(index) = index {
            if let Sink::File(file) = &mut state.sinks[index] {
                if file.path() == path {
                    file.set_timestamps(timestamps);
                    return Ok(());
                }
            }
        }

        // Close the previous file before truncating a possibly identical target
        state.remove(index);
        let appender = FileAppender::new(path, timestamps)?
            .with_timestamp_format(state.timestamp_format.clone());
        match index {
            Some(index) => state.sinks.insert(index, Sink::File(appender)),
            None => state.sinks.push(Sink::File(appender)),
        }
        Ok(())
    }

    /// Change the timestamp format of the console and file sinks
    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        let Some(mut state) = self.lock_for_config("set_timestamp_format") else {
            return;
        };
        for sink in state.sinks.iter_mut() {
            match sink {
                Sink::Console(console) => console.set_timestamp_format(format.clone()),
                Sink::File(file) => file.set_timestamp_format(format.clone()),
                _ => {}
            }
        }
        state.timestamp_format = format;
    }

    /// Returns false if the pair was already registered
    pub fn register_callback(&self, function: CallbackFunction, user: UserParam) -> bool {
        let Some(mut state) = self.lock_for_config("register_callback") else {
            return false;
        };
        let exists = state.sinks.iter().any(|sink| match sink {
            Sink::Callback(callback) => callback.is(function, user),
            _ => false,
        });
        if !exists {
            state.sinks.push(Sink::Callback(CallbackAppender::new(function, user)));
        }
        !exists
    }

    /// Returns false if the pair was not registered
    pub fn unregister_callback(&self, function: CallbackFunction, user: UserParam) -> bool {
        let Some(mut state) = self.lock_for_config("unregister_callback") else {
            return false;
        };
        let index = state.position(|sink| match sink {
            Sink::Callback(callback) => callback.is(function, user),
            _ => false,
        });
        state.remove(index);
        index.is_some()
    }

    /// Register a custom appender after the existing sinks
    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        if let Some(mut state) = self.lock_for_config("add_appender") {
            state.sinks.push(Sink::Custom(appender));
        }
    }

    /// Remove the first custom appender with the given name
    pub fn remove_appender(&self, name: &str) -> bool {
        let Some(mut state) = self.lock_for_config("remove_appender") else {
            return false;
        };
        let index = state.position(|sink| matches!(sink, Sink::Custom(a) if a.name() == name));
        state.remove(index);
        index.is_some()
    }

    pub fn is_console_output_enabled(&self) -> bool {
        self.contains(|sink| matches!(sink, Sink::Console(_)))
    }

    pub fn is_debug_output_enabled(&self) -> bool {
        self.contains(|sink| matches!(sink, Sink::Debug(_)))
    }

    pub fn is_file_output_enabled(&self) -> bool {
        self.contains(|sink| matches!(sink, Sink::File(_)))
    }

    // Queries made from inside a sink see an empty registry
    fn contains(&self, predicate: impl Fn(&Sink) -> bool) -> bool {
        self.lock_outside_dispatch()
            .is_some_and(|state| state.sinks.iter().any(predicate))
    }

    /// Names of the active sinks in delivery order
    pub fn sink_names(&self) -> Vec<String> {
        self.lock_outside_dispatch()
            .map(|state| state.sinks.iter().map(|sink| sink.name().to_string()).collect())
            .unwrap_or_default()
    }

    pub fn sink_count(&self) -> usize {
        self.lock_outside_dispatch()
            .map_or(0, |state| state.sinks.len())
    }

    /// Deliver a record to every sink in order.
    ///
    /// A record produced from inside one of this registry's sinks on the
    /// same thread is dropped and counted instead of deadlocking on the
    /// registry lock. Other registries on the thread are unaffected.
    pub fn dispatch(&self, entry: &LogEntry<'_>, metrics: &LoggerMetrics) {
        let Some(_scope) = DispatchScope::enter(self) else {
            metrics.record_reentrant();
            return;
        };

        let mut state = self.state.lock();
        let mut has_error = false;

        for (idx, sink) in state.sinks.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.appender().append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_failed();
        } else {
            metrics.record_logged();
        }
    }

    /// Flush every sink, returning the first error after trying all of them
    pub fn flush(&self) -> Result<()> {
        let Some(mut state) = self.lock_for_config("flush") else {
            return Ok(());
        };
        let mut first_error = None;
        for sink in state.sinks.iter_mut() {
            if let Err(e) = sink.appender().flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
