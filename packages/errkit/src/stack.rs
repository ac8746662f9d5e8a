//! Call-site capture for structured errors
//!
//! Construction records the caller's [`Location`] and, with the
//! `full-backtrace` feature, the raw frame addresses. Symbolisation is the
//! expensive part and only happens the first time the trace is read.

use once_cell::sync::OnceCell;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "full-backtrace")]
use backtrace::{Backtrace, BacktraceSymbol};

/// Default number of frames kept in a resolved stack trace.
pub const DEFAULT_MAX_STACK_FRAMES: usize = 16;

static MAX_STACK_FRAMES: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_STACK_FRAMES);

/// Symbol prefixes that belong to the capture machinery rather than the caller.
#[cfg(feature = "full-backtrace")]
const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "<backtrace::", "errkit::", "<errkit::"];

/// Current limit on resolved frames
#[must_use]
pub fn max_stack_frames() -> usize {
    MAX_STACK_FRAMES.load(Ordering::Relaxed)
}

/// Change the limit on resolved frames (values below one are raised to one).
///
/// Traces that were already resolved keep their length.
pub fn set_max_stack_frames(frames: usize) {
    MAX_STACK_FRAMES.store(frames.max(1), Ordering::Relaxed);
}

/// A single call site in a captured stack trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Source file, empty when unavailable
    pub file: String,
    /// Line number, zero when unavailable
    pub line: u32,
    /// Fully qualified function name, empty when only the location is known
    pub function: String,
    /// Module path of the function
    pub module: String,
}

impl Call {
    fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            function: String::new(),
            module: String::new(),
        }
    }

    #[cfg(feature = "full-backtrace")]
    fn from_symbol(symbol: &BacktraceSymbol) -> Option<Self> {
        let function = format!("{:#}", symbol.name()?);
        Some(Self {
            file: symbol
                .filename()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            line: symbol.lineno().unwrap_or(0),
            module: module_of(&function).to_string(),
            function,
        })
    }
}

/// Module path of a demangled function name (everything before the last `::`)
fn module_of(function: &str) -> &str {
    function
        .rsplit_once("::")
        .map_or("", |(module, _)| module)
}

#[cfg(feature = "full-backtrace")]
fn is_internal(function: &str) -> bool {
    // Trait impls demangle as `<Type as errkit::Trait>::method`.
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix))
        || (function.starts_with('<') && function.contains(" as errkit::"))
}

/// Raw capture stored on every structured error
#[derive(Debug, Clone)]
pub(crate) struct StackCapture {
    origin: &'static Location<'static>,
    #[cfg(feature = "full-backtrace")]
    raw: Backtrace,
    resolved: OnceCell<Vec<Call>>,
}

impl StackCapture {
    pub(crate) fn capture(origin: &'static Location<'static>) -> Self {
        Self {
            origin,
            #[cfg(feature = "full-backtrace")]
            raw: Backtrace::new_unresolved(),
            resolved: OnceCell::new(),
        }
    }

    pub(crate) fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    pub(crate) fn calls(&self) -> &[Call] {
        self.resolved.get_or_init(|| self.resolve())
    }

    fn resolve(&self) -> Vec<Call> {
        #[cfg(feature = "full-backtrace")]
        {
            let calls = symbolize(&self.raw, max_stack_frames());
            if !calls.is_empty() {
                return calls;
            }
            tracing::debug!("stack symbolisation produced no frames, using call-site location");
        }
        vec![Call::from_location(self.origin)]
    }
}

#[cfg(feature = "full-backtrace")]
fn symbolize(raw: &Backtrace, limit: usize) -> Vec<Call> {
    let mut resolved = raw.clone();
    resolved.resolve();
    resolved
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(Call::from_symbol)
        .skip_while(|call| is_internal(&call.function))
        .take(limit)
        .collect()
}
