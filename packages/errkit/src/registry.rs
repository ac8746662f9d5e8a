//! Code registry: descriptions, conversions and capability probes
//!
//! A [`Registry`] is a plain value. The process-wide instance sits behind an
//! [`ArcSwap`]: readers take a snapshot with [`registry`], writers publish a
//! whole new value with [`set_registry`] or [`modify_registry`].

use crate::conversions::{canceled, deadline_exceeded};
use crate::details::{probe, DetailsProbe, ErrorDetails};
use crate::error::{CodedError, SharedError};
use arc_swap::ArcSwap;
use errkit_common::{Code, LoggingTransformer, BUILTIN_CODES};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Best-effort promotion of a foreign error into a [`CodedError`]
///
/// Returns `None` when the conversion does not recognise the error.
pub type ErrorConversion = Arc<dyn Fn(&SharedError) -> Option<CodedError> + Send + Sync>;

/// Mapping from codes to descriptions plus the ordered conversion list
#[derive(Clone, Default)]
pub struct Registry {
    descriptions: HashMap<Code, String>,
    conversions: Vec<ErrorConversion>,
    probes: Vec<DetailsProbe>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("descriptions", &self.descriptions)
            .field("conversions", &self.conversions.len())
            .field("probes", &self.probes.len())
            .finish()
    }
}

impl Registry {
    /// An empty registry: no descriptions, no conversions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in code descriptions and conversions
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.descriptions.extend(
            BUILTIN_CODES
                .iter()
                .map(|(code, description)| (*code, (*description).to_string())),
        );
        registry.register_error_conversions([
            Arc::new(canceled) as ErrorConversion,
            Arc::new(deadline_exceeded) as ErrorConversion,
        ]);
        registry
    }

    /// Register an application error code
    ///
    /// # Panics
    ///
    /// Panics if `code` lies in the reserved range or is already registered.
    /// Both are programming errors in the host application.
    pub fn register_error_code(&mut self, code: Code, description: impl Into<String>) -> &mut Self {
        assert!(
            !code.is_reserved(),
            "error code {code} is reserved for built-in codes"
        );
        assert!(
            !self.descriptions.contains_key(&code),
            "error code {code} is already registered"
        );
        let description = description.into();
        LoggingTransformer::log_code_registered(code, &description);
        self.descriptions.insert(code, description);
        self
    }

    /// Append one conversion; conversions run in registration order
    pub fn register_error_conversion<F>(&mut self, conversion: F) -> &mut Self
    where
        F: Fn(&SharedError) -> Option<CodedError> + Send + Sync + 'static,
    {
        self.register_error_conversions([Arc::new(conversion) as ErrorConversion])
    }

    /// Append several conversions, preserving their order
    pub fn register_error_conversions<I>(&mut self, conversions: I) -> &mut Self
    where
        I: IntoIterator<Item = ErrorConversion>,
    {
        let before = self.conversions.len();
        self.conversions.extend(conversions);
        LoggingTransformer::log_conversions_registered(
            self.conversions.len() - before,
            self.conversions.len(),
        );
        self
    }

    /// Let chain traversal read [`ErrorDetails`] from links of type `T`
    pub fn register_details<T>(&mut self) -> &mut Self
    where
        T: ErrorDetails + StdError + 'static,
    {
        self.probes.push(probe::<T>);
        self
    }

    /// A copy of the code descriptions
    #[must_use]
    pub fn error_codes(&self) -> HashMap<Code, String> {
        self.descriptions.clone()
    }

    /// Description registered for `code`
    #[must_use]
    pub fn code_description(&self, code: Code) -> Option<&str> {
        self.descriptions.get(&code).map(String::as_str)
    }

    /// Conversions in the order they run
    #[must_use]
    pub fn conversions(&self) -> &[ErrorConversion] {
        &self.conversions
    }

    pub(crate) fn probes(&self) -> &[DetailsProbe] {
        &self.probes
    }
}

static REGISTRY: Lazy<ArcSwap<Registry>> =
    Lazy::new(|| ArcSwap::from_pointee(Registry::with_defaults()));

/// Serializes writers; readers never take it.
static WRITER: Mutex<()> = Mutex::new(());

fn writer() -> MutexGuard<'static, ()> {
    WRITER.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(registry: Arc<Registry>) -> Arc<Registry> {
    LoggingTransformer::log_registry_installed(
        registry.descriptions.len(),
        registry.conversions.len(),
        registry.probes.len(),
    );
    REGISTRY.swap(registry)
}

/// Snapshot of the process-wide registry
#[must_use]
pub fn registry() -> Arc<Registry> {
    REGISTRY.load_full()
}

/// Replace the process-wide registry, returning the previous one
///
/// The returned value can be passed back to restore the old state.
pub fn set_registry(registry: impl Into<Arc<Registry>>) -> Arc<Registry> {
    let registry = registry.into();
    let _writer = writer();
    publish(registry)
}

/// Extend the process-wide registry in place
///
/// `update` runs exactly once, on a private copy which is then published
/// atomically. Writers are serialized, so concurrent calls never lose each
/// other's changes; readers keep the old snapshot until the swap. `update`
/// must not itself install or modify the process-wide registry.
pub fn modify_registry<F>(update: F)
where
    F: FnOnce(&mut Registry),
{
    let _writer = writer();
    let mut next = Registry::clone(&REGISTRY.load());
    update(&mut next);
    publish(Arc::new(next));
    tracing::debug!("Process-wide error registry modified");
}

/// Restore the built-in registry
pub fn reset_registry() {
    set_registry(Registry::with_defaults());
}
