//! Display and trait implementations for CodedError
//!
//! Rendering goes through a process-wide [`Renderer`] so applications can
//! change how wrapped messages are joined without touching anything else.

use super::types::CodedError;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Function rendering a [`CodedError`] and its parents
pub type Renderer = Box<dyn Fn(&CodedError, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync>;

static RENDERER: Lazy<ArcSwap<Renderer>> =
    Lazy::new(|| ArcSwap::from_pointee(Box::new(default_render) as Renderer));

/// `"<message>: <parent>"`, or whichever of the two is present
pub fn default_render(err: &CodedError, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match err.parent() {
        Some(parent) if err.message().is_empty() => write!(f, "{parent}"),
        Some(parent) => write!(f, "{}: {parent}", err.message()),
        None => f.write_str(err.message()),
    }
}

/// Renderer joining local messages and parent text with `separator`
#[must_use]
pub fn joined_renderer(separator: impl Into<String>) -> Renderer {
    let separator = separator.into();
    Box::new(move |err: &CodedError, f: &mut fmt::Formatter<'_>| match err.parent() {
        Some(parent) if err.message().is_empty() => write!(f, "{parent}"),
        Some(parent) => write!(f, "{}{separator}{parent}", err.message()),
        None => f.write_str(err.message()),
    })
}

/// Install a process-wide renderer
pub fn set_renderer<F>(renderer: F)
where
    F: Fn(&CodedError, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync + 'static,
{
    RENDERER.store(Arc::new(Box::new(renderer) as Renderer));
}

/// Restore [`default_render`]
pub fn reset_renderer() {
    RENDERER.store(Arc::new(Box::new(default_render) as Renderer));
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let renderer = RENDERER.load();
        let render: &Renderer = &renderer;
        render(self, f)
    }
}

impl StdError for CodedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .parent
            .as_deref()
            .map(|parent| parent as &(dyn StdError + 'static))
    }
}
