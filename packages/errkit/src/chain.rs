//! Iterative walk over `source()` links
//!
//! Every lookup in this crate is built on [`Chain`]. The walk is an explicit
//! loop that remembers the links it has seen and stops when a foreign
//! `source()` leads back to one of them. [`MAX_CHAIN_DEPTH`] caps walks whose
//! cycle goes unnoticed.

use crate::error::SharedError;
use errkit_common::LoggingTransformer;
use std::collections::HashSet;
use std::error::Error as StdError;

/// Upper bound on the number of links visited by a single walk.
pub const MAX_CHAIN_DEPTH: usize = 1 << 16;


/// Starting points accepted by the traversal functions
///
/// Implemented for references to concrete errors, for `&dyn Error` (with or
/// without `Send + Sync`) and for `Option`s of those. `None` is the absent
/// error: every lookup answers it with its empty result.
pub trait ChainRoot<'a> {
    /// First link of the chain, if any
    fn chain_root(self) -> Option<&'a (dyn StdError + 'static)>;
}

impl<'a, E> ChainRoot<'a> for &'a E
where
    E: StdError + 'static,
{
    fn chain_root(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a> ChainRoot<'a> for &'a (dyn StdError + 'static) {
    fn chain_root(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a> ChainRoot<'a> for &'a (dyn StdError + Send + Sync + 'static) {
    fn chain_root(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a, T> ChainRoot<'a> for Option<T>
where
    T: ChainRoot<'a>,
{
    fn chain_root(self) -> Option<&'a (dyn StdError + 'static)> {
        self.and_then(ChainRoot::chain_root)
    }
}

/// Iterator over an error and its successive sources, outermost first
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
    visited: HashSet<*const ()>,
}

impl<'a> Chain<'a> {
    /// Start a walk at `root`
    pub fn new(root: impl ChainRoot<'a>) -> Self {
        Self {
            next: root.chain_root(),
            visited: HashSet::new(),
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let link = unshare(self.next.take()?);
        if self.visited.len() == MAX_CHAIN_DEPTH {
            LoggingTransformer::log_chain_truncated(MAX_CHAIN_DEPTH);
            return None;
        }
        if !self.visited.insert(link as *const dyn StdError as *const ()) {
            LoggingTransformer::log_chain_cycle(self.visited.len());
            return None;
        }
        self.next = link.source();
        Some(link)
    }
}

/// Walk `root` and its sources
pub fn chain<'a>(root: impl ChainRoot<'a>) -> Chain<'a> {
    Chain::new(root)
}

/// `Arc<dyn Error>` forwards `source()` but hides its pointee from
/// `downcast_ref`, so shared links are looked through.
fn unshare<'a>(mut link: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    while let Some(shared) = link.downcast_ref::<SharedError>() {
        link = &**shared;
    }
    link
}
