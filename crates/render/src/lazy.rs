//! Deferred component construction.

use blockkit_core::BlockError;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use crate::component::{BlockComponent, BlockProps, ComponentRef};

type Loader = Box<dyn Fn() -> Result<ComponentRef, String> + Send + Sync>;

/// Load state of a [`LazyComponent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The loader has not run yet.
    Loading,
    /// The component is constructed.
    Ready,
    /// The loader failed; the reason is kept.
    Failed(String),
}

/// A component that is constructed on first use.
///
/// The loader runs at most once, even when several threads render blocks
/// that resolve to the same lazy component. A failed load is remembered and
/// reported as [`BlockError::ComponentLoad`] on every render.
pub struct LazyComponent {
    name: String,
    loader: Loader,
    cell: OnceCell<Result<ComponentRef, String>>,
}

impl LazyComponent {
    /// Creates a lazy component from a loader.
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<ComponentRef, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Creates a lazy component and wraps it in a shared handle.
    pub fn shared<F>(name: impl Into<String>, loader: F) -> ComponentRef
    where
        F: Fn() -> Result<ComponentRef, String> + Send + Sync + 'static,
    {
        Arc::new(Self::new(name, loader))
    }

    /// Runs the loader if needed and returns the loaded component.
    pub fn load(&self) -> Result<&ComponentRef, BlockError> {
        self.cell
            .get_or_init(|| {
                log::debug!("[LazyComponent] loading `{}`", self.name);
                (self.loader)()
            })
            .as_ref()
            .map_err(|reason| BlockError::load(&self.name, reason.clone()))
    }

    /// Current load state, without triggering a load.
    pub fn state(&self) -> LoadState {
        match self.cell.get() {
            None => LoadState::Loading,
            Some(Ok(_)) => LoadState::Ready,
            Some(Err(reason)) => LoadState::Failed(reason.clone()),
        }
    }
}

impl BlockComponent for LazyComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &BlockProps<'_>) -> Result<String, BlockError> {
        self.load()?.render(props)
    }

    fn preload(&self) -> Result<(), BlockError> {
        self.load().map(|_| ())
    }

    fn is_ready(&self) -> bool {
        self.state() == LoadState::Ready
    }
}

impl fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyComponent")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
