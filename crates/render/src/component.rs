//! The component abstraction stored in the registries.

use blockkit_core::{BlockDescriptor, BlockError};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A renderable block component.
///
/// Components receive the block's payload fields together with the
/// descriptor itself and its position in the page, and produce HTML.
/// Returning `Err` (or panicking) turns the block into a fallback outcome
/// without affecting its siblings.
pub trait BlockComponent: Send + Sync {
    /// Human-readable component name used in diagnostics.
    fn name(&self) -> &str;

    /// Renders the block to HTML.
    fn render(&self, props: &BlockProps<'_>) -> Result<String, BlockError>;

    /// Finishes any deferred construction. Eager components are always ready.
    fn preload(&self) -> Result<(), BlockError> {
        Ok(())
    }

    /// Returns false while deferred construction has not happened yet.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Shared handle to a registered component.
pub type ComponentRef = Arc<dyn BlockComponent>;

/// Inputs handed to a component: the payload fields spread out, plus the
/// block and its index.
#[derive(Clone, Copy)]
pub struct BlockProps<'a> {
    block: &'a BlockDescriptor,
    index: usize,
}

impl<'a> BlockProps<'a> {
    /// Creates props for the block at `index`.
    pub fn new(block: &'a BlockDescriptor, index: usize) -> Self {
        Self { block, index }
    }

    /// The descriptor being rendered.
    pub fn block(&self) -> &'a BlockDescriptor {
        self.block
    }

    /// Position of the block in the page.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Payload fields. Opaque text and malformed blocks have none.
    pub fn fields(&self) -> Option<&'a Map<String, Value>> {
        self.block.as_structured().map(|b| b.fields())
    }

    /// Returns a raw field.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields().and_then(|f| f.get(key))
    }

    /// Returns a non-empty string field.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Returns a string field or the given default.
    pub fn str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// Returns a numeric field.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Returns a boolean field.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns an object field.
    pub fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// Returns a list field.
    ///
    /// Missing or null lists are empty; any other non-array value is an error
    /// message naming the field.
    pub fn list(&self, key: &str) -> Result<&'a [Value], String> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(format!("`{}` must be a list, got {}", key, json_kind(other))),
        }
    }
}

impl fmt::Debug for BlockProps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockProps")
            .field("index", &self.index)
            .field("block_type", &self.block.block_type())
            .field("block_name", &self.block.block_name())
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// A component backed by a plain function or closure.
pub struct FnComponent<F> {
    name: String,
    render: F,
}

impl<F> FnComponent<F>
where
    F: Fn(&BlockProps<'_>) -> Result<String, BlockError> + Send + Sync,
{
    /// Wraps a render function under the given name.
    pub fn new(name: impl Into<String>, render: F) -> Self {
        Self {
            name: name.into(),
            render,
        }
    }
}

impl<F> BlockComponent for FnComponent<F>
where
    F: Fn(&BlockProps<'_>) -> Result<String, BlockError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &BlockProps<'_>) -> Result<String, BlockError> {
        (self.render)(props)
    }
}

/// Creates a shared component from a render function.
pub fn component_fn<F>(name: impl Into<String>, render: F) -> ComponentRef
where
    F: Fn(&BlockProps<'_>) -> Result<String, BlockError> + Send + Sync + 'static,
{
    Arc::new(FnComponent::new(name, render))
}
