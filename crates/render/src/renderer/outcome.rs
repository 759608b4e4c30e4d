//! Per-block render outcomes.

use blockkit_core::{BlockDescriptor, BlockKey};
use serde::Serialize;

use crate::registry::MatchKind;

/// Why a block produced a fallback instead of its component's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message", rename_all = "camelCase")]
pub enum FallbackReason {
    /// No registry entry at any tier.
    Unmatched,
    /// The resolved component failed, panicked, or could not be loaded.
    RenderFailed(String),
}

/// Lifecycle of a single block within one render pass.
///
/// `Pending → Resolving → {Resolved → Rendering → {Rendered | RenderFailed}} | Unresolved`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockPhase {
    /// Not yet looked at.
    Pending,
    /// Being matched against the registry.
    Resolving,
    /// A component was found.
    Resolved,
    /// No component was found. Terminal.
    Unresolved,
    /// The component is running.
    Rendering,
    /// The component produced output. Terminal.
    Rendered,
    /// The component failed. Terminal.
    RenderFailed,
}

impl BlockPhase {
    /// Returns true for phases that end the block's render pass.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BlockPhase::Unresolved | BlockPhase::Rendered | BlockPhase::RenderFailed
        )
    }

    pub(crate) fn enter(self, index: usize) {
        log::trace!("[BlockRenderer] block {} -> {:?}", index, self);
    }
}

/// Result of rendering one block. Rendering never fails as a whole; each
/// position ends in exactly one of these.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderOutcome {
    /// The resolved component rendered successfully.
    Rendered {
        /// Position in the input sequence
        index: usize,
        /// Tier that resolved the component
        kind: MatchKind,
        /// Key that resolved the component
        key: BlockKey,
        /// Component name
        component: String,
        /// Component output
        html: String,
    },
    /// Diagnostic rendering substituted for an unmatched or failed block.
    Fallback {
        /// Position in the input sequence
        index: usize,
        /// `blockType`, when present
        block_type: Option<String>,
        /// `blockName`, when present
        block_name: Option<String>,
        /// Why the fallback was used
        reason: FallbackReason,
        /// The raw descriptor
        descriptor: BlockDescriptor,
        /// Fallback output
        html: String,
    },
}

impl RenderOutcome {
    /// Position of the block in the input sequence.
    pub fn index(&self) -> usize {
        match self {
            RenderOutcome::Rendered { index, .. } | RenderOutcome::Fallback { index, .. } => *index,
        }
    }

    /// Markup for this position.
    pub fn html(&self) -> &str {
        match self {
            RenderOutcome::Rendered { html, .. } | RenderOutcome::Fallback { html, .. } => html,
        }
    }

    /// Consumes the outcome, returning its markup.
    pub fn into_html(self) -> String {
        match self {
            RenderOutcome::Rendered { html, .. } | RenderOutcome::Fallback { html, .. } => html,
        }
    }

    /// Returns true when the component's own output was used.
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered { .. })
    }

    /// Returns true when the fallback was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderOutcome::Fallback { .. })
    }

    /// Fallback reason, if any.
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            RenderOutcome::Rendered { .. } => None,
            RenderOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Terminal phase the block ended in.
    pub fn phase(&self) -> BlockPhase {
        match self {
            RenderOutcome::Rendered { .. } => BlockPhase::Rendered,
            RenderOutcome::Fallback {
                reason: FallbackReason::Unmatched,
                ..
            } => BlockPhase::Unresolved,
            RenderOutcome::Fallback {
                reason: FallbackReason::RenderFailed(_),
                ..
            } => BlockPhase::RenderFailed,
        }
    }
}
