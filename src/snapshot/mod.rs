// Snapshot history for stepping back and forth through a scan/parse session

use crate::parser::ast::{Node, NodeRef, Span};
use crate::parser::token::Token;
use crate::trace::{PoolView, Step, Tracer};
use tracing::warn;

/// Copy of both pools at one traced step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub step: Step,
    /// Rule nesting depth when the step happened
    pub depth: usize,
    pub tokens: Vec<Token>,
    pub cursor: usize,
    pub nodes: Vec<Node>,
    /// `false` until the parser has started
    pub parsing: bool,
}

impl Snapshot {
    pub fn capture(step: &Step, depth: usize, view: &PoolView<'_>) -> Self {
        Snapshot {
            step: step.clone(),
            depth,
            tokens: view.scan_table.tokens().to_vec(),
            cursor: view.scan_table.cursor(),
            nodes: view
                .parse_table
                .map(|table| table.nodes().to_vec())
                .unwrap_or_default(),
            parsing: view.parse_table.is_some(),
        }
    }

    /// Human-readable label of the step
    pub fn label(&self) -> String {
        self.step.to_string()
    }

    /// Node the step is about, if any
    pub fn focus(&self) -> Option<NodeRef> {
        self.step.focus()
    }

    /// Source range to highlight: the token under the cursor while parsing,
    /// the newest token while scanning
    pub fn highlight(&self) -> Option<Span> {
        if self.parsing {
            self.tokens.get(self.cursor).map(|tok| tok.span)
        } else {
            self.tokens.last().map(|tok| tok.span)
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let tokens: usize = self
            .tokens
            .iter()
            .map(|tok| std::mem::size_of::<Token>() + tok.text.len())
            .sum();
        let nodes = self.nodes.len() * std::mem::size_of::<Node>();
        std::mem::size_of::<Self>() + tokens + nodes
    }
}

/// Manages the recorded history
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Tracer that records a [`Snapshot`] per step.
///
/// Once the memory limit is hit, recording stops and the rest of the
/// session continues untraced.
#[derive(Debug)]
pub struct Recorder {
    history: SnapshotManager,
    depth: usize,
    truncated: bool,
}

impl Recorder {
    pub fn new(max_memory: usize) -> Self {
        Recorder {
            history: SnapshotManager::new(max_memory),
            depth: 0,
            truncated: false,
        }
    }

    /// Current rule nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether steps were dropped because of the memory limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn history(&self) -> &SnapshotManager {
        &self.history
    }

    pub fn into_history(self) -> SnapshotManager {
        self.history
    }
}

impl Tracer for Recorder {
    fn observe(&mut self, step: &Step, view: &PoolView<'_>) {
        if let Step::Exit { .. } = step {
            self.depth = self.depth.saturating_sub(1);
        }

        if !self.truncated {
            if let Err(message) = self.history.push(Snapshot::capture(step, self.depth, view)) {
                warn!(%message, recorded = self.history.len(), "trace recording stopped");
                self.truncated = true;
            }
        }

        if let Step::Enter { .. } = step {
            self.depth += 1;
        }
    }
}
