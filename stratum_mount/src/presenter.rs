// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for platform view trees.

use crate::tree::{MountChanges, ViewTree};

/// Applies evaluated mount changes to a platform-native view tree.
///
/// # Tick pseudocode
///
/// ```rust,ignore
/// fn on_tick() {
///     // Mount: replay the latest committed revision, if any.
///     if let Some(transaction) = coordinator.pull_transaction(&mut tracer) {
///         dispatch_preallocations(&transaction.mutations, &mut warmup);
///         tree.apply(&transaction);
///     }
///
///     // Evaluate: drain dirty channels, recompute absolute origins.
///     let changes = tree.evaluate();
///
///     // Present: apply incremental changes to the native tree.
///     presenter.apply(&tree, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies `changes` to the backing view tree, reading current snapshots
    /// and origins from `tree` as needed.
    fn apply(&mut self, tree: &ViewTree, changes: &MountChanges);
}
