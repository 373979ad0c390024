//! Reconciles a [`Stage`] with the selection.
//!
//! Full rebuilds and single-layer patches go through the same
//! [`SceneSync::reconcile`], so the stage ends up identical for the same
//! selection no matter which path produced it.

use super::{Layer, LayerSet, SceneStyle, Shape, Stage};
use crate::model::AtomRecord;
use crate::options::Options;
use crate::selection::SelectionStore;

/// How much of the stage a reconcile may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    /// Clear every component, then regenerate all layers.
    Rebuild,
    /// Regenerate only the requested layers, swapping them in place.
    Patch,
}

/// Owns the scene mirror on a stage.
#[derive(Debug, Clone, Default)]
pub struct SceneSync {
    style: SceneStyle,
}

impl SceneSync {
    /// Synchronizer styled from the runtime options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            style: SceneStyle::from_options(options),
        }
    }

    /// Bring the stage in line with `atoms` and `store`.
    ///
    /// With [`SyncScope::Rebuild`] every component is dropped first and
    /// `layers` is ignored (everything is regenerated).
    pub fn reconcile<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        atoms: &[AtomRecord],
        store: &SelectionStore,
        layers: LayerSet,
        scope: SyncScope,
    ) {
        let layers = match scope {
            SyncScope::Rebuild => {
                stage.remove_all_components();
                LayerSet::ALL
            }
            SyncScope::Patch => layers,
        };

        if layers.atoms {
            let shape = self.style.atom_layer(atoms, &store.picked_indices());
            apply_layer(stage, Layer::Atoms, Some(shape));
        }
        if layers.pairs {
            let shape = self.style.pair_layer(store.distance_pairs());
            apply_layer(stage, Layer::Pairs, shape);
        }
        stage.request_render();
    }

    /// Clear the stage and regenerate atoms and pairs.
    pub fn rebuild_all<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        atoms: &[AtomRecord],
        store: &SelectionStore,
    ) {
        self.reconcile(stage, atoms, store, LayerSet::ALL, SyncScope::Rebuild);
    }

    /// Regenerate the atom layer only.
    pub fn update_atom_highlights<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        atoms: &[AtomRecord],
        store: &SelectionStore,
    ) {
        self.reconcile(stage, atoms, store, LayerSet::ATOMS, SyncScope::Patch);
    }

    /// Regenerate the pair layer only.
    pub fn draw_distance_pairs<S: Stage + ?Sized>(
        &self,
        stage: &mut S,
        atoms: &[AtomRecord],
        store: &SelectionStore,
    ) {
        self.reconcile(stage, atoms, store, LayerSet::PAIRS, SyncScope::Patch);
    }
}

/// Swap `shape` into the layer's component, creating it if absent; `None`
/// removes the component.
fn apply_layer<S: Stage + ?Sized>(stage: &mut S, layer: Layer, shape: Option<Shape>) {
    let name = layer.component_name();
    match shape {
        Some(shape) => {
            let representation = layer.representation();
            if stage.has_component(name) {
                let _ = stage.replace_shape(shape, representation);
            } else {
                stage.add_component(shape, representation);
            }
        }
        None => {
            let _ = stage.remove_component(name);
        }
    }
}
