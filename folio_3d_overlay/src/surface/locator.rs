/// Surface locator: finds the mesh standing in for the display surface.

use crate::scene::{NodeKey, SceneGraph};

/// How the surface was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A mesh whose name contains `candidate`
    Named { candidate: String, name: String },
    /// No mesh matched; the whole model stands in for the surface
    WholeModel,
}

/// Result of [`SurfaceLocator::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSurface {
    pub node: NodeKey,
    pub kind: SurfaceKind,
}

impl LocatedSurface {
    pub fn is_fallback(&self) -> bool {
        self.kind == SurfaceKind::WholeModel
    }
}

/// Pure search for the first renderable leaf whose name contains one of
/// `candidates` (case-insensitive).
///
/// Candidates are tried in order; within one candidate the first node in
/// depth-first order wins. Returns the node and the index of the matching
/// candidate.
pub fn find_surface_node(
    graph: &SceneGraph,
    model: NodeKey,
    candidates: &[String],
) -> Option<(NodeKey, usize)> {
    let leaves: Vec<(NodeKey, String)> = graph
        .depth_first(model)
        .filter_map(|key| {
            let node = graph.node(key)?;
            (node.is_renderable() && node.children().is_empty())
                .then(|| (key, node.name().to_lowercase()))
        })
        .collect();

    candidates.iter().enumerate().find_map(|(index, candidate)| {
        let needle = candidate.to_lowercase();
        leaves
            .iter()
            .find(|(_, name)| name.contains(&needle))
            .map(|(key, _)| (*key, index))
    })
}

/// Locates the display surface of a model with a whole-model fallback.
#[derive(Debug, Clone)]
pub struct SurfaceLocator {
    candidates: Vec<String>,
}

impl SurfaceLocator {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Locate the surface of `model`. Never fails: when nothing matches,
    /// the model root itself is returned and a warning is logged.
    pub fn locate(&self, graph: &SceneGraph, model: NodeKey) -> LocatedSurface {
        match find_surface_node(graph, model, &self.candidates) {
            Some((node, index)) => {
                let name = graph.node(node).map(|n| n.name().to_string()).unwrap_or_default();
                crate::overlay_info!(
                    "folio3d::Locator",
                    "surface mesh '{}' matched candidate '{}'",
                    name,
                    self.candidates[index]
                );
                LocatedSurface {
                    node,
                    kind: SurfaceKind::Named { candidate: self.candidates[index].clone(), name },
                }
            }
            None => {
                crate::overlay_warn!(
                    "folio3d::Locator",
                    "no mesh matched {:?}; using the whole model as the surface",
                    self.candidates
                );
                LocatedSurface { node: model, kind: SurfaceKind::WholeModel }
            }
        }
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
