//! Document owning every shape on the canvas.

use crate::geom::Vector;
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeTrait};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Change notifications emitted as the document is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DocumentEvent {
    ElementAdded {
        id: ShapeId,
        kind: ShapeKind,
    },
    ElementsDeleted {
        ids: Vec<ShapeId>,
    },
    ElementsTranslated {
        ids: Vec<ShapeId>,
        delta: Vector,
    },
    ElementHandleDragged {
        id: ShapeId,
        index: usize,
        before: Vector,
        after: Vector,
    },
}

/// Receives document notifications. Fire-and-forget.
pub trait DocumentListener {
    fn on_event(&mut self, event: &DocumentEvent);
}

impl DocumentListener for Vec<DocumentEvent> {
    fn on_event(&mut self, event: &DocumentEvent) {
        self.push(event.clone());
    }
}

/// Listener that writes every notification to the log.
#[derive(Debug, Default)]
pub struct LogListener;

impl DocumentListener for LogListener {
    fn on_event(&mut self, event: &DocumentEvent) {
        match event {
            DocumentEvent::ElementAdded { id, kind } => {
                log::info!("Element added: {kind:?} {id}");
            }
            DocumentEvent::ElementsDeleted { ids } => {
                log::info!("Elements deleted: {}", ids.len());
            }
            DocumentEvent::ElementsTranslated { ids, delta } => {
                log::info!(
                    "Elements translated: {} by ({}, {})",
                    ids.len(),
                    delta.x,
                    delta.y
                );
            }
            DocumentEvent::ElementHandleDragged {
                id,
                index,
                before,
                after,
            } => {
                log::info!(
                    "Handle {index} of {id} dragged from ({}, {}) to ({}, {})",
                    before.x,
                    before.y,
                    after.x,
                    after.y
                );
            }
        }
    }
}

/// Shapes keyed by id, plus their insertion order.
///
/// Edits are applied immediately. Notifications are queued until
/// [`Document::take_events`] drains them; a history stack would hook in there.
#[derive(Debug, Default)]
pub struct Document {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    events: Vec<DocumentEvent>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape and announce it.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let shape = shape.into();
        let id = shape.id();
        let kind = shape.kind();
        self.order.push(id);
        self.shapes.insert(id, shape);
        log::debug!("Added {kind:?} shape {id}");
        self.events.push(DocumentEvent::ElementAdded { id, kind });
        id
    }

    /// Remove shapes, announcing the ones that existed.
    pub fn remove_shapes(&mut self, ids: &[ShapeId]) -> Vec<Shape> {
        let removed: Vec<Shape> = ids.iter().filter_map(|id| self.shapes.remove(id)).collect();
        if removed.is_empty() {
            return removed;
        }
        self.order.retain(|id| self.shapes.contains_key(id));
        self.events.push(DocumentEvent::ElementsDeleted {
            ids: removed.iter().map(|s| s.id()).collect(),
        });
        removed
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Shape ids in insertion order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.order
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shift shapes without announcing it. Gestures report once on commit.
    pub fn translate_shapes(&mut self, ids: &[ShapeId], dv: Vector) {
        if dv == Vector::ZERO {
            return;
        }
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.translate(dv);
            }
        }
    }

    /// Announce a committed translation. Zero deltas and empty sets are dropped.
    pub fn notify_translated(&mut self, ids: Vec<ShapeId>, delta: Vector) {
        if ids.is_empty() || delta == Vector::ZERO {
            return;
        }
        self.events
            .push(DocumentEvent::ElementsTranslated { ids, delta });
    }

    /// Announce a committed handle drag.
    pub fn notify_handle_dragged(
        &mut self,
        id: ShapeId,
        index: usize,
        before: Vector,
        after: Vector,
    ) {
        self.events.push(DocumentEvent::ElementHandleDragged {
            id,
            index,
            before,
            after,
        });
    }

    /// Pending notifications, oldest first.
    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }
}
