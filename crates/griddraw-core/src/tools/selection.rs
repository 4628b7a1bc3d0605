//! Selection tool: hit testing, multi-select, dragging and marquee selection.

use super::{Tool, ToolContext, ToolKind};
use crate::geom::{Rectangle, Vector};
use crate::input::{Key, Modifiers, PointerPoint};
use crate::render::{CursorStyle, MarkerId, MarkerKind, RenderRequest};
use crate::shapes::{Shape, ShapeId, ShapeTrait};
use std::collections::HashSet;

/// Coarse interaction state of the selection tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    DragElement,
    DragHandle,
    Marquee,
}

/// One handle of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRef {
    pub shape: ShapeId,
    pub index: usize,
}

/// Selected shapes follow the pointer.
#[derive(Debug)]
struct ElementDrag {
    /// Grid point of the pointer-down.
    anchor: Vector,
    /// Grid point of the previous move.
    last: Vector,
}

impl ElementDrag {
    fn total(&self) -> Vector {
        self.last - self.anchor
    }
}

/// One handle follows the pointer.
#[derive(Debug)]
struct HandleDrag {
    handle: HandleRef,
    origin: Vector,
}

/// Rubber-band rectangle collecting shapes.
#[derive(Debug)]
struct Marquee {
    rect: Rectangle,
    members: Vec<ShapeId>,
    markers: Vec<MarkerId>,
}

/// Gesture in progress. Each payload exists only in its own state.
#[derive(Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    DragElement(ElementDrag),
    DragHandle(HandleDrag),
    Marquee(Marquee),
}

/// Pointer-driven selection controller.
///
/// Holds only shape ids. Any id it keeps is purged in the same step the
/// shape leaves the document.
#[derive(Debug, Default)]
pub struct SelectionTool {
    gesture: Gesture,
    selected: HashSet<ShapeId>,
    selected_markers: Vec<MarkerId>,
    /// Shape currently hover-highlighted as closest to the pointer.
    nearest: Option<ShapeId>,
    nearest_markers: Vec<MarkerId>,
    /// Draggable handle under the pointer.
    hover_handle: Option<HandleRef>,
    hover_marker: Option<MarkerId>,
    last_pointer: Option<PointerPoint>,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        match self.gesture {
            Gesture::Idle => InteractionState::Idle,
            Gesture::DragElement(_) => InteractionState::DragElement,
            Gesture::DragHandle(_) => InteractionState::DragHandle,
            Gesture::Marquee(_) => InteractionState::Marquee,
        }
    }

    pub fn selection(&self) -> &HashSet<ShapeId> {
        &self.selected
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn nearest(&self) -> Option<ShapeId> {
        self.nearest
    }

    pub fn hover_handle(&self) -> Option<HandleRef> {
        self.hover_handle
    }

    pub fn marquee_rect(&self) -> Option<&Rectangle> {
        match &self.gesture {
            Gesture::Marquee(marquee) => Some(&marquee.rect),
            _ => None,
        }
    }

    /// Shapes inside the live marquee, in document order.
    pub fn marquee_members(&self) -> &[ShapeId] {
        match &self.gesture {
            Gesture::Marquee(marquee) => &marquee.members,
            _ => &[],
        }
    }

    /// Replace the selection. Unknown ids are ignored.
    pub fn select(&mut self, cx: &mut ToolContext, ids: &[ShapeId]) {
        self.selected = ids
            .iter()
            .copied()
            .filter(|id| cx.document.contains(*id))
            .collect();
        self.selection_changed(cx);
    }

    pub fn clear_selection(&mut self, cx: &mut ToolContext) {
        self.selected.clear();
        self.selection_changed(cx);
    }

    /// Remove the selection and any marquee members from the document.
    ///
    /// Safe in every state: the gesture in progress is dropped first.
    pub fn delete_selected(&mut self, cx: &mut ToolContext) {
        let mut doomed = std::mem::take(&mut self.selected);
        if let Gesture::Marquee(marquee) = std::mem::take(&mut self.gesture) {
            doomed.extend(marquee.members.iter().copied());
            self.teardown_marquee(cx, marquee);
        }
        cx.render.unhighlight_all(&mut self.selected_markers);
        self.clear_nearest(cx);
        self.clear_hover(cx);

        let ids: Vec<ShapeId> = cx
            .document
            .ids()
            .iter()
            .copied()
            .filter(|id| doomed.contains(id))
            .collect();
        log::debug!("Deleting {} shapes", ids.len());
        cx.document.remove_shapes(&ids);

        if let Some(p) = self.last_pointer {
            self.update_hover(cx, p);
        }
    }

    /// Selected ids in document order.
    fn ordered_selection(&self, cx: &ToolContext) -> Vec<ShapeId> {
        cx.document
            .ids()
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    fn refresh_selected_markers(&mut self, cx: &mut ToolContext) {
        cx.render.unhighlight_all(&mut self.selected_markers);
        for id in self.ordered_selection(cx) {
            if let Some(shape) = cx.document.get(id) {
                for &h in shape.handles() {
                    self.selected_markers
                        .push(cx.render.highlight(h, MarkerKind::Selected));
                }
            }
        }
    }

    /// Only selected shapes offer handles, so idle hover is redone from scratch.
    fn selection_changed(&mut self, cx: &mut ToolContext) {
        self.refresh_selected_markers(cx);
        if !matches!(self.gesture, Gesture::Idle) {
            return;
        }
        self.clear_hover(cx);
        if let Some(p) = self.last_pointer {
            self.update_hover(cx, p);
        }
    }

    /// Recompute marquee membership and its markers from scratch.
    fn rebuild_marquee(&mut self, cx: &mut ToolContext) {
        let Gesture::Marquee(marquee) = &mut self.gesture else {
            return;
        };
        cx.render.unhighlight_all(&mut marquee.markers);
        marquee.members.clear();
        for shape in cx.document.shapes() {
            if !shape.overlaps_rect(&marquee.rect) {
                continue;
            }
            marquee.members.push(shape.id());
            for &h in shape.handles() {
                marquee
                    .markers
                    .push(cx.render.highlight(h, MarkerKind::MarqueePreview));
            }
        }
    }

    fn teardown_marquee(&mut self, cx: &mut ToolContext, mut marquee: Marquee) {
        cx.render.unhighlight_all(&mut marquee.markers);
        cx.render.push(RenderRequest::RemoveMarquee);
    }

    fn clear_nearest(&mut self, cx: &mut ToolContext) {
        self.nearest = None;
        cx.render.unhighlight_all(&mut self.nearest_markers);
    }

    fn set_nearest(&mut self, cx: &mut ToolContext, id: Option<ShapeId>) {
        if id == self.nearest {
            return;
        }
        self.clear_nearest(cx);
        let Some(shape) = id.and_then(|id| cx.document.get(id)) else {
            return;
        };
        for &h in shape.handles() {
            self.nearest_markers
                .push(cx.render.highlight(h, MarkerKind::Nearest));
        }
        self.nearest = Some(shape.id());
    }

    fn clear_hover(&mut self, cx: &mut ToolContext) {
        self.hover_handle = None;
        if let Some(marker) = self.hover_marker.take() {
            cx.render.unhighlight(marker);
        }
    }

    fn set_hover(&mut self, cx: &mut ToolContext, hit: Option<(HandleRef, Vector)>) {
        if hit.map(|(handle, _)| handle) == self.hover_handle {
            return;
        }
        self.clear_hover(cx);
        if let Some((handle, at)) = hit {
            self.hover_handle = Some(handle);
            self.hover_marker = Some(cx.render.highlight(at, MarkerKind::HoverHandle));
        }
    }

    /// Closest interactive handle of a selected shape within the pixel tolerance.
    fn handle_at(&self, cx: &ToolContext, point: Vector) -> Option<(HandleRef, Vector)> {
        let tolerance = cx.config.handle_tolerance_px;
        let mut best: Option<(HandleRef, Vector, f64)> = None;
        for id in self.ordered_selection(cx) {
            let Some(shape) = cx.document.get(id) else {
                continue;
            };
            for (index, h) in shape.interactive_handles() {
                let px = cx.mapper.grid_to_surface_delta((h - point).norm());
                if px <= tolerance && best.is_none_or(|(_, _, d)| px < d) {
                    best = Some((HandleRef { shape: id, index }, h, px));
                }
            }
        }
        best.map(|(handle, at, _)| (handle, at))
    }

    /// Closest shape to `point`, if it is within that shape's slop.
    fn nearest_at(&self, cx: &ToolContext, point: Vector) -> Option<ShapeId> {
        let mut best: Option<(&Shape, f64)> = None;
        for shape in cx.document.shapes() {
            let d = shape.distance_squared(point);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((shape, d));
            }
        }
        best.filter(|(shape, d)| *d <= shape.slop())
            .map(|(shape, _)| shape.id())
    }

    /// Idle hover: a selected shape's handle beats any shape body.
    fn update_hover(&mut self, cx: &mut ToolContext, p: PointerPoint) {
        if let Some(hit) = self.handle_at(cx, p.fine) {
            self.clear_nearest(cx);
            self.set_hover(cx, Some(hit));
        } else {
            self.set_hover(cx, None);
            let nearest = self.nearest_at(cx, p.fine);
            self.set_nearest(cx, nearest);
        }
    }

    /// Bring every marker back in line with shape geometry.
    fn geometry_changed(&mut self, cx: &mut ToolContext) {
        self.refresh_selected_markers(cx);
        self.rebuild_marquee(cx);
        self.clear_nearest(cx);
        self.clear_hover(cx);
        let Some(p) = self.last_pointer else {
            return;
        };
        if matches!(self.gesture, Gesture::Idle) {
            self.update_hover(cx, p);
        } else {
            let nearest = self.nearest_at(cx, p.fine);
            self.set_nearest(cx, nearest);
        }
    }

    fn translate_selection(&mut self, cx: &mut ToolContext, dv: Vector) {
        if dv == Vector::ZERO || self.selected.is_empty() {
            return;
        }
        let ids = self.ordered_selection(cx);
        cx.document.translate_shapes(&ids, dv);
        self.geometry_changed(cx);
    }

    fn nudge(&mut self, cx: &mut ToolContext, dv: Vector) {
        if matches!(self.gesture, Gesture::DragElement(_) | Gesture::DragHandle(_)) {
            return;
        }
        let ids = self.ordered_selection(cx);
        if ids.is_empty() {
            return;
        }
        for id in &ids {
            if let Some(shape) = cx.document.get_mut(*id) {
                shape.nudge(dv);
            }
        }
        cx.document.notify_translated(ids, dv);
        self.geometry_changed(cx);
    }

    fn start_marquee(&mut self, cx: &mut ToolContext, at: Vector) {
        log::debug!("Marquee started at ({}, {})", at.x, at.y);
        let rect = Rectangle::new(at, at);
        cx.render.push(RenderRequest::DrawMarquee {
            rect: cx.mapper.grid_rect_to_surface(&rect),
        });
        self.gesture = Gesture::Marquee(Marquee {
            rect,
            members: Vec::new(),
            markers: Vec::new(),
        });
        self.rebuild_marquee(cx);
    }

    fn finish_element_drag(&mut self, cx: &mut ToolContext, drag: ElementDrag) {
        let total = drag.total();
        log::debug!("Element drag finished, moved ({}, {})", total.x, total.y);
        let ids = self.ordered_selection(cx);
        cx.document.notify_translated(ids, total);
        if let Some(p) = self.last_pointer {
            self.update_hover(cx, p);
        }
    }

    fn finish_handle_drag(&mut self, cx: &mut ToolContext, drag: HandleDrag) {
        let HandleRef { shape, index } = drag.handle;
        let after = cx
            .document
            .get(shape)
            .and_then(|s| s.handles().get(index).copied());
        if let Some(after) = after.filter(|after| *after != drag.origin) {
            cx.document
                .notify_handle_dragged(shape, index, drag.origin, after);
        }
        if let Some(p) = self.last_pointer {
            self.update_hover(cx, p);
        }
    }

    fn finish_marquee(&mut self, cx: &mut ToolContext, marquee: Marquee) {
        log::debug!("Marquee finished with {} shapes", marquee.members.len());
        self.selected.extend(marquee.members.iter().copied());
        self.teardown_marquee(cx, marquee);
        self.selection_changed(cx);
    }

    /// Unwind the gesture in progress. Returns false when idle.
    fn cancel_gesture(&mut self, cx: &mut ToolContext) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return false,
            Gesture::DragElement(drag) => {
                log::debug!("Element drag cancelled");
                self.translate_selection(cx, -drag.total());
            }
            Gesture::DragHandle(drag) => {
                log::debug!("Handle drag cancelled");
                if let Some(shape) = cx.document.get_mut(drag.handle.shape) {
                    shape.drag_handle(drag.handle.index, drag.origin);
                }
                self.geometry_changed(cx);
            }
            Gesture::Marquee(marquee) => self.teardown_marquee(cx, marquee),
        }
        true
    }
}

impl Tool for SelectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn tool_deselected(&mut self, cx: &mut ToolContext) {
        self.last_pointer = None;
        self.cancel_gesture(cx);
        self.clear_selection(cx);
        self.clear_nearest(cx);
        self.clear_hover(cx);
    }

    fn app_deactivated(&mut self, cx: &mut ToolContext) {
        self.cancel_gesture(cx);
    }

    fn canvas_exited(&mut self, cx: &mut ToolContext) {
        self.clear_nearest(cx);
        self.clear_hover(cx);
        self.last_pointer = None;
        cx.render.push(RenderRequest::SetCursor(CursorStyle::Arrow));
    }

    fn key_pressed(&mut self, cx: &mut ToolContext, key: Key, _modifiers: Modifiers) {
        if let Some(dv) = key.arrow_delta() {
            self.nudge(cx, dv);
        } else if key == Key::Escape {
            if !self.cancel_gesture(cx) {
                self.clear_selection(cx);
            }
        } else if key.is_delete() {
            self.delete_selected(cx);
        }
    }

    fn pointer_down(&mut self, cx: &mut ToolContext, p: PointerPoint, modifiers: Modifiers) {
        assert!(
            matches!(self.gesture, Gesture::Idle),
            "pointer down during {:?}",
            self.state()
        );
        self.last_pointer = Some(p);
        self.update_hover(cx, p);

        if let Some(handle) = self.hover_handle {
            let origin = cx
                .document
                .get(handle.shape)
                .and_then(|s| s.handles().get(handle.index).copied());
            if let Some(origin) = origin {
                log::debug!("Handle drag started on handle {}", handle.index);
                self.gesture = Gesture::DragHandle(HandleDrag { handle, origin });
                return;
            }
        }

        match (self.nearest, modifiers.shift) {
            (None, shift) => {
                if !shift {
                    self.clear_selection(cx);
                }
                self.start_marquee(cx, p.grid);
            }
            (Some(id), true) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                self.selection_changed(cx);
            }
            (Some(id), false) => {
                if !self.selected.contains(&id) {
                    self.selected.clear();
                    self.selected.insert(id);
                    self.refresh_selected_markers(cx);
                }
                log::debug!("Element drag started with {} shapes", self.selected.len());
                self.gesture = Gesture::DragElement(ElementDrag {
                    anchor: p.grid,
                    last: p.grid,
                });
            }
        }
    }

    fn pointer_up(&mut self, cx: &mut ToolContext, _p: PointerPoint) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::DragElement(drag) => self.finish_element_drag(cx, drag),
            Gesture::DragHandle(drag) => self.finish_handle_drag(cx, drag),
            Gesture::Marquee(marquee) => self.finish_marquee(cx, marquee),
        }
    }

    fn pointer_moved(&mut self, cx: &mut ToolContext, p: PointerPoint) {
        self.last_pointer = Some(p);
        match &mut self.gesture {
            Gesture::Idle => self.update_hover(cx, p),
            Gesture::DragElement(drag) => {
                let dv = p.grid - drag.last;
                drag.last = p.grid;
                self.translate_selection(cx, dv);
            }
            Gesture::DragHandle(drag) => {
                let HandleRef { shape, index } = drag.handle;
                let Some(shape) = cx.document.get_mut(shape) else {
                    return;
                };
                if shape.handles().get(index) == Some(&p.grid) {
                    return;
                }
                shape.drag_handle(index, p.grid);
                self.geometry_changed(cx);
            }
            Gesture::Marquee(marquee) => {
                marquee.rect = Rectangle::new(marquee.rect.p0(), p.grid);
                cx.render.push(RenderRequest::UpdateMarquee {
                    rect: cx.mapper.grid_rect_to_surface(&marquee.rect),
                });
                self.rebuild_marquee(cx);
            }
        }
    }

    fn shapes_changed(&mut self, cx: &mut ToolContext, _ids: &[ShapeId]) {
        self.geometry_changed(cx);
    }

    fn shapes_deleted(&mut self, cx: &mut ToolContext, ids: &[ShapeId]) {
        let gone: HashSet<ShapeId> = ids.iter().copied().collect();
        self.selected.retain(|id| !gone.contains(id));
        let abort = match &self.gesture {
            Gesture::DragHandle(drag) => gone.contains(&drag.handle.shape),
            Gesture::DragElement(_) => self.selected.is_empty(),
            _ => false,
        };
        if abort {
            self.gesture = Gesture::Idle;
        }
        if self.hover_handle.is_some_and(|h| gone.contains(&h.shape)) {
            self.clear_hover(cx);
        }
        self.geometry_changed(cx);
    }
}
