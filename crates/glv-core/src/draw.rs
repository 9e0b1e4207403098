use crate::clip::ClipStack;
use crate::geometry::pix;
use crate::tree::{Descend, Walker};
use crate::{Color, DrawBackend, Glv, Property, Rect, Size, Style, Vec2, ViewId};

/// What a widget's draw hook gets: the backend, already translated to the
/// view's top-left corner, plus the view's size and style.
///
/// Matrices pushed through the context and not popped by the hook are
/// popped when the context is dropped.
pub struct DrawContext<'a> {
    backend: &'a mut dyn DrawBackend,
    view: ViewId,
    abs: Vec2,
    size: Size,
    style: &'a Style,
    focused: bool,
    pushed: usize,
}

impl<'a> DrawContext<'a> {
    fn new(
        backend: &'a mut dyn DrawBackend,
        view: ViewId,
        abs: Vec2,
        size: Size,
        style: &'a Style,
        focused: bool,
    ) -> Self {
        Self {
            backend,
            view,
            abs,
            size,
            style,
            focused,
            pushed: 0,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// `(0, 0, w, h)` in local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.size.width, self.size.height)
    }

    /// Surface position of the local origin.
    pub fn abs_origin(&self) -> Vec2 {
        self.abs
    }

    pub fn style(&self) -> &Style {
        self.style
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn push_matrix(&mut self) {
        self.pushed += 1;
        self.backend.push_matrix();
    }

    pub fn pop_matrix(&mut self) {
        if self.pushed == 0 {
            log::warn!("draw hook of {:?} popped a matrix it did not push", self.view);
            return;
        }
        self.pushed -= 1;
        self.backend.pop_matrix();
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.backend.translate(x, y);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.backend.fill_rect(rect, color);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.backend.stroke_rect(rect, color, width);
    }
}

impl Drop for DrawContext<'_> {
    fn drop(&mut self) {
        if self.pushed > 0 {
            log::warn!(
                "draw hook of {:?} left {} matrix push(es); popping",
                self.view,
                self.pushed
            );
        }
        while self.pushed > 0 {
            self.pushed -= 1;
            self.backend.pop_matrix();
        }
    }
}

/// Counts from one draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Views the traversal stepped onto, root excluded.
    pub visited: usize,
    /// Visited views that were visible and drawn.
    pub drawn: usize,
    /// Deepest level reached; the root is level 0.
    pub max_level: usize,
}

impl Glv {
    /// Clears the surface (when configured) and draws every view.
    pub fn draw_glv(&mut self, backend: &mut dyn DrawBackend, width: u32, height: u32) -> DrawStats {
        if self.config.clear_background {
            let root = self.root();
            backend.clear(self.tree()[root].style.colors.back);
        }
        self.draw_all(backend, width, height)
    }

    /// Draws the tree depth-first, leftmost sibling first.
    ///
    /// The root's hook runs once up front; every other view is clipped to
    /// the crop rect inherited from its ancestors (and to itself with
    /// [`Property::CROP_SELF`]) before its background, hook and border.
    pub fn draw_all(&mut self, backend: &mut dyn DrawBackend, width: u32, height: u32) -> DrawStats {
        let (w, h) = (width as f32, height as f32);
        let root = self.root();
        let mut clip = ClipStack::new(w, h);
        let mut stats = DrawStats::default();

        backend.push_2d(w, h);
        self.draw_hook(backend, root, Vec2::ZERO);
        backend.push_matrix();
        backend.set_scissor_enabled(true);

        let mut walk = Walker::new(root);
        while walk.advance(self.tree(), Descend::VisibleOnly) {
            let id = walk.current();
            let level = walk.level();
            let abs = walk.origin();
            let node = &self.tree()[id];
            clip.compute(level, abs, node.rect.w, node.rect.h, node.enabled(Property::CROP_CHILDREN));
            stats.visited += 1;
            stats.max_level = stats.max_level.max(level);
            if !node.visible() {
                continue;
            }

            let mut r = clip.get(level - 1);
            if node.enabled(Property::CROP_SELF) {
                r = Rect::new(abs.x, abs.y, node.rect.w, node.rect.h).intersection(&r);
            }
            backend.scissor(r);
            backend.identity();
            backend.translate(pix(abs.x) + 0.5, pix(abs.y) + 0.5);

            self.draw_back(backend, id);
            backend.push_matrix();
            self.draw_hook(backend, id, abs);
            backend.pop_matrix();
            self.draw_border(backend, id);
            stats.drawn += 1;
        }

        backend.pop_matrix();
        backend.scissor(clip.surface());
        backend.pop_2d();
        stats
    }

    fn draw_hook(&mut self, backend: &mut dyn DrawBackend, id: ViewId, abs: Vec2) {
        let Some(node) = self.tree_mut().get_mut(id) else {
            return;
        };
        let style = node.style.clone();
        let size = node.rect.size();
        let focused = node.focused;
        if let Some(widget) = node.widget.as_mut() {
            let mut ctx = DrawContext::new(backend, id, abs, size, &style, focused);
            widget.on_draw(&mut ctx);
        }
    }

    fn draw_back(&self, backend: &mut dyn DrawBackend, id: ViewId) {
        let node = &self.tree()[id];
        if node.enabled(Property::DRAW_BACK) {
            backend.fill_rect(Rect::sized(node.rect.w, node.rect.h), node.style.colors.back);
        }
    }

    fn draw_border(&self, backend: &mut dyn DrawBackend, id: ViewId) {
        let node = &self.tree()[id];
        let bounds = Rect::sized(node.rect.w, node.rect.h);
        if node.enabled(Property::DRAW_BORDER) {
            backend.stroke_rect(bounds, node.style.colors.border, 1.0);
        }
        if node.enabled(Property::FOCUS_HIGHLIGHT) && node.is_focused() {
            backend.stroke_rect(bounds, node.style.colors.selection, 2.0);
        }
    }
}
