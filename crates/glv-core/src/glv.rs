//! Root controller: owns a view tree, the focused view and the input state,
//! and routes injected input to views.

use std::fmt;
use std::rc::Rc;

use crate::registry::{self, GlvId};
use crate::{
    Error, EventKind, Keyboard, Modifiers, Mouse, MouseButton, Property, Rect, Result, Style,
    Vec2, ViewId, ViewNode, ViewTree, Widget,
};
use crate::tree::{Descend, Walker};

#[derive(Clone, Debug)]
pub struct GlvConfig {
    pub width: f32,
    pub height: f32,
    /// Style the root starts with; other views share the default style.
    pub style: Style,
    /// Clear the surface with the root's background color in `draw_glv`.
    pub clear_background: bool,
}

impl Default for GlvConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            style: Style::default(),
            clear_background: true,
        }
    }
}

pub struct Glv {
    id: GlvId,
    tree: ViewTree,
    focused: ViewId,
    event: EventKind,
    mouse: Mouse,
    keyboard: Keyboard,
    pub(crate) config: GlvConfig,
}

impl Glv {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(GlvConfig {
            width,
            height,
            ..GlvConfig::default()
        })
    }

    pub fn with_config(config: GlvConfig) -> Self {
        let mut root = ViewNode::new(Rect::sized(config.width, config.height))
            .with_style(Rc::new(config.style.clone()));
        root.disable(Property::DRAW_BORDER | Property::FOCUS_HIGHLIGHT);
        let tree = ViewTree::new(root);
        let focused = tree.root();
        let id = registry::next_id();
        registry::register(id);
        Self {
            id,
            tree,
            focused,
            event: EventKind::Null,
            mouse: Mouse::default(),
            keyboard: Keyboard::default(),
            config,
        }
    }

    /// Replaces the hooks of the root view.
    pub fn set_root_widget(&mut self, widget: impl Widget + 'static) {
        let root = self.tree.root();
        self.tree[root].widget = Some(Box::new(widget));
    }

    pub fn id(&self) -> GlvId {
        self.id
    }

    /// Whether the instance `id` is still alive.
    pub fn is_valid(id: GlvId) -> bool {
        registry::is_valid(id)
    }

    pub fn root(&self) -> ViewId {
        self.tree.root()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn config(&self) -> &GlvConfig {
        &self.config
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Frees `id` and its subtree. Focus inside it falls back to the root.
    pub fn remove(&mut self, id: ViewId) -> Result<Vec<ViewId>> {
        let freed = self.tree.remove(id)?;
        if freed.contains(&self.focused) {
            log::debug!("focused view removed, focusing root");
            self.focus(self.tree.root());
        }
        Ok(freed)
    }

    /// Kind of the event being injected or dispatched.
    pub fn event_type(&self) -> EventKind {
        self.event
    }

    pub fn set_event_type(&mut self, kind: EventKind) {
        self.event = kind;
    }

    pub fn focused(&self) -> ViewId {
        self.focused
    }

    /// Moves focus to `id`, notifying the old and the new view.
    ///
    /// The current event kind is the same afterwards as before.
    pub fn set_focus(&mut self, id: ViewId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(Error::UnknownView(id));
        }
        self.focus(id);
        Ok(())
    }

    fn focus(&mut self, id: ViewId) {
        if id == self.focused {
            return;
        }
        let current = self.event;
        self.focus_notify(false);
        log::debug!("focus {:?} -> {:?}", self.focused, id);
        self.focused = id;
        self.focus_notify(true);
        self.event = current;
    }

    /// Single-view notification, never bubbled.
    fn focus_notify(&mut self, gained: bool) {
        let kind = if gained {
            EventKind::FocusGained
        } else {
            EventKind::FocusLost
        };
        let id = self.focused;
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.focused = gained;
        self.event = kind;
        self.dispatch(id, kind);
    }

    /// Refocuses the root, with the usual notifications, when the focused
    /// view was freed behind the controller's back.
    fn ensure_focus(&mut self) {
        if !self.tree.contains(self.focused) {
            log::warn!("focused view {:?} is gone, focusing root", self.focused);
            self.focus(self.tree.root());
        }
    }

    /// Mouse press at surface position `(x, y)`.
    ///
    /// Focuses the deepest hit view (the root if none) and returns the
    /// position in its local space.
    pub fn set_mouse_down(&mut self, x: f32, y: f32, button: MouseButton, clicks: u32) -> Vec2 {
        self.event = EventKind::MouseDown;
        let abs = Vec2::new(x, y);
        let (target, local) = self.tree.find_target(abs);
        self.focus(target);
        self.mouse.set_pos(abs);
        self.mouse.set_rel(local);
        self.mouse.update_button(button, true, clicks);
        local
    }

    /// Mouse release; converted relative to the focused view, no hit test.
    pub fn set_mouse_up(&mut self, x: f32, y: f32, button: MouseButton, clicks: u32) -> Option<Vec2> {
        let rel = self.set_mouse_motion(x, y, EventKind::MouseUp);
        self.mouse.update_button(button, false, clicks);
        rel
    }

    pub fn set_mouse_move(&mut self, x: f32, y: f32) -> Option<Vec2> {
        self.set_mouse_motion(x, y, EventKind::MouseMove)
    }

    pub fn set_mouse_drag(&mut self, x: f32, y: f32) -> Option<Vec2> {
        self.set_mouse_motion(x, y, EventKind::MouseDrag)
    }

    /// Records a pointer event at `(x, y)` relative to the focused view.
    ///
    /// Returns `None`, leaving the relative position untouched, when the
    /// focused view is not attached under the root.
    pub fn set_mouse_motion(&mut self, x: f32, y: f32, kind: EventKind) -> Option<Vec2> {
        self.ensure_focus();
        self.event = kind;
        let abs = Vec2::new(x, y);
        self.mouse.set_pos(abs);
        let rel = self.tree.abs_to_rel(self.focused, abs)?;
        self.mouse.set_rel(rel);
        Some(rel)
    }

    /// Raw position update from the platform; no event kind change.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32, rel_x: f32, rel_y: f32) {
        self.mouse.set_pos(Vec2::new(x, y));
        self.mouse.set_rel(Vec2::new(rel_x, rel_y));
    }

    pub fn set_mouse_wheel(&mut self, delta: i32) {
        self.event = EventKind::MouseWheel;
        self.mouse.add_wheel(delta as f32);
    }

    pub fn set_key_down(&mut self, key: i32) {
        self.event = EventKind::KeyDown;
        self.keyboard.set(key, true);
    }

    pub fn set_key_up(&mut self, key: i32) {
        self.event = EventKind::KeyUp;
        self.keyboard.set(key, false);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.keyboard.modifiers = modifiers;
    }

    /// Bubbles the current event from the focused view toward the root.
    ///
    /// Returns `true` when some view stopped the bubbling, `false` when it
    /// ran off the top of the tree.
    pub fn propagate_event(&mut self) -> bool {
        self.ensure_focus();
        let kind = self.event;
        let mut v = Some(self.focused);
        while let Some(id) = v {
            if !self.dispatch(id, kind) {
                break;
            }
            v = self.tree.get(id).and_then(|n| n.parent());
        }
        v.is_some()
    }

    /// Dispatches `kind` to every view, root first, in depth-first order.
    ///
    /// Bubbling results are ignored. Returns how many views were reached.
    pub fn broadcast_event(&mut self, kind: EventKind) -> usize {
        let current = self.event;
        self.event = kind;
        let root = self.tree.root();
        self.dispatch(root, kind);
        let mut reached = 1;
        let mut walk = Walker::new(root);
        while walk.advance(&self.tree, Descend::Always) {
            self.dispatch(walk.current(), kind);
            reached += 1;
        }
        if walk.current() != root {
            log::warn!("broadcast of {kind} cut short: {:?} was removed", walk.current());
        }
        self.event = current;
        reached
    }
}

impl Drop for Glv {
    fn drop(&mut self) {
        registry::deregister(self.id);
    }
}

impl fmt::Debug for Glv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glv")
            .field("id", &self.id)
            .field("views", &self.tree.len())
            .field("focused", &self.focused)
            .field("event", &self.event)
            .finish()
    }
}
