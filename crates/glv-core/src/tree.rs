//! Arena-backed view tree.
//!
//! Nodes live in a [`SlotMap`] and link to each other through
//! parent / first-child / next-sibling handles. Sibling link order is the
//! draw and traversal order: the first child is visited (and drawn) first.

use std::ops::{Index, IndexMut};
use std::rc::Rc;

use slotmap::SlotMap;

use crate::view::CallbackList;
use crate::{Error, EventCallback, EventKind, Glv, Property, Rect, Result, Vec2, ViewId, ViewNode};

pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
    root: ViewId,
}

impl ViewTree {
    pub fn new(mut root: ViewNode) -> Self {
        root.parent = None;
        root.child = None;
        root.sibling = None;
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root);
        Self { nodes, root }
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(id)
    }

    fn node(&self, id: ViewId) -> Result<&ViewNode> {
        self.nodes.get(id).ok_or(Error::UnknownView(id))
    }

    fn node_mut(&mut self, id: ViewId) -> Result<&mut ViewNode> {
        self.nodes.get_mut(id).ok_or(Error::UnknownView(id))
    }

    /// Adds a detached node. Attach it with [`ViewTree::add_child`].
    pub fn insert(&mut self, mut node: ViewNode) -> ViewId {
        node.parent = None;
        node.child = None;
        node.sibling = None;
        node.focused = false;
        self.nodes.insert(node)
    }

    /// Appends `child` (and its subtree) as the last child of `parent`.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        if child == self.root {
            return Err(Error::RootNotMovable);
        }
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(Error::WouldCycle { parent, child });
        }

        match self.last_child(parent) {
            Some(last) => self.nodes[last].sibling = Some(child),
            None => self.nodes[parent].child = Some(child),
        }
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.sibling = None;
        Ok(())
    }

    /// Convenience for `insert` followed by `add_child`.
    pub fn push_child(&mut self, parent: ViewId, node: ViewNode) -> Result<ViewId> {
        self.node(parent)?;
        let id = self.insert(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Unlinks `id` from its parent; the subtree stays in the arena.
    pub fn detach(&mut self, id: ViewId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootNotMovable);
        }
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        let next = self.nodes[id].sibling;
        if self.nodes[parent].child == Some(id) {
            self.nodes[parent].child = next;
        } else {
            let mut cur = self.nodes[parent].child;
            while let Some(c) = cur {
                if self.nodes[c].sibling == Some(id) {
                    self.nodes[c].sibling = next;
                    break;
                }
                cur = self.nodes[c].sibling;
            }
        }
        let node = &mut self.nodes[id];
        node.parent = None;
        node.sibling = None;
        Ok(())
    }

    /// Detaches `id` and frees it with its whole subtree.
    ///
    /// Returns the freed handles, `id` first, in traversal order.
    pub fn remove(&mut self, id: ViewId) -> Result<Vec<ViewId>> {
        self.detach(id)?;
        let mut freed = vec![id];
        let mut walk = Walker::new(id);
        while walk.advance(self, Descend::Always) {
            freed.push(walk.current());
        }
        for v in &freed {
            self.nodes.remove(*v);
        }
        Ok(freed)
    }

    /// Moves `id` to the end of its sibling chain so it is drawn last.
    pub fn bring_to_front(&mut self, id: ViewId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.detach(id)?;
        self.add_child(parent, id)
    }

    fn last_child(&self, parent: ViewId) -> Option<ViewId> {
        self.children(parent).last()
    }

    pub fn children(&self, parent: ViewId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.nodes.get(parent).and_then(|n| n.child),
        }
    }

    /// `id`'s parent, grandparent, ... up to the top of its tree.
    pub fn ancestors(&self, id: ViewId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.get(id).and_then(|n| n.parent),
        }
    }

    /// Number of links between `id` and the root, `None` if detached.
    pub fn level(&self, id: ViewId) -> Option<usize> {
        if id == self.root {
            return Some(0);
        }
        self.contains(id).then_some(())?;
        let mut level = 0;
        for a in self.ancestors(id) {
            level += 1;
            if a == self.root {
                return Some(level);
            }
        }
        None
    }

    /// Surface position of `id`'s top-left corner: the sum of the offsets of
    /// `id` and its ancestors below the root.
    ///
    /// `None` when `id` is gone or not attached under this tree's root.
    pub fn abs_origin(&self, id: ViewId) -> Option<Vec2> {
        let mut pos = Vec2::ZERO;
        let mut cur = id;
        while cur != self.root {
            let n = self.nodes.get(cur)?;
            pos = pos + n.rect.origin();
            cur = n.parent?;
        }
        Some(pos)
    }

    pub fn abs_rect(&self, id: ViewId) -> Option<Rect> {
        let origin = self.abs_origin(id)?;
        let r = self.nodes.get(id)?.rect;
        Some(Rect::new(origin.x, origin.y, r.w, r.h))
    }

    /// Converts a surface point into `id`'s local space.
    pub fn abs_to_rel(&self, id: ViewId, p: Vec2) -> Option<Vec2> {
        self.abs_origin(id).map(|o| p - o)
    }

    /// Deepest visible, hit-testable view containing `p`, with `p` in its
    /// local space. The first matching sibling in link order wins at each
    /// level. Falls back to the root when nothing below it matches.
    ///
    /// Later siblings draw on top, so where siblings overlap the hit can land
    /// on a view that is covered on screen.
    pub fn find_target(&self, p: Vec2) -> (ViewId, Vec2) {
        let mut target = self.root;
        let mut local = p;
        let mut next = self.nodes[self.root].child;
        while let Some(id) = next {
            let n = &self.nodes[id];
            if n.visible() && n.enabled(Property::HIT_TEST) && n.rect.contains(local) {
                local = local - n.rect.origin();
                target = id;
                next = n.child;
            } else {
                next = n.sibling;
            }
        }
        (target, local)
    }

    /// Registers `cb` for `kind` on `id`, after any existing callbacks.
    ///
    /// The returned handle can be passed to [`ViewTree::remove_callback`].
    pub fn add_callback<F>(&mut self, id: ViewId, kind: EventKind, cb: F) -> Result<EventCallback>
    where
        F: Fn(ViewId, &mut Glv) -> bool + 'static,
    {
        let cb: EventCallback = Rc::new(cb);
        self.node_mut(id)?
            .callbacks
            .entry(kind)
            .or_default()
            .push(cb.clone());
        Ok(cb)
    }

    /// Removes the first registration identical to `cb`.
    pub fn remove_callback(&mut self, id: ViewId, kind: EventKind, cb: &EventCallback) -> Result<bool> {
        let node = self.node_mut(id)?;
        let Some(list) = node.callbacks.get_mut(&kind) else {
            return Ok(false);
        };
        let Some(pos) = list.iter().position(|c| Rc::ptr_eq(c, cb)) else {
            return Ok(false);
        };
        list.remove(pos);
        if list.is_empty() {
            node.callbacks.remove(&kind);
        }
        Ok(true)
    }

    pub fn clear_callbacks(&mut self, id: ViewId, kind: EventKind) -> Result<()> {
        self.node_mut(id)?.callbacks.remove(&kind);
        Ok(())
    }

    pub(crate) fn callbacks(&self, id: ViewId, kind: EventKind) -> CallbackList {
        self.nodes
            .get(id)
            .and_then(|n| n.callbacks.get(&kind))
            .cloned()
            .unwrap_or_default()
    }
}

impl Index<ViewId> for ViewTree {
    type Output = ViewNode;

    fn index(&self, id: ViewId) -> &ViewNode {
        &self.nodes[id]
    }
}

impl IndexMut<ViewId> for ViewTree {
    fn index_mut(&mut self, id: ViewId) -> &mut ViewNode {
        &mut self.nodes[id]
    }
}

pub struct Siblings<'a> {
    tree: &'a ViewTree,
    next: Option<ViewId>,
}

impl Iterator for Siblings<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let id = self.next?;
        self.next = self.tree.nodes.get(id).and_then(|n| n.sibling);
        Some(id)
    }
}

pub struct Ancestors<'a> {
    tree: &'a ViewTree,
    next: Option<ViewId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let id = self.next?;
        self.next = self.tree.nodes.get(id).and_then(|n| n.parent);
        Some(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descend {
    /// Enter children of visible views only (draw order).
    VisibleOnly,
    /// Enter every child (broadcast order).
    Always,
}

/// Depth-first walk over a subtree without recursion.
///
/// Keeps only the current node, its level below the walk's root and its
/// position relative to the root; moving up uses parent links.
#[derive(Clone, Debug)]
pub struct Walker {
    root: ViewId,
    current: ViewId,
    level: usize,
    origin: Vec2,
}

impl Walker {
    pub fn new(root: ViewId) -> Self {
        Self {
            root,
            current: root,
            level: 0,
            origin: Vec2::ZERO,
        }
    }

    pub fn current(&self) -> ViewId {
        self.current
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Position of the current node relative to the walk's root.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Moves to the next node: first child, else next sibling, else the
    /// sibling of the nearest ancestor that has one.
    ///
    /// Returns `false` once the walk is back at its root, or if the tree
    /// lost a node the walk was standing on.
    pub fn advance(&mut self, tree: &ViewTree, descend: Descend) -> bool {
        let Some(cur) = tree.get(self.current) else {
            return false;
        };
        if let Some(child) = cur.child
            && (descend == Descend::Always || cur.visible())
        {
            let Some(c) = tree.get(child) else {
                return false;
            };
            self.origin = self.origin + c.rect.origin();
            self.level += 1;
            self.current = child;
            return true;
        }

        let mut v = self.current;
        while v != self.root {
            let Some(n) = tree.get(v) else {
                return false;
            };
            if let Some(sib) = n.sibling {
                let Some(s) = tree.get(sib) else {
                    return false;
                };
                self.origin = self.origin + s.rect.origin() - n.rect.origin();
                self.current = sib;
                return true;
            }
            self.origin = self.origin - n.rect.origin();
            self.level = self.level.saturating_sub(1);
            let Some(parent) = n.parent else {
                return false;
            };
            v = parent;
        }
        self.current = self.root;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (ViewTree, [ViewId; 4]) {
        // root
        // ├── a (10,10)
        // │   └── b (5,5)
        // └── c (100,0)
        let mut t = ViewTree::new(ViewNode::new(Rect::sized(400.0, 300.0)));
        let root = t.root();
        let a = t.push_child(root, ViewNode::new(Rect::new(10.0, 10.0, 80.0, 80.0))).unwrap();
        let b = t.push_child(a, ViewNode::new(Rect::new(5.0, 5.0, 20.0, 20.0))).unwrap();
        let c = t.push_child(root, ViewNode::new(Rect::new(100.0, 0.0, 50.0, 50.0))).unwrap();
        (t, [root, a, b, c])
    }

    #[test]
    fn children_follow_link_order() {
        let (t, [root, a, _, c]) = tree();
        assert_eq!(t.children(root).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn abs_origin_sums_ancestor_offsets() {
        let (t, [root, _, b, c]) = tree();
        assert_eq!(t.abs_origin(root), Some(Vec2::ZERO));
        assert_eq!(t.abs_origin(b), Some(Vec2::new(15.0, 15.0)));
        assert_eq!(t.abs_rect(c), Some(Rect::new(100.0, 0.0, 50.0, 50.0)));
        assert_eq!(t.level(b), Some(2));
    }

    #[test]
    fn detached_node_has_no_abs_origin() {
        let (mut t, [_, a, b, _]) = tree();
        t.detach(a).unwrap();
        assert_eq!(t.abs_origin(b), None);
        assert_eq!(t.abs_to_rel(b, Vec2::new(1.0, 1.0)), None);
        assert_eq!(t.level(a), None);
    }

    #[test]
    fn add_child_rejects_cycles_and_double_parents() {
        let (mut t, [root, a, b, c]) = tree();
        assert_eq!(t.add_child(b, c), Err(Error::AlreadyAttached(c)));
        t.detach(a).unwrap();
        assert_eq!(t.add_child(b, a), Err(Error::WouldCycle { parent: b, child: a }));
        assert_eq!(t.add_child(a, root), Err(Error::RootNotMovable));
        t.add_child(c, a).unwrap();
        assert_eq!(t.abs_origin(b), Some(Vec2::new(115.0, 15.0)));
    }

    #[test]
    fn detach_middle_sibling_keeps_chain() {
        let (mut t, [root, a, _, c]) = tree();
        let d = t.push_child(root, ViewNode::new(Rect::sized(1.0, 1.0))).unwrap();
        t.detach(c).unwrap();
        assert_eq!(t.children(root).collect::<Vec<_>>(), vec![a, d]);
        t.bring_to_front(a).unwrap();
        assert_eq!(t.children(root).collect::<Vec<_>>(), vec![d, a]);
    }

    #[test]
    fn remove_frees_whole_subtree() {
        let (mut t, [root, a, b, c]) = tree();
        let freed = t.remove(a).unwrap();
        assert_eq!(freed, vec![a, b]);
        assert!(!t.contains(b));
        assert_eq!(t.children(root).collect::<Vec<_>>(), vec![c]);
        assert_eq!(t.remove(a), Err(Error::UnknownView(a)));
        assert_eq!(t.remove(root), Err(Error::RootNotMovable));
    }

    #[test]
    fn walker_is_preorder_and_tracks_position() {
        let (t, [root, a, b, c]) = tree();
        let mut w = Walker::new(root);
        let mut seen = Vec::new();
        while w.advance(&t, Descend::Always) {
            seen.push((w.current(), w.level(), w.origin()));
        }
        assert_eq!(
            seen,
            vec![
                (a, 1, Vec2::new(10.0, 10.0)),
                (b, 2, Vec2::new(15.0, 15.0)),
                (c, 1, Vec2::new(100.0, 0.0)),
            ]
        );
        assert_eq!(w.current(), root);
        assert_eq!(w.origin(), Vec2::ZERO);
    }

    #[test]
    fn walker_retraces_several_levels_to_a_sibling() {
        let (mut t, [root, a, b, c]) = tree();
        let d = t.push_child(b, ViewNode::new(Rect::new(1.0, 2.0, 3.0, 3.0))).unwrap();
        let mut w = Walker::new(root);
        let mut seen = Vec::new();
        while w.advance(&t, Descend::Always) {
            seen.push((w.current(), w.level(), w.origin()));
        }
        assert_eq!(
            seen,
            vec![
                (a, 1, Vec2::new(10.0, 10.0)),
                (b, 2, Vec2::new(15.0, 15.0)),
                (d, 3, Vec2::new(16.0, 17.0)),
                (c, 1, Vec2::new(100.0, 0.0)),
            ]
        );
        assert_eq!(w.level(), 0);
    }

    #[test]
    fn walker_skips_children_of_hidden_views() {
        let (mut t, [root, a, _, c]) = tree();
        t[a].disable(Property::VISIBLE);
        let mut w = Walker::new(root);
        let mut seen = Vec::new();
        while w.advance(&t, Descend::VisibleOnly) {
            seen.push(w.current());
        }
        assert_eq!(seen, vec![a, c]);
    }

    #[test]
    fn walker_stays_inside_subtree() {
        let (t, [_, a, b, _]) = tree();
        let mut w = Walker::new(a);
        let mut seen = Vec::new();
        while w.advance(&t, Descend::Always) {
            seen.push(w.current());
        }
        assert_eq!(seen, vec![b]);
    }

    #[test]
    fn find_target_prefers_deepest() {
        let (mut t, [root, a, b, _]) = tree();
        assert_eq!(t.find_target(Vec2::new(20.0, 20.0)), (b, Vec2::new(5.0, 5.0)));
        assert_eq!(t.find_target(Vec2::new(50.0, 50.0)), (a, Vec2::new(40.0, 40.0)));
        assert_eq!(t.find_target(Vec2::new(300.0, 200.0)).0, root);
        t[b].disable(Property::HIT_TEST);
        assert_eq!(t.find_target(Vec2::new(20.0, 20.0)).0, a);
    }

    #[test]
    fn find_target_takes_first_overlapping_sibling() {
        let (mut t, [root, a, _, _]) = tree();
        let cover = t.push_child(root, ViewNode::new(Rect::new(0.0, 0.0, 60.0, 60.0))).unwrap();
        assert_eq!(t.find_target(Vec2::new(50.0, 50.0)).0, a);
        t.bring_to_front(a).unwrap();
        assert_eq!(t.find_target(Vec2::new(50.0, 50.0)).0, cover);
    }

    #[test]
    fn callbacks_remove_one_identical_entry() {
        let (mut t, [_, a, _, _]) = tree();
        let cb = t.add_callback(a, EventKind::MouseDown, |_, _| true).unwrap();
        t.add_callback(a, EventKind::MouseDown, |_, _| false).unwrap();
        assert_eq!(t[a].callback_count(EventKind::MouseDown), 2);
        assert!(t.remove_callback(a, EventKind::MouseDown, &cb).unwrap());
        assert!(!t.remove_callback(a, EventKind::MouseDown, &cb).unwrap());
        assert_eq!(t[a].callback_count(EventKind::MouseDown), 1);
        assert!(!t[a].has_callbacks(EventKind::KeyDown));
    }
}
