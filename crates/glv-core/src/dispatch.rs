use crate::{EventKind, Glv, Property, ViewId};

impl Glv {
    /// Runs the handlers of one view for `kind` and reports whether the
    /// event should keep bubbling.
    ///
    /// A view without [`Property::CONTROLLABLE`] swallows the event. Otherwise
    /// the widget hook runs first; if it lets the event through, the
    /// registered callbacks run in order and their results are ANDed,
    /// stopping at the first `false`. [`Property::ALWAYS_BUBBLE`] forces the
    /// result to `true`.
    pub fn dispatch(&mut self, id: ViewId, kind: EventKind) -> bool {
        let Some(node) = self.tree_mut().get_mut(id) else {
            log::warn!("dispatch of {kind} to missing view {id:?}");
            return false;
        };
        if !node.enabled(Property::CONTROLLABLE) {
            return false;
        }
        log::trace!("dispatch {kind} to {} {id:?}", node.class_name());

        // The hook gets the whole controller, so the widget leaves its slot
        // for the duration of the call. A re-entrant dispatch to the same
        // view finds the slot empty and skips the hook.
        let mut bubble = match node.widget.take() {
            Some(mut widget) => {
                let r = widget.on_event(id, kind, self);
                if let Some(node) = self.tree_mut().get_mut(id)
                    && node.widget.is_none()
                {
                    node.widget = Some(widget);
                }
                r
            }
            None => true,
        };

        if bubble {
            for cb in self.tree().callbacks(id, kind) {
                let r = cb(id, self);
                bubble &= r;
                if !r {
                    break;
                }
            }
        }

        bubble
            || self
                .tree()
                .get(id)
                .is_some_and(|n| n.enabled(Property::ALWAYS_BUBBLE))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::{Glv, Property, Rect, ViewId, ViewNode, Widget};

    use super::*;

    struct Returns(bool);

    impl Widget for Returns {
        fn on_event(&mut self, _: ViewId, _: EventKind, _: &mut Glv) -> bool {
            self.0
        }
    }

    fn view(glv: &mut Glv, w: impl Widget + 'static) -> ViewId {
        let root = glv.root();
        glv.tree_mut()
            .push_child(root, ViewNode::new(Rect::sized(10.0, 10.0)).with_widget(w))
            .unwrap()
    }

    #[test]
    fn callbacks_and_short_circuit() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(true));
        let log = Rc::new(RefCell::new(Vec::new()));
        for (i, result) in [true, false, true].into_iter().enumerate() {
            let log = log.clone();
            glv.tree_mut()
                .add_callback(v, EventKind::KeyDown, move |_, _| {
                    log.borrow_mut().push(i);
                    result
                })
                .unwrap();
        }
        assert!(!glv.dispatch(v, EventKind::KeyDown));
        assert_eq!(*log.borrow(), vec![0, 1]);
    }

    #[test]
    fn hook_false_skips_callbacks() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(false));
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        glv.tree_mut()
            .add_callback(v, EventKind::MouseUp, move |_, _| {
                *h.borrow_mut() += 1;
                true
            })
            .unwrap();
        assert!(!glv.dispatch(v, EventKind::MouseUp));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn always_bubble_overrides() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(false));
        glv.tree_mut()[v].enable(Property::ALWAYS_BUBBLE);
        assert!(glv.dispatch(v, EventKind::MouseDown));
    }

    #[test]
    fn uncontrollable_view_swallows() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(true));
        glv.tree_mut()[v]
            .disable(Property::CONTROLLABLE)
            .enable(Property::ALWAYS_BUBBLE);
        assert!(!glv.dispatch(v, EventKind::MouseDown));
    }

    #[test]
    fn no_callbacks_is_a_no_op() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(true));
        assert!(glv.dispatch(v, EventKind::Custom(3)));
    }

    #[test]
    fn callback_may_remove_its_own_view() {
        let mut glv = Glv::new(100.0, 100.0);
        let v = view(&mut glv, Returns(true));
        glv.tree_mut()
            .add_callback(v, EventKind::KeyUp, |id, g| {
                g.remove(id).unwrap();
                true
            })
            .unwrap();
        assert!(glv.dispatch(v, EventKind::KeyUp));
        assert!(!glv.tree().contains(v));
    }
}
