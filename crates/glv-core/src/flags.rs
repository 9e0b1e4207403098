use bitflags::bitflags;

bitflags! {
    /// Capability bits of a view.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Property: u32 {
        /// Drawn, and its children are walked by the draw traversal.
        const VISIBLE         = 1 << 0;
        /// Fill the background before the draw hook.
        const DRAW_BACK       = 1 << 1;
        /// Stroke a frame after the draw hook.
        const DRAW_BORDER     = 1 << 2;
        /// Clip own drawing to own rect.
        const CROP_SELF       = 1 << 3;
        /// Clip every descendant to own rect.
        const CROP_CHILDREN   = 1 << 4;
        /// Stroke a highlight frame while focused.
        const FOCUS_HIGHLIGHT = 1 << 5;
        /// Candidate for mouse-down hit testing.
        const HIT_TEST        = 1 << 6;
        /// Receives events. Without it the view swallows everything.
        const CONTROLLABLE    = 1 << 7;
        /// Keep bubbling past this view whatever its handlers return.
        const ALWAYS_BUBBLE   = 1 << 8;
    }
}

impl Default for Property {
    fn default() -> Self {
        Property::VISIBLE
            | Property::DRAW_BACK
            | Property::DRAW_BORDER
            | Property::CONTROLLABLE
            | Property::FOCUS_HIGHLIGHT
            | Property::HIT_TEST
    }
}
