use crate::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("view {0:?} is not in the tree")]
    UnknownView(ViewId),
    #[error("view {0:?} already has a parent")]
    AlreadyAttached(ViewId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: ViewId, child: ViewId },
    #[error("the root view cannot be moved or removed")]
    RootNotMovable,
}

pub type Result<T> = std::result::Result<T, Error>;
