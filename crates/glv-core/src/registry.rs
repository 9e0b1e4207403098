//! Process-wide list of live [`Glv`](crate::Glv) instances.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static INSTANCES: Mutex<Vec<GlvId>> = Mutex::new(Vec::new());

/// Identity of a root controller, unique for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlvId(u64);

impl fmt::Display for GlvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glv#{}", self.0)
    }
}

pub(crate) fn next_id() -> GlvId {
    GlvId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

pub(crate) fn register(id: GlvId) {
    INSTANCES.lock().push(id);
    log::debug!("registered {id}");
}

/// Removes one entry for `id`. Returns whether one was found.
pub(crate) fn deregister(id: GlvId) -> bool {
    let mut list = INSTANCES.lock();
    match list.iter().position(|g| *g == id) {
        Some(i) => {
            list.remove(i);
            log::debug!("deregistered {id}");
            true
        }
        None => {
            log::warn!("{id} was not registered");
            false
        }
    }
}

pub fn is_valid(id: GlvId) -> bool {
    INSTANCES.lock().contains(&id)
}

/// Snapshot of the live instances in construction order.
pub fn instances() -> Vec<GlvId> {
    INSTANCES.lock().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deregister_removes_exactly_one_entry() {
        let id = next_id();
        register(id);
        register(id);
        assert!(deregister(id));
        assert!(is_valid(id));
        assert!(deregister(id));
        assert!(!is_valid(id));
        assert!(!deregister(id));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(next_id(), next_id());
    }
}
