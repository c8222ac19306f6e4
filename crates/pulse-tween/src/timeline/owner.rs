// timeline/owner.rs
//
// Liveness tokens binding a timeline to the lifetime of some host object.
// When the owner dies the timeline completes on its next update.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Anything that can report whether it is still alive.
pub trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl<T: Send + Sync> Liveness for Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Shared kill switch. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct LifeToken {
    alive: Arc<AtomicBool>,
}

impl LifeToken {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn kill(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for LifeToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness for LifeToken {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Owner reference held by a timeline.
#[derive(Clone)]
pub struct OwnerRef {
    liveness: Arc<dyn Liveness>,
    name: String,
}

impl OwnerRef {
    pub fn new(liveness: impl Liveness + 'static, name: impl Into<String>) -> Self {
        Self {
            liveness: Arc::new(liveness),
            name: name.into(),
        }
    }

    /// Bind to a `LifeToken`. Killing any clone of the token kills the owner.
    pub fn token(token: &LifeToken, name: impl Into<String>) -> Self {
        Self::new(token.clone(), name)
    }

    /// Bind to an `Arc`-owned object. The owner dies with its last strong ref.
    pub fn weak<T: Send + Sync + 'static>(owner: &Arc<T>, name: impl Into<String>) -> Self {
        Self::new(Arc::downgrade(owner), name)
    }

    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerRef")
            .field("name", &self.name)
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = LifeToken::new();
        let owner = OwnerRef::token(&token, "hud");
        assert!(owner.is_alive());
        token.clone().kill();
        assert!(!owner.is_alive());
        assert_eq!(owner.name(), "hud");
    }

    #[test]
    fn weak_owner_dies_with_arc() {
        let actor = Arc::new(42u32);
        let owner = OwnerRef::weak(&actor, "actor");
        assert!(owner.is_alive());
        drop(actor);
        assert!(!owner.is_alive());
    }
}
