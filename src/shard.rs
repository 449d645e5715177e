use std::{fmt, hash::Hash, sync::Arc};

/// Unit of ownership on the ring.
///
/// A shard controls the keys that fall into the ranges ending at its vnodes.
/// Anything cheap to clone with identity-based equality can act as one.
pub trait RingShard: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> RingShard for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Shard identified by its name alone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shard {
    name: Arc<str>,
}

impl Shard {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shard").field(&self.name).finish()
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Shard {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Shard {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
