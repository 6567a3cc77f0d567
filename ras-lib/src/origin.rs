use serde::{Serialize, Deserialize};

/// where an entity is known to exist. an absent origin on a listing entry
/// means the entity was created by the current environment and is always
/// local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub local: bool,
    pub remote: bool,
}

impl Origin {
    pub fn local_only() -> Self {
        Origin { local: true, remote: false }
    }

    pub fn remote_only() -> Self {
        Origin { local: false, remote: true }
    }
}
