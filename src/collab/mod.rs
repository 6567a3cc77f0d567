//! interfaces of the external collaborators the explorer is wired to.
//! every one of them is injected into `ExplorerState`; the defaults are
//! inert so a caller only provides what its surface actually uses.

pub mod nav;
pub mod ui;
pub mod favorites;
pub mod installer;
pub mod apps;
