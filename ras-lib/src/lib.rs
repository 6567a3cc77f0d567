pub mod ids;
pub mod origin;
pub mod path;
pub mod validation;
