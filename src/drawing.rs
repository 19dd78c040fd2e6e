pub(crate) mod color;
pub(crate) mod entry;
pub(crate) mod model;
