pub(crate) mod config;
pub(crate) mod pinned;
pub(crate) mod reveal;
