pub(crate) mod choreographer;
pub(crate) mod model;
