pub(crate) mod discovery;
pub(crate) mod range;
pub(crate) mod registry;
pub(crate) mod settle;
