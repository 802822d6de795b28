pub(crate) mod config;
pub(crate) mod random;
pub(crate) mod search;
pub(crate) mod tables;
