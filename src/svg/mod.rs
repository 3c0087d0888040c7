pub(crate) mod convert;
pub(crate) mod dimension;
