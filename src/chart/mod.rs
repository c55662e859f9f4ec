pub(crate) mod note;
pub(crate) mod position;
