pub(crate) mod compositor;
pub(crate) mod layout;
pub(crate) mod output;
