pub(crate) mod font;
pub(crate) mod shaper;
pub(crate) mod wrap;
