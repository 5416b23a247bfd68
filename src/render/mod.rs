pub(crate) mod compositor;
pub(crate) mod draw;
pub(crate) mod frame;
