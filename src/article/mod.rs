pub(crate) mod genre;
pub(crate) mod payload;
pub(crate) mod slug;
