pub mod drive;
pub mod status;
