pub mod chains;
pub mod details;
pub mod timeline;
