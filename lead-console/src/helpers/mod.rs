pub mod confirm;
pub mod download;
pub mod format;
pub mod keywords;
pub mod notify;
pub mod selection;
