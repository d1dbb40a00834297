pub mod news;
pub mod upload;
