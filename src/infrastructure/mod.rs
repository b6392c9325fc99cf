pub mod anilist;
pub mod cache;
pub mod client;
pub mod share;
