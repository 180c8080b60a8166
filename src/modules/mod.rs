pub mod auth;
pub mod content;
pub mod discount;
pub mod library;
pub mod playback;
pub mod subscription;
