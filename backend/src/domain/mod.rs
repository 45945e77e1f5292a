pub mod code;
pub mod daily;
pub mod encoding;
pub mod gate;
pub mod models;
pub mod prayer_service;
