pub mod config;
pub mod engagement;
pub mod init;
pub mod predict;
pub mod serve;
