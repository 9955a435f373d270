pub mod classify;
pub mod maintenance;
pub mod patterns;
pub mod status;
