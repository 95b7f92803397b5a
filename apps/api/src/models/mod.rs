pub mod profile;
pub mod response;
