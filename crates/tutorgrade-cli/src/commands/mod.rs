pub mod grade;
pub mod init;
pub mod pending;
pub mod review;
pub mod stats;
pub mod validate;
