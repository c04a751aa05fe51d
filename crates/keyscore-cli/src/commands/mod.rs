pub mod grade;
pub mod init;
pub mod score;
pub mod validate;
