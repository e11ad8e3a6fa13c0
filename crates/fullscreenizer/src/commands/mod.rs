pub mod class;
pub mod init;
pub mod list;
pub mod run;
