pub mod init;
pub mod snapshot;
