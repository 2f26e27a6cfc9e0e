mod init;
mod serve;

pub use init::handle_init;
pub use serve::handle_serve;
