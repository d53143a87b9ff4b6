pub mod basic_auth;
pub mod remote_addr;

pub use basic_auth::basic_auth_password;
pub use remote_addr::remote_address;
