pub mod login;
pub mod scan;

pub use login::execute_login;
pub use scan::execute_scan;
