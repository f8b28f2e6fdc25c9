pub mod database;
pub mod setting;
pub mod util;

pub const CLI_NAME: &str = "fyyur";
pub const VERSION: &str = "0.1.0";

// logging constants
pub const FYYUR_LOGLEVEL: &str = "FYYUR_LOGLEVEL";
