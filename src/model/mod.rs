mod assessment;
mod attempt;
mod auth;
mod ranking;
mod student;

pub use assessment::*;
pub use attempt::*;
pub use auth::*;
pub use ranking::*;
pub use student::*;
