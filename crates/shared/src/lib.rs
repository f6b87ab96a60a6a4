mod error;
pub mod mealplan;
mod session;

pub use error::*;
pub use session::*;
