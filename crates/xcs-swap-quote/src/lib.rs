// ----- standard library imports
// ----- extra library imports
// ----- local modules
pub mod config;
mod error;
pub mod form;
pub mod hook;
mod model;
pub mod quote;
pub mod relay;
pub mod sources;
pub mod validation;
pub mod wallet;
// ----- local imports
pub use error::{Error, Result};
pub use model::{PriceQuote, TokenSelection};

// ----- end imports
