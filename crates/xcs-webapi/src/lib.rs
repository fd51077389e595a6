// ----- standard library imports
// ----- extra library imports
// ----- local modules
pub mod errors;
pub mod prices;

// ----- end imports
