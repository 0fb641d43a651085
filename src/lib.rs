pub mod driver;
pub mod model;
pub mod worker;
