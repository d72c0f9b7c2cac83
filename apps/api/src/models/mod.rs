pub mod cv;
pub mod loose;
