pub mod conformation;
pub mod estimate;
pub mod parse;
