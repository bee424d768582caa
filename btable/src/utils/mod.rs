pub mod path;
pub mod sort;
