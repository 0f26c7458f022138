pub mod arc;
pub mod point;
pub mod polar;
pub mod vector;
