pub mod adjustments;
pub mod pay;
pub mod settings;
pub mod shared;
