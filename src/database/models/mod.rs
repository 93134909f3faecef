mod macros;

pub mod adjustment;
pub mod employee;
pub mod pay;
pub mod settings;
pub mod shift;

// Re-export all models for easy importing
pub use adjustment::*;
pub use employee::*;
pub use pay::*;
pub use settings::*;
pub use shift::*;
