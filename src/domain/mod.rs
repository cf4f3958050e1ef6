// Domain layer - Pure models with no I/O
pub mod chart;
pub mod netlogo;
pub mod reference;
pub mod temperature;
