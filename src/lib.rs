// CO₂ to temperature simulator: domain model, NetLogo bridge and HTTP surface
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
