// Domain layer: presentation models and the content-store port.

pub mod model;
pub mod ports;
