// Domain layer: models and ports. No http/config/presentation dependencies.

pub mod model;
pub mod ports;
