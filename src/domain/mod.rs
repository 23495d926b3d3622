// Domain layer: typed dataset models and the data-source port. No I/O here.

pub mod model;
pub mod ports;
