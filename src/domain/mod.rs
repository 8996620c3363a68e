// Domain layer: wire models and ports. Views depend on the ports only.

pub mod model;
pub mod ports;
