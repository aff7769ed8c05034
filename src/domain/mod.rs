// Domain layer: account model and the ports the runner consumes. No IO here.

pub mod model;
pub mod ports;
