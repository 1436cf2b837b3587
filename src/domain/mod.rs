// Domain layer: the person record and the ports the workflow talks through.

pub mod model;
pub mod ports;
