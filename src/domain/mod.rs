// Domain layer: sales records, report shapes and the ports the analyzer talks through.

pub mod model;
pub mod ports;
