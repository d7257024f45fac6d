// Domain layer: deck model, format tags and ports. No I/O here.

pub mod format;
pub mod model;
pub mod ports;
