// Domain layer: summary models, provider/config ports and the source-agnostic merge step.

pub mod model;
pub mod ports;

pub mod services;
