// Domain layer: core models and ports (interfaces). Depends only on std, serde and serde_json.

pub mod model;
pub mod ports;
