pub mod emitter;
pub mod geometry;
pub mod id;
pub mod model;
pub mod parser;
pub mod payload;
pub mod transform;

pub use emitter::emit_svg;
pub use id::NodeName;
pub use model::{ElementIndex, SvgDocument, SvgElement, attr};
pub use parser::parse_svg;
pub use payload::{Edge, EdgeKey, EdgeLookup, TopologyPayload};
pub use transform::ViewTransform;

// Re-export kurbo geometry so downstream crates share one point type
pub use kurbo::{Point, Size};
