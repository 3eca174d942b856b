pub mod annotate;
pub mod cache;
pub mod config;
pub mod gesture;
pub mod host;
pub mod input;
pub mod selection;
pub mod shortcuts;
pub mod state;
pub mod style;

pub use annotate::{AnnotationOutcome, run_annotation_pass};
pub use cache::{AnnotationCache, AnnotationCacheKey};
pub use config::ViewportConfig;
pub use gesture::{Scene, ViewportEngine};
pub use host::{ActionLog, HostAction, TooltipContent, ViewportHost};
pub use input::{InputEvent, PointerId, PointerInput};
pub use selection::SelectionState;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use state::{Gesture, ViewportState};
