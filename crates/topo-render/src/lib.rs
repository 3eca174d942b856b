pub mod edge;
pub mod hit;
pub mod node;
pub mod tooltip;

pub use edge::{EdgeAnnotation, annotate_edges, find_edge_from_target, find_edge_on_path};
pub use hit::{element_at_point, hit_path};
pub use node::{
    annotate_node_ids, clear_node_selection, find_node_element, highlight_selected_node,
    infer_node_name, mark_node_selected, resolve_node_name,
};
pub use tooltip::{channel_band, format_speed, render_edge_tooltip};
