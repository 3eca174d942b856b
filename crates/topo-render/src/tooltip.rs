//! Edge tooltip formatting.

use topo_core::emitter::escape_text;
use topo_core::payload::Edge;

/// Format a link speed given in Mbps.
///
/// Below 1000 the value is shown as Mbps, otherwise as Gbps with one
/// decimal and a trailing `.0` dropped.
pub fn format_speed(mbps: u64) -> String {
    if mbps < 1000 {
        return format!("{mbps} Mbps");
    }
    let gbps = format!("{:.1}", mbps as f64 / 1000.0);
    let trimmed = gbps.strip_suffix(".0").unwrap_or(&gbps);
    format!("{trimmed} Gbps")
}

/// Map a Wi-Fi channel number to its band. Channel 0 has no band.
pub fn channel_band(channel: u32) -> Option<&'static str> {
    match channel {
        0 => None,
        1..=14 => Some("2.4GHz"),
        36..=64 | 149..=177 => Some("5GHz"),
        _ => Some("6GHz"),
    }
}

/// Render the hover tooltip for an edge as an HTML fragment.
pub fn render_edge_tooltip(edge: &Edge) -> String {
    let mut html = String::from(r#"<div class="edge-tooltip">"#);
    let (icon, kind) = if edge.is_wireless() {
        ("mdi:wifi", "Wireless")
    } else {
        ("mdi:ethernet", "Wired")
    };
    html.push_str(&format!(
        r#"<div class="edge-tooltip-title"><ha-icon icon="{icon}"></ha-icon> {kind}</div>"#
    ));
    html.push_str(&format!(
        r#"<div class="edge-tooltip-ends">{} ↔ {}</div>"#,
        escape_text(edge.left.trim()),
        escape_text(edge.right.trim())
    ));

    let mut row = |label: &str, value: &str| {
        html.push_str(&format!(
            r#"<div class="edge-tooltip-row"><span>{label}</span> {value}</div>"#
        ));
    };
    if let Some(port) = edge.label.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        row("Port", &escape_text(port));
    }
    if edge.poe == Some(true) {
        row("PoE", r#"<ha-icon icon="mdi:flash"></ha-icon>"#);
    }
    if let Some(speed) = edge.speed.filter(|&s| s > 0) {
        row("Speed", &format_speed(speed));
    }
    if let Some((channel, band)) = edge.channel.and_then(|c| Some((c, channel_band(c)?))) {
        row("Channel", &format!("{channel} ({band})"));
    }

    html.push_str("</div>");
    html
}
