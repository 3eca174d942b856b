//! Hit testing: point → element lookup.
//!
//! Reverse-walks the drawing (front-to-back) to find which painted element
//! is under a viewport position, the way a browser's `elementFromPoint`
//! would. Geometry comes from `kurbo`: shapes are tested in their local
//! coordinate system (group `transform`s and the root `viewBox` are
//! inverted first), fills with a winding test, strokes by distance to the
//! outline. That is what makes the wide transparent edge hitboxes useful
//! here too: a 12px stroke catches pointers a 1px edge would miss.

use kurbo::{
    Affine, BezPath, Circle, Ellipse, Line, ParamCurveNearest, Point, Rect, Shape, Vec2,
};
use smallvec::SmallVec;
use topo_core::model::{ElementIndex, SvgDocument, SvgElement};
use topo_core::transform::ViewTransform;

/// Default font size assumed for `<text>` boxes without one.
const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Find the topmost painted element at viewport position `point`.
/// Returns `None` if nothing is hit (background).
pub fn element_at_point(
    doc: &SvgDocument,
    point: Point,
    view: &ViewTransform,
) -> Option<ElementIndex> {
    let root = doc.document_element()?;
    let p = view.screen_to_drawing(point);
    hit_element(doc, root, Affine::IDENTITY, &Paint::default(), p)
}

/// The hit path for a viewport position: innermost → outermost.
/// Empty when nothing is hit.
pub fn hit_path(doc: &SvgDocument, point: Point, view: &ViewTransform) -> Vec<ElementIndex> {
    element_at_point(doc, point, view)
        .map(|target| doc.composed_path(target))
        .unwrap_or_default()
}

// ─── Inherited paint state ───────────────────────────────────────────────

/// Which parts of a shape receive pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerEvents {
    /// `visiblePainted` / `auto`: painted fill and painted stroke.
    Painted,
    Fill,
    Stroke,
    /// `all` / `painted` / `visible`: the geometry regardless of paint.
    All,
    None,
}

impl PointerEvents {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "auto" | "visiblePainted" => Some(Self::Painted),
            "fill" | "visibleFill" => Some(Self::Fill),
            "stroke" | "visibleStroke" => Some(Self::Stroke),
            "all" | "painted" | "visible" => Some(Self::All),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Properties that cascade from groups to shapes.
#[derive(Debug, Clone, Copy)]
struct Paint {
    fill: bool,
    stroke: bool,
    stroke_width: f64,
    pointer_events: PointerEvents,
    visible: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: true,
            stroke: false,
            stroke_width: 1.0,
            pointer_events: PointerEvents::Painted,
            visible: true,
        }
    }
}

impl Paint {
    fn inherit(&self, el: &SvgElement) -> Self {
        let mut next = *self;
        if let Some(fill) = presentation(el, "fill") {
            next.fill = fill.trim() != "none";
        }
        if let Some(stroke) = presentation(el, "stroke") {
            next.stroke = stroke.trim() != "none";
        }
        if let Some(width) = presentation(el, "stroke-width").and_then(parse_length) {
            next.stroke_width = width;
        }
        if let Some(pe) = presentation(el, "pointer-events").and_then(PointerEvents::parse) {
            next.pointer_events = pe;
        }
        if let Some(vis) = presentation(el, "visibility") {
            next.visible = !matches!(vis.trim(), "hidden" | "collapse");
        }
        next
    }

    fn hits_fill(&self) -> bool {
        match self.pointer_events {
            PointerEvents::Painted => self.visible && self.fill,
            PointerEvents::Fill => self.visible,
            PointerEvents::All => true,
            PointerEvents::Stroke | PointerEvents::None => false,
        }
    }

    /// Half the stroke width if strokes receive events, else `None`.
    fn stroke_reach(&self) -> Option<f64> {
        let hit = match self.pointer_events {
            PointerEvents::Painted => self.visible && self.stroke,
            PointerEvents::Stroke => self.visible,
            PointerEvents::All => true,
            PointerEvents::Fill | PointerEvents::None => false,
        };
        (hit && self.stroke_width > 0.0).then_some(self.stroke_width / 2.0)
    }
}

// ─── Tree walk ───────────────────────────────────────────────────────────

fn hit_element(
    doc: &SvgDocument,
    idx: ElementIndex,
    parent: Affine,
    inherited: &Paint,
    p: Point,
) -> Option<ElementIndex> {
    let el = doc.element(idx);
    let tag = el.tag.as_str();
    if is_non_rendering(tag) || presentation(el, "display").is_some_and(|d| d.trim() == "none") {
        return None;
    }

    let paint = inherited.inherit(el);
    let mut affine = parent * element_transform(el);
    if tag.eq_ignore_ascii_case("svg") {
        affine = affine * viewport_transform(el);
    }

    if is_container(tag) {
        // Last painted = topmost
        return doc
            .children(idx)
            .iter()
            .rev()
            .find_map(|&child| hit_element(doc, child, affine, &paint, p));
    }

    if paint.pointer_events == PointerEvents::None {
        return None;
    }
    let local = affine.inverse() * p;
    shape_contains(el, &paint, local).then_some(idx)
}

fn is_container(tag: &str) -> bool {
    matches!(tag, "svg" | "g" | "a" | "switch")
}

fn is_non_rendering(tag: &str) -> bool {
    matches!(
        tag,
        "defs"
            | "title"
            | "desc"
            | "metadata"
            | "style"
            | "script"
            | "clipPath"
            | "mask"
            | "marker"
            | "pattern"
            | "symbol"
            | "filter"
            | "linearGradient"
            | "radialGradient"
            | "tspan"
    )
}

// ─── Shapes ──────────────────────────────────────────────────────────────

fn shape_contains(el: &SvgElement, paint: &Paint, local: Point) -> bool {
    let num = |name: &str| el.attr(name).and_then(parse_length).unwrap_or(0.0);
    match el.tag.as_str() {
        "rect" | "image" | "use" | "foreignObject" => {
            let (w, h) = (num("width"), num("height"));
            if w <= 0.0 || h <= 0.0 {
                return false;
            }
            let rect = Rect::new(num("x"), num("y"), num("x") + w, num("y") + h);
            if el.tag != "rect" {
                return rect.contains(local);
            }
            test_shape(&rect, paint, local)
        }
        "circle" => {
            let r = num("r");
            r > 0.0 && test_shape(&Circle::new((num("cx"), num("cy")), r), paint, local)
        }
        "ellipse" => {
            let (rx, ry) = (num("rx"), num("ry"));
            rx > 0.0
                && ry > 0.0
                && test_shape(
                    &Ellipse::new((num("cx"), num("cy")), (rx, ry), 0.0),
                    paint,
                    local,
                )
        }
        "line" => {
            let line = Line::new((num("x1"), num("y1")), (num("x2"), num("y2")));
            paint
                .stroke_reach()
                .is_some_and(|reach| outline_distance(&line, local) <= reach)
        }
        "polyline" | "polygon" => {
            let Some(path) = el.attr("points").map(|pts| points_path(pts, el.tag == "polygon"))
            else {
                return false;
            };
            test_shape(&path, paint, local)
        }
        "path" => match el.attr("d").map(BezPath::from_svg) {
            Some(Ok(path)) => test_shape(&path, paint, local),
            Some(Err(e)) => {
                log::trace!("unparseable path data: {e}");
                false
            }
            None => false,
        },
        "text" => text_box(el).contains(local) && paint.visible,
        _ => false,
    }
}

fn test_shape<S: Shape>(shape: &S, paint: &Paint, local: Point) -> bool {
    if paint.hits_fill() && shape.contains(local) {
        return true;
    }
    paint
        .stroke_reach()
        .is_some_and(|reach| outline_distance(shape, local) <= reach)
}

/// Shortest distance from `p` to the outline of `shape`.
fn outline_distance<S: Shape>(shape: &S, p: Point) -> f64 {
    kurbo::segments(shape.path_elements(0.1))
        .map(|seg| seg.nearest(p, 1e-3).distance_sq)
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

fn points_path(points: &str, close: bool) -> BezPath {
    let nums = parse_numbers(points);
    let mut path = BezPath::new();
    for (i, pair) in nums.chunks_exact(2).enumerate() {
        let pt = Point::new(pair[0], pair[1]);
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    if close && nums.len() >= 4 {
        path.close_path();
    }
    path
}

/// Approximate layout box of a `<text>` element: average glyph advance of
/// 0.6em, ascent 0.8em, descent 0.2em, honoring `text-anchor`.
fn text_box(el: &SvgElement) -> Rect {
    let first = |name: &str| {
        el.attr(name)
            .map(parse_numbers)
            .and_then(|n| n.first().copied())
            .unwrap_or(0.0)
    };
    let font_size = presentation(el, "font-size")
        .and_then(parse_length)
        .unwrap_or(DEFAULT_FONT_SIZE);
    let (x, y) = (first("x"), first("y"));
    let chars = el.text.trim().chars().count().max(1) as f64;
    let width = chars * font_size * 0.6;
    let left = match presentation(el, "text-anchor").map(str::trim) {
        Some("middle") => x - width / 2.0,
        Some("end") => x - width,
        _ => x,
    };
    Rect::new(left, y - font_size * 0.8, left + width, y + font_size * 0.2)
}

// ─── Attribute helpers ───────────────────────────────────────────────────

/// Presentation property lookup: inline `style` wins over the attribute.
fn presentation<'a>(el: &'a SvgElement, name: &str) -> Option<&'a str> {
    el.attr("style")
        .and_then(|style| {
            style.split(';').find_map(|decl| {
                let (key, value) = decl.split_once(':')?;
                (key.trim() == name).then_some(value.trim())
            })
        })
        .or_else(|| el.attr(name))
}

/// Parse a length like `12`, `1.5px` or `2pt`; percentages are unsupported.
fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.ends_with('%') {
        return None;
    }
    let numeric = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    numeric.trim().parse::<f64>().ok()
}

/// Split a number list on whitespace and commas.
fn parse_numbers(raw: &str) -> SmallVec<[f64; 6]> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f64>().ok())
        .collect()
}

/// Parse an SVG `transform` attribute into an affine map.
/// Unknown functions are ignored.
pub fn parse_transform(raw: &str) -> Affine {
    let mut affine = Affine::IDENTITY;
    let mut rest = raw;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')').map(|c| open + c) else {
            break;
        };
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_numbers(&rest[open + 1..close]);
        let arg = |i: usize| args.get(i).copied();
        let step = match (name, args.len()) {
            ("translate", 1) => Affine::translate((args[0], 0.0)),
            ("translate", _) => Affine::translate((arg(0).unwrap_or(0.0), arg(1).unwrap_or(0.0))),
            ("scale", 1) => Affine::scale(args[0]),
            ("scale", n) if n >= 2 => Affine::scale_non_uniform(args[0], args[1]),
            ("rotate", 1) => Affine::rotate(args[0].to_radians()),
            ("rotate", 3) => {
                Affine::rotate_about(args[0].to_radians(), Point::new(args[1], args[2]))
            }
            ("matrix", 6) => Affine::new([args[0], args[1], args[2], args[3], args[4], args[5]]),
            ("skewX", 1) => Affine::skew(args[0].to_radians().tan(), 0.0),
            ("skewY", 1) => Affine::skew(0.0, args[0].to_radians().tan()),
            _ => Affine::IDENTITY,
        };
        affine *= step;
        rest = &rest[close + 1..];
    }
    affine
}

fn element_transform(el: &SvgElement) -> Affine {
    el.attr("transform").map_or(Affine::IDENTITY, parse_transform)
}

/// Map from an `<svg>` element's `viewBox` into its viewport, using the
/// default `xMidYMid meet` fitting.
fn viewport_transform(el: &SvgElement) -> Affine {
    let offset = Vec2::new(
        el.attr("x").and_then(parse_length).unwrap_or(0.0),
        el.attr("y").and_then(parse_length).unwrap_or(0.0),
    );
    let view_box = el.attr("viewBox").map(parse_numbers);
    let Some([min_x, min_y, vb_w, vb_h]) = view_box.as_deref().and_then(|v| <[f64; 4]>::try_from(v).ok())
    else {
        return Affine::translate(offset);
    };
    if vb_w <= 0.0 || vb_h <= 0.0 {
        return Affine::translate(offset);
    }
    let width = el.attr("width").and_then(parse_length).unwrap_or(vb_w);
    let height = el.attr("height").and_then(parse_length).unwrap_or(vb_h);
    let scale = (width / vb_w).min(height / vb_h);
    let align = Vec2::new(
        (width - vb_w * scale) / 2.0,
        (height - vb_h * scale) / 2.0,
    );
    Affine::translate(offset + align) * Affine::scale(scale) * Affine::translate((-min_x, -min_y))
}
