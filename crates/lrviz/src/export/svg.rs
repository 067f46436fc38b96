//! SVG rendering of the visible part of an automaton.
//!
//! Item sets are drawn as rounded boxes anchored at their top-left
//! position, one text line per item. Transitions are straight arrows
//! between box borders, labeled with their symbol at the midpoint;
//! self-loops arc over the top of their box.

use std::{collections::HashMap, path::Path};

use log::{debug, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use lrviz_core::{
    automaton::{ItemSetNode, TransitionEdge},
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
};

use super::{Error, text};
use crate::{config::StyleConfig, engine::DiagramState};

const NODE_PADDING: f32 = 10.0;
const MIN_NODE_WIDTH: f32 = 60.0;
const DOCUMENT_PADDING: f32 = 30.0;
const LOOP_HEIGHT: f32 = 40.0;
const MARKER_ID: &str = "transition-arrow";

/// Renders a [`DiagramState`] with a resolved [`StyleConfig`].
///
/// # Examples
///
/// ```
/// # use lrviz::{config::StyleConfig, engine::DiagramState, export::svg::SvgExporter};
/// let exporter = SvgExporter::new(&StyleConfig::default()).unwrap();
/// let svg = exporter.render_to_string(&DiagramState::new());
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<Color>,
    node_fill: Color,
    node_stroke: Color,
    edge_color: Color,
    text_color: Color,
    font_family: String,
    font_size: u16,
}

impl SvgExporter {
    /// Creates an exporter, resolving every color of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color is invalid.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            background: style.background_color().map_err(Error::Render)?,
            node_fill: style.node_fill().map_err(Error::Render)?,
            node_stroke: style.node_stroke().map_err(Error::Render)?,
            edge_color: style.edge_color().map_err(Error::Render)?,
            text_color: style.text_color().map_err(Error::Render)?,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
        })
    }

    /// Renders the visible nodes and edges into an SVG document.
    pub fn render(&self, diagram: &DiagramState) -> Document {
        let boxes: HashMap<Id, Bounds> = diagram
            .nodes()
            .map(|node| (node.id(), self.node_bounds(node)))
            .collect();

        let view = self.view_bounds(diagram, &boxes);
        debug!(
            nodes = boxes.len(),
            edges = diagram.edges_count(),
            width = view.width(),
            height = view.height();
            "Rendering diagram"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x(),
                    view.min_y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", view.width())
            .set("height", view.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", view.min_x())
                    .set("y", view.min_y())
                    .set("width", view.width())
                    .set("height", view.height())
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        doc = doc.add(self.marker_definitions());

        // Edges first so boxes are drawn over arrow ends.
        let mut edges = svg_element::Group::new().set("class", "transitions");
        for edge in diagram.edges() {
            let (Some(source), Some(target)) = (boxes.get(&edge.source()), boxes.get(&edge.target()))
            else {
                continue;
            };
            edges = edges.add(self.render_edge(edge, *source, *target));
        }

        let mut nodes = svg_element::Group::new().set("class", "item-sets");
        for node in diagram.nodes() {
            if let Some(bounds) = boxes.get(&node.id()) {
                nodes = nodes.add(self.render_node(node, *bounds));
            }
        }

        doc.add(edges).add(nodes)
    }

    /// Renders the diagram to an SVG string.
    pub fn render_to_string(&self, diagram: &DiagramState) -> String {
        self.render(diagram).to_string()
    }

    /// Renders the diagram and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write(&self, diagram: &DiagramState, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        svg::save(path, &self.render(diagram))?;
        info!(path = path.display().to_string(); "SVG written");
        Ok(())
    }

    fn node_bounds(&self, node: &ItemSetNode) -> Bounds {
        let text_size = text::measure(node.label(), &self.font_family, self.font_size);
        let min_size = Size::new(
            MIN_NODE_WIDTH,
            text::line_height(self.font_size) + 2.0 * NODE_PADDING,
        );
        let size = Size::new(
            text_size.width() + 2.0 * NODE_PADDING,
            text_size.height() + 2.0 * NODE_PADDING,
        )
        .max(min_size);
        Bounds::new_from_top_left(node.position(), size)
    }

    fn view_bounds(&self, diagram: &DiagramState, boxes: &HashMap<Id, Bounds>) -> Bounds {
        let mut all = diagram.nodes().filter_map(|node| boxes.get(&node.id()));
        let Some(first) = all.next() else {
            return Bounds::default().add_padding(Insets::uniform(DOCUMENT_PADDING));
        };
        let content = all.fold(*first, |acc, bounds| acc.merge(bounds));

        // Room for self-loops above the topmost boxes.
        let has_loops = diagram
            .edges()
            .iter()
            .any(|edge| edge.source() == edge.target());
        let top = if has_loops { LOOP_HEIGHT } else { 0.0 };

        content
            .add_padding(Insets::new(top, 0.0, 0.0, 0.0))
            .add_padding(Insets::uniform(DOCUMENT_PADDING))
    }

    fn marker_definitions(&self) -> svg_element::Definitions {
        let marker = svg_element::Marker::new()
            .set("id", MARKER_ID)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", self.edge_color.to_string())
                    .set("fill-opacity", self.edge_color.alpha()),
            );
        svg_element::Definitions::new().add(marker)
    }

    fn render_node(&self, node: &ItemSetNode, bounds: Bounds) -> svg_element::Group {
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", 6.0)
            .set("fill", self.node_fill.to_string())
            .set("fill-opacity", self.node_fill.alpha())
            .set("stroke", self.node_stroke.to_string())
            .set("stroke-width", 1.5);

        let line_height = text::line_height(self.font_size);
        let x = bounds.min_x() + NODE_PADDING;
        let mut label = svg_element::Text::new("")
            .set("x", x)
            .set("y", bounds.min_y() + NODE_PADDING - line_height / 2.0)
            .set("dominant-baseline", "central")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.text_color.to_string());
        for line in node.label().lines() {
            label = label.add(
                svg_element::TSpan::new("")
                    .set("x", x)
                    .set("dy", line_height)
                    .add(SvgText::new(line)),
            );
        }

        svg_element::Group::new()
            .set("class", "item-set")
            .set("id", format!("node-{}", node.id()))
            .add(rect)
            .add(label)
    }

    fn render_edge(&self, edge: &TransitionEdge, source: Bounds, target: Bounds) -> svg_element::Group {
        let (path_data, label_at) = if edge.source() == edge.target() {
            self_loop_path(source)
        } else {
            let start = boundary_point(source, target.center());
            let end = boundary_point(target, source.center());
            (
                format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
                start.midpoint(end).add_point(Point::new(0.0, -6.0)),
            )
        };

        let path = svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none")
            .set("stroke", self.edge_color.to_string())
            .set("stroke-opacity", self.edge_color.alpha())
            .set("stroke-width", 1.5)
            .set("marker-end", format!("url(#{MARKER_ID})"));

        let label = svg_element::Text::new("")
            .set("x", label_at.x())
            .set("y", label_at.y())
            .set("text-anchor", "middle")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.edge_color.to_string())
            .add(SvgText::new(edge.label()));

        svg_element::Group::new()
            .set("class", "transition")
            .add(path)
            .add(label)
    }
}

/// Where the segment from the center of `bounds` toward `toward` leaves the box.
fn boundary_point(bounds: Bounds, toward: Point) -> Point {
    let center = bounds.center();
    let delta = toward.sub_point(center);
    let (dx, dy) = (delta.x(), delta.y());
    if dx == 0.0 && dy == 0.0 {
        return center;
    }

    let half_width = bounds.width() / 2.0;
    let half_height = bounds.height() / 2.0;
    let scale_x = if dx == 0.0 { f32::INFINITY } else { half_width / dx.abs() };
    let scale_y = if dy == 0.0 { f32::INFINITY } else { half_height / dy.abs() };
    let scale = scale_x.min(scale_y);

    center.add_point(Point::new(dx * scale, dy * scale))
}

/// Path of a loop over the top edge of a box, and where its label goes.
fn self_loop_path(bounds: Bounds) -> (String, Point) {
    let center = bounds.center();
    let top = bounds.min_y();
    let (left, right) = (center.x() - 12.0, center.x() + 12.0);
    let control_y = top - LOOP_HEIGHT;
    let path = format!(
        "M {left} {top} C {} {control_y} {} {control_y} {right} {top}",
        left - 24.0,
        right + 24.0,
    );
    (path, Point::new(center.x(), top - LOOP_HEIGHT * 0.8))
}
