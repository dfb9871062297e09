use crate::interaction::Rect;
use std::fmt;

/// A DOM-like tree the timeline renders into and reads geometry back from.
pub trait Surface {
    type Node: Copy + Eq + fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn create_element(&mut self, class: &str) -> Self::Node;
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);
    fn add_class(&mut self, node: Self::Node, class: &str);
    fn remove_class(&mut self, node: Self::Node, class: &str);
    fn set_style(&mut self, node: Self::Node, property: &str, value: &str);
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);
    fn set_text(&mut self, node: Self::Node, text: &str);
    fn bounding_rect(&self, node: Self::Node) -> Rect;
    fn viewport_width(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Element {
    id: Option<String>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// In-memory surface that serializes to an HTML fragment.
///
/// There is no layout engine behind it. Geometry is derived from the inline
/// styles the timeline writes: `left: N%` against the viewport width and
/// `top: calc(50% + Mpx)` against half the viewport height, with every
/// positioned node treated as a `marker_size` square.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    elements: Vec<Element>,
    viewport_width: f64,
    viewport_height: f64,
    marker_size: f64,
}

impl HtmlDocument {
    pub fn new(viewport_width: f64, viewport_height: f64, marker_size: f64) -> Self {
        Self {
            elements: vec![Element::default()],
            viewport_width,
            viewport_height,
            marker_size,
        }
    }

    /// The page fragment the timeline expects to find.
    pub fn timeline_scaffold(viewport_width: f64, viewport_height: f64, marker_size: f64) -> Self {
        let mut doc = Self::new(viewport_width, viewport_height, marker_size);
        let root = doc.root();
        let timeline = doc.create_with_id("horizontal-timeline", "horizontal-timeline");
        doc.append_child(root, timeline);
        for (id, class) in [
            ("timeline-events", "timeline-events"),
            ("timeline-years", "timeline-years"),
        ] {
            let node = doc.create_with_id(id, class);
            doc.append_child(timeline, node);
        }
        let popup = doc.create_with_id("timeline-popup", "timeline-popup");
        doc.append_child(root, popup);
        for (id, class) in [
            ("popup-date", "popup-date"),
            ("popup-title", "popup-title"),
            ("popup-description", "popup-description"),
        ] {
            let node = doc.create_with_id(id, class);
            doc.append_child(popup, node);
        }
        doc
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn create_with_id(&mut self, id: &str, class: &str) -> NodeId {
        let node = self.create_element(class);
        self.elements[node.0].id = Some(id.to_string());
        node
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.elements[node.0].children
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements[node.0].classes.iter().any(|c| c == class)
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        lookup(&self.elements[node.0].styles, property)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        lookup(&self.elements[node.0].attributes, name)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.elements[node.0].text.as_deref()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.root()) {
            self.write_element(*child, 0, &mut out);
        }
        out
    }

    fn write_element(&self, node: NodeId, depth: usize, out: &mut String) {
        let element = &self.elements[node.0];
        out.push_str(&"  ".repeat(depth));
        out.push_str("<div");
        if let Some(id) = &element.id {
            out.push_str(&format!(" id=\"{}\"", escape_html(id)));
        }
        if !element.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&element.classes.join(" "))));
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", escape_html(&style)));
        }
        for (name, value) in &element.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape_html(text));
        }
        if !element.children.is_empty() {
            out.push('\n');
            for child in &element.children {
                self.write_element(*child, depth + 1, out);
            }
            out.push_str(&"  ".repeat(depth));
        }
        out.push_str("</div>\n");
    }

    fn horizontal_center(&self, node: NodeId) -> Option<f64> {
        let left = self.style(node, "left")?;
        let percent: f64 = left.strip_suffix('%')?.trim().parse().ok()?;
        Some(percent / 100.0 * self.viewport_width)
    }

    fn vertical_center(&self, node: NodeId) -> f64 {
        let middle = self.viewport_height / 2.0;
        self.style(node, "top")
            .and_then(|top| top.strip_prefix("calc(50% + "))
            .and_then(|rest| rest.strip_suffix("px)"))
            .and_then(|offset| offset.trim().parse::<f64>().ok())
            .map_or(middle, |offset| middle + offset)
    }
}

impl Surface for HtmlDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn create_element(&mut self, class: &str) -> NodeId {
        self.elements.push(Element {
            classes: vec![class.to_string()],
            ..Element::default()
        });
        NodeId(self.elements.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.elements[parent.0].children.push(child);
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.elements[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.elements[node.0].classes.retain(|c| c != class);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        upsert(&mut self.elements[node.0].styles, property, value);
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        upsert(&mut self.elements[node.0].attributes, name, value);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.elements[node.0].text = Some(text.to_string());
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let Some(center_x) = self.horizontal_center(node) else {
            return Rect::default();
        };
        let half = self.marker_size / 2.0;
        Rect {
            left: center_x - half,
            top: self.vertical_center(node) - half,
            width: self.marker_size,
            height: self.marker_size,
        }
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter_mut().find(|(name, _)| name == key) {
        Some(pair) => pair.1 = value.to_string(),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
