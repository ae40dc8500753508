//! Document, page and layer model.

use crate::motion::EraserMotionRecording;
use crate::shapes::{Element, ElementId, SerializableColor, Stroke};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A document shared between the erasure engine and its owner.
/// Every mutation takes the lock for the narrowest possible scope.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Default page size (A4 in points).
pub const DEFAULT_PAGE_WIDTH: f64 = 595.275591;
pub const DEFAULT_PAGE_HEIGHT: f64 = 841.889764;

/// Page background pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundKind {
    #[default]
    Plain,
    Ruled,
    Lined,
    Staves,
    Graph,
    Dotted,
    IsoDotted,
    IsoGraph,
    Pdf,
    Image,
}

impl BackgroundKind {
    /// Name used in exported motion metadata.
    pub fn name(self) -> &'static str {
        match self {
            BackgroundKind::Plain => "plain",
            BackgroundKind::Ruled => "ruled",
            BackgroundKind::Lined => "lined",
            BackgroundKind::Staves => "staves",
            BackgroundKind::Graph => "graph",
            BackgroundKind::Dotted => "dotted",
            BackgroundKind::IsoDotted => "isodotted",
            BackgroundKind::IsoGraph => "isograph",
            BackgroundKind::Pdf => "pdf",
            BackgroundKind::Image => "image",
        }
    }
}

/// Background pattern plus its free-form configuration string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageBackground {
    pub kind: BackgroundKind,
    #[serde(default)]
    pub config: String,
}

/// An ordered list of elements (back to front).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    elements: Vec<Element>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of an element, if it is still on this layer.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn stroke(&self, id: ElementId) -> Option<&Stroke> {
        self.get(id).and_then(Element::as_stroke)
    }

    pub fn stroke_mut(&mut self, id: ElementId) -> Option<&mut Stroke> {
        self.elements
            .iter_mut()
            .find(|e| e.id() == id)
            .and_then(Element::as_stroke_mut)
    }

    /// Strokes in z-order.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.elements.iter().filter_map(Element::as_stroke)
    }

    /// Append an element on top.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Insert an element at `index` (clamped to the end).
    pub fn insert_element(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    /// Remove an element, returning it with the index it occupied.
    pub fn remove_element(&mut self, id: ElementId) -> Option<(Element, usize)> {
        let index = self.index_of(id)?;
        Some((self.elements.remove(index), index))
    }
}

/// A page with its background and layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub background: PageBackground,
    pub background_color: SerializableColor,
    layers: Vec<Layer>,
    #[serde(default)]
    selected_layer: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT)
    }
}

impl Page {
    /// Create a plain white page with a single layer.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: PageBackground::default(),
            background_color: SerializableColor::white(),
            layers: vec![Layer::new()],
            selected_layer: 0,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Append a layer and return its index.
    pub fn add_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Remove every layer (the page then has no selected layer).
    pub fn clear_layers(&mut self) {
        self.layers.clear();
        self.selected_layer = 0;
    }

    pub fn selected_layer_index(&self) -> Option<usize> {
        (self.selected_layer < self.layers.len()).then_some(self.selected_layer)
    }

    pub fn select_layer(&mut self, index: usize) -> bool {
        if index < self.layers.len() {
            self.selected_layer = index;
            true
        } else {
            false
        }
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.layers.get(self.selected_layer)
    }

    pub fn selected_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.selected_layer)
    }

    /// Strokes on every layer, bottom layer first.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.layers.iter().flat_map(Layer::strokes)
    }
}

/// An ink document: pages plus the session's eraser motion log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    pages: Vec<Page>,
    #[serde(default)]
    eraser_motion: EraserMotionRecording,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document without pages.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            pages: Vec::new(),
            eraser_motion: EraserMotionRecording::new(),
        }
    }

    /// Wrap the document for shared, lock-guarded access.
    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn eraser_motion(&self) -> &EraserMotionRecording {
        &self.eraser_motion
    }

    pub fn eraser_motion_mut(&mut self) -> &mut EraserMotionRecording {
        &mut self.eraser_motion
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionRecording;
    use crate::shapes::{InkPoint, Text};
    use kurbo::Point;

    fn stroke_at(y: f64) -> Stroke {
        Stroke::from_points(vec![InkPoint::new(0.0, y, 0.5), InkPoint::new(10.0, y, 0.5)])
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
        assert!(!doc.eraser_motion().has_motion_data());
    }

    #[test]
    fn test_layer_remove_reports_index() {
        let mut layer = Layer::new();
        let a = stroke_at(0.0);
        let b = stroke_at(5.0);
        let b_id = b.id();
        layer.add_element(a.into());
        layer.add_element(b.into());

        let (removed, index) = layer.remove_element(b_id).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id(), b_id);
        assert!(layer.remove_element(b_id).is_none());
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut layer = Layer::new();
        let s = stroke_at(0.0);
        let id = s.id();
        layer.insert_element(42, s.into());
        assert_eq!(layer.index_of(id), Some(0));
    }

    #[test]
    fn test_selected_layer() {
        let mut page = Page::default();
        assert_eq!(page.selected_layer_index(), Some(0));
        let second = page.add_layer(Layer::new());
        assert!(page.select_layer(second));
        assert!(!page.select_layer(7));
        assert_eq!(page.selected_layer_index(), Some(1));

        page.clear_layers();
        assert!(page.selected_layer().is_none());
    }

    #[test]
    fn test_json_roundtrip_keeps_motion() {
        let mut doc = Document::new();
        let mut page = Page::default();
        page.background.kind = BackgroundKind::Graph;

        let mut stroke = stroke_at(3.0);
        let mut motion = MotionRecording::new();
        motion.add_motion_point(InkPoint::new(0.0, 3.0, 0.4), 100, false);
        motion.add_motion_point(InkPoint::new(10.0, 3.0, 0.6), 180, false);
        stroke.set_motion_recording(motion.clone());
        let fragment = stroke.geometry_clone();

        let layer = page.selected_layer_mut().unwrap();
        layer.add_element(stroke.into());
        layer.add_element(fragment.into());
        layer.add_element(Element::Text(Text::new(Point::new(1.0, 1.0), "note".into())));
        doc.add_page(page);
        doc.eraser_motion_mut()
            .add_motion_point(InkPoint::without_pressure(5.0, 3.0), 900, 4.0, 0);

        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();

        let page = loaded.page(0).unwrap();
        assert_eq!(page.background.kind, BackgroundKind::Graph);
        let strokes: Vec<&Stroke> = page.strokes().collect();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].motion_recording(), Some(&motion));
        assert!(!strokes[1].has_motion_recording());
        assert_eq!(loaded.eraser_motion().motion_point_count(), 1);
    }

    #[test]
    fn test_corrupt_embedded_motion_is_an_error() {
        use base64::{Engine, engine::general_purpose::STANDARD};

        let mut stroke = stroke_at(0.0);
        let mut motion = MotionRecording::new();
        motion.add_motion_point(InkPoint::new(0.0, 0.0, 0.5), 10, false);
        let encoded = STANDARD.encode(motion.to_bytes().unwrap());
        stroke.set_motion_recording(motion);

        let mut page = Page::default();
        page.selected_layer_mut().unwrap().add_element(stroke.into());
        let mut doc = Document::new();
        doc.add_page(page);

        let json = doc.to_json().unwrap();
        assert!(json.contains(&encoded));
        // Reads as a legacy body claiming u32::MAX points.
        let corrupt = json.replace(&encoded, "/////w==");
        assert!(Document::from_json(&corrupt).is_err());
    }

    #[test]
    fn test_background_names() {
        assert_eq!(BackgroundKind::IsoDotted.name(), "isodotted");
        assert_eq!(BackgroundKind::Pdf.name(), "pdf");
    }
}
