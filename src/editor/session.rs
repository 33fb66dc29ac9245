//! Editing session wiring the canvas, the document, the view, and the tool palette.

use super::canvas::{Canvas, Gesture};
use super::config::EditorConfig;
use super::document::{Document, GeneratedMolecule, ReplaceReport};
use super::tools::{ToolMode, ToolSettings};
use crate::model::molecule::Molecule;
use crate::model::types::{BondOrder, Element, Point};
use crate::ops::{Error, ViewTransform, Viewport};
use crate::render::{Scene, Starfield};
use log::debug;

#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    document: Document,
    canvas: Canvas,
    tools: ToolSettings,
    view: ViewTransform,
    stars: Starfield,
}

impl Editor {
    /// Starts a session over an empty molecule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `config` fails validation.
    pub fn new(config: EditorConfig, viewport: Viewport) -> Result<Self, Error> {
        config.validate()?;
        let zoom = config.zoom_range()?;

        Ok(Self {
            document: Document::new(&config),
            canvas: Canvas::new(&config),
            tools: ToolSettings::default(),
            view: ViewTransform::new(viewport, zoom),
            stars: Starfield::generate(config.star_count, config.star_seed),
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn molecule(&self) -> &Molecule {
        self.document.molecule()
    }

    pub fn warnings(&self) -> &[String] {
        self.document.warnings()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn pointer_down(&mut self, screen: Point) -> Gesture {
        let gesture = self
            .canvas
            .pointer_down(&mut self.document, &self.tools, &self.view, screen);
        debug!("pointer down at {:?}: {:?}", screen, gesture);
        gesture
    }

    pub fn pointer_move(&mut self, screen: Point) {
        self.canvas.pointer_move(&self.view, screen);
    }

    pub fn pointer_up(&mut self, screen: Point) -> Gesture {
        let gesture = self
            .canvas
            .pointer_up(&mut self.document, &self.tools, &self.view, screen);
        debug!("pointer up at {:?}: {:?}", screen, gesture);
        gesture
    }

    /// Switches tools; a drag in progress is abandoned.
    pub fn set_tool(&mut self, mode: ToolMode) {
        self.canvas.cancel();
        self.tools.mode = mode;
    }

    pub fn set_element(&mut self, element: Element) {
        self.tools.element = element;
    }

    pub fn set_bond_order(&mut self, order: BondOrder) {
        self.tools.bond_order = order;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.view.set_scale(scale);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.view.zoom_by(factor);
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.view.set_rotation(degrees);
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.view.rotate_by(degrees);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.view.set_viewport(viewport);
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.cancel();
        self.document.undo()
    }

    pub fn clear(&mut self) {
        self.canvas.cancel();
        self.document.clear();
    }

    /// Installs a generated structure and recenters the view on it.
    pub fn replace_with(&mut self, generated: GeneratedMolecule) -> ReplaceReport {
        self.canvas.cancel();
        let report = self.document.replace_with(generated);
        self.view.reset();
        report
    }

    pub fn set_molecule_name(&mut self, name: impl Into<String>) {
        self.document.set_molecule_name(name);
    }

    pub fn molecule_name(&self) -> Option<&str> {
        self.document.molecule_name()
    }

    /// Everything the next frame is painted from.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            molecule: self.document.molecule(),
            view: &self.view,
            stars: &self.stars,
            preview: self.canvas.preview(self.document.molecule()),
            atom_radius: self.config.atom_radius,
            grid_step: self.config.grid_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::canvas::Interaction;
    use crate::model::molecule::PlacedAtom;
    use crate::render::{DisplayList, draw_frame};

    fn editor() -> Editor {
        let config = EditorConfig {
            star_seed: Some(3),
            ..Default::default()
        };
        Editor::new(config, Viewport::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EditorConfig {
            history_depth: 0,
            ..Default::default()
        };

        assert!(Editor::new(config, Viewport::default()).is_err());
    }

    #[test]
    fn drawing_a_chain_by_dragging_produces_snapped_bonds() {
        let mut editor = editor();

        editor.pointer_down(Point::new(400.0, 300.0));
        editor.pointer_down(Point::new(400.0, 300.0));
        editor.pointer_move(Point::new(430.0, 282.0));
        let gesture = editor.pointer_up(Point::new(430.0, 282.0));

        assert!(matches!(gesture, Gesture::BranchGrown { .. }));
        assert_eq!(editor.molecule().atom_count(), 2);
        assert_eq!(editor.molecule().bond_count(), 1);
        assert_eq!(editor.document().history_len(), 3);

        let grown = editor.molecule().atoms().last().unwrap().pos;
        let direction = (grown - Point::new(400.0, 300.0)).normalize();
        let expected = (330.0_f64).to_radians();
        assert!((direction.x - expected.cos()).abs() < 1e-9);
        assert!((direction.y - expected.sin()).abs() < 1e-9);
    }

    #[test]
    fn switching_tools_cancels_drag() {
        let mut editor = editor();
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_down(Point::new(100.0, 100.0));
        assert!(editor.canvas().is_dragging());

        editor.set_tool(ToolMode::Eraser);

        assert_eq!(editor.canvas().state(), Interaction::Idle);
        assert!(editor.scene().preview.is_none());
    }

    #[test]
    fn erasing_and_undoing_restore_structure() {
        let mut editor = editor();
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up(Point::new(150.0, 100.0));
        assert_eq!(editor.molecule().bond_count(), 1);

        editor.set_tool(ToolMode::Eraser);
        editor.pointer_down(Point::new(100.0, 100.0));
        assert_eq!(editor.molecule().atom_count(), 1);
        assert_eq!(editor.molecule().bond_count(), 0);

        assert!(editor.undo());
        assert_eq!(editor.molecule().atom_count(), 2);
        assert_eq!(editor.molecule().bond_count(), 1);
    }

    #[test]
    fn view_changes_do_not_touch_stored_coordinates() {
        let mut editor = editor();
        editor.pointer_down(Point::new(500.0, 300.0));
        let before = editor.molecule().atoms().next().unwrap().pos;

        editor.set_scale(10.0);
        editor.rotate_by(45.0);

        assert_eq!(editor.view().scale(), 3.0);
        assert_eq!(editor.molecule().atoms().next().unwrap().pos, before);
    }

    #[test]
    fn replace_with_resets_the_view() {
        let mut editor = editor();
        editor.set_scale(2.0);
        editor.set_rotation(30.0);

        editor.replace_with(GeneratedMolecule {
            name: Some("Methane".to_string()),
            atoms: vec![PlacedAtom {
                element: Element::C,
                pos: Point::new(0.0, 0.0),
            }],
            bonds: Vec::new(),
        });

        assert_eq!(editor.view().scale(), 1.0);
        assert_eq!(editor.view().rotation_deg(), 0.0);
        assert_eq!(editor.molecule_name(), Some("Methane"));
        assert_eq!(editor.molecule().atoms().next().unwrap().pos, Point::new(400.0, 300.0));
    }

    #[test]
    fn scene_carries_drag_preview() {
        let mut editor = editor();
        editor.pointer_down(Point::new(400.0, 300.0));
        editor.pointer_down(Point::new(400.0, 300.0));
        editor.pointer_move(Point::new(460.0, 300.0));

        let mut list = DisplayList::new();
        draw_frame(&mut list, &editor.scene());

        let preview = list
            .lines()
            .filter(|(_, _, stroke)| stroke.dash.is_some())
            .count();
        assert_eq!(preview, 1);
    }
}
