//! Replay scripts: TOML documents describing a sequence of editor inputs.
//!
//! A script fixes the viewport, optionally overrides the editor configuration, and lists
//! `[[step]]` tables tagged by `action`. Replaying feeds each step through [`Editor`] exactly
//! as the corresponding pointer or palette event would, so scripts double as reproducible
//! interaction traces.
//!
//! ```toml
//! [viewport]
//! width = 800
//! height = 600
//!
//! [[step]]
//! action = "click"
//! at = [400, 300]
//!
//! [[step]]
//! action = "drag"
//! from = [400, 300]
//! to = [440, 280]
//! ```

use crate::editor::{Editor, EditorConfig, Gesture, GeneratedMolecule, ToolMode};
use crate::io::error::Error;
use crate::model::molecule::{IndexedBond, PlacedAtom};
use crate::model::types::{BondOrder, Element, Point};
use crate::ops::Viewport;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub viewport: ScriptViewport,
    pub config: Option<EditorConfig>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptViewport {
    pub width: f64,
    pub height: f64,
}

impl Default for ScriptViewport {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

impl From<ScriptViewport> for Viewport {
    fn from(value: ScriptViewport) -> Self {
        Viewport::new(value.width, value.height)
    }
}

/// One scripted input; positions are viewport pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Tool { mode: ToolMode },
    Element { symbol: Element },
    Order { order: BondOrder },
    Down { at: [f64; 2] },
    Move { at: [f64; 2] },
    Up { at: [f64; 2] },
    /// Press and release at the same point.
    Click { at: [f64; 2] },
    /// Press, move, and release.
    Drag { from: [f64; 2], to: [f64; 2] },
    Undo,
    Clear,
    Zoom { scale: f64 },
    Rotate { degrees: f64 },
    Name { name: String },
    /// Installs a generated structure, as an external generator would.
    Replace {
        name: Option<String>,
        #[serde(default)]
        atoms: Vec<ScriptAtom>,
        #[serde(default)]
        bonds: Vec<ScriptBond>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptAtom {
    pub element: Element,
    pub pos: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptBond {
    pub a1: usize,
    pub a2: usize,
    #[serde(default = "single_bond")]
    pub order: BondOrder,
}

fn single_bond() -> BondOrder {
    BondOrder::Single
}

fn point(at: &[f64; 2]) -> Point {
    Point::new(at[0], at[1])
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Tool { .. } => "tool",
            Step::Element { .. } => "element",
            Step::Order { .. } => "order",
            Step::Down { .. } => "down",
            Step::Move { .. } => "move",
            Step::Up { .. } => "up",
            Step::Click { .. } => "click",
            Step::Drag { .. } => "drag",
            Step::Undo => "undo",
            Step::Clear => "clear",
            Step::Zoom { .. } => "zoom",
            Step::Rotate { .. } => "rotate",
            Step::Name { .. } => "name",
            Step::Replace { .. } => "replace",
        }
    }

    /// Feeds this step to the editor; returns the gestures it triggered.
    pub fn apply(&self, editor: &mut Editor) -> Vec<Gesture> {
        match self {
            Step::Tool { mode } => editor.set_tool(*mode),
            Step::Element { symbol } => editor.set_element(*symbol),
            Step::Order { order } => editor.set_bond_order(*order),
            Step::Down { at } => return vec![editor.pointer_down(point(at))],
            Step::Move { at } => editor.pointer_move(point(at)),
            Step::Up { at } => return vec![editor.pointer_up(point(at))],
            Step::Click { at } => {
                let down = editor.pointer_down(point(at));
                let up = editor.pointer_up(point(at));
                return vec![down, up];
            }
            Step::Drag { from, to } => {
                let down = editor.pointer_down(point(from));
                editor.pointer_move(point(to));
                let up = editor.pointer_up(point(to));
                return vec![down, up];
            }
            Step::Undo => {
                editor.undo();
            }
            Step::Clear => editor.clear(),
            Step::Zoom { scale } => editor.set_scale(*scale),
            Step::Rotate { degrees } => editor.set_rotation(*degrees),
            Step::Name { name } => editor.set_molecule_name(name.clone()),
            Step::Replace { name, atoms, bonds } => {
                editor.replace_with(GeneratedMolecule {
                    name: name.clone(),
                    atoms: atoms
                        .iter()
                        .map(|atom| PlacedAtom {
                            element: atom.element,
                            pos: point(&atom.pos),
                        })
                        .collect(),
                    bonds: bonds
                        .iter()
                        .map(|bond| IndexedBond {
                            a1: bond.a1,
                            a2: bond.a2,
                            order: bond.order,
                        })
                        .collect(),
                });
            }
        }
        Vec::new()
    }
}

impl Script {
    /// Builds a fresh editor from the script's viewport and configuration.
    pub fn editor(&self) -> Result<Editor, Error> {
        let config = self.config.clone().unwrap_or_default();
        Editor::new(config, self.viewport.into()).map_err(|e| Error::invalid_config(e, None))
    }

    /// Replays every step on a fresh editor.
    pub fn replay(&self) -> Result<Editor, Error> {
        let mut editor = self.editor()?;
        for (index, step) in self.steps.iter().enumerate() {
            let gestures = step.apply(&mut editor);
            debug!("step {} ({}): {:?}", index + 1, step.action(), gestures);
        }
        info!(
            "replayed {} step(s) into {}",
            self.steps.len(),
            editor.molecule()
        );
        Ok(editor)
    }
}

pub fn read_script(path: &Path) -> Result<Script, Error> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    parse_script(&content, Some(path.to_path_buf()))
}

pub fn parse_script(content: &str, path: Option<PathBuf>) -> Result<Script, Error> {
    let script: Script =
        toml::from_str(content).map_err(|e| Error::parse("TOML", path.clone(), e.message()))?;
    if let Some(config) = &script.config {
        config
            .validate()
            .map_err(|e| Error::invalid_config(e, path))?;
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHANOL_SKETCH: &str = r#"
[viewport]
width = 800
height = 600

[config]
star_seed = 11

[[step]]
action = "click"
at = [400, 300]

[[step]]
action = "drag"
from = [400, 300]
to = [440, 300]

[[step]]
action = "element"
symbol = "O"

[[step]]
action = "drag"
from = [440, 300]
to = [470, 282]
"#;

    #[test]
    fn parses_viewport_config_and_steps() {
        let script = parse_script(ETHANOL_SKETCH, None).unwrap();

        assert_eq!(
            script.viewport,
            ScriptViewport {
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(script.config.as_ref().unwrap().star_seed, Some(11));
        assert_eq!(script.steps.len(), 4);
        assert_eq!(
            script.steps[2],
            Step::Element {
                symbol: Element::O
            }
        );
    }

    #[test]
    fn replay_builds_the_sketched_structure() {
        let editor = parse_script(ETHANOL_SKETCH, None).unwrap().replay().unwrap();
        let molecule = editor.molecule();

        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count(), 2);
        let elements: Vec<Element> = molecule.atoms().map(|atom| atom.element).collect();
        assert_eq!(elements, vec![Element::C, Element::C, Element::O]);
        assert!(editor.warnings().is_empty());
    }

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let script = parse_script("[[step]]\naction = \"undo\"\n", None).unwrap();

        assert_eq!(script.viewport, ScriptViewport::default());
        assert!(script.config.is_none());
        assert_eq!(script.steps, vec![Step::Undo]);
    }

    #[test]
    fn tool_order_and_view_steps_update_editor_state() {
        let script = parse_script(
            r#"
[[step]]
action = "tool"
mode = "eraser"

[[step]]
action = "order"
order = 3

[[step]]
action = "zoom"
scale = 5.0

[[step]]
action = "rotate"
degrees = 45
"#,
            None,
        )
        .unwrap();

        let editor = script.replay().unwrap();

        assert_eq!(editor.tools().mode, ToolMode::Eraser);
        assert_eq!(editor.tools().bond_order, BondOrder::Triple);
        assert_eq!(editor.view().scale(), 3.0);
        assert_eq!(editor.view().rotation_deg(), 45.0);
    }

    #[test]
    fn replace_step_installs_named_structure() {
        let script = parse_script(
            r#"
[[step]]
action = "replace"
name = "Carbon dioxide"
atoms = [
    { element = "O", pos = [-1.2, 0] },
    { element = "C", pos = [0, 0] },
    { element = "O", pos = [1.2, 0] },
]
bonds = [
    { a1 = 0, a2 = 1, order = 2 },
    { a1 = 1, a2 = 2, order = 2 },
]
"#,
            None,
        )
        .unwrap();

        let editor = script.replay().unwrap();

        assert_eq!(editor.molecule_name(), Some("Carbon dioxide"));
        assert_eq!(editor.molecule().bond_count(), 2);
        assert!(editor.warnings().is_empty());
    }

    #[test]
    fn unknown_action_is_a_parse_error() {
        let err = parse_script("[[step]]\naction = \"lasso\"\n", None).unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn invalid_bond_order_is_a_parse_error() {
        let err = parse_script("[[step]]\naction = \"order\"\norder = 4\n", None).unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn invalid_embedded_config_is_rejected() {
        let err = parse_script("[config]\nhistory_depth = 0\n", None).unwrap_err();

        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
