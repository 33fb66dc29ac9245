mod config;
mod error;
mod script;
mod svg;

pub use config::{load_config, parse_config};

pub use script::{Script, ScriptAtom, ScriptBond, ScriptViewport, Step, parse_script, read_script};

pub use svg::write_svg;

pub use error::Error;
