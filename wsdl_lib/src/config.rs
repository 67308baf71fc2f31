//! Construction parameters for the context and windows

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> WindowConfig {
        WindowConfig {
            title: "wsdl".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

impl WindowConfig {
    pub fn new<T: Into<String>>(title: T, width: u32, height: u32) -> WindowConfig {
        WindowConfig {
            title: title.into(),
            width,
            height,
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct VideoConfig {
    /// Name of the SDL video driver to force, `dummy` runs without a display
    pub driver: Option<String>,
}
