use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use ini::{Ini, Properties};
use tracing::{info, warn};
use wsdl_lib::config::{VideoConfig, WindowConfig};
use crate::error::{AppError, AppResult};

pub const DEFAULT_PATH: &str = "assets/config/wsdl.ini";

#[derive(Clone, PartialEq, Debug)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub video: VideoConfig,
    pub fps: u32,
    /// Close the window after this long, from a watchdog thread
    pub auto_close: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            window: WindowConfig::new("Window Test", 800, 600),
            video: VideoConfig::default(),
            fps: 60,
            auto_close: None,
        }
    }
}

impl AppConfig {
    /// Read the config file, falling back to the defaults if there is none
    pub fn load(path: &Path) -> AppResult<AppConfig> {
        if !path.exists() {
            warn!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let ini = Ini::load_from_file(path)?;
        info!("Loaded config from {}", path.display());

        AppConfig::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> AppResult<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(window) = ini.section(Some("Window")) {
            if let Some(title) = window.get("Title") {
                config.window.title = title.to_string();
            }
            if let Some(width) = value(window, "Window", "Width")? {
                config.window.width = width;
            }
            if let Some(height) = value(window, "Window", "Height")? {
                config.window.height = height;
            }
            if let Some(resizable) = value(window, "Window", "Resizable")? {
                config.window.resizable = resizable;
            }
        }

        if let Some(video) = ini.section(Some("Video")) {
            config.video.driver = video
                .get("Driver")
                .filter(|driver| !driver.is_empty())
                .map(str::to_string);
        }

        if let Some(main_loop) = ini.section(Some("Loop")) {
            if let Some(fps) = value::<u32>(main_loop, "Loop", "Fps")? {
                if fps == 0 {
                    return Err(invalid("Loop", "Fps", "0"));
                }
                config.fps = fps;
            }
            if let Some(secs) = value::<u64>(main_loop, "Loop", "AutoCloseSecs")? {
                config.auto_close = (secs > 0).then(|| Duration::from_secs(secs));
            }
        }

        Ok(config)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

fn value<T: FromStr>(properties: &Properties, section: &str, key: &str) -> AppResult<Option<T>> {
    match properties.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(section, key, raw)),
        None => Ok(None),
    }
}

fn invalid(section: &str, key: &str, value: &str) -> AppError {
    AppError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}
