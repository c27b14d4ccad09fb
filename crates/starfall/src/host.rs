//! The terminal as a host for the starfield.

use starfall_config::StarfieldConfig;
use starfall_core::{Point, Viewport};
use starfall_field::{Host, SurfaceInfo, constants::SPACE_CANVAS};

/// Environment variable requesting reduced motion.
pub const REDUCED_MOTION_ENV: &str = "STARFALL_REDUCED_MOTION";

/// Terminal size and capabilities as seen by the starfield.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalHost {
    cols: u16,
    rows: u16,
    cell_size: f32,
    /// Whether the starfield surface is mounted at all.
    enabled: bool,
    /// 24-bit color support, required to draw.
    truecolor: bool,
    reduced_motion: bool,
}

impl TerminalHost {
    /// Resolve capabilities from config, falling back to the environment.
    pub fn new(config: &StarfieldConfig, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cell_size: config.cell_size(),
            enabled: config.enabled,
            truecolor: config.truecolor.unwrap_or_else(detect_truecolor),
            reduced_motion: config.reduced_motion.unwrap_or_else(|| {
                std::env::var(REDUCED_MOTION_ENV)
                    .map(|v| parse_flag(&v))
                    .unwrap_or(false)
            }),
        }
    }

    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_terminal(self.cols, self.rows, self.cell_size)
    }

    /// Logical surface position of the center of a terminal cell.
    pub fn to_logical(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size * 2.0,
        )
    }
}

impl Host for TerminalHost {
    fn surface(&self, key: &str) -> Option<SurfaceInfo> {
        if key != SPACE_CANVAS || !self.enabled {
            return None;
        }
        Some(SurfaceInfo {
            viewport: self.viewport(),
            has_context: self.truecolor,
        })
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Interpret an on/off environment value.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "reduce"
    )
}

fn detect_truecolor() -> bool {
    std::env::var("COLORTERM")
        .map(|v| is_truecolor(&v))
        .unwrap_or(false)
}

fn is_truecolor(colorterm: &str) -> bool {
    let v = colorterm.to_ascii_lowercase();
    v.contains("truecolor") || v.contains("24bit")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StarfieldConfig {
        StarfieldConfig {
            truecolor: Some(true),
            reduced_motion: Some(false),
            ..StarfieldConfig::default()
        }
    }

    #[test]
    fn test_surface_lookup() {
        let host = TerminalHost::new(&config(), 100, 30);
        let info = host.surface(SPACE_CANVAS).unwrap();
        assert!(info.has_context);
        assert_eq!(info.viewport, Viewport::new(800.0, 480.0, 0.125));
        assert!(host.surface("elsewhere").is_none());
        assert!(!host.prefers_reduced_motion());
    }

    #[test]
    fn test_disabled_or_colorless() {
        let disabled = TerminalHost::new(
            &StarfieldConfig {
                enabled: false,
                ..config()
            },
            10,
            10,
        );
        assert!(disabled.surface(SPACE_CANVAS).is_none());

        let colorless = TerminalHost::new(
            &StarfieldConfig {
                truecolor: Some(false),
                ..config()
            },
            10,
            10,
        );
        assert!(!colorless.surface(SPACE_CANVAS).unwrap().has_context);
    }

    #[test]
    fn test_pointer_mapping() {
        let mut host = TerminalHost::new(&config(), 10, 10);
        assert_eq!(host.to_logical(0, 0), Point::new(4.0, 8.0));
        assert_eq!(host.to_logical(2, 1), Point::new(20.0, 24.0));
        host.set_size(20, 5);
        assert_eq!(host.viewport().width, 160.0);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("reduce"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(is_truecolor("truecolor"));
        assert!(is_truecolor("24bit"));
        assert!(!is_truecolor("256"));
    }
}
