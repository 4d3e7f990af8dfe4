//! Outline emission
//!
//! Turns a frame into the command list that traces it: unit preamble, `G90`,
//! a rapid to the min corner, then four feed moves around the rectangle.

use framekit_core::{Point2D, UnitMode};
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;

/// Ordered outline commands plus the unit mode they were emitted for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub unit_mode: Option<UnitMode>,
    pub commands: Vec<String>,
}

/// Format a coordinate with three decimals, never as `-0.000`
pub fn format_coord(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

fn motion_command(code: &str, point: Point2D) -> String {
    format!(
        "{} X{} Y{}",
        code,
        format_coord(point.x),
        format_coord(point.y)
    )
}

impl Outline {
    /// Build the outline of `bounds`
    pub fn for_bounds(bounds: &BoundingBox, unit_mode: Option<UnitMode>) -> Self {
        let mut commands = Vec::with_capacity(7);
        if let Some(mode) = unit_mode {
            commands.push(mode.command().to_string());
        }
        commands.push("G90".to_string());

        let [first, rest @ ..] = Self::corners(bounds);
        commands.push(motion_command("G0", first));
        commands.extend(rest.iter().map(|&corner| motion_command("G1", corner)));

        Self {
            unit_mode,
            commands,
        }
    }

    /// Corners in traversal order, closing back on the min corner
    pub fn corners(bounds: &BoundingBox) -> [Point2D; 5] {
        let (min, max) = (bounds.min, bounds.max);
        [
            min,
            Point2D::new(max.x, min.y),
            max,
            Point2D::new(min.x, max.y),
            min,
        ]
    }

    /// Commands joined into program text, one per line
    pub fn to_gcode(&self) -> String {
        let mut text = self.commands.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: (f64, f64), max: (f64, f64)) -> BoundingBox {
        BoundingBox::from_corners(min.into(), max.into())
    }

    #[test]
    fn test_outline_without_units() {
        let outline = Outline::for_bounds(&bounds((1.0, 2.0), (11.5, 7.25)), None);
        assert_eq!(
            outline.commands,
            vec![
                "G90",
                "G0 X1.000 Y2.000",
                "G1 X11.500 Y2.000",
                "G1 X11.500 Y7.250",
                "G1 X1.000 Y7.250",
                "G1 X1.000 Y2.000",
            ]
        );
    }

    #[test]
    fn test_outline_with_units_preamble() {
        let outline = Outline::for_bounds(&bounds((0.0, 0.0), (1.0, 1.0)), Some(UnitMode::Inch));
        assert_eq!(outline.commands[0], "G20");
        assert_eq!(outline.commands[1], "G90");
        assert_eq!(outline.commands.len(), 7);
    }

    #[test]
    fn test_negative_zero_is_printed_plainly() {
        let outline = Outline::for_bounds(&bounds((-0.0, -0.0), (0.0, 0.0)), None);
        assert_eq!(outline.commands[1], "G0 X0.000 Y0.000");
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(-0.0), "0.000");
        assert_eq!(format_coord(-0.0001), "0.000");
        assert_eq!(format_coord(12.5), "12.500");
    }

    #[test]
    fn test_rounding_to_three_decimals() {
        let outline = Outline::for_bounds(&bounds((0.12345, -1.0004), (2.0, 3.0)), None);
        assert_eq!(outline.commands[1], "G0 X0.123 Y-1.000");
    }

    #[test]
    fn test_to_gcode() {
        let outline = Outline::for_bounds(
            &bounds((0.0, 0.0), (1.0, 2.0)),
            Some(UnitMode::Millimetre),
        );
        let text = outline.to_gcode();
        assert!(text.starts_with("G21\nG90\nG0 X0.000 Y0.000\n"));
        assert!(text.ends_with("G1 X0.000 Y0.000\n"));
        assert_eq!(text.lines().count(), 7);
    }
}
