//! Toolpath planning: pixel strokes → plotter instructions.
//!
//! Pixel coordinates are scaled so the image height maps to
//! `ToolpathConfig::height`, centred horizontally on x = 0, and flipped so
//! y grows upward from `ToolpathConfig::y_start`. Each stroke is wrapped
//! in dwell + pen-down / dwell + pen-up markers.

use kurbo::Point as PlotPoint;
use serde::{Deserialize, Serialize};

use crate::config::ToolpathConfig;
use crate::error::PlotError;
use crate::strokes::{Point, Stroke};

/// Position of the virtual "previous waypoint" before anything is emitted.
/// Far enough away that the first waypoint always passes the spacing test.
const FAR_AWAY: PlotPoint = PlotPoint::new(1_000_000.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenMode {
    Up,
    Down,
}

/// One plotter command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Instruction {
    Speed { units_per_sec: f64 },
    Waypoint { x: f64, y: f64 },
    Delay { millis: u64 },
    Pen { mode: PenMode },
}

/// Affine map from the pixel grid to plotter units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub scale: f64,
    pub x_offset: f64,
    pub y_start: f64,
    pub image_height: u32,
}

impl Frame {
    pub fn new(image_width: u32, image_height: u32, config: &ToolpathConfig) -> Self {
        let scale = if image_height == 0 {
            0.0
        } else {
            config.height / image_height as f64
        };
        Frame {
            scale,
            x_offset: -scale * image_width as f64 / 2.0,
            y_start: config.y_start,
            image_height,
        }
    }

    pub fn map(&self, p: Point) -> PlotPoint {
        PlotPoint::new(
            p.x as f64 * self.scale + self.x_offset,
            (self.image_height as f64 - p.y as f64) * self.scale + self.y_start,
        )
    }
}

/// Build the instruction stream for a stroke set.
///
/// Interior points closer than `point_distance` to the last emitted
/// waypoint are dropped. Stroke endpoints are always kept.
pub fn plan(strokes: &[Stroke], frame: &Frame, config: &ToolpathConfig) -> Vec<Instruction> {
    let mut code = vec![Instruction::Speed {
        units_per_sec: config.speed,
    }];
    let mut last = FAR_AWAY;

    for stroke in strokes {
        let n = stroke.len();
        for (i, &p) in stroke.points().iter().enumerate() {
            let here = frame.map(p);
            if i == 0 || i == n - 1 || last.distance(here) >= config.point_distance {
                code.push(Instruction::Waypoint {
                    x: here.x,
                    y: here.y,
                });
                last = here;
            }
            if i == 0 {
                code.push(Instruction::Delay {
                    millis: config.start_delay_ms,
                });
                code.push(Instruction::Pen {
                    mode: PenMode::Down,
                });
            }
        }
        code.push(Instruction::Delay {
            millis: config.end_delay_ms,
        });
        code.push(Instruction::Pen { mode: PenMode::Up });
    }

    code
}

/// Count of emitted waypoints.
pub fn waypoint_count(code: &[Instruction]) -> usize {
    code.iter()
        .filter(|ins| matches!(ins, Instruction::Waypoint { .. }))
        .count()
}

/// Serialize an instruction stream as pretty JSON.
pub fn to_json(code: &[Instruction]) -> Result<String, PlotError> {
    Ok(serde_json::to_string_pretty(code)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strokes::build_strokes;

    fn config() -> ToolpathConfig {
        ToolpathConfig {
            y_start: 8.0,
            height: 8.0,
            speed: 5.0,
            point_distance: 0.25,
            start_delay_ms: 100,
            end_delay_ms: 200,
        }
    }

    #[test]
    fn frame_centres_and_flips() {
        let frame = Frame::new(10, 4, &config());
        assert_eq!(frame.scale, 2.0);
        assert_eq!(frame.map(Point::new(0, 0)), PlotPoint::new(-10.0, 16.0));
        assert_eq!(frame.map(Point::new(5, 4)), PlotPoint::new(0.0, 8.0));
    }

    #[test]
    fn empty_stroke_set_only_sets_speed() {
        let frame = Frame::new(0, 0, &config());
        assert_eq!(
            plan(&[], &frame, &config()),
            vec![Instruction::Speed { units_per_sec: 5.0 }]
        );
    }

    #[test]
    fn strokes_are_wrapped_in_pen_markers() {
        let strokes = build_strokes(&[Point::new(0, 0), Point::new(1, 0), Point::new(9, 0)]);
        let frame = Frame::new(10, 8, &config());
        let code = plan(&strokes, &frame, &config());
        let expected = vec![
            Instruction::Speed { units_per_sec: 5.0 },
            Instruction::Waypoint { x: -5.0, y: 16.0 },
            Instruction::Delay { millis: 100 },
            Instruction::Pen { mode: PenMode::Down },
            Instruction::Waypoint { x: -4.0, y: 16.0 },
            Instruction::Delay { millis: 200 },
            Instruction::Pen { mode: PenMode::Up },
            Instruction::Waypoint { x: 4.0, y: 16.0 },
            Instruction::Delay { millis: 100 },
            Instruction::Pen { mode: PenMode::Down },
            Instruction::Delay { millis: 200 },
            Instruction::Pen { mode: PenMode::Up },
        ];
        assert_eq!(code, expected);
    }

    #[test]
    fn dense_interior_points_are_decimated() {
        // 0.1 units per pixel, spacing 0.25: keep every third pixel plus the end.
        let points: Vec<Point> = (0..8).map(|x| Point::new(x, 0)).collect();
        let strokes = build_strokes(&points);
        let cfg = ToolpathConfig {
            height: 1.0,
            ..config()
        };
        let frame = Frame::new(10, 10, &cfg);
        let code = plan(&strokes, &frame, &cfg);
        let xs: Vec<f64> = code
            .iter()
            .filter_map(|ins| match ins {
                Instruction::Waypoint { x, .. } => Some(((x + 0.5) * 10.0).round()),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 3.0, 6.0, 7.0]);
        assert_eq!(waypoint_count(&code), 4);
    }

    #[test]
    fn json_is_tagged_by_op() {
        let json = to_json(&[Instruction::Pen { mode: PenMode::Down }]).unwrap();
        assert!(json.contains("\"op\": \"pen\""));
        assert!(json.contains("\"mode\": \"down\""));
        let back: Vec<Instruction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Instruction::Pen { mode: PenMode::Down }]);
    }
}
