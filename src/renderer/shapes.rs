//! Scene generation for 2D primitives
//!
//! Builds a backend-agnostic list of shapes from a frame snapshot. Drawing
//! order is back to front: sky, stars, skyline, ground, obstacles, runner.

use glam::Vec2;

use super::Frame;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, GROUND_Y};
use crate::settings::Settings;
use crate::sim::{HazardKind, Obstacle, Runner};

const SKY_COLOR: &str = "#0b1020";
const STAR_COLOR: &str = "#cbd5e1";
const SKYLINE_COLOR: &str = "#1e293b";
const WINDOW_COLOR: &str = "#334155";
const GROUND_COLOR: &str = "#475569";
const RUNNER_BODY: &str = "#f8fafc";
const RUNNER_ACCENT: &str = "#0ea5e9";
const DEFAULT_ICON: &str = "#e5e7eb";

const BUILDING_SPACING: f32 = 48.0;
const STAR_COUNT: u32 = 40;

/// One path command, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo(Vec2, Vec2),
    BezierTo(Vec2, Vec2, Vec2),
    Close,
}

/// A draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        min: Vec2,
        size: Vec2,
        color: &'static str,
    },
    RoundRect {
        min: Vec2,
        size: Vec2,
        radius: f32,
        color: &'static str,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    /// Filled polygon or outline
    Path {
        cmds: Vec<PathCmd>,
        color: &'static str,
        /// Stroke width; None fills
        stroke: Option<f32>,
    },
}

/// Icon color for a hazard kind
pub fn icon_color(kind: Option<HazardKind>) -> &'static str {
    match kind {
        Some(HazardKind::Flood) => "#38bdf8",
        Some(HazardKind::Fire) => "#f97316",
        Some(HazardKind::Hail) => "#a78bfa",
        Some(HazardKind::Quake) => "#22c55e",
        Some(HazardKind::Road) => "#facc15",
        None => DEFAULT_ICON,
    }
}

/// Cheap integer hash for deterministic background detail
fn hash(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

fn unit(x: u32) -> f32 {
    (hash(x) & 0xffff) as f32 / 65535.0
}

/// Horizontal scroll for a background layer
fn scroll(frame: &Frame<'_>, settings: &Settings, factor: f32) -> f32 {
    if settings.effective_parallax() {
        frame.background.tick as f32 * frame.background.speed * factor
    } else {
        0.0
    }
}

fn stars(frame: &Frame<'_>, settings: &Settings, out: &mut Vec<Shape>) {
    let offset = scroll(frame, settings, 0.05);
    for i in 0..STAR_COUNT {
        let x = (unit(i) * FIELD_WIDTH - offset).rem_euclid(FIELD_WIDTH);
        let y = unit(i + 1000) * (GROUND_Y - 140.0);
        out.push(Shape::Circle {
            center: Vec2::new(x, y),
            radius: 0.6 + unit(i + 2000),
            color: STAR_COLOR,
        });
    }
}

fn skyline(frame: &Frame<'_>, settings: &Settings, out: &mut Vec<Shape>) {
    let offset = scroll(frame, settings, 0.25);
    let first = (offset / BUILDING_SPACING).floor() as i64;
    let count = (FIELD_WIDTH / BUILDING_SPACING).ceil() as i64 + 1;

    for slot in first..first + count {
        let seed = slot as u32;
        let x = slot as f32 * BUILDING_SPACING - offset;
        let width = BUILDING_SPACING - 6.0;
        let height = 40.0 + unit(seed) * 110.0;
        let top = GROUND_Y - height;
        out.push(Shape::Rect {
            min: Vec2::new(x, top),
            size: Vec2::new(width, height),
            color: SKYLINE_COLOR,
        });

        // A few lit windows per building
        for w in 0..3 {
            if hash(seed.wrapping_mul(7).wrapping_add(w)) % 3 == 0 {
                out.push(Shape::Rect {
                    min: Vec2::new(x + 6.0 + w as f32 * 12.0, top + 10.0),
                    size: Vec2::new(6.0, 8.0),
                    color: WINDOW_COLOR,
                });
            }
        }
    }
}

fn ground(out: &mut Vec<Shape>) {
    out.push(Shape::Path {
        cmds: vec![
            PathCmd::MoveTo(Vec2::new(0.0, GROUND_Y)),
            PathCmd::LineTo(Vec2::new(FIELD_WIDTH, GROUND_Y)),
        ],
        color: GROUND_COLOR,
        stroke: Some(2.0),
    });
}

/// Hazard icon inside an obstacle's box (top-left `min`, side `s`)
fn hazard_icon(kind: HazardKind, min: Vec2, s: f32) -> Vec<PathCmd> {
    let p = |x: f32, y: f32| min + Vec2::new(x * s, y * s);
    match kind {
        HazardKind::Fire => vec![
            PathCmd::MoveTo(p(0.5, 0.05)),
            PathCmd::BezierTo(p(0.95, 0.45), p(0.85, 0.95), p(0.5, 0.95)),
            PathCmd::BezierTo(p(0.15, 0.95), p(0.05, 0.55), p(0.35, 0.3)),
            PathCmd::QuadTo(p(0.4, 0.55), p(0.5, 0.05)),
            PathCmd::Close,
        ],
        HazardKind::Flood => vec![
            PathCmd::MoveTo(p(0.0, 0.6)),
            PathCmd::QuadTo(p(0.25, 0.35), p(0.5, 0.6)),
            PathCmd::QuadTo(p(0.75, 0.85), p(1.0, 0.6)),
            PathCmd::LineTo(p(1.0, 1.0)),
            PathCmd::LineTo(p(0.0, 1.0)),
            PathCmd::Close,
        ],
        HazardKind::Hail => vec![
            PathCmd::MoveTo(p(0.5, 0.0)),
            PathCmd::LineTo(p(1.0, 0.5)),
            PathCmd::LineTo(p(0.5, 1.0)),
            PathCmd::LineTo(p(0.0, 0.5)),
            PathCmd::Close,
        ],
        HazardKind::Quake => vec![
            PathCmd::MoveTo(p(0.0, 1.0)),
            PathCmd::LineTo(p(0.3, 0.2)),
            PathCmd::LineTo(p(0.5, 0.7)),
            PathCmd::LineTo(p(0.7, 0.0)),
            PathCmd::LineTo(p(1.0, 1.0)),
            PathCmd::Close,
        ],
        HazardKind::Road => vec![
            PathCmd::MoveTo(p(0.5, 0.0)),
            PathCmd::LineTo(p(1.0, 1.0)),
            PathCmd::LineTo(p(0.0, 1.0)),
            PathCmd::Close,
        ],
    }
}

fn obstacle(o: &Obstacle, out: &mut Vec<Shape>) {
    let min = Vec2::new(o.pos.x, o.pos.y - o.size.y);
    out.push(Shape::RoundRect {
        min,
        size: o.size,
        radius: 6.0,
        color: SKYLINE_COLOR,
    });
    out.push(Shape::Path {
        cmds: hazard_icon(o.kind, min + Vec2::splat(4.0), o.size.x - 8.0),
        color: icon_color(Some(o.kind)),
        stroke: None,
    });
}

fn runner(r: &Runner, out: &mut Vec<Shape>) {
    let min = Vec2::new(r.pos.x, r.pos.y - r.size.y);
    out.push(Shape::RoundRect {
        min,
        size: r.size,
        radius: 8.0,
        color: RUNNER_BODY,
    });
    // Visor
    out.push(Shape::Rect {
        min: min + Vec2::new(r.size.x * 0.45, r.size.y * 0.2),
        size: Vec2::new(r.size.x * 0.45, r.size.y * 0.15),
        color: RUNNER_ACCENT,
    });
}

/// Build the full scene for one frame
pub fn build_scene(frame: &Frame<'_>, settings: &Settings) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(128 + frame.obstacles.len() * 2);
    shapes.push(Shape::Rect {
        min: Vec2::ZERO,
        size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        color: SKY_COLOR,
    });

    if settings.quality.stars_enabled() {
        stars(frame, settings, &mut shapes);
    }
    if settings.quality.skyline_enabled() {
        skyline(frame, settings, &mut shapes);
    }
    ground(&mut shapes);

    for o in frame.obstacles.iter().filter(|o| o.active) {
        obstacle(o, &mut shapes);
    }
    runner(frame.runner, &mut shapes);
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::settings::QualityPreset;
    use crate::sim::GameState;

    fn count_circles(shapes: &[Shape]) -> usize {
        shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count()
    }

    #[test]
    fn test_icon_colors() {
        assert_eq!(icon_color(Some(HazardKind::Fire)), "#f97316");
        assert_eq!(icon_color(Some(HazardKind::Road)), "#facc15");
        assert_eq!(icon_color(None), "#e5e7eb");
    }

    #[test]
    fn test_quality_controls_detail() {
        let state = GameState::new(1, &Tuning::default());
        let frame = Frame::from_state(&state);

        let high = build_scene(&frame, &Settings::from_preset(QualityPreset::High));
        let medium = build_scene(&frame, &Settings::from_preset(QualityPreset::Medium));
        let low = build_scene(&frame, &Settings::from_preset(QualityPreset::Low));

        assert_eq!(count_circles(&high), STAR_COUNT as usize);
        assert_eq!(count_circles(&medium), 0);
        assert!(high.len() > medium.len());
        assert!(medium.len() > low.len());
        // Sky, ground, runner body and visor
        assert_eq!(low.len(), 4);
    }

    #[test]
    fn test_scene_is_deterministic() {
        let mut state = GameState::new(1, &Tuning::default());
        state.tick = 321;
        state.speed = 8.0;
        let frame = Frame::from_state(&state);
        let settings = Settings::default();
        assert_eq!(build_scene(&frame, &settings), build_scene(&frame, &settings));
    }

    #[test]
    fn test_reduced_motion_freezes_background() {
        let mut state = GameState::new(1, &Tuning::default());
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let still = build_scene(&Frame::from_state(&state), &settings);
        state.tick = 500;
        let later = build_scene(&Frame::from_state(&state), &settings);
        assert_eq!(still, later);
    }

    #[test]
    fn test_only_active_obstacles_drawn() {
        let mut state = GameState::new(1, &Tuning::default());
        state.obstacles.push(Obstacle::new(1, 6.0, HazardKind::Hail));
        let mut gone = Obstacle::new(2, 6.0, HazardKind::Fire);
        gone.deactivate();
        state.obstacles.push(gone);

        let shapes = build_scene(
            &Frame::from_state(&state),
            &Settings::from_preset(QualityPreset::Low),
        );
        let hail_icons = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Path { color, stroke: None, .. } if *color == "#a78bfa"))
            .count();
        let fire_icons = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Path { color, .. } if *color == "#f97316"))
            .count();
        assert_eq!(hail_icons, 1);
        assert_eq!(fire_icons, 0);
    }
}
