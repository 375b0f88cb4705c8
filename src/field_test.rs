#![allow(clippy::float_cmp)]

use super::*;
use crate::config::Color;
use image::Rgba;

// --- Test doubles ---

#[derive(Debug, Clone, PartialEq)]
struct Line {
    from: (f32, f32),
    to: (f32, f32),
    color: Color,
    stroke: f32,
    alpha: u8,
}

#[derive(Default)]
struct Recorder {
    backgrounds: Vec<Color>,
    circles: Vec<(f32, f32, f32)>,
    lines: Vec<Line>,
}

impl Surface for Recorder {
    fn fill_background(&mut self, color: Color) {
        self.backgrounds.push(color);
    }

    fn draw_filled_circle(&mut self, x: f32, y: f32, radius: f32, _color: Color) {
        self.circles.push((x, y, radius));
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, stroke_width: f32, alpha: u8) {
        self.lines.push(Line { from: (x1, y1), to: (x2, y2), color, stroke: stroke_width, alpha });
    }
}

struct NullSurface;

impl Surface for NullSurface {
    fn fill_background(&mut self, _color: Color) {}
    fn draw_filled_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {}
    fn draw_line(&mut self, _: f32, _: f32, _: f32, _: f32, _: Color, _: f32, _: u8) {}
}

fn field(config: ZodiacConfig) -> StarField {
    StarField::new(config).unwrap()
}

fn still_field(stars: Vec<Star>) -> StarField {
    let config = ZodiacConfig::builder().star_count(0).speed(0.0).seed(1).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    f.stars = stars;
    f
}

fn interactive(count: usize) -> StarField {
    let config = ZodiacConfig::builder().star_count(count).interaction_enabled(true).seed(9).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    f
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(3)
}

// --- Construction ---

#[test]
fn new_rejects_invalid_config() {
    let config = ZodiacConfig { star_size_min: 5.0, star_size_max: 1.0, ..ZodiacConfig::default() };
    assert!(StarField::new(config).is_err());
}

#[test]
fn new_field_is_empty_until_sized() {
    let f = field(ZodiacConfig::default());
    assert!(f.stars().is_empty());
    assert!(f.finger().is_none());
    assert_eq!(f.size(), (0.0, 0.0));
}

#[test]
fn tick_before_size_draws_only_background() {
    let mut f = field(ZodiacConfig::default());
    let mut s = Recorder::default();
    let stats = f.on_render_tick(&mut s);
    assert_eq!(stats, TickStats::default());
    assert_eq!(s.backgrounds, vec![ZodiacConfig::default().color_background]);
    assert!(s.circles.is_empty());
    assert!(s.lines.is_empty());
}

// --- Generation ---

#[test]
fn generated_stars_respect_bounds_and_sizes() {
    let config = ZodiacConfig::builder().star_count(500).star_size_min(3.0).star_size_max(9.0).seed(11).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    assert_eq!(f.stars().len(), 500);
    for s in f.stars() {
        assert!((0.0..640.0).contains(&s.x), "x = {}", s.x);
        assert!((0.0..480.0).contains(&s.y), "y = {}", s.y);
        assert!((3.0..=9.0).contains(&s.size), "size = {}", s.size);
        assert!((-0.5..0.5).contains(&s.dir_x));
        assert!((-0.5..0.5).contains(&s.dir_y));
        assert!(s.connections().is_empty());
    }
}

#[test]
fn equal_size_bounds_give_exact_size() {
    let config = ZodiacConfig::builder().star_count(20).star_size_min(6.0).star_size_max(6.0).seed(2).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(100, 100);
    assert!(f.stars().iter().all(|s| s.size == 6.0));
}

#[test]
fn zero_sized_surface_does_not_panic() {
    let config = ZodiacConfig::builder().star_count(3).seed(2).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(0, 0);
    assert_eq!(f.stars().len(), 3);
    assert!(f.stars().iter().all(|s| s.x == 0.0 && s.y == 0.0));
    f.on_render_tick(&mut NullSurface);
}

#[test]
fn same_seed_same_stars() {
    let config = ZodiacConfig::builder().star_count(10).seed(77).build().unwrap();
    let mut a = field(config.clone());
    let mut b = field(config);
    a.on_surface_size(300, 200);
    b.on_surface_size(300, 200);
    assert_eq!(a.stars(), b.stars());
}

#[test]
fn resize_regenerates_exact_count() {
    let config = ZodiacConfig::builder().star_count(5).seed(5).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    let first: Vec<(f32, f32)> = f.stars().iter().map(|s| (s.x, s.y)).collect();
    f.on_surface_size(640, 480);
    let second: Vec<(f32, f32)> = f.stars().iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 5);
    assert_ne!(first, second);
}

#[test]
fn resize_discards_finger_star() {
    let mut f = interactive(5);
    f.on_pointer_press(10.0, 10.0);
    assert_eq!(f.stars().len(), 6);
    f.on_surface_size(800, 600);
    assert_eq!(f.stars().len(), 5);
    assert!(f.finger().is_none());
    // Release after regeneration must not remove an ambient star.
    f.on_pointer_release();
    assert_eq!(f.stars().len(), 5);
}

// --- Motion ---

#[test]
fn move_applies_speed_to_both_axes() {
    let mut s = Star::new(100.0, 100.0, 0.5, -0.25, 5.0);
    move_star(&mut s, 2.0, 640.0, 480.0, &mut rng());
    assert_eq!((s.x, s.y), (101.0, 99.5));
    assert_eq!((s.dir_x, s.dir_y), (0.5, -0.25));
}

#[test]
fn bottom_edge_wins_over_right_edge() {
    let mut s = Star::new(639.0, 479.0, 0.3, 0.3, 5.0);
    move_star(&mut s, 1.0, 640.0, 480.0, &mut rng());
    assert!((-1.0..0.0).contains(&s.dir_y), "dir_y = {}", s.dir_y);
    assert_eq!(s.dir_x, 0.3);
}

#[test]
fn top_edge_wins_over_left_edge() {
    let mut s = Star::new(1.0, 1.0, -0.3, -0.3, 5.0);
    move_star(&mut s, 1.0, 640.0, 480.0, &mut rng());
    assert!((0.0..1.0).contains(&s.dir_y), "dir_y = {}", s.dir_y);
    assert_eq!(s.dir_x, -0.3);
}

#[test]
fn right_edge_reaims_left() {
    let mut s = Star::new(639.0, 240.0, 0.4, 0.1, 5.0);
    move_star(&mut s, 1.0, 640.0, 480.0, &mut rng());
    assert!((-1.0..0.0).contains(&s.dir_x), "dir_x = {}", s.dir_x);
    assert_eq!(s.dir_y, 0.1);
}

#[test]
fn left_edge_reaims_right() {
    let mut s = Star::new(1.0, 240.0, -0.4, 0.1, 5.0);
    move_star(&mut s, 1.0, 640.0, 480.0, &mut rng());
    assert!((0.0..1.0).contains(&s.dir_x), "dir_x = {}", s.dir_x);
    assert_eq!(s.dir_y, 0.1);
}

#[test]
fn bounce_keeps_speed_bounded_by_one() {
    let mut s = Star::new(639.0, 240.0, 0.4, 0.0, 5.0);
    let mut r = rng();
    for _ in 0..1000 {
        move_star(&mut s, 1.0, 640.0, 480.0, &mut r);
        assert!(s.dir_x.abs() <= 1.0 && s.dir_y.abs() <= 1.0);
    }
}

#[test]
fn stars_never_drift_far_past_edges() {
    const MARGIN: f32 = 10.0;
    let config = ZodiacConfig::builder().star_count(10).star_size_min(2.0).star_size_max(4.0).seed(21).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(320, 240);
    // Let stars born overlapping an edge settle first.
    for _ in 0..200 {
        f.on_render_tick(&mut NullSurface);
    }
    for _ in 0..3000 {
        f.on_render_tick(&mut NullSurface);
        for s in f.stars() {
            assert!(s.x - s.size >= -MARGIN && s.x + s.size <= 320.0 + MARGIN, "x = {}", s.x);
            assert!(s.y - s.size >= -MARGIN && s.y + s.size <= 240.0 + MARGIN, "y = {}", s.y);
        }
    }
}

// --- Connections ---

#[test]
fn close_pair_connects_once() {
    let mut f = still_field(vec![
        Star::new(100.0, 100.0, 0.0, 0.0, 5.0),
        Star::new(150.0, 100.0, 0.0, 0.0, 5.0),
        Star::new(400.0, 400.0, 0.0, 0.0, 5.0),
    ]);
    let mut s = Recorder::default();
    let stats = f.on_render_tick(&mut s);

    assert_eq!(stats, TickStats { stars: 3, connections: 1 });
    assert_eq!(f.stars()[0].connections(), &[1]);
    assert!(f.stars()[1].connections().is_empty());
    assert!(f.stars()[2].connections().is_empty());
    assert_eq!(s.circles.len(), 3);
    assert_eq!(s.lines.len(), 1);
    assert_eq!(s.lines[0].from, (100.0, 100.0));
    assert_eq!(s.lines[0].to, (150.0, 100.0));
}

#[test]
fn box_test_not_euclidean() {
    // 150 apart on both axes: Euclidean 212 > 200, still inside the box.
    let mut f = still_field(vec![Star::new(100.0, 100.0, 0.0, 0.0, 5.0), Star::new(250.0, 250.0, 0.0, 0.0, 5.0)]);
    let mut s = Recorder::default();
    f.on_render_tick(&mut s);
    assert_eq!(s.lines.len(), 1);
    // (1.4 - 212.13 / 200) * 255 = 86.5 -> 86 or 87 after rounding
    assert!((86..=87).contains(&s.lines[0].alpha), "alpha = {}", s.lines[0].alpha);
}

#[test]
fn threshold_is_exclusive() {
    let mut f = still_field(vec![Star::new(100.0, 100.0, 0.0, 0.0, 5.0), Star::new(300.0, 100.0, 0.0, 0.0, 5.0)]);
    let mut s = Recorder::default();
    f.on_render_tick(&mut s);
    assert!(s.lines.is_empty());
}

#[test]
fn line_uses_relation_style_and_distance_alpha() {
    let mut f = still_field(vec![Star::new(100.0, 100.0, 0.0, 0.0, 5.0), Star::new(220.0, 260.0, 0.0, 0.0, 5.0)]);
    let mut s = Recorder::default();
    f.on_render_tick(&mut s);
    let line = &s.lines[0];
    assert_eq!(line.color, ZodiacConfig::default().color_relation);
    assert_eq!(line.stroke, ZodiacConfig::default().relation_size);
    // Euclidean 200 == threshold
    assert_eq!(line.alpha, 102);
}

#[test]
fn no_pair_is_listed_from_both_sides() {
    let config = ZodiacConfig::builder().star_count(40).seed(8).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(400, 300);
    for _ in 0..20 {
        let stats = f.on_render_tick(&mut NullSurface);
        let stars = f.stars();
        let mut listed = 0;
        for (i, a) in stars.iter().enumerate() {
            for &j in a.connections() {
                assert_ne!(i, j);
                assert!(!stars[j].connections().contains(&i), "{i} <-> {j} listed twice");
                listed += 1;
            }
        }
        assert_eq!(listed, stats.connections);
    }
}

#[test]
fn connections_are_rebuilt_every_tick() {
    let mut f = still_field(vec![Star::new(100.0, 100.0, 0.0, 0.0, 5.0), Star::new(150.0, 100.0, 0.0, 0.0, 5.0)]);
    f.on_render_tick(&mut NullSurface);
    f.stars[1].x = 500.0;
    let stats = f.on_render_tick(&mut NullSurface);
    assert_eq!(stats.connections, 0);
    assert!(f.stars()[0].connections().is_empty());
}

// --- Opacity ---

#[test]
fn opacity_full_at_zero_distance() {
    assert_eq!(relation_alpha(0.0, 200.0), 255);
}

#[test]
fn opacity_clamps_instead_of_wrapping() {
    assert_eq!(relation_alpha(280.0, 200.0), 0);
    assert_eq!(relation_alpha(1000.0, 200.0), 0);
    assert_eq!(relation_alpha(10.0, 200.0), 255);
}

#[test]
fn opacity_strictly_decreases_in_fade_band() {
    let threshold = 200.0;
    let mut prev = relation_alpha(0.45 * threshold, threshold);
    for step in 10..=27 {
        let d = step as f32 * 0.05 * threshold;
        let a = relation_alpha(d, threshold);
        assert!(a < prev, "alpha({d}) = {a} not below {prev}");
        prev = a;
    }
}

#[test]
fn opacity_never_increases_with_distance() {
    let mut prev = u8::MAX;
    for d in 0..400 {
        let a = relation_alpha(d as f32, 200.0);
        assert!(a <= prev);
        prev = a;
    }
}

// --- Pointer ---

#[test]
fn press_move_release_lifecycle() {
    let mut f = interactive(5);
    let before = f.stars().to_vec();

    f.on_pointer_press(10.0, 10.0);
    assert_eq!(f.stars().len(), 6);
    let finger = f.finger().cloned().unwrap();
    assert_eq!((finger.x, finger.y), (10.0, 10.0));
    assert_eq!(f.stars().last(), Some(&finger));

    f.on_pointer_move(20.0, 20.0);
    let moved = f.finger().cloned().unwrap();
    assert_eq!((moved.x, moved.y), (20.0, 20.0));
    assert_eq!((moved.dir_x, moved.dir_y, moved.size), (finger.dir_x, finger.dir_y, finger.size));
    assert_eq!(&f.stars()[..5], &before[..]);

    f.on_pointer_release();
    assert!(f.finger().is_none());
    assert_eq!(f.stars(), &before[..]);
}

#[test]
fn move_and_release_without_finger_are_noops() {
    let mut f = interactive(5);
    let before = f.stars().to_vec();
    f.on_pointer_move(1.0, 2.0);
    f.on_pointer_release();
    assert_eq!(f.stars(), &before[..]);
}

#[test]
fn second_press_replaces_finger() {
    let mut f = interactive(5);
    f.on_pointer_press(10.0, 10.0);
    f.on_pointer_press(30.0, 40.0);
    assert_eq!(f.stars().len(), 6);
    let finger = f.finger().unwrap();
    assert_eq!((finger.x, finger.y), (30.0, 40.0));
    assert!(!f.stars().iter().any(|s| s.x == 10.0 && s.y == 10.0));
}

#[test]
fn disabled_interaction_ignores_pointer() {
    let config = ZodiacConfig::builder().star_count(5).seed(9).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    let before = f.stars().to_vec();
    f.handle_pointer(PointerEvent::Press { x: 10.0, y: 10.0 });
    f.handle_pointer(PointerEvent::Move { x: 20.0, y: 20.0 });
    assert_eq!(f.stars(), &before[..]);
    assert!(f.finger().is_none());
    f.handle_pointer(PointerEvent::Release);
    assert_eq!(f.stars(), &before[..]);
}

#[test]
fn handle_pointer_dispatches_events() {
    let mut f = interactive(0);
    f.handle_pointer(PointerEvent::Press { x: 50.0, y: 60.0 });
    assert_eq!(f.stars().len(), 1);
    f.handle_pointer(PointerEvent::Move { x: 70.0, y: 80.0 });
    assert_eq!((f.stars()[0].x, f.stars()[0].y), (70.0, 80.0));
    f.handle_pointer(PointerEvent::Release);
    assert!(f.stars().is_empty());
}

#[test]
fn finger_star_takes_part_in_connections() {
    let config =
        ZodiacConfig::builder().star_count(0).speed(0.0).interaction_enabled(true).seed(4).build().unwrap();
    let mut f = field(config);
    f.on_surface_size(640, 480);
    f.stars.push(Star::new(300.0, 200.0, 0.0, 0.0, 5.0));
    f.on_pointer_press(320.0, 210.0);

    let mut s = Recorder::default();
    let stats = f.on_render_tick(&mut s);
    assert_eq!(stats, TickStats { stars: 2, connections: 1 });
    assert_eq!(s.lines[0].to, (320.0, 210.0));
    assert_eq!(s.lines[0].color, Rgba([0x49, 0x34, 0x8b, 0xff]));
}
