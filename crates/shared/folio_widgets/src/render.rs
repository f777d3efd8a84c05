//! Cart-pole drawing.

use folio::numfmt;
use folio::surface::{Rect, Surface};

use crate::cartpole::CartPole;

const BACKGROUND: &str = "#0a0f1a";
const TRACK: &str = "rgba(122, 162, 255, 0.35)";
const CART: &str = "#7aa2ff";
const CART_EDGE: &str = "#c7d2fe";
const WHEEL: &str = "#1e293b";
const POLE: &str = "#fbbf24";
const POLE_WARN: &str = "#ef4444";
const HUD_TEXT: &str = "rgba(255, 255, 255, 0.92)";

/// Pixel layout of the cart-pole scene for one surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartPoleView {
    pub width: f64,
    pub height: f64,
    pub track_y: f64,
    /// Pixels per track unit.
    pub scale: f64,
    pub cart_w: f64,
    pub cart_h: f64,
    pub wheel_r: f64,
    pub pole_len: f64,
}

impl CartPoleView {
    pub fn new(width: f64, height: f64, track_limit: f32) -> Self {
        let margin = 40.0_f64.min(width * 0.1);
        let half_track_px = (width * 0.5 - margin).max(1.0);
        Self {
            width,
            height,
            track_y: height * 0.75,
            scale: half_track_px / (track_limit.max(1e-3) as f64),
            cart_w: 60.0,
            cart_h: 30.0,
            wheel_r: 8.0,
            pole_len: (height * 0.45).min(120.0),
        }
    }

    pub fn cart_center_x(&self, cart_position: f32) -> f64 {
        self.width * 0.5 + cart_position as f64 * self.scale
    }

    pub fn cart_rect(&self, cart_position: f32) -> Rect {
        let cx = self.cart_center_x(cart_position);
        Rect::new(
            cx - self.cart_w * 0.5,
            self.track_y - self.wheel_r - self.cart_h,
            self.cart_w,
            self.cart_h,
        )
    }

    /// Pivot at the top-center of the cart; tip rotated `angle` from vertical.
    pub fn pole_segment(&self, cart_position: f32, angle: f32) -> ((f64, f64), (f64, f64)) {
        let cart = self.cart_rect(cart_position);
        let pivot = (cart.center_x(), cart.y);
        let a = angle as f64;
        let tip = (
            pivot.0 + self.pole_len * a.sin(),
            pivot.1 - self.pole_len * a.cos(),
        );
        (pivot, tip)
    }

    /// Render one frame. Touches only the surface.
    pub fn draw(&self, surface: &mut impl Surface, sim: &CartPole, average_window: usize) {
        let snap = sim.snapshot(average_window);
        surface.clear(BACKGROUND);

        let half = sim.params.track_limit as f64 * self.scale;
        let mid = self.width * 0.5;
        surface.line(
            (mid - half - self.cart_w * 0.5, self.track_y),
            (mid + half + self.cart_w * 0.5, self.track_y),
            TRACK,
            2.0,
        );

        let x = snap.cart_position;
        let cart = self.cart_rect(x);
        surface.fill_rect(cart, CART);
        surface.stroke_rect(cart, CART_EDGE, 2.0);

        let wheel_y = self.track_y - self.wheel_r;
        surface.fill_circle(cart.x + cart.w * 0.25, wheel_y, self.wheel_r, WHEEL);
        surface.fill_circle(cart.x + cart.w * 0.75, wheel_y, self.wheel_r, WHEEL);

        let angle = snap.pole_angle;
        let pole_color = if angle.abs() > sim.params.angle_limit * 0.5 {
            POLE_WARN
        } else {
            POLE
        };
        let (pivot, tip) = self.pole_segment(x, angle);
        surface.line(pivot, tip, pole_color, 6.0);

        surface.text(12.0, 22.0, &format!("Episode: {}", snap.episode), HUD_TEXT);
        surface.text(12.0, 40.0, &format!("Timestep: {}", snap.timestep), HUD_TEXT);
        surface.text(
            12.0,
            58.0,
            &format!(
                "Avg score (last {}): {}",
                average_window,
                numfmt::fixed(snap.trailing_average as f64, 1)
            ),
            HUD_TEXT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartpole::CartPoleParams;
    use folio::prng::Prng;
    use folio::surface::{DrawCommand, DrawList};

    #[test]
    fn centered_cart_is_drawn_mid_canvas() {
        let view = CartPoleView::new(600.0, 300.0, 2.4);
        let cart = view.cart_rect(0.0);
        assert!((cart.center_x() - 300.0).abs() < 1e-9);
        assert!(cart.y + cart.h <= view.track_y);
    }

    #[test]
    fn track_ends_map_inside_the_canvas() {
        let view = CartPoleView::new(600.0, 300.0, 2.4);
        let left = view.cart_rect(-2.4);
        let right = view.cart_rect(2.4);
        assert!(left.x >= 0.0);
        assert!(right.x + right.w <= 600.0);
    }

    #[test]
    fn upright_pole_points_straight_up() {
        let view = CartPoleView::new(600.0, 300.0, 2.4);
        let (pivot, tip) = view.pole_segment(0.0, 0.0);
        assert!((pivot.0 - tip.0).abs() < 1e-9);
        assert!(tip.1 < pivot.1);
        let (_, lean) = view.pole_segment(0.0, 0.3);
        assert!(lean.0 > pivot.0);
    }

    #[test]
    fn frame_contains_cart_wheels_pole_and_hud() {
        let mut rng = Prng::new(3);
        let sim = CartPole::new(CartPoleParams::default(), &mut rng);
        let view = CartPoleView::new(600.0, 300.0, sim.params.track_limit);
        let mut dl = DrawList::new(600.0, 300.0);
        view.draw(&mut dl, &sim, 10);

        let cmds = dl.commands();
        assert!(matches!(cmds[0], DrawCommand::Clear(_)));
        let circles = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 2);
        let lines = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2);
        let outlines: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeRect(r, _, _) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(outlines, vec![view.cart_rect(sim.cart_position())]);
        let texts: Vec<&str> = dl.texts().collect();
        assert_eq!(
            texts,
            vec!["Episode: 1", "Timestep: 0", "Avg score (last 10): 0.0"]
        );
    }

    #[test]
    fn drawing_does_not_change_state() {
        let mut rng = Prng::new(8);
        let mut sim = CartPole::new(CartPoleParams::default(), &mut rng);
        for _ in 0..10 {
            sim.step(&mut rng);
        }
        let before = sim.snapshot(10);
        let view = CartPoleView::new(400.0, 200.0, sim.params.track_limit);
        let mut dl = DrawList::new(400.0, 200.0);
        view.draw(&mut dl, &sim, 10);
        assert_eq!(sim.snapshot(10), before);
    }
}
