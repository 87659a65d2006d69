use rand::Rng;

use crate::{config::GameConfig, constants::game, pages::game::rect::FRect};

/// Upper and lower obstacle sharing one scroll position. The gap between
/// them is `2 * half_gap` centered on the playfield's vertical midpoint,
/// shifted by a random offset; both values are redrawn on every recycle.
#[derive(Debug, Clone)]
pub struct PipePair {
    pub lower: FRect,
    pub upper: FRect,
    pub credited: bool,
}

impl PipePair {
    pub fn new(cfg: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut pipes = PipePair {
            lower: FRect::new(0.0, 0.0, game::PIPE_W, game::PIPE_H),
            upper: FRect::new(0.0, 0.0, game::PIPE_W, game::PIPE_H),
            credited: false,
        };
        pipes.respawn(cfg, rng);
        pipes
    }

    /// Reposition both rects at the right edge of the playfield with a fresh
    /// half-gap and vertical offset, and clear the scoring credit.
    pub fn respawn(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        let half_gap = rng.gen_range(cfg.pipe_gap_range[0]..=cfg.pipe_gap_range[1]) / 2.0;
        let offset = rng.gen_range(cfg.pipe_offset_range[0]..=cfg.pipe_offset_range[1]);

        self.lower.set_bottomleft(game::PIPE_RESPAWN_X, game::PLAYFIELD_H + half_gap + offset);
        self.upper.set_topleft(game::PIPE_RESPAWN_X, -half_gap + offset);

        self.credited = false;
    }

    /// Recycle once fully off-screen left, then scroll both rects together.
    pub fn advance(&mut self, dt: f32, cfg: &GameConfig, rng: &mut impl Rng) {
        if self.lower.right() < 0.0 {
            self.respawn(cfg, rng);
        }

        self.lower.translate(-cfg.pipe_speed * dt, 0.0);
        self.upper.translate(-cfg.pipe_speed * dt, 0.0);
    }

    /// Vertical extent of the opening between the two pipes.
    pub fn gap(&self) -> (f32, f32) {
        (self.upper.bottom(), self.lower.top())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_respawn_respects_configured_ranges() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pipes = PipePair::new(&cfg, &mut rng);

        for _ in 0..100 {
            pipes.credited = true;
            pipes.respawn(&cfg, &mut rng);

            assert!(!pipes.credited);
            assert_eq!(pipes.lower.left(), game::PIPE_RESPAWN_X);
            assert_eq!(pipes.upper.left(), game::PIPE_RESPAWN_X);

            let (gap_top, gap_bottom) = pipes.gap();
            let gap = gap_bottom - gap_top;
            assert!(gap >= cfg.pipe_gap_range[0] && gap <= cfg.pipe_gap_range[1]);

            let gap_center = (gap_top + gap_bottom) / 2.0;
            let offset = gap_center - game::PLAYFIELD_H / 2.0;
            assert!(offset >= cfg.pipe_offset_range[0] && offset <= cfg.pipe_offset_range[1]);
        }
    }

    #[test]
    fn test_both_rects_scroll_together() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pipes = PipePair::new(&cfg, &mut rng);

        let lower_x = pipes.lower.left();
        let upper_y = pipes.upper.top();
        pipes.advance(0.5, &cfg, &mut rng);

        assert_eq!(pipes.lower.left(), lower_x - cfg.pipe_speed * 0.5);
        assert_eq!(pipes.upper.left(), pipes.lower.left());
        // Vertical poses are untouched by scrolling
        assert_eq!(pipes.upper.top(), upper_y);
    }

    #[test]
    fn test_recycle_when_off_screen_left() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pipes = PipePair::new(&cfg, &mut rng);
        pipes.credited = true;

        // Not yet fully off screen: right edge exactly at zero stays put.
        pipes.lower.x = -game::PIPE_W;
        pipes.upper.x = -game::PIPE_W;
        pipes.advance(0.0, &cfg, &mut rng);
        assert!(pipes.credited);

        // One more nudge and the pair recycles to the right edge.
        pipes.lower.x = -game::PIPE_W - 0.1;
        pipes.upper.x = -game::PIPE_W - 0.1;
        pipes.advance(0.0, &cfg, &mut rng);
        assert!(!pipes.credited);
        assert_eq!(pipes.lower.left(), game::PIPE_RESPAWN_X);
    }
}
