use crate::{config::GameConfig, constants::game, pages::game::rect::FRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BirdFrame {
    #[default]
    Rising,
    Falling,
}

#[derive(Debug, Clone)]
pub struct Bird {
    pub rect: FRect,
    pub velocity: f32,
    pub cooldown: f32,
    pub frame: BirdFrame,
}

impl Bird {
    pub fn new() -> Self {
        Bird {
            rect: FRect::from_center(game::BIRD_START_CX, game::BIRD_START_CY, game::BIRD_W, game::BIRD_H),
            velocity: 0.0,
            // Starts saturated so the very first flap is never rejected.
            cooldown: game::JUMP_COOLDOWN,
            frame: BirdFrame::Rising,
        }
    }

    pub fn reset(&mut self) {
        self.rect.set_center(game::BIRD_START_CX, game::BIRD_START_CY);
        self.velocity = 0.0;
        self.cooldown = game::JUMP_COOLDOWN;
        self.frame = BirdFrame::Rising;
    }

    /// Velocity update for one frame. Gravity is added per call (not scaled
    /// by dt) and the cooldown accumulates by dt regardless of flap; the
    /// clamped velocity may then be replaced by a jump impulse if the
    /// cooldown threshold has been reached (boundary inclusive).
    pub fn apply_forces(&mut self, dt: f32, flap: bool, cfg: &GameConfig) {
        self.velocity += cfg.gravity;
        self.cooldown += dt;

        if self.velocity > cfg.velocity_limit {
            self.velocity = cfg.velocity_limit;
        } else if self.velocity < -cfg.velocity_limit {
            self.velocity = -cfg.velocity_limit;
        }

        if flap && self.cooldown >= cfg.jump_cooldown {
            self.velocity = -cfg.jump_force;
            self.cooldown = 0.0;
        }
    }

    /// Position integration IS dt-scaled. Horizontal position is fixed.
    pub fn integrate(&mut self, dt: f32) {
        self.rect.translate(0.0, self.velocity * dt);
    }

    /// Playfield-relative bounds: the bird dies once its rect is more than
    /// `OUT_OF_BOUNDS_MARGIN` beyond the top or bottom edge.
    pub fn out_of_bounds(&self) -> bool {
        self.rect.top() > game::PLAYFIELD_H + game::OUT_OF_BOUNDS_MARGIN
            || self.rect.bottom() < -game::OUT_OF_BOUNDS_MARGIN
    }

    /// Frame selection is a pure function of the velocity sign.
    pub fn animate(&mut self) {
        self.frame = if self.velocity <= 0.0 { BirdFrame::Rising } else { BirdFrame::Falling };
    }
}
