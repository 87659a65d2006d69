mod bird;
mod pipes;
mod rect;
mod sim;

use std::{collections::HashMap, time::SystemTime};

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::ThreadRng;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::{background::Scenery, sprite::Sprite},
    config::{Config, PageKeyBindings},
    constants::game,
    pages::game::{
        bird::BirdFrame,
        rect::FRect,
        sim::{Sim, Step},
    },
};

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    sim: Sim,
    rng: ThreadRng,
    flap: bool,
    last_time: SystemTime,
}

impl GamePage {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let sim = Sim::new(Default::default(), &mut rng);
        GamePage { action_tx: None, keymap: PageKeyBindings::default(), sim, rng, flap: false, last_time: SystemTime::now() }
    }

    pub fn reset_time(&mut self) {
        self.last_time = SystemTime::now();
    }

    /// Seconds since the previous tick, clamped so page switches and
    /// suspend/resume cannot produce one giant catch-up frame.
    fn take_delta_time(&mut self) -> f32 {
        let now = SystemTime::now();
        let dt = now.duration_since(self.last_time).unwrap_or_default().as_secs_f32();
        self.last_time = now;
        dt.min(game::MAX_FRAME_DT)
    }

    /// Map a playfield rect to terminal cells within the canvas. Edges are
    /// transformed independently so adjacent rects stay adjacent after
    /// rounding.
    fn to_cells(rect: &FRect, area: Rect) -> (i32, i32, u16, u16) {
        let sx = area.width as f32 / game::PLAYFIELD_W;
        let sy = area.height as f32 / game::PLAYFIELD_H;

        let x0 = (rect.left() * sx).round() as i32;
        let x1 = (rect.right() * sx).round() as i32;
        let y0 = (rect.top() * sy).round() as i32;
        let y1 = (rect.bottom() * sy).round() as i32;

        (area.x as i32 + x0, area.y as i32 + y0, (x1 - x0).max(0) as u16, (y1 - y0).max(0) as u16)
    }

    /// Clip a cell-space block against the canvas; returns the visible area
    /// plus how many columns and rows were cut off at the left and top.
    fn clip(area: Rect, x: i32, y: i32, w: u16, h: u16) -> Option<(Rect, usize, usize)> {
        let area_left = area.x as i32;
        let area_top = area.y as i32;
        let area_right = area_left + area.width as i32;
        let area_bottom = area_top + area.height as i32;

        let x1 = x + w as i32;
        let y1 = y + h as i32;
        let cx0 = x.max(area_left);
        let cy0 = y.max(area_top);
        let cx1 = x1.min(area_right);
        let cy1 = y1.min(area_bottom);
        if cx0 >= cx1 || cy0 >= cy1 {
            return None;
        }

        let clipped = Rect::new(cx0 as u16, cy0 as u16, (cx1 - cx0) as u16, (cy1 - cy0) as u16);
        Some((clipped, (cx0 - x) as usize, (cy0 - y) as usize))
    }

    /// A pipe is a column of `|` rows with a solid rim on its gap-facing
    /// end.
    fn pipe_rows(width: u16, height: u16, rim_on_top: bool) -> Vec<String> {
        let row = "|".repeat(width as usize);
        let rim_row = "█".repeat(width as usize);

        let rim_height = 2.min(height as usize);
        let rows_iter = std::iter::repeat_with(|| row.clone()).take(height as usize - rim_height);
        let rim_iter = std::iter::repeat_with(|| rim_row.clone()).take(rim_height);
        if rim_on_top {
            rim_iter.chain(rows_iter).collect()
        } else {
            rows_iter.chain(rim_iter).collect()
        }
    }

    fn draw_pipe(&self, f: &mut Frame<'_>, area: Rect, rect: &FRect, rim_on_top: bool) {
        let (x, y, w, h) = Self::to_cells(rect, area);
        if let Some((clipped, skip_cols, skip_rows)) = Self::clip(area, x, y, w, h) {
            let rows = Self::pipe_rows(w, h, rim_on_top)
                .into_iter()
                .skip(skip_rows)
                .take(clipped.height as usize)
                .map(|row| row.chars().skip(skip_cols).take(clipped.width as usize).collect::<String>())
                .collect::<Vec<_>>();
            let sprite = Sprite::new(rows).style(Style::default().fg(game::PIPE_COLOR));
            f.render_widget(sprite, clipped);
        }
    }

    fn draw_bird(&self, f: &mut Frame<'_>, area: Rect) {
        let art = match self.sim.bird.frame {
            BirdFrame::Rising => game::BIRD_RISING,
            BirdFrame::Falling => game::BIRD_FALLING,
        };
        let sprite =
            Sprite::from_text(art).transparent_whitespace(true).pixel_mode().style(Style::default().fg(game::BIRD_COLOR));
        let (w, h) = sprite.size();

        let (x, y, _, _) = Self::to_cells(&self.sim.bird.rect, area);
        if let Some((clipped, skip_cols, skip_rows)) = Self::clip(area, x, y, w, h) {
            let rows = art
                .lines()
                .filter(|line| !line.is_empty())
                .skip(skip_rows)
                .take(clipped.height as usize)
                .map(|row| row.chars().skip(skip_cols).take(clipped.width as usize).collect::<String>())
                .collect::<Vec<_>>();
            let sprite = Sprite::new(rows)
                .transparent_whitespace(true)
                .pixel_mode()
                .style(Style::default().fg(game::BIRD_COLOR));
            f.render_widget(sprite, clipped);
        }
    }

    fn draw_score(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(self.sim.score_text.as_str()).style(Style::default().fg(game::SCORE_COLOR));
        let score_area = Rect { x: area.x + 1, y: area.y, width: area.width.saturating_sub(1), height: 1 };
        f.render_widget(Paragraph::new(line), score_area);
    }

    fn draw_hint(&self, f: &mut Frame<'_>, area: Rect) {
        let width = game::START_HINT.len() as u16;
        let [_, hint_area, _] =
            Layout::horizontal(vec![Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);
        let hint_area = Rect { y: area.y + area.height / 3, height: 1, ..hint_area };
        let line = Line::from(game::START_HINT).style(Style::default().fg(game::HINT_COLOR));
        f.render_widget(Paragraph::new(line), hint_area);
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.sim = Sim::new(config.game, &mut self.rng);
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            return Ok(Some(act!(Command::Game(GameAction::Flap))));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Game(command) => match command {
                GameAction::Flap => {
                    self.flap = true;
                },
                GameAction::Restart => {
                    self.sim.reset(&mut self.rng);
                    self.reset_time();
                },
                GameAction::Menu => {
                    if let Some(action_tx) = &self.action_tx {
                        action_tx.send(act!(Command::ShowHome))?;
                    }
                },
            },
            Command::StartGame => {
                self.sim.reset(&mut self.rng);
                self.reset_time();
            },
            Command::Tick => {
                let dt = self.take_delta_time();
                let flap = std::mem::take(&mut self.flap);
                if self.sim.step(dt, flap, &mut self.rng) == Step::Reset {
                    log::info!("bird died, simulation reset");
                }
            },
            _ => {},
        }

        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        // Layer 0: scenery, driven by the simulation's backdrop offset.
        f.render_widget(Clear, area);
        f.render_widget(Scenery::new(self.sim.backdrop.offset), area);

        // Layer 1: pipes, bird, score.
        self.draw_pipe(f, area, &self.sim.pipes.lower, true);
        self.draw_pipe(f, area, &self.sim.pipes.upper, false);
        self.draw_bird(f, area);
        self.draw_score(f, area);

        if !self.sim.started {
            self.draw_hint(f, area);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_to_cells_scales_playfield_to_canvas() {
        let area = Rect::new(0, 0, 100, 35);
        let rect = FRect::new(50.0, 70.0, 10.0, 70.0);
        let (x, y, w, h) = GamePage::to_cells(&rect, area);
        assert_eq!((x, y, w, h), (50, 18, 10, 17));
    }

    #[test]
    fn test_clip_partially_visible_block() {
        let area = Rect::new(10, 5, 20, 10);
        // Sticks out to the top left of the canvas
        let (clipped, skip_cols, skip_rows) = GamePage::clip(area, 8, 3, 5, 5).unwrap();
        assert_eq!(clipped, Rect::new(10, 5, 3, 3));
        assert_eq!((skip_cols, skip_rows), (2, 2));
    }

    #[test]
    fn test_clip_off_canvas_block() {
        let area = Rect::new(0, 0, 20, 10);
        assert!(GamePage::clip(area, 25, 0, 5, 5).is_none());
        assert!(GamePage::clip(area, -5, 0, 5, 5).is_none());
    }

    #[test]
    fn test_pipe_rows_rim_placement() {
        let rows = GamePage::pipe_rows(2, 4, true);
        assert_eq!(rows, vec!["██", "██", "||", "||"]);
        let rows = GamePage::pipe_rows(2, 4, false);
        assert_eq!(rows, vec!["||", "||", "██", "██"]);
    }
}
