use std::collections::HashMap;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, HomeAction},
    components::{background::Scenery, sprite::Sprite},
    config::PageKeyBindings,
    constants::{TITLE_SHADOW, TITLE_TEXT},
};

#[derive(Copy, Clone, PartialEq, Eq)]
enum OptionItem {
    Start,
    Quit,
}

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    options: Vec<(OptionItem, &'static str)>,
    selected_option_index: usize,
}

impl HomePage {
    pub fn new() -> Self {
        HomePageBuilder::default()
            .options(vec![(OptionItem::Start, "Start playing"), (OptionItem::Quit, "Quit")])
            .selected_option_index(0)
            .build()
            .unwrap()
    }

    pub fn up(&mut self) {
        if self.selected_option_index > 0 {
            self.selected_option_index -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected_option_index < self.options.len() - 1 {
            self.selected_option_index += 1;
        }
    }

    pub fn select(&mut self) -> Result<()> {
        let (item, _) = self.options[self.selected_option_index];
        if let Some(action_tx) = &self.action_tx {
            match item {
                OptionItem::Start => action_tx.send(act!(Command::StartGame))?,
                OptionItem::Quit => action_tx.send(act!(Command::Quit))?,
            }
        }
        Ok(())
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
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

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Command::Home(command) = action.command {
            match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => self.select()?,
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);
        f.render_widget(Scenery::new(0.0), rect);

        let title = Sprite::from_text(TITLE_TEXT);
        let (title_width, num_title_lines) = title.size();

        let num_options = self.options.len() as u16;
        let option_height = num_options * 2 - 1;

        let [title_area, option_area] =
            Layout::vertical(vec![Constraint::Length(num_title_lines), Constraint::Length(option_height)])
                .flex(layout::Flex::SpaceAround)
                .areas(rect);

        // Draw title with a drop shadow
        let [_, title_area, _] =
            Layout::horizontal(vec![Constraint::Fill(1), Constraint::Length(title_width), Constraint::Fill(1)])
                .areas(title_area);
        let shadow = Sprite::from_text(TITLE_SHADOW)
            .transparent_whitespace(true)
            .pixel_mode()
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(shadow, title_area);
        let title =
            title.transparent_whitespace(true).pixel_mode().style(Style::default().fg(Color::Yellow));
        f.render_widget(title, title_area);

        // Draw options
        let option_titles = self.options.iter().map(|(_, title)| *title).collect::<Vec<_>>();
        let max_option_len = option_titles.iter().map(|title| title.len()).max().unwrap_or(0) as u16;

        // Pad option titles
        let option_titles = option_titles
            .into_iter()
            .map(|title| {
                let pad_len = max_option_len as usize - title.len();
                format!("  {}{}", title, " ".repeat(pad_len + 2))
            })
            .collect::<Vec<_>>();

        let [option_area] = Layout::horizontal(vec![Constraint::Length(max_option_len + (2 * 2))])
            .flex(layout::Flex::SpaceAround)
            .areas(option_area);

        let lines = option_titles
            .iter()
            .enumerate()
            .map(|(index, title)| {
                Line::from(title.as_str()).style({
                    if index == self.selected_option_index {
                        Style::default().bg(Color::Cyan).fg(Color::Black)
                    } else {
                        Style::default()
                    }
                })
            })
            .collect::<Vec<_>>();
        // Insert empty lines between options
        let lines = {
            let len = lines.len();
            let mut new_lines = vec![];
            for (index, line) in lines.into_iter().enumerate() {
                new_lines.push(line);
                if index < len - 1 {
                    new_lines.push(Line::from(""));
                }
            }
            new_lines
        };

        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Left);
        f.render_widget(paragraph, option_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_option_navigation_saturates() {
        let mut page = HomePage::new();
        assert_eq!(page.selected_option_index, 0);
        page.up();
        assert_eq!(page.selected_option_index, 0);
        page.down();
        assert_eq!(page.selected_option_index, 1);
        page.down();
        assert_eq!(page.selected_option_index, 1);
    }
}
