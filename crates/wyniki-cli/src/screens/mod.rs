use crossterm::event::Event;
use ratatui::Frame;
use wyniki_dataset::Population;

use crate::screens::browse::BrowseScreen;

mod browse;

#[derive(Debug)]
pub enum Screen {
    Browse(BrowseScreen),
}

impl Screen {
    #[must_use]
    pub fn browse(population: &'static Population, target_school: &str) -> Self {
        Self::Browse(BrowseScreen::new(population, target_school))
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Self::Browse(screen) => screen.should_exit(),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Self::Browse(screen) => screen.handle_event(event),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self {
            Self::Browse(screen) => screen.draw(frame),
        }
    }
}
