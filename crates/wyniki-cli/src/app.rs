use crossterm::event::Event;
use ratatui::Frame;
use wyniki_dataset::Population;

use crate::{
    screens::Screen,
    tui::{App, Tui},
};

/// The interactive results browser.
#[derive(Debug)]
pub struct BrowseApp {
    screen: Screen,
}

impl BrowseApp {
    #[must_use]
    pub fn new(population: &'static Population, target_school: &str) -> Self {
        Self {
            screen: Screen::browse(population, target_school),
        }
    }
}

impl App for BrowseApp {
    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}

/// Runs the browser UI until the user quits.
pub fn run_tui(population: &'static Population, target_school: &str) -> std::io::Result<()> {
    let mut app = BrowseApp::new(population, target_school);
    Tui::new().run(&mut app)
}
