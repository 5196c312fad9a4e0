use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Bar, BarChart, Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use wyniki_dataset::{MetricKind, Population};

use crate::view::{CompositePanel, DistributionChart, Selection, SubjectPanel, ViewModel};

/// The single interactive screen: selectors on top, three subject panels
/// in the middle, the composite panel below.
///
/// Every selector change rebuilds the whole [`ViewModel`]; nothing on the
/// screen survives from the previous selection.
#[derive(Debug)]
pub struct BrowseScreen {
    population: &'static Population,
    labels: Vec<String>,
    filter: String,
    /// Row indices whose label matches the filter, in row order.
    filtered: Vec<usize>,
    /// Position of the selected school within `filtered`.
    cursor: usize,
    selection: Selection,
    view: ViewModel,
    warning: Option<String>,
    should_exit: bool,
}

impl BrowseScreen {
    #[must_use]
    pub fn new(population: &'static Population, target_school: &str) -> Self {
        let labels = population
            .iter()
            .map(wyniki_dataset::SchoolRecord::display_label)
            .collect::<Vec<_>>();
        let (selection, warning) = Selection::initial(population, target_school);
        let view = ViewModel::build(population, &selection);
        Self {
            population,
            labels,
            filter: String::new(),
            filtered: (0..population.len()).collect(),
            cursor: selection.school,
            selection,
            view,
            warning,
            should_exit: false,
        }
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_exit = true;
                }
                KeyCode::Esc => {
                    if self.filter.is_empty() {
                        self.should_exit = true;
                    } else {
                        self.filter.clear();
                        self.apply_filter();
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    self.selection.metric = self.selection.metric.toggled();
                    self.rebuild();
                }
                KeyCode::Up if !self.filtered.is_empty() => {
                    self.cursor = self.cursor.checked_sub(1).unwrap_or(self.filtered.len() - 1);
                    self.selection.school = self.filtered[self.cursor];
                    self.rebuild();
                }
                KeyCode::Down if !self.filtered.is_empty() => {
                    self.cursor = (self.cursor + 1) % self.filtered.len();
                    self.selection.school = self.filtered[self.cursor];
                    self.rebuild();
                }
                KeyCode::Backspace => {
                    self.filter.pop();
                    self.apply_filter();
                }
                KeyCode::Char(c) => {
                    self.filter.push(c);
                    self.apply_filter();
                }
                _ => {}
            }
        }
    }

    /// Recomputes the filtered label list and keeps the selection on a
    /// visible row (first match when the current school drops out).
    fn apply_filter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();

        if self.filtered.is_empty() {
            // Keep the last valid selection; the list pane just goes empty.
            self.cursor = 0;
            return;
        }
        self.cursor = self
            .filtered
            .iter()
            .position(|&idx| idx == self.selection.school)
            .unwrap_or(0);
        self.selection.school = self.filtered[self.cursor];
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.view = ViewModel::build(self.population, &self.selection);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        // Chart heights are fixed; leftover space goes to the spacer so
        // panels do not stretch with the terminal.
        let [header_area, selector_area, subjects_area, composite_area, _spacer, help_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(8),
                Constraint::Length(18),
                Constraint::Length(12),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        self.draw_header(frame, header_area);

        let [metric_area, school_area] =
            Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)])
                .areas(selector_area);
        frame.render_widget(
            MetricSelector {
                metric: self.selection.metric,
            },
            metric_area,
        );
        frame.render_widget(
            SchoolSelector {
                labels: &self.labels,
                filtered: &self.filtered,
                cursor: self.cursor,
                filter: &self.filter,
            },
            school_area,
        );

        let subject_panes =
            Layout::horizontal([Constraint::Fill(1); 3]).split(subjects_area);
        for (panel, pane) in self.view.subjects.iter().zip(subject_panes.iter()) {
            frame.render_widget(
                SubjectPanelWidget {
                    panel,
                    metric: self.view.metric,
                },
                *pane,
            );
        }

        frame.render_widget(
            CompositePanelWidget {
                panel: &self.view.composite,
                metric: self.view.metric,
            },
            composite_area,
        );

        let help_text = Text::from(
            "↑/↓: School | ←/→: Metric | Type to filter | Backspace: Delete | Esc: Clear/Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let [title_area, warning_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let title = Line::from(format!(
            "{}  —  {} schools",
            self.view.school_label,
            self.population.len()
        ))
        .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        if let Some(warning) = &self.warning {
            let warning = Line::from(warning.as_str()).style(Style::default().fg(Color::Yellow));
            frame.render_widget(warning, warning_area);
        }
    }
}

struct MetricSelector {
    metric: MetricKind,
}

impl Widget for MetricSelector {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = MetricKind::ALL
            .iter()
            .map(|kind| ListItem::new(kind.display_name()))
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(Block::bordered().title("Metric"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(MetricKind::ALL.iter().position(|&kind| kind == self.metric));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct SchoolSelector<'a> {
    labels: &'a [String],
    filtered: &'a [usize],
    cursor: usize,
    filter: &'a str,
}

impl Widget for SchoolSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = if self.filter.is_empty() {
            "School".to_string()
        } else {
            format!("School (filter: {})", self.filter)
        };

        let items = self
            .filtered
            .iter()
            .map(|&idx| ListItem::new(self.labels[idx].as_str()))
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(Block::bordered().title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        if !self.filtered.is_empty() {
            list_state.select(Some(self.cursor));
        }

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct SubjectPanelWidget<'a> {
    panel: &'a SubjectPanel,
    metric: MetricKind,
}

impl Widget for SubjectPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered().title(self.panel.subject.display_name());
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let [value_area, comparison_area, chart_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let metric_label = self.metric.display_name();
        let value_line = match self.panel.value {
            Some(value) => Line::from(format!("{metric_label}: {value:.2}"))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            None => Line::from(format!("{metric_label}: no data"))
                .style(Style::default().fg(Color::DarkGray)),
        };
        Widget::render(value_line, value_area, buf);

        Widget::render(comparison_line(self.panel.comparison.as_ref()), comparison_area, buf);

        match &self.panel.chart {
            Some(chart) => Widget::render(DistributionChartWidget { chart }, chart_area, buf),
            None => Widget::render(no_data_placeholder(), chart_area, buf),
        }
    }
}

struct CompositePanelWidget<'a> {
    panel: &'a CompositePanel,
    metric: MetricKind,
}

impl Widget for CompositePanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered().title("Composite score — all subjects");
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let [info_area, chart_area] =
            Layout::horizontal([Constraint::Length(44), Constraint::Fill(1)]).areas(inner);

        let info = Paragraph::new(vec![
            Line::from(format!(
                "Composite ({}): {:.2}",
                self.metric.display_name().to_lowercase(),
                self.panel.score
            ))
            .style(Style::default().add_modifier(Modifier::BOLD)),
            comparison_line(self.panel.comparison.as_ref()),
        ]);
        Widget::render(info, info_area, buf);

        match &self.panel.chart {
            Some(chart) => Widget::render(DistributionChartWidget { chart }, chart_area, buf),
            None => Widget::render(no_data_placeholder(), chart_area, buf),
        }
    }
}

struct DistributionChartWidget<'a> {
    chart: &'a DistributionChart,
}

impl Widget for DistributionChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [marker_area, bars_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        let marker = Line::from(self.chart.marker_label.as_str())
            .style(Style::default().fg(Color::Red));
        Widget::render(marker, marker_area, buf);

        let bars = self
            .chart
            .histogram
            .bins
            .iter()
            .enumerate()
            .map(|(idx, bin)| {
                let style = if idx == self.chart.marker_bin {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::LightBlue)
                };
                Bar::with_label("", bin.count)
                    .text_value(String::new())
                    .style(style)
            })
            .collect::<Vec<_>>();

        let chart = BarChart::new(bars)
            .block(
                Block::new()
                    .title(Line::from(self.chart.title.as_str()).centered())
                    .title_bottom(
                        Line::from(format!(
                            "{} · {}",
                            self.chart.x_label, self.chart.y_label
                        ))
                        .centered()
                        .style(Style::default().fg(Color::DarkGray)),
                    ),
            )
            .bar_width(1)
            .bar_gap(0);
        Widget::render(chart, bars_area, buf);
    }
}

fn comparison_line(comparison: Option<&wyniki_stats::comparison::Comparison>) -> Line<'static> {
    match comparison {
        Some(comparison) => Line::from(format!(
            "{} of {} schools ({:.1}%) scored higher",
            comparison.higher,
            comparison.total,
            comparison.percentage()
        )),
        None => Line::from("No data to compare").style(Style::default().fg(Color::DarkGray)),
    }
}

fn no_data_placeholder() -> Paragraph<'static> {
    Paragraph::new("No data to display")
        .style(Style::default().fg(Color::DarkGray))
        .centered()
}

#[cfg(test)]
mod tests {
    use wyniki_dataset::SchoolRecord;

    use super::*;

    fn school(name: &str, polish_mean: Option<f32>) -> SchoolRecord {
        SchoolRecord {
            district: "Warszawa".to_string(),
            school_name: name.to_string(),
            settlement: "Warszawa".to_string(),
            mean_polski: polish_mean,
            median_polski: None,
            mean_matematyka: None,
            median_matematyka: None,
            mean_angielski: None,
            median_angielski: None,
        }
    }

    fn static_population(records: Vec<SchoolRecord>) -> &'static Population {
        Box::leak(Box::new(Population::from_records(records)))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(crossterm::event::KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_filter_narrows_school_list() {
        let population = static_population(vec![
            school("SP ALFA", Some(50.0)),
            school("SP BETA", Some(60.0)),
            school("LO GAMMA", Some(70.0)),
        ]);
        let mut screen = BrowseScreen::new(population, "SP ALFA - Warszawa");

        for c in "lo".chars() {
            screen.handle_event(&key(KeyCode::Char(c)));
        }
        assert_eq!(screen.filtered, vec![2]);
        assert_eq!(screen.selection.school, 2);
        assert_eq!(screen.view.school_label, "LO GAMMA - Warszawa");
    }

    #[test]
    fn test_escape_clears_filter_before_quitting() {
        let population = static_population(vec![school("SP ALFA", Some(50.0))]);
        let mut screen = BrowseScreen::new(population, "SP ALFA - Warszawa");

        screen.handle_event(&key(KeyCode::Char('x')));
        assert!(screen.filtered.is_empty());

        screen.handle_event(&key(KeyCode::Esc));
        assert!(!screen.should_exit());
        assert_eq!(screen.filtered, vec![0]);

        screen.handle_event(&key(KeyCode::Esc));
        assert!(screen.should_exit());
    }

    #[test]
    fn test_arrow_keys_wrap_school_selection() {
        let population = static_population(vec![
            school("SP 1", Some(50.0)),
            school("SP 2", Some(60.0)),
        ]);
        let mut screen = BrowseScreen::new(population, "SP 1 - Warszawa");

        screen.handle_event(&key(KeyCode::Up));
        assert_eq!(screen.selection.school, 1);
        screen.handle_event(&key(KeyCode::Down));
        assert_eq!(screen.selection.school, 0);
    }

    #[test]
    fn test_metric_toggle_rebuilds_view() {
        let mut a = school("SP 1", Some(50.0));
        a.median_polski = Some(45.0);
        let population = static_population(vec![a]);
        let mut screen = BrowseScreen::new(population, "SP 1 - Warszawa");
        assert_eq!(screen.view.subjects[0].value, Some(50.0));

        screen.handle_event(&key(KeyCode::Right));
        assert_eq!(screen.selection.metric, MetricKind::Median);
        assert_eq!(screen.view.subjects[0].value, Some(45.0));
    }

    #[test]
    fn test_empty_filter_keeps_previous_view() {
        let population = static_population(vec![school("SP 1", Some(50.0))]);
        let mut screen = BrowseScreen::new(population, "SP 1 - Warszawa");
        let before = screen.view.clone();

        screen.handle_event(&key(KeyCode::Char('z')));
        assert!(screen.filtered.is_empty());
        assert_eq!(screen.view, before);
    }
}
