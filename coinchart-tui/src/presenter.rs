//! Full-screen terminal presenter.
//!
//! Takes over the terminal (raw mode + alternate screen), draws the price
//! chart, redraws on resize, and hands the terminal back once the user
//! closes the chart.

use std::io;

use coinchart_core::domain::PriceSeries;
use coinchart_core::presenter::{render_failure, PricePresenter};
use coinchart_core::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::debug;

use crate::panels::{PriceChartPanel, PriceChartView};
use crate::theme::Theme;

#[derive(Debug, Default)]
pub struct TerminalPresenter {
    theme: Theme,
}

impl TerminalPresenter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn show(&self, view: &PriceChartView) -> io::Result<()> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let result = Terminal::new(CrosstermBackend::new(io::stdout())).and_then(|mut terminal| {
            let outcome = self.run(&mut terminal, view);
            terminal.show_cursor().and(outcome)
        });

        // Restore even when drawing failed; report the first error.
        let restored = execute!(io::stdout(), LeaveAlternateScreen).and(disable_raw_mode());
        result.and(restored)
    }

    fn run<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        view: &PriceChartView,
    ) -> io::Result<()> {
        terminal.clear()?;
        loop {
            self.draw(terminal, view)?;
            if let Event::Key(key) = event::read()? {
                if is_close_key(key) {
                    debug!("chart closed");
                    return Ok(());
                }
            }
        }
    }

    /// Draw one frame of `view` onto `terminal`.
    pub fn draw<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        view: &PriceChartView,
    ) -> io::Result<()> {
        terminal.draw(|f| f.render_widget(PriceChartPanel::new(view, &self.theme), f.area()))?;
        Ok(())
    }
}

impl PricePresenter for TerminalPresenter {
    fn present(
        &mut self,
        series: &PriceSeries,
        asset_label: &str,
        period_label: &str,
    ) -> Result<()> {
        let view = PriceChartView::prepare(series, asset_label, period_label)?;
        debug!(title = %view.title, points = view.points.len(), "showing chart");
        self.show(&view).map_err(render_failure)
    }
}

/// Keys that dismiss the chart.
pub fn is_close_key(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinchart_core::domain::Timestamp;
    use coinchart_core::ErrorKind;
    use ratatui::backend::TestBackend;

    #[test]
    fn close_keys() {
        assert!(is_close_key(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_close_key(KeyEvent::from(KeyCode::Esc)));
        assert!(is_close_key(KeyEvent::from(KeyCode::Enter)));
        assert!(is_close_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn other_keys_keep_the_chart_open() {
        assert!(!is_close_key(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_close_key(KeyEvent::from(KeyCode::Left)));
        assert!(!is_close_key(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(!is_close_key(key));
    }

    #[test]
    fn invalid_series_fails_before_touching_the_terminal() {
        let mut presenter = TerminalPresenter::default();
        let series = PriceSeries::new(vec![Timestamp::EpochMillis(1)], vec![]);

        let err = presenter.present(&series, "bitcoin", "7 days").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataValidation);
    }

    #[test]
    fn draw_renders_into_any_backend() {
        let presenter = TerminalPresenter::default();
        let series = PriceSeries::new(
            vec![Timestamp::Label("a".into()), Timestamp::Label("b".into())],
            vec![1.0, 2.0],
        );
        let view = PriceChartView::prepare(&series, "bitcoin", "2 days").unwrap();
        let mut terminal = Terminal::new(TestBackend::new(60, 15)).unwrap();

        presenter.draw(&mut terminal, &view).unwrap();

        let buffer = terminal.backend().buffer();
        let top_row: String = (0..60u16)
            .map(|x| buffer[(x, 0u16)].symbol().to_string())
            .collect();
        assert!(top_row.contains("Bitcoin price over 2 days"), "{top_row}");
    }
}
