//! Interactive menu loop.
//!
//! Menu actions:
//! - `1` pick an asset from the provider's catalog
//! - `2` set the lookback period in days
//! - `3` fetch and chart the selected asset over the selected period
//! - `4` exit
//!
//! API, validation and empty-data failures are printed and the loop goes on.
//! Chart failures end the loop with an error.

use anyhow::Result;
use coinchart_core::data::MarketDataProvider;
use coinchart_core::domain::{AssetId, LookbackDays};
use coinchart_core::presenter::PricePresenter;
use coinchart_core::DashboardError;
use std::io::Write;
use std::str::FromStr;
use tracing::{info, warn};

use crate::prompt::{LineInput, Prompt};
use crate::session::Session;

pub const CHOICE_PROMPT: &str = "\nChoose an action: ";
pub const ASSET_PROMPT: &str = "Enter cryptocurrency name: ";
pub const PERIOD_PROMPT: &str = "Enter number of days to analyse (e.g. 7, 14, 30): ";
pub const GOODBYE: &str = "Goodbye!";
pub const INTERRUPT_GOODBYE: &str = "Exiting. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SelectAsset,
    SetPeriod,
    Render,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim() {
            "1" => Ok(Self::SelectAsset),
            "2" => Ok(Self::SetPeriod),
            "3" => Ok(Self::Render),
            "4" => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Requested,
    Interrupted,
    EndOfInput,
}

enum Step {
    Continue,
    Stop(Exit),
}

/// Menu wiring: where data comes from, where charts and text go.
pub struct Menu<'a, P, R, I, W> {
    pub provider: &'a P,
    pub presenter: &'a mut R,
    pub prompt: &'a mut I,
    pub out: &'a mut W,
}

impl<'a, P, R, I, W> Menu<'a, P, R, I, W>
where
    P: MarketDataProvider,
    R: PricePresenter,
    I: Prompt,
    W: Write,
{
    /// Run until the user exits, input ends, or a chart fails to render.
    ///
    /// Every exit path prints a goodbye.
    pub fn run(&mut self, session: &mut Session) -> Result<Exit> {
        writeln!(self.out, "Welcome to CoinChart!")?;
        loop {
            self.print_menu()?;
            let step = match self.read(CHOICE_PROMPT)? {
                Ok(line) => match line.parse::<MenuChoice>() {
                    Ok(MenuChoice::SelectAsset) => self.select_asset(session)?,
                    Ok(MenuChoice::SetPeriod) => self.set_period(session)?,
                    Ok(MenuChoice::Render) => self.render(session)?,
                    Ok(MenuChoice::Exit) => Step::Stop(Exit::Requested),
                    Err(()) => {
                        writeln!(self.out, "Error: invalid choice. Try again.")?;
                        Step::Continue
                    }
                },
                Err(exit) => Step::Stop(exit),
            };

            if let Step::Stop(exit) = step {
                self.say_goodbye(exit)?;
                return Ok(exit);
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- CoinChart ---")?;
        writeln!(self.out, "1. Select cryptocurrency")?;
        writeln!(self.out, "2. Set analysis period")?;
        writeln!(self.out, "3. Render chart")?;
        writeln!(self.out, "4. Exit")?;
        self.out.flush()?;
        Ok(())
    }

    /// A typed line, or the exit it stands for.
    fn read(&mut self, prompt: &str) -> Result<std::result::Result<String, Exit>> {
        Ok(match self.prompt.read_line(prompt)? {
            LineInput::Line(line) => Ok(line),
            LineInput::Interrupted => Err(Exit::Interrupted),
            LineInput::Eof => Err(Exit::EndOfInput),
        })
    }

    fn select_asset(&mut self, session: &mut Session) -> Result<Step> {
        let catalog = match self.provider.fetch_supported_assets() {
            Ok(catalog) => catalog,
            Err(err) => {
                return self.recover(err, "Error loading the list of supported cryptocurrencies")
            }
        };

        let line = match self.read(ASSET_PROMPT)? {
            Ok(line) => line,
            Err(exit) => return Ok(Step::Stop(exit)),
        };

        match AssetId::parse(&line) {
            Ok(asset) if catalog.contains(&asset) => {
                writeln!(self.out, "Selected: {}", asset.display_name())?;
                info!(asset = %asset, "asset selected");
                session.asset = Some(asset);
            }
            _ => {
                writeln!(
                    self.out,
                    "Error: the selected cryptocurrency is not available. Try again."
                )?;
                session.asset = None;
            }
        }
        Ok(Step::Continue)
    }

    fn set_period(&mut self, session: &mut Session) -> Result<Step> {
        let line = match self.read(PERIOD_PROMPT)? {
            Ok(line) => line,
            Err(exit) => return Ok(Step::Stop(exit)),
        };

        match line.parse::<LookbackDays>() {
            Ok(days) => {
                writeln!(self.out, "Selected: {}", days.label())?;
                info!(days = days.get(), "period selected");
                session.period = Some(days);
            }
            Err(err) => writeln!(self.out, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn render(&mut self, session: &Session) -> Result<Step> {
        let Some((asset, days)) = session.ready() else {
            writeln!(
                self.out,
                "Error: select a cryptocurrency and set the analysis period first."
            )?;
            return Ok(Step::Continue);
        };

        writeln!(self.out, "Fetching data...")?;
        self.out.flush()?;

        let outcome = self
            .provider
            .fetch_market_chart(asset, days)
            .and_then(|series| {
                self.presenter
                    .present(&series, asset.as_str(), &days.label())
            });
        match outcome {
            Ok(()) => Ok(Step::Continue),
            Err(err) => self.recover(err, "Error"),
        }
    }

    /// Print a recoverable error and keep going; anything else ends the loop.
    fn recover(&mut self, err: DashboardError, context: &str) -> Result<Step> {
        if !err.is_recoverable() {
            return Err(err.into());
        }
        warn!(error = %err, kind = ?err.kind(), "menu action failed");
        writeln!(self.out, "{context}: {err}")?;
        Ok(Step::Continue)
    }

    fn say_goodbye(&mut self, exit: Exit) -> Result<()> {
        match exit {
            Exit::Interrupted => writeln!(self.out, "{INTERRUPT_GOODBYE}")?,
            Exit::Requested | Exit::EndOfInput => writeln!(self.out, "{GOODBYE}")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_parse_with_surrounding_whitespace() {
        assert_eq!(" 1 ".parse::<MenuChoice>(), Ok(MenuChoice::SelectAsset));
        assert_eq!("2".parse::<MenuChoice>(), Ok(MenuChoice::SetPeriod));
        assert_eq!("3\n".parse::<MenuChoice>(), Ok(MenuChoice::Render));
        assert_eq!("4".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
    }

    #[test]
    fn anything_else_is_invalid() {
        for input in ["", "0", "5", "one", "1 2"] {
            assert_eq!(input.parse::<MenuChoice>(), Err(()), "{input:?}");
        }
    }
}
