use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use inquire::{InquireError, Select};
use tokio::sync::mpsc;
use weathertime_core::{Credentials, LookupFlow, TimeLookup, WeatherLookup, location};

/// Which output region an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Weather,
    Time,
}

#[derive(Debug)]
struct Update {
    region: Region,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Weather,
    Time,
    SelectCity,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Weather => "Get weather",
            Action::Time => "Get time",
            Action::SelectCity => "Select city",
            Action::Quit => "Quit",
        })
    }
}

/// Interactive session: pick a city, trigger lookups, render the two
/// output regions. Lookup tasks never touch the terminal; each sends its
/// single update through the channel and the session loop renders it.
pub struct App {
    weather_flow: Arc<LookupFlow>,
    time_flow: Arc<LookupFlow>,
    updates_tx: mpsc::UnboundedSender<Update>,
    updates_rx: mpsc::UnboundedReceiver<Update>,
    city: Option<&'static str>,
    weather_text: String,
    time_text: String,
}

impl App {
    pub fn new(credentials: Credentials) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        Self {
            weather_flow: Arc::new(LookupFlow::new(Box::new(WeatherLookup), credentials.clone())),
            time_flow: Arc::new(LookupFlow::new(Box::new(TimeLookup), credentials)),
            updates_tx,
            updates_rx,
            city: None,
            weather_text: String::new(),
            time_text: String::new(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            self.drain_updates();
            self.render();

            match self.prompt_action()? {
                Action::Weather => self.trigger(Region::Weather).await,
                Action::Time => self.trigger(Region::Time).await,
                Action::SelectCity => self.select_city()?,
                Action::Quit => return Ok(()),
            }
        }
    }

    fn prompt_action(&self) -> Result<Action> {
        let options = vec![Action::Weather, Action::Time, Action::SelectCity, Action::Quit];

        match Select::new("Action:", options).prompt() {
            Ok(action) => Ok(action),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Action::Quit)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn select_city(&mut self) -> Result<()> {
        match Select::new("City:", location::CITIES.to_vec()).prompt() {
            Ok(city) => {
                self.city = Some(city);
                Ok(())
            }
            // Backing out keeps the current selection.
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Dispatch a lookup for the selected city. With no selection this is
    /// a no-op and both regions stay untouched.
    async fn trigger(&mut self, region: Region) {
        let Some(city) = self.city else { return };

        let flow = match region {
            Region::Weather => &self.weather_flow,
            Region::Time => &self.time_flow,
        };

        let tx = self.updates_tx.clone();
        Arc::clone(flow).dispatch(city.to_string(), move |text| {
            let _ = tx.send(Update { region, text });
        });

        // Wait for the next completion before re-rendering. With several
        // requests in flight the regions settle last-write-wins.
        if let Some(update) = self.updates_rx.recv().await {
            self.apply(update);
        }
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply(update);
        }
    }

    fn apply(&mut self, update: Update) {
        match update.region {
            Region::Weather => self.weather_text = update.text,
            Region::Time => self.time_text = update.text,
        }
    }

    fn render(&self) {
        println!();
        println!("City: {}", self.city.unwrap_or("(none selected)"));
        println!();
        println!("Weather");
        println!("-------");
        println!("{}", region_text(&self.weather_text));
        println!();
        println!("Local time");
        println!("----------");
        println!("{}", region_text(&self.time_text));
        println!();
    }
}

fn region_text(text: &str) -> &str {
    if text.is_empty() { "(no data)" } else { text }
}
