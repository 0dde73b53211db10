use airmap_core::{
    AirQualityMap, Config, HealthProfile, LocationCatalog, fetcher_from_config, offline_fetcher,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use std::fmt;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airmap", version, about = "Explore air quality around the world")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set API endpoints and the health profile.
    Configure,

    /// List the locations shown on the map.
    Locations,

    /// Show current air quality and the 5-day outlook for a location.
    Show {
        /// Location name, e.g. "Norway".
        name: String,

        /// Health profile for the forecast tip; overrides the configured one.
        #[arg(long)]
        profile: Option<String>,

        /// Skip the network and show synthesized values only.
        #[arg(long)]
        offline: bool,
    },

    /// Walk the map interactively: zoom, reset and select locations.
    Explore {
        #[arg(long)]
        profile: Option<String>,

        #[arg(long)]
        offline: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Locations => {
                let config = Config::load()?;
                let catalog = LocationCatalog::from_config(&config)?;
                print!("{}", render::catalog(&catalog));
                Ok(())
            }
            Command::Show { name, profile, offline } => {
                let map = build_map(profile.as_deref(), offline)?;
                let location = map.catalog().find(&name).cloned().ok_or_else(|| {
                    anyhow!(
                        "Unknown location '{name}'.\n\
                         Hint: run `airmap locations` to see what is on the map."
                    )
                })?;

                map.select_location(location).settled().await;
                let view = map.detail().context("Selection was cleared before it settled")?;
                print!("{}", render::detail(&view, map.profile(), render::today()));
                Ok(())
            }
            Command::Explore { profile, offline } => {
                let map = build_map(profile.as_deref(), offline)?;
                explore(&map).await
            }
        }
    }
}

fn build_map(profile: Option<&str>, offline: bool) -> Result<AirQualityMap> {
    let config = Config::load()?;

    let profile = match profile {
        Some(p) => HealthProfile::try_from(p)?,
        None => config.profile()?,
    };
    let catalog = LocationCatalog::from_config(&config)?;
    let fetcher = if offline { offline_fetcher() } else { fetcher_from_config(&config)? };

    Ok(AirQualityMap::new(catalog, fetcher, profile))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;
    let current = config.endpoints();

    let data = Text::new("Data API base URL:")
        .with_default(&current.data_api_base)
        .prompt()?;
    let forecast = Text::new("Forecast API base URL:")
        .with_default(&current.forecast_api_base)
        .prompt()?;

    let profiles = HealthProfile::all().to_vec();
    let current_profile = config.profile().unwrap_or_default();
    let cursor = profiles.iter().position(|p| *p == current_profile).unwrap_or(0);
    let profile = Select::new("Health profile:", profiles)
        .with_starting_cursor(cursor)
        .prompt()?;

    config.set_endpoints(data.trim().to_string(), forecast.trim().to_string());
    config.set_profile(profile);

    // Validate before writing so a typo doesn't get persisted.
    fetcher_from_config(&config)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ZoomIn,
    ZoomOut,
    ResetView,
    SelectLocation,
    BackToMap,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::ZoomIn => "Zoom in",
            Action::ZoomOut => "Zoom out",
            Action::ResetView => "Reset view",
            Action::SelectLocation => "Select a location",
            Action::BackToMap => "Back to map",
            Action::Quit => "Quit",
        })
    }
}

/// `None` when the user cancelled the prompt.
fn prompt_or_cancel<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn explore(map: &AirQualityMap) -> Result<()> {
    loop {
        println!("{}", render::viewport(&map.viewport()));

        let mut actions = vec![Action::ZoomIn, Action::ZoomOut, Action::ResetView, Action::SelectLocation];
        if map.detail().is_some() {
            actions.push(Action::BackToMap);
        }
        actions.push(Action::Quit);

        let Some(action) = prompt_or_cancel(Select::new("What next?", actions).prompt())? else {
            return Ok(());
        };

        match action {
            Action::ZoomIn => map.zoom_in(),
            Action::ZoomOut => map.zoom_out(),
            Action::ResetView => map.reset_view(),
            Action::BackToMap => map.deselect_location(),
            Action::Quit => return Ok(()),
            Action::SelectLocation => {
                let names: Vec<String> = map.catalog().iter().map(render::marker_label).collect();
                let Some(idx) =
                    prompt_or_cancel(Select::new("Location:", names).raw_prompt().map(|o| o.index))?
                else {
                    continue;
                };
                let Some(location) = map.catalog().iter().nth(idx).cloned() else {
                    continue;
                };

                map.select_location(location).settled().await;
                if let Some(view) = map.detail() {
                    print!("{}", render::detail(&view, map.profile(), render::today()));
                }
            }
        }
    }
}
