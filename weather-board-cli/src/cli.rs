use std::{fs, io::Write, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use weather_board_core::{Config, Measurement, Orientation, TemplateFields, WeatherPlugin};

use crate::payload::PayloadRenderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-board", version, about = "Open-Meteo weather board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set location and display settings.
    Configure,

    /// Fetch the weather and print the board contents.
    Show {
        #[command(flatten)]
        location: LocationArgs,

        /// Print the template fields as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build the render payload for the external renderer.
    Render {
        #[command(flatten)]
        location: LocationArgs,

        /// Write the payload here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Coordinates overriding the configured ones.
#[derive(Debug, clap::Args)]
pub struct LocationArgs {
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,
}

impl LocationArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(lat) = self.latitude {
            config.settings.latitude = Some(lat);
        }
        if let Some(long) = self.longitude {
            config.settings.longitude = Some(long);
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => {
                let mut config = Config::load()?;
                location.apply(&mut config);

                let plugin = WeatherPlugin::from_config(&config);
                let fields = plugin
                    .template_fields(&config.settings, &config.device)
                    .await
                    .context("Failed to build weather board")?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&fields)?);
                } else {
                    print!("{}", format_board(&fields));
                }
                Ok(())
            }
            Command::Render { location, output } => {
                let mut config = Config::load()?;
                location.apply(&mut config);

                let plugin = WeatherPlugin::from_config(&config);
                let payload = plugin
                    .generate_image(&config.settings, &config.device, &PayloadRenderer)
                    .await
                    .context("Failed to render weather board")?;

                match output {
                    Some(path) => {
                        fs::write(&path, &payload).with_context(|| {
                            format!("Failed to write payload: {}", path.display())
                        })?;
                        log::info!("wrote {} bytes to {}", payload.len(), path.display());
                    }
                    None => std::io::stdout()
                        .write_all(&payload)
                        .context("Failed to write payload to stdout")?,
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut latitude = CustomType::<f64>::new("Latitude:");
    if let Some(lat) = config.settings.latitude {
        latitude = latitude.with_default(lat);
    }
    let mut longitude = CustomType::<f64>::new("Longitude:");
    if let Some(long) = config.settings.longitude {
        longitude = longitude.with_default(long);
    }
    config.settings.latitude = Some(latitude.prompt()?);
    config.settings.longitude = Some(longitude.prompt()?);

    let timezone = Text::new("Fallback timezone (e.g. Europe/Berlin, empty for UTC):")
        .with_default(config.device.timezone.as_deref().unwrap_or(""))
        .prompt()?;
    config.device.timezone = Some(timezone.trim().to_string()).filter(|tz| !tz.is_empty());

    let (width, height) = config.device.resolution;
    let width = CustomType::<u32>::new("Display width:").with_default(width).prompt()?;
    let height = CustomType::<u32>::new("Display height:").with_default(height).prompt()?;
    config.device.resolution = (width, height);

    let orientation = Select::new("Orientation:", vec!["horizontal", "vertical"]).prompt()?;
    config.device.orientation = match orientation {
        "vertical" => Orientation::Vertical,
        _ => Orientation::Horizontal,
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn format_measurement(m: &Measurement) -> String {
    match m {
        Measurement::Text(s) => s.clone(),
        Measurement::Integer(i) => i.to_string(),
        Measurement::Number(n) => n.to_string(),
        Measurement::Missing => "-".to_string(),
    }
}

fn format_board(fields: &TemplateFields) -> String {
    let mut out = format!(
        "{}  ({})\n{}{}  feels like {}\n\n",
        fields.current_date,
        fields.location,
        fields.current_temperature,
        fields.temperature_unit,
        fields.feels_like,
    );

    for day in &fields.forecast {
        out.push_str(&format!("{:<4} {:>3}° / {:>3}°\n", day.day, day.high, day.low));
    }
    out.push('\n');

    for hour in &fields.hourly_forecast {
        let rain = hour.precipitation.as_ref().map_or("-".to_string(), |r| format!("{r} mm"));
        out.push_str(&format!("{:>5}  {:>3}°  {rain}\n", hour.time, hour.temperature));
    }
    out.push('\n');

    for point in &fields.data_points {
        out.push_str(&format!(
            "{:<12} {} {}\n",
            point.label,
            format_measurement(&point.measurement),
            point.unit
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_board_core::{DataPoint, ForecastDay, HourlyEntry};

    #[test]
    fn location_args_override_config() {
        let mut config = Config::default();
        config.settings.latitude = Some(1.0);

        let args = LocationArgs {
            latitude: None,
            longitude: Some(-2.5),
        };
        args.apply(&mut config);

        assert_eq!(config.settings.latitude, Some(1.0));
        assert_eq!(config.settings.longitude, Some(-2.5));
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::parse_from([
            "weather-board",
            "show",
            "--latitude",
            "-33.87",
            "--longitude",
            "151.21",
        ]);
        match cli.command {
            Command::Show { location, json } => {
                assert_eq!(location.latitude, Some(-33.87));
                assert_eq!(location.longitude, Some(151.21));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn board_lists_days_hours_and_points() {
        let fields = TemplateFields {
            current_date: "Friday, January 05".into(),
            location: "52.52, 13.41".into(),
            current_temperature: "2".into(),
            feels_like: "–".into(),
            temperature_unit: "°C".into(),
            units: "metric".into(),
            current_day_icon: "icons/10d.png".into(),
            forecast: vec![ForecastDay {
                day: "Sat".into(),
                high: 3,
                low: -1,
                icon: "icons/10d.png".into(),
            }],
            hourly_forecast: vec![HourlyEntry {
                time: "9 AM".into(),
                temperature: 1,
                precipitation: None,
            }],
            data_points: vec![DataPoint {
                label: "Sunrise".into(),
                measurement: Measurement::Text("8:15".into()),
                unit: "AM".into(),
                icon: "icons/sunrise.png".into(),
            }],
        };

        let text = format_board(&fields);
        assert!(text.starts_with("Friday, January 05  (52.52, 13.41)\n2°C"));
        assert!(text.contains("Sat    3° /  -1°"));
        assert!(text.contains(" 9 AM    1°  -"));
        assert!(text.contains("Sunrise      8:15 AM"));
    }
}
