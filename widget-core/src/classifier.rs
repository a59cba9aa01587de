//! Display messages derived from a [`WeatherResult`].
//!
//! All functions here are pure except for the hour supplied by a [`Clock`].

use chrono::{Local, Timelike};

use crate::model::{CELSIUS, WeatherResult};

/// Source of the local wall-clock hour (0..=23).
pub trait Clock {
    fn hour(&self) -> u32;
}

/// Reads the hour from the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}

/// Canned sentences keyed by lowercase condition text.
const CONDITION_MESSAGES: &[(&str, &str)] = &[
    ("sunny", "It's a beautiful sunny day!"),
    ("partly cloudy", "Expect some clouds and sunshine today."),
    ("cloudy", "It's cloudy today. Be careful!"),
    ("overcast", "The sky is overcast."),
    ("rain", "It's raining. Bring an umbrella."),
    ("thunderstorm", "Thunderstorms are expected today."),
    ("snow", "Bundle up! It's snowing."),
    ("mist", "It's a misty day."),
    ("fog", "Fog is expected today."),
];

// Adding +0.0 turns -0.0 into 0.0 so it never renders as "-0".
fn display_temperature(temperature: f64) -> f64 {
    temperature + 0.0
}

/// Advice for a temperature. Only Celsius is classified; any other unit is
/// echoed back as `"{t}°{unit}"`.
pub fn temperature_message(temperature: f64, unit: &str) -> String {
    let t = display_temperature(temperature);

    if unit != CELSIUS {
        return format!("{t}°{unit}");
    }

    if t < 0.0 {
        format!("It's freezing at {t}°C! Bundle up!")
    } else if t < 10.0 {
        format!("It's quite cold at {t}°C. Wear warm clothes.")
    } else if t < 20.0 {
        format!("The temperature is {t}°C. Comfortable for a light jacket.")
    } else if t < 30.0 {
        format!("It's pleasant at {t}°C. Enjoy the nice weather!")
    } else {
        format!("It's hot at {t}°C. Stay hydrated!")
    }
}

/// Sentence for a condition label, matched case-insensitively. Unknown
/// labels come back unchanged.
pub fn weather_message(description: &str) -> String {
    let key = description.to_lowercase();

    CONDITION_MESSAGES
        .iter()
        .find(|(condition, _)| *condition == key)
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| description.to_string())
}

pub fn is_night(hour: u32) -> bool {
    !(6..18).contains(&hour)
}

pub fn location_message(location: &str, clock: &impl Clock) -> String {
    let when = if is_night(clock.hour()) { "at night" } else { "during the day" };
    format!("Weather for {location} {when}")
}

/// The three lines a front end shows for a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub temperature: String,
    pub condition: String,
    pub location: String,
}

pub fn summarize(result: &WeatherResult, clock: &impl Clock) -> Summary {
    Summary {
        temperature: temperature_message(result.temperature, &result.unit),
        condition: weather_message(&result.description),
        location: location_message(&result.location, clock),
    }
}
