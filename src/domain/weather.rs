// Weather domain model for the header strip
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub code: u16,
    pub is_day: bool,
}

impl WeatherReading {
    pub fn description(&self) -> &'static str {
        describe_code(self.code)
    }

    pub fn summary(&self) -> String {
        format!(
            "{:.0}°C · {} · wind {:.0} km/h",
            self.temperature_c,
            self.description(),
            self.wind_speed_kmh
        )
    }
}

/// WMO weather interpretation codes
pub fn describe_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let reading = WeatherReading {
            temperature_c: 21.6,
            wind_speed_kmh: 9.2,
            code: 2,
            is_day: true,
        };
        assert_eq!(reading.summary(), "22°C · Partly cloudy · wind 9 km/h");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(describe_code(42), "Unknown");
        assert_eq!(describe_code(81), "Rain showers");
    }
}
