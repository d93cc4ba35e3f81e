// Channel catalogue for the energy and water-quality tables
use super::metric::MetricCategory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub column: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub category: MetricCategory,
    pub color: Option<&'static str>,
}

const fn channel(
    column: &'static str,
    title: &'static str,
    unit: &'static str,
    category: MetricCategory,
    color: Option<&'static str>,
) -> Channel {
    Channel {
        column,
        title,
        unit,
        category,
        color,
    }
}

pub const SOLAR_COLOR: &str = "#FFB300";
pub const BIOGAS_COLOR: &str = "#8D6E63";
pub const WIND_COLOR: &str = "#29B6F6";
pub const TEMPERATURE_COLOR: &str = "#EF5350";
pub const HUMIDITY_COLOR: &str = "#5C6BC0";

pub const ENERGY_CHANNELS: &[Channel] = &[
    channel("solar", "Solar Generation", "kWh", MetricCategory::Generation, Some(SOLAR_COLOR)),
    channel("wind", "Wind Generation", "kWh", MetricCategory::Generation, Some(WIND_COLOR)),
    channel("biogas", "Biogas Generation", "kWh", MetricCategory::Generation, Some(BIOGAS_COLOR)),
    channel("pumps", "Pumps", "kWh", MetricCategory::Consumption, None),
    channel("lighting", "Lighting", "kWh", MetricCategory::Consumption, None),
    channel("climate_control", "Climate Control", "kWh", MetricCategory::Consumption, None),
    channel("other_operations", "Other Operations", "kWh", MetricCategory::Consumption, None),
];

pub const WATER_CHANNELS: &[Channel] = &[
    channel("temperature", "Temperature", "°C", MetricCategory::WaterQuality, Some(TEMPERATURE_COLOR)),
    channel("humidity", "Humidity", "%", MetricCategory::WaterQuality, Some(HUMIDITY_COLOR)),
    channel("ph", "pH", "", MetricCategory::WaterQuality, None),
    channel("orp", "ORP", "mV", MetricCategory::WaterQuality, None),
    channel("ec", "Conductivity", "µS/cm", MetricCategory::WaterQuality, None),
    channel("tds", "TDS", "ppm", MetricCategory::WaterQuality, None),
    channel("do", "Dissolved Oxygen", "mg/L", MetricCategory::WaterQuality, None),
];

/// Energy sources plotted on the generation chart and the composition pie.
pub const GENERATION_SOURCES: [&str; 3] = ["solar", "biogas", "wind"];

/// Water parameters plotted on the temperature & humidity chart.
pub const CLIMATE_PARAMETERS: [&str; 2] = ["temperature", "humidity"];

/// Columns the energy table must carry for the dashboard to render.
pub const ENERGY_REQUIRED: &[&str] = &GENERATION_SOURCES;

/// Columns the water-quality table must carry for the dashboard to render.
pub const WATER_REQUIRED: &[&str] = &CLIMATE_PARAMETERS;

pub fn color_for(column: &str) -> Option<&'static str> {
    ENERGY_CHANNELS
        .iter()
        .chain(WATER_CHANNELS)
        .find(|c| c.column == column)
        .and_then(|c| c.color)
}
