use super::notion::{Notion, NotionSet};
use super::observation::Observation;

/// Builds the reply lines for the requested notions.
///
/// The observation phrase always leads when present. Temperature and wind
/// lines appear only when requested (directly or through `weather`) and
/// measured. An empty vector means there is nothing worth answering.
pub fn compose_answer(observation: &Observation, notions: &NotionSet) -> Vec<String> {
    let notions = notions.expanded();
    let mut lines = Vec::new();

    if let Some(phrase) = observation.phrase.as_deref().filter(|p| !p.is_empty()) {
        lines.push(phrase.to_string());
    }

    if notions.contains(Notion::Temperature) {
        if let Some(t) = &observation.temperature {
            lines.push(format!(
                "temperature: {} (feels like: {})",
                t.value_label(),
                t.feel_label()
            ));
        }
    }

    if notions.contains(Notion::WindSpeed) {
        if let Some(w) = &observation.wind {
            lines.push(format!("wind: {} {}", w.direction, w.speed_label()));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weather::observation::{Precipitation, Temperature, UnitSystem, Wind};

    fn observation() -> Observation {
        Observation {
            phrase: Some("Partly Cloudy".into()),
            temperature: Some(Temperature {
                value: 14.0,
                feels_like: 12.0,
                units: UnitSystem::Metric,
            }),
            wind: Some(Wind {
                speed: 19.0,
                direction: "NW".into(),
                units: UnitSystem::Metric,
            }),
            precipitation: Precipitation::default(),
            pressure: Some(1016.2),
            visibility: Some(16.1),
            units: UnitSystem::Metric,
        }
    }

    fn notions(items: &[Notion]) -> NotionSet {
        items.iter().copied().collect()
    }

    #[test]
    fn weather_notion_yields_temperature_and_wind() {
        let lines = compose_answer(&observation(), &notions(&[Notion::Weather]));
        assert_eq!(
            lines,
            vec![
                "Partly Cloudy",
                "temperature: 14°C (feels like: 12°C)",
                "wind: NW 19 km/h",
            ]
        );
    }

    #[test]
    fn only_requested_lines_are_included() {
        let lines = compose_answer(&observation(), &notions(&[Notion::Temperature]));
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("temperature:"));

        let lines = compose_answer(&observation(), &notions(&[Notion::WindSpeed]));
        assert_eq!(lines, vec!["Partly Cloudy", "wind: NW 19 km/h"]);
    }

    #[test]
    fn no_notions_still_reports_phrase() {
        let lines = compose_answer(&observation(), &NotionSet::new());
        assert_eq!(lines, vec!["Partly Cloudy"]);
    }

    #[test]
    fn unmeasured_readings_are_skipped() {
        let mut obs = observation();
        obs.phrase = None;
        obs.temperature = None;
        obs.wind = None;
        assert!(compose_answer(&obs, &notions(&[Notion::Weather])).is_empty());
    }
}
