//! Plain-text rendering of a [`DisplayState`].

use std::fmt::Write;

use crate::{
    format::{format_date, icon_image_url, temperature_label},
    icon::map_icon,
    model::{Condition, DisplayState, TemperatureUnit},
};

/// Render the whole screen as text, one element per line.
pub fn render(state: &DisplayState) -> String {
    render_with(state, &format_date)
}

/// Same as [`render`], with an explicit date formatter.
pub fn render_with(state: &DisplayState, date: &dyn Fn(i64) -> Option<String>) -> String {
    let mut out = String::new();

    for candidate in &state.candidates {
        let _ = writeln!(out, "  {}", candidate.label());
    }

    let _ = writeln!(out, "[{}]", state.unit.label());

    if state.is_loading {
        out.push_str("Loading...\n");
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "{error}");
    }

    let Some(snapshot) = &state.snapshot else {
        return out;
    };

    let current = &snapshot.current;
    let _ = writeln!(
        out,
        "{} {}",
        state.resolved_city_label,
        date(current.timestamp).unwrap_or_default()
    );
    write_entry(&mut out, "", current.temperature_c, &current.conditions, state.unit);

    for day in &snapshot.daily {
        let _ = writeln!(out, "{}", date(day.timestamp).unwrap_or_default());
        write_entry(&mut out, "  ", day.day_temperature_c, &day.conditions, state.unit);
    }

    out
}

fn write_entry(
    out: &mut String,
    indent: &str,
    temperature_c: f64,
    conditions: &[Condition],
    unit: TemperatureUnit,
) {
    let condition = conditions.first();

    if let Some(class) = condition.map(|c| map_icon(&c.icon)).filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "{indent}({class})");
    }

    if let Some(c) = condition.filter(|c| !c.icon.is_empty()) {
        let _ = writeln!(out, "{indent}img: {}", icon_image_url(&c.icon));
    }

    let _ = writeln!(out, "{indent}{}", temperature_label(temperature_c, unit));

    if let Some(c) = condition.filter(|c| !c.description.is_empty()) {
        let _ = writeln!(out, "{indent}{}", c.description);
    }
}
