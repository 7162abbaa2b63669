use shared_types::parse_timestamp;

/// Up to two uppercase initials, "?" for a blank name.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Short human date for list views; "Never" when missing, the raw value when
/// it cannot be parsed.
pub fn format_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => "Never".to_string(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

pub fn format_datetime(value: Option<&str>) -> String {
    match value.and_then(parse_timestamp) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => value.unwrap_or("").to_string(),
    }
}

/// Cuts to `max` characters, appending "..." when anything was removed.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Fixed-width text progress bar.
pub fn progress_bar(percent: f32, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// `tel:` URI with everything but digits stripped.
pub fn tel_uri(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("tel:{}", digits)
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}
