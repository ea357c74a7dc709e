//! Display helpers shared by the CLI and MCP surfaces.

/// Format an integer with Indian digit grouping.
///
/// The last three digits form one group and every group above it has two
/// digits: `1234567` becomes `12,34,567`.
///
/// ```
/// use cropsense::core::format::format_indian;
///
/// assert_eq!(format_indian(2250), "2,250");
/// assert_eq!(format_indian(123456), "1,23,456");
/// assert_eq!(format_indian(999), "999");
/// ```
pub fn format_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Rupee amount with Indian grouping, e.g. `₹2,250`.
pub fn format_rupees(value: u64) -> String {
    format!("₹{}", format_indian(value))
}

/// The one-line summary shown under the price chart.
pub fn market_summary(path: [&str; 3], crop: &str, latest: u32) -> String {
    let [state, district, market] = path;
    format!(
        "Latest price for {} at {}, {}, {}: {}/qtl",
        crop,
        market,
        district,
        state,
        format_rupees(u64::from(latest))
    )
}

/// Emoji shown next to a crop name. Unknown crops get a seedling.
pub fn crop_emoji(crop: &str) -> &'static str {
    match crop {
        "Wheat" => "🌾",
        "Rice" | "Paddy" => "🍚",
        "Maize" => "🌽",
        "Sugarcane" => "🧃",
        "Cotton" => "🧵",
        "Pulses" | "Soybean" => "🫘",
        "Groundnut" => "🥜",
        "Sunflower" => "🌻",
        "Jute" => "🌿",
        "Potato" => "🥔",
        _ => "🌱",
    }
}
