// src/models/restaurant.rs

//! Restaurant and Deal data structures.
//!
//! The upstream feed encodes numbers and booleans as strings
//! (`"discount": "45"`, `"dineIn": "true"`). Those quirks are resolved here,
//! at ingestion, so the rest of the crate only sees real integers and bools.

use chrono::{NaiveTime, Timelike};
use serde::Deserialize;
use serde_json::Value;

/// One establishment and its current offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    /// Unique object identifier, stable across requests
    pub object_id: String,

    pub name: String,

    /// Street address
    pub address1: String,

    pub suburb: String,

    /// Opening time as published (e.g. "11:00am")
    pub open: String,

    /// Closing time as published
    pub close: String,

    /// Cover image reference
    pub image_link: String,

    /// Cuisine tags, in feed order
    pub cuisines: Vec<String>,

    /// Deals, in feed order
    pub deals: Vec<Deal>,
}

impl Restaurant {
    /// Whether any deal is redeemable by dining in.
    pub fn has_dine_in_deal(&self) -> bool {
        self.deals.iter().any(|d| d.dine_in == Some(true))
    }

    /// Whether any deal is takeaway-only. Deals whose mode is unknown
    /// count as neither dine-in nor takeaway.
    pub fn has_takeaway_deal(&self) -> bool {
        self.deals.iter().any(|d| d.dine_in == Some(false))
    }

    /// Whether any deal is a lightning deal.
    pub fn has_lightning_deal(&self) -> bool {
        self.deals.iter().any(|d| d.lightning)
    }
}

/// A discount offer belonging to a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// List key only; carries no identity beyond its restaurant
    pub object_id: String,

    /// Discount percentage
    pub discount: u32,

    /// `Some(true)` for dine-in, `Some(false)` for takeaway,
    /// `None` when the feed omits or garbles the flag
    pub dine_in: Option<bool>,

    /// Featured ("lightning") deal
    pub lightning: bool,

    /// Validity window; `None` means anytime today
    pub window: Option<DealWindow>,

    /// Remaining redemptions
    pub qty_left: u32,
}

impl Deal {
    /// Whether the deal is redeemable at `time`. Deals without a window
    /// are live all day; windows that cannot be parsed are never live.
    pub fn is_live_at(&self, time: NaiveTime) -> bool {
        match &self.window {
            None => true,
            Some(window) => window.contains(time).unwrap_or(false),
        }
    }
}

/// The period during which a deal is valid.
///
/// The feed uses two interchangeable spellings for the same concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealWindow {
    OpenClose { open: String, close: String },
    StartEnd { start: String, end: String },
}

impl DealWindow {
    /// First and last published times, whichever spelling was used.
    pub fn bounds(&self) -> (&str, &str) {
        match self {
            DealWindow::OpenClose { open, close } => (open, close),
            DealWindow::StartEnd { start, end } => (start, end),
        }
    }

    /// Whether `time` falls inside the window, inclusive on both ends.
    /// Windows whose end is before their start wrap past midnight.
    /// Returns `None` when either bound is not a recognisable clock time.
    pub fn contains(&self, time: NaiveTime) -> Option<bool> {
        let (from, to) = self.bounds();
        let from = parse_clock(from)?;
        let to = parse_clock(to)?;
        // Minute precision, matching the published times.
        let time = time.with_second(0)?.with_nanosecond(0)?;

        Some(if from <= to {
            from <= time && time <= to
        } else {
            time >= from || time <= to
        })
    }
}

/// Parse a published clock time such as `"11:00am"`, `"3pm"`, `"9:30 PM"`
/// or `"17:45"`.
pub fn parse_clock(text: &str) -> Option<NaiveTime> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let (digits, meridiem) = if let Some(rest) = compact.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = compact.strip_suffix("pm") {
        (rest, Some(true))
    } else {
        (compact.as_str(), None)
    };

    let (hour, minute) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (digits.parse::<u32>().ok()?, 0),
    };

    let hour = match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

// --- Ingestion ---

/// Restaurant record as it appears in the feed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRestaurant {
    #[serde(default)]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub address1: Option<Value>,
    #[serde(default)]
    pub suburb: Option<Value>,
    #[serde(default)]
    pub open: Option<Value>,
    #[serde(default)]
    pub close: Option<Value>,
    #[serde(default)]
    pub image_link: Option<Value>,
    #[serde(default)]
    pub cuisines: Option<Value>,
    #[serde(default)]
    pub deals: Option<Value>,
}

/// Deal record as it appears in the feed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(default)]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub discount: Option<Value>,
    #[serde(default)]
    pub dine_in: Option<Value>,
    #[serde(default)]
    pub lightning: Option<Value>,
    #[serde(default)]
    pub qty_left: Option<Value>,
    #[serde(default)]
    pub open: Option<Value>,
    #[serde(default)]
    pub close: Option<Value>,
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
}

impl From<RawRestaurant> for Restaurant {
    fn from(raw: RawRestaurant) -> Self {
        Self {
            object_id: text(raw.object_id),
            name: text(raw.name),
            address1: text(raw.address1),
            suburb: text(raw.suburb),
            open: text(raw.open),
            close: text(raw.close),
            image_link: text(raw.image_link),
            cuisines: elements(raw.cuisines)
                .filter_map(|c| match c {
                    Value::String(c) if !c.trim().is_empty() => Some(c),
                    _ => None,
                })
                .collect(),
            deals: elements(raw.deals)
                .filter(Value::is_object)
                .filter_map(|d| serde_json::from_value::<RawDeal>(d).ok())
                .map(Deal::from)
                .collect(),
        }
    }
}

impl From<RawDeal> for Deal {
    fn from(raw: RawDeal) -> Self {
        let window = window_from(text(raw.open), text(raw.close))
            .map(|(open, close)| DealWindow::OpenClose { open, close })
            .or_else(|| {
                window_from(text(raw.start), text(raw.end))
                    .map(|(start, end)| DealWindow::StartEnd { start, end })
            });

        Self {
            object_id: text(raw.object_id),
            discount: parse_count(&text(raw.discount)),
            dine_in: parse_bool(&text(raw.dine_in)),
            lightning: parse_flag(&text(raw.lightning)),
            window,
            qty_left: parse_count(&text(raw.qty_left)),
        }
    }
}

fn window_from(first: String, second: String) -> Option<(String, String)> {
    if first.trim().is_empty() || second.trim().is_empty() {
        None
    } else {
        Some((first, second))
    }
}

/// Items of a list field; anything other than an array has none.
fn elements(value: Option<Value>) -> impl Iterator<Item = Value> {
    let items = match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    items.into_iter()
}

/// Render a loosely-typed scalar as text. Non-scalars become empty.
fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse a string-encoded boolean; only `"true"` (any case) is true.
pub fn parse_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

/// Parse a string-encoded boolean strictly: `"true"` or `"false"` (any case),
/// anything else is unknown.
pub fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a non-negative integer from the leading digits of `s`.
///
/// Mirrors the feed producer's lenient integer reading: leading whitespace
/// and a `+` sign are accepted, trailing garbage is ignored (`"45%"` is 45),
/// and anything unparseable or negative yields 0.
pub fn parse_count(s: &str) -> u32 {
    let s = s.trim_start();
    if s.starts_with('-') {
        return 0;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deal_from(value: Value) -> Deal {
        Deal::from(serde_json::from_value::<RawDeal>(value).unwrap())
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("45"), 45);
        assert_eq!(parse_count(" 20"), 20);
        assert_eq!(parse_count("30%"), 30);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("99999999999"), 0);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" False "), Some(false));
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("1"), None);
    }

    #[test]
    fn deal_parses_string_encoded_fields() {
        let deal = deal_from(json!({
            "objectId": "D1",
            "discount": "40",
            "dineIn": "true",
            "lightning": "false",
            "qtyLeft": "5"
        }));
        assert_eq!(deal.discount, 40);
        assert_eq!(deal.dine_in, Some(true));
        assert!(!deal.lightning);
        assert_eq!(deal.qty_left, 5);
        assert_eq!(deal.window, None);
    }

    #[test]
    fn deal_tolerates_numeric_and_missing_fields() {
        let deal = deal_from(json!({ "discount": 25 }));
        assert_eq!(deal.discount, 25);
        assert_eq!(deal.dine_in, None);
        assert!(!deal.lightning);
        assert_eq!(deal.object_id, "");
        assert_eq!(deal.qty_left, 0);
    }

    #[test]
    fn deal_window_prefers_open_close() {
        let deal = deal_from(json!({
            "open": "3:00pm", "close": "9:00pm",
            "start": "1:00pm", "end": "2:00pm"
        }));
        assert_eq!(
            deal.window,
            Some(DealWindow::OpenClose {
                open: "3:00pm".into(),
                close: "9:00pm".into()
            })
        );
    }

    #[test]
    fn deal_window_falls_back_to_start_end() {
        let deal = deal_from(json!({ "open": "3:00pm", "start": "1:00pm", "end": "2:00pm" }));
        assert_eq!(
            deal.window,
            Some(DealWindow::StartEnd {
                start: "1:00pm".into(),
                end: "2:00pm".into()
            })
        );
    }

    #[test]
    fn restaurant_defaults_missing_fields() {
        let raw: RawRestaurant = serde_json::from_value(json!({
            "objectId": "R1",
            "name": "Masala Theory"
        }))
        .unwrap();
        let restaurant = Restaurant::from(raw);
        assert_eq!(restaurant.object_id, "R1");
        assert!(restaurant.cuisines.is_empty());
        assert!(restaurant.deals.is_empty());
        assert_eq!(restaurant.suburb, "");
    }

    #[test]
    fn restaurant_keeps_well_formed_list_items() {
        let raw: RawRestaurant = serde_json::from_value(json!({
            "objectId": "R1",
            "cuisines": ["Thai", 7, null, "", "Vegan"],
            "deals": [null, "20", {"discount": "20"}, [1], {"discount": "35"}]
        }))
        .unwrap();
        let restaurant = Restaurant::from(raw);
        assert_eq!(restaurant.cuisines, vec!["Thai", "Vegan"]);
        let discounts: Vec<u32> = restaurant.deals.iter().map(|d| d.discount).collect();
        assert_eq!(discounts, vec![20, 35]);
    }

    #[test]
    fn restaurant_defaults_non_list_fields() {
        let raw: RawRestaurant = serde_json::from_value(json!({
            "objectId": "R1",
            "cuisines": "Italian",
            "deals": {"discount": "20"}
        }))
        .unwrap();
        let restaurant = Restaurant::from(raw);
        assert!(restaurant.cuisines.is_empty());
        assert!(restaurant.deals.is_empty());
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("11:00am"), NaiveTime::from_hms_opt(11, 0, 0));
        assert_eq!(parse_clock("12:00am"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_clock("12:30pm"), NaiveTime::from_hms_opt(12, 30, 0));
        assert_eq!(parse_clock("3pm"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_clock("9:30 PM"), NaiveTime::from_hms_opt(21, 30, 0));
        assert_eq!(parse_clock("17:45"), NaiveTime::from_hms_opt(17, 45, 0));
        assert_eq!(parse_clock("13pm"), None);
        assert_eq!(parse_clock("soon"), None);
    }

    #[test]
    fn window_contains_wraps_midnight() {
        let late = DealWindow::StartEnd {
            start: "9:00pm".into(),
            end: "1:00am".into(),
        };
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(late.contains(at(23, 15)), Some(true));
        assert_eq!(late.contains(at(0, 30)), Some(true));
        assert_eq!(late.contains(at(12, 0)), Some(false));
    }

    #[test]
    fn deal_liveness() {
        let at = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let anytime = deal_from(json!({ "discount": "10" }));
        assert!(anytime.is_live_at(at));

        let evening = deal_from(json!({ "open": "5:00pm", "close": "9:00pm" }));
        assert!(!evening.is_live_at(at));

        let garbled = deal_from(json!({ "open": "later", "close": "9:00pm" }));
        assert!(!garbled.is_live_at(at));
    }
}
