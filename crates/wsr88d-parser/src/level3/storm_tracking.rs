//! Storm Tracking Information (product 58).
//!
//! The product is a graphic product message whose useful content is text:
//! graphic-block pages list up to six storms per page under a `STORM ID`
//! row, and tabular pages titled `STORM POSITION/FORECAST` list one storm
//! per row. Both are merged into one record per storm id; the first value
//! seen for a field wins. The adaptation parameter page is read into typed
//! values keyed by label text.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::graphic::GraphicProductMessage;
use super::header::Level3MessageHeader;
use crate::cursor::Cursor;
use crate::error::DecodeResult;

pub const STORM_TRACKING_PRODUCT_CODE: i16 = 58;

const STORM_ID_LABEL: &str = "STORM ID";
const POSITION_FORECAST_TITLE: &str = "STORM POSITION/FORECAST";
const ADAPTATION_TITLE: &str = "STORM TRACKING ADAPTATION PARAMETERS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StiPosition {
    /// Degrees
    pub azimuth: Option<f32>,
    /// Nautical miles
    pub range: Option<f32>,
}

impl StiPosition {
    fn merge(&mut self, other: StiPosition) {
        set_once(&mut self.azimuth, other.azimuth);
        set_once(&mut self.range, other.range);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StiRecord {
    pub current_position: StiPosition,
    /// Degrees the storm is moving toward
    pub direction: Option<f32>,
    /// Knots
    pub speed: Option<f32>,
    /// 15, 30, 45 and 60 minute forecasts
    pub forecast_positions: [StiPosition; 4],
    /// Nautical miles
    pub forecast_error: Option<f32>,
    /// Nautical miles
    pub mean_error: Option<f32>,
    pub max_dbz: Option<i16>,
    /// Thousands of feet
    pub max_dbz_height: Option<f32>,
}

/// Values from the `STORM TRACKING ADAPTATION PARAMETERS` page. Each entry
/// on the page reads `<value> [(UNIT)] <LABEL>`, two entries per line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StiAdaptationParameters {
    /// Degrees, used when a storm has no motion history
    pub default_direction: Option<u16>,
    /// Knots
    pub default_speed: Option<f32>,
    /// Knots
    pub minimum_speed_threshold: Option<f32>,
    /// Minutes
    pub maximum_time: Option<u16>,
    /// Minutes
    pub forecast_interval: Option<u16>,
    pub number_of_past_volumes: Option<u16>,
    pub number_of_intervals: Option<u16>,
    /// Kilometers
    pub allowable_error: Option<f32>,
    /// Minutes
    pub error_interval: Option<u16>,
    /// Meters per second
    pub correlation_speed: Option<f32>,
    pub median_filter: Option<bool>,
    pub filter_kernel_size: Option<f32>,
    pub filter_fraction: Option<f32>,
    /// Entries with a label not listed above, value text by label
    pub other: BTreeMap<String, String>,
}

impl StiAdaptationParameters {
    fn set(&mut self, label: &str, value: &str) {
        let float = || value.parse::<f32>().ok();
        let whole = || value.parse::<f32>().ok().map(|v| v.round() as u16);

        match label {
            "DEFAULT (DIRECTION)" => self.default_direction = whole(),
            "DEFAULT (SPEED)" => self.default_speed = float(),
            "THRESH (MINIMUM SPEED)" => self.minimum_speed_threshold = float(),
            "TIME (MAXIMUM)" | "THRESH (MAXIMUM TIME)" => self.maximum_time = whole(),
            "FORECAST INTERVAL" => self.forecast_interval = whole(),
            "NUMBER OF PAST VOLUMES" => self.number_of_past_volumes = whole(),
            "NUMBER OF INTERVALS" => self.number_of_intervals = whole(),
            "ALLOWABLE ERROR" => self.allowable_error = float(),
            "ERROR INTERVAL" => self.error_interval = whole(),
            "CORRELATION SPEED" => self.correlation_speed = float(),
            "MEDIAN FILTER" | "MEDIAN FILTER (ON/OFF)" => {
                self.median_filter = match value {
                    "ON" | "YES" => Some(true),
                    "OFF" | "NO" => Some(false),
                    _ => None,
                }
            }
            "FILTER KERNEL SIZE" => self.filter_kernel_size = float(),
            "FILTER FRACTION" => self.filter_fraction = float(),
            _ => {
                self.other.insert(label.to_owned(), value.to_owned());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormTrackingInformationMessage {
    pub product: GraphicProductMessage,
    pub records: BTreeMap<String, StiRecord>,
    /// Present when the tabular block carries an adaptation parameter page
    pub adaptation_parameters: Option<StiAdaptationParameters>,
}

impl StormTrackingInformationMessage {
    pub fn parse(c: &mut Cursor, header: Level3MessageHeader) -> DecodeResult<Self> {
        let product = GraphicProductMessage::parse(c, header)?;
        Ok(Self::from_product(product))
    }

    pub fn from_product(product: GraphicProductMessage) -> Self {
        let mut records = BTreeMap::new();
        let mut adaptation_parameters = None;

        if let Some(graphic) = &product.graphic {
            for page in &graphic.pages {
                parse_graphic_page(&page.lines(), &mut records);
            }
        }
        if let Some(tabular) = &product.tabular {
            for page in &tabular.pages {
                let lines: Vec<&str> = page.iter().map(String::as_str).collect();
                if lines.iter().any(|l| l.contains(POSITION_FORECAST_TITLE)) {
                    parse_tabular_page(&lines, &mut records);
                } else if adaptation_parameters.is_none()
                    && lines.iter().any(|l| l.contains(ADAPTATION_TITLE))
                {
                    adaptation_parameters = Some(parse_adaptation_page(&lines));
                }
            }
        }

        debug!(storms = records.len(), "Parsed storm tracking information");

        Self {
            product,
            records,
            adaptation_parameters,
        }
    }

    pub fn record(&self, storm_id: &str) -> Option<&StiRecord> {
        self.records.get(storm_id)
    }

    pub fn storm_ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Splits a text line into value tokens, joining `a/ b` pairs and
/// `NO DATA` into single tokens.
fn tokens(line: &str) -> Vec<String> {
    let mut s = line.replace("NO DATA", "NODATA");
    while s.contains("/ ") {
        s = s.replace("/ ", "/");
    }
    while s.contains(" /") {
        s = s.replace(" /", "/");
    }
    s.split_whitespace().map(str::to_owned).collect()
}

fn parse_pair(token: &str) -> (Option<f32>, Option<f32>) {
    match token.split_once('/') {
        Some((a, b)) => (a.trim().parse().ok(), b.trim().parse().ok()),
        None => (None, None),
    }
}

fn parse_position(token: Option<&String>) -> StiPosition {
    let (azimuth, range) = token.map(|t| parse_pair(t)).unwrap_or((None, None));
    StiPosition { azimuth, range }
}

fn is_storm_id(token: &str) -> bool {
    let b = token.as_bytes();
    b.len() == 2 && b[0].is_ascii_uppercase() && b[1].is_ascii_digit()
}

/// Graphic pages: a `STORM ID` row names the storm in each column, and the
/// following labeled rows carry one value per column.
fn parse_graphic_page(lines: &[&str], records: &mut BTreeMap<String, StiRecord>) {
    let mut storm_ids: Vec<String> = Vec::new();

    for line in lines {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(STORM_ID_LABEL) {
            storm_ids = tokens(rest).into_iter().filter(|t| is_storm_id(t)).collect();
            for id in &storm_ids {
                records.entry(id.clone()).or_default();
            }
            continue;
        }
        if storm_ids.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("AZ/RAN") {
            for (id, token) in storm_ids.iter().zip(tokens(rest)) {
                if let Some(r) = records.get_mut(id) {
                    r.current_position.merge(parse_position(Some(&token)));
                }
            }
        } else if let Some(rest) = line.strip_prefix("FCST MVMT") {
            for (id, token) in storm_ids.iter().zip(tokens(rest)) {
                if let Some(r) = records.get_mut(id) {
                    let (direction, speed) = parse_pair(&token);
                    set_once(&mut r.direction, direction);
                    set_once(&mut r.speed, speed);
                }
            }
        } else if let Some(rest) = line.strip_prefix("ERR/MEAN") {
            for (id, token) in storm_ids.iter().zip(tokens(rest)) {
                if let Some(r) = records.get_mut(id) {
                    let (forecast_error, mean_error) = parse_pair(&token);
                    set_once(&mut r.forecast_error, forecast_error);
                    set_once(&mut r.mean_error, mean_error);
                }
            }
        } else if let Some(rest) = line.strip_prefix("DBZM HGT") {
            let values = tokens(rest);
            for (id, pair) in storm_ids.iter().zip(values.chunks(2)) {
                if let Some(r) = records.get_mut(id) {
                    set_once(&mut r.max_dbz, pair.first().and_then(|t| t.parse().ok()));
                    set_once(&mut r.max_dbz_height, pair.get(1).and_then(|t| t.parse().ok()));
                }
            }
        }
    }
    trace!(storms = storm_ids.len(), "Parsed graphic storm page");
}

/// Tabular rows: `ID AZRAN MOVEMENT 15 30 45 60 FCST/MEAN`, one storm per
/// row.
fn parse_tabular_page(lines: &[&str], records: &mut BTreeMap<String, StiRecord>) {
    for line in lines {
        let t = tokens(line);
        let Some(id) = t.first().filter(|id| is_storm_id(id)) else {
            continue;
        };

        let record = records.entry(id.clone()).or_default();
        record.current_position.merge(parse_position(t.get(1)));

        if let Some(movement) = t.get(2) {
            let (direction, speed) = parse_pair(movement);
            set_once(&mut record.direction, direction);
            set_once(&mut record.speed, speed);
        }
        for (i, slot) in record.forecast_positions.iter_mut().enumerate() {
            slot.merge(parse_position(t.get(3 + i)));
        }
        if let Some(error) = t.get(7) {
            let (forecast_error, mean_error) = parse_pair(error);
            set_once(&mut record.forecast_error, forecast_error);
            set_once(&mut record.mean_error, mean_error);
        }
    }
}

fn is_adaptation_value(token: &str) -> bool {
    token.parse::<f32>().is_ok() || matches!(token, "ON" | "OFF" | "YES" | "NO")
}

fn parse_adaptation_page(lines: &[&str]) -> StiAdaptationParameters {
    let mut parameters = StiAdaptationParameters::default();

    for line in lines.iter().filter(|l| !l.contains(ADAPTATION_TITLE)) {
        let mut words = line.split_whitespace().peekable();
        while let Some(value) = words.next() {
            if !is_adaptation_value(value) {
                trace!(word = value, "Adaptation text outside an entry");
                continue;
            }
            // Unit directly after the value, e.g. `(KTS)`
            words.next_if(|w| w.starts_with('(') && w.ends_with(')'));

            let mut label: Vec<&str> = Vec::new();
            while let Some(word) = words.next_if(|w| !is_adaptation_value(w)) {
                label.push(word);
            }
            if label.is_empty() {
                warn!(value, "Adaptation value without a label");
                continue;
            }
            parameters.set(&label.join(" "), value);
        }
    }
    parameters
}
