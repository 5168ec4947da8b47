//! Summaries of decoded files, printed as text or serialized to JSON.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wsr88d_parser::{Level2File, Level3File, Message, MomentKind, RadialMoments};

/// Level II archives start with an `AR2V` volume header; anything else is
/// treated as a Level III product file.
const ARCHIVE_MAGIC: &[u8] = b"AR2V";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Level2Archive,
    Level3Product,
}

impl InputKind {
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(ARCHIVE_MAGIC) {
            InputKind::Level2Archive
        } else {
            InputKind::Level3Product
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ElevationSummary {
    pub elevation_number: u16,
    /// Mean elevation angle of the scan, degrees
    pub elevation_angle: f32,
    pub radials: usize,
    pub moments: Vec<MomentKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub icao: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub volume_coverage_pattern: Option<u16>,
    /// Decoded message count by message name
    pub messages: BTreeMap<&'static str, usize>,
    pub elevations: Vec<ElevationSummary>,
}

impl ArchiveSummary {
    pub fn from_file(file: &Level2File) -> Self {
        let mut messages = BTreeMap::new();
        for message in file.messages() {
            *messages.entry(message.name()).or_insert(0) += 1;
        }

        let elevations = file
            .elevation_scans()
            .into_iter()
            .map(|(elevation_number, radials)| summarize_scan(elevation_number, &radials))
            .collect();

        Self {
            icao: file.volume_header.icao.clone(),
            start_time: file.start_time(),
            end_time: file.end_time(),
            volume_coverage_pattern: file.volume_coverage_pattern().map(|v| v.pattern_number),
            messages,
            elevations,
        }
    }
}

fn summarize_scan(elevation_number: u16, radials: &[&dyn RadialMoments]) -> ElevationSummary {
    let elevation_angle = if radials.is_empty() {
        0.0
    } else {
        radials.iter().map(|r| r.elevation_angle()).sum::<f32>() / radials.len() as f32
    };

    let mut moments: Vec<MomentKind> = radials
        .iter()
        .flat_map(|r| r.available_moments())
        .collect();
    moments.sort();
    moments.dedup();

    ElevationSummary {
        elevation_number,
        elevation_angle,
        radials: radials.len(),
        moments,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub awips_id: String,
    pub sending_office: String,
    pub compressed: bool,
    pub message: &'static str,
    pub product_code: Option<i16>,
    pub generation_time: Option<DateTime<Utc>>,
    pub latitude: Option<f32>,
    pub longitude: Option<f32>,
    /// Symbology, graphic and tabular blocks present
    pub blocks: Vec<&'static str>,
    /// Storm ids, storm tracking information only
    pub storms: Vec<String>,
}

impl ProductSummary {
    pub fn from_file(file: &Level3File) -> Self {
        let product = file.message.as_graphic_product();
        let description = file.message.product_description();

        let present = match (&file.message, product) {
            (Message::TabularProduct(m), _) => vec![("tabular", m.pages.is_some())],
            (_, Some(p)) => vec![
                ("symbology", p.symbology.is_some()),
                ("graphic", p.graphic.is_some()),
                ("tabular", p.tabular.is_some()),
            ],
            _ => Vec::new(),
        };
        let blocks = present
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect();

        let storms = match &file.message {
            Message::StormTrackingInformation(sti) => {
                sti.storm_ids().map(str::to_owned).collect()
            }
            _ => Vec::new(),
        };

        Self {
            awips_id: file.wmo_header.awips_id(),
            sending_office: file.wmo_header.icao.clone(),
            compressed: file.ccb_header.is_some(),
            message: file.message.name(),
            product_code: file.product_code(),
            generation_time: description.and_then(|d| d.generation_time()),
            latitude: description.map(|d| d.latitude()),
            longitude: description.map(|d| d.longitude()),
            blocks,
            storms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Archive(ArchiveSummary),
    Product(ProductSummary),
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl fmt::Display for ArchiveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Level II archive {}", self.icao)?;
        writeln!(f, "  start: {}", format_time(self.start_time))?;
        writeln!(f, "  end:   {}", format_time(self.end_time))?;
        match self.volume_coverage_pattern {
            Some(vcp) => writeln!(f, "  VCP:   {}", vcp)?,
            None => writeln!(f, "  VCP:   none")?,
        }
        writeln!(f, "  messages:")?;
        for (name, count) in &self.messages {
            writeln!(f, "    {:<32} {:>6}", name, count)?;
        }
        writeln!(f, "  elevations:")?;
        for e in &self.elevations {
            let moments: Vec<&str> = e.moments.iter().map(|m| m.name().trim_end()).collect();
            writeln!(
                f,
                "    {:>2}  {:>5.2} deg  {:>4} radials  {}",
                e.elevation_number,
                e.elevation_angle,
                e.radials,
                moments.join(",")
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ProductSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Level III product {} from {}{}",
            self.awips_id,
            self.sending_office,
            if self.compressed { " (zlib)" } else { "" }
        )?;
        writeln!(f, "  message:   {}", self.message)?;
        if let Some(code) = self.product_code {
            writeln!(f, "  product:   {}", code)?;
        }
        writeln!(f, "  generated: {}", format_time(self.generation_time))?;
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            writeln!(f, "  radar:     {:.3}, {:.3}", lat, lon)?;
        }
        if !self.blocks.is_empty() {
            writeln!(f, "  blocks:    {}", self.blocks.join(", "))?;
        }
        if !self.storms.is_empty() {
            writeln!(f, "  storms:    {}", self.storms.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Archive(s) => fmt::Display::fmt(s, f),
            Summary::Product(s) => fmt::Display::fmt(s, f),
        }
    }
}
