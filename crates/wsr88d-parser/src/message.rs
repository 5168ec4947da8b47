//! Decoded message sum type.

use serde::Serialize;

use crate::level2::{
    ClutterFilterBypassMap, ClutterFilterMap, DigitalRadarData, DigitalRadarDataGeneric,
    PerformanceMaintenanceData, RadialMoments, RdaAdaptationData, RdaStatusData,
    VolumeCoveragePatternData,
};
use crate::level3::{
    GeneralStatusMessage, GraphicProductMessage, ProductDescriptionBlock, RadarCodedMessage,
    StormTrackingInformationMessage, TabularProductMessage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageFamily {
    Level2,
    Level3,
}

/// A message whose type has no decoder. Its payload is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedMessage {
    pub family: MessageFamily,
    pub message_type: i16,
    /// Payload length in bytes, excluding the message header
    pub payload_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Message {
    DigitalRadarData(DigitalRadarData),
    DigitalRadarDataGeneric(DigitalRadarDataGeneric),
    RdaStatus(RdaStatusData),
    ClutterFilterBypassMap(Box<ClutterFilterBypassMap>),
    ClutterFilterMap(Box<ClutterFilterMap>),
    GraphicProduct(GraphicProductMessage),
    GeneralStatus(Box<GeneralStatusMessage>),
    TabularProduct(TabularProductMessage),
    RadarCoded(RadarCodedMessage),
    VolumeCoveragePattern(VolumeCoveragePatternData),
    RdaAdaptation(Box<RdaAdaptationData>),
    PerformanceMaintenance(Box<PerformanceMaintenanceData>),
    StormTrackingInformation(StormTrackingInformationMessage),
    Unrecognized(UnrecognizedMessage),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Message::DigitalRadarData(_) => "Digital Radar Data",
            Message::DigitalRadarDataGeneric(_) => "Generic Digital Radar Data",
            Message::RdaStatus(_) => "RDA Status Data",
            Message::ClutterFilterBypassMap(_) => "Clutter Filter Bypass Map",
            Message::ClutterFilterMap(_) => "Clutter Filter Map",
            Message::GraphicProduct(_) => "Graphic Product",
            Message::GeneralStatus(_) => "General Status Message",
            Message::TabularProduct(_) => "Tabular Product",
            Message::RadarCoded(_) => "Radar Coded Message",
            Message::VolumeCoveragePattern(_) => "Volume Coverage Pattern Data",
            Message::RdaAdaptation(_) => "RDA Adaptation Data",
            Message::PerformanceMaintenance(_) => "Performance/Maintenance Data",
            Message::StormTrackingInformation(_) => "Storm Tracking Information",
            Message::Unrecognized(_) => "Unrecognized",
        }
    }

    /// Radial access for either radar data message type.
    pub fn as_radial(&self) -> Option<&dyn RadialMoments> {
        match self {
            Message::DigitalRadarData(m) => Some(m),
            Message::DigitalRadarDataGeneric(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Message::Unrecognized(_))
    }

    /// Graphic product, including the one inside a storm tracking message.
    pub fn as_graphic_product(&self) -> Option<&GraphicProductMessage> {
        match self {
            Message::GraphicProduct(m) => Some(m),
            Message::StormTrackingInformation(m) => Some(&m.product),
            _ => None,
        }
    }

    /// Product description block of any Level III product that has one.
    pub fn product_description(&self) -> Option<&ProductDescriptionBlock> {
        match self {
            Message::TabularProduct(m) => Some(&m.description),
            Message::RadarCoded(m) => Some(&m.description),
            _ => self.as_graphic_product().map(|p| &p.description),
        }
    }
}
