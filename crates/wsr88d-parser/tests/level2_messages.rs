//! Integration tests for the non-radial Level II messages and the
//! message factory: RDA status, volume coverage patterns, RDA adaptation
//! data, performance/maintenance data, clutter filter maps and
//! multi-segment reassembly.

use bytes::Bytes;
use test_utils::{
    assert_approx_eq, bypass_map_body, clutter_filter_map_body, level2_message, message_type,
    performance_body, rda_adaptation_body, rda_status_body, segmented_level2_message, time,
    ElevationCutSpec, VcpSpec, LEVEL2_HEADER_SIZE,
};
use wsr88d_parser::level2::{OpCode, RangeZone, WaveformType};
use wsr88d_parser::{decode, DecodeError, DecoderConfig, Message, MessageFactory};

fn five_cut_pattern() -> VcpSpec {
    let cuts = (0..5)
        .map(|i| ElevationCutSpec {
            elevation_angle_raw: 91 + i * 182,
            waveform_type: if i % 2 == 0 { 1 } else { 2 },
            super_resolution: if i < 2 { 0x0B } else { 0 },
            supplemental_data: if i == 4 { 0x0003 } else { 0 },
        })
        .collect();
    VcpSpec {
        pattern_number: 215,
        // sequence active, 2 SAILS cuts max, 5 elevations
        sequencing: 0x2000 | (2 << 5) | 5,
        // SAILS with one cut, MPDA
        supplemental: 0x0001 | (1 << 1) | 0x0800,
        cuts,
        size_override: None,
    }
}

// ============================================================================
// Volume coverage pattern (message 5)
// ============================================================================

#[test]
fn test_vcp_sequencing_accessors() {
    let message = decode(Bytes::from(five_cut_pattern().encode())).unwrap();
    let Message::VolumeCoveragePattern(vcp) = message else {
        panic!("expected volume coverage pattern");
    };

    assert_eq!(vcp.pattern_number, 215);
    assert_eq!(vcp.number_of_elevation_cuts, 5);
    assert_eq!(vcp.elevation_cuts.len(), 5);
    assert!(vcp.sequence_active());
    assert_eq!(vcp.maximum_sails_cuts(), 2);
    assert_eq!(vcp.number_of_elevations(), 5);
    assert!(!vcp.truncated_vcp());

    assert!(vcp.sails_vcp());
    assert_eq!(vcp.number_of_sails_cuts(), 1);
    assert!(vcp.mpda_vcp());
    assert!(!vcp.mrle_vcp());
    assert!(!vcp.base_tilt_vcp());
    assert_eq!(vcp.doppler_velocity_resolution(), Some(0.5));
}

#[test]
fn test_vcp_elevation_cuts() {
    let message = decode(Bytes::from(five_cut_pattern().encode())).unwrap();
    let Message::VolumeCoveragePattern(vcp) = message else {
        panic!("expected volume coverage pattern");
    };

    let first = &vcp.elevation_cuts[0];
    assert_approx_eq!(first.elevation_angle(), 0.5, 0.01);
    assert_eq!(first.waveform_type(), WaveformType::ContiguousSurveillance);
    assert!(first.half_degree_azimuth());
    assert!(first.quarter_km_reflectivity());
    assert!(!first.doppler_to_300km());
    assert!(first.dual_polarization_to_300km());
    assert_approx_eq!(first.reflectivity_threshold(), 2.0, 1e-6);
    assert_eq!(first.sectors[1].doppler_prf_number, 5);

    let second = &vcp.elevation_cuts[1];
    assert_eq!(
        second.waveform_type(),
        WaveformType::ContiguousDopplerWithAmbiguityResolution
    );

    let last = &vcp.elevation_cuts[4];
    assert!(last.sails_cut());
    assert_eq!(last.sails_sequence_number(), 1);
    assert!(!last.half_degree_azimuth());
}

#[test]
fn test_vcp_unknown_waveform() {
    let mut spec = five_cut_pattern();
    spec.cuts[0].waveform_type = 9;
    let message = decode(Bytes::from(spec.encode())).unwrap();
    let Message::VolumeCoveragePattern(vcp) = message else {
        panic!("expected volume coverage pattern");
    };
    assert_eq!(vcp.elevation_cuts[0].waveform_type(), WaveformType::Unknown);
}

#[test]
fn test_vcp_size_mismatch_is_lenient_by_default() {
    let spec = VcpSpec {
        size_override: Some(100),
        ..five_cut_pattern()
    };
    let data = Bytes::from(spec.encode());

    let message = MessageFactory::default().decode_level2(data.clone()).unwrap();
    assert!(matches!(
        message.message,
        Some(Message::VolumeCoveragePattern(_))
    ));

    let strict = DecoderConfig {
        strict_vcp_size: true,
        ..Default::default()
    };
    assert!(matches!(
        MessageFactory::new(strict).decode_level2(data),
        Err(DecodeError::SizeMismatch { .. })
    ));
}

#[test]
fn test_vcp_cut_count_out_of_range() {
    let spec = VcpSpec {
        cuts: Vec::new(),
        size_override: Some(34),
        ..Default::default()
    };
    assert!(matches!(
        decode(Bytes::from(spec.encode())),
        Err(DecodeError::InvalidField { .. })
    ));
}

// ============================================================================
// RDA adaptation data (message 18) and segment reassembly
// ============================================================================

#[test]
fn test_rda_adaptation_single_message() {
    let data = level2_message(
        message_type::RDA_ADAPTATION_DATA,
        &rda_adaptation_body("adapt_KTLX"),
    );
    let message = decode(Bytes::from(data)).unwrap();
    let Message::RdaAdaptation(rda) = message else {
        panic!("expected RDA adaptation data");
    };
    assert_eq!(rda.adap_file_name, "adapt_KTLX");
    assert_eq!(rda.adap_format, "RDA");
    assert_eq!(rda.adap_revision, "1.2");
    assert_eq!(rda.h_coupler_xmt_loss(), 0.0);
}

#[test]
fn test_segmented_rda_adaptation_reassembles() {
    let body = rda_adaptation_body("adapt_KTLX");
    let segments = segmented_level2_message(message_type::RDA_ADAPTATION_DATA, &body, 2400);
    assert_eq!(segments.len(), 4);

    let mut factory = MessageFactory::default();
    for (i, segment) in segments.iter().enumerate() {
        let info = factory.decode_level2(Bytes::from(segment.clone())).unwrap();
        assert_eq!(info.bytes_consumed, segment.len());
        if i + 1 < segments.len() {
            assert!(info.message.is_none(), "segment {} completed early", i + 1);
        } else {
            match info.message {
                Some(Message::RdaAdaptation(rda)) => assert_eq!(rda.adap_file_name, "adapt_KTLX"),
                other => panic!("expected RDA adaptation data, got {:?}", other.map(|m| m.name())),
            }
        }
    }
}

#[test]
fn test_out_of_order_segment_rejected() {
    let body = rda_adaptation_body("adapt_KTLX");
    let segments = segmented_level2_message(message_type::RDA_ADAPTATION_DATA, &body, 2400);

    let mut factory = MessageFactory::default();
    factory.decode_level2(Bytes::from(segments[0].clone())).unwrap();
    assert!(factory.decode_level2(Bytes::from(segments[2].clone())).is_err());

    // A fresh first segment restarts reassembly
    for segment in &segments {
        factory.decode_level2(Bytes::from(segment.clone())).unwrap();
    }
}

#[test]
fn test_reassembly_size_limit() {
    let body = rda_adaptation_body("adapt_KTLX");
    let segments = segmented_level2_message(message_type::RDA_ADAPTATION_DATA, &body, 2400);
    let config = DecoderConfig {
        max_reassembly_bytes: 4000,
        ..Default::default()
    };

    let mut factory = MessageFactory::new(config);
    factory.decode_level2(Bytes::from(segments[0].clone())).unwrap();
    assert!(factory.decode_level2(Bytes::from(segments[1].clone())).is_err());
}

#[test]
fn test_stateless_decode_of_segment_is_incomplete() {
    let body = rda_adaptation_body("adapt_KTLX");
    let segments = segmented_level2_message(message_type::RDA_ADAPTATION_DATA, &body, 2400);
    match decode(Bytes::from(segments[1].clone())) {
        Err(DecodeError::IncompleteMessage { received, total }) => {
            assert_eq!(received, 2);
            assert_eq!(total, 4);
        }
        other => panic!("expected incomplete message, got {:?}", other.map(|m| m.name())),
    }
}

// ============================================================================
// Performance/maintenance data (message 3)
// ============================================================================

#[test]
fn test_performance_maintenance_data() {
    let data = level2_message(
        message_type::PERFORMANCE_MAINTENANCE_DATA,
        &performance_body(1, 0x0102),
    );
    let message = decode(Bytes::from(data)).unwrap();
    let Message::PerformanceMaintenance(pmd) = message else {
        panic!("expected performance/maintenance data");
    };
    assert_eq!(pmd.communications.loop_back_set_status, 1);
    assert_eq!(pmd.device_status.version, 0x0102);
}

// ============================================================================
// RDA status data (message 2)
// ============================================================================

#[test]
fn test_rda_status_data() {
    let data = level2_message(message_type::RDA_STATUS_DATA, &rda_status_body(-35, &[210, 0, 7]));
    let message = decode(Bytes::from(data)).unwrap();
    let Message::RdaStatus(status) = message else {
        panic!("expected RDA status data, got {}", message.name());
    };

    assert_eq!(status.rda_status, 2);
    assert_eq!(status.average_transmitter_power, 700);
    assert_eq!(status.volume_coverage_pattern_number, -35);
    assert_eq!(status.rda_build_number, 2_300);
    assert_approx_eq!(status.horizontal_reflectivity_calibration_correction_db(), -1.25, 1e-6);
    assert_approx_eq!(status.vertical_reflectivity_calibration_correction_db(), 0.5, 1e-6);
    assert_eq!(status.active_alarms().collect::<Vec<_>>(), vec![210, 7]);
    assert_eq!(status.status_version, 1);
    assert_eq!(
        status.bypass_map_generation().unwrap().to_rfc3339(),
        "2022-01-07T01:00:00+00:00"
    );
    assert_eq!(
        status.clutter_filter_map_generation().unwrap().to_rfc3339(),
        "2022-01-07T01:30:00+00:00"
    );
}

#[test]
fn test_rda_status_truncated() {
    let body = rda_status_body(212, &[]);
    let data = level2_message(message_type::RDA_STATUS_DATA, &body[..100]);
    assert!(decode(Bytes::from(data)).unwrap_err().is_truncation());
}

// ============================================================================
// Clutter filter maps (messages 13 and 15)
// ============================================================================

#[test]
fn test_clutter_filter_bypass_map() {
    let body = bypass_map_body(2, &[(0, 0, 0), (0, 10, 17), (1, 359, 511)]);
    let message = decode(Bytes::from(level2_message(
        message_type::CLUTTER_FILTER_BYPASS_MAP,
        &body,
    )))
    .unwrap();
    let Message::ClutterFilterBypassMap(map) = message else {
        panic!("expected clutter filter bypass map, got {}", message.name());
    };

    assert_eq!(map.map_generation_date, time::JULIAN_DATE);
    assert_eq!(map.generation_time().unwrap().to_rfc3339(), time::REFERENCE_TIME);
    assert_eq!(map.number_of_elevation_segments(), 2);
    assert_eq!(map.segments[1].segment_number, 2);
    assert_eq!(map.segments[0].range_bins.len(), 360);

    let first = &map.segments[0];
    assert_eq!(first.is_bypassed(0, 0), Some(true));
    assert_eq!(first.is_bypassed(0, 1), Some(false));
    assert_eq!(first.is_bypassed(10, 17), Some(true));
    assert_eq!(first.is_bypassed(10, 16), Some(false));
    assert_eq!(first.is_bypassed(359, 511), Some(false));
    assert_eq!(map.segments[1].is_bypassed(359, 511), Some(true));
    assert_eq!(first.is_bypassed(360, 0), None);
    assert_eq!(first.is_bypassed(0, 512), None);
}

#[test]
fn test_segmented_bypass_map_reassembles() {
    let body = bypass_map_body(1, &[(0, 100, 255)]);
    let segments =
        segmented_level2_message(message_type::CLUTTER_FILTER_BYPASS_MAP, &body, 4_800);
    assert_eq!(segments.len(), 5);

    let mut factory = MessageFactory::default();
    let mut decoded = None;
    for segment in segments {
        decoded = factory.decode_level2(Bytes::from(segment)).unwrap().message;
    }
    match decoded {
        Some(Message::ClutterFilterBypassMap(map)) => {
            assert_eq!(map.segments[0].is_bypassed(100, 255), Some(true));
        }
        other => panic!("expected bypass map, got {:?}", other.map(|m| m.name())),
    }
}

#[test]
fn test_bypass_map_header_checks() {
    for (date, minutes, segments) in [(0u16, 60u16, 1u16), (1, 1441, 1), (1, 60, 0), (1, 60, 6)] {
        let mut body = bypass_map_body(1, &[]);
        body[0..2].copy_from_slice(&date.to_be_bytes());
        body[2..4].copy_from_slice(&minutes.to_be_bytes());
        body[4..6].copy_from_slice(&segments.to_be_bytes());
        let data = level2_message(message_type::CLUTTER_FILTER_BYPASS_MAP, &body);
        assert!(
            matches!(decode(Bytes::from(data)), Err(DecodeError::InvalidField { .. })),
            "date {} time {} segments {}",
            date,
            minutes,
            segments
        );
    }
}

#[test]
fn test_clutter_filter_map() {
    let body = clutter_filter_map_body(1, &[(1, 20), (2, 100), (0, 511)]);
    let message =
        decode(Bytes::from(level2_message(message_type::CLUTTER_FILTER_MAP, &body))).unwrap();
    let Message::ClutterFilterMap(map) = message else {
        panic!("expected clutter filter map, got {}", message.name());
    };

    assert_eq!(map.number_of_elevation_segments(), 1);
    assert_eq!(
        map.generation_time().unwrap().to_rfc3339(),
        "2022-01-07T01:30:00+00:00"
    );
    assert_eq!(map.range_zones[0].len(), 360);
    assert_eq!(
        map.zones(0, 359).unwrap(),
        &[
            RangeZone { op_code: OpCode::BypassMapInControl, end_range: 20 },
            RangeZone { op_code: OpCode::ClutterFilteringForced, end_range: 100 },
            RangeZone { op_code: OpCode::BypassFilterForced, end_range: 511 },
        ]
    );
    assert!(map.zones(1, 0).is_none());
}

#[test]
fn test_clutter_filter_map_rejects_bad_zones() {
    let zero_zones = clutter_filter_map_body(1, &[]);
    assert!(matches!(
        decode(Bytes::from(level2_message(message_type::CLUTTER_FILTER_MAP, &zero_zones))),
        Err(DecodeError::InvalidField { .. })
    ));

    let bad_op_code = clutter_filter_map_body(1, &[(3, 100)]);
    assert!(matches!(
        decode(Bytes::from(level2_message(message_type::CLUTTER_FILTER_MAP, &bad_op_code))),
        Err(DecodeError::InvalidDiscriminator { .. })
    ));

    let bad_range = clutter_filter_map_body(1, &[(1, 512)]);
    assert!(matches!(
        decode(Bytes::from(level2_message(message_type::CLUTTER_FILTER_MAP, &bad_range))),
        Err(DecodeError::InvalidField { .. })
    ));
}

// ============================================================================
// Factory framing
// ============================================================================

#[test]
fn test_factory_ignores_trailing_bytes() {
    let mut data = five_cut_pattern().encode();
    let size = data.len();
    data.extend_from_slice(&[0xAA; 64]);

    let info = MessageFactory::default().decode_level2(Bytes::from(data)).unwrap();
    assert_eq!(info.bytes_consumed, size);
    assert_eq!(info.header.message_type(), message_type::VOLUME_COVERAGE_PATTERN);
}

#[test]
fn test_buffer_shorter_than_declared_size() {
    let data = five_cut_pattern().encode();
    let short = Bytes::from(data[..data.len() - 2].to_vec());
    assert!(matches!(
        decode(short),
        Err(DecodeError::TruncatedInput { .. })
    ));
}

#[test]
fn test_fixed_record_longer_than_declared_size() {
    // Declares a 100-byte body for a 960-byte record
    let mut data = level2_message(
        message_type::PERFORMANCE_MAINTENANCE_DATA,
        &performance_body(0, 0),
    );
    let size = ((LEVEL2_HEADER_SIZE + 100) / 2) as u16;
    data[0..2].copy_from_slice(&size.to_be_bytes());
    assert!(matches!(
        decode(Bytes::from(data)),
        Err(DecodeError::SizeMismatch { declared: 100, consumed: 960 })
    ));
}
