//! Integration tests for Level II radial decoding (message types 1 and 31).
//!
//! Inputs are built field by field with the `test-utils` builders.

use bytes::Bytes;
use test_utils::{
    assert_approx_eq, elevation_block, level2_message, message_type, moment_block, radial_block,
    volume_block, GenericRadial, LegacyRadial, LEVEL2_HEADER_SIZE,
};
use wsr88d_parser::level2::GateValues;
use wsr88d_parser::{decode, DecodeError, Message, MomentKind, RadialMoments};

fn decode_bytes(data: Vec<u8>) -> Result<Message, DecodeError> {
    decode(Bytes::from(data))
}

fn standard_moments() -> Vec<Vec<u8>> {
    vec![
        moment_block("REF", 8, &[0, 1, 2, 66, 130, 200], 2.0, 66.0),
        moment_block("VEL", 8, &[0, 1, 129, 140], 2.0, 129.0),
        moment_block("SW ", 8, &[0, 129, 135], 2.0, 129.0),
    ]
}

// ============================================================================
// Generic radar data (message 31)
// ============================================================================

#[test]
fn test_generic_radial_blocks_keyed_by_kind() {
    let radial = GenericRadial {
        azimuth_number: 42,
        azimuth_angle: 20.75,
        elevation_number: 3,
        elevation_angle: 1.45,
        ..GenericRadial::with_moments(standard_moments())
    };

    let message = decode_bytes(radial.encode()).unwrap();
    let Message::DigitalRadarDataGeneric(m) = &message else {
        panic!("expected generic radial, got {}", message.name());
    };

    assert_eq!(m.radar_identifier, "KTLX");
    assert_eq!(m.data_block_count, 6);
    assert!(m.volume.is_some());
    assert!(m.elevation.is_some());
    assert!(m.radial.is_some());
    assert_eq!(m.moments.len(), 3);
    assert!(m.moments.contains_key(&MomentKind::Reflectivity));
    assert!(m.moments.contains_key(&MomentKind::Velocity));
    assert!(m.moments.contains_key(&MomentKind::SpectrumWidth));
    assert!(m.moment(MomentKind::ClutterFilterPower).is_none());
    assert!(m.moment(MomentKind::DifferentialReflectivity).is_none());

    assert_eq!(m.azimuth_number(), 42);
    assert_approx_eq!(m.azimuth_angle(), 20.75, 1e-6);
    assert_eq!(m.elevation_number(), 3);
    assert_approx_eq!(m.elevation_angle(), 1.45, 1e-6);
    assert_eq!(
        m.collection_time().unwrap().to_rfc3339(),
        test_utils::time::REFERENCE_TIME
    );
    assert_eq!(
        m.available_moments(),
        vec![
            MomentKind::Reflectivity,
            MomentKind::Velocity,
            MomentKind::SpectrumWidth
        ]
    );
    assert_eq!(m.azimuth_resolution(), Some(0.5));
    assert_eq!(m.volume_coverage_pattern_number(), Some(212));
}

#[test]
fn test_generic_radial_block_contents() {
    let message = decode_bytes(GenericRadial::with_moments(standard_moments()).encode()).unwrap();
    let Message::DigitalRadarDataGeneric(m) = message else {
        panic!("expected generic radial");
    };

    let volume = m.volume.as_ref().unwrap();
    assert_eq!(volume.version_number_major, 2);
    assert_approx_eq!(volume.latitude, test_utils::site::LATITUDE, 1e-5);
    assert_approx_eq!(volume.longitude, test_utils::site::LONGITUDE, 1e-5);

    let elevation = m.elevation.as_ref().unwrap();
    assert_approx_eq!(elevation.atmos_db_per_km(), -0.012, 1e-6);

    let radial = m.radial.as_ref().unwrap();
    assert_approx_eq!(radial.unambiguous_range_km(), 117.5, 1e-3);
    assert_approx_eq!(radial.nyquist_velocity_ms(), 28.0, 1e-3);

    let reflectivity = &m.moments[&MomentKind::Reflectivity];
    assert_eq!(reflectivity.number_of_gates, 6);
    assert_eq!(reflectivity.range_to_first_gate, 2125);
    assert_eq!(reflectivity.gate_interval, 250);
    assert_eq!(reflectivity.value(0), None);
    assert!(reflectivity.is_range_folded(1));
    assert_approx_eq!(reflectivity.value(3).unwrap(), 0.0, 1e-6);
    assert_approx_eq!(reflectivity.value(4).unwrap(), 32.0, 1e-6);
}

#[test]
fn test_gate_count_matches_every_block() {
    let moments = vec![
        moment_block("REF", 8, &[10; 1840], 2.0, 66.0),
        moment_block("ZDR", 16, &[300; 1200], 16.0, 128.0),
        moment_block("PHI", 16, &[700; 1200], 2.8361, 2.0),
        moment_block("RHO", 8, &[250; 1200], 300.0, -60.5),
        moment_block("CFP", 8, &[8; 17], 1.0, 8.0),
    ];
    let message = decode_bytes(GenericRadial::with_moments(moments).encode()).unwrap();
    let radial = message.as_radial().unwrap();

    assert_eq!(radial.available_moments().len(), 5);
    for kind in radial.available_moments() {
        let block = radial.moment(kind).unwrap();
        assert_eq!(
            block.gate_values().len(),
            usize::from(block.number_of_gates),
            "{:?}",
            kind
        );
    }

    let zdr = radial.moment(MomentKind::DifferentialReflectivity).unwrap();
    assert!(matches!(zdr.gate_values(), GateValues::Sixteen(_)));
    assert!(zdr.gates_8().is_empty());
    assert_eq!(zdr.gates_16().len(), 1200);

    let rho = radial.moment(MomentKind::CorrelationCoefficient).unwrap();
    assert!(rho.gates_16().is_empty());
    assert_eq!(rho.gates_8().len(), 1200);
}

#[test]
fn test_unknown_block_name_is_skipped() {
    let mut moments = standard_moments();
    moments.push(moment_block("XYZ", 8, &[5, 6], 1.0, 0.0));
    let message = decode_bytes(GenericRadial::with_moments(moments).encode()).unwrap();
    assert_eq!(message.as_radial().unwrap().available_moments().len(), 3);
}

#[test]
fn test_duplicate_moment_block_keeps_last() {
    let mut moments = standard_moments();
    moments.push(moment_block("REF", 8, &[2, 66, 130], 2.0, 66.0));
    let message = decode_bytes(GenericRadial::with_moments(moments).encode()).unwrap();
    let radial = message.as_radial().unwrap();

    assert_eq!(radial.available_moments().len(), 3);
    let reflectivity = radial.moment(MomentKind::Reflectivity).unwrap();
    assert_eq!(reflectivity.number_of_gates, 3);
    assert_approx_eq!(reflectivity.value(2).unwrap(), 32.0, 1e-6);
}

#[test]
fn test_compressed_radial_rejected() {
    let radial = GenericRadial {
        compression_indicator: 1,
        ..GenericRadial::with_moments(standard_moments())
    };
    assert!(matches!(
        decode_bytes(radial.encode()),
        Err(DecodeError::UnsupportedEncoding(_))
    ));
}

#[test]
fn test_invalid_radial_header_fields() {
    let base = GenericRadial::with_moments(standard_moments());

    let radial = GenericRadial {
        azimuth_number: 721,
        ..base.clone()
    };
    assert!(matches!(
        decode_bytes(radial.encode()),
        Err(DecodeError::InvalidField { field: "azimuth number", .. })
    ));

    let radial = GenericRadial {
        elevation_number: 33,
        ..base.clone()
    };
    assert!(matches!(
        decode_bytes(radial.encode()),
        Err(DecodeError::InvalidField { field: "elevation number", .. })
    ));

    let radial = GenericRadial {
        blocks: vec![volume_block(212), elevation_block(0), radial_block(0, 0)],
        ..base
    };
    assert!(matches!(
        decode_bytes(radial.encode()),
        Err(DecodeError::InvalidField { field: "data block count", .. })
    ));
}

#[test]
fn test_invalid_word_size_fails_whole_message() {
    let mut moments = standard_moments();
    moments.push(moment_block("ZDR", 12, &[1, 2], 16.0, 128.0));
    assert!(matches!(
        decode_bytes(GenericRadial::with_moments(moments).encode()),
        Err(DecodeError::InvalidDiscriminator { field: "data word size", value: 12 })
    ));
}

#[test]
fn test_decoder_reading_past_declared_size() {
    let mut data = GenericRadial::with_moments(standard_moments()).encode();
    // Declare only the header plus the radial header and pointers
    let size = ((LEVEL2_HEADER_SIZE + GenericRadial::HEADER_SIZE + 24) / 2) as u16;
    data[0..2].copy_from_slice(&size.to_be_bytes());
    assert!(matches!(
        decode_bytes(data),
        Err(DecodeError::SizeMismatch { .. })
    ));
}

#[test]
fn test_decode_is_idempotent() {
    let data = Bytes::from(GenericRadial::with_moments(standard_moments()).encode());
    let first = decode(data.clone()).unwrap();
    let second = decode(data).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Digital radar data (message 1)
// ============================================================================

#[test]
fn test_legacy_radial_moments() {
    let radial = LegacyRadial {
        azimuth_number: 100,
        azimuth_angle_raw: 0x4000,
        elevation_number: 2,
        reflectivity: vec![0, 1, 66, 86],
        velocity: vec![0, 129, 139],
        spectrum_width: vec![0, 129, 131],
        ..Default::default()
    };
    let message = decode_bytes(radial.encode()).unwrap();
    let Message::DigitalRadarData(m) = &message else {
        panic!("expected legacy radial, got {}", message.name());
    };

    assert_eq!(m.azimuth_number(), 100);
    assert_approx_eq!(m.azimuth_angle(), 90.0, 0.01);
    assert_eq!(m.elevation_number(), 2);
    assert_approx_eq!(m.nyquist_velocity_ms(), 28.0, 1e-3);
    assert_approx_eq!(m.unambiguous_range_km(), 117.5, 1e-3);

    let reflectivity = m.moment(MomentKind::Reflectivity).unwrap();
    assert_eq!(reflectivity.word_size, 8);
    assert_eq!(reflectivity.gates_8(), &[0u8, 1, 66, 86]);
    assert_approx_eq!(reflectivity.value(3).unwrap(), 10.0, 1e-6);

    let velocity = m.moment(MomentKind::Velocity).unwrap();
    assert_eq!(velocity.number_of_gates, 3);
    assert_approx_eq!(velocity.value(2).unwrap(), 5.0, 1e-6);

    let width = m.moment(MomentKind::SpectrumWidth).unwrap();
    assert_approx_eq!(width.value(2).unwrap(), 1.0, 1e-6);
}

#[test]
fn test_legacy_velocity_resolution() {
    let radial = LegacyRadial {
        velocity_resolution: 4,
        velocity: vec![139],
        spectrum_width: vec![129],
        ..Default::default()
    };
    let message = decode_bytes(radial.encode()).unwrap();
    let velocity = message.as_radial().unwrap().moment(MomentKind::Velocity).unwrap();
    assert_approx_eq!(velocity.value(0).unwrap(), 10.0, 1e-6);
}

#[test]
fn test_legacy_reflectivity_only() {
    let radial = LegacyRadial {
        reflectivity: vec![100; 460],
        ..Default::default()
    };
    let message = decode_bytes(radial.encode()).unwrap();
    let radial = message.as_radial().unwrap();
    assert_eq!(radial.available_moments(), vec![MomentKind::Reflectivity]);
    assert_eq!(
        radial.moment(MomentKind::Reflectivity).unwrap().gate_values().len(),
        460
    );
}

#[test]
fn test_legacy_range_checks() {
    for radial in [
        LegacyRadial {
            azimuth_number: 0,
            ..Default::default()
        },
        LegacyRadial {
            azimuth_number: 401,
            ..Default::default()
        },
        LegacyRadial {
            elevation_number: 26,
            ..Default::default()
        },
        LegacyRadial {
            reflectivity: vec![0; 461],
            ..Default::default()
        },
    ] {
        assert!(matches!(
            decode_bytes(radial.encode()),
            Err(DecodeError::InvalidField { .. })
        ));
    }
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_truncated_input_never_panics() {
    let data = GenericRadial::with_moments(standard_moments()).encode();
    for len in 0..data.len() {
        let result = decode_bytes(data[..len].to_vec());
        assert!(
            matches!(result, Err(DecodeError::TruncatedInput { .. })),
            "length {} gave {:?}",
            len,
            result
        );
    }
}

#[test]
fn test_unknown_message_type_is_unrecognized() {
    let message = decode_bytes(level2_message(2, &[0u8; 40])).unwrap();
    match message {
        Message::Unrecognized(u) => {
            assert_eq!(u.message_type, 2);
            assert_eq!(u.payload_len, 40);
        }
        other => panic!("expected unrecognized message, got {}", other.name()),
    }
}

#[test]
fn test_legacy_type_constant_matches_decoder() {
    let data = level2_message(message_type::DIGITAL_RADAR_DATA, &LegacyRadial::default().encode_body());
    assert!(matches!(
        decode_bytes(data),
        Ok(Message::DigitalRadarData(_))
    ));
}
