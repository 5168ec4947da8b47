//! Integration tests for Level III product decoding: message header,
//! product description block, symbology/graphic/tabular blocks, the
//! storm tracking information product and the non-graphic messages
//! (general status, standalone tabular products, radar coded message).

use bytes::Bytes;
use test_utils::{
    assert_approx_eq, general_status_message, graphic_text_page, level3_header, products,
    radar_coded_message, site, text_packet, time, GraphicProductBuilder, TabularProductBuilder,
    LEVEL3_HEADER_SIZE,
};
use wsr88d_parser::level3::{DataLevelCode, GraphicPacket};
use wsr88d_parser::{decode_level3, DecodeError, GraphicProductMessage, Message, MessageFamily};

fn decode_graphic(data: Vec<u8>) -> GraphicProductMessage {
    match decode_level3(Bytes::from(data)).unwrap() {
        Message::GraphicProduct(product) => product,
        other => panic!("expected graphic product, got {}", other.name()),
    }
}

/// Digital reflectivity: minimum -32.0 dBZ, 0.5 dBZ increment, 254 levels.
fn digital_reflectivity() -> GraphicProductBuilder {
    let mut halfwords = [0u16; 16];
    halfwords[0] = (-320i16) as u16;
    halfwords[1] = 5;
    halfwords[2] = 254;
    GraphicProductBuilder::new(products::DIGITAL_REFLECTIVITY)
        .halfwords(halfwords)
        .parameter(3, 5)
}

fn float_halfwords(scale: f32, offset: f32) -> [u16; 16] {
    let mut halfwords = [0u16; 16];
    let scale = scale.to_bits();
    let offset = offset.to_bits();
    halfwords[0] = (scale >> 16) as u16;
    halfwords[1] = scale as u16;
    halfwords[2] = (offset >> 16) as u16;
    halfwords[3] = offset as u16;
    // Halfword 37: two leading flag levels
    halfwords[6] = 2;
    halfwords
}

// ============================================================================
// Product description block
// ============================================================================

#[test]
fn test_reflectivity_data_level_codes() {
    let product = decode_graphic(digital_reflectivity().build());
    let description = &product.description;

    assert_eq!(product.product_code(), products::DIGITAL_REFLECTIVITY);
    assert_eq!(description.threshold(), 2);
    assert_eq!(description.number_of_levels(), 256);
    assert_eq!(
        description.data_level_code(0),
        Some(DataLevelCode::BelowThreshold)
    );
    assert_eq!(description.data_level_code(1), Some(DataLevelCode::RangeFolded));
    assert_eq!(description.data_level_code(2), None);
}

#[test]
fn test_reflectivity_data_values() {
    let product = decode_graphic(digital_reflectivity().build());
    let description = &product.description;

    assert_eq!(description.data_value(0), None);
    assert_eq!(description.data_value(1), None);
    assert_approx_eq!(description.data_value(2).unwrap(), -32.0, 1e-4);
    assert_approx_eq!(description.data_value(3).unwrap(), -31.5, 1e-4);
    assert_approx_eq!(description.data_value(255).unwrap(), 94.5, 1e-3);
}

#[test]
fn test_description_site_and_times() {
    let product = decode_graphic(digital_reflectivity().build());
    let description = &product.description;

    assert_approx_eq!(description.latitude(), site::LATITUDE, 1e-4);
    assert_approx_eq!(description.longitude(), site::LONGITUDE, 1e-4);
    assert_eq!(description.height_of_radar, site::HEIGHT_FT);
    assert_approx_eq!(description.elevation(), 0.5, 1e-6);
    assert_eq!(description.halfword(33), Some(254));
    assert_eq!(description.halfword(47), None);

    let start = description.volume_scan_start().unwrap();
    assert_eq!(start.to_rfc3339(), time::REFERENCE_TIME);
    let generated = description.generation_time().unwrap();
    assert_eq!((generated - start).num_seconds(), 30);

    assert_eq!(
        product.header.message_time().unwrap().to_rfc3339(),
        time::REFERENCE_TIME
    );
}

#[test]
fn test_dual_pol_float_scale_offset() {
    let data = GraphicProductBuilder::new(products::DIFFERENTIAL_REFLECTIVITY)
        .halfwords(float_halfwords(16.0, 128.0))
        .build();
    let description = decode_graphic(data).description;

    assert_eq!(description.threshold(), 2);
    assert_approx_eq!(description.scale(), 16.0, 1e-6);
    assert_approx_eq!(description.offset(), 128.0, 1e-6);
    assert_approx_eq!(description.data_value(160).unwrap(), 2.0, 1e-6);
    assert_approx_eq!(description.data_value(96).unwrap(), -2.0, 1e-6);
}

#[test]
fn test_dual_pol_threshold_read_from_product() {
    let mut halfwords = float_halfwords(16.0, 128.0);
    halfwords[6] = 0;
    let data = GraphicProductBuilder::new(products::DIFFERENTIAL_REFLECTIVITY)
        .halfwords(halfwords)
        .build();
    let description = decode_graphic(data).description;

    assert_eq!(description.threshold(), 0);
    assert_eq!(description.data_level_code(1), None);
    assert_approx_eq!(description.data_value(1).unwrap(), -7.9375, 1e-6);
}

#[test]
fn test_zero_float_scale_has_no_values() {
    let data = GraphicProductBuilder::new(products::DIFFERENTIAL_REFLECTIVITY)
        .halfwords(float_halfwords(0.0, 128.0))
        .build();
    let description = decode_graphic(data).description;
    assert_eq!(description.data_value(160), None);
}

#[test]
fn test_hydrometeor_classes() {
    let description =
        decode_graphic(GraphicProductBuilder::new(products::HYDROMETEOR_CLASSIFICATION).build())
            .description;

    assert_eq!(description.threshold(), 0);
    assert_eq!(description.data_level_code(0), Some(DataLevelCode::BelowThreshold));
    assert_eq!(description.number_of_levels(), 160);
    assert_eq!(description.data_level_code(60), Some(DataLevelCode::LightRain));
    assert_eq!(description.data_level_code(65), None);
    assert_eq!(description.data_level_code(100), Some(DataLevelCode::Hail));
    assert_eq!(description.data_level_code(150), Some(DataLevelCode::RangeFolded));
    assert_eq!(description.data_level_code(155), None);
    assert_eq!(description.data_value(60), None);
}

#[test]
fn test_coded_velocity_levels() {
    let mut halfwords = [0u16; 16];
    // Level 0 below threshold, level 1 -64 kts, level 15 range folded
    halfwords[0] = 0x8001;
    halfwords[1] = 0x0140;
    halfwords[15] = 0x8003;
    let data = GraphicProductBuilder::new(products::CODED_VELOCITY)
        .halfwords(halfwords)
        .build();
    let description = decode_graphic(data).description;

    assert_eq!(description.number_of_levels(), 16);
    assert_eq!(description.data_level_code(0), Some(DataLevelCode::BelowThreshold));
    assert_eq!(description.data_value(0), None);
    assert_eq!(description.data_level_code(1), None);
    assert_eq!(description.data_value(1), Some(-64.0));
    assert_eq!(description.data_level_code(15), Some(DataLevelCode::RangeFolded));
}

#[test]
fn test_invalid_product_code_in_description() {
    let mut builder = digital_reflectivity();
    builder.description.product_code = 7;
    match decode_level3(Bytes::from(builder.build())) {
        Err(DecodeError::InvalidDiscriminator { field, value }) => {
            assert_eq!(field, "product code");
            assert_eq!(value, 7);
        }
        other => panic!("expected invalid product code, got {:?}", other.map(|m| m.name())),
    }
}

#[test]
fn test_compressed_symbology_rejected() {
    let data = digital_reflectivity()
        .parameter(8, 1)
        .symbology(&[&[0, 16, 0, 0]])
        .build();
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::UnsupportedEncoding(_))
    ));
}

// ============================================================================
// Symbology, graphic and tabular blocks
// ============================================================================

#[test]
fn test_symbology_layers() {
    let radial_layer: &[u8] = &[0xAF, 0x1F, 0, 0, 0, 0];
    let text_layer: &[u8] = &[0, 1, 0, 4, 0, 0, 0, 0];
    let product = decode_graphic(
        digital_reflectivity()
            .symbology(&[radial_layer, text_layer])
            .build(),
    );

    assert!(product.description.has_symbology());
    assert!(!product.description.has_graphic());
    assert!(!product.description.has_tabular());

    let symbology = product.symbology.expect("symbology block");
    assert_eq!(symbology.block_id, 1);
    assert_eq!(symbology.number_of_layers, 2);
    assert_eq!(symbology.length_of_block, 10 + 12 + 14);
    assert_eq!(symbology.layers[0].first_packet_code(), Some(0xAF1F));
    assert_eq!(symbology.layers[1].first_packet_code(), Some(1));
    assert_eq!(symbology.layers[1].data.len(), 8);
}

#[test]
fn test_graphic_block_text_packets() {
    let mut page_two = text_packet(1, 5, 7, "PLAIN");
    page_two.extend_from_slice(&text_packet(8, 0, 10, "COLOR"));
    // Unknown packet kept opaque
    page_two.extend_from_slice(&[0, 10, 0, 2, 0xAB, 0xCD]);

    let product = decode_graphic(
        digital_reflectivity()
            .graphic(&[graphic_text_page(&["FIRST LINE", "SECOND LINE"]), page_two])
            .build(),
    );

    let graphic = product.graphic.expect("graphic block");
    assert_eq!(graphic.number_of_pages, 2);
    assert_eq!(graphic.pages[0].lines(), vec!["FIRST LINE", "SECOND LINE"]);

    let page = &graphic.pages[1];
    assert_eq!(page.page_number, 2);
    assert_eq!(page.packets.len(), 3);
    match &page.packets[0] {
        GraphicPacket::Text(text) => {
            assert_eq!(text.packet_code, 1);
            assert_eq!(text.value_of_text, None);
            assert_eq!((text.start_i, text.start_j), (5, 7));
            assert_eq!(text.text, "PLAIN");
        }
        other => panic!("expected text packet, got code {}", other.packet_code()),
    }
    match &page.packets[1] {
        GraphicPacket::Text(text) => assert_eq!(text.value_of_text, Some(3)),
        other => panic!("expected text packet, got code {}", other.packet_code()),
    }
    assert_eq!(page.packets[2].packet_code(), 10);
}

#[test]
fn test_tabular_block_pages() {
    let product = decode_graphic(
        digital_reflectivity()
            .tabular(&[&["PAGE ONE", "  SECOND LINE"], &["PAGE TWO"]])
            .build(),
    );

    let tabular = product.tabular.expect("tabular block");
    assert_eq!(tabular.block_id, 3);
    assert_eq!(tabular.message_header.message_code, products::DIGITAL_REFLECTIVITY);
    assert_eq!(
        tabular.description_block.product_code,
        products::DIGITAL_REFLECTIVITY
    );
    assert_eq!(tabular.number_of_pages, 2);
    assert_eq!(tabular.pages[0], vec!["PAGE ONE", "  SECOND LINE"]);
    assert_eq!(tabular.pages[1], vec!["PAGE TWO"]);
}

#[test]
fn test_all_three_blocks() {
    let product = decode_graphic(
        digital_reflectivity()
            .symbology(&[&[0, 1, 0, 4, 0, 0, 0, 0]])
            .graphic(&[graphic_text_page(&["GRAPHIC"])])
            .tabular(&[&["TABULAR"]])
            .build(),
    );
    assert_eq!(product.header.number_of_blocks, 5);
    assert!(product.symbology.is_some());
    assert!(product.graphic.is_some());
    assert!(product.tabular.is_some());
}

#[test]
fn test_offset_into_description_block_ignored() {
    let mut builder = digital_reflectivity();
    // 40 halfwords from the message start lands inside the description block
    builder.description.offsets[1] = 40;
    let product = decode_graphic(builder.build());
    assert!(product.graphic.is_none());
}

// ============================================================================
// Storm tracking information (product 58)
// ============================================================================

fn storm_tracking_product() -> Vec<u8> {
    let graphic_page = graphic_text_page(&[
        "  STORM ID           D7           M2",
        "  AZ/RAN          233/ 95       45/ 12",
        "  FCST MVMT       NEW           180/ 15",
        "  ERR/MEAN        NO DATA       0.5/ 0.4",
        "  DBZM HGT        53 12.1       48  8.3",
    ]);
    let forecast: &[&str] = &[
        "          STORM POSITION/FORECAST",
        " STORM  CURRENT POSITION     15 MIN     30 MIN     45 MIN     60 MIN   FCST/MEAN",
        "  ID    AZRAN  MOVEMENT      AZRAN      AZRAN      AZRAN      AZRAN    ERR (NM)",
        "  D7 100/ 20  240/ 28    241/ 26    242/ 24    243/ 22    244/ 20   0.8/ 0.9",
        "  R5 218/ 47  227/ 29    220/ 40    222/ 33    225/ 26    230/ 20   0.6/ 1.1",
    ];
    let duplicate: &[&str] = &[
        "          STORM POSITION/FORECAST",
        "  D7 110/ 30  250/ 40    251/ 36    252/ 34    253/ 32    254/ 30   1.8/ 1.9",
        "  T3 300/ 50    NEW       NO DATA    NO DATA    NO DATA    NO DATA   0.0/ 0.0",
    ];
    let adaptation: &[&str] = &[
        "     STORM TRACKING ADAPTATION PARAMETERS",
        "",
        "   2.5  (KTS)  THRESH (MINIMUM SPEED)     10  (KTS)  DEFAULT (SPEED)",
        "   225  (DEG)  DEFAULT (DIRECTION)        15  (MIN)  FORECAST INTERVAL",
        "    10         NUMBER OF PAST VOLUMES      4         NUMBER OF INTERVALS",
    ];

    GraphicProductBuilder::new(products::STORM_TRACKING_INFORMATION)
        .graphic(&[graphic_page])
        .tabular(&[forecast, duplicate, adaptation])
        .build()
}

#[test]
fn test_storm_tracking_first_write_wins() {
    let message = decode_level3(Bytes::from(storm_tracking_product())).unwrap();
    let Message::StormTrackingInformation(sti) = message else {
        panic!("expected storm tracking information");
    };

    assert_eq!(sti.storm_ids().collect::<Vec<_>>(), vec!["D7", "M2", "R5", "T3"]);

    let d7 = sti.record("D7").unwrap();
    // Position from the graphic page, movement from the first tabular page
    assert_eq!(d7.current_position.azimuth, Some(233.0));
    assert_eq!(d7.current_position.range, Some(95.0));
    assert_eq!(d7.direction, Some(240.0));
    assert_eq!(d7.speed, Some(28.0));
    assert_eq!(d7.forecast_positions[0].azimuth, Some(241.0));
    assert_eq!(d7.forecast_positions[3].range, Some(20.0));
    assert_eq!(d7.forecast_error, Some(0.8));
    assert_eq!(d7.mean_error, Some(0.9));
    assert_eq!(d7.max_dbz, Some(53));
    assert_eq!(d7.max_dbz_height, Some(12.1));
}

#[test]
fn test_storm_tracking_partial_records() {
    let message = decode_level3(Bytes::from(storm_tracking_product())).unwrap();
    let Message::StormTrackingInformation(sti) = message else {
        panic!("expected storm tracking information");
    };

    let m2 = sti.record("M2").unwrap();
    assert_eq!(m2.direction, Some(180.0));
    assert_eq!(m2.speed, Some(15.0));
    assert_eq!(m2.forecast_positions[0].azimuth, None);

    let t3 = sti.record("T3").unwrap();
    assert_eq!(t3.current_position.azimuth, Some(300.0));
    assert_eq!(t3.speed, None);
    assert_eq!(t3.max_dbz, None);

    assert!(sti.record("Z9").is_none());
}

#[test]
fn test_storm_tracking_tabular_columns() {
    let message = decode_level3(Bytes::from(storm_tracking_product())).unwrap();
    let Message::StormTrackingInformation(sti) = message else {
        panic!("expected storm tracking information");
    };

    let r5 = sti.record("R5").unwrap();
    assert_eq!(r5.current_position.azimuth, Some(218.0));
    assert_eq!(r5.current_position.range, Some(47.0));
    assert_eq!(r5.direction, Some(227.0));
    assert_eq!(r5.speed, Some(29.0));
    assert_eq!(r5.forecast_positions[0].azimuth, Some(220.0));
    assert_eq!(r5.forecast_positions[0].range, Some(40.0));
    assert_eq!(r5.forecast_positions[1].azimuth, Some(222.0));
    assert_eq!(r5.forecast_positions[2].range, Some(26.0));
    assert_eq!(r5.forecast_positions[3].azimuth, Some(230.0));
    assert_eq!(r5.forecast_error, Some(0.6));
    assert_eq!(r5.mean_error, Some(1.1));
    assert_eq!(r5.max_dbz, None);
}

#[test]
fn test_storm_tracking_adaptation_parameters() {
    let message = decode_level3(Bytes::from(storm_tracking_product())).unwrap();
    assert_eq!(
        message.as_graphic_product().map(|p| p.product_code()),
        Some(products::STORM_TRACKING_INFORMATION)
    );
    let Message::StormTrackingInformation(sti) = message else {
        panic!("expected storm tracking information");
    };

    let parameters = sti.adaptation_parameters.as_ref().unwrap();
    assert_eq!(parameters.default_direction, Some(225));
    assert_eq!(parameters.default_speed, Some(10.0));
    assert_eq!(parameters.minimum_speed_threshold, Some(2.5));
    assert_eq!(parameters.forecast_interval, Some(15));
    assert_eq!(parameters.number_of_past_volumes, Some(10));
    assert_eq!(parameters.number_of_intervals, Some(4));
    assert_eq!(parameters.correlation_speed, None);
    assert!(parameters.other.is_empty());
}

#[test]
fn test_storm_tracking_without_adaptation_page() {
    let product = GraphicProductBuilder::new(products::STORM_TRACKING_INFORMATION)
        .tabular(&[&["          STORM POSITION/FORECAST"]])
        .build();
    let Message::StormTrackingInformation(sti) = decode_level3(Bytes::from(product)).unwrap()
    else {
        panic!("expected storm tracking information");
    };
    assert!(sti.adaptation_parameters.is_none());
    assert!(sti.records.is_empty());
}

// ============================================================================
// Message header and framing
// ============================================================================

// ============================================================================
// General status, standalone tabular and radar coded messages
// ============================================================================

#[test]
fn test_general_status_message() {
    let mut elevations: Vec<i16> = (0..22).map(|i| 5 + i * 10).collect();
    elevations[0] = -2;
    let message = decode_level3(Bytes::from(general_status_message(212, &elevations))).unwrap();
    let Message::GeneralStatus(status) = message else {
        panic!("expected general status message, got {}", message.name());
    };

    assert_eq!(status.header.message_code(), 2);
    assert_eq!(status.block_divider, -1);
    assert_eq!(status.length_of_block, 182);
    assert_eq!(status.volume_coverage_pattern, 212);
    assert_eq!(status.number_of_elevation_cuts, 22);
    assert_eq!(status.rda_build_number, 2_300);
    assert_eq!(status.build_version, 19);

    let angles = status.elevation_angles();
    assert_eq!(angles.len(), 22);
    assert_approx_eq!(angles[0], -0.2, 1e-5);
    assert_approx_eq!(angles[19], 19.5, 1e-4);
    // 21st and 22nd cuts come from the trailing elevation group
    assert_approx_eq!(angles[21], 21.5, 1e-4);

    assert_approx_eq!(status.horizontal_reflectivity_calibration_correction_db(), -1.5, 1e-6);
    assert_approx_eq!(status.vertical_reflectivity_calibration_correction_db(), 0.5, 1e-6);
    assert!(status.is_super_resolution_cut(1));
    assert!(!status.is_super_resolution_cut(2));
    assert!(status.is_super_resolution_cut(3));
    assert!(!status.is_super_resolution_cut(0));
}

#[test]
fn test_general_status_bad_divider() {
    let mut data = general_status_message(212, &[5]);
    data[LEVEL3_HEADER_SIZE..LEVEL3_HEADER_SIZE + 2].copy_from_slice(&7i16.to_be_bytes());
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::InvalidField { .. })
    ));
}

#[test]
fn test_general_status_truncated() {
    let data = general_status_message(212, &[5]);
    let short = level3_header(2, (LEVEL3_HEADER_SIZE + 100) as u32, 1)
        .into_iter()
        .chain(data[LEVEL3_HEADER_SIZE..LEVEL3_HEADER_SIZE + 100].iter().copied())
        .collect::<Vec<u8>>();
    assert!(decode_level3(Bytes::from(short)).unwrap_err().is_truncation());
}

#[test]
fn test_free_text_message() {
    let data = TabularProductBuilder::new(products::FREE_TEXT_MESSAGE)
        .pages(&[
            &["FREE TEXT MESSAGE", "RADAR WILL BE DOWN FOR MAINTENANCE"],
            &["PAGE TWO"],
        ])
        .build();
    let message = decode_level3(Bytes::from(data)).unwrap();
    assert_eq!(message.product_description().map(|d| d.product_code), Some(75));

    let Message::TabularProduct(product) = message else {
        panic!("expected tabular product, got {}", message.name());
    };
    assert_eq!(product.product_code(), products::FREE_TEXT_MESSAGE);
    assert_eq!(product.pages.as_ref().map(Vec::len), Some(2));
    assert_eq!(
        product.lines().collect::<Vec<_>>(),
        vec![
            "FREE TEXT MESSAGE",
            "RADAR WILL BE DOWN FOR MAINTENANCE",
            "PAGE TWO"
        ]
    );
}

#[test]
fn test_storm_structure_tabular_product() {
    let data = TabularProductBuilder::new(products::STORM_STRUCTURE)
        .pages(&[&["STORM STRUCTURE", "  STM ID  AZ/RAN  BASE  TOP"]])
        .build();
    match decode_level3(Bytes::from(data)).unwrap() {
        Message::TabularProduct(product) => {
            assert_eq!(product.product_code(), 62);
            assert_eq!(product.lines().next(), Some("STORM STRUCTURE"));
        }
        other => panic!("expected tabular product, got {}", other.name()),
    }
}

#[test]
fn test_tabular_product_without_pages() {
    let data = TabularProductBuilder::new(products::FREE_TEXT_MESSAGE).build();
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::InvalidField { .. })
    ));
}

#[test]
fn test_radar_coded_message() {
    let data = radar_coded_message("KOUN", "ROBEE", site::ICAO);
    let message = decode_level3(Bytes::from(data)).unwrap();
    assert_eq!(message.product_description().map(|d| d.product_code), Some(74));

    let Message::RadarCoded(coded) = message else {
        panic!("expected radar coded message, got {}", message.name());
    };
    assert_eq!(coded.pup_site_identifier, "KOUN");
    assert_eq!(coded.product_category, "ROBEE");
    assert_eq!(coded.rda_site_identifier, site::ICAO);
}

#[test]
fn test_unrecognized_message_code() {
    let mut data = level3_header(103, (LEVEL3_HEADER_SIZE + 40) as u32, 2);
    data.extend_from_slice(&[0u8; 40]);

    match decode_level3(Bytes::from(data)).unwrap() {
        Message::Unrecognized(unrecognized) => {
            assert_eq!(unrecognized.family, MessageFamily::Level3);
            assert_eq!(unrecognized.message_type, 103);
            assert_eq!(unrecognized.payload_len, 40);
        }
        other => panic!("expected unrecognized message, got {}", other.name()),
    }
}

#[test]
fn test_invalid_message_code() {
    let mut data = level3_header(-5, (LEVEL3_HEADER_SIZE + 4) as u32, 1);
    data.extend_from_slice(&[0u8; 4]);
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::InvalidDiscriminator { field: "message code", value: -5 })
    ));
}

#[test]
fn test_invalid_header_fields() {
    // Length shorter than the header itself
    let data = level3_header(products::DIGITAL_REFLECTIVITY, 10, 2);
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::InvalidField { field: "length of message", .. })
    ));

    let data = level3_header(products::DIGITAL_REFLECTIVITY, 200, 0);
    assert!(matches!(
        decode_level3(Bytes::from(data)),
        Err(DecodeError::InvalidField { field: "number of blocks", .. })
    ));
}

#[test]
fn test_truncated_product() {
    let data = digital_reflectivity()
        .tabular(&[&["SOME TEXT"]])
        .build();
    for cut in [4, LEVEL3_HEADER_SIZE + 50, data.len() - 2] {
        match decode_level3(Bytes::from(data[..cut].to_vec())) {
            Err(DecodeError::TruncatedInput { .. }) => {}
            other => panic!("cut at {}: expected truncation, got {:?}", cut, other.map(|m| m.name())),
        }
    }
}

#[test]
fn test_trailing_bytes_after_product() {
    let mut data = digital_reflectivity().build();
    data.extend_from_slice(&[0xFF; 16]);
    let product = decode_graphic(data);
    assert_eq!(product.product_code(), products::DIGITAL_REFLECTIVITY);
}
