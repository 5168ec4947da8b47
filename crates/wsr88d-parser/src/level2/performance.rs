//! Performance/Maintenance Data (message type 3).
//!
//! 480 halfwords of RDA health telemetry. Fields are grouped into the
//! subsystems the RDA reports on; status words are kept raw.

use serde::Serialize;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::DecodeResult;

/// Length of the record in bytes.
pub const PERFORMANCE_MAINTENANCE_DATA_SIZE: usize = 960;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Communications {
    pub loop_back_set_status: u16,
    pub t1_output_frames: u32,
    pub t1_input_frames: u32,
    pub router_memory_used: u32,
    pub router_memory_free: u32,
    pub router_memory_utilization: u16,
    pub route_to_rpg: u16,
    pub csu_loss_of_signal: u32,
    pub csu_loss_of_frames: u32,
    pub csu_yellow_alarms: u32,
    pub csu_blue_alarms: u32,
    pub csu_24hr_errored_seconds: u32,
    pub csu_24hr_severely_errored_seconds: u32,
    pub csu_24hr_severely_errored_framing_seconds: u32,
    pub csu_24hr_unavailable_seconds: u32,
    pub csu_24hr_controlled_slip_seconds: u32,
    pub csu_24hr_path_coding_violations: u32,
    pub csu_24hr_line_errored_seconds: u32,
    pub csu_24hr_bursty_errored_seconds: u32,
    pub csu_24hr_degraded_minutes: u32,
    pub lan_switch_cpu_utilization: u32,
    pub lan_switch_memory_utilization: u16,
    pub ifdr_chasis_temperature: u16,
    pub ifdr_fpga_temperature: u16,
    pub gps_satellites: i32,
    pub ipc_status: u16,
    pub commanded_channel_control: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ame {
    pub polarization: u16,
    pub internal_temperature: f32,
    pub receiver_module_temperature: f32,
    pub bite_cal_module_temperature: f32,
    pub peltier_pulse_width_modulation: u16,
    pub peltier_status: u16,
    pub ad_converter_status: u16,
    pub state: u16,
    pub ps_3_3v_voltage: f32,
    pub ps_5v_voltage: f32,
    pub ps_6_5v_voltage: f32,
    pub ps_15v_voltage: f32,
    pub ps_48v_voltage: f32,
    pub stalo_power: f32,
    pub peltier_current: f32,
    pub adc_calibration_reference_voltage: f32,
    pub mode: u16,
    pub peltier_mode: u16,
    pub peltier_inside_fan_current: f32,
    pub peltier_outside_fan_current: f32,
    pub horizontal_tr_limiter_voltage: f32,
    pub vertical_tr_limiter_voltage: f32,
    pub adc_calibration_offset_voltage: f32,
    pub adc_calibration_gain_correction: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Power {
    pub rcp_status: u16,
    pub rcp_string: String,
    pub spip_power_buttons: u16,
    pub master_power_administrator_load: f32,
    pub expansion_power_administrator_load: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transmitter {
    pub vdc_5v_ps: u16,
    pub vdc_15v_ps: u16,
    pub vdc_28v_ps: u16,
    pub vdc_neg_15v_ps: u16,
    pub vdc_45v_ps: u16,
    pub filament_ps_voltage: u16,
    pub vacuum_pump_ps_voltage: u16,
    pub focus_coil_ps_voltage: u16,
    pub filament_ps: u16,
    pub klystron_warmup: u16,
    pub transmitter_available: u16,
    pub wg_switch_position: u16,
    pub wg_pfn_transfer_interlock: u16,
    pub maintenance_mode: u16,
    pub maintenance_required: u16,
    pub pfn_switch_position: u16,
    pub modulator_overload: u16,
    pub modulator_inv_current: u16,
    pub modulator_switch_fail: u16,
    pub main_power_voltage: u16,
    pub charging_system_fail: u16,
    pub inverse_diode_current: u16,
    pub trigger_amplifier: u16,
    pub circulator_temperature: u16,
    pub spectrum_filter_pressure: u16,
    pub wg_arc_vswr: u16,
    pub cabinet_interlock: u16,
    pub cabinet_air_temperature: u16,
    pub cabinet_airflow: u16,
    pub klystron_current: u16,
    pub klystron_filament_current: u16,
    pub klystron_vacion_current: u16,
    pub klystron_air_temperature: u16,
    pub klystron_airflow: u16,
    pub modulator_switch_maintenance: u16,
    pub post_charge_regulator_maintenance: u16,
    pub wg_pressure_humidity: u16,
    pub transmitter_overvoltage: u16,
    pub transmitter_overcurrent: u16,
    pub focus_coil_current: u16,
    pub focus_coil_airflow: u16,
    pub oil_temperature: u16,
    pub prf_limit: u16,
    pub transmitter_oil_level: u16,
    pub transmitter_battery_charging: u16,
    pub high_voltage_status: u16,
    pub transmitter_recycling_summary: u16,
    pub transmitter_inoperable: u16,
    pub transmitter_air_filter: u16,
    pub zero_test_bit: Vec<u16>,
    pub one_test_bit: Vec<u16>,
    pub xmtr_spip_interface: u16,
    pub transmitter_summary_status: u16,
    pub transmitter_rf_power: f32,
    pub horizontal_xmtr_peak_power: f32,
    pub xmtr_peak_power: f32,
    pub vertical_xmtr_peak_power: f32,
    pub xmtr_rf_avg_power: f32,
    pub xmtr_recycle_count: u32,
    pub receiver_bias: f32,
    pub transmit_imbalance: f32,
    pub xmtr_power_meter_zero: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TowerUtilities {
    pub ac_unit1_compressor_shut_off: u16,
    pub ac_unit2_compressor_shut_off: u16,
    pub generator_maintenance_required: u16,
    pub generator_battery_voltage: u16,
    pub generator_engine: u16,
    pub generator_volt_frequency: u16,
    pub power_source: u16,
    pub transitional_power_source: u16,
    pub generator_auto_run_off_switch: u16,
    pub aircraft_hazard_lighting: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EquipmentShelter {
    pub fire_detection_system: u16,
    pub fire_smoke: u16,
    pub generator_shelter_fire_smoke: u16,
    pub utility_voltage_frequency: u16,
    pub site_security_alarm: u16,
    pub security_equipment: u16,
    pub security_system: u16,
    pub receiver_connected_to_antenna: u16,
    pub radome_hatch: u16,
    pub ac_unit1_filter_dirty: u16,
    pub ac_unit2_filter_dirty: u16,
    pub temperature: f32,
    pub outside_ambient_temperature: f32,
    pub transmitter_leaving_air_temp: f32,
    pub ac_unit1_discharge_air_temp: f32,
    pub generator_shelter_temperature: f32,
    pub radome_air_temperature: f32,
    pub ac_unit2_discharge_air_temp: f32,
    pub spip_15v_ps: f32,
    pub spip_neg_15v_ps: f32,
    pub spip_28v_ps_status: u16,
    pub spip_5v_ps: f32,
    pub converted_generator_fuel_level: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AntennaPedestal {
    pub elevation_pos_dead_limit: u16,
    pub overvoltage_150v: u16,
    pub undervoltage_150v: u16,
    pub elevation_servo_amp_inhibit: u16,
    pub elevation_servo_amp_short_circuit: u16,
    pub elevation_servo_amp_overtemp: u16,
    pub elevation_motor_overtemp: u16,
    pub elevation_stow_pin: u16,
    pub elevation_housing_5v_ps: u16,
    pub elevation_neg_dead_limit: u16,
    pub elevation_pos_normal_limit: u16,
    pub elevation_neg_normal_limit: u16,
    pub elevation_encoder_light: u16,
    pub elevation_gearbox_oil: u16,
    pub elevation_handwheel: u16,
    pub elevation_amp_ps: u16,
    pub azimuth_servo_amp_inhibit: u16,
    pub azimuth_servo_amp_short_circuit: u16,
    pub azimuth_servo_amp_overtemp: u16,
    pub azimuth_motor_overtemp: u16,
    pub azimuth_stow_pin: u16,
    pub azimuth_housing_5v_ps: u16,
    pub azimuth_encoder_light: u16,
    pub azimuth_gearbox_oil: u16,
    pub azimuth_bull_gear_oil: u16,
    pub azimuth_handwheel: u16,
    pub azimuth_servo_amp_ps: u16,
    pub servo: u16,
    pub pedestal_interlock_switch: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RfGeneratorReceiver {
    pub coho_clock: u16,
    pub frequency_select_oscillator: u16,
    pub rf_stalo: u16,
    pub phase_shifted_coho: u16,
    pub receiver_9v_ps: u16,
    pub receiver_5v_ps: u16,
    pub receiver_18v_ps: u16,
    pub receiver_neg_9v_ps: u16,
    pub single_channel_rdaiu_5v_ps: u16,
    pub horizontal_short_pulse_noise: f32,
    pub horizontal_long_pulse_noise: f32,
    pub horizontal_noise_temperature: f32,
    pub vertical_short_pulse_noise: f32,
    pub vertical_long_pulse_noise: f32,
    pub vertical_noise_temperature: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Calibration {
    pub horizontal_linearity: f32,
    pub horizontal_dynamic_range: f32,
    pub horizontal_delta_dbz0: f32,
    pub vertical_delta_dbz0: f32,
    pub kd_peak_measured: f32,
    pub short_pulse_horizontal_dbz0: f32,
    pub long_pulse_horizontal_dbz0: f32,
    pub velocity_processed: u16,
    pub width_processed: u16,
    pub velocity_rf_gen: u16,
    pub width_rf_gen: u16,
    pub horizontal_i0: f32,
    pub vertical_i0: f32,
    pub vertical_dynamic_range: f32,
    pub short_pulse_vertical_dbz0: f32,
    pub long_pulse_vertical_dbz0: f32,
    pub horizontal_power_sense: f32,
    pub vertical_power_sense: f32,
    pub zdr_bias: f32,
    pub clutter_suppression_delta: f32,
    pub clutter_suppression_unfiltered_power: f32,
    pub clutter_suppression_filtered_power: f32,
    pub vertical_linearity: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileStatus {
    pub state_file_read_status: u16,
    pub state_file_write_status: u16,
    pub bypass_map_file_read_status: u16,
    pub bypass_map_file_write_status: u16,
    pub current_adaptation_file_read_status: u16,
    pub current_adaptation_file_write_status: u16,
    pub censor_zone_file_read_status: u16,
    pub censor_zone_file_write_status: u16,
    pub remote_vcp_file_read_status: u16,
    pub remote_vcp_file_write_status: u16,
    pub baseline_adaptation_file_read_status: u16,
    pub read_status_of_prf_sets: u16,
    pub clutter_filter_map_file_read_status: u16,
    pub clutter_filter_map_file_write_status: u16,
    pub general_disk_io_error: u16,
    pub rsp_status: u8,
    pub motherboard_temperature: u8,
    pub cpu1_temperature: u8,
    pub cpu2_temperature: u8,
    pub cpu1_fan_speed: u16,
    pub cpu2_fan_speed: u16,
    pub rsp_fan1_speed: u16,
    pub rsp_fan2_speed: u16,
    pub rsp_fan3_speed: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceStatus {
    pub spip_comm_status: u16,
    pub hci_comm_status: u16,
    pub signal_processor_command_status: u16,
    pub ame_communication_status: u16,
    pub rms_link_status: u16,
    pub rpg_link_status: u16,
    pub interpanel_link_status: u16,
    pub performance_check_time: u32,
    pub version: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceMaintenanceData {
    pub communications: Communications,
    pub ame: Ame,
    pub power: Power,
    pub transmitter: Transmitter,
    pub tower_utilities: TowerUtilities,
    pub equipment_shelter: EquipmentShelter,
    pub antenna_pedestal: AntennaPedestal,
    pub rf_generator_receiver: RfGeneratorReceiver,
    pub calibration: Calibration,
    pub file_status: FileStatus,
    pub device_status: DeviceStatus,
}

impl PerformanceMaintenanceData {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let start = c.position();
        let mut d = Self::default();

        let m = &mut d.communications;
        c.skip(2)?;
        m.loop_back_set_status = c.read_u16()?;
        m.t1_output_frames = c.read_u32()?;
        m.t1_input_frames = c.read_u32()?;
        m.router_memory_used = c.read_u32()?;
        m.router_memory_free = c.read_u32()?;
        m.router_memory_utilization = c.read_u16()?;
        m.route_to_rpg = c.read_u16()?;
        m.csu_loss_of_signal = c.read_u32()?;
        m.csu_loss_of_frames = c.read_u32()?;
        m.csu_yellow_alarms = c.read_u32()?;
        m.csu_blue_alarms = c.read_u32()?;
        m.csu_24hr_errored_seconds = c.read_u32()?;
        m.csu_24hr_severely_errored_seconds = c.read_u32()?;
        m.csu_24hr_severely_errored_framing_seconds = c.read_u32()?;
        m.csu_24hr_unavailable_seconds = c.read_u32()?;
        m.csu_24hr_controlled_slip_seconds = c.read_u32()?;
        m.csu_24hr_path_coding_violations = c.read_u32()?;
        m.csu_24hr_line_errored_seconds = c.read_u32()?;
        m.csu_24hr_bursty_errored_seconds = c.read_u32()?;
        m.csu_24hr_degraded_minutes = c.read_u32()?;
        c.skip(4)?;
        m.lan_switch_cpu_utilization = c.read_u32()?;
        m.lan_switch_memory_utilization = c.read_u16()?;
        c.skip(2)?;
        m.ifdr_chasis_temperature = c.read_u16()?;
        m.ifdr_fpga_temperature = c.read_u16()?;
        c.skip(4)?;
        m.gps_satellites = c.read_i32()?;
        c.skip(4)?;
        m.ipc_status = c.read_u16()?;
        m.commanded_channel_control = c.read_u16()?;
        c.skip(6)?;

        let a = &mut d.ame;
        a.polarization = c.read_u16()?;
        a.internal_temperature = c.read_f32()?;
        a.receiver_module_temperature = c.read_f32()?;
        a.bite_cal_module_temperature = c.read_f32()?;
        a.peltier_pulse_width_modulation = c.read_u16()?;
        a.peltier_status = c.read_u16()?;
        a.ad_converter_status = c.read_u16()?;
        a.state = c.read_u16()?;
        a.ps_3_3v_voltage = c.read_f32()?;
        a.ps_5v_voltage = c.read_f32()?;
        a.ps_6_5v_voltage = c.read_f32()?;
        a.ps_15v_voltage = c.read_f32()?;
        a.ps_48v_voltage = c.read_f32()?;
        a.stalo_power = c.read_f32()?;
        a.peltier_current = c.read_f32()?;
        a.adc_calibration_reference_voltage = c.read_f32()?;
        a.mode = c.read_u16()?;
        a.peltier_mode = c.read_u16()?;
        a.peltier_inside_fan_current = c.read_f32()?;
        a.peltier_outside_fan_current = c.read_f32()?;
        a.horizontal_tr_limiter_voltage = c.read_f32()?;
        a.vertical_tr_limiter_voltage = c.read_f32()?;
        a.adc_calibration_offset_voltage = c.read_f32()?;
        a.adc_calibration_gain_correction = c.read_f32()?;

        let p = &mut d.power;
        p.rcp_status = c.read_u16()?;
        p.rcp_string = c.read_string(16)?;
        p.spip_power_buttons = c.read_u16()?;
        c.skip(4)?;
        p.master_power_administrator_load = c.read_f32()?;
        p.expansion_power_administrator_load = c.read_f32()?;
        c.skip(44)?;

        let t = &mut d.transmitter;
        t.vdc_5v_ps = c.read_u16()?;
        t.vdc_15v_ps = c.read_u16()?;
        t.vdc_28v_ps = c.read_u16()?;
        t.vdc_neg_15v_ps = c.read_u16()?;
        t.vdc_45v_ps = c.read_u16()?;
        t.filament_ps_voltage = c.read_u16()?;
        t.vacuum_pump_ps_voltage = c.read_u16()?;
        t.focus_coil_ps_voltage = c.read_u16()?;
        t.filament_ps = c.read_u16()?;
        t.klystron_warmup = c.read_u16()?;
        t.transmitter_available = c.read_u16()?;
        t.wg_switch_position = c.read_u16()?;
        t.wg_pfn_transfer_interlock = c.read_u16()?;
        t.maintenance_mode = c.read_u16()?;
        t.maintenance_required = c.read_u16()?;
        t.pfn_switch_position = c.read_u16()?;
        t.modulator_overload = c.read_u16()?;
        t.modulator_inv_current = c.read_u16()?;
        t.modulator_switch_fail = c.read_u16()?;
        t.main_power_voltage = c.read_u16()?;
        t.charging_system_fail = c.read_u16()?;
        t.inverse_diode_current = c.read_u16()?;
        t.trigger_amplifier = c.read_u16()?;
        t.circulator_temperature = c.read_u16()?;
        t.spectrum_filter_pressure = c.read_u16()?;
        t.wg_arc_vswr = c.read_u16()?;
        t.cabinet_interlock = c.read_u16()?;
        t.cabinet_air_temperature = c.read_u16()?;
        t.cabinet_airflow = c.read_u16()?;
        t.klystron_current = c.read_u16()?;
        t.klystron_filament_current = c.read_u16()?;
        t.klystron_vacion_current = c.read_u16()?;
        t.klystron_air_temperature = c.read_u16()?;
        t.klystron_airflow = c.read_u16()?;
        t.modulator_switch_maintenance = c.read_u16()?;
        t.post_charge_regulator_maintenance = c.read_u16()?;
        t.wg_pressure_humidity = c.read_u16()?;
        t.transmitter_overvoltage = c.read_u16()?;
        t.transmitter_overcurrent = c.read_u16()?;
        t.focus_coil_current = c.read_u16()?;
        t.focus_coil_airflow = c.read_u16()?;
        t.oil_temperature = c.read_u16()?;
        t.prf_limit = c.read_u16()?;
        t.transmitter_oil_level = c.read_u16()?;
        t.transmitter_battery_charging = c.read_u16()?;
        t.high_voltage_status = c.read_u16()?;
        t.transmitter_recycling_summary = c.read_u16()?;
        t.transmitter_inoperable = c.read_u16()?;
        t.transmitter_air_filter = c.read_u16()?;
        t.zero_test_bit = c.read_u16_array(8)?;
        t.one_test_bit = c.read_u16_array(8)?;
        t.xmtr_spip_interface = c.read_u16()?;
        t.transmitter_summary_status = c.read_u16()?;
        c.skip(2)?;
        t.transmitter_rf_power = c.read_f32()?;
        t.horizontal_xmtr_peak_power = c.read_f32()?;
        t.xmtr_peak_power = c.read_f32()?;
        t.vertical_xmtr_peak_power = c.read_f32()?;
        t.xmtr_rf_avg_power = c.read_f32()?;
        c.skip(4)?;
        t.xmtr_recycle_count = c.read_u32()?;
        t.receiver_bias = c.read_f32()?;
        t.transmit_imbalance = c.read_f32()?;
        t.xmtr_power_meter_zero = c.read_f32()?;
        c.skip(8)?;

        let u = &mut d.tower_utilities;
        u.ac_unit1_compressor_shut_off = c.read_u16()?;
        u.ac_unit2_compressor_shut_off = c.read_u16()?;
        u.generator_maintenance_required = c.read_u16()?;
        u.generator_battery_voltage = c.read_u16()?;
        u.generator_engine = c.read_u16()?;
        u.generator_volt_frequency = c.read_u16()?;
        u.power_source = c.read_u16()?;
        u.transitional_power_source = c.read_u16()?;
        u.generator_auto_run_off_switch = c.read_u16()?;
        u.aircraft_hazard_lighting = c.read_u16()?;
        c.skip(22)?;

        let e = &mut d.equipment_shelter;
        e.fire_detection_system = c.read_u16()?;
        e.fire_smoke = c.read_u16()?;
        e.generator_shelter_fire_smoke = c.read_u16()?;
        e.utility_voltage_frequency = c.read_u16()?;
        e.site_security_alarm = c.read_u16()?;
        e.security_equipment = c.read_u16()?;
        e.security_system = c.read_u16()?;
        e.receiver_connected_to_antenna = c.read_u16()?;
        e.radome_hatch = c.read_u16()?;
        e.ac_unit1_filter_dirty = c.read_u16()?;
        e.ac_unit2_filter_dirty = c.read_u16()?;
        e.temperature = c.read_f32()?;
        e.outside_ambient_temperature = c.read_f32()?;
        e.transmitter_leaving_air_temp = c.read_f32()?;
        e.ac_unit1_discharge_air_temp = c.read_f32()?;
        e.generator_shelter_temperature = c.read_f32()?;
        e.radome_air_temperature = c.read_f32()?;
        e.ac_unit2_discharge_air_temp = c.read_f32()?;
        e.spip_15v_ps = c.read_f32()?;
        e.spip_neg_15v_ps = c.read_f32()?;
        e.spip_28v_ps_status = c.read_u16()?;
        c.skip(2)?;
        e.spip_5v_ps = c.read_f32()?;
        e.converted_generator_fuel_level = c.read_u16()?;
        c.skip(32)?;

        let ap = &mut d.antenna_pedestal;
        ap.elevation_pos_dead_limit = c.read_u16()?;
        ap.overvoltage_150v = c.read_u16()?;
        ap.undervoltage_150v = c.read_u16()?;
        ap.elevation_servo_amp_inhibit = c.read_u16()?;
        ap.elevation_servo_amp_short_circuit = c.read_u16()?;
        ap.elevation_servo_amp_overtemp = c.read_u16()?;
        ap.elevation_motor_overtemp = c.read_u16()?;
        ap.elevation_stow_pin = c.read_u16()?;
        ap.elevation_housing_5v_ps = c.read_u16()?;
        ap.elevation_neg_dead_limit = c.read_u16()?;
        ap.elevation_pos_normal_limit = c.read_u16()?;
        ap.elevation_neg_normal_limit = c.read_u16()?;
        ap.elevation_encoder_light = c.read_u16()?;
        ap.elevation_gearbox_oil = c.read_u16()?;
        ap.elevation_handwheel = c.read_u16()?;
        ap.elevation_amp_ps = c.read_u16()?;
        ap.azimuth_servo_amp_inhibit = c.read_u16()?;
        ap.azimuth_servo_amp_short_circuit = c.read_u16()?;
        ap.azimuth_servo_amp_overtemp = c.read_u16()?;
        ap.azimuth_motor_overtemp = c.read_u16()?;
        ap.azimuth_stow_pin = c.read_u16()?;
        ap.azimuth_housing_5v_ps = c.read_u16()?;
        ap.azimuth_encoder_light = c.read_u16()?;
        ap.azimuth_gearbox_oil = c.read_u16()?;
        ap.azimuth_bull_gear_oil = c.read_u16()?;
        ap.azimuth_handwheel = c.read_u16()?;
        ap.azimuth_servo_amp_ps = c.read_u16()?;
        ap.servo = c.read_u16()?;
        ap.pedestal_interlock_switch = c.read_u16()?;
        c.skip(24)?;

        let r = &mut d.rf_generator_receiver;
        r.coho_clock = c.read_u16()?;
        r.frequency_select_oscillator = c.read_u16()?;
        r.rf_stalo = c.read_u16()?;
        r.phase_shifted_coho = c.read_u16()?;
        r.receiver_9v_ps = c.read_u16()?;
        r.receiver_5v_ps = c.read_u16()?;
        r.receiver_18v_ps = c.read_u16()?;
        r.receiver_neg_9v_ps = c.read_u16()?;
        r.single_channel_rdaiu_5v_ps = c.read_u16()?;
        c.skip(2)?;
        r.horizontal_short_pulse_noise = c.read_f32()?;
        r.horizontal_long_pulse_noise = c.read_f32()?;
        r.horizontal_noise_temperature = c.read_f32()?;
        r.vertical_short_pulse_noise = c.read_f32()?;
        r.vertical_long_pulse_noise = c.read_f32()?;
        r.vertical_noise_temperature = c.read_f32()?;

        let k = &mut d.calibration;
        k.horizontal_linearity = c.read_f32()?;
        k.horizontal_dynamic_range = c.read_f32()?;
        k.horizontal_delta_dbz0 = c.read_f32()?;
        k.vertical_delta_dbz0 = c.read_f32()?;
        k.kd_peak_measured = c.read_f32()?;
        c.skip(4)?;
        k.short_pulse_horizontal_dbz0 = c.read_f32()?;
        k.long_pulse_horizontal_dbz0 = c.read_f32()?;
        k.velocity_processed = c.read_u16()?;
        k.width_processed = c.read_u16()?;
        k.velocity_rf_gen = c.read_u16()?;
        k.width_rf_gen = c.read_u16()?;
        k.horizontal_i0 = c.read_f32()?;
        k.vertical_i0 = c.read_f32()?;
        k.vertical_dynamic_range = c.read_f32()?;
        k.short_pulse_vertical_dbz0 = c.read_f32()?;
        k.long_pulse_vertical_dbz0 = c.read_f32()?;
        c.skip(8)?;
        k.horizontal_power_sense = c.read_f32()?;
        k.vertical_power_sense = c.read_f32()?;
        k.zdr_bias = c.read_f32()?;
        c.skip(12)?;
        k.clutter_suppression_delta = c.read_f32()?;
        k.clutter_suppression_unfiltered_power = c.read_f32()?;
        k.clutter_suppression_filtered_power = c.read_f32()?;
        c.skip(20)?;
        k.vertical_linearity = c.read_f32()?;
        c.skip(8)?;

        let f = &mut d.file_status;
        f.state_file_read_status = c.read_u16()?;
        f.state_file_write_status = c.read_u16()?;
        f.bypass_map_file_read_status = c.read_u16()?;
        f.bypass_map_file_write_status = c.read_u16()?;
        c.skip(4)?;
        f.current_adaptation_file_read_status = c.read_u16()?;
        f.current_adaptation_file_write_status = c.read_u16()?;
        f.censor_zone_file_read_status = c.read_u16()?;
        f.censor_zone_file_write_status = c.read_u16()?;
        f.remote_vcp_file_read_status = c.read_u16()?;
        f.remote_vcp_file_write_status = c.read_u16()?;
        f.baseline_adaptation_file_read_status = c.read_u16()?;
        f.read_status_of_prf_sets = c.read_u16()?;
        f.clutter_filter_map_file_read_status = c.read_u16()?;
        f.clutter_filter_map_file_write_status = c.read_u16()?;
        f.general_disk_io_error = c.read_u16()?;
        f.rsp_status = c.read_u8()?;
        f.motherboard_temperature = c.read_u8()?;
        f.cpu1_temperature = c.read_u8()?;
        f.cpu2_temperature = c.read_u8()?;
        f.cpu1_fan_speed = c.read_u16()?;
        f.cpu2_fan_speed = c.read_u16()?;
        f.rsp_fan1_speed = c.read_u16()?;
        f.rsp_fan2_speed = c.read_u16()?;
        f.rsp_fan3_speed = c.read_u16()?;
        c.skip(12)?;

        let s = &mut d.device_status;
        s.spip_comm_status = c.read_u16()?;
        s.hci_comm_status = c.read_u16()?;
        c.skip(2)?;
        s.signal_processor_command_status = c.read_u16()?;
        s.ame_communication_status = c.read_u16()?;
        s.rms_link_status = c.read_u16()?;
        s.rpg_link_status = c.read_u16()?;
        s.interpanel_link_status = c.read_u16()?;
        s.performance_check_time = c.read_u32()?;
        c.skip(18)?;
        s.version = c.read_u16()?;

        trace!(
            bytes = c.position() - start,
            version = d.device_status.version,
            "Parsed performance/maintenance data"
        );
        Ok(d)
    }
}
