//! Named enumerations of the FIT profile.
//!
//! Each table maps a code to its symbolic name. Codes a table does not list
//! decode as unknown values carrying the code.

use crate::sans::value::EnumValue;

/// A code to name lookup table.
#[derive(Debug)]
pub struct EnumTable {
    pub entries: &'static [(u64, &'static str)],
}

impl EnumTable {
    pub fn lookup(&self, code: u64) -> EnumValue {
        let name = self
            .entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, n)| *n);

        EnumValue { code, name }
    }
}

pub static FILE: EnumTable = EnumTable {
    entries: &[
        (1, "device"),
        (2, "settings"),
        (3, "sport"),
        (4, "activity"),
        (5, "workout"),
        (6, "course"),
        (7, "schedules"),
        (9, "weight"),
        (10, "totals"),
        (11, "goals"),
        (14, "blood_pressure"),
        (15, "monitoring_a"),
        (20, "activity_summary"),
        (28, "monitoring_daily"),
        (32, "monitoring_b"),
        (34, "segment"),
        (35, "segment_list"),
        (40, "exd_configuration"),
    ],
};

pub static MANUFACTURER: EnumTable = EnumTable {
    entries: &[
        (1, "garmin"),
        (2, "garmin_fr405_antfs"),
        (3, "zephyr"),
        (4, "dayton"),
        (5, "idt"),
        (6, "srm"),
        (7, "quarq"),
        (8, "ibike"),
        (9, "saris"),
        (10, "spark_hk"),
        (11, "tanita"),
        (12, "echowell"),
        (13, "dynastream_oem"),
        (14, "nautilus"),
        (15, "dynastream"),
        (16, "timex"),
        (17, "metrigear"),
        (18, "xelic"),
        (19, "beurer"),
        (20, "cardiosport"),
        (21, "a_and_d"),
        (22, "hmm"),
        (23, "suunto"),
        (24, "thita_elektronik"),
        (25, "gpulse"),
        (26, "clean_mobile"),
        (27, "pedal_brain"),
        (28, "peaksware"),
        (29, "saxonar"),
        (30, "lemond_fitness"),
        (31, "dexcom"),
        (32, "wahoo_fitness"),
        (33, "octane_fitness"),
        (34, "archinoetics"),
        (35, "the_hurt_box"),
        (36, "citizen_systems"),
        (37, "magellan"),
        (38, "osynce"),
        (39, "holux"),
        (40, "concept2"),
        (255, "development"),
    ],
};

pub static GARMIN_PRODUCT: EnumTable = EnumTable {
    entries: &[
        (1, "hrm1"),
        (2, "axh01"),
        (3, "axb01"),
        (4, "axb02"),
        (5, "hrm2ss"),
        (6, "dsi_alf02"),
        (717, "fr405"),
        (1018, "fr310xt"),
        (1036, "edge500"),
        (1169, "edge800"),
        (20119, "training_center"),
        (65534, "connect"),
    ],
};

pub static SPORT: EnumTable = EnumTable {
    entries: &[
        (0, "generic"),
        (1, "running"),
        (2, "cycling"),
        (3, "transition"),
        (4, "fitness_equipment"),
        (5, "swimming"),
        (6, "basketball"),
        (7, "soccer"),
        (8, "tennis"),
        (9, "american_football"),
        (10, "training"),
        (11, "walking"),
        (12, "cross_country_skiing"),
        (13, "alpine_skiing"),
        (14, "snowboarding"),
        (15, "rowing"),
        (16, "mountaineering"),
        (17, "hiking"),
        (18, "multisport"),
        (19, "paddling"),
        (254, "all"),
    ],
};

pub static SUB_SPORT: EnumTable = EnumTable {
    entries: &[
        (0, "generic"),
        (1, "treadmill"),
        (2, "street"),
        (3, "trail"),
        (4, "track"),
        (5, "spin"),
        (6, "indoor_cycling"),
        (7, "road"),
        (8, "mountain"),
        (9, "downhill"),
        (10, "recumbent"),
        (11, "cyclocross"),
        (12, "hand_cycling"),
        (13, "track_cycling"),
        (14, "indoor_rowing"),
        (15, "elliptical"),
        (16, "stair_climbing"),
        (17, "lap_swimming"),
        (18, "open_water"),
        (254, "all"),
    ],
};

pub static EVENT: EnumTable = EnumTable {
    entries: &[
        (0, "timer"),
        (3, "workout"),
        (4, "workout_step"),
        (5, "power_down"),
        (6, "power_up"),
        (7, "off_course"),
        (8, "session"),
        (9, "lap"),
        (10, "course_point"),
        (11, "battery"),
        (12, "virtual_partner_pace"),
        (13, "hr_high_alert"),
        (14, "hr_low_alert"),
        (15, "speed_high_alert"),
        (16, "speed_low_alert"),
        (17, "cad_high_alert"),
        (18, "cad_low_alert"),
        (19, "power_high_alert"),
        (20, "power_low_alert"),
        (21, "recovery_hr"),
        (22, "battery_low"),
        (26, "activity"),
        (27, "fitness_equipment"),
        (28, "length"),
        (32, "user_marker"),
        (33, "sport_point"),
        (36, "calibration"),
        (42, "front_gear_change"),
        (43, "rear_gear_change"),
        (44, "rider_position_change"),
    ],
};

pub static EVENT_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "start"),
        (1, "stop"),
        (2, "consecutive_depreciated"),
        (3, "marker"),
        (4, "stop_all"),
        (5, "begin_depreciated"),
        (6, "end_depreciated"),
        (7, "end_all_depreciated"),
        (8, "stop_disable"),
        (9, "stop_disable_all"),
    ],
};

pub static TIMER_TRIGGER: EnumTable = EnumTable {
    entries: &[(0, "manual"), (1, "auto"), (2, "fitness_equipment")],
};

pub static RIDER_POSITION_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "seated"),
        (1, "standing"),
        (2, "transition_to_seated"),
        (3, "transition_to_standing"),
    ],
};

pub static SOURCE_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "ant"),
        (1, "antplus"),
        (2, "bluetooth"),
        (3, "bluetooth_low_energy"),
        (4, "wifi"),
        (5, "local"),
    ],
};

pub static ANTPLUS_DEVICE_TYPE: EnumTable = EnumTable {
    entries: &[
        (1, "antfs"),
        (11, "bike_power"),
        (12, "environment_sensor_legacy"),
        (15, "multi_sport_speed_distance"),
        (16, "control"),
        (17, "fitness_equipment"),
        (18, "blood_pressure"),
        (19, "geocache_node"),
        (20, "light_electric_vehicle"),
        (25, "env_sensor"),
        (26, "racquet"),
        (27, "control_hub"),
        (31, "muscle_oxygen"),
        (35, "bike_light_main"),
        (36, "bike_light_shared"),
        (38, "exd"),
        (40, "bike_radar"),
        (119, "weight_scale"),
        (120, "heart_rate"),
        (121, "bike_speed_cadence"),
        (122, "bike_cadence"),
        (123, "bike_speed"),
        (124, "stride_speed_distance"),
    ],
};

pub static BLE_DEVICE_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "connected_gps"),
        (1, "heart_rate"),
        (2, "bike_power"),
        (3, "bike_speed_cadence"),
        (4, "bike_speed"),
        (5, "bike_cadence"),
        (6, "footpod"),
        (7, "bike_trainer"),
    ],
};

pub static LOCAL_DEVICE_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "gps"),
        (1, "glonass"),
        (2, "gps_glonass"),
        (3, "accelerometer"),
        (4, "barometer"),
        (5, "temperature"),
        (10, "whr"),
        (12, "sensor_hub"),
    ],
};

pub static BATTERY_STATUS: EnumTable = EnumTable {
    entries: &[
        (1, "new"),
        (2, "good"),
        (3, "ok"),
        (4, "low"),
        (5, "critical"),
        (6, "charging"),
        (7, "unknown"),
    ],
};

pub static ACTIVITY: EnumTable = EnumTable {
    entries: &[(0, "manual"), (1, "auto_multi_sport")],
};

pub static ACTIVITY_TYPE: EnumTable = EnumTable {
    entries: &[
        (0, "generic"),
        (1, "running"),
        (2, "cycling"),
        (3, "transition"),
        (4, "fitness_equipment"),
        (5, "swimming"),
        (6, "walking"),
        (8, "sedentary"),
        (254, "all"),
    ],
};

pub static GENDER: EnumTable = EnumTable {
    entries: &[(0, "female"), (1, "male")],
};
