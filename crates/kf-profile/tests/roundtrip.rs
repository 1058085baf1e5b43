use kf_profile::{load_json, load_yaml, save_json, save_yaml, validate_profile, FiringProfile};
use kf_program::{FiringParameters, ParamField};

#[test]
fn roundtrip_yaml_default_profile() {
    let profile = FiringProfile::default();
    validate_profile(&profile).unwrap();

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("kf_profile_roundtrip_default.yaml");

    save_yaml(&path, &profile).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(profile, loaded);
}

#[test]
fn roundtrip_json_edited_profile() {
    // Commit an edit (ramp 1 target raised from 100 to 150), persist, reload.
    let mut params = FiringParameters::default();
    params.edit(ParamField::RampTarget(0), 5);
    assert_eq!(params.ramps[0].target_c, 150.0);

    let profile: FiringProfile = params.into();

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("kf_profile_roundtrip_edited.json");

    save_json(&path, &profile).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(profile, loaded);
    assert_eq!(loaded.into_parameters(), params);
}

#[test]
fn roundtrip_yaml_preserves_every_field() {
    let profile = FiringProfile {
        version: 1,
        ramp1_rate_c_per_hr: 31.0,
        ramp1_target_c: 110.0,
        ramp1_soak_min: 7.0,
        ramp2_rate_c_per_hr: 241.0,
        ramp2_target_c: 560.0,
        ramp2_soak_min: 12.0,
        ramp3_rate_c_per_hr: 199.0,
        ramp3_target_c: 1090.0,
        ramp3_soak_min: 25.0,
        cooldown_rate_c_per_hr: 141.0,
        cooldown_target_c: 190.0,
    };

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("kf_profile_roundtrip_fields.yaml");

    save_yaml(&path, &profile).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(profile, loaded);
}

#[test]
fn save_rejects_invalid_profile() {
    let mut profile = FiringProfile::default();
    profile.ramp1_target_c = f64::INFINITY;

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("kf_profile_invalid.yaml");

    assert!(save_yaml(&path, &profile).is_err());
}
