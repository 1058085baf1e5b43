//! Lumped-parameter kiln energy balance.

use kf_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};
use crate::sensor::LagBuffer;

/// Radiative losses engage above this temperature (degC).
const RADIATION_ONSET_C: f64 = 500.0;

/// Reference absolute temperature for the radiative correction (K), the
/// onset temperature in kelvin.
const RADIATION_REF_K: f64 = 773.15;

/// Weight of the radiative correction relative to the convective loss.
const RADIATION_WEIGHT: f64 = 0.1;

/// Physical parameters of the simulated kiln.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    /// Heat capacity of the kiln (J/degC).
    pub thermal_mass_j_per_c: f64,
    /// Heating element power at 100% duty (W).
    pub max_heating_power_w: f64,
    /// Convective loss coefficient (W/degC above ambient).
    pub loss_coefficient_w_per_c: f64,
    /// Room temperature (degC); the plant never cools below it passively.
    pub ambient_c: f64,
    /// Thermocouple response lag (seconds).
    pub sensor_lag_s: f64,
}

impl Default for PlantConfig {
    /// A mid-size hobby kiln.
    fn default() -> Self {
        Self {
            thermal_mass_j_per_c: 50_000.0,
            max_heating_power_w: 3000.0,
            loss_coefficient_w_per_c: 15.0,
            ambient_c: 20.0,
            sensor_lag_s: 2.0,
        }
    }
}

impl PlantConfig {
    fn validate(&self) -> PlantResult<()> {
        for (v, what) in [
            (self.thermal_mass_j_per_c, "thermal_mass_j_per_c"),
            (self.max_heating_power_w, "max_heating_power_w"),
            (self.loss_coefficient_w_per_c, "loss_coefficient_w_per_c"),
            (self.ambient_c, "ambient_c"),
            (self.sensor_lag_s, "sensor_lag_s"),
        ] {
            if ensure_finite(v, what).is_err() {
                return Err(PlantError::InvalidArg {
                    what: "plant parameters must be finite",
                });
            }
        }
        if self.thermal_mass_j_per_c <= 0.0 {
            return Err(PlantError::NonPhysical {
                what: "thermal_mass_j_per_c must be positive",
            });
        }
        if self.max_heating_power_w <= 0.0 {
            return Err(PlantError::NonPhysical {
                what: "max_heating_power_w must be positive",
            });
        }
        if self.loss_coefficient_w_per_c < 0.0 {
            return Err(PlantError::NonPhysical {
                what: "loss_coefficient_w_per_c must be non-negative",
            });
        }
        if self.sensor_lag_s < 0.0 {
            return Err(PlantError::NonPhysical {
                what: "sensor_lag_s must be non-negative",
            });
        }
        Ok(())
    }
}

/// Simulated kiln: actual temperature, lagged sensor reading, and the last
/// applied heater command.
#[derive(Debug, Clone, PartialEq)]
pub struct KilnPlant {
    cfg: PlantConfig,
    actual_c: f64,
    lag: LagBuffer,
    power_fraction: f64,
    relay_on: bool,
}

impl KilnPlant {
    /// Create a plant resting at ambient temperature.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is non-physical.
    pub fn new(cfg: PlantConfig) -> PlantResult<Self> {
        cfg.validate()?;
        let lag = LagBuffer::new(cfg.sensor_lag_s);
        Ok(Self {
            cfg,
            actual_c: cfg.ambient_c,
            lag,
            power_fraction: 0.0,
            relay_on: false,
        })
    }

    /// Advance the plant by `dt_s` seconds under the given heater command.
    ///
    /// `power_fraction` is the commanded duty in [0, 1]; heating only flows
    /// while the relay is closed. Passive loss never pulls the plant below
    /// ambient.
    pub fn update(&mut self, dt_s: f64, power_fraction: f64, relay_on: bool) {
        let dt_s = dt_s.max(0.0);
        self.power_fraction = power_fraction.clamp(0.0, 1.0);
        self.relay_on = relay_on;

        let heating_w = if relay_on {
            self.power_fraction * self.cfg.max_heating_power_w
        } else {
            0.0
        };

        // Newton cooling, linear in the differential above ambient.
        let temp_diff = self.actual_c - self.cfg.ambient_c;
        let mut loss_w = self.cfg.loss_coefficient_w_per_c * temp_diff;

        // Simplified Stefan-Boltzmann correction, significant only at high
        // temperature.
        if self.actual_c > RADIATION_ONSET_C {
            let radiation_factor = ((self.actual_c + 273.15) / RADIATION_REF_K).powi(4);
            loss_w += self.cfg.loss_coefficient_w_per_c * temp_diff * radiation_factor * RADIATION_WEIGHT;
        }

        let net_w = heating_w - loss_w;
        self.actual_c += net_w * dt_s / self.cfg.thermal_mass_j_per_c;

        if self.actual_c < self.cfg.ambient_c {
            self.actual_c = self.cfg.ambient_c;
        }

        self.lag.push(self.actual_c);
    }

    /// The lagged, sensor-equivalent reading (degC). This is what the
    /// controller sees.
    pub fn temperature(&self) -> f64 {
        self.lag.reading(self.actual_c)
    }

    /// The unfiltered internal temperature (degC). Validation and testing
    /// only; not visible to the controller.
    pub fn actual_temperature(&self) -> f64 {
        self.actual_c
    }

    /// Observed heating rate at the sensor (degC/hour).
    pub fn heating_rate_c_per_hr(&self) -> f64 {
        self.lag.observed_rate_c_per_hr()
    }

    /// True while the relay is closed with non-zero commanded power.
    pub fn is_heating(&self) -> bool {
        self.relay_on && self.power_fraction > 0.0
    }

    pub fn power_fraction(&self) -> f64 {
        self.power_fraction
    }

    pub fn relay_on(&self) -> bool {
        self.relay_on
    }

    /// Return the plant to ambient rest.
    pub fn reset(&mut self) {
        self.actual_c = self.cfg.ambient_c;
        self.power_fraction = 0.0;
        self.relay_on = false;
        self.lag.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant() -> KilnPlant {
        KilnPlant::new(PlantConfig::default()).unwrap()
    }

    #[test]
    fn rejects_non_physical_config() {
        let mut cfg = PlantConfig::default();
        cfg.thermal_mass_j_per_c = 0.0;
        assert!(KilnPlant::new(cfg).is_err());

        let mut cfg = PlantConfig::default();
        cfg.max_heating_power_w = -1.0;
        assert!(KilnPlant::new(cfg).is_err());

        let mut cfg = PlantConfig::default();
        cfg.ambient_c = f64::NAN;
        assert!(KilnPlant::new(cfg).is_err());
    }

    #[test]
    fn starts_at_ambient() {
        let p = plant();
        assert_eq!(p.actual_temperature(), 20.0);
        assert_eq!(p.temperature(), 20.0);
    }

    #[test]
    fn full_power_heats_the_kiln() {
        let mut p = plant();
        for _ in 0..600 {
            p.update(1.0, 1.0, true);
        }
        // 3000 W into 50 kJ/degC for 10 minutes, minus modest losses.
        assert!(p.actual_temperature() > 45.0);
        assert!(p.actual_temperature() < 56.0);
    }

    #[test]
    fn open_relay_blocks_heating() {
        let mut p = plant();
        for _ in 0..600 {
            p.update(1.0, 1.0, false);
        }
        assert_eq!(p.actual_temperature(), 20.0);
        assert!(!p.is_heating());
    }

    #[test]
    fn cools_toward_ambient_never_below() {
        let mut p = plant();
        // Heat up first.
        for _ in 0..3600 {
            p.update(1.0, 1.0, true);
        }
        let hot = p.actual_temperature();
        assert!(hot > 100.0);

        // Unpowered: converges toward ambient, never below it.
        let mut last = hot;
        for _ in 0..200_000 {
            p.update(1.0, 0.0, false);
            let t = p.actual_temperature();
            assert!(t <= last + 1e-9);
            assert!(t >= 20.0);
            last = t;
        }
        assert!((p.actual_temperature() - 20.0).abs() < 1.0);
    }

    #[test]
    fn radiative_losses_engage_at_high_temperature() {
        let mut cold = plant();
        let mut hot = plant();
        cold.actual_c = 400.0;
        hot.actual_c = 800.0;

        cold.update(1.0, 0.0, false);
        hot.update(1.0, 0.0, false);

        let cold_drop = 400.0 - cold.actual_temperature();
        let hot_drop = 800.0 - hot.actual_temperature();

        // Per degree of differential, the hot kiln loses disproportionately.
        let cold_per_deg = cold_drop / 380.0;
        let hot_per_deg = hot_drop / 780.0;
        assert!(hot_per_deg > cold_per_deg * 1.2);
    }

    #[test]
    fn sensor_reading_lags_the_plant() {
        let mut p = plant();
        for _ in 0..100 {
            p.update(1.0, 1.0, true);
        }
        assert!(p.temperature() < p.actual_temperature());
    }

    #[test]
    fn reset_returns_to_ambient_rest() {
        let mut p = plant();
        for _ in 0..100 {
            p.update(1.0, 1.0, true);
        }
        p.reset();
        assert_eq!(p.actual_temperature(), 20.0);
        assert_eq!(p.temperature(), 20.0);
        assert!(!p.relay_on());
    }

    #[test]
    fn power_fraction_is_clamped() {
        let mut p = plant();
        p.update(1.0, 2.0, true);
        assert_eq!(p.power_fraction(), 1.0);
        p.update(1.0, -0.5, true);
        assert_eq!(p.power_fraction(), 0.0);
    }
}
