//! Year-by-year career projection over an aging curve

use super::config::{AccumulationPolicy, ProjectionConfig};
use super::input::ProjectionInput;
use crate::curves::{AgeDeltaTable, CurveSet};
use crate::error::ProjectionError;
use rayon::prelude::*;
use serde::Serialize;

/// One projected season
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedYear {
    /// Years after the observed season (0 = first projected season)
    pub years_from_now: u32,
    /// Age the delta was interpolated at
    pub age: f64,
    /// Interpolated delta applied this year
    pub delta: f64,
    /// Projected value after applying the delta
    pub value: f64,
    /// Amount added to the total (zero for non-positive years)
    pub contribution: f64,
}

/// Projection engine bound to one curve and configuration
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    table: AgeDeltaTable,
}

impl ProjectionEngine {
    /// Create an engine over the built-in curves
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        Self::with_curves(config, &CurveSet::default())
    }

    /// Create an engine selecting its curve from `curves`
    pub fn with_curves(config: ProjectionConfig, curves: &CurveSet) -> Result<Self, ProjectionError> {
        config.validate()?;
        let table = curves.require(config.role, config.curve_shape)?.clone();

        log::debug!(
            "projection engine: {} {} curve, policy={:?}, discount={} ({}), ceiling={}",
            config.role,
            config.curve_shape,
            config.policy,
            config.discount,
            config.discount_rate,
            config.ceiling_age
        );

        Ok(Self { config, table })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// The curve selected for this engine's role and shape
    pub fn table(&self) -> &AgeDeltaTable {
        &self.table
    }

    /// Projected career total for one input, at full precision
    pub fn project(&self, input: &ProjectionInput) -> Result<f64, ProjectionError> {
        input.validate()?;
        Ok(self.run(input.age, input.current_value, |_| {}))
    }

    /// Projected career total from a raw age and value
    pub fn project_value(&self, age: f64, current_value: f64) -> Result<f64, ProjectionError> {
        self.project(&ProjectionInput { age, current_value })
    }

    /// Season-by-season detail behind [`ProjectionEngine::project`]
    pub fn trajectory(&self, input: &ProjectionInput) -> Result<Vec<ProjectedYear>, ProjectionError> {
        input.validate()?;
        let mut years = Vec::new();
        self.run(input.age, input.current_value, |year| years.push(year));
        Ok(years)
    }

    /// Project many inputs in parallel
    ///
    /// Results are in input order; an invalid row yields its own error
    /// without affecting any other row.
    pub fn project_batch(&self, inputs: &[ProjectionInput]) -> Vec<Result<f64, ProjectionError>> {
        let results: Vec<Result<f64, ProjectionError>> =
            inputs.par_iter().map(|input| self.project(input)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        log::debug!("projected {} rows ({} failed)", results.len(), failed);
        results
    }

    /// Walk the curve from `start_age`, reporting each projected year to `visit`
    fn run<F: FnMut(ProjectedYear)>(&self, start_age: f64, start_value: f64, mut visit: F) -> f64 {
        let stop_on_non_positive = self.config.policy == AccumulationPolicy::StopOnNonPositive;

        let mut total = if stop_on_non_positive {
            start_value
        } else {
            start_value.max(0.0)
        };
        let mut value = start_value;
        let mut years_from_now = 0u32;
        let mut age = start_age;

        while age < self.config.ceiling_age {
            let delta = self.table.interpolate(age);
            value += delta;

            let contribution = if value > 0.0 {
                self.discounted(value, years_from_now)
            } else {
                0.0
            };
            total += contribution;

            visit(ProjectedYear {
                years_from_now,
                age,
                delta,
                value,
                contribution,
            });

            if stop_on_non_positive && value <= 0.0 {
                break;
            }

            years_from_now += 1;
            age = start_age + years_from_now as f64;
        }

        total
    }

    fn discounted(&self, value: f64, years_from_now: u32) -> f64 {
        if self.config.discount {
            value / (1.0 + self.config.discount_rate).powi(years_from_now as i32)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{CurveShape, Role};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn engine(role: Role, shape: CurveShape) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig::new(role, shape)).unwrap()
    }

    fn hitter() -> ProjectionEngine {
        engine(Role::Hitter, CurveShape::Standard)
    }

    #[test]
    fn test_young_hitter_grows() {
        let total = hitter().project_value(24.0, 3.0).unwrap();
        assert!(total > 3.0);

        let total = hitter().project_value(22.0, 3.0).unwrap();
        assert!(total > 3.0);
    }

    #[test]
    fn test_old_hitter_bounded() {
        // 3.0 + (3.0 - 1.35) + (1.65 - 1.55), then non-positive
        let total = hitter().project_value(38.0, 3.0).unwrap();
        assert!(total > 0.0 && total < 20.0);
        assert_relative_eq!(total, 3.0 + 1.65 + 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_hand_worked_pitcher_projection() {
        // Ages 40..45 on the standard pitcher curve, starting at 2.0
        // 40: -1.05 -> 0.95, 41: -1.15 -> -0.20, then stays negative
        let pitcher = engine(Role::Pitcher, CurveShape::Standard);
        let total = pitcher.project_value(40.0, 2.0).unwrap();
        assert_relative_eq!(total, 2.0 + 0.95, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_age_uses_interpolated_delta() {
        let config = ProjectionConfig::new(Role::Hitter, CurveShape::Standard).with_ceiling_age(38.0);
        let engine = ProjectionEngine::new(config).unwrap();

        // Single step at 37.5: delta = 0.5 * -1.15 + 0.5 * -1.35 = -1.25
        let years = engine.trajectory(&ProjectionInput::new(37.5, 2.0).unwrap()).unwrap();
        assert_eq!(years.len(), 1);
        assert_relative_eq!(years[0].delta, -1.25, epsilon = 1e-12);
        assert_relative_eq!(years[0].value, 0.75, epsilon = 1e-12);

        let total = engine.project_value(37.5, 2.0).unwrap();
        assert_relative_eq!(total, 2.75, epsilon = 1e-12);
    }

    #[test]
    fn test_pitcher_and_hitter_differ() {
        let h = hitter().project_value(24.0, 3.0).unwrap();
        let p = engine(Role::Pitcher, CurveShape::Standard).project_value(24.0, 3.0).unwrap();
        assert_ne!(h, p);
    }

    #[test]
    fn test_flat_curve_more_conservative_when_young() {
        for role in Role::ALL {
            for age in [20.0, 22.5, 24.0, 26.0] {
                let standard = engine(role, CurveShape::Standard).project_value(age, 3.0).unwrap();
                let flat = engine(role, CurveShape::Flat).project_value(age, 3.0).unwrap();
                assert!(flat <= standard, "{role} age {age}: flat {flat} > standard {standard}");
            }
        }
        let standard = hitter().project_value(24.0, 3.0).unwrap();
        let flat = engine(Role::Hitter, CurveShape::Flat).project_value(24.0, 3.0).unwrap();
        assert!(flat < standard);
    }

    #[test]
    fn test_discount_reduces_total() {
        let plain = hitter().project_value(24.0, 3.0).unwrap();
        let discounted = ProjectionEngine::new(ProjectionConfig::default().with_discount(0.10))
            .unwrap()
            .project_value(24.0, 3.0)
            .unwrap();
        assert!(discounted < plain);
    }

    #[test]
    fn test_discount_first_projected_year_undiscounted() {
        // Ceiling one year out: a single projected year at years_from_now = 0
        let config = ProjectionConfig::default().with_discount(0.10).with_ceiling_age(25.0);
        let discounted = ProjectionEngine::new(config).unwrap().project_value(24.0, 3.0).unwrap();
        let plain = ProjectionEngine::new(ProjectionConfig::default().with_ceiling_age(25.0))
            .unwrap()
            .project_value(24.0, 3.0)
            .unwrap();
        assert_eq!(discounted, plain);
        assert_relative_eq!(plain, 3.0 + 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factor_per_year() {
        let config = ProjectionConfig::default().with_discount(0.10);
        let engine = ProjectionEngine::new(config).unwrap();
        let years = engine.trajectory(&ProjectionInput::new(24.0, 3.0).unwrap()).unwrap();

        assert_relative_eq!(years[0].contribution, years[0].value, epsilon = 1e-12);
        assert_relative_eq!(years[1].contribution, years[1].value / 1.1, epsilon = 1e-12);
        assert_relative_eq!(years[2].contribution, years[2].value / 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulate_always_floors_start_and_continues() {
        let engine = hitter();
        assert_eq!(engine.project_value(40.0, -1.0).unwrap(), 0.0);

        // Runs every year to the ceiling even after value turns negative
        let years = engine.trajectory(&ProjectionInput::new(38.0, 3.0).unwrap()).unwrap();
        assert_eq!(years.len(), 8);
        assert_eq!(years.last().unwrap().age, 45.0);
        assert!(years[2..].iter().all(|y| y.contribution == 0.0));
    }

    #[test]
    fn test_accumulate_always_resumes_after_dip() {
        // Non-monotonic curve: value dips below zero, then recovers
        let mut curves = CurveSet::empty();
        curves.insert(
            Role::Hitter,
            CurveShape::Standard,
            AgeDeltaTable::from_loaded(&[(30, -2.0), (31, 3.0), (32, 0.0)]),
        );
        let config = ProjectionConfig::default().with_ceiling_age(33.0);
        let always = ProjectionEngine::with_curves(config.clone(), &curves).unwrap();
        let stop = ProjectionEngine::with_curves(
            config.with_policy(AccumulationPolicy::StopOnNonPositive),
            &curves,
        )
        .unwrap();

        // 1.0 -> -1.0 (skip) -> 2.0 -> 2.0
        assert_relative_eq!(always.project_value(30.0, 1.0).unwrap(), 1.0 + 2.0 + 2.0, epsilon = 1e-12);
        // Stops at the dip
        assert_relative_eq!(stop.project_value(30.0, 1.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stop_on_non_positive_keeps_negative_start() {
        let config = ProjectionConfig::default().with_policy(AccumulationPolicy::StopOnNonPositive);
        let engine = ProjectionEngine::new(config).unwrap();

        assert_relative_eq!(engine.project_value(30.0, -0.5).unwrap(), -0.5, epsilon = 1e-12);

        let years = engine.trajectory(&ProjectionInput::new(38.0, 3.0).unwrap()).unwrap();
        assert_eq!(years.len(), 3);
        assert!(years.last().unwrap().value <= 0.0);
        assert_relative_eq!(engine.project_value(38.0, 3.0).unwrap(), 4.75, epsilon = 1e-9);
    }

    #[test]
    fn test_policies_agree_while_value_stays_positive() {
        let always = hitter();
        let stop = ProjectionEngine::new(
            ProjectionConfig::default().with_policy(AccumulationPolicy::StopOnNonPositive),
        )
        .unwrap();
        // Positive through age 45
        let a = always.project_value(30.0, 40.0).unwrap();
        let s = stop.project_value(30.0, 40.0).unwrap();
        assert_relative_eq!(a, s, epsilon = 1e-9);
    }

    #[test]
    fn test_ceiling_age() {
        let engine = ProjectionEngine::new(ProjectionConfig::default().with_ceiling_age(43.0)).unwrap();
        let years = engine.trajectory(&ProjectionInput::new(30.0, 10.0).unwrap()).unwrap();
        assert_eq!(years.last().unwrap().age, 42.0);

        // Starting at or past the ceiling projects nothing
        assert_eq!(engine.project_value(43.0, 2.0).unwrap(), 2.0);
        assert_eq!(engine.project_value(50.0, 2.0).unwrap(), 2.0);
    }

    #[test]
    fn test_beyond_table_uses_fallback() {
        let mut curves = CurveSet::empty();
        curves.insert(Role::Pitcher, CurveShape::Flat, AgeDeltaTable::from_loaded(&[(30, 0.0)]));
        let config = ProjectionConfig::new(Role::Pitcher, CurveShape::Flat).with_ceiling_age(32.0);
        let engine = ProjectionEngine::with_curves(config, &curves).unwrap();

        // 30: 0.0 -> 5.0, 31: fallback -2.5 -> 2.5
        assert_relative_eq!(engine.project_value(30.0, 5.0).unwrap(), 5.0 + 5.0 + 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_curve_fails_fast() {
        let curves = CurveSet::empty();
        let err = ProjectionEngine::with_curves(ProjectionConfig::default(), &curves).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = ProjectionEngine::new(ProjectionConfig::default().with_discount(-1.0)).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfiguration(_)));

        let err = ProjectionEngine::new(ProjectionConfig::default().with_ceiling_age(3e8)).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_engine_exposes_selected_curve() {
        let config = ProjectionConfig::new(Role::Pitcher, CurveShape::Flat).with_ceiling_age(43.0);
        let engine = ProjectionEngine::new(config.clone()).unwrap();
        assert_eq!(engine.config(), &config);
        assert_eq!(engine.table(), &AgeDeltaTable::pitcher_flat());
        assert_eq!(engine.table().age_range(), Some((16, 45)));
    }

    #[test]
    fn test_max_ceiling_projection_terminates() {
        let engine = ProjectionEngine::new(ProjectionConfig::default().with_ceiling_age(256.0)).unwrap();
        let years = engine.trajectory(&ProjectionInput { age: 30.0, current_value: 3.0 }).unwrap();
        assert_eq!(years.len(), 226);
        assert!(years.iter().skip(20).all(|y| y.contribution == 0.0));
    }

    #[test]
    fn test_invalid_input() {
        let engine = hitter();
        assert!(matches!(
            engine.project_value(f64::NAN, 1.0),
            Err(ProjectionError::InvalidInput { field: "age", .. })
        ));
        assert!(matches!(
            engine.project_value(25.0, f64::NAN),
            Err(ProjectionError::InvalidInput { field: "value", .. })
        ));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let engine = hitter();
        let inputs = vec![
            ProjectionInput { age: 24.0, current_value: 3.0 },
            ProjectionInput { age: f64::NAN, current_value: 3.0 },
            ProjectionInput { age: 38.0, current_value: 3.0 },
        ];
        let results = engine.project_batch(&inputs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], engine.project(&inputs[0]));
        assert!(results[1].is_err());
        assert_relative_eq!(*results[2].as_ref().unwrap(), 4.75, epsilon = 1e-9);
    }

    #[test]
    fn test_age_monotonicity_integer_ages() {
        for role in Role::ALL {
            for shape in CurveShape::ALL {
                let engine = engine(role, shape);
                let mut prev = f64::INFINITY;
                for age in 16..46 {
                    let total = engine.project_value(age as f64, 3.0).unwrap();
                    assert!(total <= prev, "{role} {shape} age {age}: {total} > {prev}");
                    prev = total;
                }
            }
        }
    }

    #[test]
    fn test_value_monotonicity() {
        for role in Role::ALL {
            let engine = engine(role, CurveShape::Standard);
            let mut prev = 0.0;
            for tenths in 1..=80 {
                let total = engine.project_value(25.0, tenths as f64 / 10.0).unwrap();
                assert!(total > prev, "{role} value {}: {total} <= {prev}", tenths as f64 / 10.0);
                prev = total;
            }
        }
    }

    proptest! {
        #[test]
        fn prop_younger_projects_at_least_as_much(
            young in 16.0f64..45.9,
            gap in 0.0f64..10.0,
            value in 0.0f64..10.0,
            pitcher in any::<bool>(),
            flat in any::<bool>(),
        ) {
            let role = if pitcher { Role::Pitcher } else { Role::Hitter };
            let shape = if flat { CurveShape::Flat } else { CurveShape::Standard };
            let engine = engine(role, shape);
            let old = (young + gap).min(45.99);
            let y = engine.project_value(young, value).unwrap();
            let o = engine.project_value(old, value).unwrap();
            prop_assert!(y + 1e-9 >= o, "age {} -> {}, age {} -> {}", young, y, old, o);
        }

        #[test]
        fn prop_higher_value_projects_more(
            age in 16.0f64..46.0,
            low in 0.0f64..8.0,
            step in 0.01f64..4.0,
        ) {
            let engine = hitter();
            let lo = engine.project_value(age, low).unwrap();
            let hi = engine.project_value(age, low + step).unwrap();
            prop_assert!(hi > lo);
        }

        #[test]
        fn prop_discount_never_increases_total(
            age in 16.0f64..46.0,
            value in -2.0f64..10.0,
            rate in 0.0f64..0.5,
        ) {
            let plain = hitter().project_value(age, value).unwrap();
            let discounted = ProjectionEngine::new(ProjectionConfig::default().with_discount(rate))
                .unwrap()
                .project_value(age, value)
                .unwrap();
            prop_assert!(discounted <= plain + 1e-9);
        }
    }
}
