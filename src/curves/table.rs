//! Age delta tables and fractional-age interpolation

/// Delta used for any age the table does not cover (steep decline)
pub const FALLBACK_DELTA: f64 = -2.5;

/// Expected year-over-year change in value, keyed by integer age
#[derive(Debug, Clone, PartialEq)]
pub struct AgeDeltaTable {
    /// (age, delta) pairs sorted by age, one entry per age
    deltas: Vec<(u8, f64)>,
}

impl AgeDeltaTable {
    /// Create from loaded (age, delta) pairs
    /// Later duplicates of an age replace earlier ones
    pub fn from_loaded(deltas: &[(u8, f64)]) -> Self {
        let mut sorted: Vec<(u8, f64)> = Vec::with_capacity(deltas.len());
        for &(age, delta) in deltas {
            match sorted.binary_search_by_key(&age, |(a, _)| *a) {
                Ok(idx) => sorted[idx].1 = delta,
                Err(idx) => sorted.insert(idx, (age, delta)),
            }
        }
        Self { deltas: sorted }
    }

    /// Delta for an exact integer age, if the table covers it
    pub fn get(&self, age: u8) -> Option<f64> {
        self.deltas
            .binary_search_by_key(&age, |(a, _)| *a)
            .ok()
            .map(|idx| self.deltas[idx].1)
    }

    /// Delta for an integer age, falling back to [`FALLBACK_DELTA`]
    /// Ages that cannot be a table key (negative, beyond u8) also fall back
    pub fn get_or_fallback(&self, age: i64) -> f64 {
        u8::try_from(age)
            .ok()
            .and_then(|a| self.get(a))
            .unwrap_or(FALLBACK_DELTA)
    }

    /// Linearly interpolated delta at a fractional age
    ///
    /// Age 24.8 blends 20% of age 24's delta with 80% of age 25's delta.
    pub fn interpolate(&self, age: f64) -> f64 {
        let lower = age.floor();
        let fraction = age - lower;
        let lower_age = lower as i64;

        let lower_delta = self.get_or_fallback(lower_age);
        let upper_delta = self.get_or_fallback(lower_age.saturating_add(1));

        (1.0 - fraction) * lower_delta + fraction * upper_delta
    }

    /// Youngest and oldest ages covered
    pub fn age_range(&self) -> Option<(u8, u8)> {
        match (self.deltas.first(), self.deltas.last()) {
            (Some((lo, _)), Some((hi, _))) => Some((*lo, *hi)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.deltas.iter().copied()
    }

    // ========================================================================
    // Built-in curves
    // ========================================================================
    // Ages 20-42 are the calibrated reference deltas. Ages 16-19 hold the
    // age-20 delta and ages 43-45 extend each table's closing decline step,
    // staying above FALLBACK_DELTA so every table is non-increasing with age.

    /// Standard hitter curve: fastest growth, steepest late decline
    ///
    /// Calibrated for ages 20-42 only; ages 16-19 and 43-45 are extrapolated.
    pub fn hitter_standard() -> Self {
        Self {
            deltas: vec![
                (16, 0.25),
                (17, 0.25),
                (18, 0.25),
                (19, 0.25),
                (20, 0.25),
                (21, 0.20),
                (22, 0.20),
                (23, 0.10),
                (24, 0.10),
                (25, 0.03),
                (26, 0.03),
                (27, -0.05),
                (28, -0.15),
                (29, -0.25),
                (30, -0.35),
                (31, -0.45),
                (32, -0.55),
                (33, -0.65),
                (34, -0.75),
                (35, -0.85),
                (36, -0.95),
                (37, -1.15),
                (38, -1.35),
                (39, -1.55),
                (40, -1.75),
                (41, -1.95),
                (42, -2.15),
                (43, -2.25),
                (44, -2.35),
                (45, -2.45),
            ],
        }
    }

    /// Standard pitcher curve: slower decline than hitters
    ///
    /// Calibrated for ages 20-42 only; ages 16-19 and 43-45 are extrapolated.
    pub fn pitcher_standard() -> Self {
        Self {
            deltas: vec![
                (16, 0.20),
                (17, 0.20),
                (18, 0.20),
                (19, 0.20),
                (20, 0.20),
                (21, 0.20),
                (22, 0.10),
                (23, 0.10),
                (24, 0.10),
                (25, 0.03),
                (26, 0.03),
                (27, -0.05),
                (28, -0.15),
                (29, -0.15),
                (30, -0.25),
                (31, -0.25),
                (32, -0.35),
                (33, -0.35),
                (34, -0.45),
                (35, -0.55),
                (36, -0.65),
                (37, -0.75),
                (38, -0.85),
                (39, -0.95),
                (40, -1.05),
                (41, -1.15),
                (42, -1.25),
                (43, -1.35),
                (44, -1.45),
                (45, -1.55),
            ],
        }
    }

    /// Flattened hitter curve: minimal growth, gentler decline
    ///
    /// Calibrated for ages 20-42 only; ages 16-19 and 43-45 are extrapolated.
    pub fn hitter_flat() -> Self {
        Self {
            deltas: vec![
                (16, 0.01),
                (17, 0.01),
                (18, 0.01),
                (19, 0.01),
                (20, 0.01),
                (21, 0.01),
                (22, -0.03),
                (23, -0.06),
                (24, -0.09),
                (25, -0.13),
                (26, -0.17),
                (27, -0.21),
                (28, -0.25),
                (29, -0.30),
                (30, -0.35),
                (31, -0.40),
                (32, -0.45),
                (33, -0.50),
                (34, -0.55),
                (35, -0.60),
                (36, -0.70),
                (37, -0.80),
                (38, -0.90),
                (39, -1.00),
                (40, -1.10),
                (41, -1.20),
                (42, -1.30),
                (43, -1.40),
                (44, -1.50),
                (45, -1.60),
            ],
        }
    }

    /// Flattened pitcher curve: minimal growth, gentlest decline
    ///
    /// Calibrated for ages 20-42 only; ages 16-19 and 43-45 are extrapolated.
    pub fn pitcher_flat() -> Self {
        Self {
            deltas: vec![
                (16, -0.02),
                (17, -0.02),
                (18, -0.02),
                (19, -0.02),
                (20, -0.02),
                (21, -0.02),
                (22, -0.05),
                (23, -0.08),
                (24, -0.08),
                (25, -0.11),
                (26, -0.14),
                (27, -0.17),
                (28, -0.22),
                (29, -0.22),
                (30, -0.25),
                (31, -0.25),
                (32, -0.30),
                (33, -0.30),
                (34, -0.33),
                (35, -0.37),
                (36, -0.41),
                (37, -0.45),
                (38, -0.50),
                (39, -0.55),
                (40, -0.60),
                (41, -0.65),
                (42, -0.70),
                (43, -0.75),
                (44, -0.80),
                (45, -0.85),
            ],
        }
    }
}
