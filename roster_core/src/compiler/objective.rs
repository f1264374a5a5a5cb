use good_lp::{constraint, Expression};

use crate::compiler::RosterCompiler;

/// Accumulates (weight, term) pairs explicitly so that extending the rule
/// set cannot silently reorder or reweight existing terms.
#[derive(Default)]
pub struct ObjectiveBuilder {
    terms: Vec<(f64, Expression)>,
}

impl ObjectiveBuilder {
    pub fn new() -> Self {
        ObjectiveBuilder::default()
    }

    pub fn add_term(&mut self, weight: f64, term: Expression) {
        self.terms.push((weight, term));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Collapses the accumulated terms into one scalar expression.
    pub fn build(&self) -> Expression {
        let mut total = Expression::from(0);
        for (weight, term) in &self.terms {
            total += term.clone() * *weight;
        }
        total
    }
}

/// The three minimised terms: hour-target deviation, night-count
/// deviation, and day-like surplus above the coverage minimum. Each
/// absolute deviation is split into a non-negative above/below pair whose
/// sum the minimisation drives down to the true distance.
pub fn apply_objective(compiler: &mut RosterCompiler) {
    let config = compiler.config.clone();
    let profiles = compiler.profiles.clone();
    let weights = config.weights;

    // 1. Hours away from target, standard nurses
    let mut hour_deviation = Expression::from(0);
    for profile in profiles.iter().filter(|p| p.is_standard()) {
        let target = profile.target_hours.unwrap_or(config.target_hours);
        let above = compiler.add_deviation(
            format!("hours_over_n{}", profile.id),
            config.standard_hours.max - target,
        );
        let below = compiler.add_deviation(
            format!("hours_under_n{}", profile.id),
            target - config.standard_hours.min,
        );
        let hours = compiler.hours[profile.id].clone();
        let target = target as f64;
        compiler.push(constraint!(hours - target == above - below));
        hour_deviation += above;
        hour_deviation += below;
    }
    compiler.objective.add_term(weights.hour_deviation, hour_deviation);

    // 2. Night counts away from the fairness target
    let mut night_deviation = Expression::from(0);
    for profile in &profiles {
        let count = match compiler.night_counts[profile.id].clone() {
            Some(count) => count,
            None => continue,
        };
        let above = compiler.add_deviation(
            format!("nights_over_n{}", profile.id),
            config.night_shifts.max - config.night_target,
        );
        let below = compiler.add_deviation(
            format!("nights_under_n{}", profile.id),
            config.night_target - config.night_shifts.min,
        );
        let target = config.night_target as f64;
        compiler.push(constraint!(count - target == above - below));
        night_deviation += above;
        night_deviation += below;
    }
    compiler.objective.add_term(weights.night_deviation, night_deviation);

    // 3. Day-like staffing above the theoretical coverage minimum
    let ceiling = (compiler.horizon.len() * profiles.len()) as u32;
    let surplus = compiler.add_deviation("day_surplus".to_string(), ceiling);
    let total = compiler.day_like_total.clone();
    let floor = compiler.min_day_like as f64;
    compiler.push(constraint!(total - floor == surplus));
    compiler
        .objective
        .add_term(weights.day_surplus, Expression::from(surplus));
}
