use good_lp::{constraint, Expression};

use crate::compiler::RosterCompiler;
use crate::types::shift::ShiftKind;

/// Weekend workload balance for standard nurses: each weekend-assignment
/// count sits in the configured band, and no two nurses differ by more
/// than one. The pairwise form is quadratic in the nurse count, which is
/// fine for rosters in the tens.
pub fn apply_weekend_fairness(compiler: &mut RosterCompiler) {
    let weekend_days = compiler.horizon.weekend_days();
    if weekend_days.is_empty() {
        compiler.trace("⚖️", "No weekend days in horizon; skipping fairness");
        return;
    }
    let band = compiler.config.weekend_shifts;
    let standard: Vec<usize> = compiler
        .profiles
        .iter()
        .filter(|p| p.is_standard())
        .map(|p| p.id)
        .collect();

    let mut counts: Vec<Expression> = Vec::with_capacity(standard.len());
    for &nurse in &standard {
        let mut worked = Expression::from(0);
        for &day in &weekend_days {
            for kind in [ShiftKind::Day, ShiftKind::Night] {
                if let Some(var) = compiler.shift_var(nurse, day, kind) {
                    worked += var;
                }
            }
        }
        let min = band.min as f64;
        let max = band.max as f64;
        compiler.push(constraint!(worked.clone() >= min));
        compiler.push(constraint!(worked.clone() <= max));
        counts.push(worked);
    }

    for i in 0..counts.len() {
        for j in i + 1..counts.len() {
            let a = counts[i].clone();
            let b = counts[j].clone();
            compiler.push(constraint!(a - b <= 1.0));
            let a = counts[i].clone();
            let b = counts[j].clone();
            compiler.push(constraint!(b - a <= 1.0));
        }
    }
}
