use std::path::Path;

use colored::Colorize;
use roster_core::{resolve_profiles, shift_hours, Schedule, ShiftKind, SolverStatus};

/// Textual summary of a solved roster: one line per nurse plus totals and
/// solver diagnostics.
pub fn print_summary(schedule: &Schedule) {
    let stats = &schedule.stats;
    let status = match stats.status {
        SolverStatus::Optimal => stats.status.as_str().green().bold(),
        SolverStatus::Feasible => stats.status.as_str().yellow().bold(),
        _ => stats.status.as_str().red().bold(),
    };
    println!("{} {}", "Solver status:".bold(), status);
    println!();

    let profiles = resolve_profiles(&schedule.config);
    println!("{}", "=== Summary ===".bold());
    for totals in &schedule.totals {
        let profile = &profiles[totals.nurse];
        let mut label = format!("Nurse {:2}", totals.nurse + 1);
        if !profile.works_nights() && profile.is_standard() {
            label.push_str(" (no nights)");
        }
        println!(
            "{label}: hours={} day_like_shifts={} night_shifts={} weekend_shifts={}",
            totals.hours, totals.day_like_shifts, totals.night_shifts, totals.weekend_shifts
        );
    }
    println!("Total hours (all nurses): {}", schedule.total_hours());
    println!("Total day-like shifts: {}", schedule.total_day_like());
    println!("Objective value: {}", stats.objective);

    println!();
    println!("{}", "=== Solver Stats ===".bold());
    println!("Variables  : {}", stats.variables);
    println!("Constraints: {}", stats.constraints);
    if let Some(conflicts) = stats.conflicts {
        println!("Conflicts  : {conflicts}");
    }
    if let Some(branches) = stats.branches {
        println!("Branches   : {branches}");
    }
    println!("Wall time  : {:.2}s", stats.wall_time.as_secs_f64());
}

/// Writes the roster grid as CSV: day columns, one row per nurse with the
/// assigned shift's hours in each cell, summary columns, and per-day
/// day/night count footers.
pub fn export_csv(schedule: &Schedule, path: &Path) -> csv::Result<()> {
    let config = &schedule.config;
    let horizon = schedule.horizon();
    let profiles = resolve_profiles(config);
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["nurse".to_string()];
    header.extend(horizon.days().map(|d| (d + 1).to_string()));
    header.push("hours".to_string());
    header.push("shifts".to_string());
    writer.write_record(&header)?;

    for profile in &profiles {
        let totals = &schedule.totals[profile.id];
        let mut row = vec![profile.display_number().to_string()];
        for day in horizon.days() {
            let cell = match schedule.kind(profile.id, day) {
                Some(ShiftKind::Morning) => {
                    format!("M{}", shift_hours(config, &horizon, profile, day, ShiftKind::Morning))
                }
                Some(kind) => shift_hours(config, &horizon, profile, day, kind).to_string(),
                None => String::new(),
            };
            row.push(cell);
        }
        row.push(totals.hours.to_string());
        row.push((totals.day_like_shifts + totals.night_shifts).to_string());
        writer.write_record(&row)?;
    }

    let mut day_row = vec!["day shifts".to_string()];
    day_row.extend(schedule.day_like_per_day.iter().map(|c| c.to_string()));
    day_row.push("-".to_string());
    day_row.push("-".to_string());
    writer.write_record(&day_row)?;

    let mut night_row = vec!["night shifts".to_string()];
    night_row.extend(schedule.nights_per_day.iter().map(|c| c.to_string()));
    night_row.push("-".to_string());
    night_row.push("-".to_string());
    writer.write_record(&night_row)?;

    writer.flush()?;
    Ok(())
}
