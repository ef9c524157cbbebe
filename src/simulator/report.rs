//! Simulation report generation.

use crate::combat::CombatOutcome;
use crate::mission::MissionReport;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters for one simulated exile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_morale: i32,
    /// Index into the route of the last mission unlocked.
    pub furthest_stage: usize,
    pub missions_attempted: u32,
    pub missions_cleared: u32,
    pub kills: u64,
    pub deaths: u64,
    pub retreats: u64,
    pub gold: u64,
    pub chaos_orbs: u32,
    pub exalted_orbs: u32,
    pub items_found: u64,
    pub upgrades_equipped: u32,
    pub passives_allocated: u32,
    pub stage_attempts: Vec<u32>,
    pub stage_clears: Vec<u32>,
}

impl RunStats {
    pub fn new(stages: usize) -> Self {
        Self {
            final_level: 1,
            stage_attempts: vec![0; stages],
            stage_clears: vec![0; stages],
            ..Default::default()
        }
    }

    /// Accumulates one mission report at route index `stage`.
    pub fn record(&mut self, stage: usize, report: &MissionReport) {
        self.missions_attempted += 1;
        if let Some(attempts) = self.stage_attempts.get_mut(stage) {
            *attempts += 1;
        }
        if report.success {
            self.missions_cleared += 1;
            if let Some(clears) = self.stage_clears.get_mut(stage) {
                *clears += 1;
            }
        }

        self.kills += report.monsters_slain as u64;
        for combat in &report.combats {
            match combat.outcome {
                CombatOutcome::Death(_) => self.deaths += 1,
                CombatOutcome::Retreat(_) => self.retreats += 1,
                CombatOutcome::Victory => {}
            }
        }
        self.items_found += report.items.len() as u64;
    }
}

/// Aggregate results for one mission on the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionBalance {
    pub mission_id: String,
    pub attempts: u64,
    pub clears: u64,
    /// Runs that unlocked this mission.
    pub runs_reached: u32,
}

impl MissionBalance {
    pub fn clear_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.clears as f64 / self.attempts as f64
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    /// Runs that unlocked the final mission of the route.
    pub runs_finished_route: u32,

    // Aggregated stats
    pub avg_final_level: f64,
    pub avg_final_morale: f64,
    pub avg_missions_cleared: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_retreats: f64,

    // Economy
    pub avg_gold: f64,
    pub avg_items_found: f64,
    pub avg_upgrades_equipped: f64,
    pub avg_passives_allocated: f64,
    pub avg_chaos_orbs: f64,
    pub avg_exalted_orbs: f64,

    // Distribution data
    pub level_distribution: BTreeMap<u32, u32>,
    pub missions: Vec<MissionBalance>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(route: &[String], runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let last_stage = route.len().saturating_sub(1);
        let runs_finished_route = if route.is_empty() {
            0
        } else {
            runs.iter().filter(|r| r.furthest_stage >= last_stage).count() as u32
        };

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        let missions = route
            .iter()
            .enumerate()
            .map(|(stage, mission_id)| MissionBalance {
                mission_id: mission_id.clone(),
                attempts: runs
                    .iter()
                    .map(|r| r.stage_attempts.get(stage).copied().unwrap_or(0) as u64)
                    .sum(),
                clears: runs
                    .iter()
                    .map(|r| r.stage_clears.get(stage).copied().unwrap_or(0) as u64)
                    .sum(),
                runs_reached: runs.iter().filter(|r| r.furthest_stage >= stage).count() as u32,
            })
            .collect();

        Self {
            num_runs,
            runs_finished_route,
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_final_morale: average(&runs, |r| r.final_morale as f64),
            avg_missions_cleared: average(&runs, |r| r.missions_cleared as f64),
            avg_kills: average(&runs, |r| r.kills as f64),
            avg_deaths: average(&runs, |r| r.deaths as f64),
            avg_retreats: average(&runs, |r| r.retreats as f64),
            avg_gold: average(&runs, |r| r.gold as f64),
            avg_items_found: average(&runs, |r| r.items_found as f64),
            avg_upgrades_equipped: average(&runs, |r| r.upgrades_equipped as f64),
            avg_passives_allocated: average(&runs, |r| r.passives_allocated as f64),
            avg_chaos_orbs: average(&runs, |r| r.chaos_orbs as f64),
            avg_exalted_orbs: average(&runs, |r| r.exalted_orbs as f64),
            level_distribution,
            missions,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached the final mission\n\n",
            self.num_runs, self.runs_finished_route
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Final Morale:    {:.1}\n",
            self.avg_final_morale
        ));
        report.push_str(&format!(
            "  Avg Missions Clear:  {:.1}\n",
            self.avg_missions_cleared
        ));
        report.push_str(&format!("  Avg Kills:           {:.0}\n", self.avg_kills));
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!(
            "  Avg Retreats:        {:.1}\n",
            self.avg_retreats
        ));
        report.push_str(&format!(
            "  Avg Passives:        {:.1}\n\n",
            self.avg_passives_allocated
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold:            {:.0}\n", self.avg_gold));
        report.push_str(&format!(
            "  Avg Items Found:     {:.1}\n",
            self.avg_items_found
        ));
        report.push_str(&format!(
            "  Avg Upgrades:        {:.1}\n",
            self.avg_upgrades_equipped
        ));
        report.push_str(&format!(
            "  Avg Orbs:            {:.2} chaos, {:.2} exalted\n\n",
            self.avg_chaos_orbs, self.avg_exalted_orbs
        ));

        report.push_str("── MISSIONS ─────────────────────────────────────────────────────\n");
        report.push_str("  Mission                  Reached   Attempts   Clear Rate\n");
        report.push_str("  ───────                  ───────   ────────   ──────────\n");
        for mission in &self.missions {
            let pct = mission.clear_rate() * 100.0;
            let bar: String = "█".repeat((pct / 10.0) as usize);
            report.push_str(&format!(
                "  {:<24} {:>7}   {:>8}   {:>5.1}% {}\n",
                mission.mission_id, mission.runs_reached, mission.attempts, pct, bar
            ));
        }
        report.push('\n');

        report.push_str("── LEVEL DISTRIBUTION ───────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = if self.num_runs > 0 {
                *count as f64 / self.num_runs as f64 * 100.0
            } else {
                0.0
            };
            report.push_str(&format!("  Level {:3}: {:>5.1}%\n", level, pct));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let attempts: u64 = self.missions.iter().map(|m| m.attempts).sum();
        let deaths_per_attempt = if attempts > 0 {
            self.avg_deaths * self.num_runs as f64 / attempts as f64
        } else {
            0.0
        };
        let death_rating = if deaths_per_attempt < 0.05 {
            "TOO EASY - Exiles rarely die"
        } else if deaths_per_attempt < 0.25 {
            "GOOD - Challenging but fair"
        } else if deaths_per_attempt < 0.5 {
            "HARD - Frequent deaths"
        } else {
            "TOO HARD - Most missions end in death"
        };
        report.push_str(&format!(
            "  Deaths per Mission: {:.2}\n  Death Rating:       {}\n",
            deaths_per_attempt, death_rating
        ));

        for mission in &self.missions {
            if mission.attempts > 0 && mission.clear_rate() < 0.2 {
                report.push_str(&format!(
                    "  ⚠️  {} is rarely cleared ({:.1}%)\n",
                    mission.mission_id, mission.clear_rate() * 100.0
                ));
            }
        }
        if self.avg_final_morale < 0.0 {
            report.push_str("  ⚠️  Morale trends negative - too many early defeats?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
