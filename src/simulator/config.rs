//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated exiles
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Class every simulated exile starts as
    pub class_id: String,

    /// Missions in the order they are unlocked
    pub route: Vec<String>,

    /// Mission attempts per run before it ends
    pub missions_per_run: u32,

    /// Clears of a mission needed before moving to the next one
    pub clears_to_advance: u32,

    /// Whether drops are equipped when they outscore the current item
    pub auto_equip: bool,

    /// Whether a passive is picked from the offer on each level-up
    pub allocate_passives: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 500,
            seed: None,
            class_id: "marauder".to_string(),
            route: ["rat_cellar", "bandit_camp", "haunted_crypt", "smouldering_depths"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            missions_per_run: 60,
            clears_to_advance: 3,
            auto_equip: true,
            allocate_passives: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking a single mission
    pub fn mission_balance_test(mission_id: &str) -> Self {
        Self {
            num_runs: 200,
            route: vec![mission_id.to_string()],
            missions_per_run: 20,
            ..Default::default()
        }
    }

    /// Naked exiles: no gear and no passives
    pub fn naked(num_runs: u32) -> Self {
        Self {
            num_runs,
            auto_equip: false,
            allocate_passives: false,
            ..Default::default()
        }
    }
}
