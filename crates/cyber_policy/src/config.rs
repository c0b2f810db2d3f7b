//! Policy configuration

use cyber_llms::CompletionOptions;

/// Sampling settings for the two learner phases.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Temperature for exploit queries (`None` = service default)
    pub exploit_temperature: Option<f32>,
    /// Completions requested per exploit query
    pub exploit_candidates: u32,
    /// Temperature for explore queries
    pub explore_temperature: f32,
    /// Completions requested per explore query
    pub explore_candidates: u32,
    /// Cap on completion length
    pub max_tokens: Option<u32>,
    /// Seed for the exploration RNG (`None` = entropy)
    pub seed: Option<u64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            exploit_temperature: None,
            exploit_candidates: 1,
            explore_temperature: 1.0,
            explore_candidates: 5,
            max_tokens: None,
            seed: None,
        }
    }
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exploit_temperature(mut self, temperature: f32) -> Self {
        self.exploit_temperature = Some(temperature);
        self
    }

    pub fn with_exploit_candidates(mut self, candidates: u32) -> Self {
        self.exploit_candidates = candidates.max(1);
        self
    }

    pub fn with_explore_temperature(mut self, temperature: f32) -> Self {
        self.explore_temperature = temperature;
        self
    }

    pub fn with_explore_candidates(mut self, candidates: u32) -> Self {
        self.explore_candidates = candidates.max(1);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(temp) = std::env::var("CYBERAGENT_EXPLOIT_TEMPERATURE") {
            if let Ok(val) = temp.parse::<f32>() {
                config.exploit_temperature = Some(val);
            }
        }

        if let Ok(n) = std::env::var("CYBERAGENT_EXPLOIT_CANDIDATES") {
            if let Ok(val) = n.parse::<u32>() {
                config = config.with_exploit_candidates(val);
            }
        }

        if let Ok(temp) = std::env::var("CYBERAGENT_EXPLORE_TEMPERATURE") {
            if let Ok(val) = temp.parse::<f32>() {
                config.explore_temperature = val;
            }
        }

        if let Ok(n) = std::env::var("CYBERAGENT_EXPLORE_CANDIDATES") {
            if let Ok(val) = n.parse::<u32>() {
                config = config.with_explore_candidates(val);
            }
        }

        if let Ok(max_tokens) = std::env::var("CYBERAGENT_MAX_TOKENS") {
            if let Ok(val) = max_tokens.parse::<u32>() {
                config.max_tokens = Some(val);
            }
        }

        if let Ok(seed) = std::env::var("CYBERAGENT_SEED") {
            if let Ok(val) = seed.parse::<u64>() {
                config.seed = Some(val);
            }
        }

        config
    }

    pub fn exploit_options(&self) -> CompletionOptions {
        let mut options = CompletionOptions::default().with_candidates(self.exploit_candidates.max(1));
        if let Some(temperature) = self.exploit_temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }

    pub fn explore_options(&self) -> CompletionOptions {
        let mut options = CompletionOptions::default()
            .with_candidates(self.explore_candidates.max(1))
            .with_temperature(self.explore_temperature);
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }
}
