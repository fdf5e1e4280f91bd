//! Declarative simulation configuration.
//!
//! A [`SimulationConfig`] describes an entire run: the products to list,
//! the agents to spawn with their strategies and starting holdings, the
//! number of steps and the market seed. Configs serialize to JSON so runs
//! can be captured and replayed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use agents::{Agent, DeltaHedger, RandomTrader, Strategy};
use types::{AssetName, ProductSpec, Time};

use crate::error::Result;

/// Which decision-making policy an agent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StrategyConfig {
    /// Buy/sell/hold each holding with equal probability.
    Random {
        /// Fixed seed for reproducible runs; entropy-seeded when absent.
        seed: Option<u64>,
    },
    /// Keep option positions delta-neutral via the underlier.
    DeltaHedger,
}

impl StrategyConfig {
    /// Instantiate the configured strategy.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategyConfig::Random { seed: Some(seed) } => {
                Box::new(RandomTrader::with_seed(*seed))
            }
            StrategyConfig::Random { seed: None } => Box::new(RandomTrader::new()),
            StrategyConfig::DeltaHedger => Box::new(DeltaHedger::new()),
        }
    }
}

/// One agent to spawn at simulation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique display name.
    pub name: String,
    /// Decision-making policy.
    pub strategy: StrategyConfig,
    /// Starting holdings; must include a `Cash` entry.
    pub holdings: BTreeMap<AssetName, f64>,
}

impl AgentConfig {
    /// Instantiate the configured agent.
    pub fn build(&self) -> Result<Agent> {
        Ok(Agent::new(
            self.name.clone(),
            self.holdings.clone(),
            self.strategy.build(),
        )?)
    }
}

/// Full description of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the market's price evolution generator.
    pub seed: u64,
    /// Number of steps to run.
    pub steps: Time,
    /// Products listed on the market, in registration order.
    pub products: Vec<ProductSpec>,
    /// Agents participating, in stepping order.
    pub agents: Vec<AgentConfig>,
}

impl SimulationConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
