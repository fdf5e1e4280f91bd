//! Step-loop driver for the market and its agents.
//!
//! Each step runs the fixed sequence: the market evolves and records its
//! prices, then every agent (in spawn order) decides, trades, marks its
//! holding value and snapshots its performance. There is exactly one
//! logical thread of control; the step is a total function of the prior
//! market and agent states.

use rand::rngs::StdRng;
use rand::SeedableRng;

use agents::Agent;
use sim_core::Market;
use types::Time;

use crate::config::SimulationConfig;
use crate::error::Result;

/// A market, its agents, and the clock driving them.
pub struct Simulation {
    market: Market,
    agents: Vec<Agent>,
    rng: StdRng,
    /// Next step to execute.
    clock: Time,
    /// Total steps the run is configured for.
    steps: Time,
}

impl Simulation {
    /// Build a simulation from its configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let market = Market::from_specs(&config.products)?;
        let agents = config
            .agents
            .iter()
            .map(|agent| agent.build())
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(
            products = market.len(),
            agents = agents.len(),
            steps = config.steps,
            seed = config.seed,
            "simulation constructed"
        );
        Ok(Self {
            market,
            agents,
            rng: StdRng::seed_from_u64(config.seed),
            clock: 0,
            steps: config.steps,
        })
    }

    /// The market.
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// The agents, in stepping order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The next step to execute.
    pub fn clock(&self) -> Time {
        self.clock
    }

    /// Execute one step of the fixed sequence.
    pub fn step(&mut self) -> Result<()> {
        let time = self.clock;
        self.market.evolve(time, &mut self.rng)?;
        self.market.mark_current_value_to_record(time)?;

        for agent in &mut self.agents {
            agent.decision_making(&self.market)?;
            agent.trade(&self.market, time)?;
            agent.mark_holding_values(&self.market, time)?;
            agent.generate_performance_report(&self.market, time)?;
        }

        tracing::debug!(time, "step complete");
        self.clock += 1;
        Ok(())
    }

    /// Run every remaining configured step.
    pub fn run(&mut self) -> Result<()> {
        while self.clock < self.steps {
            self.step()?;
        }
        Ok(())
    }
}
