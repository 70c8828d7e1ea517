#![forbid(unsafe_code)]

use crate::domain::{PointsLedger, PointsTable};
use crate::error::{Error, InvalidConfiguration};
use crate::prediction::ChampionshipForecast;
use config::SamplingMode;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Trials simulated from one generator stream.
pub const TRIALS_PER_BLOCK: u32 = 512;

/// Projects the rest of a season and counts who finishes on top.
pub trait ChampionshipModel: Send + Sync {
    /// Run every trial against `ledger` with `remaining_events` still to race.
    /// A fired `cancel` discards the sweep.
    fn simulate_until(
        &self,
        ledger: &PointsLedger,
        remaining_events: u32,
        cancel: &CancellationToken,
    ) -> Result<ChampionshipForecast, Error>;

    /// Seed the sweeps are drawn from, if the model is random.
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Monte Carlo projection with points-weighted synthetic races.
///
/// Every trial copies the current points, draws a finishing order for each
/// remaining event with weight `max(1, points)`, awards the points table to
/// the leading places and records the trial's champion. Ties for the title go
/// to the participant registered first in the ledger.
///
/// Trials are split into blocks of [`TRIALS_PER_BLOCK`]; block `b` draws from
/// stream `b` of a ChaCha8 generator keyed by the seed, so a sweep gives the
/// same answer sequentially and on the rayon pool.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    table: PointsTable,
    trials: u32,
    seed: u64,
    sampling: SamplingMode,
    parallel: bool,
}

impl MonteCarloSimulator {
    pub fn new(table: PointsTable, trials: u32) -> Result<Self, Error> {
        if trials == 0 {
            return Err(InvalidConfiguration::ZeroTrials.into());
        }
        Ok(Self {
            table,
            trials,
            seed: rand::random(),
            sampling: SamplingMode::default(),
            parallel: false,
        })
    }

    pub fn from_config(table: PointsTable, params: &config::Simulation) -> Result<Self, Error> {
        let simulator = Self::new(table, params.trials)?
            .with_sampling(params.sampling)
            .with_parallel(params.parallel);
        Ok(match params.seed {
            Some(seed) => simulator.with_seed(seed),
            None => simulator,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn table(&self) -> &PointsTable {
        &self.table
    }

    pub fn simulate(
        &self,
        ledger: &PointsLedger,
        remaining_events: u32,
    ) -> Result<ChampionshipForecast, Error> {
        self.simulate_until(ledger, remaining_events, &CancellationToken::new())
    }

    fn sweep(
        &self,
        base: &[u32],
        remaining_events: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<u32>, Error> {
        let weights: Vec<f64> = base.iter().map(|p| f64::from((*p).max(1))).collect();
        let blocks = self.trials.div_ceil(TRIALS_PER_BLOCK);
        let run = |block: u32| {
            let trials = TRIALS_PER_BLOCK.min(self.trials - block * TRIALS_PER_BLOCK);
            self.run_block(block, trials, base, &weights, remaining_events, cancel)
        };

        let partials: Vec<Vec<u32>> = if self.parallel {
            (0..blocks).into_par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            (0..blocks).map(run).collect::<Result<_, _>>()?
        };

        let mut wins = vec![0u32; base.len()];
        for partial in partials {
            for (total, block_wins) in wins.iter_mut().zip(partial) {
                *total += block_wins;
            }
        }
        Ok(wins)
    }

    fn run_block(
        &self,
        block: u32,
        trials: u32,
        base: &[u32],
        weights: &[f64],
        remaining_events: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<u32>, Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(u64::from(block));
        let mut sampler = RaceSampler::new(self.sampling, weights, self.table.len())?;
        let mut points = base.to_vec();
        let mut wins = vec![0u32; base.len()];

        for _ in 0..trials {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled {
                    trials: self.trials,
                });
            }
            points.copy_from_slice(base);
            for _ in 0..remaining_events {
                for (place, participant) in sampler.draw(&mut rng).iter().enumerate() {
                    let award = self.table.award(place as u32 + 1);
                    points[*participant] = points[*participant].saturating_add(award);
                }
            }
            wins[champion(&points)] += 1;
        }
        Ok(wins)
    }
}

impl ChampionshipModel for MonteCarloSimulator {
    fn simulate_until(
        &self,
        ledger: &PointsLedger,
        remaining_events: u32,
        cancel: &CancellationToken,
    ) -> Result<ChampionshipForecast, Error> {
        if ledger.is_empty() {
            return Ok(ChampionshipForecast {
                trials: self.trials,
                entries: Vec::new(),
            });
        }

        let base: Vec<u32> = ledger.iter().map(|(_, points)| points).collect();
        let wins = if remaining_events == 0 {
            let mut wins = vec![0u32; base.len()];
            wins[champion(&base)] = self.trials;
            wins
        } else {
            info!(
                seed = self.seed,
                trials = self.trials,
                participants = base.len(),
                remaining_events,
                sampling = %self.sampling,
                parallel = self.parallel,
                "simulating remaining season"
            );
            self.sweep(&base, remaining_events, cancel)?
        };

        let forecast = ChampionshipForecast::from_wins(ledger, &wins, self.trials);
        debug!(
            favourite = ?forecast.favourite().map(|e| e.participant),
            "simulation finished"
        );
        Ok(forecast)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Index of the first participant holding the most points.
fn champion(points: &[u32]) -> usize {
    let mut best = 0;
    for (ix, p) in points.iter().enumerate().skip(1) {
        if *p > points[best] {
            best = ix;
        }
    }
    best
}

/// Draws the scoring places of one synthetic race.
struct RaceSampler<'a> {
    weights: &'a [f64],
    places: usize,
    independent: Option<WeightedIndex<f64>>,
    pool: Vec<f64>,
    order: Vec<usize>,
}

impl<'a> RaceSampler<'a> {
    fn new(mode: SamplingMode, weights: &'a [f64], places: usize) -> Result<Self, Error> {
        let independent = match mode {
            SamplingMode::WithReplacement => Some(WeightedIndex::new(weights)?),
            SamplingMode::WithoutReplacement => None,
        };
        Ok(Self {
            weights,
            places,
            independent,
            pool: Vec::with_capacity(weights.len()),
            order: Vec::with_capacity(places),
        })
    }

    /// Participants in finishing order, at most `places` long.
    fn draw<R: Rng>(&mut self, rng: &mut R) -> &[usize] {
        self.order.clear();
        match &self.independent {
            // `n` independent picks, of which only the scoring places matter.
            Some(index) => {
                let picks = self.weights.len().min(self.places);
                self.order.extend((0..picks).map(|_| index.sample(rng)));
            }
            None => draw_distinct(self.weights, self.places, &mut self.pool, &mut self.order, rng),
        }
        &self.order
    }
}

/// Sequential weighted draw without replacement: every pick zeroes the
/// winner's weight before the next place is drawn.
fn draw_distinct<R: Rng>(
    weights: &[f64],
    places: usize,
    pool: &mut Vec<f64>,
    order: &mut Vec<usize>,
    rng: &mut R,
) {
    pool.clear();
    pool.extend_from_slice(weights);
    let mut total: f64 = pool.iter().sum();

    for _ in 0..places.min(weights.len()) {
        let mut target = rng.r#gen::<f64>() * total;
        let mut pick = None;
        for (ix, weight) in pool.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            pick = Some(ix);
            if target < *weight {
                break;
            }
            target -= weight;
        }
        let Some(ix) = pick else { break };
        total -= pool[ix];
        pool[ix] = 0.0;
        order.push(ix);
    }
}
