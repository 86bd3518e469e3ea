use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use socnet_core::errors::NetError;
use socnet_core::rng::RngHandle;
use tracing::{debug, instrument, trace};

use crate::config::GeneratorConfig;
use crate::matrix::{BitMatrix, DoubleMatrix};

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Target out-degree assigned to every row.
    pub targets: Vec<usize>,
    /// Out-degree of every row in the returned matrix.
    pub realized: Vec<usize>,
    /// Number of seed batches drawn before every row was finalized.
    pub rounds: usize,
}

impl GenerationReport {
    /// Mean of the assigned target degrees.
    pub fn mean_target(&self) -> f64 {
        mean(&self.targets)
    }

    /// Mean of the realized degrees.
    pub fn mean_realized(&self) -> f64 {
        mean(&self.realized)
    }
}

/// Builds adjacency matrices whose out-degrees follow a normal target
/// distribution, with reciprocation and transitive closure driven by the
/// configured linking-probability profile.
#[derive(Debug, Clone)]
pub struct DegreeSequenceGenerator {
    config: GeneratorConfig,
}

impl DegreeSequenceGenerator {
    /// Creates a generator after validating the configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self, NetError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one matrix.
    pub fn generate(&self, rng: &mut RngHandle) -> Result<BitMatrix, NetError> {
        Ok(self.generate_with_report(rng)?.0)
    }

    /// Generates one matrix together with its degree report.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(nodes = self.config.nodes, directed = self.config.directed)
    )]
    pub fn generate_with_report(
        &self,
        rng: &mut RngHandle,
    ) -> Result<(BitMatrix, GenerationReport), NetError> {
        let mut state = GenerationState::new(&self.config, rng)?;
        let rounds = state.run(rng)?;
        let realized = state.realized_degrees();
        debug!(rounds, links = realized.iter().sum::<usize>(), "generation completed");
        let report = GenerationReport {
            targets: state.targets,
            realized,
            rounds,
        };
        Ok((state.matrix, report))
    }
}

/// Generates `count` matrices, each from its own substream of `master_seed`.
pub fn generate_ensemble(
    config: &GeneratorConfig,
    master_seed: u64,
    count: usize,
) -> Result<Vec<BitMatrix>, NetError> {
    let generator = DegreeSequenceGenerator::new(config.clone())?;
    (0..count)
        .map(|member| {
            let mut rng = RngHandle::from_substream(master_seed, member as u64);
            generator.generate(&mut rng)
        })
        .collect()
}

/// Links created by one phase, as `(row, col)` pairs.
type Links = Vec<(usize, usize)>;

struct GenerationState<'a> {
    config: &'a GeneratorConfig,
    size: usize,
    targets: Vec<usize>,
    realized: Vec<usize>,
    remaining: BTreeSet<usize>,
    matrix: BitMatrix,
    mean_target: f64,
}

impl<'a> GenerationState<'a> {
    fn new(config: &'a GeneratorConfig, rng: &mut RngHandle) -> Result<Self, NetError> {
        let size = config.nodes;
        let ceiling = size - 1;
        let mut targets = Vec::with_capacity(size);
        for _ in 0..size {
            let draw = rng.normal(config.mean_degree, config.std_dev)?.floor();
            let target = if draw.is_nan() || draw < 1.0 {
                1
            } else if draw >= ceiling as f64 {
                ceiling
            } else {
                draw as usize
            };
            targets.push(target);
        }
        let mean_target = mean(&targets);
        Ok(Self {
            config,
            size,
            targets,
            realized: vec![0; size],
            remaining: (0..size).collect(),
            matrix: BitMatrix::new(size),
            mean_target,
        })
    }

    fn run(&mut self, rng: &mut RngHandle) -> Result<usize, NetError> {
        let mut rounds = 0;
        while !self.remaining.is_empty() {
            rounds += 1;
            let mut created = self.seed(rng);
            debug!(round = rounds, remaining = self.remaining.len(), "seed batch placed");
            loop {
                let frontier: Links = created
                    .into_iter()
                    .filter(|(_, col)| self.remaining.contains(col))
                    .collect();
                if frontier.is_empty() {
                    break;
                }
                let mut next = self.reciprocate(&frontier, rng);
                next.extend(self.close_transitively(rng)?);
                self.finalize();
                trace!(links = next.len(), remaining = self.remaining.len(), "propagation pass");
                created = next;
            }
            self.finalize();
        }
        if !self.config.directed {
            self.symmetrize();
        }
        Ok(rounds)
    }

    fn capacity(&self, row: usize) -> usize {
        self.targets[row].saturating_sub(self.realized[row])
    }

    fn is_linked(&self, row: usize, col: usize) -> bool {
        self.matrix.cell(row, col) != 0.0
    }

    /// Sets cell `(row, col)`; returns `false` for the diagonal or an existing link.
    fn link(&mut self, row: usize, col: usize) -> bool {
        if row == col || self.is_linked(row, col) {
            return false;
        }
        self.matrix.put(row, col, 1.0);
        self.realized[row] += 1;
        true
    }

    fn unlink(&mut self, row: usize, col: usize) {
        if self.is_linked(row, col) {
            self.matrix.put(row, col, 0.0);
            self.realized[row] -= 1;
        }
    }

    /// Draws up to `seed_batch` rows from `remaining` and fills each to its target.
    fn seed(&mut self, rng: &mut RngHandle) -> Links {
        let mut pool: Vec<usize> = self.remaining.iter().copied().collect();
        pool.shuffle(rng);
        pool.truncate(self.config.seed_batch);
        let mut created = Links::new();
        for row in pool {
            for col in self.fill_row(row, rng) {
                created.push((row, col));
            }
            self.remaining.remove(&row);
        }
        created
    }

    /// Fills `row` up to its target with uniformly chosen free columns.
    fn fill_row(&mut self, row: usize, rng: &mut RngHandle) -> Vec<usize> {
        let need = self.capacity(row);
        if need == 0 {
            return Vec::new();
        }
        let mut free: Vec<usize> = (0..self.size)
            .filter(|col| *col != row && !self.is_linked(row, *col))
            .collect();
        if need >= free.len() {
            for col in &free {
                self.link(row, *col);
            }
            return free;
        }
        if need * 2 > free.len() {
            // dense target: set every free cell, then clear a random minority
            for col in &free {
                self.link(row, *col);
            }
            free.shuffle(rng);
            let surplus = free.len() - need;
            for col in free.drain(..surplus) {
                self.unlink(row, col);
            }
            free.sort_unstable();
            return free;
        }
        let mut added = Vec::with_capacity(need);
        while added.len() < need {
            let col = rng.index(self.size);
            if self.link(row, col) {
                added.push(col);
            }
        }
        added
    }

    /// Reciprocates fresh links. Directed mode flips a `profile[0]` coin per
    /// link within the reverse row's capacity; undirected mode mirrors everything.
    fn reciprocate(&mut self, frontier: &[(usize, usize)], rng: &mut RngHandle) -> Links {
        if !self.config.directed {
            return self.symmetrize();
        }
        let probability = self.config.reciprocity();
        let mut created = Links::new();
        for &(row, col) in frontier {
            if self.capacity(col) == 0 || self.is_linked(col, row) {
                continue;
            }
            if rng.uniform() < probability && self.link(col, row) {
                created.push((col, row));
            }
        }
        created
    }

    /// Closes open cells of under-target rows with the profile-weighted walk score.
    fn close_transitively(&mut self, rng: &mut RngHandle) -> Result<Links, NetError> {
        let config = self.config;
        let weights = config.walk_weights();
        let powers = self.walk_powers(weights.len())?;
        let baseline = self.baseline(weights);
        let rows: Vec<usize> = self
            .remaining
            .iter()
            .copied()
            .filter(|row| self.capacity(*row) > 0)
            .collect();
        let mut created = Links::new();
        for row in rows {
            let mut cols: Vec<usize> = (0..self.size).filter(|col| *col != row).collect();
            cols.shuffle(rng);
            for col in cols {
                if self.capacity(row) == 0 {
                    break;
                }
                if self.is_linked(row, col) {
                    continue;
                }
                if !config.directed && self.capacity(col) == 0 {
                    continue;
                }
                if self.score(row, col, baseline, weights, &powers) < rng.uniform() {
                    continue;
                }
                if self.link(row, col) {
                    created.push((row, col));
                }
                if !config.directed && self.link(col, row) {
                    created.push((col, row));
                }
            }
        }
        Ok(created)
    }

    /// Share of the score not explained by walks: `meanTarget * (1 - sum of walk weights)`.
    fn baseline(&self, weights: &[f64]) -> f64 {
        self.mean_target * (1.0 - weights.iter().sum::<f64>())
    }

    /// Linking score of the open cell `(row, col)`:
    /// `target(row) / meanTarget * (baseline + sum_k weight[k] * M^(k+2)[row][col])`.
    fn score(
        &self,
        row: usize,
        col: usize,
        baseline: f64,
        weights: &[f64],
        powers: &[DoubleMatrix],
    ) -> f64 {
        let walks: f64 = weights
            .iter()
            .zip(powers)
            .map(|(weight, power)| weight * power.cell(row, col))
            .sum();
        self.targets[row] as f64 / self.mean_target * (baseline + walks)
    }

    /// Returns `M^2 ..= M^(count + 1)` of the current matrix.
    fn walk_powers(&self, count: usize) -> Result<Vec<DoubleMatrix>, NetError> {
        let mut powers = Vec::with_capacity(count);
        if count == 0 {
            return Ok(powers);
        }
        let mut power = self.matrix.multiply(&self.matrix)?;
        for _ in 1..count {
            let next = power.multiply(&self.matrix)?;
            powers.push(power);
            power = next;
        }
        powers.push(power);
        Ok(powers)
    }

    /// Drops rows that reached their target from `remaining`.
    fn finalize(&mut self) {
        let finished: Vec<usize> = self
            .remaining
            .iter()
            .copied()
            .filter(|row| self.capacity(*row) == 0)
            .collect();
        for row in finished {
            self.remaining.remove(&row);
        }
    }

    /// Mirrors every link so the matrix becomes symmetric.
    fn symmetrize(&mut self) -> Links {
        let mut created = Links::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_linked(row, col) && self.link(col, row) {
                    created.push((col, row));
                }
            }
        }
        created
    }

    fn realized_degrees(&self) -> Vec<usize> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .filter(|col| self.is_linked(row, *col))
                    .count()
            })
            .collect()
    }
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(nodes: usize, mean_degree: f64, profile: Vec<f64>) -> GeneratorConfig {
        GeneratorConfig {
            nodes,
            mean_degree,
            std_dev: 0.0,
            profile,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn certain_reciprocation_answers_every_frontier_link() {
        let config = settings(5, 3.0, vec![1.0]);
        let mut rng = RngHandle::from_seed(4);
        let mut state = GenerationState::new(&config, &mut rng).unwrap();
        assert_eq!(state.targets, vec![3; 5]);
        let mut frontier = Links::new();
        for col in 1..4 {
            assert!(state.link(0, col));
            frontier.push((0, col));
        }

        let created = state.reciprocate(&frontier, &mut rng);
        assert_eq!(created, vec![(1, 0), (2, 0), (3, 0)]);
        for col in 1..4 {
            assert!(state.is_linked(col, 0));
        }
    }

    #[test]
    fn reciprocation_respects_capacity_and_rate() {
        let config = settings(5, 2.0, vec![1.0]);
        let mut rng = RngHandle::from_seed(4);
        let mut state = GenerationState::new(&config, &mut rng).unwrap();
        state.link(1, 2);
        state.link(1, 3);
        state.link(0, 1);
        state.link(0, 2);
        let created = state.reciprocate(&[(0, 1), (0, 2)], &mut rng);
        assert_eq!(created, vec![(2, 0)]);
        assert!(!state.is_linked(1, 0));

        let config = settings(5, 2.0, vec![0.0]);
        let mut state = GenerationState::new(&config, &mut rng).unwrap();
        state.link(0, 1);
        assert!(state.reciprocate(&[(0, 1)], &mut rng).is_empty());
    }

    #[test]
    fn score_follows_the_weighted_walk_formula() {
        let config = settings(4, 2.0, vec![0.0, 0.2, 0.1]);
        let mut rng = RngHandle::from_seed(1);
        let mut state = GenerationState::new(&config, &mut rng).unwrap();
        state.link(0, 1);
        state.link(1, 2);
        state.link(2, 3);
        state.targets[3] = 4;

        let weights = config.walk_weights();
        let powers = state.walk_powers(weights.len()).unwrap();
        let baseline = state.baseline(weights);
        assert!((baseline - 2.0 * 0.7).abs() < 1e-12);

        let score = |row, col| state.score(row, col, baseline, weights, &powers);
        // one walk of length two
        assert!((score(0, 2) - (1.4 + 0.2)).abs() < 1e-12);
        // one walk of length three
        assert!((score(0, 3) - (1.4 + 0.1)).abs() < 1e-12);
        assert!((score(1, 0) - 1.4).abs() < 1e-12);
        // target 4 against a mean target of 2
        assert!((score(3, 0) - 2.0 * 1.4).abs() < 1e-12);
    }

    #[test]
    fn one_closure_pass_fills_rows_when_baseline_dominates() {
        let config = settings(50, 6.0, vec![0.0, 0.1]);
        let mut rng = RngHandle::from_seed(12);
        let mut state = GenerationState::new(&config, &mut rng).unwrap();
        state.seed(&mut rng);
        assert_eq!(state.remaining.len(), 49);

        state.close_transitively(&mut rng).unwrap();
        assert!(state.remaining.iter().all(|row| state.capacity(*row) == 0));
        assert!(state.realized.iter().all(|degree| *degree == 6));
    }
}
