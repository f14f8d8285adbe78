//! Rank-sum (Borda) aggregation of the three fitness objectives.
//!
//! Each objective produces its own ordering of the cohort; a recipe's rank
//! in an ordering is its zero-based position, and the aggregate score is the
//! sum of its three ranks. All sorts are stable, so ties keep input order.

use std::cmp::Ordering;

use crate::schema::{Fitness, FitnessTriple, RankedRecipe};

/// One of the three fitness objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Co-occurrence probability, ranked ascending (rarer pairings first).
    Compatibility,
    /// Mean pairwise affinity, ranked descending.
    Affinity,
    /// Ensemble score, ranked descending.
    Ensemble,
}

impl Objective {
    pub const ALL: [Objective; 3] = [
        Objective::Compatibility,
        Objective::Affinity,
        Objective::Ensemble,
    ];

    fn compare_scores(self, a: &FitnessTriple, b: &FitnessTriple) -> Ordering {
        match self {
            Objective::Compatibility => a.compatibility.total_cmp(&b.compatibility),
            Objective::Affinity => b.affinity.total_cmp(&a.affinity),
            Objective::Ensemble => b.ensemble.total_cmp(&a.ensemble),
        }
    }

    /// Better-first comparison. Disqualified recipes sort after every scored
    /// recipe and tie with each other.
    pub fn compare(self, a: &Fitness, b: &Fitness) -> Ordering {
        match (a, b) {
            (Fitness::Scored(a), Fitness::Scored(b)) => self.compare_scores(a, b),
            (Fitness::Scored(_), Fitness::Disqualified) => Ordering::Less,
            (Fitness::Disqualified, Fitness::Scored(_)) => Ordering::Greater,
            (Fitness::Disqualified, Fitness::Disqualified) => Ordering::Equal,
        }
    }
}

/// Rank sum of every member of a cohort, in input order.
pub fn rank_sums(cohort: &[Fitness]) -> Vec<usize> {
    let mut sums = vec![0; cohort.len()];
    for objective in Objective::ALL {
        let mut order: Vec<usize> = (0..cohort.len()).collect();
        order.sort_by(|&a, &b| objective.compare(&cohort[a], &cohort[b]));
        for (position, &index) in order.iter().enumerate() {
            sums[index] += position;
        }
    }
    sums
}

/// Indices of a cohort, fittest first.
pub fn rank_order(cohort: &[Fitness]) -> Vec<usize> {
    let sums = rank_sums(cohort);
    let mut order: Vec<usize> = (0..cohort.len()).collect();
    order.sort_by_key(|&index| sums[index]);
    order
}

/// Assign rank sums to an evaluated cohort and sort it, fittest first.
pub fn rank(mut cohort: Vec<RankedRecipe>) -> Vec<RankedRecipe> {
    let fitness: Vec<Fitness> = cohort.iter().map(|c| c.fitness).collect();
    for (candidate, sum) in cohort.iter_mut().zip(rank_sums(&fitness)) {
        candidate.rank_sum = sum;
    }
    cohort.sort_by_key(|c| c.rank_sum);
    cohort
}
