//! # Seeded K-Means
//!
//! Lloyd's algorithm with k-means++ seeding, restarted `n_init` times from
//! one seeded generator; the run with the lowest inertia wins. With a fixed
//! seed the clustering is deterministic.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{PrecisError, PrecisResult};

/// Options for [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansOptions {
    /// The number of clusters.
    pub clusters: usize,

    /// Iteration limit per run.
    pub max_iter: usize,

    /// Convergence tolerance, relative to the mean per-dimension variance.
    pub tolerance: f64,

    /// The number of seeded restarts.
    pub n_init: usize,

    /// The random seed.
    pub seed: u64,
}

impl KMeansOptions {
    /// Default options for `clusters` clusters.
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            max_iter: 300,
            tolerance: 1e-4,
            n_init: 10,
            seed: 12345,
        }
    }

    /// Set the random seed.
    pub fn with_seed(
        mut self,
        seed: u64,
    ) -> Self {
        self.seed = seed;
        self
    }
}

/// A fitted clustering.
#[derive(Debug, Clone)]
pub struct KMeans {
    centroids: Vec<Vec<f64>>,
    labels: Vec<usize>,
    inertia: f64,
}

fn squared_distance(
    a: &[f64],
    b: &[f64],
) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(
    point: &[f64],
    centroids: &[Vec<f64>],
) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx, squared_distance(point, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn mean_variance(points: &[Vec<f64>]) -> f64 {
    let n = points.len() as f64;
    let dims = points[0].len();
    if dims == 0 {
        return 0.0;
    }
    let total: f64 = (0..dims)
        .map(|d| {
            let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
            points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();
    total / dims as f64
}

fn kmeans_plus_plus(
    points: &[Vec<f64>],
    k: usize,
    rng: &mut StdRng,
) -> Vec<Vec<f64>> {
    let mut centroids = vec![points[rng.random_range(0..points.len())].clone()];
    let mut dists: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = dists.iter().sum();
        let idx = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            dists
                .iter()
                .position(|d| {
                    target -= d;
                    target <= 0.0
                })
                .unwrap_or(points.len() - 1)
        } else {
            rng.random_range(0..points.len())
        };

        let centroid = points[idx].clone();
        for (d, p) in dists.iter_mut().zip(points) {
            *d = d.min(squared_distance(p, &centroid));
        }
        centroids.push(centroid);
    }
    centroids
}

fn assign(
    points: &[Vec<f64>],
    centroids: &[Vec<f64>],
) -> (Vec<usize>, f64) {
    let mut inertia = 0.0;
    let labels = points
        .iter()
        .map(|p| {
            let (idx, dist) = nearest(p, centroids);
            inertia += dist;
            idx
        })
        .collect();
    (labels, inertia)
}

fn lloyd(
    points: &[Vec<f64>],
    mut centroids: Vec<Vec<f64>>,
    max_iter: usize,
    tolerance: f64,
) -> KMeans {
    let dims = points[0].len();
    let mut prev_labels: Option<Vec<usize>> = None;

    for _ in 0..max_iter {
        let (labels, _) = assign(points, &centroids);

        let mut sums = vec![vec![0.0; dims]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for (p, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (s, x) in sums[label].iter_mut().zip(p) {
                *s += x;
            }
        }

        let mut shift = 0.0;
        for (idx, (sum, count)) in sums.into_iter().zip(&counts).enumerate() {
            let updated = if *count == 0 {
                // Empty cluster: re-seed on the worst fitted point.
                let (far, _) = points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i, squared_distance(p, &centroids[labels[i]])))
                    .fold((0, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });
                points[far].clone()
            } else {
                sum.into_iter().map(|s| s / *count as f64).collect()
            };
            shift += squared_distance(&centroids[idx], &updated);
            centroids[idx] = updated;
        }

        let converged = prev_labels.as_ref() == Some(&labels) || shift <= tolerance;
        prev_labels = Some(labels);
        if converged {
            break;
        }
    }

    let (labels, inertia) = assign(points, &centroids);
    KMeans {
        centroids,
        labels,
        inertia,
    }
}

impl KMeans {
    /// Cluster `points`.
    ///
    /// ## Errors
    /// * `PrecisError::InvalidInput` - no points, mismatched dimensions,
    ///   or a cluster count outside `1..=points.len()`.
    pub fn fit(
        points: &[Vec<f32>],
        options: &KMeansOptions,
    ) -> PrecisResult<Self> {
        let k = options.clusters;
        if points.is_empty() {
            return Err(PrecisError::InvalidInput("no points to cluster".to_string()));
        }
        if k == 0 || k > points.len() {
            return Err(PrecisError::InvalidInput(format!(
                "cannot form {k} clusters from {} points",
                points.len()
            )));
        }
        let dims = points[0].len();
        if points.iter().any(|p| p.len() != dims) {
            return Err(PrecisError::InvalidInput(
                "points have mismatched dimensions".to_string(),
            ));
        }

        let points: Vec<Vec<f64>> = points
            .iter()
            .map(|p| p.iter().map(|&x| x as f64).collect())
            .collect();
        let tolerance = options.tolerance * mean_variance(&points);

        let mut rng = StdRng::seed_from_u64(options.seed);
        let mut best: Option<KMeans> = None;
        for _ in 0..options.n_init.max(1) {
            let seeds = kmeans_plus_plus(&points, k, &mut rng);
            let run = lloyd(&points, seeds, options.max_iter, tolerance);
            if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        best.ok_or_else(|| PrecisError::InvalidInput("no clustering runs".to_string()))
    }

    /// The cluster centers.
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// The cluster index of each point.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// The sum of squared distances from each point to its center.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// For each centroid in order, the closest point not already claimed by
    /// an earlier centroid.
    pub fn closest_points(
        &self,
        points: &[Vec<f32>],
    ) -> Vec<usize> {
        let mut used: Vec<usize> = Vec::with_capacity(self.centroids.len());
        for centroid in &self.centroids {
            let closest = points
                .iter()
                .enumerate()
                .filter(|(idx, _)| !used.contains(idx))
                .map(|(idx, p)| {
                    let p: Vec<f64> = p.iter().map(|&x| x as f64).collect();
                    (idx, squared_distance(&p, centroid))
                })
                .fold(None, |best: Option<(usize, f64)>, cur| match best {
                    Some(b) if b.1 <= cur.1 => Some(b),
                    _ => Some(cur),
                });
            if let Some((idx, _)) = closest {
                used.push(idx);
            }
        }
        used
    }
}
