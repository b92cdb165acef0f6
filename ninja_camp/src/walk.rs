use std::collections::HashSet;
use std::sync::OnceLock;

/// The longest walk any card uses.
pub const MAX_WALK_STEPS: usize = 3;

/// A single step to a neighboring tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WalkStep {
    pub dx: i8,
    pub dy: i8,
}

impl WalkStep {
    pub fn is_opposite(self, other: WalkStep) -> bool {
        self.dx + other.dx == 0 && self.dy + other.dy == 0
    }
}

/// The four orthogonal steps, followed by the four diagonal ones if requested.
pub fn unit_steps(allow_diagonal: bool) -> Vec<WalkStep> {
    let mut steps = Vec::with_capacity(8);
    for dx in -1..=1 {
        for dy in -1..=1 {
            if (dx, dy) == (0, 0) || (!allow_diagonal && dx != 0 && dy != 0) {
                continue;
            }
            steps.push(WalkStep { dx, dy });
        }
    }
    steps
}

/// Computes all step sequences of the given length that never step straight
/// back and don't end where they started.
pub fn generate(steps: usize, allow_diagonal: bool) -> Vec<Vec<WalkStep>> {
    let candidates = unit_steps(allow_diagonal);
    let mut paths: Vec<Vec<WalkStep>> = vec![Vec::new()];
    for _ in 0..steps {
        let mut extended = Vec::with_capacity(paths.len() * candidates.len());
        for path in &paths {
            for &step in &candidates {
                if path.last().is_some_and(|&prev| prev.is_opposite(step)) {
                    continue;
                }
                let mut next = path.clone();
                next.push(step);
                extended.push(next);
            }
        }
        paths = extended;
    }

    let mut seen = HashSet::new();
    paths.retain(|path| {
        let (sx, sy) = path
            .iter()
            .fold((0, 0), |(x, y), s| (x + s.dx as i32, y + s.dy as i32));
        (sx, sy) != (0, 0) && seen.insert(path.clone())
    });
    paths
}

/// All walk patterns for lengths 1 to [`MAX_WALK_STEPS`], computed once per process.
struct WalkPatterns {
    orthogonal: Vec<Vec<Vec<WalkStep>>>,
    diagonal: Vec<Vec<Vec<WalkStep>>>,
}

static WALK_PATTERNS: OnceLock<WalkPatterns> = OnceLock::new();

fn patterns() -> &'static WalkPatterns {
    WALK_PATTERNS.get_or_init(|| WalkPatterns {
        orthogonal: (1..=MAX_WALK_STEPS).map(|n| generate(n, false)).collect(),
        diagonal: (1..=MAX_WALK_STEPS).map(|n| generate(n, true)).collect(),
    })
}

/// Fills the pattern cache if that hasn't happened yet.
pub fn precompute_walk_patterns() {
    patterns();
}

/// The cached patterns with `steps` steps. Empty for lengths outside of
/// `1..=MAX_WALK_STEPS`.
pub fn walk_patterns(steps: usize, allow_diagonal: bool) -> &'static [Vec<WalkStep>] {
    if steps == 0 || steps > MAX_WALK_STEPS {
        return &[];
    }
    let cache = patterns();
    if allow_diagonal {
        &cache.diagonal[steps - 1]
    } else {
        &cache.orthogonal[steps - 1]
    }
}
