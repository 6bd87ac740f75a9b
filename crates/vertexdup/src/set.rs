use ahash::AHashSet;
use geo::Coord;

/// Hashable identity of a coordinate: the bit patterns of `x` and `y`.
///
/// `-0.0` is folded into `+0.0` so that exact identity agrees with a
/// zero-distance comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(u64, u64);

impl CoordKey {
    #[inline]
    pub fn new(coord: Coord<f64>) -> Self {
        // Adding +0.0 maps -0.0 to +0.0 and leaves every other value unchanged.
        Self((coord.x + 0.0).to_bits(), (coord.y + 0.0).to_bits())
    }
}

/// The coordinates involved in at least one duplicate relationship.
///
/// Iteration yields each coordinate once, in the order it was first inserted.
#[derive(Clone, Debug, Default)]
pub struct DuplicateSet {
    keys: AHashSet<CoordKey>,
    coords: Vec<Coord<f64>>,
}

impl DuplicateSet {
    pub fn new() -> Self { Self::default() }

    /// Insert `coord`, returning `false` if an identical coordinate was already present.
    pub fn insert(&mut self, coord: Coord<f64>) -> bool {
        let inserted = self.keys.insert(CoordKey::new(coord));
        if inserted { self.coords.push(coord) }
        inserted
    }

    #[inline] pub fn contains(&self, coord: Coord<f64>) -> bool { self.keys.contains(&CoordKey::new(coord)) }

    #[inline] pub fn len(&self) -> usize { self.coords.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    /// Iterate over the duplicate coordinates in first-insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.coords.iter().copied()
    }

    /// Returns `true` if every coordinate of `self` is also in `other`.
    pub fn is_subset(&self, other: &DuplicateSet) -> bool {
        self.keys.is_subset(&other.keys)
    }

    /// The coordinates sorted lexicographically by (x, y), for stable output.
    pub fn to_sorted_vec(&self) -> Vec<Coord<f64>> {
        let mut coords = self.coords.clone();
        coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        coords
    }

    pub fn into_vec(self) -> Vec<Coord<f64>> { self.coords }
}

impl PartialEq for DuplicateSet {
    fn eq(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len() && self.keys.is_subset(&other.keys)
    }
}

impl Extend<Coord<f64>> for DuplicateSet {
    fn extend<I: IntoIterator<Item = Coord<f64>>>(&mut self, iter: I) {
        for coord in iter { self.insert(coord); }
    }
}

impl FromIterator<Coord<f64>> for DuplicateSet {
    fn from_iter<I: IntoIterator<Item = Coord<f64>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for DuplicateSet {
    type Item = Coord<f64>;
    type IntoIter = std::vec::IntoIter<Coord<f64>>;

    fn into_iter(self) -> Self::IntoIter { self.coords.into_iter() }
}
