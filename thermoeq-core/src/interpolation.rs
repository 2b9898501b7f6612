//! Sorted lookup tables with linear interpolation.
//!
//! [InterpolableTable] is a pure data structure: reading a value never
//! changes the table. Memoization of interpolated values is provided
//! separately by [MemoizedTable].
use quantity::Quantity;
use std::collections::HashMap;
use std::fmt::Write;

/// Scalar types that can be used as keys or values of a table.
///
/// Quantities are stored in SI base units.
pub trait TableValue: Copy {
    fn to_f64(&self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl TableValue for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl<U: Copy> TableValue for Quantity<f64, U> {
    fn to_f64(&self) -> f64 {
        self.convert_into(Quantity::new(1.0))
    }

    fn from_f64(value: f64) -> Self {
        Quantity::new(value)
    }
}

/// A mapping from sorted, unique keys to values.
#[derive(Clone, Debug)]
pub struct InterpolableTable<X, Y> {
    entries: Vec<(X, Y)>,
}

impl<X, Y> Default for InterpolableTable<X, Y> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<X: TableValue, Y: TableValue> InterpolableTable<X, Y> {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, key: f64) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(k, _)| k.to_f64().total_cmp(&key))
    }

    /// Insert a point. An existing entry with the same key is overwritten.
    /// Points with a non-finite key are ignored.
    pub fn insert(&mut self, key: X, value: Y) {
        let k = key.to_f64();
        if !k.is_finite() {
            return;
        }
        match self.search(k) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (key, value)),
        }
    }

    /// Value at `key`.
    ///
    /// Returns the stored value if the key exists, the linear interpolation
    /// between the neighboring entries if the key lies strictly inside the
    /// range of keys, and `None` otherwise.
    pub fn value(&self, key: X) -> Option<Y> {
        let k = key.to_f64();
        if !k.is_finite() {
            return None;
        }
        match self.search(k) {
            Ok(i) => Some(self.entries[i].1),
            Err(i) if i == 0 || i == self.entries.len() => None,
            Err(i) => {
                let (x0, y0) = self.entries[i - 1];
                let (x1, y1) = self.entries[i];
                let (x0, y0, x1, y1) = (x0.to_f64(), y0.to_f64(), x1.to_f64(), y1.to_f64());
                Some(Y::from_f64(y0 + (y1 - y0) * (k - x0) / (x1 - x0)))
            }
        }
    }

    /// Table with keys and values swapped.
    ///
    /// If several entries share a value, the entry with the largest key
    /// remains in the inverted table.
    pub fn invert(&self) -> InterpolableTable<Y, X> {
        self.entries.iter().map(|&(x, y)| (y, x)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(X, Y)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = X> + '_ {
        self.entries.iter().map(|&(x, _)| x)
    }

    pub fn min_key(&self) -> Option<X> {
        self.entries.first().map(|&(x, _)| x)
    }

    pub fn max_key(&self) -> Option<X> {
        self.entries.last().map(|&(x, _)| x)
    }

    /// Plain-text dump of the table: a header line followed by one row per
    /// entry, key and value in SI base units.
    pub fn to_delimited_string(&self, delimiter: &str) -> String {
        let mut out = format!("key{delimiter}value\n");
        for (x, y) in &self.entries {
            // writing into a String cannot fail
            let _ = writeln!(out, "{}{}{}", x.to_f64(), delimiter, y.to_f64());
        }
        out
    }
}

impl<X: TableValue, Y: TableValue> FromIterator<(X, Y)> for InterpolableTable<X, Y> {
    fn from_iter<I: IntoIterator<Item = (X, Y)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (x, y) in iter {
            table.insert(x, y);
        }
        table
    }
}

/// An [InterpolableTable] with a cache of interpolated values.
///
/// Cached values never take part in later interpolations, so the result
/// of a lookup does not depend on the order of previous lookups.
#[derive(Clone, Debug)]
pub struct MemoizedTable<X, Y> {
    table: InterpolableTable<X, Y>,
    cache: HashMap<u64, Y>,
}

impl<X: TableValue, Y: TableValue> MemoizedTable<X, Y> {
    pub fn new(table: InterpolableTable<X, Y>) -> Self {
        Self {
            table,
            cache: HashMap::new(),
        }
    }

    /// Value at `key`, storing interpolated results in the cache.
    pub fn value(&mut self, key: X) -> Option<Y> {
        let bits = key.to_f64().to_bits();
        if let Some(&y) = self.cache.get(&bits) {
            return Some(y);
        }
        let k = key.to_f64();
        let exact = self.table.search(k).is_ok();
        let y = self.table.value(key)?;
        if !exact {
            self.cache.insert(bits, y);
        }
        Some(y)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear()
    }

    pub fn table(&self) -> &InterpolableTable<X, Y> {
        &self.table
    }

    pub fn into_table(self) -> InterpolableTable<X, Y> {
        self.table
    }
}

impl<X: TableValue, Y: TableValue> From<InterpolableTable<X, Y>> for MemoizedTable<X, Y> {
    fn from(table: InterpolableTable<X, Y>) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quantity::{MolarEnergy, Pressure, Temperature, JOULE, KELVIN, MOL, PASCAL};

    fn table() -> InterpolableTable<f64, f64> {
        [(300.0, 200e3), (100.0, 100e3), (400.0, 400e3), (200.0, 300e3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn sorted_and_overwritten() {
        let mut t = table();
        assert_eq!(t.keys().collect::<Vec<_>>(), vec![100.0, 200.0, 300.0, 400.0]);
        t.insert(200.0, 250e3);
        t.insert(f64::NAN, 1.0);
        assert_eq!(t.len(), 4);
        assert_eq!(t.value(200.0), Some(250e3));
        assert_eq!(t.min_key(), Some(100.0));
        assert_eq!(t.max_key(), Some(400.0));
    }

    #[test]
    fn interpolation() {
        let t = table();
        assert_relative_eq!(t.value(150.0).unwrap(), 200e3);
        assert_relative_eq!(t.value(350.0).unwrap(), 300e3);
        assert_eq!(t.value(300.0), Some(200e3));
        assert_eq!(t.value(99.0), None);
        assert_eq!(t.value(400.1), None);
        // reading does not change the table
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn invert_twice() {
        let t = table();
        let inverted = t.invert();
        assert_eq!(
            inverted.keys().collect::<Vec<_>>(),
            vec![100e3, 200e3, 300e3, 400e3]
        );
        assert_eq!(inverted.value(200e3), Some(300.0));
        let back = inverted.invert();
        assert_eq!(
            back.iter().copied().collect::<Vec<_>>(),
            t.iter().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn quantities() {
        let t: InterpolableTable<f64, MolarEnergy> = [(0.0, -1.0 * JOULE / MOL), (1.0, JOULE / MOL)]
            .into_iter()
            .collect();
        assert_relative_eq!(t.value(0.75).unwrap().convert_into(JOULE / MOL), 0.5);
        let inverted = t.invert();
        assert_relative_eq!(inverted.value(0.0 * JOULE / MOL).unwrap(), 0.5);

        // quantities as keys and values, stored in SI base units
        let psat: InterpolableTable<Temperature, Pressure> =
            [(350.0 * KELVIN, 4e4 * PASCAL), (370.0 * KELVIN, 9e4 * PASCAL)]
                .into_iter()
                .collect();
        assert_eq!(psat.min_key().map(|t| t.to_f64()), Some(350.0));
        let p = psat.value(365.0 * KELVIN).unwrap();
        assert_relative_eq!(p.convert_into(PASCAL), 7.75e4);
        let inverted = psat.invert();
        let t = inverted.value(7.75e4 * PASCAL).unwrap();
        assert_relative_eq!(t.convert_into(KELVIN), 365.0);
    }

    #[test]
    fn memoized() {
        let mut m = MemoizedTable::new(table());
        assert_eq!(m.value(100.0), Some(100e3));
        assert_eq!(m.cached_len(), 0);
        let y = m.value(150.0);
        assert_eq!(m.cached_len(), 1);
        assert_eq!(m.value(150.0), y);
        assert_eq!(m.value(500.0), None);
        assert_eq!(m.cached_len(), 1);
        // cached points do not change later interpolations
        assert_eq!(m.value(125.0), table().value(125.0));
        assert_eq!(m.table().len(), 4);
        m.clear_cache();
        assert_eq!(m.cached_len(), 0);
    }

    #[test]
    fn delimited_string() {
        let t: InterpolableTable<f64, f64> = [(1.0, 2.0), (3.0, 4.5)].into_iter().collect();
        assert_eq!(t.to_delimited_string(","), "key,value\n1,2\n3,4.5\n");
    }
}
