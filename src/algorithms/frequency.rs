use core::fmt;

/// Occurrence counts of every byte value present in a payload.
///
/// Bytes that never occur are absent: [`get`](FrequencyModel::get) returns `None` for them and
/// [`iter`](FrequencyModel::iter) skips them. The counts always sum to the input length.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyModel {
    counts: [u64; 256],
}

impl FrequencyModel {
    /// Scans `input` once. Cannot fail; the empty input yields the empty model.
    pub fn compute(input: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in input {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, byte: u8) -> Option<u64> {
        match self.counts[byte as usize] {
            0 => None,
            n => Some(n),
        }
    }

    /// Present byte values with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Sum of all counts, equal to the length of the scanned input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Shannon entropy in bits per symbol, the lower bound any prefix code can approach.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.iter()
            .map(|(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl fmt::Debug for FrequencyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_input_length() {
        let model = FrequencyModel::compute(b"aabccc");
        assert_eq!(model.get(b'a'), Some(2));
        assert_eq!(model.get(b'b'), Some(1));
        assert_eq!(model.get(b'c'), Some(3));
        assert_eq!(model.total(), 6);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn absent_bytes_are_not_in_the_model() {
        let model = FrequencyModel::compute(b"aabccc");
        assert_eq!(model.get(b'd'), None);
        assert_eq!(model.get(0), None);
        assert!(model.iter().all(|(_, count)| count >= 1));
        assert_eq!(model.iter().map(|(b, _)| b).collect::<Vec<_>>(), vec![b'a', b'b', b'c']);
    }

    #[test]
    fn empty_input_is_the_empty_model() {
        let model = FrequencyModel::compute(&[]);
        assert!(model.is_empty());
        assert_eq!(model.len(), 0);
        assert_eq!(model.iter().count(), 0);
        assert_eq!(model.entropy(), 0.0);
    }

    #[test]
    fn entropy_of_uniform_bytes() {
        let all: Vec<u8> = (0..=255).collect();
        let model = FrequencyModel::compute(&all);
        assert!((model.entropy() - 8.0).abs() < 1e-9);

        let single = FrequencyModel::compute(&[7; 100]);
        assert_eq!(single.entropy(), 0.0);
    }
}
