//! Sum of squares over a prefix of a fixed sequence

/// The sequence prefixes are taken from
pub const POSSIBLE_NUMBERS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Sum of squares of the first `len` possible numbers; saturates past ten
pub fn sum_of_squares_for_len(len: usize) -> f64 {
    POSSIBLE_NUMBERS
        .iter()
        .take(len)
        .map(|x| f64::from(*x).powi(2))
        .sum()
}

/// One sum per sublist, using only the sublist's length
pub fn sum_of_squares<T>(lists: &[Vec<T>]) -> Vec<f64> {
    lists
        .iter()
        .map(|list| sum_of_squares_for_len(list.len()))
        .collect()
}
