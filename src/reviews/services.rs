/// Arithmetic mean at full float precision plus the count. An empty slice
/// yields (0.0, 0), matching a product with no reviews.
pub fn rating_summary(ratings: &[i32]) -> (f64, i64) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    (sum as f64 / ratings.len() as f64, ratings.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_five_three_four_is_four() {
        let (avg, count) = rating_summary(&[5, 3, 4]);
        assert_eq!(avg, 4.0);
        assert_eq!(count, 3);
    }

    #[test]
    fn single_rating_is_its_own_mean() {
        let (avg, count) = rating_summary(&[2]);
        assert_eq!(avg, 2.0);
        assert_eq!(count, 1);
    }

    #[test]
    fn fractional_means_keep_full_precision() {
        let (avg, count) = rating_summary(&[5, 4]);
        assert_eq!(avg, 4.5);
        assert_eq!(count, 2);
    }

    #[test]
    fn empty_ratings_are_zero() {
        assert_eq!(rating_summary(&[]), (0.0, 0));
    }
}
