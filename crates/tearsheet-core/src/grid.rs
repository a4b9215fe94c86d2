//! Row-major grid planning for section bodies.

/// Splits `items` into rows of at most `row_capacity`, preserving order.
/// A zero capacity yields no rows.
pub fn plan<T>(items: Vec<T>, row_capacity: usize) -> Vec<Vec<T>> {
    if row_capacity == 0 || items.is_empty() {
        return Vec::new();
    }
    let mut rows = Vec::with_capacity(items.len().div_ceil(row_capacity));
    let mut row = Vec::with_capacity(row_capacity);
    for item in items {
        row.push(item);
        if row.len() == row_capacity {
            rows.push(std::mem::replace(&mut row, Vec::with_capacity(row_capacity)));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_preserves_order() {
        let rows = plan(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_plan_row_count_is_ceiling() {
        for n in 0..=20usize {
            let rows = plan((0..n).collect::<Vec<_>>(), 4);
            assert_eq!(rows.len(), n.div_ceil(4));
            assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), n);
        }
    }

    #[test]
    fn test_plan_zero_capacity_yields_nothing() {
        assert!(plan(vec![1, 2, 3], 0).is_empty());
    }

    #[test]
    fn test_plan_exact_fit_has_no_trailing_row() {
        let rows = plan(vec![1, 2, 3, 4], 4);
        assert_eq!(rows, vec![vec![1, 2, 3, 4]]);
    }
}
