use proptest::prelude::*;
use venn_core::{count_regions, IndicatorColumn, SetCollection};

const NAMES: [&str; 3] = ["Bcftools", "FreeBayes", "GATK"];

fn build(order: &[usize], rows: &[Vec<bool>]) -> SetCollection {
    let columns = order
        .iter()
        .map(|&idx| IndicatorColumn::new(NAMES[idx], rows.iter().map(|row| row[idx]).collect()))
        .collect();
    SetCollection::new(columns).unwrap()
}

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), 3), 1..64)
}

proptest! {
    #[test]
    fn region_sum_matches_rows_with_any_flag(rows in rows_strategy(), three in any::<bool>()) {
        let order: Vec<usize> = if three { vec![0, 1, 2] } else { vec![0, 1] };
        let map = count_regions(&build(&order, &rows)).unwrap();
        let expected = rows
            .iter()
            .filter(|row| order.iter().any(|&idx| row[idx]))
            .count() as u64;
        prop_assert_eq!(map.len(), (1 << order.len()) - 1);
        prop_assert_eq!(map.total(), expected);
        prop_assert_eq!(map.total() + map.empty_rows(), rows.len() as u64);
    }

    #[test]
    fn column_order_does_not_change_named_counts(rows in rows_strategy()) {
        let reference = count_regions(&build(&[0, 1, 2], &rows)).unwrap().named_counts();
        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            let permuted = count_regions(&build(&order, &rows)).unwrap().named_counts();
            prop_assert_eq!(&permuted, &reference);
        }
    }
}
