use super::model::{Dataset, PayloadRange, SiteSelection};
use super::series::{ChartSeries, ScatterPoint};

/// Indices of records that belong to `selection` and whose payload lies in
/// `range` (inclusive), in dataset order.
pub fn matching_indices(
    dataset: &Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Vec<usize> {
    dataset
        .select(selection)
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// Series for the payload scatter chart: one point per matching record,
/// `x` = payload, `y` = outcome, coloured by booster version category.
///
/// Unknown sites and empty intersections give an empty series.
pub fn filter(
    dataset: &Dataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> ChartSeries<ScatterPoint> {
    let records = dataset.records();
    let series: ChartSeries<ScatterPoint> = matching_indices(dataset, selection, range)
        .into_iter()
        .map(|i| {
            let rec = &records[i];
            ScatterPoint {
                x: rec.payload_mass_kg,
                y: rec.outcome,
                color_category: rec.booster_version_category.clone(),
            }
        })
        .collect();
    log::debug!("filter({selection}, {range}) -> {} points", series.len());
    series
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::fixtures::{example_dataset, falcon_dataset};
    use crate::data::model::Outcome;

    #[test]
    fn all_sites_keeps_records_inside_range() {
        let series = filter(
            &example_dataset(),
            &SiteSelection::All,
            &PayloadRange::new(0.0, 2000.0),
        );
        assert_eq!(
            series.rows(),
            &[
                ScatterPoint {
                    x: 500.0,
                    y: Outcome::Success,
                    color_category: "v1".into(),
                },
                ScatterPoint {
                    x: 1500.0,
                    y: Outcome::Failure,
                    color_category: "v1".into(),
                },
            ]
        );
    }

    #[test]
    fn site_outside_range_is_empty() {
        let series = filter(
            &example_dataset(),
            &SiteSelection::Site("KSC".into()),
            &PayloadRange::new(0.0, 2000.0),
        );
        assert!(series.is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = example_dataset();
        let exact = filter(&ds, &SiteSelection::All, &PayloadRange::new(1500.0, 1500.0));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact.rows()[0].x, 1500.0);

        let both_ends = matching_indices(&ds, &SiteSelection::All, &PayloadRange::new(500.0, 2500.0));
        assert_eq!(both_ends, vec![0, 1, 2]);
    }

    #[test]
    fn unknown_site_and_reversed_range_are_empty() {
        let ds = example_dataset();
        let unknown = filter(
            &ds,
            &SiteSelection::Site("UNKNOWN".into()),
            &PayloadRange::new(0.0, 10_000.0),
        );
        assert!(unknown.is_empty());

        let reversed = filter(&ds, &SiteSelection::All, &PayloadRange::new(2000.0, 0.0));
        assert!(reversed.is_empty());
    }

    #[test]
    fn dataset_order_is_preserved() {
        let ds = falcon_dataset();
        let idx = matching_indices(&ds, &SiteSelection::All, &ds.payload_bounds());
        assert_eq!(idx, (0..ds.len()).collect::<Vec<_>>());
    }

    proptest! {
        /// Every returned point lies inside the requested range.
        #[test]
        fn prop_points_within_range(a in 0.0f64..16_000.0, b in 0.0f64..16_000.0) {
            let range = PayloadRange::new(a.min(b), a.max(b));
            let series = filter(&falcon_dataset(), &SiteSelection::All, &range);
            for p in &series {
                prop_assert!(range.min_kg <= p.x && p.x <= range.max_kg);
            }
        }

        /// Widening the range never drops a record.
        #[test]
        fn prop_widening_is_monotonic(
            a in 0.0f64..16_000.0,
            b in 0.0f64..16_000.0,
            lower in 0.0f64..4_000.0,
            raise in 0.0f64..4_000.0,
        ) {
            let ds = falcon_dataset();
            let selection = SiteSelection::All;
            let narrow = PayloadRange::new(a.min(b), a.max(b));
            let wide = PayloadRange::new(narrow.min_kg - lower, narrow.max_kg + raise);

            let before = matching_indices(&ds, &selection, &narrow);
            let after = matching_indices(&ds, &selection, &wide);
            for i in before {
                prop_assert!(after.contains(&i));
            }
        }

        /// Same arguments, same answer.
        #[test]
        fn prop_idempotent(a in 0.0f64..16_000.0, b in 0.0f64..16_000.0, site in 0usize..5) {
            let ds = falcon_dataset();
            let selection = ds
                .launch_sites()
                .get(site)
                .map_or(SiteSelection::All, |s| SiteSelection::Site(s.to_string()));
            let range = PayloadRange::new(a.min(b), a.max(b));
            prop_assert_eq!(filter(&ds, &selection, &range), filter(&ds, &selection, &range));
        }
    }
}
