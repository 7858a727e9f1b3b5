use super::group::group_first_seen;
use super::model::{Dataset, SiteSelection};
use super::series::{ChartSeries, PieCategory, PieSlice};

/// Series for the success pie chart.
///
/// * [`SiteSelection::All`]: one slice per launch site, valued at the site's
///   success rate (mean outcome).
/// * [`SiteSelection::Site`]: one slice per outcome observed at that site,
///   valued at its launch count. Outcomes that never happened get no slice,
///   and an unknown site yields an empty series.
///
/// Slices follow the order in which their key first appears in the dataset.
pub fn aggregate(dataset: &Dataset, selection: &SiteSelection) -> ChartSeries<PieSlice> {
    let series = match selection {
        SiteSelection::All => success_rate_by_site(dataset),
        SiteSelection::Site(_) => outcome_counts(dataset, selection),
    };
    log::debug!("aggregate({selection}) -> {} slices", series.len());
    series
}

fn success_rate_by_site(dataset: &Dataset) -> ChartSeries<PieSlice> {
    group_first_seen(dataset.records(), |rec| rec.launch_site.clone())
        .into_iter()
        .map(|(site, launches)| {
            let successes: f64 = launches.iter().map(|rec| rec.outcome.as_f64()).sum();
            PieSlice {
                category: PieCategory::Site(site),
                value: successes / launches.len() as f64,
            }
        })
        .collect()
}

fn outcome_counts(dataset: &Dataset, selection: &SiteSelection) -> ChartSeries<PieSlice> {
    let launches = dataset.select(selection).map(|(_, rec)| rec);
    group_first_seen(launches, |rec| rec.outcome)
        .into_iter()
        .map(|(outcome, group)| PieSlice {
            category: PieCategory::Outcome(outcome),
            value: group.len() as f64,
        })
        .collect()
}
