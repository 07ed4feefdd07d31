//! Filter registry for the housing plot leaderboard.

use std::fmt;

use super::record::{
    DISTRICTS, HouseSize, LotteryStatus, LottoPhase, MAX_PLOT_NUMBER, MAX_WARD_NUMBER, PlotRecord,
    Tenants,
};
use crate::registry::{FilterDef, FilterOption, FilterRegistry, Predicate, option_sequence};

/// Selectable phase filter values.
///
/// The FCFS and Missing/Outdated cases are their own variants rather than
/// values squeezed into the phase code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseOption {
    Phase(LottoPhase),
    FirstComeFirstServed,
    MissingOrOutdated,
}

impl PhaseOption {
    /// Whether `plot` falls in this bucket.
    pub fn matches(self, plot: &PlotRecord) -> bool {
        match (self, plot.lottery) {
            (PhaseOption::FirstComeFirstServed, LotteryStatus::NotLottery) => true,
            (PhaseOption::MissingOrOutdated, LotteryStatus::UnknownOrStale) => true,
            (PhaseOption::Phase(want), LotteryStatus::Phase { phase, .. }) => want == phase,
            _ => false,
        }
    }
}

impl fmt::Display for PhaseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseOption::Phase(phase) => fmt::Display::fmt(phase, f),
            PhaseOption::FirstComeFirstServed => f.pad("fcfs"),
            PhaseOption::MissingOrOutdated => f.pad("missing"),
        }
    }
}

/// An option value of any plot filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotFilterValue {
    District(u16),
    Ward(u8),
    Plot(u8),
    Size(HouseSize),
    Phase(PhaseOption),
    Tenant(Tenants),
}

impl PlotFilterValue {
    fn district(&self) -> Option<u16> {
        match self {
            PlotFilterValue::District(d) => Some(*d),
            _ => None,
        }
    }

    fn ward(&self) -> Option<u8> {
        match self {
            PlotFilterValue::Ward(w) => Some(*w),
            _ => None,
        }
    }

    fn plot(&self) -> Option<u8> {
        match self {
            PlotFilterValue::Plot(p) => Some(*p),
            _ => None,
        }
    }

    fn size(&self) -> Option<HouseSize> {
        match self {
            PlotFilterValue::Size(s) => Some(*s),
            _ => None,
        }
    }

    fn phase(&self) -> Option<PhaseOption> {
        match self {
            PlotFilterValue::Phase(p) => Some(*p),
            _ => None,
        }
    }

    fn tenant(&self) -> Option<Tenants> {
        match self {
            PlotFilterValue::Tenant(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for PlotFilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotFilterValue::District(d) => fmt::Display::fmt(d, f),
            PlotFilterValue::Ward(w) => fmt::Display::fmt(w, f),
            PlotFilterValue::Plot(p) => fmt::Display::fmt(p, f),
            PlotFilterValue::Size(s) => fmt::Display::fmt(s, f),
            PlotFilterValue::Phase(p) => fmt::Display::fmt(p, f),
            PlotFilterValue::Tenant(t) => fmt::Display::fmt(t, f),
        }
    }
}

// ── Strategies ──

fn districts(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    let selected: Vec<u16> = values.iter().filter_map(PlotFilterValue::district).collect();
    Box::new(move |plot: &PlotRecord| selected.contains(&plot.district_id))
}

fn wards(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    let selected: Vec<u8> = values.iter().filter_map(PlotFilterValue::ward).collect();
    Box::new(move |plot: &PlotRecord| selected.contains(&plot.ward_number))
}

fn plots(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    let selected: Vec<u8> = values.iter().filter_map(PlotFilterValue::plot).collect();
    Box::new(move |plot: &PlotRecord| selected.contains(&plot.plot_number))
}

fn sizes(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    let selected: Vec<HouseSize> = values.iter().filter_map(PlotFilterValue::size).collect();
    Box::new(move |plot: &PlotRecord| selected.contains(&plot.size))
}

fn phases(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    let selected: Vec<PhaseOption> = values.iter().filter_map(PlotFilterValue::phase).collect();
    Box::new(move |plot: &PlotRecord| selected.iter().any(|opt| opt.matches(plot)))
}

fn tenants(values: &[PlotFilterValue]) -> Predicate<PlotRecord> {
    // Nothing selected means nothing to narrow by.
    if values.is_empty() {
        return Box::new(|_: &PlotRecord| true);
    }
    let mask = values
        .iter()
        .filter_map(PlotFilterValue::tenant)
        .fold(Tenants::empty(), |acc, t| acc | t);
    Box::new(move |plot: &PlotRecord| plot.tenants.intersects(mask))
}

/// Build the plot filter registry.
pub fn filters() -> FilterRegistry<PlotRecord, PlotFilterValue> {
    let district_options = DISTRICTS
        .iter()
        .map(|(id, name)| FilterOption::new(*name, PlotFilterValue::District(*id)))
        .collect();

    let size_options = vec![
        FilterOption::new("Small", PlotFilterValue::Size(HouseSize::Small)),
        FilterOption::new("Medium", PlotFilterValue::Size(HouseSize::Medium)),
        FilterOption::new("Large", PlotFilterValue::Size(HouseSize::Large)),
    ];

    let phase_options = [
        ("Accepting Entries", PhaseOption::Phase(LottoPhase::Entry)),
        ("Results", PhaseOption::Phase(LottoPhase::Results)),
        ("Unavailable", PhaseOption::Phase(LottoPhase::Unavailable)),
        ("FCFS", PhaseOption::FirstComeFirstServed),
        ("Missing/Outdated", PhaseOption::MissingOrOutdated),
    ]
    .into_iter()
    .map(|(label, opt)| FilterOption::new(label, PlotFilterValue::Phase(opt)))
    .collect();

    let tenant_options = vec![
        FilterOption::new("Free Company", PlotFilterValue::Tenant(Tenants::FREE_COMPANY)),
        FilterOption::new("Individual", PlotFilterValue::Tenant(Tenants::INDIVIDUAL)),
    ];

    FilterRegistry::new()
        .with("districts", FilterDef::new(district_options, districts))
        .with(
            "wards",
            FilterDef::new(option_sequence(MAX_WARD_NUMBER, PlotFilterValue::Ward), wards),
        )
        .with(
            "plots",
            FilterDef::new(option_sequence(MAX_PLOT_NUMBER, PlotFilterValue::Plot), plots),
        )
        .with("sizes", FilterDef::new(size_options, sizes))
        .with("phases", FilterDef::new(phase_options, phases))
        .with("tenants", FilterDef::new(tenant_options, tenants))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::plot::record::fixtures::*;
    use crate::plot::record::{EMPYREUM, GOBLET, LAVENDER_BEDS, MIST, SHIROGANE};

    fn sample() -> Vec<PlotRecord> {
        let mut a = plot(LAVENDER_BEDS, 2, 5);
        a.size = HouseSize::Large;
        a.tenants = Tenants::FREE_COMPANY;
        a.lottery = lottery(LottoPhase::Results, Some(40));

        let mut b = plot(MIST, 0, 59);
        b.size = HouseSize::Medium;
        b.tenants = Tenants::INDIVIDUAL;
        b.lottery = LotteryStatus::UnknownOrStale;

        let c = plot(EMPYREUM, 29, 0);

        let mut d = plot(SHIROGANE, 10, 30);
        d.lottery = lottery(LottoPhase::Entry, None);

        let mut e = plot(GOBLET, 5, 5);
        e.size = HouseSize::Large;
        e.lottery = lottery(LottoPhase::Unavailable, Some(3));

        vec![a, b, c, d, e]
    }

    fn matching(id: &str, values: &[PlotFilterValue]) -> Vec<usize> {
        let registry = filters();
        let pred = registry.get(id).unwrap().predicate(values);
        sample()
            .iter()
            .enumerate()
            .filter(|(_, p)| pred(*p))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn registry_shape() {
        let registry = filters();
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            ["districts", "wards", "plots", "sizes", "phases", "tenants"]
        );
        assert_eq!(registry.get("districts").unwrap().options().len(), 5);
        assert_eq!(registry.get("wards").unwrap().options().len(), 30);
        assert_eq!(registry.get("plots").unwrap().options().len(), 60);
        assert_eq!(registry.get("phases").unwrap().options().len(), 5);
    }

    #[test]
    fn membership_filters() {
        assert_eq!(
            matching(
                "districts",
                &[PlotFilterValue::District(LAVENDER_BEDS), PlotFilterValue::District(GOBLET)]
            ),
            [0, 4]
        );
        assert_eq!(matching("wards", &[PlotFilterValue::Ward(29)]), [2]);
        assert_eq!(matching("plots", &[PlotFilterValue::Plot(5)]), [0, 4]);
        assert_eq!(matching("sizes", &[PlotFilterValue::Size(HouseSize::Large)]), [0, 4]);
    }

    #[test]
    fn membership_filters_reject_everything_on_empty_selection() {
        for id in ["districts", "wards", "plots", "sizes", "phases"] {
            assert!(matching(id, &[]).is_empty(), "{id} should reject all");
        }
    }

    #[test]
    fn tenant_filter_intersects_mask() {
        assert_eq!(
            matching("tenants", &[PlotFilterValue::Tenant(Tenants::FREE_COMPANY)]),
            [0, 2, 3, 4]
        );
        assert_eq!(
            matching("tenants", &[PlotFilterValue::Tenant(Tenants::INDIVIDUAL)]),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn tenant_filter_passes_everything_on_empty_selection() {
        assert_eq!(matching("tenants", &[]), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn tenant_filter_without_tenant_values_rejects_everything() {
        assert!(matching("tenants", &[PlotFilterValue::District(LAVENDER_BEDS)]).is_empty());
    }

    #[test]
    fn tenant_filter_rejects_plots_without_tenants() {
        let mut p = plot(MIST, 0, 0);
        p.tenants = Tenants::empty();
        let registry = filters();
        let def = registry.get("tenants").unwrap();
        assert!(!def.predicate(&def.values())(&p));
    }

    #[test]
    fn phase_filter_buckets() {
        let fcfs = PlotFilterValue::Phase(PhaseOption::FirstComeFirstServed);
        let missing = PlotFilterValue::Phase(PhaseOption::MissingOrOutdated);
        let results = PlotFilterValue::Phase(PhaseOption::Phase(LottoPhase::Results));
        let entry = PlotFilterValue::Phase(PhaseOption::Phase(LottoPhase::Entry));

        // Non-lottery plots match only FCFS, whatever else is selected.
        assert_eq!(matching("phases", &[fcfs]), [2]);
        assert_eq!(matching("phases", &[results, entry, missing]), [0, 1, 3]);
        // Stale lottery plots match only Missing/Outdated.
        assert_eq!(matching("phases", &[missing]), [1]);
        // Current phases match their own value.
        assert_eq!(matching("phases", &[results]), [0]);
        assert_eq!(matching("phases", &[entry, fcfs]), [2, 3]);
    }

    #[test]
    fn resolve_tokens() {
        let registry = filters();
        let sel = registry
            .parse_selection("phases", &["fcfs", "Missing/Outdated", "results"])
            .unwrap();
        assert_eq!(
            sel,
            [
                PlotFilterValue::Phase(PhaseOption::FirstComeFirstServed),
                PlotFilterValue::Phase(PhaseOption::MissingOrOutdated),
                PlotFilterValue::Phase(PhaseOption::Phase(LottoPhase::Results)),
            ]
        );
        assert_eq!(
            registry.parse_selection("districts", &["340", "mist"]).unwrap(),
            [PlotFilterValue::District(LAVENDER_BEDS), PlotFilterValue::District(MIST)]
        );
        assert_eq!(
            registry.parse_selection("wards", &["1", "30"]).unwrap(),
            [PlotFilterValue::Ward(0), PlotFilterValue::Ward(29)]
        );
        assert_eq!(
            registry.parse_selection("tenants", &["individual"]).unwrap(),
            [PlotFilterValue::Tenant(Tenants::INDIVIDUAL)]
        );
        assert!(registry.parse_selection("wards", &["31"]).is_err());
    }

    fn arb_plot() -> impl Strategy<Value = PlotRecord> {
        let district_ids: Vec<u16> = DISTRICTS.iter().map(|(d, _)| *d).collect();
        let district = prop::sample::select(district_ids);
        let sizes = vec![HouseSize::Small, HouseSize::Medium, HouseSize::Large];
        let size = prop::sample::select(sizes);
        let phase = prop::sample::select(vec![
            LottoPhase::Entry,
            LottoPhase::Results,
            LottoPhase::Unavailable,
        ]);
        let lottery = prop_oneof![
            Just(LotteryStatus::NotLottery),
            Just(LotteryStatus::UnknownOrStale),
            (phase, proptest::option::of(0u32..500))
                .prop_map(|(phase, entries)| LotteryStatus::Phase { phase, entries }),
        ];
        let tenants = (1u8..=3).prop_map(|bits| Tenants::from_bits_truncate(bits << 1));
        (
            district,
            0..MAX_WARD_NUMBER,
            0..MAX_PLOT_NUMBER,
            size,
            tenants,
            lottery,
        )
            .prop_map(|(district_id, ward, plot_no, size, tenants, lottery)| {
                let mut p = plot(district_id, ward, plot_no);
                p.size = size;
                p.tenants = tenants;
                p.lottery = lottery;
                p
            })
    }

    proptest! {
        /// Selecting every option is a no-op for each filter.
        #[test]
        fn full_selection_passes_every_plot(p in arb_plot()) {
            let registry = filters();
            for (id, def) in registry.iter() {
                let pred = def.predicate(&def.values());
                prop_assert!(pred(&p), "{} rejected {:?}", id, p);
            }
        }

        /// Filtering an already-filtered list changes nothing.
        #[test]
        fn filtering_is_idempotent(
            plots in prop::collection::vec(arb_plot(), 0..30),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4),
        ) {
            let registry = filters();
            for (_, def) in registry.iter() {
                let options = def.values();
                let selected: Vec<_> = picks.iter().map(|i| *i.get(&options)).collect();
                let pred = def.predicate(&selected);
                let once: Vec<&PlotRecord> = plots.iter().filter(|&p| pred(p)).collect();
                let twice: Vec<&PlotRecord> = once.iter().copied().filter(|&p| pred(p)).collect();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
