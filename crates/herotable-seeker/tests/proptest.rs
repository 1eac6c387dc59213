//! Property-based tests for the query pipeline using proptest.

use proptest::prelude::*;
use herotable_seeker::{
    compute_view, filter, sort, Column, FieldPath, PageSize, PageState, Schema, Seekable,
    Session, SortSpec, Value,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TestHero {
    id: usize,
    name: String,
    weight: Option<String>,
    race: Option<String>,
}

impl Seekable for TestHero {
    fn field_value(&self, path: &FieldPath) -> Value<'_> {
        fn text(v: &Option<String>) -> Value<'_> { v.as_deref().map_or(Value::None, Value::String) }
        match path.to_string().as_str() {
            "name" => Value::String(&self.name),
            "weight" => text(&self.weight),
            "race" => text(&self.race),
            _ => Value::None,
        }
    }
}

fn schema() -> Schema {
    Schema::new("name")
        .column(Column::new("name", "Name"))
        .column(Column::new("race", "Race"))
}

fn weight_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("-".to_string())),
        (1u32..2000).prop_map(|n| Some(format!("{n} lb"))),
        (1u32..50).prop_map(|n| Some(format!("{n} tons"))),
    ]
}

fn race_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => "[A-Z][a-z]{2,8}".prop_map(Some),
        1 => Just(None),
        1 => Just(Some(String::new())),
    ]
}

fn heroes_strategy(max: usize) -> impl Strategy<Value = Vec<TestHero>> {
    prop::collection::vec(
        ("[A-Za-z]{1,8}", weight_strategy(), race_strategy()),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (name, weight, race))| TestHero {
                id,
                name,
                weight,
                race,
            })
            .collect()
    })
}

/// A column whose values are not all of one kind.
#[derive(Debug, Clone, PartialEq)]
enum Rank {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Rank {
    fn kind(&self) -> u8 {
        match self {
            Rank::Number(_) => 0,
            Rank::Text(_) => 1,
            Rank::Flag(_) => 2,
        }
    }

    /// Whether `self` may precede `other` in ascending order.
    fn may_precede(&self, other: &Rank) -> bool {
        match (self, other) {
            (Rank::Number(a), Rank::Number(b)) => a <= b,
            (Rank::Text(a), Rank::Text(b)) => a.to_lowercase() <= b.to_lowercase(),
            (Rank::Flag(a), Rank::Flag(b)) => a <= b,
            _ => self.kind() < other.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RankedHero {
    id: usize,
    rank: Rank,
}

impl Seekable for RankedHero {
    fn field_value(&self, path: &FieldPath) -> Value<'_> {
        match (path.to_string().as_str(), &self.rank) {
            ("rank", Rank::Number(n)) => Value::Number(*n),
            ("rank", Rank::Text(s)) => Value::String(s),
            ("rank", Rank::Flag(b)) => Value::Bool(*b),
            _ => Value::None,
        }
    }
}

fn rank_strategy() -> impl Strategy<Value = Rank> {
    prop_oneof![
        (-1000i32..1000).prop_map(|n| Rank::Number(n as f64)),
        "[A-Za-z]{1,6}".prop_map(Rank::Text),
        any::<bool>().prop_map(Rank::Flag),
    ]
}

fn ranked_heroes(ranks: Vec<Rank>) -> Vec<RankedHero> {
    ranks
        .into_iter()
        .enumerate()
        .map(|(id, rank)| RankedHero { id, rank })
        .collect()
}

fn ranked_ids(records: &[&RankedHero]) -> Vec<usize> {
    records.iter().map(|h| h.id).collect()
}

fn ids(records: &[&TestHero]) -> Vec<usize> {
    records.iter().map(|h| h.id).collect()
}

fn is_incomplete(hero: &TestHero) -> bool {
    hero.race.as_deref().map_or(true, |r| r.is_empty() || r == "-")
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filter keeps exactly the case-insensitive substring matches, in order.
    #[test]
    fn filter_is_an_exact_partition(
        heroes in heroes_strategy(60),
        term in "[a-zA-Z]{0,3}",
    ) {
        let matched = filter(&heroes, &"name".into(), &term);
        let needle = term.to_lowercase();
        let expected: Vec<usize> = heroes
            .iter()
            .filter(|h| h.name.to_lowercase().contains(&needle))
            .map(|h| h.id)
            .collect();
        prop_assert_eq!(ids(&matched), expected);
    }

    /// Filter should never return more items than the input.
    #[test]
    fn filter_never_grows_collection(
        heroes in heroes_strategy(60),
        term in "[a-z]{0,2}",
    ) {
        prop_assert!(filter(&heroes, &"name".into(), &term).len() <= heroes.len());
    }

    /// Incomplete records form a trailing block, whatever the sort.
    #[test]
    fn incomplete_records_trail(
        heroes in heroes_strategy(60),
        descending in any::<bool>(),
        column in prop_oneof![Just("name"), Just("weight"), Just("race")],
    ) {
        let schema = schema();
        let spec = if descending { SortSpec::desc(column) } else { SortSpec::asc(column) };
        let mut refs: Vec<&TestHero> = heroes.iter().collect();
        sort(&mut refs, &spec, schema.required());

        let first_incomplete = refs.iter().position(|h| is_incomplete(h)).unwrap_or(refs.len());
        for hero in &refs[first_incomplete..] {
            prop_assert!(is_incomplete(hero), "complete record after an incomplete one");
        }
    }

    /// Absent weights sort after present ones in both directions.
    #[test]
    fn absent_sort_values_trail(
        heroes in heroes_strategy(60),
        descending in any::<bool>(),
    ) {
        let spec = if descending { SortSpec::desc("weight") } else { SortSpec::asc("weight") };
        let mut refs: Vec<&TestHero> = heroes.iter().collect();
        sort(&mut refs, &spec, &[]);

        let absent = |h: &TestHero| h.weight.as_deref().map_or(true, |w| w == "-");
        let first_absent = refs.iter().position(|h| absent(h)).unwrap_or(refs.len());
        for hero in &refs[first_absent..] {
            prop_assert!(absent(hero));
        }
    }

    /// With distinct keys, descending is the exact reverse of ascending.
    #[test]
    fn descending_reverses_ascending(
        weights in prop::collection::hash_set(1u32..100_000, 0..40),
    ) {
        let heroes: Vec<TestHero> = weights
            .into_iter()
            .enumerate()
            .map(|(id, w)| TestHero {
                id,
                name: format!("Hero {id}"),
                weight: Some(format!("{w} lb")),
                race: Some("Human".into()),
            })
            .collect();
        let schema = schema();

        let mut asc: Vec<&TestHero> = heroes.iter().collect();
        sort(&mut asc, &SortSpec::asc("weight"), schema.required());
        let mut desc: Vec<&TestHero> = heroes.iter().collect();
        sort(&mut desc, &SortSpec::desc("weight"), schema.required());

        let mut reversed = ids(&asc);
        reversed.reverse();
        prop_assert_eq!(ids(&desc), reversed);
    }

    /// A column mixing numbers, text and booleans sorts without panicking,
    /// grouped by kind and ordered within each kind.
    #[test]
    fn mixed_kinds_sort_by_kind_then_value(
        ranks in prop::collection::vec(rank_strategy(), 0..400),
        descending in any::<bool>(),
    ) {
        let heroes = ranked_heroes(ranks);
        let spec = if descending { SortSpec::desc("rank") } else { SortSpec::asc("rank") };
        let view = compute_view(&heroes, "", &spec, &PageState::new(PageSize::All), &Schema::new("name"));
        prop_assert_eq!(view.len(), heroes.len());

        for pair in view.records.windows(2) {
            let (first, second) = if descending { (pair[1], pair[0]) } else { (pair[0], pair[1]) };
            prop_assert!(
                first.rank.may_precede(&second.rank),
                "{:?} sorted before {:?}", pair[0].rank, pair[1].rank
            );
        }
    }

    /// With distinct keys of mixed kinds, descending is the exact reverse of
    /// ascending.
    #[test]
    fn mixed_kinds_descending_reverses_ascending(
        keys in prop::collection::hash_set(0u32..10_000, 0..300),
        flags in prop::sample::subsequence(vec![false, true], 0..=2),
    ) {
        let ranks = keys
            .into_iter()
            .map(|k| if k % 2 == 0 { Rank::Number(k as f64) } else { Rank::Text(format!("t{k:05}")) })
            .chain(flags.into_iter().map(Rank::Flag))
            .collect();
        let heroes = ranked_heroes(ranks);

        let mut asc: Vec<&RankedHero> = heroes.iter().collect();
        sort(&mut asc, &SortSpec::asc("rank"), &[]);
        let mut desc: Vec<&RankedHero> = heroes.iter().collect();
        sort(&mut desc, &SortSpec::desc("rank"), &[]);

        let mut reversed = ranked_ids(&asc);
        reversed.reverse();
        prop_assert_eq!(ranked_ids(&desc), reversed);
    }

    /// Every in-range page holds min(p, n - (k-1)p) records.
    #[test]
    fn pages_have_expected_sizes(
        heroes in heroes_strategy(80),
        size in 1usize..15,
    ) {
        let schema = schema();
        let page_size = PageSize::limit(size).unwrap();
        let n = heroes.len();
        let page_count = n.div_ceil(size);

        for k in 1..=page_count {
            let state = PageState::new(page_size).at(k);
            let view = compute_view(&heroes, "", &SortSpec::default(), &state, &schema);
            prop_assert_eq!(view.len(), size.min(n - (k - 1) * size));
            prop_assert_eq!(view.page_count, page_count);
        }
    }

    /// Going one past the last page changes nothing.
    #[test]
    fn page_past_end_is_a_no_op(
        heroes in heroes_strategy(80),
        size in 1usize..15,
        start in 1usize..6,
    ) {
        let mut session = Session::new(heroes)
            .with_schema(schema())
            .with_page_size(PageSize::limit(size).unwrap());
        let page_count = session.page_count();
        let _ = session.go_to_page(start.min(page_count.max(1)));
        let before = session.page_state().page();
        let before_ids: Vec<usize> = session.view().records.iter().map(|h| h.id).collect();

        prop_assert!(session.go_to_page(page_count + 1).is_err());
        prop_assert_eq!(session.page_state().page(), before);
        let after_ids: Vec<usize> = session.view().records.iter().map(|h| h.id).collect();
        prop_assert_eq!(after_ids, before_ids);
    }

    /// Pages concatenate back to the full sorted result.
    #[test]
    fn pages_tile_the_sorted_result(
        heroes in heroes_strategy(60),
        size in 1usize..10,
        term in "[a-z]{0,1}",
    ) {
        let schema = schema();
        let spec = SortSpec::desc("weight");
        let all = compute_view(&heroes, &term, &spec, &PageState::new(PageSize::All), &schema);

        let page_size = PageSize::limit(size).unwrap();
        let mut tiled = Vec::new();
        for k in 1..=page_size.page_count(all.total_count) {
            let view = compute_view(&heroes, &term, &spec, &PageState::new(page_size).at(k), &schema);
            tiled.extend(ids(&view.records));
        }
        prop_assert_eq!(tiled, ids(&all.records));
    }

    /// Same inputs, same view.
    #[test]
    fn compute_view_is_idempotent(
        heroes in heroes_strategy(60),
        term in "[a-z]{0,2}",
        page in 1usize..5,
    ) {
        let schema = schema();
        let spec = SortSpec::asc("weight");
        let state = PageState::new(PageSize::limit(7).unwrap()).at(page);

        let first = compute_view(&heroes, &term, &spec, &state, &schema);
        let second = compute_view(&heroes, &term, &spec, &state, &schema);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Additional edge case tests
// ============================================================================

#[test]
fn empty_dataset_has_no_pages() {
    let heroes: Vec<TestHero> = vec![];
    let view = compute_view(
        &heroes,
        "",
        &SortSpec::default(),
        &PageState::default(),
        &schema(),
    );
    assert!(view.is_empty());
    assert_eq!(view.total_count, 0);
    assert_eq!(view.page_count, 0);
}

#[test]
fn empty_dataset_rejects_every_page() {
    let mut session = Session::new(Vec::<TestHero>::new()).with_schema(schema());
    assert!(session.go_to_page(1).is_err());
    assert!(!session.next_page());
    assert!(!session.prev_page());
    assert_eq!(session.page_state().page(), 1);
}
