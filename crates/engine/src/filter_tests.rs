use indexmap::IndexMap;

use super::*;
use crate::{Highlight, ItemText, render_spans};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Note {
    key: String,
    description: Option<String>,
}

fn note(key: &str) -> Note {
    Note {
        key: key.to_owned(),
        description: None,
    }
}

fn notes_filter(keys: &[&str], options: FilterOptions) -> FuzzyFilter<Note> {
    FuzzyFilter::builder()
        .items(keys.iter().map(|k| note(k)))
        .text_provider(|n: &Note| ItemText::from(n.key.as_str()))
        .options(options)
        .build()
        .expect("provider is set")
}

fn rendered(results: &[MatchResult<'_, Note>]) -> Vec<(String, bool)> {
    results
        .iter()
        .map(|r| {
            let spans = r.highlight.as_single().expect("single text highlight");
            (render_spans(spans, "[", "]"), r.is_same_order)
        })
        .collect()
}

/// Each case: keys, query, expected `(highlight, is_same_order)` in output order.
type Case<'a> = (&'a [&'a str], &'a str, &'a [(&'a str, bool)]);

fn check(cases: &[Case<'_>], options: FilterOptions) {
    for (keys, query, expected) in cases {
        let mut filter = notes_filter(keys, options);
        let got = rendered(&filter.filter(query));
        let want: Vec<(String, bool)> = expected
            .iter()
            .map(|(h, same)| (h.to_string(), *same))
            .collect();
        assert_eq!(got, want, "keys {keys:?}, query {query:?}");
    }
}

#[test]
fn query_not_matches() {
    let cases: &[Case<'_>] = &[
        (&["hello world"], "hellow", &[]),
        (&["hello world"], "word", &[]),
        (&["helloworld"], "hello world", &[]),
        (&["helloWorld"], "helloworld", &[]),
        (&["helloWorld"], "hel orld", &[]),
        (&["helloWorld"], "l", &[]),
        (&["hello world"], "hello again", &[]),
        (&["hello world"], "justWord", &[]),
        (&["hello world"], "ello world", &[]),
    ];
    check(cases, FilterOptions::default());
}

#[test]
fn query_matches_single_word() {
    let cases: &[Case<'_>] = &[
        (&["hello world"], "hel", &[("[hel]lo world", true)]),
        (&["hello world"], "Hel", &[("[hel]lo world", true)]),
        (&["helloworld"], "hel", &[("[hel]loworld", true)]),
        (&["helloWorld"], "hel", &[("[hel]loWorld", true)]),
        (&["helloWorld"], "hello", &[("[hello]World", true)]),
        (&["helloWorld"], "wo", &[("hello[Wo]rld", true)]),
        (&["hello-world"], "wo", &[("hello-[wo]rld", true)]),
        (&["hello world"], "wo", &[("hello [wo]rld", true)]),
        (&["HELLO WORLD"], "hel", &[("[HEL]LO WORLD", true)]),
        (&["HELLO_WORLD"], "hel", &[("[HEL]LO_WORLD", true)]),
        (&["HELLO-WORLD"], "wo", &[("HELLO-[WO]RLD", true)]),
        (&["HELLO-WORLD"], "world", &[("HELLO-[WORLD]", true)]),
        (&["helloWorld"], "HELLO", &[("[hello]World", true)]),
    ];
    check(cases, FilterOptions::default());
}

#[test]
fn query_matches_multiple_words() {
    let cases: &[Case<'_>] = &[
        (&["hello world"], "hel wor", &[("[hel]lo [wor]ld", true)]),
        (&["hello world"], "helWor", &[("[hel]lo [wor]ld", true)]),
        (&["hello world"], "HelWor", &[("[hel]lo [wor]ld", true)]),
        (&["hello world"], "hel-Wor", &[("[hel]lo [wor]ld", true)]),
        (&["hello world"], "hel-World", &[("[hel]lo [world]", true)]),
        (&["HELLO world"], "Hel WORLD", &[("[HEL]LO [world]", true)]),
        (&["HELLO_world"], "Hel_WORLD", &[("[HEL]LO_[world]", true)]),
        (&["HELLO_World"], "Hel_WORLD", &[("[HEL]LO_[World]", true)]),
        (
            &["hello world again"],
            "hel wor-again",
            &[("[hel]lo [wor]ld [again]", true)],
        ),
        (&["hello world"], "wor hel", &[("[hel]lo [wor]ld", false)]),
        (&["hello world"], "worHel", &[("[hel]lo [wor]ld", false)]),
        (&["hello world"], "WorHel", &[("[hel]lo [wor]ld", false)]),
        (&["hello world"], "wor-Hel", &[("[hel]lo [wor]ld", false)]),
        (&["hello world"], "world-Hel", &[("[hel]lo [world]", false)]),
        (&["HELLO world"], "World HEL", &[("[HEL]LO [world]", false)]),
        (&["HELLO_world"], "World_HEL", &[("[HEL]LO_[world]", false)]),
        (&["HELLO_World"], "World_HELLO", &[("[HELLO]_[World]", false)]),
        (
            &["HELLO_World_again"],
            "World-aga_HELLO",
            &[("[HELLO]_[World]_[aga]in", false)],
        ),
    ];
    check(cases, FilterOptions::default());
}

#[test]
fn query_matches_same_order_first() {
    const PLANETS: &[&str] = &[
        "hello planet mars",
        "world hello",
        "another abchello",
        "planet earth, hello",
    ];
    let cases: &[Case<'_>] = &[
        (
            &["hello world", "world hello"],
            "hel wor",
            &[("[hel]lo [wor]ld", true), ("[wor]ld [hel]lo", false)],
        ),
        (
            &["hello world", "world hello"],
            "worHel",
            &[("[wor]ld [hel]lo", true), ("[hel]lo [wor]ld", false)],
        ),
        (
            PLANETS,
            "hello",
            &[
                ("[hello] planet mars", true),
                ("world [hello]", true),
                ("planet earth, [hello]", true),
            ],
        ),
        (
            PLANETS,
            "hello-Plan",
            &[
                ("[hello] [plan]et mars", true),
                ("[plan]et earth, [hello]", false),
            ],
        ),
        (
            PLANETS,
            "plan, hello",
            &[
                ("[plan]et earth, [hello]", true),
                ("[hello] [plan]et mars", false),
            ],
        ),
    ];
    let options = FilterOptions {
        same_order_first: true,
        ..FilterOptions::default()
    };
    check(cases, options);
}

#[test]
fn query_matches_missing_words() {
    let cases: &[Case<'_>] = &[(
        &["hello world again"],
        "hel wor",
        &[("[hel]lo [wor]ld again", true)],
    )];
    check(cases, FilterOptions::default());
}

#[test]
fn without_policy_results_keep_index_order() {
    let cases: &[Case<'_>] = &[(
        &["world hello", "hello world"],
        "hel wor",
        &[("[wor]ld [hel]lo", false), ("[hel]lo [wor]ld", true)],
    )];
    check(cases, FilterOptions::default());
}

#[test]
fn strict_order_drops_out_of_order_matches() {
    let options = FilterOptions {
        same_order_strict: true,
        ..FilterOptions::default()
    };
    let cases: &[Case<'_>] = &[
        (
            &["world hello", "hello world"],
            "hel wor",
            &[("[hel]lo [wor]ld", true)],
        ),
        (&["hello world"], "wor hel", &[]),
    ];
    check(cases, options);
}

#[test]
fn empty_query_returns_every_item_unhighlighted() {
    let mut filter = notes_filter(&["hello world", "another"], FilterOptions::default());
    let got = rendered(&filter.filter("  -_ "));
    assert_eq!(
        got,
        vec![("hello world".to_owned(), true), ("another".to_owned(), true)]
    );
}

#[test]
fn empty_collection_returns_nothing() {
    let mut filter = notes_filter(&[], FilterOptions::default());
    assert!(filter.filter("hel").is_empty());
    assert!(filter.filter("").is_empty());
}

#[test]
fn filtering_is_idempotent() {
    let mut filter = notes_filter(&["hello world", "world hello"], FilterOptions::default());
    let first = rendered(&filter.filter("hel wor"));
    let second = rendered(&filter.filter("hel wor"));
    assert_eq!(first, second);
}

#[test]
fn results_borrow_the_stored_items() {
    let mut filter = notes_filter(&["hello", "world"], FilterOptions::default());
    let results = filter.filter("wor");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item, &note("world"));
}

#[test]
fn index_is_built_lazily_by_default() {
    let mut filter = notes_filter(&["hello"], FilterOptions::default());
    assert!(!filter.index().is_indexed());
    filter.filter("x");
    assert!(filter.index().is_indexed());
}

#[test]
fn construct_mode_indexes_at_build_time() {
    let filter = FuzzyFilter::builder()
        .items(vec![note("hello")])
        .text_provider(|n: &Note| ItemText::from(n.key.as_str()))
        .init_index_on(InitIndexOn::Construct)
        .build()
        .expect("provider is set");
    assert!(filter.index().is_indexed());
}

#[test]
fn building_without_provider_fails() {
    let result = FuzzyFilter::<Note>::builder().items(vec![note("a")]).build();
    assert_eq!(result.err(), Some(ConfigError::MissingTextProvider));
}

#[test]
fn config_sets_tokenizer_and_policy() {
    let config = FilterConfig {
        tokenizer: TokenizerConfig {
            split_by_case: false,
            ..TokenizerConfig::default()
        },
        filter: FilterOptions {
            same_order_strict: true,
            ..FilterOptions::default()
        },
        ..FilterConfig::default()
    };
    let mut filter = FuzzyFilter::builder()
        .items(vec![note("helloWorld"), note("world hello")])
        .text_provider(|n: &Note| ItemText::from(n.key.as_str()))
        .config(config)
        .build()
        .expect("provider is set");

    let got = rendered(&filter.filter("wor"));
    assert_eq!(got, vec![("[wor]ld hello".to_owned(), true)]);
    assert!(filter.options().same_order_strict);
}

#[test]
fn added_and_removed_items_are_reflected() {
    let mut filter = notes_filter(&["hello world"], FilterOptions::default());
    assert_eq!(filter.filter("wor").len(), 1);

    filter.add(note("wonderful"));
    filter.add_all(vec![note("worry"), note("nothing")]);
    assert_eq!(filter.len(), 4);
    let got: Vec<String> = filter.filter("wo").iter().map(|r| r.item.key.clone()).collect();
    assert_eq!(got, vec!["hello world", "wonderful", "worry"]);

    assert!(filter.remove(&note("hello world")));
    assert!(!filter.remove(&note("hello world")));
    assert_eq!(filter.remove_all([&note("worry"), &note("nothing")]), 2);
    let got: Vec<String> = filter.filter("wo").iter().map(|r| r.item.key.clone()).collect();
    assert_eq!(got, vec!["wonderful"]);
}

#[test]
fn set_options_changes_policy_between_calls() {
    let mut filter = notes_filter(&["world hello", "hello world"], FilterOptions::default());
    assert_eq!(filter.filter("hel wor").len(), 2);

    filter.set_options(FilterOptions {
        same_order_strict: true,
        ..FilterOptions::default()
    });
    assert_eq!(filter.filter("hel wor").len(), 1);
}

#[test]
fn keyed_text_matches_across_fields() {
    let mut filter = FuzzyFilter::builder()
        .items(vec![Note {
            key: "hello world".into(),
            description: Some("again".into()),
        }])
        .text_provider(|n: &Note| {
            let mut map = IndexMap::new();
            map.insert("key".to_owned(), Some(n.key.clone()));
            map.insert("description".to_owned(), n.description.clone());
            ItemText::Keyed(map)
        })
        .build()
        .expect("provider is set");

    let results = filter.filter("hel again");
    assert_eq!(results.len(), 1);
    assert!(!results[0].is_same_order);

    let Highlight::Keyed(fields) = &results[0].highlight else {
        panic!("expected keyed highlight");
    };
    assert_eq!(render_spans(&fields["key"], "[", "]"), "[hel]lo world");
    assert_eq!(render_spans(&fields["description"], "[", "]"), "[again]");
}

#[test]
fn list_text_highlights_each_element() {
    let mut filter = FuzzyFilter::builder()
        .items(vec![note("alpha|beta gamma")])
        .text_provider(|n: &Note| ItemText::list(n.key.split('|')))
        .build()
        .expect("provider is set");

    let results = filter.filter("gam al");
    assert_eq!(results.len(), 1);
    let Highlight::List(fields) = &results[0].highlight else {
        panic!("expected list highlight");
    };
    assert_eq!(render_spans(&fields[0], "[", "]"), "[al]pha");
    assert_eq!(render_spans(&fields[1], "[", "]"), "beta [gam]ma");
    assert!(!results[0].is_same_order);
}

#[test]
fn timed_filter_reports_stages() {
    let mut filter = notes_filter(&["hello world", "other"], FilterOptions::default());

    let (results, metrics) = filter.filter_timed("hel");
    assert_eq!(results.len(), 1);
    assert!(metrics.tokenize_time.is_some());
    assert!(metrics.index_time.is_some());
    assert!(metrics.match_time.is_some());
    assert!(metrics.rank_time.is_some());
    assert_eq!((metrics.candidates, metrics.matches), (2, 1));

    // Index already built: no index stage the second time.
    let (_, metrics) = filter.filter_timed("hel");
    assert!(metrics.index_time.is_none());
}
