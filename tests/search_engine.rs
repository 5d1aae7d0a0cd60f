use quizpeek::search::{SearchSession, SearchState, SegmentKind};

fn joined(search: &SearchSession, block: usize) -> String {
    search
        .segments(block)
        .iter()
        .map(|segment| segment.text)
        .collect()
}

#[test]
fn clearing_restores_every_header() {
    let headers = vec![
        "1. The cat sat on the mat".to_string(),
        "2. Concatenate CAT and cat".to_string(),
        "3. No felines here".to_string(),
    ];
    let mut search = SearchSession::new(headers.clone());

    for query in ["cat", "at", "e", "  ", "zzz", "."] {
        search.perform_search(query);
        search.find_next();
        for (block, header) in headers.iter().enumerate() {
            assert_eq!(&joined(&search, block), header);
        }
        search.clear_highlights();
        for (block, header) in headers.iter().enumerate() {
            let segments = search.segments(block);
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].kind, SegmentKind::Plain);
            assert_eq!(segments[0].text, header.as_str());
        }
        assert_eq!(search.counter_text(), "0 / 0");
        assert_eq!(search.state(), SearchState::Idle);
    }
}

#[test]
fn repeated_word_yields_one_marker_per_occurrence() {
    let mut search = SearchSession::new(["1. cat Cat CAT"]);
    assert_eq!(search.perform_search("cat"), 3);

    let markers: Vec<_> = search
        .segments(0)
        .into_iter()
        .filter(|segment| segment.kind != SegmentKind::Plain)
        .collect();
    assert_eq!(markers.len(), 3);
    for marker in markers {
        assert!(marker.text.eq_ignore_ascii_case("cat"));
    }
}

#[test]
fn punctuation_is_matched_literally() {
    let mut search = SearchSession::new(["a.b is here", "axb is here"]);
    assert_eq!(search.perform_search("a.b"), 1);
    assert_eq!(search.matches()[0].block, 0);
}

#[test]
fn navigation_wraps_in_both_directions() {
    let mut search = SearchSession::new(["x x x", "x x"]);
    assert_eq!(search.perform_search("x"), 5);

    let last = search.navigate_to_match(-1).expect("navigates");
    assert_eq!(last.index, 4);
    assert_eq!(last.block, 1);
    assert_eq!(search.counter_text(), "5 / 5");

    let first = search.navigate_to_match(5).expect("navigates");
    assert_eq!(first.index, 0);
    assert_eq!(search.counter_text(), "1 / 5");
}

#[test]
fn navigation_without_matches_changes_nothing() {
    let mut search = SearchSession::new(["nothing to see"]);
    search.perform_search("zebra");
    assert!(search.navigate_to_match(0).is_none());
    assert!(search.navigate_to_match(-3).is_none());
    assert_eq!(search.current(), None);
    assert!(search.counter().is_none());
}

#[test]
fn find_next_searches_before_navigating() {
    let mut search = SearchSession::new(["1. dog", "2. dog"]);
    search.perform_search("dog");
    search.clear_highlights();
    assert!(search.matches().is_empty());

    // The query survives a clear, so find_next can re-run it.
    let navigation = search.find_next().expect("re-searched");
    assert_eq!(navigation.index, 0);
    assert_eq!(search.state(), SearchState::Navigating);
    assert_eq!(search.counter_text(), "1 / 2");
}
