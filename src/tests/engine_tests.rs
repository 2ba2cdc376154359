#[cfg(test)]
mod tests {
    use crate::engine::{badge_counts, roster_view, BadgeCounts, FilterMode};
    use crate::models::Teammate;
    use crate::tests::support::{stamp, teammate};

    fn mixed_roster() -> Vec<Teammate> {
        let mut ada = teammate("Ada", Some(stamp(30)));
        ada.validated = true;
        ada.product_collected = true;
        ada.added_to_groups = true;

        let mut brook = teammate("Brook", Some(stamp(20)));
        brook.validated = true;

        let cleo = teammate("Cleo", Some(stamp(10)));

        vec![ada, brook, cleo]
    }

    #[test]
    fn unvalidated_filter_is_sound_and_complete() {
        let roster = mixed_roster();

        let view = roster_view(&roster, FilterMode::Unvalidated, "");

        // Soundness: everything kept has the flag unset
        assert!(view.iter().all(|tm| !tm.validated));
        // Completeness: everything with the flag unset is kept
        assert_eq!(view.len(), roster.iter().filter(|tm| !tm.validated).count());
        assert_eq!(view[0].name, "Cleo");
    }

    #[test]
    fn products_filter_keeps_uncollected_only() {
        let roster = mixed_roster();

        let view = roster_view(&roster, FilterMode::Products, "");

        assert!(view.iter().all(|tm| !tm.product_collected));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn groups_filter_keeps_unadded_only() {
        let roster = mixed_roster();

        let view = roster_view(&roster, FilterMode::Groups, "");

        assert!(view.iter().all(|tm| !tm.added_to_groups));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn unknown_filter_value_falls_back_to_all() {
        let parsed: FilterMode = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(parsed, FilterMode::All);

        let parsed: FilterMode = serde_json::from_str("\"unvalidated\"").unwrap();
        assert_eq!(parsed, FilterMode::Unvalidated);

        assert_eq!(FilterMode::default(), FilterMode::All);
    }

    #[test]
    fn search_matches_any_searchable_field_case_insensitively() {
        let mut dara = teammate("Dara", Some(stamp(1)));
        dara.upline = "Marta Quinn".to_string();

        let mut ezra = teammate("Ezra", Some(stamp(2)));
        ezra.id_number = "ZX-7741".to_string();

        let roster = vec![dara, ezra];

        // Upline hit
        let view = roster_view(&roster, FilterMode::All, "QUINN");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Dara");

        // ID number hit
        let view = roster_view(&roster, FilterMode::All, "zx-77");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Ezra");
    }

    #[test]
    fn empty_search_term_matches_everything() {
        let roster = mixed_roster();

        let view = roster_view(&roster, FilterMode::All, "");

        assert_eq!(view.len(), roster.len());
    }

    #[test]
    fn search_ignores_the_timestamp_field() {
        // The only "2031" in this record lives in its update stamp
        let mut tm = teammate("Finn", Some(stamp(0)));
        tm.updated_at = Some("2031-01-01T00:00:00Z".parse().unwrap());
        tm.stage = "Seed".to_string();

        let view = roster_view(&[tm], FilterMode::All, "2031");

        assert!(view.is_empty());
    }

    #[test]
    fn sort_puts_most_recent_first_and_unstamped_last() {
        let roster = vec![
            teammate("Old", Some(stamp(10))),
            teammate("Unstamped", None),
            teammate("New", Some(stamp(90))),
            teammate("Mid", Some(stamp(50))),
        ];

        let view = roster_view(&roster, FilterMode::All, "");

        let names: Vec<&str> = view.iter().map(|tm| tm.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old", "Unstamped"]);

        // Pairwise: stamped records are non-increasing
        for pair in view.windows(2) {
            if let (Some(first), Some(second)) = (pair[0].updated_at, pair[1].updated_at) {
                assert!(first >= second);
            }
        }
    }

    #[test]
    fn sort_is_stable_for_equal_stamps() {
        let roster = vec![
            teammate("First", Some(stamp(5))),
            teammate("Second", Some(stamp(5))),
            teammate("NoStampFirst", None),
            teammate("NoStampSecond", None),
        ];

        let view = roster_view(&roster, FilterMode::All, "");

        let names: Vec<&str> = view.iter().map(|tm| tm.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "NoStampFirst", "NoStampSecond"]);
    }

    #[test]
    fn engine_is_pure_and_idempotent() {
        let roster = mixed_roster();
        let before = roster.clone();

        let first = roster_view(&roster, FilterMode::Unvalidated, "c");
        let second = roster_view(&roster, FilterMode::Unvalidated, "c");

        assert_eq!(first, second);
        assert_eq!(roster, before);
    }

    #[test]
    fn badge_counts_come_from_the_full_roster() {
        let roster = mixed_roster();

        let counts = badge_counts(&roster);

        assert_eq!(
            counts,
            BadgeCounts {
                unvalidated: 1,
                products: 2,
                groups: 2,
            }
        );
    }

    #[test]
    fn unvalidated_filter_with_badge_count() {
        let mut complete = teammate("A", Some(stamp(1)));
        complete.validated = true;
        complete.product_collected = true;
        complete.added_to_groups = true;

        let pending = teammate("B", Some(stamp(2)));

        let roster = vec![complete, pending];

        let view = roster_view(&roster, FilterMode::Unvalidated, "");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "B");

        assert_eq!(badge_counts(&roster).unvalidated, 1);
    }

    #[test]
    fn letter_search_only_matches_records_carrying_it() {
        let mut complete = teammate("A", Some(stamp(1)));
        complete.validated = true;

        // No searchable field of this record contains an "a"; the default
        // stage would, so it gets an explicit one
        let mut pending = teammate("B", Some(stamp(2)));
        pending.stage = "Seed".to_string();

        let view = roster_view(&[complete, pending], FilterMode::All, "a");

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "A");
    }
}
