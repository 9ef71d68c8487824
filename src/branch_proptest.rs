//! Property-based tests for branch filtering and exempt set aggregation.
//!
//! These tests use proptest to generate random listings and diff results and
//! verify that the filtering and union invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::branch::{ExemptFileSet, TrackingBranch};
    use crate::config::ErrorPolicy;
    use crate::phases::branches::relevant_branches;
    use crate::phases::exempt;
    use crate::phases::testing::MockVcs;
    use crate::report::NullReporter;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn mainline() -> TrackingBranch {
        TrackingBranch::new("origin", "main")
    }

    /// Listing lines mixing relevant branches, other remotes, the HEAD alias
    /// and the mainline branch, with random padding.
    fn listing_line() -> impl Strategy<Value = String> {
        let name = prop_oneof![
            "origin/[a-z][a-z0-9/_-]{0,12}",
            "upstream/[a-z][a-z0-9/_-]{0,12}",
            Just("origin/HEAD -> origin/main".to_string()),
            Just("origin/main".to_string()),
            "[a-z]{1,8}",
        ];
        ("[ \t]{0,3}", name, "[ \t]{0,3}").prop_map(|(pre, name, post)| format!("{}{}{}", pre, name, post))
    }

    // ============================================================================
    // relevant_branches property tests
    // ============================================================================

    proptest! {
        /// Property: every kept branch is on the remote and is neither the alias nor mainline
        #[test]
        fn kept_branches_satisfy_filter(lines in prop::collection::vec(listing_line(), 0..30)) {
            let main = mainline();
            for branch in relevant_branches(&lines, "origin", &main) {
                prop_assert!(branch.as_str().starts_with("origin/"));
                prop_assert!(!branch.as_str().starts_with("origin/HEAD ->"));
                prop_assert_ne!(&branch, &main);
            }
        }

        /// Property: trimming the input first does not change the result
        #[test]
        fn trimming_does_not_change_membership(lines in prop::collection::vec(listing_line(), 0..30)) {
            let main = mainline();
            let trimmed: Vec<String> = lines.iter().map(|l| l.trim().to_string()).collect();
            prop_assert_eq!(
                relevant_branches(&lines, "origin", &main),
                relevant_branches(&trimmed, "origin", &main)
            );
        }

        /// Property: output preserves the relative order of the listing
        #[test]
        fn output_is_subsequence_of_input(lines in prop::collection::vec(listing_line(), 0..30)) {
            let main = mainline();
            let kept = relevant_branches(&lines, "origin", &main);
            let mut input = lines.iter().map(|l| l.trim());
            for branch in &kept {
                prop_assert!(input.any(|l| l == branch.as_str()));
            }
        }
    }

    // ============================================================================
    // exempt set property tests
    // ============================================================================

    fn branch_diffs() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(
            prop::collection::vec("[a-e]/[a-e]\\.php", 0..6),
            0..8,
        )
    }

    proptest! {
        /// Property: the exempt set is exactly the union of every branch's diff
        #[test]
        fn exempt_set_is_union(diffs in branch_diffs()) {
            let mut vcs = MockVcs::new();
            let mut branches = Vec::new();
            for (i, files) in diffs.iter().enumerate() {
                let name = format!("origin/b{}", i);
                let refs: Vec<&str> = files.iter().map(String::as_str).collect();
                vcs = vcs.with_diff(&name, &refs);
                branches.push(TrackingBranch::from_qualified(name));
            }

            let collection = exempt::execute(
                &vcs,
                &branches,
                &mainline(),
                ErrorPolicy::ReportAndContinue,
                &NullReporter,
            ).unwrap();

            let expected: BTreeSet<&str> = diffs.iter().flatten().map(String::as_str).collect();
            let actual: BTreeSet<&str> = collection.files.iter().collect();
            prop_assert_eq!(collection.files.len(), actual.len());
            prop_assert_eq!(actual, expected);
        }

        /// Property: a failing branch removes exactly its own contribution
        #[test]
        fn failing_branch_excluded_from_union(diffs in branch_diffs(), failing in 0usize..8) {
            prop_assume!(!diffs.is_empty());
            let failing = failing % diffs.len();

            let mut vcs = MockVcs::new();
            let mut branches = Vec::new();
            for (i, files) in diffs.iter().enumerate() {
                let name = format!("origin/b{}", i);
                if i == failing {
                    vcs = vcs.with_failing_diff(&name);
                } else {
                    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
                    vcs = vcs.with_diff(&name, &refs);
                }
                branches.push(TrackingBranch::from_qualified(name));
            }

            let collection = exempt::execute(
                &vcs,
                &branches,
                &mainline(),
                ErrorPolicy::ReportAndContinue,
                &NullReporter,
            ).unwrap();

            let expected: ExemptFileSet = diffs
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != failing)
                .flat_map(|(_, files)| files.iter().cloned())
                .collect();
            prop_assert_eq!(collection.files, expected);
            prop_assert_eq!(collection.failures.len(), 1);
        }
    }
}
