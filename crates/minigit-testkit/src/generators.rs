//! Proptest generators for property-based testing.

use proptest::prelude::*;

use minigit_core::Repository;

use crate::fixtures::TestFixture;

/// Generate a timestamp from a narrow range so ties are common.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=40
}

/// Generate up to `max_len` timestamps, oldest first.
pub fn timestamps(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(timestamp(), 0..=max_len).prop_map(|mut ts| {
        ts.sort_unstable();
        ts
    })
}

/// Generate a commit message, possibly empty.
pub fn message() -> impl Strategy<Value = String> {
    "[a-z ]{0,24}".prop_map(String::from)
}

/// Generate a valid repository name.
pub fn repository_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}".prop_map(String::from)
}

/// Parameters for a single repository.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub name: String,
    /// Oldest first.
    pub timestamps: Vec<i64>,
}

impl ChainParams {
    /// Build the repository with the fixture's clock and counter.
    pub fn build(&self, fixture: &TestFixture) -> Repository {
        fixture.repository_with_timestamps(&self.name, &self.timestamps)
    }
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (repository_name(), timestamps(32))
            .prop_map(|(name, timestamps)| ChainParams { name, timestamps })
            .boxed()
    }
}

/// Parameters for a pair of repositories to merge.
///
/// Built repositories are named `local` and `incoming`, so every message
/// says which side it came from.
#[derive(Debug, Clone)]
pub struct MergeParams {
    pub local: Vec<i64>,
    pub incoming: Vec<i64>,
}

impl MergeParams {
    pub fn build(&self, fixture: &TestFixture) -> (Repository, Repository) {
        (
            fixture.repository_with_timestamps("local", &self.local),
            fixture.repository_with_timestamps("incoming", &self.incoming),
        )
    }
}

impl Arbitrary for MergeParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (timestamps(24), timestamps(24))
            .prop_map(|(local, incoming)| MergeParams { local, incoming })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{is_newest_first, messages, timestamps as chain_timestamps};
    use minigit_core::TieBreak;

    /// Within every run of equal timestamps, no commit from `second` comes
    /// before one from `first`.
    fn ties_ordered(repo: &Repository, first: &str, second: &str) -> bool {
        let mut run_ts = None;
        let mut seen_second = false;
        for commit in repo.iter() {
            if run_ts != Some(commit.timestamp()) {
                run_ts = Some(commit.timestamp());
                seen_second = false;
            }
            if commit.message().starts_with(second) {
                seen_second = true;
            } else if commit.message().starts_with(first) && seen_second {
                return false;
            }
        }
        true
    }

    fn from_side(merged: &[String], side: &str) -> Vec<String> {
        merged
            .iter()
            .filter(|m| m.starts_with(side))
            .cloned()
            .collect()
    }

    proptest! {
        #[test]
        fn test_merge_sorted_and_sized(params: MergeParams) {
            let fixture = TestFixture::new();
            let (mut local, mut incoming) = params.build(&fixture);

            let transferred = local.synchronize(&mut incoming);

            prop_assert_eq!(transferred, params.incoming.len());
            prop_assert_eq!(local.size(), params.local.len() + params.incoming.len());
            prop_assert_eq!(local.iter().count(), local.size());
            prop_assert!(is_newest_first(&local));
            prop_assert!(incoming.is_empty());
            prop_assert_eq!(incoming.size(), 0);
        }

        #[test]
        fn test_merge_keeps_each_side_in_order(params: MergeParams) {
            let fixture = TestFixture::new();
            let (mut local, mut incoming) = params.build(&fixture);
            let local_before = messages(&local);
            let incoming_before = messages(&incoming);

            local.synchronize(&mut incoming);
            let merged = messages(&local);

            prop_assert_eq!(from_side(&merged, "local-"), local_before);
            prop_assert_eq!(from_side(&merged, "incoming-"), incoming_before);
        }

        #[test]
        fn test_merge_tie_break(params: MergeParams) {
            let fixture = TestFixture::new();

            let (mut local, mut incoming) = params.build(&fixture);
            local.synchronize_with(&mut incoming, TieBreak::Incoming);
            prop_assert!(ties_ordered(&local, "incoming-", "local-"));

            let (mut local, mut incoming) = params.build(&fixture);
            local.synchronize_with(&mut incoming, TieBreak::Local);
            prop_assert!(ties_ordered(&local, "local-", "incoming-"));
        }

        #[test]
        fn test_merge_into_empty_adopts(params: ChainParams) {
            let fixture = TestFixture::new();
            let mut donor = params.build(&fixture);
            let digest = donor.digest();
            let head = donor.head();

            let mut target = fixture.repository("target");
            target.synchronize(&mut donor);

            prop_assert_eq!(target.digest(), digest);
            prop_assert_eq!(target.head(), head);
            prop_assert_eq!(target.size(), params.timestamps.len());
            prop_assert!(donor.is_empty());
        }

        #[test]
        fn test_drop_removes_exactly_one(params in any::<ChainParams>(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!params.timestamps.is_empty());

            let fixture = TestFixture::new();
            let mut repo = params.build(&fixture);
            let mut expected = repo.records();
            let removed = expected.remove(pick.index(expected.len()));

            prop_assert!(repo.drop_commit(removed.id));
            prop_assert!(!repo.contains(removed.id));
            prop_assert_eq!(repo.size(), expected.len());
            prop_assert_eq!(repo.records(), expected);
            prop_assert_eq!(repo.head(), repo.records().first().map(|r| r.id));
        }

        #[test]
        fn test_history_is_bounded(params in any::<ChainParams>(), n in 1usize..48) {
            let fixture = TestFixture::new();
            let repo = params.build(&fixture);

            let history = repo.history(n).unwrap();
            prop_assert_eq!(history.lines().count(), n.min(repo.size()));
        }

        #[test]
        fn test_commit_round_trip(msgs in prop::collection::vec(message(), 1..16)) {
            let fixture = TestFixture::new();
            let mut repo = fixture.repository("round-trip");
            for m in &msgs {
                repo.commit(m.as_str());
            }

            let mut expected = msgs.clone();
            expected.reverse();
            prop_assert_eq!(messages(&repo), expected);
            prop_assert_eq!(repo.history(msgs.len()).unwrap().lines().count(), msgs.len());
            prop_assert_eq!(chain_timestamps(&repo).len(), msgs.len());
        }
    }
}
