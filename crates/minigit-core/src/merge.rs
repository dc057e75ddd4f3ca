//! Timestamp-ordered merge of two commit chains.
//!
//! Both inputs are consumed. Nodes are detached from the front of whichever
//! chain wins the comparison and appended to the output, so every node ends
//! up owned by exactly one chain and no intermediate state is ever shared.

use serde::{Deserialize, Serialize};

use crate::commit::Commit;

/// Which side goes first when the two candidate nodes have equal timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreak {
    /// The incoming chain's node goes first. The local node only wins
    /// when strictly newer.
    #[default]
    Incoming,
    /// The local chain's node goes first.
    Local,
}

impl TieBreak {
    /// Whether the local node is placed before the incoming one.
    pub fn local_first(self, local: i64, incoming: i64) -> bool {
        match self {
            TieBreak::Incoming => local > incoming,
            TieBreak::Local => local >= incoming,
        }
    }
}

/// Merge two newest-first chains into one newest-first chain.
///
/// Relative order within each input is preserved. Once either side runs out
/// the remainder of the other is attached as-is.
pub fn merge_chains(
    mut local: Option<Box<Commit>>,
    mut incoming: Option<Box<Commit>>,
    tie_break: TieBreak,
) -> Option<Box<Commit>> {
    let mut merged: Option<Box<Commit>> = None;
    let mut tail = &mut merged;

    loop {
        let local_first = match (&local, &incoming) {
            (Some(a), Some(b)) => tie_break.local_first(a.timestamp(), b.timestamp()),
            _ => break,
        };
        let source = if local_first { &mut local } else { &mut incoming };

        let Some(mut node) = source.take() else {
            break;
        };
        *source = node.past.take();
        tail = &mut tail.insert(node).past;
    }

    *tail = local.or(incoming);
    merged
}
